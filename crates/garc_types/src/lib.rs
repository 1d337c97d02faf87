//! This crate provides the GARC container reader and icon format support for the `garc-rs` project.
//!
//! # File Formats
//!
//! - **GARC**: Chunked container (`CRAG`/`OTAF`/`BTAF`/`BMIF`) bundling many variable-length subfiles
//! - **LZ10 / LZ11**: Nintendo LZ77 compression applied to individual subfiles
//! - **Icon**: Tiled 4/8-bit palette-indexed image with an RGB5A1 palette
//! - **Icon table**: Fixed-stride records inside `code.bin` mapping entities to icon indices
//! - **Form names**: `id|name|form_id` text table used to name alternate forms
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use garc_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let garc = GarcFile::open("romfs/a/0/9/3")?;
//! let payload = garc.entries()[0].subfile(0).unwrap_or_default();
//! let icon = Icon::decode(&decompress_or_keep(payload), 0, &IconLayout::default())?;
//! println!("{}x{} icon, {} colors", icon.width(), icon.height(), icon.palette().len());
//! # Ok(())
//! # }
//! ```

pub mod file;

/// `use garc_types::prelude::*;` to import commonly used items.
pub mod prelude;
