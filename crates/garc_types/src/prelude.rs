//! Prelude module for `garc_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and functions.
//!
//! # Examples
//!
//! ```no_run
//! use garc_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let garc = GarcFile::open("romfs/a/0/9/3")?;
//! let layout = IconLayout::default();
//! let icons: IconStore = garc
//!     .iter()
//!     .enumerate()
//!     .map(|(index, entry)| {
//!         let data = decompress_or_keep(entry.subfile(0)?);
//!         Icon::decode(&data, index, &layout).ok()
//!     })
//!     .collect();
//! # Ok(())
//! # }
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Errors
	AssembleError,
	// Icons
	Color,
	Compression,
	ContainerError,
	DecodeError,
	// Containers
	FileEntry,
	// Forms
	FormNames,
	FormsError,
	GarcFile,
	GarcHeader,
	Icon,
	// Table
	IconIndexSet,
	IconLayout,
	// Variants
	IconLookup,
	IconStore,
	IconTable,
	LzError,
	Orientation,
	Palette,
	SubfileSpan,
	TableError,
	TableLayout,
	VariantKey,
	VariantSet,
	assemble,
	to_file_offset,
};

#[doc(inline)]
pub use crate::file::lz::{decompress, decompress_or_keep};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
