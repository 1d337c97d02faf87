//! Icon extraction for the `garc-rs` project.
//!
//! Drives the readers in [`garc_types`] over a game dump: decodes every icon of
//! the icon container, resolves each entity through the table embedded in the
//! executable image, assembles the named variants and writes them out.
//!
//! # Examples
//!
//! ```no_run
//! use garc_extract::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractConfig::load(None)?;
//! let forms = FormNames::open("forms.txt")?;
//!
//! let pipeline = Pipeline::new(config)?;
//! let extraction = pipeline.run_in(Path::new("dump"), &forms)?;
//! let manifest = export_all(Path::new("icons"), &extraction, pipeline.config().output_format)?;
//! println!("{} variants written", manifest.variants.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
pub mod export;
pub mod naming;
pub mod pipeline;

/// `use garc_extract::prelude::*;` to import commonly used items.
pub mod prelude;

#[cfg(test)]
mod fixtures;

pub use garc_types;

pub use config::ExtractConfig;
pub use error::{EntityError, ExtractError, IconError};
pub use export::{Manifest, OutputFormat, export_all, write_hex_dump, write_manifest, write_variant};
pub use naming::variant_path;
pub use pipeline::{EntityFailure, Extraction, ImageFailure, Pipeline};
