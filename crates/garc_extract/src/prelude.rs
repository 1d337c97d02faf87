//! Prelude module for `garc_extract`.
//!
//! Re-exports the extraction driver together with the `garc_types` prelude.

#[doc(inline)]
pub use crate::{
	EntityError, EntityFailure, ExtractConfig, ExtractError, Extraction, IconError, ImageFailure, Manifest,
	OutputFormat, Pipeline, export_all, variant_path, write_hex_dump, write_manifest, write_variant,
};

#[doc(inline)]
pub use garc_types::prelude::*;
