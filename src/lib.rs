#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `garc-rs` reads GARC game-data containers and extracts the tiled palette
//! icons they carry, named after the entities listed in the executable's icon
//! table.
//!
//! The format readers live in [`garc_types`], the extraction pipeline in
//! [`garc_extract`]; both are re-exported here.
//!
pub use garc_extract::*;
