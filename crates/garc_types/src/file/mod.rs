//! File type support for `garc-rs` project.

mod error;
mod io_ext;

pub mod forms;
pub mod garc;
pub mod icon;
pub mod icon_table;
pub mod lz;
pub mod variant;

// Re-export error types
pub use error::{AssembleError, ContainerError, DecodeError, FormsError, LzError, TableError};

// Re-export main file types
pub use forms::FormNames;
pub use garc::{
	AllocationTable, Container as GarcFile, DataHeader, FileEntry, Header as GarcHeader, SpanTableHeader,
	SubfileSpan,
};
pub use icon::{
	Icon, IconLayout, Orientation,
	palette::{Color, Palette, round_channel},
};
pub use icon_table::{IconIndexSet, IconTable, TableLayout, TableRecord, to_file_offset};
pub use lz::Compression;
pub use variant::{IconLookup, IconStore, VariantKey, VariantSet, assemble};
