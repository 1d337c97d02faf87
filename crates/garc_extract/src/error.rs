//! Error types for the extraction pipeline.

use garc_types::file::{AssembleError, ContainerError, DecodeError, TableError};
use thiserror::Error;

/// Errors that abort an extraction run.
#[derive(Debug, Error)]
pub enum ExtractError {
	/// The icon container could not be parsed
	#[error("Malformed container: {0}")]
	Container(#[from] ContainerError),

	/// The configured icon layout is unusable
	#[error("Invalid icon layout: {0}")]
	Layout(#[from] DecodeError),

	/// Entity numbers would not fit in 16 bits
	#[error("Entity numbers starting at {first} for {count} records exceed {max}", max = u16::MAX)]
	EntityRange {
		/// First entity number
		first: u16,
		/// Number of table records
		count: usize,
	},

	/// Configuration could not be loaded
	#[error("Configuration error: {0}")]
	Config(#[from] config::ConfigError),

	/// Indexed PNG encoding failed
	#[error("PNG encoding error: {0}")]
	Png(#[from] png::EncodingError),

	/// RGBA image encoding failed
	#[error("Image encoding error: {0}")]
	Image(#[from] image::ImageError),

	/// RGBA buffer does not match the icon dimensions
	#[error("RGBA buffer does not fit a {width}x{height} image")]
	ImageBuffer {
		/// Icon width
		width: u32,
		/// Icon height
		height: u32,
	},

	/// Manifest serialization failed
	#[error("Manifest error: {0}")]
	Manifest(#[from] serde_json::Error),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

/// Reasons a single container entry did not produce an icon.
#[derive(Debug, Error)]
pub enum IconError {
	/// The entry holds no subfiles
	#[error("Entry has no subfiles")]
	EmptyEntry,

	/// The payload could not be decoded
	#[error(transparent)]
	Decode(#[from] DecodeError),
}

/// Reasons a single entity produced no variants.
#[derive(Debug, Error)]
pub enum EntityError {
	/// The table record could not be resolved
	#[error(transparent)]
	Table(#[from] TableError),

	/// The variants could not be assembled
	#[error(transparent)]
	Assemble(#[from] AssembleError),
}
