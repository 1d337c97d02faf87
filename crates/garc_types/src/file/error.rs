//! Error types for container parsing, icon decoding and table resolution.

use thiserror::Error;

/// Errors that can occur when parsing a GARC container.
///
/// Any of these makes the whole container unusable.
#[derive(Debug, Error)]
pub enum ContainerError {
	/// A chunk tag did not match
	#[error("Invalid {chunk} magic: expected {expected:02X?}, got {actual:02X?}")]
	InvalidMagic {
		/// Chunk being parsed
		chunk: &'static str,
		/// Expected tag bytes
		expected: [u8; 4],
		/// Tag bytes found in the file
		actual: [u8; 4],
	},

	/// A fixed header field did not hold its expected constant
	#[error("Unexpected {field}: expected {expected:#X}, got {actual:#X}")]
	UnexpectedValue {
		/// Name of the offending field
		field: &'static str,
		/// Expected value
		expected: u32,
		/// Value found in the file
		actual: u32,
	},

	/// Not enough data to read a structure
	#[error("Insufficient data at offset {offset:#X}: need {expected} bytes, {available} available")]
	InsufficientData {
		/// Absolute offset of the read
		offset: u64,
		/// Number of bytes requested
		expected: u64,
		/// Number of bytes left in the source
		available: u64,
	},

	/// A presence record points outside the span table
	#[error("Entry {entry} presence record at {offset:#X} lies outside the span table ({table_length:#X} bytes)")]
	EntryOutOfBounds {
		/// Entry index in the allocation table
		entry: usize,
		/// Offset relative to the span table start
		offset: u64,
		/// Length of the span table
		table_length: u32,
	},

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

/// Errors that can occur when decoding a single icon.
///
/// Only the affected image is skipped.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// Not enough data for the declared palette or pixel grid
	#[error("Insufficient {section} data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Section being decoded
		section: &'static str,
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Palette declares more colors than an 8-bit index can address
	#[error("Unexpected palette length {0} (at most 256 colors)")]
	InvalidPaletteLength(u16),

	/// The icon layout cannot be de-tiled
	#[error("Invalid layout: {0}")]
	InvalidLayout(String),

	/// A de-tiled pixel landed outside the raw grid
	#[error("Pixel {index} maps to ({x}, {y}) outside the {width}x{height} grid")]
	TileOutOfRange {
		/// Linear pixel index
		index: usize,
		/// Computed X coordinate
		x: usize,
		/// Computed Y coordinate
		y: usize,
		/// Raw grid width
		width: usize,
		/// Raw grid height
		height: usize,
	},
}

/// Errors that can occur when resolving one record of the icon table.
///
/// Only the affected entity is skipped.
#[derive(Debug, Error)]
pub enum TableError {
	/// Record number past the end of the table
	#[error("Record {record} out of range (table holds {count} records)")]
	RecordOutOfRange {
		/// Requested record
		record: usize,
		/// Number of records in the table
		count: usize,
	},

	/// Form and mirror counts disagree
	#[error("Form count {forms} does not match mirror count {mirrors}")]
	CountMismatch {
		/// Declared form count
		forms: u16,
		/// Declared mirror count
		mirrors: u16,
	},

	/// Mirror list of an entity without forms does not hold exactly two entries
	#[error("Entity without forms declares {0} mirror entries, expected 2")]
	UnexpectedMirrorCount(u16),

	/// Pointer lies below the runtime base address
	#[error("Pointer {pointer:#X} lies below base address {base:#X}")]
	PointerBelowBase {
		/// Raw pointer from the record
		pointer: u32,
		/// Runtime base address
		base: u32,
	},

	/// Icon index past the decoded image count
	#[error("Icon index {index} out of range (container holds {count} images)")]
	IndexOutOfRange {
		/// Resolved icon index
		index: u16,
		/// Total number of images
		count: usize,
	},

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

/// Errors that can occur when assembling the variants of one entity.
#[derive(Debug, Error)]
pub enum AssembleError {
	/// Caller supplied a different number of form names than the table declares
	#[error("Entity {entity}: {actual} form names supplied for {expected} forms")]
	NamingMismatch {
		/// Entity number
		entity: u16,
		/// Number of forms in the table
		expected: usize,
		/// Number of names supplied
		actual: usize,
	},

	/// Referenced icon was not decoded
	#[error("Entity {entity}: icon {index} is not available")]
	MissingIcon {
		/// Entity number
		entity: u16,
		/// Icon index
		index: u16,
	},
}

/// Errors that can occur when decompressing an LZ10/LZ11 payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LzError {
	/// Leading byte is not a known compression tag
	#[error("Unknown compression tag {0:#04X}")]
	UnknownTag(u8),

	/// Stream ended before the declared size was produced
	#[error("Truncated stream: produced {produced} of {expected} bytes")]
	Truncated {
		/// Bytes produced so far
		produced: usize,
		/// Declared decompressed size
		expected: usize,
	},

	/// Back-reference points before the start of the output
	#[error("Back-reference distance {distance} exceeds output length {position}")]
	InvalidDistance {
		/// Back-reference distance
		distance: usize,
		/// Output length at the time of the reference
		position: usize,
	},
}

/// Errors that can occur when parsing a form name table.
#[derive(Debug, Error)]
pub enum FormsError {
	/// A line does not have the `id|name|form_id` shape
	#[error("Invalid form table line {line}: {content:?}")]
	InvalidLine {
		/// 1-based line number
		line: usize,
		/// Offending line
		content: String,
	},

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}
