//! Fixed-layout chunk headers of a GARC container.

use std::{
	fmt::Formatter,
	io::{Cursor, Read},
};

use crate::file::{ContainerError, io_ext::ReadLeExt};

use super::constants;

fn expect_magic(chunk: &'static str, expected: [u8; 4], actual: [u8; 4]) -> Result<(), ContainerError> {
	if actual != expected {
		return Err(ContainerError::InvalidMagic {
			chunk,
			expected,
			actual,
		});
	}
	Ok(())
}

fn expect_value(field: &'static str, expected: u32, actual: u32) -> Result<(), ContainerError> {
	if actual != expected {
		return Err(ContainerError::UnexpectedValue {
			field,
			expected,
			actual,
		});
	}
	Ok(())
}

fn ensure_len(data: &[u8], expected: usize) -> Result<(), ContainerError> {
	if data.len() < expected {
		return Err(ContainerError::InsufficientData {
			offset: 0,
			expected: expected as u64,
			available: data.len() as u64,
		});
	}
	Ok(())
}

/// `CRAG` container header (28 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
	/// Magic number, `CRAG`
	pub magic: [u8; 4],
	/// Header size, always `0x1C`
	pub header_size: u32,
	/// Byte-order marker, always `0xFEFF`
	pub byte_order: u16,
	/// Format version, always `0x0400`
	pub version: u16,
	/// Number of chunks, always 4
	pub chunk_count: u32,
	/// Absolute offset where subfile payload data begins
	pub data_offset: u32,
	/// Total container length
	pub garc_length: u32,
	/// Length of the last subfile
	pub last_length: u32,
}

impl Header {
	/// Size of the header in bytes
	pub const SIZE: usize = constants::HEADER_SIZE;

	/// Parses and validates the header from a byte slice.
	pub fn from_bytes(data: &[u8]) -> Result<Self, ContainerError> {
		ensure_len(data, Self::SIZE)?;
		let mut cursor = Cursor::new(data);

		let magic = cursor.read_tag()?;
		expect_magic("CRAG", constants::GARC_MAGIC, magic)?;

		let header_size = cursor.read_le_u32()?;
		expect_value("header size", constants::HEADER_SIZE as u32, header_size)?;

		let byte_order = cursor.read_le_u16()?;
		expect_value("byte order", u32::from(constants::BYTE_ORDER), u32::from(byte_order))?;

		let version = cursor.read_le_u16()?;
		expect_value("version", u32::from(constants::VERSION), u32::from(version))?;

		let chunk_count = cursor.read_le_u32()?;
		expect_value("chunk count", constants::CHUNK_COUNT, chunk_count)?;

		Ok(Self {
			magic,
			header_size,
			byte_order,
			version,
			chunk_count,
			data_offset: cursor.read_le_u32()?,
			garc_length: cursor.read_le_u32()?,
			last_length: cursor.read_le_u32()?,
		})
	}
}

impl std::fmt::Display for Header {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"GARC {{ version: {:#06X}, data_offset: {:#X}, length: {} }}",
			self.version, self.data_offset, self.garc_length
		)
	}
}

/// `OTAF` allocation table: one offset per entry into the span table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AllocationTable {
	/// Chunk size in bytes, including the 12-byte chunk header
	pub chunk_size: u32,
	/// Entry offsets relative to the span table's first presence record
	offsets: Vec<u32>,
}

impl AllocationTable {
	/// Size of the chunk header in bytes
	pub const HEADER_SIZE: usize = constants::CHUNK_HEADER_SIZE;

	/// Reads the chunk header and its offset list.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, ContainerError> {
		let magic = reader.read_tag()?;
		expect_magic("OTAF", constants::FATO_MAGIC, magic)?;

		let chunk_size = reader.read_le_u32()?;
		let entry_count = reader.read_le_u16()?;
		let padding = reader.read_le_u16()?;
		expect_value("OTAF padding", u32::from(constants::FATO_PADDING), u32::from(padding))?;

		let offsets = (0..entry_count).map(|_| reader.read_le_u32()).collect::<Result<Vec<_>, _>>()?;

		Ok(Self {
			chunk_size,
			offsets,
		})
	}

	/// Returns the entry offsets.
	pub fn offsets(&self) -> &[u32] {
		&self.offsets
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.offsets.len()
	}

	/// Returns `true` if the table has no entries.
	pub fn is_empty(&self) -> bool {
		self.offsets.is_empty()
	}
}

/// `BTAF` span table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanTableHeader {
	/// Chunk length in bytes, including this header
	pub length: u32,
	/// Declared number of files
	pub file_count: u32,
}

impl SpanTableHeader {
	/// Size of the header in bytes
	pub const SIZE: usize = constants::CHUNK_HEADER_SIZE;

	/// Parses and validates the header from a byte slice.
	pub fn from_bytes(data: &[u8]) -> Result<Self, ContainerError> {
		ensure_len(data, Self::SIZE)?;
		let mut cursor = Cursor::new(data);

		let magic = cursor.read_tag()?;
		expect_magic("BTAF", constants::FATB_MAGIC, magic)?;

		Ok(Self {
			length: cursor.read_le_u32()?,
			file_count: cursor.read_le_u32()?,
		})
	}
}

/// `BMIF` data chunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataHeader {
	/// Header length, always `0xC`
	pub header_length: u32,
	/// Payload length in bytes
	pub length: u32,
}

impl DataHeader {
	/// Size of the header in bytes
	pub const SIZE: usize = constants::CHUNK_HEADER_SIZE;

	/// Parses and validates the header from a byte slice.
	pub fn from_bytes(data: &[u8]) -> Result<Self, ContainerError> {
		ensure_len(data, Self::SIZE)?;
		let mut cursor = Cursor::new(data);

		let magic = cursor.read_tag()?;
		expect_magic("BMIF", constants::FIMB_MAGIC, magic)?;

		let header_length = cursor.read_le_u32()?;
		expect_value("BMIF header length", constants::CHUNK_HEADER_SIZE as u32, header_length)?;

		Ok(Self {
			header_length,
			length: cursor.read_le_u32()?,
		})
	}
}
