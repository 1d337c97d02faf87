//! GARC container format support for `garc-rs` project.
//!
//! A GARC file bundles many variable-length subfiles behind a chunked
//! table-of-tables index. All values are little-endian.
//!
//! # File Structure
//!
//! | Chunk  | Content                                                              |
//! |--------|----------------------------------------------------------------------|
//! | `CRAG` | 28-byte header: size `0x1C`, BOM `0xFEFF`, version `0x0400`, 4 chunks, data offset, length, last length |
//! | `OTAF` | Entry count (u16), `0xFFFF` padding, one u32 offset per entry        |
//! | `BTAF` | Chunk length, file count, then one presence record per entry         |
//! | `BMIF` | Header length `0xC`, payload length, raw payload bytes               |
//!
//! # Presence Records
//!
//! Each `OTAF` offset points `offset + 0xC` bytes past the start of `BTAF`,
//! at a 32-bit presence bitmask. Every set bit, from the least significant
//! upward, is followed by one `{start, end, length}` u32 triple. `start` is
//! relative to the header's data offset.
//!
//! # Example
//!
//! ```no_run
//! use garc_types::file::garc::Container;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let garc = Container::open("romfs/a/0/9/3")?;
//!
//! for (index, entry) in garc.iter().enumerate() {
//!     println!("#{index}: {} subfiles", entry.subfile_count());
//! }
//! # Ok(())
//! # }
//! ```

mod header;


use std::{
	fmt::Formatter,
	io::{BufReader, Cursor, Read, Seek, SeekFrom},
	path::Path,
};

use crate::file::{ContainerError, io_ext::ReadLeExt};

pub use header::{AllocationTable, DataHeader, Header, SpanTableHeader};

/// GARC constants.
pub mod constants {
	/// `CRAG` header magic
	pub const GARC_MAGIC: [u8; 4] = *b"CRAG";

	/// `OTAF` allocation table magic
	pub const FATO_MAGIC: [u8; 4] = *b"OTAF";

	/// `BTAF` span table magic
	pub const FATB_MAGIC: [u8; 4] = *b"BTAF";

	/// `BMIF` data chunk magic
	pub const FIMB_MAGIC: [u8; 4] = *b"BMIF";

	/// Size of the `CRAG` header
	pub const HEADER_SIZE: usize = 0x1C;

	/// Size of the `OTAF`, `BTAF` and `BMIF` chunk headers
	pub const CHUNK_HEADER_SIZE: usize = 0x0C;

	/// Byte-order marker
	pub const BYTE_ORDER: u16 = 0xFEFF;

	/// Supported format version
	pub const VERSION: u16 = 0x0400;

	/// Number of chunks
	pub const CHUNK_COUNT: u32 = 4;

	/// `OTAF` padding value
	pub const FATO_PADDING: u16 = 0xFFFF;

	/// Size of one `{start, end, length}` span record
	pub const SPAN_SIZE: usize = 12;
}

/// Location of one subfile inside the data chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubfileSpan {
	/// Bit position in the presence bitmask
	pub slot: u8,
	/// Start offset relative to the data offset
	pub start: u32,
	/// End offset relative to the data offset
	pub end: u32,
	/// Declared length in bytes
	pub length: u32,
}

impl std::fmt::Display for SubfileSpan {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "[{}] {:#X}..{:#X} ({} bytes)", self.slot, self.start, self.end, self.length)
	}
}

/// Reads one span triple per set bit of `bitmask`, least significant bit first.
pub fn read_spans<R: Read>(bitmask: u32, reader: &mut R) -> std::io::Result<Vec<SubfileSpan>> {
	let mut spans = Vec::with_capacity(bitmask.count_ones() as usize);
	for slot in 0..u32::BITS {
		if bitmask & (1 << slot) == 0 {
			continue;
		}
		spans.push(SubfileSpan {
			slot: slot as u8,
			start: reader.read_le_u32()?,
			end: reader.read_le_u32()?,
			length: reader.read_le_u32()?,
		});
	}
	Ok(spans)
}

/// One container entry: its presence bitmask, spans and copied subfiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEntry {
	bitmask: u32,
	spans: Vec<SubfileSpan>,
	subfiles: Vec<Vec<u8>>,
}

impl FileEntry {
	/// Returns the presence bitmask.
	pub fn bitmask(&self) -> u32 {
		self.bitmask
	}

	/// Returns the spans, in ascending slot order.
	pub fn spans(&self) -> &[SubfileSpan] {
		&self.spans
	}

	/// Returns the raw subfile blobs, parallel to [`Self::spans`].
	pub fn subfiles(&self) -> &[Vec<u8>] {
		&self.subfiles
	}

	/// Gets a subfile by position.
	pub fn subfile(&self, index: usize) -> Option<&[u8]> {
		self.subfiles.get(index).map(Vec::as_slice)
	}

	/// Returns the number of subfiles.
	pub fn subfile_count(&self) -> usize {
		self.subfiles.len()
	}

	/// Consumes the entry, returning its subfile blobs.
	pub fn into_subfiles(self) -> Vec<Vec<u8>> {
		self.subfiles
	}
}

impl std::fmt::Display for FileEntry {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "Entry {{ bitmask: {:#010X}, subfiles: {} }}", self.bitmask, self.subfiles.len())
	}
}

/// GARC container.
///
/// Parsing copies every subfile out of the source; the container is
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Container {
	header: Header,
	allocation: AllocationTable,
	span_table: SpanTableHeader,
	data: DataHeader,
	entries: Vec<FileEntry>,
}

/// Bounds-checked positioned reads over a seekable source.
struct Source<'a, R> {
	reader: &'a mut R,
	len: u64,
}

impl<R: Read + Seek> Source<'_, R> {
	fn seek(&mut self, offset: u64) -> Result<(), ContainerError> {
		self.reader.seek(SeekFrom::Start(offset))?;
		Ok(())
	}

	fn ensure(&mut self, expected: u64) -> Result<u64, ContainerError> {
		let offset = self.reader.stream_position()?;
		let available = self.len.saturating_sub(offset);
		if available < expected {
			return Err(ContainerError::InsufficientData {
				offset,
				expected,
				available,
			});
		}
		Ok(offset)
	}

	fn read_block(&mut self, len: usize) -> Result<Vec<u8>, ContainerError> {
		self.ensure(len as u64)?;
		let mut buffer = vec![0u8; len];
		self.reader.read_exact(&mut buffer)?;
		Ok(buffer)
	}
}

impl Container {
	/// Opens a GARC file from the specified path.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, ContainerError> {
		let file = std::fs::File::open(path)?;
		Self::from_reader(&mut BufReader::new(file))
	}

	/// Loads a container from a byte slice.
	pub fn from_bytes(data: &[u8]) -> Result<Self, ContainerError> {
		Self::from_reader(&mut Cursor::new(data))
	}

	/// Loads a container from any seekable reader.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - A chunk tag or fixed header constant does not match
	/// - The span table does not start right after the allocation table
	/// - A presence record lies outside the span table
	/// - Any read runs past the end of the source
	pub fn from_reader<R: Read + Seek>(reader: &mut R) -> Result<Self, ContainerError> {
		let len = reader.seek(SeekFrom::End(0))?;
		reader.seek(SeekFrom::Start(0))?;
		let mut source = Source {
			reader,
			len,
		};

		// CRAG
		let header = Header::from_bytes(&source.read_block(Header::SIZE)?)?;

		// OTAF
		source.ensure(AllocationTable::HEADER_SIZE as u64)?;
		let allocation = AllocationTable::from_reader(&mut *source.reader)?;

		// BTAF
		let fatb_start = u64::from(header.header_size) + u64::from(allocation.chunk_size);
		let position = source.reader.stream_position()?;
		if position != fatb_start {
			return Err(ContainerError::UnexpectedValue {
				field: "BTAF offset",
				expected: fatb_start as u32,
				actual: position as u32,
			});
		}
		let span_table = SpanTableHeader::from_bytes(&source.read_block(SpanTableHeader::SIZE)?)?;

		let mut layouts = Vec::with_capacity(allocation.len());
		for (entry, &offset) in allocation.offsets().iter().enumerate() {
			let record = u64::from(offset) + SpanTableHeader::SIZE as u64;
			let out_of_bounds = ContainerError::EntryOutOfBounds {
				entry,
				offset: record,
				table_length: span_table.length,
			};
			if record + 4 > u64::from(span_table.length) {
				return Err(out_of_bounds);
			}

			source.seek(fatb_start + record)?;
			let bitmask = source.reader.read_le_u32()?;
			let spans_len = u64::from(bitmask.count_ones()) * constants::SPAN_SIZE as u64;
			if record + 4 + spans_len > u64::from(span_table.length) {
				return Err(out_of_bounds);
			}
			source.ensure(spans_len)?;
			layouts.push((bitmask, read_spans(bitmask, &mut *source.reader)?));
		}

		// BMIF
		source.seek(fatb_start + u64::from(span_table.length))?;
		let data = DataHeader::from_bytes(&source.read_block(DataHeader::SIZE)?)?;

		let data_offset = u64::from(header.data_offset);
		let mut entries = Vec::with_capacity(layouts.len());
		for (bitmask, spans) in layouts {
			let mut subfiles = Vec::with_capacity(spans.len());
			for span in &spans {
				source.seek(data_offset + u64::from(span.start))?;
				subfiles.push(source.read_block(span.length as usize)?);
			}
			entries.push(FileEntry {
				bitmask,
				spans,
				subfiles,
			});
		}

		Ok(Self {
			header,
			allocation,
			span_table,
			data,
			entries,
		})
	}

	/// Returns a reference to the header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Returns a reference to the allocation table.
	pub fn allocation_table(&self) -> &AllocationTable {
		&self.allocation
	}

	/// Returns the span table header.
	pub fn span_table(&self) -> &SpanTableHeader {
		&self.span_table
	}

	/// Returns the data chunk header.
	pub fn data_header(&self) -> &DataHeader {
		&self.data
	}

	/// Returns the entries in allocation-table order.
	pub fn entries(&self) -> &[FileEntry] {
		&self.entries
	}

	/// Returns the number of entries.
	pub fn entry_count(&self) -> usize {
		self.entries.len()
	}

	/// Gets an entry by index.
	pub fn get_entry(&self, index: usize) -> Option<&FileEntry> {
		self.entries.get(index)
	}

	/// Returns the total number of subfiles across all entries.
	pub fn subfile_count(&self) -> usize {
		self.entries.iter().map(FileEntry::subfile_count).sum()
	}

	/// Returns an iterator over the entries.
	pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
		self.entries.iter()
	}

	/// Consumes the container, returning its entries.
	pub fn into_entries(self) -> Vec<FileEntry> {
		self.entries
	}
}

impl std::fmt::Display for Container {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {} entries, {} subfiles", self.header, self.entries.len(), self.subfile_count())
	}
}

impl TryFrom<&[u8]> for Container {
	type Error = ContainerError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}

impl TryFrom<Vec<u8>> for Container {
	type Error = ContainerError;

	fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
		Self::from_bytes(&value)
	}
}

impl<'a> IntoIterator for &'a Container {
	type Item = &'a FileEntry;
	type IntoIter = std::slice::Iter<'a, FileEntry>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
