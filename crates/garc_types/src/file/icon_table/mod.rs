//! Icon index table support for `garc-rs` project.
//!
//! The executable image embeds a fixed-stride table that maps every entity to
//! the icons it uses. Pointers inside a record are runtime addresses and are
//! rebased onto the file with [`to_file_offset`].
//!
//! # Record Structure
//!
//! | Offset | Size | Field                                                  |
//! |--------|------|--------------------------------------------------------|
//! | 0x00   | 2    | Default icon index                                     |
//! | 0x02   | 2    | Alternate-gender icon index                            |
//! | 0x04   | 4    | Pointer to `form_count` u16 form icon indices (0 = none)  |
//! | 0x08   | 4    | Pointer to `mirror_count` u16 mirror icon indices (0 = none) |
//! | 0x0C   | 2    | Form count                                             |
//! | 0x0E   | 2    | Mirror count                                           |
//!
//! # Mirror Lists
//!
//! With forms, `mirrors[i]` is the mirrored counterpart of `forms[i]`.
//! Without forms, the mirror list holds exactly two entries and entry 0 is the
//! mirrored counterpart of the default icon.

use std::{
	fmt,
	io::{Read, Seek, SeekFrom},
};

use serde::{Deserialize, Serialize};

use crate::file::{TableError, io_ext::ReadLeExt};

/// Location and shape of the table inside the executable image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLayout {
	/// File offset of record 0
	pub table_base: u64,
	/// Runtime address the image is loaded at
	pub base_address: u32,
	/// Distance between records
	pub record_stride: u64,
	/// Number of records
	pub record_count: usize,
}

impl TableLayout {
	/// Table offset of the known game version
	pub const DEFAULT_TABLE_BASE: u64 = 0x43EAA8;
	/// Load address of the known game version
	pub const DEFAULT_BASE_ADDRESS: u32 = 0x100000;
	/// Record size
	pub const DEFAULT_RECORD_STRIDE: u64 = 0x10;
	/// Number of entities in the known game version
	pub const DEFAULT_RECORD_COUNT: usize = 721;

	/// File offset of a record.
	#[inline]
	pub fn record_offset(&self, record: usize) -> u64 {
		self.table_base + self.record_stride * record as u64
	}
}

impl Default for TableLayout {
	fn default() -> Self {
		Self {
			table_base: Self::DEFAULT_TABLE_BASE,
			base_address: Self::DEFAULT_BASE_ADDRESS,
			record_stride: Self::DEFAULT_RECORD_STRIDE,
			record_count: Self::DEFAULT_RECORD_COUNT,
		}
	}
}

/// Converts a runtime pointer to a file offset.
///
/// Returns `None` for pointers below the base address.
#[inline]
pub fn to_file_offset(pointer: u32, base_address: u32) -> Option<u64> {
	pointer.checked_sub(base_address).map(u64::from)
}

/// One raw table record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TableRecord {
	/// Default icon index
	pub default: u16,
	/// Alternate-gender icon index
	pub alt_gender: u16,
	/// Runtime pointer to the form list
	pub form_ptr: u32,
	/// Runtime pointer to the mirror list
	pub mirror_ptr: u32,
	/// Number of form entries
	pub form_count: u16,
	/// Number of mirror entries
	pub mirror_count: u16,
}

impl TableRecord {
	/// Size of one record
	pub const SIZE: usize = 0x10;

	/// Reads a record at the current position.
	pub fn from_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
		Ok(Self {
			default: reader.read_le_u16()?,
			alt_gender: reader.read_le_u16()?,
			form_ptr: reader.read_le_u32()?,
			mirror_ptr: reader.read_le_u32()?,
			form_count: reader.read_le_u16()?,
			mirror_count: reader.read_le_u16()?,
		})
	}

	/// Checks that non-zero form and mirror counts agree.
	pub fn check_counts(&self) -> Result<(), TableError> {
		if self.form_count != 0 && self.mirror_count != 0 && self.form_count != self.mirror_count {
			return Err(TableError::CountMismatch {
				forms: self.form_count,
				mirrors: self.mirror_count,
			});
		}
		Ok(())
	}
}

impl fmt::Display for TableRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"default {}, alt {}, forms {}@{:#X}, mirrors {}@{:#X}",
			self.default, self.alt_gender, self.form_count, self.form_ptr, self.mirror_count, self.mirror_ptr
		)
	}
}

/// Icon indices resolved for one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IconIndexSet {
	/// Record number in the table
	pub record: usize,
	/// Default icon
	pub default: u16,
	/// Alternate-gender icon, equal to `default` when there is none
	pub alt_gender: u16,
	/// Per-form icons
	pub forms: Option<Vec<u16>>,
	/// Mirrored icons, parallel to `forms` or `[default_mirror, _]`
	pub mirrors: Option<Vec<u16>>,
}

impl IconIndexSet {
	/// Returns `true` if the entity has a distinct alternate-gender icon.
	#[inline]
	pub fn has_alt_gender(&self) -> bool {
		self.alt_gender != self.default
	}

	/// Returns the form list, empty when there is none.
	#[inline]
	pub fn forms(&self) -> &[u16] {
		self.forms.as_deref().unwrap_or_default()
	}

	/// Returns the mirror list, empty when there is none.
	#[inline]
	pub fn mirrors(&self) -> &[u16] {
		self.mirrors.as_deref().unwrap_or_default()
	}

	/// Iterates over every referenced icon index.
	pub fn indices(&self) -> impl Iterator<Item = u16> + '_ {
		[self.default, self.alt_gender].into_iter().chain(self.forms().iter().copied()).chain(self.mirrors().iter().copied())
	}
}

/// Resolver over an executable image.
pub struct IconTable<R> {
	reader: R,
	layout: TableLayout,
	image_count: usize,
}

impl<R: Read + Seek> IconTable<R> {
	/// Creates a resolver.
	///
	/// # Arguments
	///
	/// * `reader` - Executable image
	/// * `layout` - Table location
	/// * `image_count` - Number of icons in the container, used for bounds checks
	pub fn new(reader: R, layout: TableLayout, image_count: usize) -> Self {
		Self {
			reader,
			layout,
			image_count,
		}
	}

	/// Returns the table layout.
	#[inline]
	pub fn layout(&self) -> &TableLayout {
		&self.layout
	}

	/// Returns the number of records.
	#[inline]
	pub fn record_count(&self) -> usize {
		self.layout.record_count
	}

	/// Returns the number of icons indices are checked against.
	#[inline]
	pub fn image_count(&self) -> usize {
		self.image_count
	}

	/// Reads one raw record.
	pub fn read_record(&mut self, record: usize) -> Result<TableRecord, TableError> {
		if record >= self.layout.record_count {
			return Err(TableError::RecordOutOfRange {
				record,
				count: self.layout.record_count,
			});
		}
		self.reader.seek(SeekFrom::Start(self.layout.record_offset(record)))?;
		Ok(TableRecord::from_reader(&mut self.reader)?)
	}

	/// Resolves the icon indices of one record.
	///
	/// # Errors
	///
	/// Returns an error if the record is out of range, its counts disagree, a
	/// pointer lies below the base address, an index exceeds the image count,
	/// or the image cannot be read.
	pub fn resolve(&mut self, record: usize) -> Result<IconIndexSet, TableError> {
		let raw = self.read_record(record)?;
		raw.check_counts()?;

		let forms = match raw.form_ptr {
			0 => None,
			pointer => Some(self.read_indices(pointer, raw.form_count)?),
		};

		let mirrors = match raw.mirror_ptr {
			0 => None,
			pointer => {
				let has_forms = forms.as_ref().is_some_and(|forms| !forms.is_empty());
				if !has_forms && raw.mirror_count != 2 {
					return Err(TableError::UnexpectedMirrorCount(raw.mirror_count));
				}
				Some(self.read_indices(pointer, raw.mirror_count)?)
			}
		};

		let set = IconIndexSet {
			record,
			default: raw.default,
			alt_gender: raw.alt_gender,
			forms,
			mirrors,
		};
		if let Some(index) = set.indices().find(|&index| usize::from(index) >= self.image_count) {
			return Err(TableError::IndexOutOfRange {
				index,
				count: self.image_count,
			});
		}
		Ok(set)
	}

	/// Consumes the resolver and returns the underlying reader.
	pub fn into_inner(self) -> R {
		self.reader
	}

	fn read_indices(&mut self, pointer: u32, count: u16) -> Result<Vec<u16>, TableError> {
		let base = self.layout.base_address;
		let offset = to_file_offset(pointer, base).ok_or(TableError::PointerBelowBase {
			pointer,
			base,
		})?;
		self.reader.seek(SeekFrom::Start(offset))?;
		Ok(self.reader.read_le_u16_vec(usize::from(count))?)
	}
}

impl<R> fmt::Debug for IconTable<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("IconTable").field("layout", &self.layout).field("image_count", &self.image_count).finish()
	}
}
