//! LZ10 / LZ11 decompression.
//!
//! ## Overview
//!
//! Subfiles inside a GARC container are usually compressed with one of the two
//! Nintendo LZ77 variants. The first byte of the payload selects the variant:
//!
//! | Tag    | Variant | Token layout                                   |
//! |--------|---------|------------------------------------------------|
//! | `0x10` | LZ10    | 2-byte tokens, lengths 3-18                    |
//! | `0x11` | LZ11    | 2/3/4-byte tokens, lengths 1-65808             |
//!
//! Any other leading byte means the payload is stored uncompressed.
//!
//! ## Header
//!
//! | Offset | Size | Field                                                   |
//! |--------|------|---------------------------------------------------------|
//! | 0x00   | 1    | Tag                                                     |
//! | 0x01   | 3    | Decompressed size (LE); 0 means a u32 size follows      |
//!
//! ## Stream
//!
//! A flag byte precedes every group of eight items and is read from the most
//! significant bit down. A clear bit is a literal byte; a set bit is a
//! back-reference `(count, distance)` copied byte by byte from the output,
//! so overlapping copies repeat the pattern.
//!
//! ### LZ10 token
//!
//! `count = (b0 >> 4) + 3`, `distance = ((b0 & 0xF) << 8 | b1) + 1`
//!
//! ### LZ11 token (indicator = `b0 >> 4`)
//!
//! - `0`: `count = ((b0 & 0xF) << 4 | b1 >> 4) + 0x11`, `distance = ((b1 & 0xF) << 8 | b2) + 1`
//! - `1`: `count = ((b0 & 0xF) << 12 | b1 << 4 | b2 >> 4) + 0x111`, `distance = ((b2 & 0xF) << 8 | b3) + 1`
//! - otherwise: `count = indicator + 1`, `distance = ((b0 & 0xF) << 8 | b1) + 1`

use std::{borrow::Cow, fmt::Display};

use crate::file::LzError;

/// Compression tags.
pub mod constants {
	/// LZ10 tag byte
	pub const LZ10: u8 = 0x10;

	/// LZ11 tag byte
	pub const LZ11: u8 = 0x11;
}

/// Largest output buffer reserved up front; bigger streams grow as they decode.
const MAX_RESERVE: usize = 1 << 20;

/// Compression applied to a subfile payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compression {
	/// Stored as-is
	None,

	/// Tagged `0x10`
	Lz10,

	/// Tagged `0x11`
	Lz11,
}

impl Compression {
	/// Classifies a payload by its first byte.
	pub fn detect(data: &[u8]) -> Self {
		match data.first() {
			Some(&constants::LZ10) => Self::Lz10,
			Some(&constants::LZ11) => Self::Lz11,
			_ => Self::None,
		}
	}
}

impl Display for Compression {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Compression::None => write!(f, "none"),
			Compression::Lz10 => write!(f, "LZ10"),
			Compression::Lz11 => write!(f, "LZ11"),
		}
	}
}

/// State structure for the decompressor
struct Decompressor<'a> {
	input: &'a [u8],
	read_offset: usize,
	output: Vec<u8>,
	total_size: usize,
}

impl<'a> Decompressor<'a> {
	fn new(data: &'a [u8]) -> Result<Self, LzError> {
		if data.len() < 4 {
			return Err(LzError::Truncated {
				produced: 0,
				expected: 4,
			});
		}

		let mut total_size = u32::from_le_bytes([data[1], data[2], data[3], 0]) as usize;
		let mut read_offset = 4;
		if total_size == 0 {
			let Some(extended) = data.get(4..8) else {
				return Err(LzError::Truncated {
					produced: 0,
					expected: 8,
				});
			};
			total_size = u32::from_le_bytes([extended[0], extended[1], extended[2], extended[3]]) as usize;
			read_offset = 8;
		}

		Ok(Self {
			input: data,
			read_offset,
			output: Vec::with_capacity(total_size.min(MAX_RESERVE)),
			total_size,
		})
	}

	fn truncated(&self) -> LzError {
		LzError::Truncated {
			produced: self.output.len(),
			expected: self.total_size,
		}
	}

	fn read_byte(&mut self) -> Result<u8, LzError> {
		let byte = *self.input.get(self.read_offset).ok_or_else(|| self.truncated())?;
		self.read_offset += 1;
		Ok(byte)
	}

	/// Copies `count` bytes starting `distance` bytes back; overlap repeats the pattern.
	fn copy_back(&mut self, count: usize, distance: usize) -> Result<(), LzError> {
		if distance > self.output.len() {
			return Err(LzError::InvalidDistance {
				distance,
				position: self.output.len(),
			});
		}
		let count = count.min(self.total_size - self.output.len());
		let start = self.output.len() - distance;
		for i in 0..count {
			let byte = self.output[start + i];
			self.output.push(byte);
		}
		Ok(())
	}

	fn lz10_token(&mut self) -> Result<(usize, usize), LzError> {
		let b0 = usize::from(self.read_byte()?);
		let b1 = usize::from(self.read_byte()?);
		Ok(((b0 >> 4) + 3, ((b0 & 0xF) << 8 | b1) + 1))
	}

	fn lz11_token(&mut self) -> Result<(usize, usize), LzError> {
		let b0 = usize::from(self.read_byte()?);
		let b1 = usize::from(self.read_byte()?);
		match b0 >> 4 {
			0 => {
				let b2 = usize::from(self.read_byte()?);
				Ok((((b0 & 0xF) << 4 | b1 >> 4) + 0x11, ((b1 & 0xF) << 8 | b2) + 1))
			}
			1 => {
				let b2 = usize::from(self.read_byte()?);
				let b3 = usize::from(self.read_byte()?);
				Ok((((b0 & 0xF) << 12 | b1 << 4 | b2 >> 4) + 0x111, ((b2 & 0xF) << 8 | b3) + 1))
			}
			indicator => Ok((indicator + 1, ((b0 & 0xF) << 8 | b1) + 1)),
		}
	}

	fn run(mut self, compression: Compression) -> Result<Vec<u8>, LzError> {
		while self.output.len() < self.total_size {
			let flags = self.read_byte()?;
			for bit in (0..8).rev() {
				if self.output.len() >= self.total_size {
					break;
				}
				if flags & (1 << bit) == 0 {
					let byte = self.read_byte()?;
					self.output.push(byte);
					continue;
				}
				let (count, distance) = match compression {
					Compression::Lz11 => self.lz11_token()?,
					_ => self.lz10_token()?,
				};
				self.copy_back(count, distance)?;
			}
		}
		Ok(self.output)
	}
}

/// Decompresses an LZ10 or LZ11 payload.
///
/// # Errors
///
/// Returns an error if the payload is not tagged `0x10`/`0x11`, ends early, or
/// references data before the start of the output.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, LzError> {
	let compression = Compression::detect(data);
	if compression == Compression::None {
		return Err(LzError::UnknownTag(data.first().copied().unwrap_or_default()));
	}
	Decompressor::new(data)?.run(compression)
}

/// Decompresses a tagged payload, leaving untagged or undecodable payloads as they are.
pub fn decompress_or_keep(data: &[u8]) -> Cow<'_, [u8]> {
	match Compression::detect(data) {
		Compression::None => Cow::Borrowed(data),
		_ => decompress(data).map_or(Cow::Borrowed(data), Cow::Owned),
	}
}
