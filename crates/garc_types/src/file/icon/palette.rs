//! Icon palette support.
//!
//! Icon palettes hold up to 256 colors, each stored as a little-endian u16
//! packed `RRRRRGGGGGBBBBBA`: three 5-bit channels and a 1-bit alpha flag.

use std::fmt;
use std::io::Read;

use crate::file::DecodeError;

/// Expands a 5-bit channel value to 8 bits, rounding to nearest.
#[inline]
pub const fn round_channel(n: u8) -> u8 {
	((n as u16 * 255 + 15) / 31) as u8
}

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component (0 or 255 for decoded icons)
	pub a: u8,
}

impl Color {
	/// Creates a new RGBA color.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a transparent black color.
	pub const fn transparent() -> Self {
		Self::new(0, 0, 0, 0)
	}

	/// Decodes a packed `RRRRRGGGGGBBBBBA` value.
	pub const fn from_rgb5a1(packed: u16) -> Self {
		Self {
			r: round_channel((packed >> 11 & 0x1F) as u8),
			g: round_channel((packed >> 6 & 0x1F) as u8),
			b: round_channel((packed >> 1 & 0x1F) as u8),
			a: if packed & 1 == 0 {
				0x00
			} else {
				0xFF
			},
		}
	}

	/// Returns the color as `[r, g, b, a]`.
	pub const fn to_array(self) -> [u8; 4] {
		[self.r, self.g, self.b, self.a]
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::transparent()
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Icon color palette (up to 256 colors).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Palette {
	colors: Vec<Color>,
}

impl Palette {
	/// Maximum number of colors addressable by an 8-bit index
	pub const MAX_COLORS: usize = 256;

	/// Palettes up to this size use 4-bit pixels
	pub const NIBBLE_COLORS: usize = 16;

	/// Reads a u16 color count followed by that many packed colors.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, DecodeError> {
		let mut count = [0u8; 2];
		reader.read_exact(&mut count).map_err(|_| DecodeError::InsufficientData {
			section: "palette length",
			expected: 2,
			actual: 0,
		})?;
		let count = u16::from_le_bytes(count);
		if usize::from(count) > Self::MAX_COLORS {
			return Err(DecodeError::InvalidPaletteLength(count));
		}

		let mut raw = vec![0u8; usize::from(count) * 2];
		reader.read_exact(&mut raw).map_err(|_| DecodeError::InsufficientData {
			section: "palette",
			expected: raw.len(),
			actual: 0,
		})?;

		let colors =
			raw.chunks_exact(2).map(|pair| Color::from_rgb5a1(u16::from_le_bytes([pair[0], pair[1]]))).collect();
		Ok(Self {
			colors,
		})
	}

	/// Creates a palette from decoded colors.
	pub fn from_colors(colors: Vec<Color>) -> Self {
		Self {
			colors,
		}
	}

	/// Gets a color by index.
	#[inline]
	pub fn get(&self, index: u8) -> Option<Color> {
		self.colors.get(usize::from(index)).copied()
	}

	/// Returns the colors.
	#[inline]
	pub fn colors(&self) -> &[Color] {
		&self.colors
	}

	/// Returns the number of colors.
	#[inline]
	pub fn len(&self) -> usize {
		self.colors.len()
	}

	/// Returns `true` if the palette has no colors.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	/// Returns `true` if pixels using this palette are packed two per byte.
	#[inline]
	pub fn is_nibble_packed(&self) -> bool {
		self.colors.len() <= Self::NIBBLE_COLORS
	}

	/// Returns an iterator over palette colors.
	pub fn iter(&self) -> impl Iterator<Item = &Color> {
		self.colors.iter()
	}
}

impl fmt::Display for Palette {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Icon Palette: {} colors", self.colors.len())
	}
}

impl std::ops::Index<u8> for Palette {
	type Output = Color;

	fn index(&self, index: u8) -> &Self::Output {
		&self.colors[usize::from(index)]
	}
}
