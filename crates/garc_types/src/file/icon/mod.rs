//! Tiled icon image support for `garc-rs` project.
//!
//! Each icon subfile (after decompression) holds a small palette followed by
//! tiled pixel data.
//!
//! # File Structure
//!
//! | Offset | Size        | Field                                             |
//! |--------|-------------|---------------------------------------------------|
//! | 0x00   | 2           | Unidentified prefix (skipped)                     |
//! | 0x02   | 2           | Palette length `L`                                |
//! | 0x04   | 2 x `L`     | Palette entries, `RRRRRGGGGGBBBBBA`               |
//! | ...    | `w x h / 2` | 4-bit pixels, high nibble first (when `L <= 16`)  |
//! | ...    | `w x h`     | 8-bit pixels (when `L > 16`)                      |
//!
//! Pixels are stored in 8x8 Z-order tiles (see [`tile`]) covering a raw grid
//! that is larger than the visible image; decoding de-tiles the grid and crops
//! its top-left corner.
//!
//! # Example
//!
//! ```no_run
//! use garc_types::file::icon::{Icon, IconLayout};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let payload = std::fs::read("icon.bin")?;
//! let mut icon = Icon::decode(&payload, 0, &IconLayout::default())?;
//!
//! icon.mirror();
//! for row in icon.rows() {
//!     println!("{row:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod palette;
pub mod tile;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::file::DecodeError;

use self::{palette::Palette, tile::TILE_SIZE};

/// Size of the unidentified prefix before the palette
const PREFIX_SIZE: usize = 2;

/// Raw and visible dimensions of an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct IconLayout {
	/// Width of the stored, tiled grid
	pub raw_width: u32,
	/// Height of the stored, tiled grid
	pub raw_height: u32,
	/// Width of the visible image
	pub width: u32,
	/// Height of the visible image
	pub height: u32,
}

impl IconLayout {
	/// Stored grid width of the known icon set
	pub const DEFAULT_RAW_WIDTH: u32 = 64;
	/// Stored grid height of the known icon set
	pub const DEFAULT_RAW_HEIGHT: u32 = 32;
	/// Visible width of the known icon set
	pub const DEFAULT_WIDTH: u32 = 40;
	/// Visible height of the known icon set
	pub const DEFAULT_HEIGHT: u32 = 30;

	/// Creates a new layout.
	pub const fn new(raw_width: u32, raw_height: u32, width: u32, height: u32) -> Self {
		Self {
			raw_width,
			raw_height,
			width,
			height,
		}
	}

	/// Number of pixels in the raw grid.
	#[inline]
	pub fn raw_pixel_count(&self) -> usize {
		self.raw_width as usize * self.raw_height as usize
	}

	/// Number of pixels in the visible image.
	#[inline]
	pub fn pixel_count(&self) -> usize {
		self.width as usize * self.height as usize
	}

	/// Checks that the raw grid is made of whole tiles and contains the crop.
	pub fn validate(&self) -> Result<(), DecodeError> {
		let tile = TILE_SIZE as u32;
		if self.raw_width == 0 || self.raw_height == 0 || self.raw_width % tile != 0 || self.raw_height % tile != 0 {
			return Err(DecodeError::InvalidLayout(format!(
				"raw grid {}x{} is not made of whole {tile}x{tile} tiles",
				self.raw_width, self.raw_height
			)));
		}
		if self.width > self.raw_width || self.height > self.raw_height {
			return Err(DecodeError::InvalidLayout(format!(
				"crop {}x{} exceeds raw grid {}x{}",
				self.width, self.height, self.raw_width, self.raw_height
			)));
		}
		Ok(())
	}
}

impl Default for IconLayout {
	fn default() -> Self {
		Self::new(Self::DEFAULT_RAW_WIDTH, Self::DEFAULT_RAW_HEIGHT, Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
	}
}

impl fmt::Display for IconLayout {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}x{} (stored {}x{})", self.width, self.height, self.raw_width, self.raw_height)
	}
}

/// Horizontal orientation of an icon.
///
/// The only transition is `Original -> Mirrored`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
	/// As decoded
	#[default]
	Original,
	/// Rows reversed once
	Mirrored,
}

/// One decoded icon.
///
/// Icons are identified by their position in decode order, not by content;
/// use [`Icon::same_source`] to compare them.
#[derive(Debug, Clone)]
pub struct Icon {
	source_index: usize,
	palette: Palette,
	raw_width: usize,
	raw_height: usize,
	raw_pixels: Vec<u8>,
	width: usize,
	height: usize,
	pixels: Vec<u8>,
	orientation: Orientation,
}

impl Icon {
	/// Decodes a decompressed icon payload.
	///
	/// # Arguments
	///
	/// * `data` - Decompressed subfile bytes
	/// * `source_index` - Position of the subfile in decode order
	/// * `layout` - Raw and visible dimensions
	///
	/// # Errors
	///
	/// Returns an error if the layout is invalid, the palette is longer than
	/// 256 colors, the data is too short, or a pixel de-tiles outside the grid.
	pub fn decode(data: &[u8], source_index: usize, layout: &IconLayout) -> Result<Self, DecodeError> {
		layout.validate()?;

		let Some(mut reader) = data.get(PREFIX_SIZE..) else {
			return Err(DecodeError::InsufficientData {
				section: "prefix",
				expected: PREFIX_SIZE,
				actual: data.len(),
			});
		};

		let palette = Palette::from_reader(&mut reader)?;
		let stored = unpack_pixels(reader, palette.is_nibble_packed(), layout.raw_pixel_count())?;

		let raw_width = layout.raw_width as usize;
		let raw_height = layout.raw_height as usize;
		let raw_pixels = tile::detile(&stored, raw_width, raw_height)?;

		let width = layout.width as usize;
		let height = layout.height as usize;
		let pixels = raw_pixels.chunks_exact(raw_width).take(height).flat_map(|row| &row[..width]).copied().collect();

		Ok(Self {
			source_index,
			palette,
			raw_width,
			raw_height,
			raw_pixels,
			width,
			height,
			pixels,
			orientation: Orientation::Original,
		})
	}

	/// Returns the position of the source subfile in decode order.
	#[inline]
	pub fn source_index(&self) -> usize {
		self.source_index
	}

	/// Returns `true` if both icons were decoded from the same subfile.
	///
	/// Pixel data is never compared.
	#[inline]
	pub fn same_source(&self, other: &Icon) -> bool {
		self.source_index == other.source_index
	}

	/// Returns the palette.
	#[inline]
	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	/// Returns the visible width.
	#[inline]
	pub fn width(&self) -> usize {
		self.width
	}

	/// Returns the visible height.
	#[inline]
	pub fn height(&self) -> usize {
		self.height
	}

	/// Returns the raw grid width.
	#[inline]
	pub fn raw_width(&self) -> usize {
		self.raw_width
	}

	/// Returns the raw grid height.
	#[inline]
	pub fn raw_height(&self) -> usize {
		self.raw_height
	}

	/// Returns the de-tiled grid before cropping.
	#[inline]
	pub fn raw_pixels(&self) -> &[u8] {
		&self.raw_pixels
	}

	/// Returns the visible palette indices, row-major.
	#[inline]
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}

	/// Gets a palette index at the specified coordinates.
	pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
		if x >= self.width || y >= self.height {
			return None;
		}
		self.pixels.get(y * self.width + x).copied()
	}

	/// Returns an iterator over the visible rows.
	pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
		self.pixels.chunks_exact(self.width.max(1))
	}

	/// Returns the current orientation.
	#[inline]
	pub fn orientation(&self) -> Orientation {
		self.orientation
	}

	/// Returns `true` once the icon has been mirrored.
	#[inline]
	pub fn is_mirrored(&self) -> bool {
		self.orientation == Orientation::Mirrored
	}

	/// Reverses every visible row.
	///
	/// Only the first call has an effect.
	pub fn mirror(&mut self) {
		if self.orientation == Orientation::Mirrored {
			return;
		}
		for row in self.pixels.chunks_exact_mut(self.width.max(1)) {
			row.reverse();
		}
		self.orientation = Orientation::Mirrored;
	}

	/// Expands the visible pixels to RGBA8 through the palette.
	///
	/// Indices past the end of the palette become transparent black.
	pub fn to_rgba(&self) -> Vec<u8> {
		self.pixels.iter().flat_map(|&index| self.palette.get(index).unwrap_or_default().to_array()).collect()
	}
}

impl fmt::Display for Icon {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Icon #{}: {}x{}, {} colors", self.source_index, self.width, self.height, self.palette.len())?;
		if self.is_mirrored() {
			write!(f, " (mirrored)")?;
		}
		Ok(())
	}
}

/// Expands stored pixel bytes into one palette index per pixel.
fn unpack_pixels(data: &[u8], nibble_packed: bool, count: usize) -> Result<Vec<u8>, DecodeError> {
	let expected = if nibble_packed {
		count / 2
	} else {
		count
	};
	let Some(stored) = data.get(..expected) else {
		return Err(DecodeError::InsufficientData {
			section: "pixel",
			expected,
			actual: data.len(),
		});
	};

	if !nibble_packed {
		return Ok(stored.to_vec());
	}
	Ok(stored.iter().flat_map(|&pair| [pair >> 4, pair & 0x0F]).collect())
}
