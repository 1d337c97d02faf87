//! Z-order tile de-scrambling.
//!
//! Icon pixels are stored in 8x8 tiles laid out row-major across the raw
//! grid. Inside a tile the six bits of the pixel's index interleave the two
//! coordinates: even bits (0, 2, 4) form X and odd bits (1, 3, 5) form Y.
//!
//! ```text
//! w = y2 x2 y1 x1 y0 x0
//! ```

use crate::file::DecodeError;

/// Tile edge length in pixels
pub const TILE_SIZE: usize = 8;

/// Number of pixels in one tile
pub const TILE_PIXELS: usize = TILE_SIZE * TILE_SIZE;

/// Splits a 6-bit within-tile index into its `(x, y)` offset.
#[inline]
pub const fn morton_offset(within: usize) -> (usize, usize) {
	let x = (within & 0b000001) | (within & 0b000100) >> 1 | (within & 0b010000) >> 2;
	let y = (within & 0b000010) >> 1 | (within & 0b001000) >> 2 | (within & 0b100000) >> 3;
	(x, y)
}

/// Maps a linear stored pixel index to its `(x, y)` grid position.
#[inline]
pub const fn pixel_position(index: usize, tiles_per_row: usize) -> (usize, usize) {
	let tile = index / TILE_PIXELS;
	let tile_x = (tile % tiles_per_row) * TILE_SIZE;
	let tile_y = (tile / tiles_per_row) * TILE_SIZE;
	let (sub_x, sub_y) = morton_offset(index % TILE_PIXELS);
	(tile_x + sub_x, tile_y + sub_y)
}

/// Reorders tiled pixels into a row-major `width x height` grid.
///
/// # Errors
///
/// Returns an error if `width` is not a non-zero multiple of the tile size,
/// or if any pixel maps outside the grid.
pub fn detile(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, DecodeError> {
	if width == 0 || width % TILE_SIZE != 0 {
		return Err(DecodeError::InvalidLayout(format!(
			"raw width {width} is not a non-zero multiple of {TILE_SIZE}"
		)));
	}

	let tiles_per_row = width / TILE_SIZE;
	let mut grid = vec![0u8; width * height];

	for (index, &pixel) in pixels.iter().enumerate() {
		let (x, y) = pixel_position(index, tiles_per_row);
		if x >= width || y >= height {
			return Err(DecodeError::TileOutOfRange {
				index,
				x,
				y,
				width,
				height,
			});
		}
		grid[y * width + x] = pixel;
	}

	Ok(grid)
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Inverse of [`detile`]: row-major grid back to stored order.
	fn retile(grid: &[u8], width: usize, height: usize) -> Vec<u8> {
		let tiles_per_row = width / TILE_SIZE;
		(0..width * height)
			.map(|index| {
				let (x, y) = pixel_position(index, tiles_per_row);
				grid[y * width + x]
			})
			.collect()
	}

	#[test]
	fn test_morton_offset() {
		assert_eq!(morton_offset(0), (0, 0));
		assert_eq!(morton_offset(1), (1, 0));
		assert_eq!(morton_offset(2), (0, 1));
		assert_eq!(morton_offset(3), (1, 1));
		assert_eq!(morton_offset(4), (2, 0));
		assert_eq!(morton_offset(8), (0, 2));
		assert_eq!(morton_offset(0b010101), (7, 0));
		assert_eq!(morton_offset(0b101010), (0, 7));
		assert_eq!(morton_offset(63), (7, 7));
	}

	#[test]
	fn test_offsets_cover_tile() {
		let mut seen = [false; TILE_PIXELS];
		for within in 0..TILE_PIXELS {
			let (x, y) = morton_offset(within);
			assert!(!seen[y * TILE_SIZE + x]);
			seen[y * TILE_SIZE + x] = true;
		}
		assert!(seen.iter().all(|&s| s));
	}

	#[test]
	fn test_pixel_position_second_tile_row() {
		// 64 pixels wide -> 8 tiles per row; tile 9 starts at (8, 8)
		assert_eq!(pixel_position(9 * 64, 8), (8, 8));
		assert_eq!(pixel_position(9 * 64 + 63, 8), (15, 15));
	}

	#[test]
	fn test_detile_roundtrip() {
		let (width, height) = (64, 32);
		let stored: Vec<u8> = (0..width * height).map(|i| (i * 7 % 251) as u8).collect();

		let grid = detile(&stored, width, height).unwrap();
		assert_eq!(retile(&grid, width, height), stored);
	}

	#[test]
	fn test_detile_out_of_range() {
		// 16x4 grid cannot hold the lower half of its tiles
		let stored = vec![1u8; 64];
		let err = detile(&stored, 16, 4).unwrap_err();
		assert!(matches!(
			err,
			DecodeError::TileOutOfRange {
				index: 32,
				x: 0,
				y: 4,
				..
			}
		));
	}

	#[test]
	fn test_detile_invalid_width() {
		assert!(matches!(detile(&[0; 12], 12, 1), Err(DecodeError::InvalidLayout(_))));
	}
}
