//! Benchmark helper utilities for garc-rs
//!
//! Generates synthetic icon payloads, LZ11 streams and containers so the
//! benchmarks and the extraction tests run without game data.

/// Generates an icon payload for a `raw_width x raw_height` grid.
///
/// Palettes of up to 16 colors produce 4-bit pixels, larger ones 8-bit pixels.
pub fn generate_icon_data(raw_width: usize, raw_height: usize, colors: u16) -> Vec<u8> {
	let mut data = vec![0x00, 0x00];
	data.extend_from_slice(&colors.to_le_bytes());
	for n in 0..colors {
		let level = n % 32;
		let packed = level << 11 | (31 - level) << 6 | (n / 32 % 32) << 1 | 1;
		data.extend_from_slice(&packed.to_le_bytes());
	}

	let pixels = raw_width * raw_height;
	if colors <= 16 {
		let modulo = colors.max(1) as usize;
		data.extend((0..pixels / 2).map(|i| ((i * 2 % modulo) << 4 | (i * 2 + 1) % modulo) as u8));
	} else {
		data.extend((0..pixels).map(|i| (i % colors as usize) as u8));
	}
	data
}

/// Wraps `data` in an LZ11 stream that repeats every run of equal bytes.
pub fn generate_lz11_data(data: &[u8]) -> Vec<u8> {
	let size = data.len() as u32;
	let mut out = vec![0x11, size as u8, (size >> 8) as u8, (size >> 16) as u8];

	let mut flags_pos = 0;
	let mut item = 8;
	let mut i = 0;
	while i < data.len() {
		if item == 8 {
			flags_pos = out.len();
			out.push(0);
			item = 0;
		}

		let run = data[i..].iter().take(16).take_while(|&&byte| i > 0 && byte == data[i - 1]).count();
		if run >= 3 {
			// Short token: count = indicator + 1, distance 1
			out[flags_pos] |= 0x80 >> item;
			out.push(((run - 1) as u8) << 4);
			out.push(0x00);
			i += run;
		} else {
			out.push(data[i]);
			i += 1;
		}
		item += 1;
	}
	out
}

/// Builds a container with one subfile per payload.
pub fn generate_garc(payloads: &[Vec<u8>]) -> Vec<u8> {
	let entries: Vec<Vec<Vec<u8>>> = payloads.iter().map(|payload| vec![payload.clone()]).collect();
	generate_garc_entries(&entries)
}

/// Builds a container where entry `i` holds `entries[i]` as its subfiles,
/// filling the low bits of each presence bitmask.
pub fn generate_garc_entries(entries: &[Vec<Vec<u8>>]) -> Vec<u8> {
	let entries: Vec<(u32, Vec<Vec<u8>>)> =
		entries.iter().map(|subfiles| (((1u64 << subfiles.len()) - 1) as u32, subfiles.clone())).collect();
	generate_garc_with_masks(&entries)
}

/// Builds a container from explicit presence bitmasks, one payload per set
/// bit in ascending bit order.
pub fn generate_garc_with_masks(entries: &[(u32, Vec<Vec<u8>>)]) -> Vec<u8> {
	let mut records = Vec::new();
	let mut offsets = Vec::with_capacity(entries.len());
	let mut blob = Vec::new();
	for (bitmask, subfiles) in entries {
		assert_eq!(bitmask.count_ones() as usize, subfiles.len());
		offsets.push(records.len() as u32);
		records.extend_from_slice(&bitmask.to_le_bytes());
		for subfile in subfiles {
			let start = blob.len() as u32;
			blob.extend_from_slice(subfile);
			let end = blob.len() as u32;
			for value in [start, end, end - start] {
				records.extend_from_slice(&u32::to_le_bytes(value));
			}
			blob.resize(blob.len().next_multiple_of(4), 0xFF);
		}
	}

	let count = offsets.len() as u32;
	let fato_size = 12 + 4 * count;
	let fatb_length = 12 + records.len() as u32;
	let data_offset = 0x1C + fato_size + fatb_length + 12;

	let mut data = Vec::with_capacity(data_offset as usize + blob.len());
	data.extend_from_slice(b"CRAG");
	for value in [0x1C, 0x0400_FEFF, 4, data_offset, data_offset + blob.len() as u32, 0] {
		data.extend_from_slice(&u32::to_le_bytes(value));
	}
	data.extend_from_slice(b"OTAF");
	data.extend_from_slice(&fato_size.to_le_bytes());
	data.extend_from_slice(&(count as u16).to_le_bytes());
	data.extend_from_slice(&0xFFFFu16.to_le_bytes());
	for offset in &offsets {
		data.extend_from_slice(&offset.to_le_bytes());
	}
	data.extend_from_slice(b"BTAF");
	data.extend_from_slice(&fatb_length.to_le_bytes());
	data.extend_from_slice(&count.to_le_bytes());
	data.extend_from_slice(&records);
	data.extend_from_slice(b"BMIF");
	data.extend_from_slice(&0x0Cu32.to_le_bytes());
	data.extend_from_slice(&(blob.len() as u32).to_le_bytes());
	data.extend_from_slice(&blob);
	data
}

#[cfg(test)]
mod tests {
	use garc_types::file::{GarcFile, Icon, IconLayout, lz};

	use super::*;

	#[test]
	fn test_generated_icons_decode() {
		for colors in [16, 256] {
			let data = generate_icon_data(64, 32, colors);
			let icon = Icon::decode(&data, 0, &IconLayout::default()).unwrap();
			assert_eq!(icon.palette().len(), usize::from(colors));
		}
	}

	#[test]
	fn test_generated_lz11_roundtrip() {
		let mut plain = generate_icon_data(64, 32, 16);
		plain.extend(std::iter::repeat_n(0xAA, 100));
		assert_eq!(lz::decompress(&generate_lz11_data(&plain)).unwrap(), plain);
	}

	#[test]
	fn test_generated_garc_parses() {
		let garc = GarcFile::from_bytes(&generate_garc(&[vec![1, 2, 3], vec![4]])).unwrap();
		assert_eq!(garc.subfile_count(), 2);
		assert_eq!(garc.entries()[1].subfile(0), Some(&[4u8][..]));
	}

	#[test]
	fn test_generated_masks_parse() {
		let garc = GarcFile::from_bytes(&generate_garc_with_masks(&[(0b100, vec![vec![7]]), (0, vec![])])).unwrap();
		assert_eq!(garc.entries()[0].spans()[0].slot, 2);
		assert!(garc.entries()[1].spans().is_empty());
	}
}
