//! Synthetic game dump: icon container, executable image and form table.

use std::{fs, path::Path};

/// Table offset inside the synthetic executable image
pub const TABLE_BASE: u64 = 0x40;

/// Load address of the synthetic executable image
pub const BASE_ADDRESS: u32 = 0x100000;

/// 64x32 icon stored with 4-bit pixels, every pixel set to `value`.
pub fn nibble_icon(value: u8) -> Vec<u8> {
	let mut data = vec![0x00, 0x00, 16, 0x00];
	for n in 0..16u16 {
		// Opaque grey ramp
		let level = n * 2;
		data.extend_from_slice(&((level << 11) | (level << 6) | (level << 1) | 1).to_le_bytes());
	}
	data.extend(std::iter::repeat_n(value << 4 | value, 64 * 32 / 2));
	data
}

/// 64x32 icon stored with 8-bit pixels; column `x` of the raw grid holds `x`.
pub fn byte_icon() -> Vec<u8> {
	let mut data = vec![0x00, 0x00, 64, 0x00];
	data.extend(std::iter::repeat_n([0x01, 0x00], 64).flatten());
	for index in 0..64 * 32usize {
		let tile = index / 64;
		let within = index % 64;
		let x = (tile % 8) * 8 + (within & 1 | (within >> 1) & 2 | (within >> 2) & 4);
		data.push(x as u8);
	}
	data
}

/// One icon table record.
#[derive(Default)]
pub struct Record {
	pub default: u16,
	pub alt_gender: u16,
	pub forms: Vec<u16>,
	pub mirrors: Vec<u16>,
}

/// Executable image holding `records` at [`TABLE_BASE`], index lists after it.
pub fn build_code_bin(records: &[Record]) -> Vec<u8> {
	let mut data = vec![0u8; 0x400];
	let mut next_list = 0x200usize;
	let mut list = |data: &mut Vec<u8>, indices: &[u16]| -> u32 {
		if indices.is_empty() {
			return 0;
		}
		let offset = next_list;
		for (i, index) in indices.iter().enumerate() {
			data[offset + i * 2..offset + i * 2 + 2].copy_from_slice(&index.to_le_bytes());
		}
		next_list += 0x20;
		BASE_ADDRESS + offset as u32
	};

	for (number, record) in records.iter().enumerate() {
		let form_ptr = list(&mut data, &record.forms);
		let mirror_ptr = list(&mut data, &record.mirrors);

		let mut raw = Vec::with_capacity(16);
		raw.extend_from_slice(&record.default.to_le_bytes());
		raw.extend_from_slice(&record.alt_gender.to_le_bytes());
		raw.extend_from_slice(&form_ptr.to_le_bytes());
		raw.extend_from_slice(&mirror_ptr.to_le_bytes());
		raw.extend_from_slice(&(record.forms.len() as u16).to_le_bytes());
		raw.extend_from_slice(&(record.mirrors.len() as u16).to_le_bytes());

		let offset = TABLE_BASE as usize + number * 16;
		data[offset..offset + 16].copy_from_slice(&raw);
	}
	data
}

/// Lays out a dump directory the way the default configuration expects it.
pub fn write_dump(dir: &Path, garc: &[u8], code_bin: &[u8]) {
	let garc_dir = dir.join("romfs/a/0/9");
	fs::create_dir_all(&garc_dir).unwrap();
	fs::write(garc_dir.join("3"), garc).unwrap();

	let exefs = dir.join("exefs");
	fs::create_dir_all(&exefs).unwrap();
	fs::write(exefs.join("code.bin"), code_bin).unwrap();
}
