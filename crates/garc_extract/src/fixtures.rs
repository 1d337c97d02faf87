//! Synthetic containers and executable images for tests.

pub(crate) use garc_benches::generate_garc_entries as build_garc;

/// 8x8 icon payload, one byte per pixel, with `value` at `(0, 0)`.
pub(crate) fn icon_payload(value: u8) -> Vec<u8> {
	let mut data = vec![0x00, 0x00, 17, 0x00];
	data.extend_from_slice(&[0xFF; 34]);
	let mut pixels = [0u8; 64];
	pixels[0] = value;
	data.extend_from_slice(&pixels);
	data
}

/// Wraps `data` in an LZ10 stream made only of literals.
pub(crate) fn lz10_literal(data: &[u8]) -> Vec<u8> {
	let size = data.len() as u32;
	let mut out = vec![0x10, size as u8, (size >> 8) as u8, (size >> 16) as u8];
	for chunk in data.chunks(8) {
		out.push(0x00);
		out.extend_from_slice(chunk);
	}
	out
}

/// Executable image with a table at `0x20` and index lists from `0x200`.
pub(crate) struct CodeImage {
	data: Vec<u8>,
	next_list: usize,
}

impl CodeImage {
	pub(crate) const BASE: u32 = 0x100000;

	pub(crate) fn new() -> Self {
		Self {
			data: vec![0; 0x400],
			next_list: 0x200,
		}
	}

	/// Writes an index list, returning its runtime pointer.
	pub(crate) fn list(&mut self, indices: &[u16]) -> u32 {
		let offset = self.next_list;
		for (i, index) in indices.iter().enumerate() {
			self.data[offset + i * 2..offset + i * 2 + 2].copy_from_slice(&index.to_le_bytes());
		}
		self.next_list += 0x20;
		Self::BASE + offset as u32
	}

	pub(crate) fn record(
		&mut self,
		record: usize,
		default: u16,
		alt_gender: u16,
		forms: Option<(u32, u16)>,
		mirrors: Option<(u32, u16)>,
	) {
		let (form_ptr, form_count) = forms.unwrap_or_default();
		let (mirror_ptr, mirror_count) = mirrors.unwrap_or_default();

		let offset = 0x20 + record * 0x10;
		let slot = &mut self.data[offset..offset + 0x10];
		slot[0..2].copy_from_slice(&default.to_le_bytes());
		slot[2..4].copy_from_slice(&alt_gender.to_le_bytes());
		slot[4..8].copy_from_slice(&form_ptr.to_le_bytes());
		slot[8..12].copy_from_slice(&mirror_ptr.to_le_bytes());
		slot[12..14].copy_from_slice(&form_count.to_le_bytes());
		slot[14..16].copy_from_slice(&mirror_count.to_le_bytes());
	}

	pub(crate) fn into_bytes(self) -> Vec<u8> {
		self.data
	}
}
