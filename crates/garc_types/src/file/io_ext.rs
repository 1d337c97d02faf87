//! Little-endian read helpers shared by the container and table readers.

use std::io::{self, Read};

pub(crate) trait ReadLeExt: Read {
	#[inline]
	fn read_tag(&mut self) -> io::Result<[u8; 4]> {
		let mut buf = [0; 4];
		self.read_exact(&mut buf)?;
		Ok(buf)
	}

	#[inline]
	fn read_le_u16(&mut self) -> io::Result<u16> {
		let mut buf = [0; 2];
		self.read_exact(&mut buf)?;
		Ok(u16::from_le_bytes(buf))
	}

	#[inline]
	fn read_le_u32(&mut self) -> io::Result<u32> {
		let mut buf = [0; 4];
		self.read_exact(&mut buf)?;
		Ok(u32::from_le_bytes(buf))
	}

	/// Reads `count` contiguous little-endian u16 values.
	fn read_le_u16_vec(&mut self, count: usize) -> io::Result<Vec<u16>> {
		let mut raw = vec![0u8; count * 2];
		self.read_exact(&mut raw)?;
		Ok(raw.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]])).collect())
	}
}

impl<R: Read + ?Sized> ReadLeExt for R {}
