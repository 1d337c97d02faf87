//! Writes assembled variants and the run manifest to disk.
//!
//! Indexed output keeps the icon palette as `PLTE` with per-entry alpha in
//! `tRNS`, so every pixel stays an 8-bit palette index. RGBA output expands
//! the palette first.

use std::{
	fmt,
	fs::{self, File},
	io::{self, BufWriter, Write},
	path::{Path, PathBuf},
};

use garc_types::file::{GarcFile, Icon, VariantKey, lz};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{ExtractError, Extraction, naming};

/// File name of the run manifest
pub const MANIFEST_FILE: &str = "manifest.json";

/// Image format of written variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
	/// Palette-indexed PNG
	#[default]
	Indexed,
	/// 32-bit RGBA PNG
	Rgba,
}

impl fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OutputFormat::Indexed => write!(f, "indexed"),
			OutputFormat::Rgba => write!(f, "rgba"),
		}
	}
}

/// Writes one variant under `dir`, returning its relative path.
pub fn write_variant(dir: &Path, key: &VariantKey, icon: &Icon, format: OutputFormat) -> Result<PathBuf, ExtractError> {
	let relative = naming::variant_path(key);
	let path = dir.join(&relative);
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}

	match format {
		OutputFormat::Indexed => write_indexed(&path, icon)?,
		OutputFormat::Rgba => write_rgba(&path, icon)?,
	}
	debug!("Wrote {key} from icon #{} to {}", icon.source_index(), path.display());
	Ok(relative)
}

/// Writes an icon as a palette-indexed PNG.
pub fn write_indexed(path: &Path, icon: &Icon) -> Result<(), ExtractError> {
	let (width, height) = dimensions(icon);
	let writer = BufWriter::new(File::create(path)?);

	let colors = icon.palette().colors();
	let (palette, alpha): (Vec<[u8; 3]>, Vec<u8>) = if colors.is_empty() {
		(vec![[0, 0, 0]], vec![0])
	} else {
		colors.iter().map(|color| ([color.r, color.g, color.b], color.a)).unzip()
	};

	let mut encoder = png::Encoder::new(writer, width, height);
	encoder.set_color(png::ColorType::Indexed);
	encoder.set_depth(png::BitDepth::Eight);
	encoder.set_palette(palette.concat());
	encoder.set_trns(alpha);

	let mut writer = encoder.write_header()?;
	writer.write_image_data(icon.pixels())?;
	writer.finish()?;
	Ok(())
}

/// Writes an icon as an RGBA PNG.
pub fn write_rgba(path: &Path, icon: &Icon) -> Result<(), ExtractError> {
	let (width, height) = dimensions(icon);
	let image = image::RgbaImage::from_raw(width, height, icon.to_rgba()).ok_or(ExtractError::ImageBuffer {
		width,
		height,
	})?;
	image.save_with_format(path, image::ImageFormat::Png)?;
	Ok(())
}

fn dimensions(icon: &Icon) -> (u32, u32) {
	(icon.width() as u32, icon.height() as u32)
}

/// One written variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestVariant {
	/// Path relative to the output directory
	pub path: String,
	/// Entity number
	pub entity: u16,
	/// Form name
	pub form: Option<String>,
	/// Alternate-gender variant
	pub female: bool,
	/// Mirrored variant
	pub mirrored: bool,
	/// Container entry the icon was decoded from
	pub source_index: usize,
}

/// One failed container entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestImageFailure {
	/// Container entry
	pub index: usize,
	/// Error message
	pub error: String,
}

/// One failed entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntityFailure {
	/// Entity number
	pub entity: u16,
	/// Error message
	pub error: String,
}

/// Summary of an extraction run, written as `manifest.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
	/// Output image format
	pub format: OutputFormat,
	/// Written variants in key order
	pub variants: Vec<ManifestVariant>,
	/// Entries that did not decode
	pub image_failures: Vec<ManifestImageFailure>,
	/// Entities that produced no variants
	pub entity_failures: Vec<ManifestEntityFailure>,
}

impl Manifest {
	/// Describes an extraction without writing anything.
	pub fn from_extraction(extraction: &Extraction, format: OutputFormat) -> Self {
		let variants = extraction
			.variants
			.iter()
			.map(|(key, icon)| ManifestVariant {
				path: manifest_path(&naming::variant_path(key)),
				entity: key.entity,
				form: key.form.clone(),
				female: key.female,
				mirrored: key.mirrored,
				source_index: icon.source_index(),
			})
			.collect();
		let image_failures = extraction
			.image_failures
			.iter()
			.map(|failure| ManifestImageFailure {
				index: failure.index,
				error: failure.error.to_string(),
			})
			.collect();
		let entity_failures = extraction
			.entity_failures
			.iter()
			.map(|failure| ManifestEntityFailure {
				entity: failure.entity,
				error: failure.error.to_string(),
			})
			.collect();

		Self {
			format,
			variants,
			image_failures,
			entity_failures,
		}
	}
}

/// Forward-slash path so manifests read the same on every platform.
fn manifest_path(path: &Path) -> String {
	path.components().map(|component| component.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/")
}

/// Writes `manifest.json` under `dir`, returning its full path.
pub fn write_manifest(dir: &Path, manifest: &Manifest) -> Result<PathBuf, ExtractError> {
	fs::create_dir_all(dir)?;
	let path = dir.join(MANIFEST_FILE);
	let writer = BufWriter::new(File::create(&path)?);
	serde_json::to_writer_pretty(writer, manifest)?;
	Ok(path)
}

/// Writes every variant of an extraction plus its manifest.
pub fn export_all(dir: &Path, extraction: &Extraction, format: OutputFormat) -> Result<Manifest, ExtractError> {
	for (key, icon) in &extraction.variants {
		write_variant(dir, key, icon, format)?;
	}
	let manifest = Manifest::from_extraction(extraction, format);
	write_manifest(dir, &manifest)?;
	Ok(manifest)
}

/// Writes every subfile as one line of space-separated upper-case hex bytes.
///
/// Compressed subfiles are expanded when they decompress cleanly. Returns the
/// number of lines written.
pub fn write_hex_dump<W: Write>(writer: &mut W, container: &GarcFile) -> io::Result<usize> {
	let mut lines = 0;
	for entry in container {
		for subfile in entry.subfiles() {
			let data = lz::decompress_or_keep(subfile);
			let hex: Vec<String> = data.iter().map(|byte| format!("{byte:02X}")).collect();
			writeln!(writer, "{}", hex.join(" "))?;
			lines += 1;
		}
	}
	Ok(lines)
}

#[cfg(test)]
mod tests {
	use garc_types::file::IconLayout;

	use super::*;

	/// 8x8 icon with a red/transparent palette and a red top-left pixel.
	fn red_dot(source_index: usize) -> Icon {
		let mut data = vec![0x00, 0x00, 0x02, 0x00];
		data.extend_from_slice(&0b11111_00000_00000_1u16.to_le_bytes());
		data.extend_from_slice(&0u16.to_le_bytes());
		let mut pixels = vec![0x11u8; 32];
		pixels[0] = 0x01;
		data.extend_from_slice(&pixels);
		Icon::decode(&data, source_index, &IconLayout::new(8, 8, 8, 8)).unwrap()
	}

	#[test]
	fn test_write_indexed() {
		let dir = tempfile::tempdir().unwrap();
		let key = VariantKey::form(201, "a").mirrored();
		let relative = write_variant(dir.path(), &key, &red_dot(4), OutputFormat::Indexed).unwrap();
		assert_eq!(relative, Path::new("right/201-a.png"));

		let decoder = png::Decoder::new(File::open(dir.path().join(&relative)).unwrap());
		let reader = decoder.read_info().unwrap();
		let info = reader.info();
		assert_eq!((info.width, info.height), (8, 8));
		assert_eq!(info.color_type, png::ColorType::Indexed);
		assert_eq!(info.palette.as_deref(), Some(&[255u8, 0, 0, 0, 0, 0][..]));
		assert_eq!(info.trns.as_deref(), Some(&[255u8, 0][..]));
	}

	#[test]
	fn test_write_rgba() {
		let dir = tempfile::tempdir().unwrap();
		let relative = write_variant(dir.path(), &VariantKey::base(1), &red_dot(0), OutputFormat::Rgba).unwrap();

		let image = image::open(dir.path().join(relative)).unwrap().into_rgba8();
		assert_eq!(image.dimensions(), (8, 8));
		assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0, 255]);
		assert_eq!(image.get_pixel(1, 0).0, [0, 0, 0, 0]);
	}

	#[test]
	fn test_write_manifest() {
		let dir = tempfile::tempdir().unwrap();
		let manifest = Manifest {
			format: OutputFormat::Indexed,
			variants: vec![ManifestVariant {
				path: "right/3.png".into(),
				entity: 3,
				form: None,
				female: false,
				mirrored: true,
				source_index: 9,
			}],
			image_failures: vec![ManifestImageFailure {
				index: 2,
				error: "Entry has no subfiles".into(),
			}],
			entity_failures: Vec::new(),
		};

		let path = write_manifest(dir.path(), &manifest).unwrap();
		assert_eq!(path, dir.path().join(MANIFEST_FILE));

		let parsed: Manifest = serde_json::from_reader(File::open(path).unwrap()).unwrap();
		assert_eq!(parsed, manifest);
	}

	#[test]
	fn test_hex_dump() {
		let garc = crate::fixtures::build_garc(&[vec![vec![0x0A, 0xFF]], vec![], vec![
			vec![0x10, 0x02, 0x00, 0x00, 0x00, 0xAB, 0xCD],
			vec![],
		]]);
		let container = GarcFile::from_bytes(&garc).unwrap();

		let mut out = Vec::new();
		assert_eq!(write_hex_dump(&mut out, &container).unwrap(), 3);
		assert_eq!(String::from_utf8(out).unwrap(), "0A FF\nAB CD\n\n");
	}

	#[test]
	fn test_manifest_path_uses_forward_slashes() {
		assert_eq!(manifest_path(&naming::variant_path(&VariantKey::female(7))), "female/7.png");
	}
}
