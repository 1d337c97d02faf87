//! End-to-end extraction over a synthetic game dump

mod fixtures;

use std::path::Path;

use garc_benches::generate_garc as build_garc;
use garc_rs::prelude::*;

use crate::fixtures::{Record, build_code_bin, byte_icon, nibble_icon, write_dump};

const FORMS: &str = "3||1\n3|sun|2\n3|rain|3\n6||1\n";

fn config() -> ExtractConfig {
	ExtractConfig::from_toml_str(&format!(
		"[table]\ntable_base = {}\nbase_address = {}\nrecord_count = 7\n",
		fixtures::TABLE_BASE,
		fixtures::BASE_ADDRESS
	))
	.unwrap()
}

fn dump(dir: &Path) {
	let garc = build_garc(&[
		nibble_icon(0),
		nibble_icon(1),
		byte_icon(),
		nibble_icon(3),
		// 257 colors
		vec![0x00, 0x00, 0x01, 0x01],
	]);
	let code_bin = build_code_bin(&[
		Record {
			default: 0,
			alt_gender: 1,
			..Default::default()
		},
		Record {
			mirrors: vec![2, 0],
			..Default::default()
		},
		Record {
			default: 3,
			alt_gender: 3,
			forms: vec![3, 3, 2],
			mirrors: vec![3, 3, 3],
		},
		Record {
			forms: vec![0, 1, 3],
			mirrors: vec![0, 1],
			..Default::default()
		},
		Record {
			default: 4,
			alt_gender: 4,
			..Default::default()
		},
		Record {
			forms: vec![0, 1],
			mirrors: vec![0, 1],
			..Default::default()
		},
		Record {
			mirrors: vec![0, 1],
			..Default::default()
		},
	]);
	write_dump(dir, &garc, &code_bin);
}

#[test]
fn extract_synthetic_dump() {
	let dump_dir = tempfile::tempdir().unwrap();
	let out_dir = tempfile::tempdir().unwrap();
	dump(dump_dir.path());

	let forms: FormNames = FORMS.parse().unwrap();
	let extraction = Pipeline::new(config()).unwrap().run_in(dump_dir.path(), &forms).unwrap();
	let manifest = export_all(out_dir.path(), &extraction, OutputFormat::Indexed).unwrap();

	let paths: Vec<&str> = manifest.variants.iter().map(|variant| variant.path.as_str()).collect();
	assert_eq!(paths, vec![
		"1.png",
		"female/1.png",
		"2.png",
		"right/2.png",
		"3.png",
		"3-rain.png",
		"right/3-rain.png",
		"3-sun.png",
		"7.png",
	]);
	for path in &paths {
		assert!(out_dir.path().join(path).is_file(), "{path} was not written");
	}
	assert!(out_dir.path().join(garc_rs::export::MANIFEST_FILE).is_file());

	let failed_images: Vec<usize> = extraction.image_failures.iter().map(|failure| failure.index).collect();
	assert_eq!(failed_images, vec![4]);

	let failed_entities: Vec<u16> = extraction.entity_failures.iter().map(|failure| failure.entity).collect();
	assert_eq!(failed_entities, vec![4, 5, 6]);
	assert!(matches!(
		extraction.entity_failures[0].error,
		EntityError::Table(TableError::CountMismatch {
			forms: 3,
			mirrors: 2,
		})
	));
	assert!(matches!(
		extraction.entity_failures[1].error,
		EntityError::Assemble(AssembleError::MissingIcon {
			index: 4,
			..
		})
	));
	assert!(matches!(
		extraction.entity_failures[2].error,
		EntityError::Assemble(AssembleError::NamingMismatch {
			entity: 6,
			expected: 2,
			actual: 1,
		})
	));
	assert_eq!(manifest.entity_failures.len(), 3);
}

#[test]
fn decoded_pixels_survive_assembly() {
	let dump_dir = tempfile::tempdir().unwrap();
	dump(dump_dir.path());

	let forms: FormNames = FORMS.parse().unwrap();
	let extraction = Pipeline::new(config()).unwrap().run_in(dump_dir.path(), &forms).unwrap();

	let plain = extraction.variants.get(&VariantKey::form(3, "rain")).unwrap();
	assert_eq!((plain.width(), plain.height()), (40, 30));
	assert_eq!(plain.pixel(5, 3), Some(5));
	assert!(!plain.is_mirrored());

	let mirrored = extraction.variants.get(&VariantKey::base(2).mirrored()).unwrap();
	assert!(mirrored.same_source(plain));
	assert_eq!(mirrored.pixel(0, 0), Some(39));
	assert_eq!(mirrored.pixel(39, 29), Some(0));

	let female = extraction.variants.get(&VariantKey::female(1)).unwrap();
	assert!(female.pixels().iter().all(|&pixel| pixel == 1));
	assert_eq!(female.palette().len(), 16);
}

#[test]
fn rgba_output() {
	let dump_dir = tempfile::tempdir().unwrap();
	let out_dir = tempfile::tempdir().unwrap();
	dump(dump_dir.path());

	let extraction = Pipeline::new(config()).unwrap().run_in(dump_dir.path(), &FORMS.parse().unwrap()).unwrap();
	let manifest = export_all(out_dir.path(), &extraction, OutputFormat::Rgba).unwrap();

	assert_eq!(manifest.format, OutputFormat::Rgba);
	assert!(out_dir.path().join("right/3-rain.png").is_file());
}

#[test]
fn missing_container() {
	let dump_dir = tempfile::tempdir().unwrap();
	let result = Pipeline::new(config()).unwrap().run_in(dump_dir.path(), &FormNames::new());
	assert!(matches!(result, Err(ExtractError::IOError(_))));
}

#[test]
fn hex_dump_of_container() {
	let garc = GarcFile::from_bytes(&build_garc(&[vec![0x01, 0xAB], vec![0x10, 0x01, 0x00, 0x00, 0x00, 0x7F]])).unwrap();

	let mut out = Vec::new();
	assert_eq!(write_hex_dump(&mut out, &garc).unwrap(), 2);
	assert_eq!(String::from_utf8(out).unwrap(), "01 AB\n7F\n");
}
