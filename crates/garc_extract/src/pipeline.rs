//! Extraction pipeline.
//!
//! Decodes every icon of the container, then resolves and assembles every
//! entity of the icon table. Broken icons and broken entities are collected
//! and reported; only an unreadable container stops the run.

use std::{
	borrow::Cow,
	fs::File,
	io::{BufReader, Read, Seek},
	path::Path,
};

use garc_types::{
	file::lz,
	prelude::{Compression, FormNames, GarcFile, Icon, IconStore, IconTable, VariantSet, assemble},
};
use log::{debug, info, warn};

use crate::{
	ExtractConfig,
	error::{EntityError, ExtractError, IconError},
};

/// A container entry that did not produce an icon.
#[derive(Debug)]
pub struct ImageFailure {
	/// Container entry
	pub index: usize,
	/// Cause
	pub error: IconError,
}

/// An entity that produced no variants.
#[derive(Debug)]
pub struct EntityFailure {
	/// Entity number
	pub entity: u16,
	/// Cause
	pub error: EntityError,
}

/// Result of one run.
#[derive(Debug, Default)]
pub struct Extraction {
	/// Variants of every successful entity
	pub variants: VariantSet,
	/// Number of container entries
	pub image_count: usize,
	/// Entries that did not decode
	pub image_failures: Vec<ImageFailure>,
	/// Entities that were skipped
	pub entity_failures: Vec<EntityFailure>,
}

impl Extraction {
	/// Returns `true` if nothing was skipped.
	pub fn is_clean(&self) -> bool {
		self.image_failures.is_empty() && self.entity_failures.is_empty()
	}
}

/// Extraction driver.
#[derive(Debug, Clone)]
pub struct Pipeline {
	config: ExtractConfig,
}

impl Pipeline {
	/// Creates a pipeline after validating the configuration.
	pub fn new(config: ExtractConfig) -> Result<Self, ExtractError> {
		config.layout.validate()?;

		let first = config.first_entity;
		let count = config.table.record_count;
		if usize::from(first) + count > usize::from(u16::MAX) + 1 {
			return Err(ExtractError::EntityRange {
				first,
				count,
			});
		}

		Ok(Self {
			config,
		})
	}

	/// Returns the configuration.
	pub fn config(&self) -> &ExtractConfig {
		&self.config
	}

	/// Reads the container and table configured under `base_dir`.
	pub fn run_in(&self, base_dir: &Path, forms: &FormNames) -> Result<Extraction, ExtractError> {
		let garc_path = self.config.icon_garc_path(base_dir);
		let code_path = self.config.code_bin_path(base_dir);
		info!("Reading icons from {}", garc_path.display());
		info!("Reading icon table from {}", code_path.display());

		let mut garc = BufReader::new(File::open(garc_path)?);
		let code = BufReader::new(File::open(code_path)?);
		self.run(&mut garc, code, forms)
	}

	/// Runs the whole extraction.
	///
	/// # Arguments
	///
	/// * `garc` - Icon container
	/// * `table` - Executable image holding the icon table
	/// * `forms` - Form names
	///
	/// # Errors
	///
	/// Returns an error only if the container cannot be parsed.
	pub fn run<G, T>(&self, garc: &mut G, table: T, forms: &FormNames) -> Result<Extraction, ExtractError>
	where
		G: Read + Seek,
		T: Read + Seek,
	{
		let container = GarcFile::from_reader(garc)?;
		info!("{container}");

		let (icons, image_failures) = self.decode_icons(&container);
		info!("Decoded {} of {} icons", icons.decoded_count(), icons.len());

		let mut extraction = Extraction {
			image_count: icons.len(),
			image_failures,
			..Default::default()
		};

		let mut table = IconTable::new(table, self.config.table, icons.len());
		for record in 0..table.record_count() {
			let entity = self.config.first_entity + record as u16;
			match self.assemble_entity(&mut table, record, entity, &icons, forms) {
				Ok(variants) => {
					debug!("Entity {entity}: {} variants", variants.len());
					extraction.variants.extend(variants);
				}
				Err(error) => {
					warn!("Skipping entity {entity}: {error}");
					extraction.entity_failures.push(EntityFailure {
						entity,
						error,
					});
				}
			}
		}

		info!(
			"Assembled {} variants, skipped {} entities",
			extraction.variants.len(),
			extraction.entity_failures.len()
		);
		Ok(extraction)
	}

	/// Decodes the first subfile of every entry.
	pub fn decode_icons(&self, container: &GarcFile) -> (IconStore, Vec<ImageFailure>) {
		let mut icons = IconStore::with_capacity(container.entry_count());
		let mut failures = Vec::new();

		for (index, entry) in container.iter().enumerate() {
			match self.decode_entry(index, entry.subfile(0)) {
				Ok(icon) => icons.push(Some(icon)),
				Err(error) => {
					warn!("Skipping icon #{index}: {error}");
					icons.push(None);
					failures.push(ImageFailure {
						index,
						error,
					});
				}
			}
		}

		(icons, failures)
	}

	fn decode_entry(&self, index: usize, payload: Option<&[u8]>) -> Result<Icon, IconError> {
		let payload = payload.ok_or(IconError::EmptyEntry)?;
		let data = match Compression::detect(payload) {
			Compression::None => Cow::Borrowed(payload),
			compression => lz::decompress(payload).map_or_else(
				|error| {
					warn!("Icon #{index}: {compression} decompression failed, using stored bytes: {error}");
					Cow::Borrowed(payload)
				},
				Cow::Owned,
			),
		};
		Ok(Icon::decode(&data, index, &self.config.layout)?)
	}

	fn assemble_entity<T: Read + Seek>(
		&self,
		table: &mut IconTable<T>,
		record: usize,
		entity: u16,
		icons: &IconStore,
		forms: &FormNames,
	) -> Result<VariantSet, EntityError> {
		let set = table.resolve(record)?;
		let names = forms.names_for(entity);
		Ok(assemble(entity, &set, icons, Some(names.as_slice()))?)
	}
}
