//! Extraction settings.
//!
//! Defaults describe the known game version. A TOML file can override any of
//! them, and `GARC_*` environment variables override the file; nested keys use
//! a double underscore:
//!
//! ```toml
//! icon_garc = "romfs/a/0/9/3"
//! first_entity = 1
//! output_format = "rgba"
//!
//! [table]
//! table_base = 4451000
//! ```
//!
//! ```text
//! GARC_FIRST_ENTITY=0 GARC_LAYOUT__WIDTH=64 garc-rs icons ...
//! ```

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use garc_types::file::{IconLayout, TableLayout};
use serde::{Deserialize, Serialize};

use crate::export::OutputFormat;

/// Prefix of overriding environment variables
pub const ENV_PREFIX: &str = "GARC";

/// Separator between nested keys in environment variables
pub const ENV_SEPARATOR: &str = "__";

/// Settings for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
	/// Icon container, relative to the base directory
	pub icon_garc: PathBuf,
	/// Executable image holding the icon table, relative to the base directory
	pub code_bin: PathBuf,
	/// Icon dimensions
	pub layout: IconLayout,
	/// Icon table location
	pub table: TableLayout,
	/// Entity number of table record 0
	pub first_entity: u16,
	/// Image format of written variants
	pub output_format: OutputFormat,
}

impl Default for ExtractConfig {
	fn default() -> Self {
		Self {
			icon_garc: ["romfs", "a", "0", "9", "3"].iter().collect(),
			code_bin: ["exefs", "code.bin"].iter().collect(),
			layout: IconLayout::default(),
			table: TableLayout::default(),
			first_entity: 1,
			output_format: OutputFormat::default(),
		}
	}
}

impl ExtractConfig {
	/// Loads defaults, then the optional TOML file, then `GARC_*` variables.
	pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
		Self::load_with(path, Self::environment())
	}

	/// Parses a TOML document on top of the defaults, ignoring the environment.
	pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
		Config::builder()
			.add_source(Config::try_from(&Self::default())?)
			.add_source(File::from_str(toml, FileFormat::Toml))
			.build()?
			.try_deserialize()
	}

	/// Environment source used by [`ExtractConfig::load`].
	pub fn environment() -> Environment {
		Environment::with_prefix(ENV_PREFIX).prefix_separator("_").separator(ENV_SEPARATOR).try_parsing(true)
	}

	fn load_with(path: Option<&Path>, environment: Environment) -> Result<Self, ConfigError> {
		let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);
		if let Some(path) = path {
			builder = builder.add_source(File::from(path).format(FileFormat::Toml));
		}
		builder.add_source(environment).build()?.try_deserialize()
	}

	/// Icon container path under `base_dir`.
	pub fn icon_garc_path(&self, base_dir: &Path) -> PathBuf {
		base_dir.join(&self.icon_garc)
	}

	/// Executable image path under `base_dir`.
	pub fn code_bin_path(&self, base_dir: &Path) -> PathBuf {
		base_dir.join(&self.code_bin)
	}
}
