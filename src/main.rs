//! GARC icon extraction CLI
//!
//! # Features
//!
//! - **info**: Display the container header and chunk summary
//! - **list**: List every entry and subfile with its size and compression
//! - **dump**: Write every subfile as a line of hex bytes
//! - **icons**: Extract all entity icons from a game dump
//!
//! # Usage Examples
//!
//! ```bash
//! # Display information about a container
//! garc-rs info dump/romfs/a/0/9/3
//!
//! # Dump all subfiles, decompressed where possible
//! garc-rs dump dump/romfs/a/0/9/3 icons.txt
//!
//! # Extract icons as indexed PNGs
//! garc-rs icons dump forms.txt -o icons/
//!
//! # Extract icons as RGBA PNGs using a custom table location
//! garc-rs icons dump forms.txt -c garc.toml --rgba
//! ```

use std::{
	fs::File,
	io::{BufWriter, Write},
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use garc_rs::prelude::*;
use log::info;

#[derive(Parser)]
#[command(name = "garc-rs")]
#[command(version)]
#[command(about = "GARC container utility - inspect, dump, and extract icons", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Display container information
	Info {
		/// Container file
		#[arg(value_name = "GARC")]
		input: PathBuf,
	},

	/// List entries and subfiles
	List {
		/// Container file
		#[arg(value_name = "GARC")]
		input: PathBuf,
	},

	/// Write every subfile as space-separated hex bytes, one per line
	Dump {
		/// Container file
		#[arg(value_name = "GARC")]
		input: PathBuf,

		/// Output text file
		#[arg(value_name = "OUT")]
		output: PathBuf,
	},

	/// Extract entity icons from a game dump
	Icons {
		/// Dump directory holding `romfs/` and `exefs/`
		#[arg(value_name = "BASE_DIR")]
		base_dir: PathBuf,

		/// Form name table (`id|name|form_id` per line)
		#[arg(value_name = "FORMS_TXT")]
		forms: PathBuf,

		/// Output directory
		#[arg(short, long, value_name = "DIR", default_value = "icons")]
		output: PathBuf,

		/// TOML configuration file
		#[arg(short, long, value_name = "CONFIG")]
		config: Option<PathBuf>,

		/// Write RGBA PNGs instead of indexed PNGs
		#[arg(long)]
		rgba: bool,
	},
}

fn main() -> Result<()> {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Commands::Info {
			input,
		} => cmd_info(&input),
		Commands::List {
			input,
		} => cmd_list(&input),
		Commands::Dump {
			input,
			output,
		} => cmd_dump(&input, &output),
		Commands::Icons {
			base_dir,
			forms,
			output,
			config,
			rgba,
		} => cmd_icons(&base_dir, &forms, &output, config.as_deref(), rgba),
	}
}

fn open_container(path: &Path) -> Result<GarcFile> {
	GarcFile::open(path).with_context(|| format!("Cannot open container {}", path.display()))
}

fn cmd_info(input: &Path) -> Result<()> {
	let garc = open_container(input)?;
	let header = garc.header();

	println!("=== {} ===", input.display());
	println!("{header}");
	println!("Entries:        {}", garc.entry_count());
	println!("Subfiles:       {}", garc.subfile_count());
	println!("Declared files: {}", garc.span_table().file_count);
	println!("Data offset:    {:#X}", header.data_offset);
	println!("Data length:    {:#X}", garc.data_header().length);
	Ok(())
}

fn cmd_list(input: &Path) -> Result<()> {
	let garc = open_container(input)?;

	println!("{:>6} {:>4} {:>10} {:>10}  Compression", "Entry", "Slot", "Start", "Length");
	for (index, entry) in garc.iter().enumerate() {
		if entry.spans().is_empty() {
			println!("{index:>6}    -          -          -  (empty)");
			continue;
		}
		for (span, data) in entry.spans().iter().zip(entry.subfiles()) {
			println!(
				"{index:>6} {:>4} {:>#10X} {:>10}  {}",
				span.slot,
				span.start,
				span.length,
				Compression::detect(data)
			);
		}
	}
	Ok(())
}

fn cmd_dump(input: &Path, output: &Path) -> Result<()> {
	let garc = open_container(input)?;
	let file = File::create(output).with_context(|| format!("Cannot create {}", output.display()))?;
	let mut writer = BufWriter::new(file);

	let lines = write_hex_dump(&mut writer, &garc)?;
	writer.flush()?;
	info!("Dumped {lines} subfiles to {}", output.display());
	Ok(())
}

fn cmd_icons(base_dir: &Path, forms: &Path, output: &Path, config: Option<&Path>, rgba: bool) -> Result<()> {
	let mut config = ExtractConfig::load(config).context("Cannot load configuration")?;
	if rgba {
		config.output_format = OutputFormat::Rgba;
	}
	let format = config.output_format;

	let forms = FormNames::open(forms).with_context(|| format!("Cannot read form names from {}", forms.display()))?;
	let pipeline = Pipeline::new(config)?;
	let extraction = pipeline.run_in(base_dir, &forms)?;

	let manifest = export_all(output, &extraction, format)
		.with_context(|| format!("Cannot write icons to {}", output.display()))?;
	info!("Wrote {} {format} icons to {}", manifest.variants.len(), output.display());

	if !extraction.is_clean() {
		println!(
			"{} icons and {} entities failed, see {}",
			extraction.image_failures.len(),
			extraction.entity_failures.len(),
			output.join(garc_rs::export::MANIFEST_FILE).display()
		);
	}
	Ok(())
}
