//! Form name table support.
//!
//! A plain text table with one `entity|name|form_id` record per line, for
//! example:
//!
//! ```text
//! 201|a|1
//! 201|b|2
//! 386||1
//! 386|attack|2
//! ```
//!
//! Form ids start at 1 and follow the order of the form list in the icon
//! table. An empty name marks the unnamed default form.

use std::{
	collections::BTreeMap,
	fs::File,
	io::{BufRead, BufReader},
	path::Path,
	str::FromStr,
};

use crate::file::FormsError;

/// Form names keyed by `(entity, form_id)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormNames {
	names: BTreeMap<(u16, u16), String>,
}

impl FormNames {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Opens and parses a table file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, FormsError> {
		let file = File::open(path)?;
		Self::from_reader(BufReader::new(file))
	}

	/// Parses a table from buffered text.
	///
	/// # Errors
	///
	/// Returns [`FormsError::InvalidLine`] for a line that does not have three
	/// `|`-separated fields with numeric ids.
	pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, FormsError> {
		let mut names = BTreeMap::new();
		for (number, line) in reader.lines().enumerate() {
			let line = line?;
			let trimmed = line.trim();
			if trimmed.is_empty() {
				continue;
			}

			let (entity, name, form_id) = parse_line(trimmed).ok_or_else(|| FormsError::InvalidLine {
				line: number + 1,
				content: line.clone(),
			})?;
			names.insert((entity, form_id), name.to_string());
		}
		Ok(Self {
			names,
		})
	}

	/// Adds or replaces a name.
	pub fn insert(&mut self, entity: u16, form_id: u16, name: impl Into<String>) {
		self.names.insert((entity, form_id), name.into());
	}

	/// Gets the name of a form, `None` for an unknown or unnamed form.
	pub fn get(&self, entity: u16, form_id: u16) -> Option<&str> {
		self.names.get(&(entity, form_id)).map(String::as_str).filter(|name| !name.is_empty())
	}

	/// Returns `true` if the table has a record for the form.
	pub fn contains(&self, entity: u16, form_id: u16) -> bool {
		self.names.contains_key(&(entity, form_id))
	}

	/// Names of an entity's forms in form order.
	///
	/// Collects form ids `1, 2, ...` and stops at the first missing id.
	pub fn names_for(&self, entity: u16) -> Vec<Option<String>> {
		(1..=u16::MAX)
			.map_while(|form_id| self.names.get(&(entity, form_id)))
			.map(|name| Some(name.clone()).filter(|name| !name.is_empty()))
			.collect()
	}

	/// Number of records.
	pub fn len(&self) -> usize {
		self.names.len()
	}

	/// Returns `true` if the table has no records.
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}
}

impl FromStr for FormNames {
	type Err = FormsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_reader(s.as_bytes())
	}
}

fn parse_line(line: &str) -> Option<(u16, &str, u16)> {
	let mut fields = line.split('|');
	let entity = fields.next()?.trim().parse().ok()?;
	let name = fields.next()?;
	let form_id = fields.next()?.trim().parse().ok()?;
	if fields.next().is_some() {
		return None;
	}
	Some((entity, name, form_id))
}
