//! Variant assembly.
//!
//! Combines the icon indices of one entity with the decoded icons and the
//! entity's form names into the set of images that should be written out.
//!
//! | Variant          | Source                 | Emitted when                     |
//! |------------------|------------------------|----------------------------------|
//! | default          | `default`              | always                           |
//! | female           | `alt_gender`           | `alt_gender != default`          |
//! | form             | `forms[i]`             | form `i` is named                |
//! | mirrored default | `mirrors[0]`, mirrored | `mirrors[0] != default`          |
//! | mirrored form    | `mirrors[i]`, mirrored | form `i` is named and `mirrors[i] != forms[i]` |
//!
//! The unnamed default form is covered by the default variant and is never
//! emitted under a form name.

use std::{
	collections::{BTreeMap, btree_map},
	fmt,
};

use crate::file::{AssembleError, Icon, IconIndexSet};

/// Index to icon lookup used during assembly.
pub trait IconLookup {
	/// Returns the decoded icon at `index`, if it decoded successfully.
	fn icon(&self, index: u16) -> Option<&Icon>;
}

impl IconLookup for [Icon] {
	fn icon(&self, index: u16) -> Option<&Icon> {
		self.get(usize::from(index))
	}
}

impl IconLookup for [Option<Icon>] {
	fn icon(&self, index: u16) -> Option<&Icon> {
		self.get(usize::from(index)).and_then(Option::as_ref)
	}
}

/// Decoded icons in container order, with holes for icons that failed to decode.
#[derive(Debug, Clone, Default)]
pub struct IconStore {
	icons: Vec<Option<Icon>>,
}

impl IconStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty store with room for `capacity` icons.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			icons: Vec::with_capacity(capacity),
		}
	}

	/// Appends the result of decoding the next container entry.
	pub fn push(&mut self, icon: Option<Icon>) {
		self.icons.push(icon);
	}

	/// Gets a decoded icon by index.
	#[inline]
	pub fn get(&self, index: usize) -> Option<&Icon> {
		self.icons.get(index).and_then(Option::as_ref)
	}

	/// Number of slots, including failed decodes.
	#[inline]
	pub fn len(&self) -> usize {
		self.icons.len()
	}

	/// Returns `true` if the store has no slots.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.icons.is_empty()
	}

	/// Number of successfully decoded icons.
	pub fn decoded_count(&self) -> usize {
		self.icons.iter().filter(|icon| icon.is_some()).count()
	}

	/// Iterates over the slots in container order.
	pub fn iter(&self) -> impl Iterator<Item = Option<&Icon>> {
		self.icons.iter().map(Option::as_ref)
	}
}

impl IconLookup for IconStore {
	fn icon(&self, index: u16) -> Option<&Icon> {
		self.get(usize::from(index))
	}
}

impl FromIterator<Option<Icon>> for IconStore {
	fn from_iter<T: IntoIterator<Item = Option<Icon>>>(iter: T) -> Self {
		Self {
			icons: iter.into_iter().collect(),
		}
	}
}

/// Identity of one output image.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariantKey {
	/// Entity number
	pub entity: u16,
	/// Form name, `None` for the default form
	pub form: Option<String>,
	/// Alternate-gender variant
	pub female: bool,
	/// Horizontally mirrored variant
	pub mirrored: bool,
}

impl VariantKey {
	/// Default variant of an entity.
	pub fn base(entity: u16) -> Self {
		Self {
			entity,
			form: None,
			female: false,
			mirrored: false,
		}
	}

	/// Alternate-gender variant of an entity.
	pub fn female(entity: u16) -> Self {
		Self {
			female: true,
			..Self::base(entity)
		}
	}

	/// Named form of an entity.
	pub fn form(entity: u16, name: impl Into<String>) -> Self {
		Self {
			form: Some(name.into()),
			..Self::base(entity)
		}
	}

	/// Mirrored counterpart of this key.
	pub fn mirrored(self) -> Self {
		Self {
			mirrored: true,
			..self
		}
	}
}

impl fmt::Display for VariantKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.entity)?;
		if let Some(form) = &self.form {
			write!(f, "-{form}")?;
		}
		if self.female {
			write!(f, " (female)")?;
		}
		if self.mirrored {
			write!(f, " (mirrored)")?;
		}
		Ok(())
	}
}

/// Ordered output images of one or more entities.
#[derive(Debug, Clone, Default)]
pub struct VariantSet {
	variants: BTreeMap<VariantKey, Icon>,
}

impl VariantSet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a variant, returning the icon it replaced.
	pub fn insert(&mut self, key: VariantKey, icon: Icon) -> Option<Icon> {
		self.variants.insert(key, icon)
	}

	/// Gets a variant by key.
	pub fn get(&self, key: &VariantKey) -> Option<&Icon> {
		self.variants.get(key)
	}

	/// Returns `true` if the key is present.
	pub fn contains(&self, key: &VariantKey) -> bool {
		self.variants.contains_key(key)
	}

	/// Number of variants.
	pub fn len(&self) -> usize {
		self.variants.len()
	}

	/// Returns `true` if the set is empty.
	pub fn is_empty(&self) -> bool {
		self.variants.is_empty()
	}

	/// Iterates over the keys in order.
	pub fn keys(&self) -> btree_map::Keys<'_, VariantKey, Icon> {
		self.variants.keys()
	}

	/// Iterates over the variants in key order.
	pub fn iter(&self) -> btree_map::Iter<'_, VariantKey, Icon> {
		self.variants.iter()
	}
}

impl IntoIterator for VariantSet {
	type Item = (VariantKey, Icon);
	type IntoIter = btree_map::IntoIter<VariantKey, Icon>;

	fn into_iter(self) -> Self::IntoIter {
		self.variants.into_iter()
	}
}

impl<'a> IntoIterator for &'a VariantSet {
	type Item = (&'a VariantKey, &'a Icon);
	type IntoIter = btree_map::Iter<'a, VariantKey, Icon>;

	fn into_iter(self) -> Self::IntoIter {
		self.variants.iter()
	}
}

impl Extend<(VariantKey, Icon)> for VariantSet {
	fn extend<T: IntoIterator<Item = (VariantKey, Icon)>>(&mut self, iter: T) {
		self.variants.extend(iter);
	}
}

/// Builds the output images of one entity.
///
/// # Arguments
///
/// * `entity` - Entity number used in keys and errors
/// * `set` - Resolved icon indices
/// * `icons` - Decoded icons
/// * `names` - One entry per form, `None` for unnamed forms
///
/// # Errors
///
/// Returns [`AssembleError::NamingMismatch`] if the entity has forms and the
/// number of names differs, or [`AssembleError::MissingIcon`] if a referenced
/// icon failed to decode.
pub fn assemble<L>(
	entity: u16,
	set: &IconIndexSet,
	icons: &L,
	names: Option<&[Option<String>]>,
) -> Result<VariantSet, AssembleError>
where
	L: IconLookup + ?Sized,
{
	let forms = set.forms();
	let names = names.unwrap_or_default();
	if !forms.is_empty() && names.len() != forms.len() {
		return Err(AssembleError::NamingMismatch {
			entity,
			expected: forms.len(),
			actual: names.len(),
		});
	}

	let fetch = |index: u16| {
		icons.icon(index).cloned().ok_or(AssembleError::MissingIcon {
			entity,
			index,
		})
	};
	let fetch_mirrored = |index: u16| {
		fetch(index).map(|mut icon| {
			icon.mirror();
			icon
		})
	};

	let mut variants = VariantSet::new();
	variants.insert(VariantKey::base(entity), fetch(set.default)?);
	if set.has_alt_gender() {
		variants.insert(VariantKey::female(entity), fetch(set.alt_gender)?);
	}

	for (&index, name) in forms.iter().zip(names) {
		if let Some(name) = name {
			variants.insert(VariantKey::form(entity, name.as_str()), fetch(index)?);
		}
	}

	if let Some(mirrors) = &set.mirrors {
		if let Some(&mirror) = mirrors.first()
			&& mirror != set.default
		{
			variants.insert(VariantKey::base(entity).mirrored(), fetch_mirrored(mirror)?);
		}

		if !forms.is_empty() {
			let named_mirrors = forms.iter().zip(mirrors).zip(names).filter_map(|((&form, &mirror), name)| {
				name.as_deref().filter(|_| mirror != form).map(|name| (mirror, name))
			});
			for (mirror, name) in named_mirrors {
				variants.insert(VariantKey::form(entity, name).mirrored(), fetch_mirrored(mirror)?);
			}
		}
	}

	Ok(variants)
}
