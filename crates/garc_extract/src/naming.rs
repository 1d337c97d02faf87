//! Output file naming.
//!
//! | Variant          | Path                      |
//! |------------------|---------------------------|
//! | default          | `{entity}.png`            |
//! | female           | `female/{entity}.png`     |
//! | form             | `{entity}-{form}.png`     |
//! | mirrored default | `right/{entity}.png`      |
//! | mirrored form    | `right/{entity}-{form}.png` |
//!
//! Form names come from a user-supplied table, so path separators and other
//! characters that are not valid in file names are replaced with `_`.

use std::{borrow::Cow, path::PathBuf};

use garc_types::file::VariantKey;

/// Directory holding mirrored variants
pub const MIRRORED_DIR: &str = "right";

/// Directory holding alternate-gender variants
pub const FEMALE_DIR: &str = "female";

/// Extension of every output image
pub const EXTENSION: &str = "png";

/// File name of a variant without its directory.
pub fn variant_file_name(key: &VariantKey) -> String {
	match &key.form {
		Some(form) => format!("{}-{}.{EXTENSION}", key.entity, file_safe(form)),
		None => format!("{}.{EXTENSION}", key.entity),
	}
}

fn is_reserved(c: char) -> bool {
	matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
}

/// Replaces characters that would leave the file name or are rejected by common filesystems.
fn file_safe(form: &str) -> Cow<'_, str> {
	if form.contains(is_reserved) {
		Cow::Owned(form.chars().map(|c| if is_reserved(c) { '_' } else { c }).collect())
	} else {
		Cow::Borrowed(form)
	}
}

/// Path of a variant relative to the output directory.
pub fn variant_path(key: &VariantKey) -> PathBuf {
	let mut path = PathBuf::new();
	if key.mirrored {
		path.push(MIRRORED_DIR);
	}
	if key.female {
		path.push(FEMALE_DIR);
	}
	path.push(variant_file_name(key));
	path
}
