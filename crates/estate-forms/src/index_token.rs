//! Index tokens embedded in formset field names.
//!
//! A formset field is named `{prefix}-{token}-{field}` where the token is
//! either the zero-based row index or the [`PLACEHOLDER`] of a row that has
//! not been numbered yet. Rewriting parses the name against the known
//! prefix instead of matching substrings, so only the token segment itself
//! is ever replaced.

use std::fmt;

/// Index token of a template row that has not been numbered yet.
pub const PLACEHOLDER: &str = "__prefix__";

/// The row marker inside a formset field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexToken {
	/// A numbered row.
	Index(usize),
	/// An unnumbered template row (`__prefix__`).
	Placeholder,
}

impl IndexToken {
	/// Parses a single segment.
	///
	/// Only plain decimal digits and the placeholder are accepted, so signs,
	/// whitespace and the empty string are rejected.
	///
	/// # Examples
	///
	/// ```
	/// use estate_forms::IndexToken;
	///
	/// assert_eq!(IndexToken::parse("12"), Some(IndexToken::Index(12)));
	/// assert_eq!(IndexToken::parse("__prefix__"), Some(IndexToken::Placeholder));
	/// assert_eq!(IndexToken::parse("+1"), None);
	/// ```
	pub fn parse(segment: &str) -> Option<Self> {
		if segment == PLACEHOLDER {
			return Some(Self::Placeholder);
		}
		if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
			return None;
		}
		segment.parse().ok().map(Self::Index)
	}

	pub fn index(self) -> Option<usize> {
		match self {
			Self::Index(index) => Some(index),
			Self::Placeholder => None,
		}
	}

	pub fn is_placeholder(self) -> bool {
		matches!(self, Self::Placeholder)
	}
}

impl fmt::Display for IndexToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Index(index) => write!(f, "{}", index),
			Self::Placeholder => f.write_str(PLACEHOLDER),
		}
	}
}

impl From<usize> for IndexToken {
	fn from(index: usize) -> Self {
		Self::Index(index)
	}
}

/// Marker Django puts in front of a field name to form its `id`.
pub const HTML_ID_PREFIX: &str = "id_";

/// Rewrites the index token of a `{prefix}-{token}-{field}` name, or of its
/// `id_` form, from `from` to `to`.
///
/// Only the segment right after the prefix is the token, so digits inside
/// the prefix or the field name are never touched. Returns `None` when the
/// value does not belong to `prefix` or carries another token, which lets
/// callers skip writing the attribute back.
///
/// # Examples
///
/// ```
/// use estate_forms::{IndexToken, renumber};
///
/// let renamed = renumber("images", "id_images-10-image", IndexToken::Index(10), IndexToken::Index(11));
/// assert_eq!(renamed.as_deref(), Some("id_images-11-image"));
///
/// // `10` is not the token of `images-100-image`
/// assert_eq!(renumber("images", "images-100-image", IndexToken::Index(10), IndexToken::Index(11)), None);
/// ```
pub fn renumber(prefix: &str, value: &str, from: IndexToken, to: IndexToken) -> Option<String> {
	let (marker, name) = match FieldName::parse(prefix, value) {
		Some(name) => ("", name),
		None => (
			HTML_ID_PREFIX,
			FieldName::parse(prefix, value.strip_prefix(HTML_ID_PREFIX)?)?,
		),
	};
	(name.token() == from).then(|| format!("{}{}", marker, name.with_token(to)))
}

/// A parsed `{prefix}-{token}-{field}` name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldName {
	prefix: String,
	token: IndexToken,
	field: String,
}

impl FieldName {
	pub fn new(prefix: impl Into<String>, token: IndexToken, field: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			token,
			field: field.into(),
		}
	}

	/// Splits a field name that belongs to the formset `prefix`.
	///
	/// # Examples
	///
	/// ```
	/// use estate_forms::{FieldName, IndexToken};
	///
	/// let name = FieldName::parse("phone_numbers", "phone_numbers-3-number").unwrap();
	/// assert_eq!(name.token(), IndexToken::Index(3));
	/// assert_eq!(name.field(), "number");
	///
	/// assert!(FieldName::parse("images", "phone_numbers-3-number").is_none());
	/// ```
	pub fn parse(prefix: &str, name: &str) -> Option<Self> {
		let rest = name.strip_prefix(prefix)?.strip_prefix('-')?;
		let (token, field) = rest.split_once('-')?;
		if field.is_empty() {
			return None;
		}
		Some(Self::new(prefix, IndexToken::parse(token)?, field))
	}

	pub fn with_token(mut self, token: IndexToken) -> Self {
		self.token = token;
		self
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	pub fn token(&self) -> IndexToken {
		self.token
	}

	pub fn field(&self) -> &str {
		&self.field
	}

	/// The `id` attribute Django renders for this name.
	pub fn html_id(&self) -> String {
		format!("{}{}", HTML_ID_PREFIX, self)
	}
}

impl fmt::Display for FieldName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}-{}", self.prefix, self.token, self.field)
	}
}
