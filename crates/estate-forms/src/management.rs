//! The management form that travels with every formset.
//!
//! The server reads `{prefix}-TOTAL_FORMS` to learn how many rows to parse,
//! so the client must keep it in step with the rows it appends.

use crate::error::{FormsetError, FormsetResult};
use serde::{Deserialize, Serialize};

pub const TOTAL_FORMS: &str = "TOTAL_FORMS";
pub const INITIAL_FORMS: &str = "INITIAL_FORMS";
pub const MIN_NUM_FORMS: &str = "MIN_NUM_FORMS";
pub const MAX_NUM_FORMS: &str = "MAX_NUM_FORMS";

/// Upper bound Django applies when a formset does not set one.
pub const DEFAULT_MAX_NUM_FORMS: usize = 1000;

/// An element holding the formset's row count as a decimal string.
pub trait CounterField {
	/// Name reported when the stored value cannot be parsed.
	fn counter_name(&self) -> String;

	fn raw_count(&self) -> String;

	fn set_raw_count(&mut self, value: &str);

	/// Parses the stored value as a base-10 row count.
	///
	/// Surrounding whitespace is ignored; anything else that is not a
	/// non-negative integer is rejected.
	fn count(&self) -> FormsetResult<usize> {
		let raw = self.raw_count();
		raw.trim()
			.parse::<usize>()
			.map_err(|_| FormsetError::InvalidCount {
				field: self.counter_name(),
				value: raw,
			})
	}

	/// The formset prefix, read from a counter named `{prefix}-TOTAL_FORMS`.
	fn prefix(&self) -> FormsetResult<String> {
		let name = self.counter_name();
		name.strip_suffix(TOTAL_FORMS)
			.and_then(|rest| rest.strip_suffix('-'))
			.filter(|prefix| !prefix.is_empty())
			.map(str::to_string)
			.ok_or(FormsetError::UnnamedCounter { field: name.clone() })
	}

	fn set_count(&mut self, count: usize) {
		self.set_raw_count(&count.to_string());
	}
}

/// Management form data for tracking formset state
///
/// `total_forms` is kept as the raw string found in the page so that a
/// malformed counter is reported where it is read, not silently coerced.
///
/// # Examples
///
/// ```
/// use estate_forms::{CounterField, ManagementForm};
///
/// let mut management = ManagementForm::new("images").with_total_forms(2);
/// assert_eq!(management.count(), Ok(2));
///
/// management.set_count(3);
/// assert_eq!(management.total_forms, "3");
/// assert_eq!(management.field_name("TOTAL_FORMS"), "images-TOTAL_FORMS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementForm {
	/// Formset prefix the hidden fields are named after
	pub prefix: String,
	/// Raw value of `{prefix}-TOTAL_FORMS`
	pub total_forms: String,
	/// Number of rows bound to existing objects
	pub initial_forms: usize,
	/// Minimum number of rows the server accepts
	pub min_num: usize,
	/// Maximum number of rows the server accepts
	pub max_num: usize,
}

impl ManagementForm {
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			total_forms: "0".to_string(),
			initial_forms: 0,
			min_num: 0,
			max_num: DEFAULT_MAX_NUM_FORMS,
		}
	}

	pub fn with_total_forms(mut self, total: usize) -> Self {
		self.total_forms = total.to_string();
		self
	}

	pub fn with_initial_forms(mut self, initial: usize) -> Self {
		self.initial_forms = initial;
		self
	}

	pub fn with_min_num(mut self, min_num: usize) -> Self {
		self.min_num = min_num;
		self
	}

	pub fn with_max_num(mut self, max_num: usize) -> Self {
		self.max_num = max_num;
		self
	}

	/// Full name of one of the hidden management fields.
	pub fn field_name(&self, key: &str) -> String {
		format!("{}-{}", self.prefix, key)
	}

	/// The `(name, value)` pairs rendered as hidden inputs.
	pub fn hidden_fields(&self) -> Vec<(String, String)> {
		vec![
			(self.field_name(TOTAL_FORMS), self.total_forms.clone()),
			(
				self.field_name(INITIAL_FORMS),
				self.initial_forms.to_string(),
			),
			(self.field_name(MIN_NUM_FORMS), self.min_num.to_string()),
			(self.field_name(MAX_NUM_FORMS), self.max_num.to_string()),
		]
	}

	/// Reads the management form back from submitted or rendered fields.
	///
	/// `TOTAL_FORMS` must be present and numeric. The other fields fall back
	/// to their defaults when absent but are rejected when malformed.
	pub fn from_hidden_fields<'a, I>(prefix: &str, fields: I) -> FormsetResult<Self>
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		let mut management = Self::new(prefix);
		let mut total = None;

		for (name, value) in fields {
			let Some(key) = name
				.strip_prefix(prefix)
				.and_then(|rest| rest.strip_prefix('-'))
			else {
				continue;
			};
			let parse = |value: &str| {
				value
					.trim()
					.parse::<usize>()
					.map_err(|_| FormsetError::InvalidCount {
						field: name.to_string(),
						value: value.to_string(),
					})
			};
			match key {
				TOTAL_FORMS => total = Some(value.to_string()),
				INITIAL_FORMS => management.initial_forms = parse(value)?,
				MIN_NUM_FORMS => management.min_num = parse(value)?,
				MAX_NUM_FORMS => management.max_num = parse(value)?,
				_ => {}
			}
		}

		let Some(total) = total else {
			return Err(FormsetError::InvalidCount {
				field: management.field_name(TOTAL_FORMS),
				value: String::new(),
			});
		};
		management.total_forms = total;
		management.count()?;
		Ok(management)
	}
}

impl CounterField for ManagementForm {
	fn counter_name(&self) -> String {
		self.field_name(TOTAL_FORMS)
	}

	fn prefix(&self) -> FormsetResult<String> {
		Ok(self.prefix.clone())
	}

	fn raw_count(&self) -> String {
		self.total_forms.clone()
	}

	fn set_raw_count(&mut self, value: &str) {
		self.total_forms = value.to_string();
	}
}
