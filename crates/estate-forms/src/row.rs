//! Formset rows and their fields.
//!
//! [`FormsetRow`] and [`RowField`] are the seams the replicator works
//! through. [`FormRow`] and [`FieldElement`] are the plain-data
//! implementations used by [`Formset`](crate::Formset); the browser crate
//! implements the same traits over DOM elements.

use crate::index_token::{FieldName, IndexToken};
use serde::{Deserialize, Serialize};

/// The kind of control a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
	Text,
	Hidden,
	File,
	Checkbox,
	Select,
	TextArea,
}

/// A single editable control inside a row.
pub trait RowField {
	fn kind(&self) -> FieldKind;

	/// The `name` attribute, index token included.
	fn name(&self) -> String;

	fn value(&self) -> String;

	fn set_value(&mut self, value: &str);

	fn set_checked(&mut self, checked: bool);

	/// Replaces the text of the label attached to this field.
	fn set_label(&mut self, text: &str);

	/// Whether the trailing field part of the name equals `field`.
	fn is_field(&self, field: &str) -> bool {
		self.name()
			.strip_suffix(field)
			.is_some_and(|head| head.ends_with('-'))
	}
}

/// One repeated block of a formset, as seen by the replicator.
pub trait FormsetRow {
	/// Offers every indexed attribute (`name`, `id`, label `for`) to
	/// `rewrite` and stores the returned value when there is one.
	fn rewrite_indexed_attributes(&mut self, rewrite: &mut dyn FnMut(&str) -> Option<String>);

	fn visit_fields(&mut self, visit: &mut dyn FnMut(&mut dyn RowField));

	/// Drops the validation errors rendered with the row.
	///
	/// Returns `true` when an error block was present.
	fn clear_errors(&mut self) -> bool;
}

/// Plain-data form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldElement {
	pub kind: FieldKind,
	pub name: String,
	pub id: String,
	pub value: String,
	#[serde(default)]
	pub checked: bool,
	#[serde(default)]
	pub label: Option<String>,
}

impl FieldElement {
	/// Creates an empty field with Django's default `id_{name}` id.
	///
	/// # Examples
	///
	/// ```
	/// use estate_forms::{FieldElement, FieldKind};
	///
	/// let field = FieldElement::new(FieldKind::File, "images-0-image");
	/// assert_eq!(field.id, "id_images-0-image");
	/// assert!(field.value.is_empty());
	/// ```
	pub fn new(kind: FieldKind, name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			kind,
			id: format!("id_{}", name),
			name,
			value: String::new(),
			checked: false,
			label: None,
		}
	}

	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.value = value.into();
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_checked(mut self, checked: bool) -> Self {
		self.checked = checked;
		self
	}
}

impl RowField for FieldElement {
	fn kind(&self) -> FieldKind {
		self.kind
	}

	fn name(&self) -> String {
		self.name.clone()
	}

	fn value(&self) -> String {
		self.value.clone()
	}

	fn set_value(&mut self, value: &str) {
		self.value = value.to_string();
	}

	fn set_checked(&mut self, checked: bool) {
		self.checked = checked;
	}

	fn set_label(&mut self, text: &str) {
		self.label = Some(text.to_string());
	}
}

/// Plain-data formset row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRow {
	fields: Vec<FieldElement>,
	#[serde(default)]
	errors: Vec<String>,
}

impl FormRow {
	pub fn new(fields: Vec<FieldElement>) -> Self {
		Self {
			fields,
			errors: Vec::new(),
		}
	}

	/// Builds a row whose fields follow the `{prefix}-{token}-{field}`
	/// naming convention.
	///
	/// # Examples
	///
	/// ```
	/// use estate_forms::{FieldKind, FormRow, IndexToken};
	///
	/// let row = FormRow::for_prefix(
	///     "phone_numbers",
	///     IndexToken::Index(1),
	///     &[("number", FieldKind::Text), ("id", FieldKind::Hidden)],
	/// );
	/// assert_eq!(row.fields()[0].name, "phone_numbers-1-number");
	/// assert_eq!(row.fields()[1].id, "id_phone_numbers-1-id");
	/// ```
	pub fn for_prefix(prefix: &str, token: IndexToken, fields: &[(&str, FieldKind)]) -> Self {
		let fields = fields
			.iter()
			.map(|(field, kind)| {
				FieldElement::new(*kind, FieldName::new(prefix, token, *field).to_string())
			})
			.collect();
		Self::new(fields)
	}

	/// A placeholder row, as Django renders `formset.empty_form`.
	pub fn template(prefix: &str, fields: &[(&str, FieldKind)]) -> Self {
		Self::for_prefix(prefix, IndexToken::Placeholder, fields)
	}

	pub fn with_errors(mut self, errors: Vec<String>) -> Self {
		self.errors = errors;
		self
	}

	pub fn fields(&self) -> &[FieldElement] {
		&self.fields
	}

	/// Looks a field up by the trailing part of its name.
	pub fn field(&self, field: &str) -> Option<&FieldElement> {
		self.fields.iter().find(|f| f.is_field(field))
	}

	pub fn field_mut(&mut self, field: &str) -> Option<&mut FieldElement> {
		self.fields.iter_mut().find(|f| f.is_field(field))
	}

	pub fn errors(&self) -> &[String] {
		&self.errors
	}

	/// The index token of the row's first field that belongs to `prefix`.
	pub fn index_token(&self, prefix: &str) -> Option<IndexToken> {
		self.fields
			.iter()
			.find_map(|f| FieldName::parse(prefix, &f.name))
			.map(|name| name.token())
	}
}

impl FormsetRow for FormRow {
	fn rewrite_indexed_attributes(&mut self, rewrite: &mut dyn FnMut(&str) -> Option<String>) {
		for field in &mut self.fields {
			if let Some(name) = rewrite(&field.name) {
				field.name = name;
			}
			if let Some(id) = rewrite(&field.id) {
				field.id = id;
			}
		}
	}

	fn visit_fields(&mut self, visit: &mut dyn FnMut(&mut dyn RowField)) {
		for field in &mut self.fields {
			visit(field);
		}
	}

	fn clear_errors(&mut self) -> bool {
		let had_errors = !self.errors.is_empty();
		self.errors.clear();
		had_errors
	}
}
