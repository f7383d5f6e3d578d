//! How the fields of a freshly cloned row are reset.

use crate::row::{FieldKind, RowField};

/// Resets one field of a row that was just cloned into position `index`.
pub trait ClearingPolicy {
	fn clear_field(&self, field: &mut dyn RowField, index: usize);
}

/// Empties every field and unchecks checkboxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankFields;

impl ClearingPolicy for BlankFields {
	fn clear_field(&self, field: &mut dyn RowField, _index: usize) {
		field.set_value("");
		if field.kind() == FieldKind::Checkbox {
			field.set_checked(false);
		}
	}
}

/// Blanks every field like [`BlankFields`] and labels one of them with its
/// one-based row number, e.g. "Phone number 3".
///
/// # Examples
///
/// ```
/// use estate_forms::{ClearingPolicy, FieldElement, FieldKind, NumberedLabel};
///
/// let policy = NumberedLabel::new("number", "Phone number");
/// let mut field = FieldElement::new(FieldKind::Text, "phone_numbers-2-number")
///     .with_value("+380501234567");
///
/// policy.clear_field(&mut field, 2);
/// assert_eq!(field.value, "");
/// assert_eq!(field.label.as_deref(), Some("Phone number 3"));
/// ```
#[derive(Debug, Clone)]
pub struct NumberedLabel {
	field: String,
	label: String,
}

impl NumberedLabel {
	pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			label: label.into(),
		}
	}

	pub fn label_for(&self, index: usize) -> String {
		format!("{} {}", self.label, index + 1)
	}
}

impl ClearingPolicy for NumberedLabel {
	fn clear_field(&self, field: &mut dyn RowField, index: usize) {
		BlankFields.clear_field(field, index);
		if field.is_field(&self.field) {
			field.set_label(&self.label_for(index));
		}
	}
}
