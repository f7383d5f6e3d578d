//! Serializable formset snapshots
//!
//! A [`Formset`] is plain data already, but the page that renders it and the
//! WASM client that grows it only need to agree on a stable JSON shape. This
//! module provides that shape.
//!
//! ```mermaid
//! flowchart LR
//!     Formset["Formset"] -->|"to_metadata()"| Metadata["FormsetMetadata (JSON)"]
//!     Metadata -->|"into_formset()"| Client["Formset on the client"]
//! ```

use crate::formset::Formset;
use crate::management::ManagementForm;
use crate::row::{FieldElement, FormRow};
use serde::{Deserialize, Serialize};

/// Serializable view of a whole formset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormsetMetadata {
	/// Management form values, prefix included
	pub management: ManagementForm,

	/// Rows in display order
	pub rows: Vec<RowMetadata>,
}

/// Serializable view of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMetadata {
	/// The row's index token as rendered (`"3"` or `"__prefix__"`)
	pub token: Option<String>,

	pub fields: Vec<FieldElement>,

	/// Validation errors from the previous submission
	#[serde(default)]
	pub errors: Vec<String>,
}

impl FormsetMetadata {
	/// Rebuilds the formset described by this snapshot.
	pub fn into_formset(self) -> Formset {
		let rows = self
			.rows
			.into_iter()
			.map(|row| FormRow::new(row.fields).with_errors(row.errors))
			.collect();
		Formset::with_rows(self.management, rows)
	}
}

impl Formset {
	/// Extracts a serializable snapshot.
	///
	/// # Examples
	///
	/// ```
	/// use estate_forms::{FieldKind, Formset};
	///
	/// let mut formset = Formset::new("images");
	/// formset.push_row(&[("image", FieldKind::File)]);
	///
	/// let metadata = formset.to_metadata();
	/// assert_eq!(metadata.rows[0].token.as_deref(), Some("0"));
	///
	/// let json = serde_json::to_string(&metadata).unwrap();
	/// assert!(json.contains("\"images-0-image\""));
	/// ```
	pub fn to_metadata(&self) -> FormsetMetadata {
		FormsetMetadata {
			management: self.management_form().clone(),
			rows: self
				.rows()
				.iter()
				.map(|row| RowMetadata {
					token: row.index_token(self.prefix()).map(|t| t.to_string()),
					fields: row.fields().to_vec(),
					errors: row.errors().to_vec(),
				})
				.collect(),
		}
	}
}
