//! In-memory formset.
//!
//! Holds the rows and management form of one formset and keeps them in
//! step. Used to describe server-rendered state, to drive tests, and as the
//! source of [`FormsetMetadata`](crate::FormsetMetadata) snapshots.

use crate::clearing::ClearingPolicy;
use crate::error::{FormsetError, FormsetResult};
use crate::index_token::{FieldName, IndexToken};
use crate::management::{CounterField, ManagementForm};
use crate::replicator::FormsetReplicator;
use crate::row::{FieldKind, FormRow};

/// A named, ordered collection of rows plus their management form.
///
/// # Examples
///
/// ```
/// use estate_forms::{FieldKind, Formset, FormsetReplicator};
///
/// let mut formset = Formset::new("images");
/// formset.push_row(&[("image", FieldKind::File)]);
///
/// formset.add_row(&FormsetReplicator::new()).unwrap();
///
/// assert_eq!(formset.total_forms(), Ok(2));
/// assert!(formset.check_consistency().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formset {
	prefix: String,
	rows: Vec<FormRow>,
	management: ManagementForm,
}

impl Formset {
	pub fn new(prefix: impl Into<String>) -> Self {
		let prefix = prefix.into();
		Self {
			management: ManagementForm::new(prefix.clone()),
			prefix,
			rows: Vec::new(),
		}
	}

	/// Wraps rows rendered elsewhere together with their management form.
	///
	/// Nothing is checked here; call [`Formset::check_consistency`] to
	/// validate what the page handed over.
	pub fn with_rows(management: ManagementForm, rows: Vec<FormRow>) -> Self {
		Self {
			prefix: management.prefix.clone(),
			rows,
			management,
		}
	}

	/// Appends a server-side row numbered after the existing ones and bumps
	/// the counter. Returns the new row for further setup.
	pub fn push_row(&mut self, fields: &[(&str, FieldKind)]) -> &mut FormRow {
		let index = self.indexed_rows();
		self.rows.push(FormRow::for_prefix(
			&self.prefix,
			IndexToken::Index(index),
			fields,
		));
		self.management.set_count(index + 1);
		let last = self.rows.len() - 1;
		&mut self.rows[last]
	}

	/// Appends a blank row on the client side through `replicator`.
	pub fn add_row<P: ClearingPolicy>(
		&mut self,
		replicator: &FormsetReplicator<P>,
	) -> FormsetResult<usize> {
		replicator.add_row(&mut self.rows, &mut self.management)
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	pub fn rows(&self) -> &[FormRow] {
		&self.rows
	}

	pub fn row(&self, index: usize) -> Option<&FormRow> {
		self.rows
			.iter()
			.find(|row| row.index_token(&self.prefix) == Some(IndexToken::Index(index)))
	}

	pub fn row_mut(&mut self, index: usize) -> Option<&mut FormRow> {
		let prefix = self.prefix.clone();
		self.rows
			.iter_mut()
			.find(|row| row.index_token(&prefix) == Some(IndexToken::Index(index)))
	}

	pub fn management_form(&self) -> &ManagementForm {
		&self.management
	}

	pub fn management_form_mut(&mut self) -> &mut ManagementForm {
		&mut self.management
	}

	pub fn total_forms(&self) -> FormsetResult<usize> {
		self.management.count()
	}

	/// Number of rows that carry a numeric index token.
	///
	/// Placeholder templates kept in the container are not counted.
	pub fn indexed_rows(&self) -> usize {
		self.rows
			.iter()
			.filter(|row| !matches!(row.index_token(&self.prefix), Some(IndexToken::Placeholder)))
			.count()
	}

	/// Verifies the formset invariants.
	///
	/// - `TOTAL_FORMS` equals the number of indexed rows
	/// - indexed rows are numbered `0..n` in display order
	/// - every field of a row carries that row's token and no other
	pub fn check_consistency(&self) -> FormsetResult<()> {
		let counter = self.management.count()?;
		let rows = self.indexed_rows();
		if counter != rows {
			return Err(FormsetError::CountMismatch { counter, rows });
		}

		let mut expected = 0;
		for row in &self.rows {
			let token = match row.index_token(&self.prefix) {
				Some(IndexToken::Placeholder) => IndexToken::Placeholder,
				_ => {
					let token = IndexToken::Index(expected);
					expected += 1;
					token
				}
			};

			for field in row.fields() {
				let found = FieldName::parse(&self.prefix, &field.name).map(|name| name.token());
				if found != Some(token) {
					return Err(FormsetError::IndexMismatch {
						row: expected.saturating_sub(1),
						field: field.name.clone(),
						found: found.map(|t| t.to_string()).unwrap_or_default(),
					});
				}
			}
		}

		Ok(())
	}
}
