//! Appending rows to a formset.
//!
//! ```mermaid
//! flowchart LR
//!     Counter["TOTAL_FORMS = n"] --> Clone["clone last row"]
//!     Clone --> Renumber["n-1 → n, __prefix__ → n"]
//!     Renumber --> Clear["clear fields and errors"]
//!     Clear --> Append["append row"]
//!     Append --> Bump["TOTAL_FORMS = n+1"]
//! ```

use crate::clearing::{BlankFields, ClearingPolicy};
use crate::error::{FormsetError, FormsetResult};
use crate::index_token::{IndexToken, renumber};
use crate::management::CounterField;
use crate::row::{FormRow, FormsetRow};

/// The element holding a formset's rows.
pub trait RowContainer {
	type Row: FormsetRow;

	/// Deep copy of the last row, or `None` when the container is empty.
	fn clone_last_row(&self) -> Option<Self::Row>;

	fn append_row(&mut self, row: Self::Row);
}

impl RowContainer for Vec<FormRow> {
	type Row = FormRow;

	fn clone_last_row(&self) -> Option<FormRow> {
		self.last().cloned()
	}

	fn append_row(&mut self, row: FormRow) {
		self.push(row);
	}
}

/// Appends blank, correctly numbered rows to a formset.
///
/// The last row of the container serves as the template. Its index token
/// (`n - 1`) or placeholder token is rewritten to `n`, where `n` is the
/// current value of the counter, and the counter is then set to `n + 1`.
/// The formset prefix comes from the counter, so only the token segment
/// after `{prefix}-` is rewritten.
/// Rows already in the container are never modified.
///
/// # Examples
///
/// ```
/// use estate_forms::{
///     CounterField, FieldKind, FormRow, FormsetReplicator, IndexToken, ManagementForm,
/// };
///
/// let mut rows = vec![FormRow::for_prefix("images", IndexToken::Index(0), &[("image", FieldKind::File)])];
/// let mut management = ManagementForm::new("images").with_total_forms(1);
///
/// let index = FormsetReplicator::new().add_row(&mut rows, &mut management).unwrap();
///
/// assert_eq!(index, 1);
/// assert_eq!(rows[1].fields()[0].name, "images-1-image");
/// assert_eq!(management.count(), Ok(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormsetReplicator<P = BlankFields> {
	policy: P,
	max_num: Option<usize>,
}

impl FormsetReplicator {
	pub fn new() -> Self {
		Self::default()
	}
}

impl<P: ClearingPolicy> FormsetReplicator<P> {
	/// Replaces the policy applied to the fields of each new row.
	pub fn with_policy<Q: ClearingPolicy>(self, policy: Q) -> FormsetReplicator<Q> {
		FormsetReplicator {
			policy,
			max_num: self.max_num,
		}
	}

	/// Refuses to grow the formset past `max_num` rows.
	pub fn with_max_num(mut self, max_num: usize) -> Self {
		self.max_num = Some(max_num);
		self
	}

	pub fn policy(&self) -> &P {
		&self.policy
	}

	pub fn max_num(&self) -> Option<usize> {
		self.max_num
	}

	/// Appends a new row and returns its index.
	///
	/// On error neither the container nor the counter is touched.
	pub fn add_row<C, F>(&self, container: &mut C, counter: &mut F) -> FormsetResult<usize>
	where
		C: RowContainer + ?Sized,
		F: CounterField + ?Sized,
	{
		let count = counter.count().inspect_err(|error| {
			tracing::warn!(%error, "refusing to add formset row");
		})?;

		if let Some(max) = self.max_num
			&& count >= max
		{
			tracing::warn!(
				counter = %counter.counter_name(),
				max,
				"formset row limit reached"
			);
			return Err(FormsetError::MaxRowsReached { max });
		}

		let next_count = count.checked_add(1).ok_or_else(|| {
			tracing::warn!(counter = %counter.counter_name(), "formset row counter is saturated");
			FormsetError::MaxRowsReached { max: count }
		})?;
		let prefix = counter.prefix().inspect_err(|error| {
			tracing::warn!(%error, "refusing to add formset row");
		})?;

		let mut row = container.clone_last_row().ok_or_else(|| {
			tracing::warn!(counter = %counter.counter_name(), "formset has no template row");
			FormsetError::EmptyFormset
		})?;

		let next = IndexToken::Index(count);
		let previous = count.checked_sub(1).map(IndexToken::Index);

		row.rewrite_indexed_attributes(&mut |value| {
			previous
				.and_then(|previous| renumber(&prefix, value, previous, next))
				.or_else(|| renumber(&prefix, value, IndexToken::Placeholder, next))
		});
		row.visit_fields(&mut |field| self.policy.clear_field(field, count));
		let dropped_errors = row.clear_errors();

		container.append_row(row);
		counter.set_count(next_count);

		tracing::debug!(
			counter = %counter.counter_name(),
			index = count,
			dropped_errors,
			"appended formset row"
		);
		Ok(count)
	}
}
