//! Errors raised while reading or growing a formset.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormsetError {
	#[error("Counter field {field} does not hold a row count: {value:?}")]
	InvalidCount { field: String, value: String },
	#[error("Formset has no row to use as a template")]
	EmptyFormset,
	#[error("Counter field {field} is not named {{prefix}}-TOTAL_FORMS")]
	UnnamedCounter { field: String },
	#[error("Formset already holds the maximum of {max} rows")]
	MaxRowsReached { max: usize },
	#[error("Counter says {counter} rows but the formset holds {rows}")]
	CountMismatch { counter: usize, rows: usize },
	#[error("Field {field} in row {row} carries index token {found}")]
	IndexMismatch {
		row: usize,
		field: String,
		found: String,
	},
}

pub type FormsetResult<T> = Result<T, FormsetError>;
