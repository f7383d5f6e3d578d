//! Formset handling for the estate admin forms
//!
//! This crate models Django-style formsets on the client side:
//! - Index tokens embedded in field names (`{prefix}-{index}-{field}`)
//! - The management form and its `TOTAL_FORMS` counter
//! - Row replication: clone the last row, renumber, blank and append
//! - Field clearing policies for freshly added rows
//! - Serializable formset snapshots for hand-off between server and WASM
//!
//! The replicator works against traits ([`RowContainer`], [`FormsetRow`],
//! [`CounterField`]) so the same algorithm drives both the in-memory
//! [`Formset`] and DOM-backed rows in the browser.

pub mod clearing;
pub mod error;
pub mod formset;
pub mod index_token;
pub mod management;
pub mod replicator;
pub mod row;
pub mod wasm_compat;

pub use clearing::{BlankFields, ClearingPolicy, NumberedLabel};
pub use error::{FormsetError, FormsetResult};
pub use formset::Formset;
pub use index_token::{FieldName, HTML_ID_PREFIX, IndexToken, PLACEHOLDER, renumber};
pub use management::{
	CounterField, DEFAULT_MAX_NUM_FORMS, INITIAL_FORMS, MAX_NUM_FORMS, MIN_NUM_FORMS,
	ManagementForm, TOTAL_FORMS,
};
pub use replicator::{FormsetReplicator, RowContainer};
pub use row::{FieldElement, FieldKind, FormRow, FormsetRow, RowField};
pub use wasm_compat::{FormsetMetadata, RowMetadata};
