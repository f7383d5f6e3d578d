//! # Estate Admin
//!
//! Client-side scripts for the estate agency admin forms.
//!
//! The admin pages are rendered by Django; this facade bundles the pieces
//! that make them interactive:
//!
//! - [`forms`]: formset model and the row replicator behind every "add
//!   another" button (photos, phone numbers)
//! - [`pages`]: browser glue for address verification, cascading location
//!   selects, listing actions and the DOM-backed formsets
//!
//! ## Feature Flags
//!
//! - `forms` - formset model only, no browser APIs
//! - `pages` (default) - page scripts, implies `forms`
//! - `debug-hooks` - console debug output from the page scripts
//!
//! ## Example
//!
//! ```
//! # #[cfg(feature = "forms")]
//! # {
//! use estate_admin::forms::{FieldKind, Formset, FormsetReplicator};
//!
//! let mut photos = Formset::new("images");
//! photos.push_row(&[("image", FieldKind::File), ("id", FieldKind::Hidden)]);
//!
//! let index = photos.add_row(&FormsetReplicator::new()).unwrap();
//! assert_eq!(index, 1);
//! assert_eq!(photos.management_form().total_forms, "2");
//! # }
//! ```

#[cfg(feature = "forms")]
pub use estate_forms as forms;

#[cfg(feature = "pages")]
pub use estate_pages as pages;

#[cfg(feature = "forms")]
pub use estate_forms::{Formset, FormsetError, FormsetReplicator, ManagementForm};

#[cfg(feature = "pages")]
pub use estate_pages::{ApiError, PageConfig, RealEstateType};
