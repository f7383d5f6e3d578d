//! Browser-side scripts for the estate admin pages
//!
//! The admin templates are rendered by the server; this crate adds the
//! interactive pieces on top:
//!
//! - [`dom`]: formset rows grown in place through `estate_forms`
//! - [`address`]: address verification and locality completion
//! - [`locations`]: cascading locality, district and street selects
//! - [`listing`]: sold status, owner link and create-form switching
//! - [`api`]: JSON transport with CSRF handling
//! - [`config`]: page settings from `data-*` attributes
//! - [`pages`]: `init_*` entry points exported to JavaScript
//!
//! Request building, response decoding and UI state transitions are plain
//! Rust and compile on every target. Only [`dom`] and [`pages`] need a
//! browser and are built for `wasm32` alone.
//!
//! ## Logging
//!
//! [`debug_log!`], [`info_log!`], [`warn_log!`] and [`error_log!`] write to
//! the browser console in debug builds and compile to nothing in release
//! builds.

pub mod address;
pub mod api;
pub mod config;
pub mod csrf;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod listing;
pub mod locations;
pub mod logging;
#[cfg(target_arch = "wasm32")]
pub mod pages;

pub use address::{AddressFeedback, AddressField, AddressQuery, RealEstateType};
pub use api::{ApiClient, ApiError, ApiResult};
pub use config::{ConfigError, PageConfig};
pub use listing::{OwnerLink, SoldToggle};
pub use locations::{LocationOption, LocationSelect, SelectOptions};
