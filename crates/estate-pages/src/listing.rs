//! Listing actions: sold status, owner link and create-form switching.

use crate::address::RealEstateType;
use crate::api::ApiResult;
use crate::config::PageConfig;
use serde::Deserialize;

pub const SET_STATUS_SOLD_PATH: &str = "objects/set-status-sold/";
pub const OWNER_EDIT_PATH: &str = "handbooks/sale/update/client/";
pub const CREATE_FORM_PATH: &str = "objects/base/create/";

/// Bootstrap utility class that hides an element.
pub const HIDDEN_CLASS: &str = "d-none";

/// URL that marks a listing as sold.
///
/// # Examples
///
/// ```
/// use estate_pages::address::RealEstateType;
/// use estate_pages::config::PageConfig;
/// use estate_pages::listing::sold_status_url;
///
/// let config = PageConfig::new().main_url("/uk/");
/// assert_eq!(
///     sold_status_url(&config, "15", RealEstateType::House).unwrap(),
///     "/uk/objects/set-status-sold/15?type=3"
/// );
/// ```
pub fn sold_status_url(
	config: &PageConfig,
	listing_id: &str,
	real_estate_type: RealEstateType,
) -> ApiResult<String> {
	let query = serde_urlencoded::to_string(&[("type", real_estate_type.code())])?;
	Ok(format!(
		"{}{}?{}",
		config.url(SET_STATUS_SOLD_PATH),
		urlencoding::encode(listing_id.trim()),
		query
	))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SoldStatusResponse {
	pub success: bool,
}

/// Visibility of a listing row's "set sold" button and its "sold" badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoldToggle {
	pub button_hidden: bool,
	pub badge_hidden: bool,
}

impl Default for SoldToggle {
	fn default() -> Self {
		Self {
			button_hidden: false,
			badge_hidden: true,
		}
	}
}

impl SoldToggle {
	/// Swaps the button for the badge once the server confirmed the change.
	pub fn apply(self, response: &SoldStatusResponse) -> Self {
		if !response.success {
			return self;
		}
		Self {
			button_hidden: true,
			badge_hidden: false,
		}
	}
}

/// The "edit owner" link next to the owner select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerLink {
	pub href: String,
	pub enabled: bool,
}

impl OwnerLink {
	/// Points the link at the selected owner, or disables it when the
	/// select is empty.
	pub fn for_owner(config: &PageConfig, owner_id: &str) -> Self {
		let owner_id = owner_id.trim();
		if owner_id.is_empty() {
			return Self {
				href: String::new(),
				enabled: false,
			};
		}
		Self {
			href: format!(
				"{}{}/",
				config.url(OWNER_EDIT_PATH),
				urlencoding::encode(owner_id)
			),
			enabled: true,
		}
	}

	/// CSS `pointer-events` value for the link.
	pub fn pointer_events(&self) -> &'static str {
		if self.enabled { "auto" } else { "none" }
	}
}

pub fn create_form_url(config: &PageConfig, real_estate_type: RealEstateType) -> String {
	config.url(&format!("{}{}", CREATE_FORM_PATH, real_estate_type.slug()))
}

/// Create-form URL for a value of the type select; `None` for anything
/// that is not a known type code.
pub fn create_form_url_for_value(config: &PageConfig, value: &str) -> Option<String> {
	let code = value.trim().parse::<u8>().ok()?;
	let real_estate_type = RealEstateType::try_from(code).ok()?;
	Some(create_form_url(config, real_estate_type))
}
