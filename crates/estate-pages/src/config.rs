//! Page configuration.
//!
//! Each admin page passes its settings to the client through `data-*`
//! attributes on the script element:
//!
//! ```html
//! <script data-main-url="/uk/" data-real-estate-type="1"
//!         data-phone-number-label="Phone number" src="..."></script>
//! ```

use crate::address::RealEstateType;

pub const MAIN_URL_ATTR: &str = "data-main-url";
pub const REAL_ESTATE_TYPE_ATTR: &str = "data-real-estate-type";
pub const PHONE_NUMBER_LABEL_ATTR: &str = "data-phone-number-label";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
	#[error("Missing required attribute {0}")]
	MissingAttribute(&'static str),
	#[error("Attribute {name} has an invalid value: {value:?}")]
	InvalidAttribute { name: &'static str, value: String },
}

/// Settings shared by the scripts of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
	/// Language-prefixed site root, always ending with `/`.
	pub main_url: String,

	/// Listing type the page edits, when the page is type-specific.
	pub real_estate_type: Option<RealEstateType>,

	/// Label prefix for numbered phone-number rows.
	pub phone_number_label: String,
}

impl Default for PageConfig {
	fn default() -> Self {
		Self {
			main_url: "/".to_string(),
			real_estate_type: None,
			phone_number_label: "Phone number".to_string(),
		}
	}
}

impl PageConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn main_url(mut self, main_url: impl Into<String>) -> Self {
		self.main_url = normalize_root(main_url.into());
		self
	}

	pub fn real_estate_type(mut self, real_estate_type: RealEstateType) -> Self {
		self.real_estate_type = Some(real_estate_type);
		self
	}

	pub fn phone_number_label(mut self, label: impl Into<String>) -> Self {
		self.phone_number_label = label.into();
		self
	}

	/// Builds the configuration from `(attribute, value)` pairs.
	///
	/// `data-main-url` is required; the other attributes are optional.
	/// Unknown attributes are ignored.
	///
	/// # Examples
	///
	/// ```
	/// use estate_pages::address::RealEstateType;
	/// use estate_pages::config::PageConfig;
	///
	/// let config = PageConfig::from_data_attributes([
	///     ("data-main-url", "/en"),
	///     ("data-real-estate-type", "2"),
	/// ])
	/// .unwrap();
	///
	/// assert_eq!(config.main_url, "/en/");
	/// assert_eq!(config.real_estate_type, Some(RealEstateType::Commerce));
	/// ```
	pub fn from_data_attributes<'a, I>(attributes: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		let mut config = Self::default();
		let mut main_url = None;

		for (name, value) in attributes {
			match name {
				MAIN_URL_ATTR => main_url = Some(value),
				REAL_ESTATE_TYPE_ATTR => {
					let real_estate_type = value
						.trim()
						.parse::<u8>()
						.ok()
						.and_then(|code| RealEstateType::try_from(code).ok())
						.ok_or_else(|| ConfigError::InvalidAttribute {
							name: REAL_ESTATE_TYPE_ATTR,
							value: value.to_string(),
						})?;
					config.real_estate_type = Some(real_estate_type);
				}
				PHONE_NUMBER_LABEL_ATTR => config.phone_number_label = value.to_string(),
				_ => {}
			}
		}

		let main_url = main_url.ok_or(ConfigError::MissingAttribute(MAIN_URL_ATTR))?;
		Ok(config.main_url(main_url))
	}

	/// Reads the configuration from an element's `data-*` attributes.
	#[cfg(target_arch = "wasm32")]
	pub fn from_element(element: &web_sys::Element) -> Result<Self, ConfigError> {
		let attributes: Vec<(&str, String)> = [MAIN_URL_ATTR, REAL_ESTATE_TYPE_ATTR, PHONE_NUMBER_LABEL_ATTR]
			.into_iter()
			.filter_map(|name| element.get_attribute(name).map(|value| (name, value)))
			.collect();
		Self::from_data_attributes(
			attributes
				.iter()
				.map(|(name, value)| (*name, value.as_str())),
		)
	}

	/// Resolves a site-relative path against [`PageConfig::main_url`].
	///
	/// # Examples
	///
	/// ```
	/// use estate_pages::config::PageConfig;
	///
	/// let config = PageConfig::new().main_url("/uk/");
	/// assert_eq!(config.url("objects/fill-address"), "/uk/objects/fill-address");
	/// assert_eq!(config.url("/objects/fill-address"), "/uk/objects/fill-address");
	/// ```
	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.main_url, path.trim_start_matches('/'))
	}
}

fn normalize_root(mut url: String) -> String {
	if !url.ends_with('/') {
		url.push('/');
	}
	url
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let config = PageConfig::default();
		assert_eq!(config.main_url, "/");
		assert_eq!(config.real_estate_type, None);
		assert_eq!(config.phone_number_label, "Phone number");
	}

	#[rstest]
	fn test_from_data_attributes_full() {
		let config = PageConfig::from_data_attributes([
			("data-main-url", "http://localhost:8000/uk/"),
			("data-real-estate-type", "3"),
			("data-phone-number-label", "Телефон"),
			("data-unused", "x"),
		])
		.unwrap();

		assert_eq!(config.main_url, "http://localhost:8000/uk/");
		assert_eq!(config.real_estate_type, Some(RealEstateType::House));
		assert_eq!(config.phone_number_label, "Телефон");
	}

	#[rstest]
	fn test_from_data_attributes_requires_main_url() {
		assert_eq!(
			PageConfig::from_data_attributes([("data-real-estate-type", "1")]),
			Err(ConfigError::MissingAttribute(MAIN_URL_ATTR))
		);
	}

	#[rstest]
	#[case("0")]
	#[case("9")]
	#[case("apartment")]
	fn test_from_data_attributes_rejects_unknown_type(#[case] value: &str) {
		let result =
			PageConfig::from_data_attributes([("data-main-url", "/"), ("data-real-estate-type", value)]);
		assert!(matches!(
			result,
			Err(ConfigError::InvalidAttribute { name: REAL_ESTATE_TYPE_ATTR, .. })
		));
	}
}
