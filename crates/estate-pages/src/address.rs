//! Address verification and street-based address completion.
//!
//! Listing forms let the user check whether a listing already exists at the
//! entered address before saving, and fill the locality in from the chosen
//! street.

use crate::api::ApiResult;
use crate::config::PageConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const VERIFY_ADDRESS_PATH: &str = "objects/verify-address";
pub const FILL_ADDRESS_PATH: &str = "objects/fill-address";

/// The kind of listing a form edits.
///
/// The numeric codes are the ones the server uses in `?type=` parameters
/// and `data-real-estate-type` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RealEstateType {
	Apartment = 1,
	Commerce = 2,
	House = 3,
	Land = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Unknown real estate type code {0}")]
pub struct UnknownRealEstateType(pub u8);

impl RealEstateType {
	pub const ALL: [Self; 4] = [Self::Apartment, Self::Commerce, Self::House, Self::Land];

	pub fn code(self) -> u8 {
		self as u8
	}

	/// URL slug of the type's create form.
	pub fn slug(self) -> &'static str {
		match self {
			Self::Apartment => "apartment",
			Self::Commerce => "commerce",
			Self::House => "house",
			Self::Land => "land",
		}
	}

	/// The address part below house level, if the type has one.
	pub fn unit_field(self) -> Option<AddressField> {
		match self {
			Self::Apartment => Some(AddressField::Apartment),
			Self::Commerce => Some(AddressField::Premises),
			Self::House => Some(AddressField::Housing),
			Self::Land => None,
		}
	}
}

impl TryFrom<u8> for RealEstateType {
	type Error = UnknownRealEstateType;

	fn try_from(code: u8) -> Result<Self, Self::Error> {
		Self::ALL
			.into_iter()
			.find(|t| t.code() == code)
			.ok_or(UnknownRealEstateType(code))
	}
}

impl From<RealEstateType> for u8 {
	fn from(real_estate_type: RealEstateType) -> Self {
		real_estate_type.code()
	}
}

/// An address input that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
	Locality,
	Street,
	House,
	Apartment,
	Premises,
	Housing,
}

impl AddressField {
	pub const ALL: [Self; 6] = [
		Self::Locality,
		Self::Street,
		Self::House,
		Self::Apartment,
		Self::Premises,
		Self::Housing,
	];

	/// Query parameter and error key of the field.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Locality => "locality",
			Self::Street => "street",
			Self::House => "house",
			Self::Apartment => "apartment",
			Self::Premises => "premises",
			Self::Housing => "housing",
		}
	}

	/// Id of the element that shows the field's error, e.g. `street-error`.
	pub fn error_element_id(self) -> String {
		format!("{}-error", self.as_str())
	}
}

impl fmt::Display for AddressField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The address entered in a listing form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressQuery {
	pub real_estate_type: RealEstateType,
	pub locality: String,
	pub street: String,
	pub house: String,
	/// Apartment, premises or housing number, depending on the type.
	pub unit: String,
}

impl AddressQuery {
	pub fn new(
		real_estate_type: RealEstateType,
		locality: impl Into<String>,
		street: impl Into<String>,
		house: impl Into<String>,
	) -> Self {
		Self {
			real_estate_type,
			locality: locality.into(),
			street: street.into(),
			house: house.into(),
			unit: String::new(),
		}
	}

	pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
		self.unit = unit.into();
		self
	}

	/// Encodes the query string of the verification request.
	///
	/// The unit parameter is always sent for types that have one, even when
	/// blank, so the server can report it as required.
	///
	/// # Examples
	///
	/// ```
	/// use estate_pages::address::{AddressQuery, RealEstateType};
	///
	/// let query = AddressQuery::new(RealEstateType::Apartment, "3", "17", "12/1").with_unit("5");
	/// assert_eq!(
	///     query.query_string().unwrap(),
	///     "type=1&locality=3&street=17&house=12%2F1&apartment=5"
	/// );
	/// ```
	pub fn query_string(&self) -> ApiResult<String> {
		let mut pairs = vec![
			("type", self.real_estate_type.code().to_string()),
			(AddressField::Locality.as_str(), self.locality.clone()),
			(AddressField::Street.as_str(), self.street.clone()),
			(AddressField::House.as_str(), self.house.clone()),
		];
		if let Some(unit) = self.real_estate_type.unit_field() {
			pairs.push((unit.as_str(), self.unit.clone()));
		}
		Ok(serde_urlencoded::to_string(pairs)?)
	}

	pub fn url(&self, config: &PageConfig) -> ApiResult<String> {
		Ok(format!("{}?{}", config.url(VERIFY_ADDRESS_PATH), self.query_string()?))
	}
}

/// One validation message as rendered by Django's `errors.get_json_data()`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
	pub message: String,
	#[serde(default)]
	pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyAddressResponse {
	pub success: bool,
	#[serde(default)]
	pub message: Option<String>,
	#[serde(default)]
	pub errors: HashMap<String, Vec<ErrorDetail>>,
}

/// What the form shows after a verification round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressFeedback {
	/// Text shown next to the verify button.
	pub message: Option<String>,
	/// First error per field, in form order.
	pub field_errors: Vec<(AddressField, String)>,
}

impl AddressFeedback {
	/// Turns a verification response into form feedback.
	///
	/// A successful response only carries its message. A failed one yields
	/// the first message reported for each address field; unknown keys are
	/// ignored.
	///
	/// # Examples
	///
	/// ```
	/// use estate_pages::address::{AddressFeedback, AddressField, VerifyAddressResponse};
	///
	/// let response: VerifyAddressResponse = serde_json::from_str(
	///     r#"{"success": false, "errors": {"house": [{"message": "Required."}]}}"#,
	/// )
	/// .unwrap();
	///
	/// let feedback = AddressFeedback::from_response(&response);
	/// assert_eq!(feedback.error_for(AddressField::House), Some("Required."));
	/// assert_eq!(feedback.message, None);
	/// ```
	pub fn from_response(response: &VerifyAddressResponse) -> Self {
		if response.success {
			return Self {
				message: Some(response.message.clone().unwrap_or_default()),
				field_errors: Vec::new(),
			};
		}

		let field_errors = AddressField::ALL
			.into_iter()
			.filter_map(|field| {
				let first = response.errors.get(field.as_str())?.first()?;
				Some((field, first.message.clone()))
			})
			.collect();
		Self {
			message: None,
			field_errors,
		}
	}

	/// The slots to blank before a new verification request.
	pub fn cleared(real_estate_type: RealEstateType) -> Vec<AddressField> {
		let mut fields = vec![AddressField::Locality, AddressField::Street, AddressField::House];
		fields.extend(real_estate_type.unit_field());
		fields
	}

	pub fn error_for(&self, field: AddressField) -> Option<&str> {
		self.field_errors
			.iter()
			.find(|(f, _)| *f == field)
			.map(|(_, message)| message.as_str())
	}

	pub fn is_success(&self) -> bool {
		self.message.is_some()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FillAddressResponse {
	pub success: bool,
	#[serde(default)]
	pub locality: Option<i64>,
}

impl FillAddressResponse {
	/// The locality to select, as an option value.
	pub fn locality_value(&self) -> Option<String> {
		self.success
			.then_some(self.locality)
			.flatten()
			.map(|id| id.to_string())
	}
}

/// What to do with the locality select after the street changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalityUpdate {
	/// No street chosen: clear the locality without asking the server.
	Reset,
	/// Ask the server which locality the street belongs to.
	Fetch(String),
}

/// Plans the locality update for a newly selected street.
///
/// # Examples
///
/// ```
/// use estate_pages::address::{LocalityUpdate, fill_address};
/// use estate_pages::config::PageConfig;
///
/// let config = PageConfig::new().main_url("/uk/");
/// assert_eq!(fill_address(&config, "").unwrap(), LocalityUpdate::Reset);
/// assert_eq!(
///     fill_address(&config, "42").unwrap(),
///     LocalityUpdate::Fetch("/uk/objects/fill-address?street=42".to_string())
/// );
/// ```
pub fn fill_address(config: &PageConfig, street: &str) -> ApiResult<LocalityUpdate> {
	let street = street.trim();
	if street.is_empty() {
		return Ok(LocalityUpdate::Reset);
	}
	let query = serde_urlencoded::to_string(&[(AddressField::Street.as_str(), street)])?;
	Ok(LocalityUpdate::Fetch(format!(
		"{}?{}",
		config.url(FILL_ADDRESS_PATH),
		query
	)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn config() -> PageConfig {
		PageConfig::new().main_url("/uk/")
	}

	#[rstest]
	#[case(1, RealEstateType::Apartment, "apartment")]
	#[case(2, RealEstateType::Commerce, "commerce")]
	#[case(3, RealEstateType::House, "house")]
	#[case(4, RealEstateType::Land, "land")]
	fn test_real_estate_type_codes(
		#[case] code: u8,
		#[case] expected: RealEstateType,
		#[case] slug: &str,
	) {
		assert_eq!(RealEstateType::try_from(code), Ok(expected));
		assert_eq!(expected.code(), code);
		assert_eq!(expected.slug(), slug);
	}

	#[rstest]
	fn test_real_estate_type_rejects_unknown_code() {
		assert_eq!(RealEstateType::try_from(5), Err(UnknownRealEstateType(5)));
		assert!(serde_json::from_str::<RealEstateType>("0").is_err());
		assert_eq!(serde_json::from_str::<RealEstateType>("3").unwrap(), RealEstateType::House);
	}

	#[rstest]
	#[case(RealEstateType::Apartment, "type=1&locality=1&street=2&house=10&apartment=7")]
	#[case(RealEstateType::Commerce, "type=2&locality=1&street=2&house=10&premises=7")]
	#[case(RealEstateType::House, "type=3&locality=1&street=2&house=10&housing=7")]
	#[case(RealEstateType::Land, "type=4&locality=1&street=2&house=10")]
	fn test_verify_query_carries_unit_for_type(
		#[case] real_estate_type: RealEstateType,
		#[case] expected: &str,
	) {
		let query = AddressQuery::new(real_estate_type, "1", "2", "10").with_unit("7");
		assert_eq!(query.query_string().unwrap(), expected);
	}

	#[rstest]
	fn test_verify_url_sends_blank_unit() {
		let query = AddressQuery::new(RealEstateType::Commerce, "", "", "");
		assert_eq!(
			query.url(&config()).unwrap(),
			"/uk/objects/verify-address?type=2&locality=&street=&house=&premises="
		);
	}

	#[rstest]
	fn test_feedback_on_success_keeps_message_only() {
		let response: VerifyAddressResponse = serde_json::from_str(
			r#"{"success": true, "message": "No listing at this address yet."}"#,
		)
		.unwrap();

		let feedback = AddressFeedback::from_response(&response);

		assert!(feedback.is_success());
		assert_eq!(feedback.message.as_deref(), Some("No listing at this address yet."));
		assert!(feedback.field_errors.is_empty());
	}

	#[rstest]
	fn test_feedback_takes_first_error_per_field_in_form_order() {
		let response: VerifyAddressResponse = serde_json::from_str(
			r#"{
				"success": false,
				"errors": {
					"apartment": [{"message": "Apartment 5 already exists.", "code": "exists"}],
					"street": [{"message": "Select a street."}, {"message": "Second."}],
					"__all__": [{"message": "Ignored."}]
				}
			}"#,
		)
		.unwrap();

		let feedback = AddressFeedback::from_response(&response);

		assert!(!feedback.is_success());
		assert_eq!(
			feedback.field_errors,
			vec![
				(AddressField::Street, "Select a street.".to_string()),
				(AddressField::Apartment, "Apartment 5 already exists.".to_string()),
			]
		);
		assert_eq!(feedback.error_for(AddressField::Locality), None);
	}

	#[rstest]
	fn test_cleared_slots_follow_type() {
		assert_eq!(
			AddressFeedback::cleared(RealEstateType::House),
			vec![
				AddressField::Locality,
				AddressField::Street,
				AddressField::House,
				AddressField::Housing
			]
		);
		assert_eq!(AddressFeedback::cleared(RealEstateType::Land).len(), 3);
		assert_eq!(AddressField::Premises.error_element_id(), "premises-error");
	}

	#[rstest]
	#[case(r#"{"success": true, "locality": 12}"#, Some("12"))]
	#[case(r#"{"success": false, "locality": 12}"#, None)]
	#[case(r#"{"success": true}"#, None)]
	fn test_fill_address_locality_value(#[case] body: &str, #[case] expected: Option<&str>) {
		let response: FillAddressResponse = serde_json::from_str(body).unwrap();
		assert_eq!(response.locality_value().as_deref(), expected);
	}

	#[rstest]
	fn test_fill_address_blank_street_resets() {
		assert_eq!(fill_address(&config(), "  ").unwrap(), LocalityUpdate::Reset);
	}
}
