//! Cascading locality → district → street selects.
//!
//! Changing the selected localities narrows the district and street
//! options; changing the selected districts narrows the streets. The
//! dependent options are replaced wholesale when the server reports
//! success and left as they are otherwise.

use crate::api::ApiResult;
use crate::config::PageConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const LOAD_DISTRICTS_PATH: &str = "handbooks/load_locality_districts/";
pub const LOAD_STREETS_PATH: &str = "handbooks/load_streets/";

/// One `<option>` of a location select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationOption {
	pub id: i64,
	pub label: String,
}

impl LocationOption {
	pub fn new(id: i64, label: impl Into<String>) -> Self {
		Self {
			id,
			label: label.into(),
		}
	}

	/// The option's `value` attribute.
	pub fn value(&self) -> String {
		self.id.to_string()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DistrictEntry {
	pub id: i64,
	pub district: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreetEntry {
	pub id: i64,
	pub street: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DistrictsResponse {
	pub success: bool,
	#[serde(default)]
	pub districts: Vec<DistrictEntry>,
	#[serde(default)]
	pub errors: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StreetsResponse {
	pub success: bool,
	#[serde(default)]
	pub streets: Vec<StreetEntry>,
	#[serde(default)]
	pub errors: serde_json::Value,
}

/// A response that carries replacement options for a select.
pub trait OptionsResponse: DeserializeOwned {
	fn is_success(&self) -> bool;

	fn options(&self) -> Vec<LocationOption>;
}

impl OptionsResponse for DistrictsResponse {
	fn is_success(&self) -> bool {
		self.success
	}

	fn options(&self) -> Vec<LocationOption> {
		self.districts
			.iter()
			.map(|entry| LocationOption::new(entry.id, &entry.district))
			.collect()
	}
}

impl OptionsResponse for StreetsResponse {
	fn is_success(&self) -> bool {
		self.success
	}

	fn options(&self) -> Vec<LocationOption> {
		self.streets
			.iter()
			.map(|entry| LocationOption::new(entry.id, &entry.street))
			.collect()
	}
}

/// The location selects of a search or listing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationSelect {
	Locality,
	District,
	Street,
}

impl LocationSelect {
	pub fn element_id(self) -> &'static str {
		match self {
			Self::Locality => "id_locality",
			Self::District => "id_locality_district",
			Self::Street => "id_street",
		}
	}
}

/// Which selection the street list is narrowed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreetFilter<'a> {
	Localities(&'a [String]),
	Districts(&'a [String]),
}

/// A dependent select and the URL its new options come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refresh {
	pub target: LocationSelect,
	pub url: String,
}

fn repeated(key: &str, values: &[String]) -> ApiResult<String> {
	let pairs: Vec<(&str, &str)> = values.iter().map(|value| (key, value.as_str())).collect();
	Ok(serde_urlencoded::to_string(pairs)?)
}

/// URL of the districts belonging to the selected localities.
///
/// # Examples
///
/// ```
/// use estate_pages::config::PageConfig;
/// use estate_pages::locations::districts_url;
///
/// let config = PageConfig::new().main_url("/en/");
/// let localities = vec!["1".to_string(), "4".to_string()];
/// assert_eq!(
///     districts_url(&config, &localities).unwrap(),
///     "/en/handbooks/load_locality_districts/?locality=1&locality=4"
/// );
/// ```
pub fn districts_url(config: &PageConfig, localities: &[String]) -> ApiResult<String> {
	Ok(format!(
		"{}?{}",
		config.url(LOAD_DISTRICTS_PATH),
		repeated("locality", localities)?
	))
}

pub fn streets_url(config: &PageConfig, filter: StreetFilter<'_>) -> ApiResult<String> {
	let query = match filter {
		StreetFilter::Localities(ids) => repeated("locality", ids)?,
		StreetFilter::Districts(ids) => repeated("locality_district", ids)?,
	};
	Ok(format!("{}?{}", config.url(LOAD_STREETS_PATH), query))
}

/// Lists the selects to reload after `changed` now holds `selected`.
pub fn refreshes_for(
	config: &PageConfig,
	changed: LocationSelect,
	selected: &[String],
) -> ApiResult<Vec<Refresh>> {
	let refreshes = match changed {
		LocationSelect::Locality => vec![
			Refresh {
				target: LocationSelect::District,
				url: districts_url(config, selected)?,
			},
			Refresh {
				target: LocationSelect::Street,
				url: streets_url(config, StreetFilter::Localities(selected))?,
			},
		],
		LocationSelect::District => vec![Refresh {
			target: LocationSelect::Street,
			url: streets_url(config, StreetFilter::Districts(selected))?,
		}],
		LocationSelect::Street => Vec::new(),
	};
	Ok(refreshes)
}

/// The options currently offered by one select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOptions {
	options: Vec<LocationOption>,
}

impl SelectOptions {
	pub fn new(options: Vec<LocationOption>) -> Self {
		Self { options }
	}

	pub fn options(&self) -> &[LocationOption] {
		&self.options
	}

	/// Replaces every option with the response's when it reports success.
	///
	/// Returns whether the options changed hands.
	pub fn apply<R: OptionsResponse>(&mut self, response: &R) -> bool {
		if !response.is_success() {
			return false;
		}
		self.options = response.options();
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn config() -> PageConfig {
		PageConfig::new().main_url("/en/")
	}

	fn ids(values: &[&str]) -> Vec<String> {
		values.iter().map(|v| v.to_string()).collect()
	}

	#[rstest]
	fn test_streets_url_by_district() {
		let districts = ids(&["7", "9"]);
		assert_eq!(
			streets_url(&config(), StreetFilter::Districts(&districts)).unwrap(),
			"/en/handbooks/load_streets/?locality_district=7&locality_district=9"
		);
	}

	#[rstest]
	fn test_empty_selection_sends_empty_query() {
		assert_eq!(
			streets_url(&config(), StreetFilter::Localities(&[])).unwrap(),
			"/en/handbooks/load_streets/?"
		);
	}

	#[rstest]
	fn test_locality_change_refreshes_districts_and_streets() {
		let refreshes = refreshes_for(&config(), LocationSelect::Locality, &ids(&["2"])).unwrap();

		assert_eq!(
			refreshes,
			vec![
				Refresh {
					target: LocationSelect::District,
					url: "/en/handbooks/load_locality_districts/?locality=2".to_string(),
				},
				Refresh {
					target: LocationSelect::Street,
					url: "/en/handbooks/load_streets/?locality=2".to_string(),
				},
			]
		);
	}

	#[rstest]
	fn test_district_change_refreshes_streets_only() {
		let refreshes = refreshes_for(&config(), LocationSelect::District, &ids(&["5"])).unwrap();

		assert_eq!(refreshes.len(), 1);
		assert_eq!(refreshes[0].target, LocationSelect::Street);
		assert!(refreshes[0].url.ends_with("?locality_district=5"));
		assert!(
			refreshes_for(&config(), LocationSelect::Street, &ids(&["5"]))
				.unwrap()
				.is_empty()
		);
	}

	#[rstest]
	fn test_successful_response_replaces_options() {
		let mut select = SelectOptions::new(vec![LocationOption::new(1, "Old street")]);
		let response: StreetsResponse = serde_json::from_str(
			r#"{"success": true, "streets": [{"id": 3, "street": "Khreshchatyk"}, {"id": 4, "street": "Sichovykh Striltsiv"}], "errors": []}"#,
		)
		.unwrap();

		assert!(select.apply(&response));
		assert_eq!(
			select.options(),
			[
				LocationOption::new(3, "Khreshchatyk"),
				LocationOption::new(4, "Sichovykh Striltsiv")
			]
		);
		assert_eq!(select.options()[0].value(), "3");
	}

	#[rstest]
	fn test_failed_response_keeps_options() {
		let mut select = SelectOptions::new(vec![LocationOption::new(1, "Podil")]);
		let response: DistrictsResponse =
			serde_json::from_str(r#"{"success": false, "errors": {"locality": ["Invalid id."]}}"#).unwrap();

		assert!(!select.apply(&response));
		assert_eq!(select.options(), [LocationOption::new(1, "Podil")]);
	}
}
