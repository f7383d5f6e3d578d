//! Page Script Integration Tests
//!
//! Drives the request builders and state transitions the way the admin
//! pages do, through the public API only:
//! - Category 1: Listing form (configuration, verification, completion)
//! - Category 2: Search form location cascade
//! - Category 3: Listing table and create form
//! - Category 4: Server formset snapshots

use estate_forms::{FormsetMetadata, FormsetReplicator, NumberedLabel};
use estate_pages::address::{
	AddressFeedback, AddressField, AddressQuery, FillAddressResponse, LocalityUpdate,
	RealEstateType, VerifyAddressResponse, fill_address,
};
use estate_pages::api::decode_json;
use estate_pages::config::PageConfig;
use estate_pages::csrf::{CSRF_COOKIE_NAME, parse_cookie_value};
use estate_pages::listing::{
	OwnerLink, SoldStatusResponse, SoldToggle, create_form_url, sold_status_url,
};
use estate_pages::locations::{
	DistrictsResponse, LocationOption, LocationSelect, SelectOptions, StreetsResponse,
	refreshes_for,
};
use rstest::{fixture, rstest};

#[fixture]
fn apartment_page() -> PageConfig {
	PageConfig::from_data_attributes([
		("data-main-url", "/uk/"),
		("data-real-estate-type", "1"),
		("data-phone-number-label", "Номер телефону"),
	])
	.unwrap()
}

// ============================================================================
// Category 1: Listing form
// ============================================================================

/// A verification round trip clears the slots, then shows field errors
#[rstest]
fn test_verification_round_trip_with_errors(apartment_page: PageConfig) {
	let real_estate_type = apartment_page.real_estate_type.unwrap();
	let query = AddressQuery::new(real_estate_type, "2", "15", "7").with_unit("12");

	assert_eq!(
		query.url(&apartment_page).unwrap(),
		"/uk/objects/verify-address?type=1&locality=2&street=15&house=7&apartment=12"
	);
	assert_eq!(
		AddressFeedback::cleared(real_estate_type).last(),
		Some(&AddressField::Apartment)
	);

	let response: VerifyAddressResponse = decode_json(
		r#"{
			"success": false,
			"message": null,
			"errors": {"apartment": [{"message": "An apartment with this address already exists.", "code": "unique"}]}
		}"#,
	)
	.unwrap();
	let feedback = AddressFeedback::from_response(&response);

	assert_eq!(
		feedback.error_for(AddressField::Apartment),
		Some("An apartment with this address already exists.")
	);
	assert_eq!(feedback.error_for(AddressField::House), None);
	assert!(!feedback.is_success());
}

/// Choosing a street fetches its locality; clearing it resets the locality
#[rstest]
fn test_locality_completion(apartment_page: PageConfig) {
	let LocalityUpdate::Fetch(url) = fill_address(&apartment_page, "15").unwrap() else {
		panic!("expected a request for a selected street");
	};
	assert_eq!(url, "/uk/objects/fill-address?street=15");

	let response: FillAddressResponse = decode_json(r#"{"success": true, "locality": 2}"#).unwrap();
	assert_eq!(response.locality_value().as_deref(), Some("2"));

	assert_eq!(fill_address(&apartment_page, "").unwrap(), LocalityUpdate::Reset);
}

/// The owner link follows the owner select
#[rstest]
fn test_owner_link_follows_select(apartment_page: PageConfig) {
	assert!(OwnerLink::for_owner(&apartment_page, "9").enabled);
	assert_eq!(
		OwnerLink::for_owner(&apartment_page, "9").href,
		"/uk/handbooks/sale/update/client/9/"
	);
	assert!(!OwnerLink::for_owner(&apartment_page, "").enabled);
}

/// The phone formset label comes from the page configuration
#[rstest]
fn test_phone_label_from_page(apartment_page: PageConfig) {
	let policy = NumberedLabel::new("number", apartment_page.phone_number_label.clone());
	let replicator = FormsetReplicator::new().with_policy(policy);

	assert_eq!(replicator.policy().label_for(1), "Номер телефону 2");
}

// ============================================================================
// Category 2: Location cascade
// ============================================================================

/// Picking localities reloads districts and streets from their endpoints
#[rstest]
fn test_cascade_from_locality(apartment_page: PageConfig) {
	let selected = vec!["1".to_string(), "3".to_string()];
	let refreshes = refreshes_for(&apartment_page, LocationSelect::Locality, &selected).unwrap();

	let targets: Vec<_> = refreshes.iter().map(|r| r.target).collect();
	assert_eq!(targets, vec![LocationSelect::District, LocationSelect::Street]);
	assert_eq!(
		refreshes[0].url,
		"/uk/handbooks/load_locality_districts/?locality=1&locality=3"
	);
	assert_eq!(refreshes[1].url, "/uk/handbooks/load_streets/?locality=1&locality=3");

	let mut districts = SelectOptions::default();
	let response: DistrictsResponse = decode_json(
		r#"{"success": true, "districts": [{"id": 4, "district": "Podilskyi"}], "errors": []}"#,
	)
	.unwrap();
	assert!(districts.apply(&response));
	assert_eq!(districts.options(), [LocationOption::new(4, "Podilskyi")]);
}

/// A failed street reload keeps the streets already offered
#[rstest]
fn test_cascade_failure_keeps_options(apartment_page: PageConfig) {
	let refreshes =
		refreshes_for(&apartment_page, LocationSelect::District, &["4".to_string()]).unwrap();
	assert_eq!(refreshes.len(), 1);

	let mut streets = SelectOptions::new(vec![LocationOption::new(8, "Khoryva")]);
	let response: StreetsResponse = decode_json(r#"{"success": false, "errors": []}"#).unwrap();

	assert!(!streets.apply(&response));
	assert_eq!(streets.options(), [LocationOption::new(8, "Khoryva")]);
}

// ============================================================================
// Category 3: Listing table and create form
// ============================================================================

/// Marking a listing sold posts with the cookie token and swaps the button
#[rstest]
fn test_mark_sold_flow(apartment_page: PageConfig) {
	let url = sold_status_url(&apartment_page, "31", RealEstateType::Apartment).unwrap();
	assert_eq!(url, "/uk/objects/set-status-sold/31?type=1");

	let token = parse_cookie_value("sessionid=s1; csrftoken=Tk%3D%3D", CSRF_COOKIE_NAME);
	assert_eq!(token.as_deref(), Some("Tk=="));

	let response: SoldStatusResponse = decode_json(r#"{"success": true}"#).unwrap();
	let toggle = SoldToggle::default().apply(&response);
	assert!(toggle.button_hidden);
	assert!(!toggle.badge_hidden);
}

#[rstest]
fn test_create_form_urls(apartment_page: PageConfig) {
	let urls: Vec<_> = RealEstateType::ALL
		.into_iter()
		.map(|t| create_form_url(&apartment_page, t))
		.collect();
	assert_eq!(
		urls,
		vec![
			"/uk/objects/base/create/apartment",
			"/uk/objects/base/create/commerce",
			"/uk/objects/base/create/house",
			"/uk/objects/base/create/land",
		]
	);
}

// ============================================================================
// Category 4: Server formset snapshots
// ============================================================================

/// A formset snapshot rendered by the server grows on the client
#[rstest]
fn test_snapshot_grows_on_client() {
	let metadata: FormsetMetadata = decode_json(
		r#"{
			"management": {
				"prefix": "phone_numbers",
				"total_forms": "1",
				"initial_forms": 1,
				"min_num": 0,
				"max_num": 1000
			},
			"rows": [{
				"token": "0",
				"fields": [
					{"kind": "text", "name": "phone_numbers-0-number", "id": "id_phone_numbers-0-number", "value": "+380441234567", "label": "Phone number 1"}
				]
			}]
		}"#,
	)
	.unwrap();
	let mut formset = metadata.into_formset();
	let replicator =
		FormsetReplicator::new().with_policy(NumberedLabel::new("number", "Phone number"));

	formset.add_row(&replicator).unwrap();

	let added = formset.row(1).unwrap().field("number").unwrap();
	assert_eq!(added.name, "phone_numbers-1-number");
	assert_eq!(added.label.as_deref(), Some("Phone number 2"));
	assert_eq!(formset.management_form().total_forms, "2");
}
