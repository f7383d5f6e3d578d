//! Entry points called from the admin templates.
//!
//! Each page loads the module and calls its `init_*` function once the DOM
//! is ready. Settings come from the `data-*` attributes of the script tag
//! that carries `data-main-url`.

use crate::address::{AddressFeedback, AddressField, AddressQuery, RealEstateType};
use crate::api::ApiClient;
use crate::config::{ConfigError, MAIN_URL_ATTR, PageConfig, REAL_ESTATE_TYPE_ATTR};
use crate::dom::{
	DomError, DomResult, PHONE_NUMBER_FORMSET, PHOTO_FORMSET, control_value, element_by_id,
	install_formset, matching_elements, set_control_value,
};
use crate::listing::{HIDDEN_CLASS, OwnerLink, SoldToggle, create_form_url_for_value};
use crate::locations::{
	DistrictsResponse, LocationOption, LocationSelect, OptionsResponse, Refresh, SelectOptions,
	StreetsResponse, refreshes_for,
};
use crate::{debug_log, error_log, info_log};
use estate_forms::{FormsetReplicator, NumberedLabel};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlElement};

const VERIFY_ADDRESS_BUTTON: &str = "btn-verify-address";
const EDIT_OWNER_BUTTON: &str = "btn-edit-owner";
const FILL_ADDRESS_BUTTON: &str = "btn-fill-address";
const OWNER_SELECT: &str = "id_owner";
const REAL_ESTATE_TYPE_SELECT: &str = "real-estate-type-select";
const SOLD_BUTTON_SELECTOR: &str = ".btn-set-status-sold";

fn document() -> DomResult<Document> {
	web_sys::window()
		.and_then(|window| window.document())
		.ok_or_else(|| DomError::Js("no document".to_string()))
}

fn page_config(document: &Document) -> DomResult<PageConfig> {
	let script = document
		.query_selector(&format!("script[{}]", MAIN_URL_ATTR))?
		.ok_or(ConfigError::MissingAttribute(MAIN_URL_ATTR))?;
	Ok(PageConfig::from_element(&script)?)
}

fn required_type(config: &PageConfig) -> DomResult<RealEstateType> {
	config
		.real_estate_type
		.ok_or(DomError::Config(ConfigError::MissingAttribute(REAL_ESTATE_TYPE_ATTR)))
}

fn on<F: FnMut() + 'static>(element: &Element, event: &str, handler: F) -> DomResult<()> {
	let closure = Closure::<dyn FnMut()>::new(handler);
	element.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
	closure.forget();
	Ok(())
}

fn value_of(document: &Document, id: &str) -> String {
	document
		.get_element_by_id(id)
		.map(|element| control_value(&element))
		.unwrap_or_default()
}

/// Listing form: photo formset, address verification, owner link and
/// locality completion.
#[wasm_bindgen]
pub fn init_real_estate_form() -> Result<(), JsValue> {
	let document = document()?;
	let config = page_config(&document)?;

	install_formset(&document, PHOTO_FORMSET, FormsetReplicator::new())?;
	install_owner_link(&document, &config)?;
	install_address_verification(&document, &config)?;
	install_fill_address(&document, &config)?;

	info_log!("real estate form ready");
	Ok(())
}

/// User form: phone-number formset with numbered labels.
#[wasm_bindgen]
pub fn init_user_form() -> Result<(), JsValue> {
	let document = document()?;
	let config = page_config(&document)?;

	let replicator =
		FormsetReplicator::new().with_policy(NumberedLabel::new("number", config.phone_number_label));
	install_formset(&document, PHONE_NUMBER_FORMSET, replicator)?;
	Ok(())
}

/// Create form: switching the type select opens that type's create form.
#[wasm_bindgen]
pub fn init_real_estate_create_form() -> Result<(), JsValue> {
	let document = document()?;
	let config = page_config(&document)?;
	let select = element_by_id(&document, REAL_ESTATE_TYPE_SELECT)?;

	if let Some(real_estate_type) = config.real_estate_type {
		set_control_value(&select, &real_estate_type.code().to_string());
	}

	let target = select.clone();
	on(&select, "change", move || {
		let Some(url) = create_form_url_for_value(&config, &control_value(&target)) else {
			return;
		};
		let navigated = web_sys::window().map(|window| window.location().set_href(&url));
		if let Some(Err(error)) = navigated {
			error_log!("could not open {}: {:?}", url, error);
		}
	})?;
	Ok(())
}

/// Listing table: "set sold" buttons.
#[wasm_bindgen]
pub fn init_real_estate_list() -> Result<(), JsValue> {
	let document = document()?;
	let config = page_config(&document)?;
	let real_estate_type = required_type(&config)?;
	let client = ApiClient::new(config);

	let Some(body) = document.body() else {
		return Ok(());
	};
	for button in matching_elements(&body, SOLD_BUTTON_SELECTOR) {
		let client = client.clone();
		let target = button.clone();
		on(&button, "click", move || {
			let client = client.clone();
			let button = target.clone();
			wasm_bindgen_futures::spawn_local(async move {
				mark_sold(&client, &button, real_estate_type).await;
			});
		})?;
	}
	Ok(())
}

/// Search form: locality → district → street cascade.
#[wasm_bindgen]
pub fn init_selection_list() -> Result<(), JsValue> {
	let document = document()?;
	let client = ApiClient::new(page_config(&document)?);

	for changed in [LocationSelect::Locality, LocationSelect::District] {
		let select = element_by_id(&document, changed.element_id())?;
		let client = client.clone();
		let page = document.clone();
		let source = select.clone();
		on(&select, "change", move || {
			let selected = selected_values(&source);
			let refreshes = match refreshes_for(client.config(), changed, &selected) {
				Ok(refreshes) => refreshes,
				Err(error) => {
					error_log!("could not build location query: {}", error);
					return;
				}
			};
			for refresh in refreshes {
				let client = client.clone();
				let page = page.clone();
				wasm_bindgen_futures::spawn_local(async move {
					refresh_select(&client, &page, refresh).await;
				});
			}
		})?;
	}
	Ok(())
}

fn selected_values(select: &Element) -> Vec<String> {
	matching_elements(select, "option:checked")
		.iter()
		.filter_map(|option| option.get_attribute("value"))
		.filter(|value| !value.is_empty())
		.collect()
}

async fn refresh_select(client: &ApiClient, document: &Document, refresh: Refresh) {
	let options = match refresh.target {
		LocationSelect::District => fetch_options::<DistrictsResponse>(client, &refresh.url).await,
		_ => fetch_options::<StreetsResponse>(client, &refresh.url).await,
	};
	let Some(options) = options else {
		return;
	};
	match document.get_element_by_id(refresh.target.element_id()) {
		Some(select) => replace_options(&select, options.options()),
		None => debug_log!("no #{} on this page", refresh.target.element_id()),
	}
}

async fn fetch_options<R: OptionsResponse>(client: &ApiClient, url: &str) -> Option<SelectOptions> {
	match client.load_options::<R>(url).await {
		Ok(response) => {
			let mut options = SelectOptions::default();
			options.apply(&response).then_some(options)
		}
		Err(error) => {
			error_log!("loading {} failed: {}", url, error);
			None
		}
	}
}

fn replace_options(select: &Element, options: &[LocationOption]) {
	let Some(document) = select.owner_document() else {
		return;
	};
	select.set_inner_html("");
	for option in options {
		let Ok(element) = document.create_element("option") else {
			continue;
		};
		if element.set_attribute("value", &option.value()).is_err() {
			continue;
		}
		element.set_text_content(Some(&option.label));
		if let Err(error) = select.append_child(&element) {
			error_log!("could not add option {}: {:?}", option.id, error);
		}
	}
}

async fn mark_sold(client: &ApiClient, button: &Element, real_estate_type: RealEstateType) {
	let Some(listing_id) = button.get_attribute("data-id") else {
		error_log!("sold button without data-id");
		return;
	};
	let response = match client.set_status_sold(&listing_id, real_estate_type).await {
		Ok(response) => response,
		Err(error) => {
			error_log!("marking listing {} as sold failed: {}", listing_id, error);
			return;
		}
	};

	let toggle = SoldToggle::default().apply(&response);
	set_hidden(button, toggle.button_hidden);
	if let Some(badge) = button.next_element_sibling() {
		set_hidden(&badge, toggle.badge_hidden);
	}
}

fn set_hidden(element: &Element, hidden: bool) {
	let classes = element.class_list();
	let result = if hidden {
		classes.add_1(HIDDEN_CLASS)
	} else {
		classes.remove_1(HIDDEN_CLASS)
	};
	if let Err(error) = result {
		error_log!("could not toggle {}: {:?}", HIDDEN_CLASS, error);
	}
}

fn install_owner_link(document: &Document, config: &PageConfig) -> DomResult<()> {
	let link = element_by_id(document, EDIT_OWNER_BUTTON)?;
	let select = element_by_id(document, OWNER_SELECT)?;

	apply_owner_link(&link, &OwnerLink::for_owner(config, &control_value(&select)));

	let config = config.clone();
	let source = select.clone();
	on(&select, "change", move || {
		apply_owner_link(&link, &OwnerLink::for_owner(&config, &control_value(&source)));
	})
}

fn apply_owner_link(link: &Element, owner: &OwnerLink) {
	if let Err(error) = link.set_attribute("href", &owner.href) {
		error_log!("could not update owner link: {:?}", error);
	}
	if let Some(link) = link.dyn_ref::<HtmlElement>()
		&& let Err(error) = link
			.style()
			.set_property("pointer-events", owner.pointer_events())
	{
		error_log!("could not update owner link: {:?}", error);
	}
}

fn install_address_verification(document: &Document, config: &PageConfig) -> DomResult<()> {
	let button = element_by_id(document, VERIFY_ADDRESS_BUTTON)?;
	let real_estate_type = required_type(config)?;
	let client = ApiClient::new(config.clone());
	let page = document.clone();
	let target = button.clone();

	on(&button, "click", move || {
		let query = read_address(&page, real_estate_type);
		show_feedback(&page, &target, real_estate_type, &AddressFeedback::default());

		let client = client.clone();
		let page = page.clone();
		let button = target.clone();
		wasm_bindgen_futures::spawn_local(async move {
			match client.verify_address(&query).await {
				Ok(response) => {
					let feedback = AddressFeedback::from_response(&response);
					show_feedback(&page, &button, real_estate_type, &feedback);
				}
				Err(error) => error_log!("address verification failed: {}", error),
			}
		});
	})
}

fn read_address(document: &Document, real_estate_type: RealEstateType) -> AddressQuery {
	let field = |field: AddressField| value_of(document, &format!("id_{}", field));
	let query = AddressQuery::new(
		real_estate_type,
		field(AddressField::Locality),
		field(AddressField::Street),
		field(AddressField::House),
	);
	match real_estate_type.unit_field() {
		Some(unit) => query.with_unit(field(unit)),
		None => query,
	}
}

/// Writes `feedback` into the message slot and the per-field error slots;
/// an empty feedback blanks them.
fn show_feedback(
	document: &Document,
	button: &Element,
	real_estate_type: RealEstateType,
	feedback: &AddressFeedback,
) {
	if let Some(slot) = button.next_sibling() {
		slot.set_text_content(Some(feedback.message.as_deref().unwrap_or_default()));
	}
	for field in AddressFeedback::cleared(real_estate_type) {
		if let Some(slot) = document.get_element_by_id(&field.error_element_id()) {
			slot.set_text_content(Some(feedback.error_for(field).unwrap_or_default()));
		}
	}
}

fn install_fill_address(document: &Document, config: &PageConfig) -> DomResult<()> {
	let button = element_by_id(document, FILL_ADDRESS_BUTTON)?;
	let client = ApiClient::new(config.clone());
	let page = document.clone();

	on(&button, "click", move || {
		let street = value_of(&page, LocationSelect::Street.element_id());
		let client = client.clone();
		let page = page.clone();
		wasm_bindgen_futures::spawn_local(async move {
			match client.locality_for_street(&street).await {
				Ok(Some(locality)) => {
					if let Some(select) = page.get_element_by_id(LocationSelect::Locality.element_id()) {
						set_control_value(&select, &locality);
					}
				}
				Ok(None) => {}
				Err(error) => error_log!("address completion failed: {}", error),
			}
		});
	})
}
