//! DOM formset tests
//!
//! Runs the replicator against real elements in a headless browser:
//! `wasm-pack test --headless --firefox crates/estate-pages`

#![cfg(target_arch = "wasm32")]

use estate_forms::{FormsetError, FormsetReplicator, NumberedLabel, RowContainer};
use estate_pages::dom::{DomRowContainer, FormsetBinding, add_formset_row, control_value};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

const PHOTOS: FormsetBinding = FormsetBinding {
	prefix: "images",
	container_id: "test-photo-formset",
	button_id: "test-add-photo-form",
};

const PHONES: FormsetBinding = FormsetBinding {
	prefix: "phone_numbers",
	container_id: "test-phone-number-formset",
	button_id: "test-add-phone-number-form",
};

fn document() -> Document {
	web_sys::window().unwrap().document().unwrap()
}

/// Renders `html` into a fresh wrapper, replacing the previous test's markup.
fn mount(html: &str) -> Element {
	let document = document();
	if let Some(previous) = document.get_element_by_id("test-root") {
		previous.remove();
	}
	let root = document.create_element("div").unwrap();
	root.set_id("test-root");
	root.set_inner_html(html);
	document.body().unwrap().append_child(&root).unwrap();
	root
}

fn input(id: &str) -> HtmlInputElement {
	document()
		.get_element_by_id(id)
		.unwrap()
		.dyn_into::<HtmlInputElement>()
		.unwrap()
}

fn photo_markup(total: &str) -> String {
	format!(
		r#"<input type="hidden" name="images-TOTAL_FORMS" id="id_images-TOTAL_FORMS" value="{total}">
		<div id="test-photo-formset">
			<div class="photo-row">
				<label for="id_images-0-image">Photo</label>
				<input type="file" name="images-0-image" id="id_images-0-image">
				<input type="hidden" name="images-0-id" id="id_images-0-id" value="41">
				<input type="checkbox" name="images-0-DELETE" id="id_images-0-DELETE" checked>
			</div>
		</div>"#
	)
}

#[wasm_bindgen_test]
fn test_add_row_clones_and_renumbers() {
	mount(&photo_markup("1"));

	let index = add_formset_row(&document(), PHOTOS, &FormsetReplicator::new()).unwrap();

	assert_eq!(index, 1);
	assert_eq!(input("id_images-TOTAL_FORMS").value(), "2");
	assert_eq!(input("id_images-0-id").value(), "41");
	assert_eq!(control_value(&input("id_images-1-id")), "");
	assert!(!input("id_images-1-DELETE").checked());
	assert!(input("id_images-0-DELETE").checked());

	let label = document()
		.query_selector("label[for=\"id_images-1-image\"]")
		.unwrap();
	assert!(label.is_some());
}

#[wasm_bindgen_test]
fn test_add_row_from_placeholder_row() {
	mount(
		r#"<input type="hidden" name="images-TOTAL_FORMS" id="id_images-TOTAL_FORMS" value="0">
		<div id="test-photo-formset">
			<div><input type="file" name="images-__prefix__-image" id="id_images-__prefix__-image"></div>
		</div>"#,
	);

	let index = add_formset_row(&document(), PHOTOS, &FormsetReplicator::new()).unwrap();

	assert_eq!(index, 0);
	assert_eq!(input("id_images-TOTAL_FORMS").value(), "1");
	assert_eq!(input("id_images-0-image").name(), "images-0-image");
}

#[wasm_bindgen_test]
fn test_add_row_relabels_and_drops_errors() {
	mount(
		r#"<input type="hidden" name="phone_numbers-TOTAL_FORMS" id="id_phone_numbers-TOTAL_FORMS" value="1">
		<div id="test-phone-number-formset">
			<div>
				<label for="id_phone_numbers-0-number">Phone number 1</label>
				<input type="text" name="phone_numbers-0-number" id="id_phone_numbers-0-number" value="12">
				<ul class="errorlist"><li>Enter a valid phone number.</li></ul>
			</div>
		</div>"#,
	);
	let replicator =
		FormsetReplicator::new().with_policy(NumberedLabel::new("number", "Phone number"));

	add_formset_row(&document(), PHONES, &replicator).unwrap();

	let rows = document()
		.get_element_by_id("test-phone-number-formset")
		.unwrap()
		.children();
	assert_eq!(rows.length(), 2);
	let added = rows.item(1).unwrap();
	assert_eq!(
		added.query_selector("label").unwrap().unwrap().text_content().as_deref(),
		Some("Phone number 2")
	);
	assert!(added.query_selector(".errorlist").unwrap().is_none());
	assert!(rows.item(0).unwrap().query_selector(".errorlist").unwrap().is_some());
	assert_eq!(input("id_phone_numbers-1-number").value(), "");
}

#[wasm_bindgen_test]
fn test_invalid_counter_leaves_page_untouched() {
	mount(&photo_markup("x"));

	let result = add_formset_row(&document(), PHOTOS, &FormsetReplicator::new());

	assert!(matches!(
		result,
		Err(estate_pages::dom::DomError::Formset(FormsetError::InvalidCount { .. }))
	));
	assert_eq!(input("id_images-TOTAL_FORMS").value(), "x");
	let rows = document()
		.get_element_by_id("test-photo-formset")
		.unwrap()
		.children();
	assert_eq!(rows.length(), 1);
}

#[wasm_bindgen_test]
fn test_clone_last_row_is_detached_copy() {
	mount(&photo_markup("1"));
	let element = document().get_element_by_id("test-photo-formset").unwrap();

	let row = DomRowContainer::new(element.clone()).clone_last_row().unwrap();

	assert!(row.element().parent_node().is_none());
	assert!(row.element().query_selector("#id_images-0-image").unwrap().is_some());
	assert_eq!(element.children().length(), 1);

	element.set_inner_html("");
	assert!(DomRowContainer::new(element).clone_last_row().is_none());
}

#[wasm_bindgen_test]
fn test_add_row_keeps_indexed_prefix() {
	const ROOM_PHOTOS: FormsetBinding = FormsetBinding {
		prefix: "rooms-1-photos",
		container_id: "test-room-photo-formset",
		button_id: "test-add-room-photo-form",
	};
	mount(
		r#"<input type="hidden" name="rooms-1-photos-TOTAL_FORMS" id="id_rooms-1-photos-TOTAL_FORMS" value="2">
		<div id="test-room-photo-formset">
			<div><input type="file" name="rooms-1-photos-0-image" id="id_rooms-1-photos-0-image"></div>
			<div><input type="file" name="rooms-1-photos-1-image" id="id_rooms-1-photos-1-image"></div>
		</div>"#,
	);

	let index = add_formset_row(&document(), ROOM_PHOTOS, &FormsetReplicator::new()).unwrap();

	assert_eq!(index, 2);
	assert_eq!(input("id_rooms-1-photos-2-image").name(), "rooms-1-photos-2-image");
	assert_eq!(input("id_rooms-1-photos-TOTAL_FORMS").value(), "3");
}
