//! DOM-backed formset rows.
//!
//! Implements the `estate_forms` seams over live elements so the same
//! [`FormsetReplicator`] that drives the in-memory model also grows the
//! server-rendered formsets in the page.
//!
//! ```mermaid
//! flowchart LR
//!     Button["add button click"] --> Replicator["FormsetReplicator::add_row"]
//!     Replicator --> Container["DomRowContainer (lastElementChild)"]
//!     Replicator --> Counter["DomCounter (#id_{prefix}-TOTAL_FORMS)"]
//! ```

use crate::config::ConfigError;
use crate::{debug_log, error_log, warn_log};
use estate_forms::{
	ClearingPolicy, CounterField, FieldKind, FormsetError, FormsetReplicator, FormsetRow,
	ManagementForm, RowContainer, RowField, TOTAL_FORMS,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
	Document, Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, NodeList,
};

/// Attributes that carry a row's index token.
const INDEXED_ATTRIBUTES: [&str; 3] = ["name", "id", "for"];
const INDEXED_SELECTOR: &str = "[name], [id], [for]";
const FIELD_SELECTOR: &str = "input, select, textarea";
const ERROR_LIST_SELECTOR: &str = ".errorlist";

#[derive(Debug, thiserror::Error)]
pub enum DomError {
	#[error("Element #{0} not found")]
	MissingElement(String),
	#[error("DOM call failed: {0}")]
	Js(String),
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error(transparent)]
	Formset(#[from] FormsetError),
}

impl From<JsValue> for DomError {
	fn from(value: JsValue) -> Self {
		Self::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
	}
}

impl From<DomError> for JsValue {
	fn from(error: DomError) -> Self {
		JsValue::from_str(&error.to_string())
	}
}

pub type DomResult<T> = Result<T, DomError>;

pub fn element_by_id(document: &Document, id: &str) -> DomResult<Element> {
	document
		.get_element_by_id(id)
		.ok_or_else(|| DomError::MissingElement(id.to_string()))
}

/// Every element under `root` matching `selector`, `root` included when it
/// matches too.
pub fn matching_elements(root: &Element, selector: &str) -> Vec<Element> {
	let mut elements = Vec::new();
	if root.matches(selector).unwrap_or(false) {
		elements.push(root.clone());
	}
	if let Ok(list) = root.query_selector_all(selector) {
		elements.extend(node_list_elements(&list));
	}
	elements
}

fn node_list_elements(list: &NodeList) -> impl Iterator<Item = Element> + '_ {
	(0..list.length()).filter_map(|i| list.item(i)?.dyn_into::<Element>().ok())
}

fn set_attribute(element: &Element, name: &str, value: &str) {
	if let Err(error) = element.set_attribute(name, value) {
		warn_log!("could not set {} on <{}>: {:?}", name, element.tag_name(), error);
	}
}

/// The current value of an input, select or textarea.
pub fn control_value(element: &Element) -> String {
	if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
		input.value()
	} else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
		select.value()
	} else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
		area.value()
	} else {
		String::new()
	}
}

pub fn set_control_value(element: &Element, value: &str) {
	if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
		input.set_value(value);
	} else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
		select.set_value(value);
	} else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
		area.set_value(value);
	}
}

/// The element holding a formset's rows, one child per row.
#[derive(Debug, Clone)]
pub struct DomRowContainer {
	element: Element,
}

impl DomRowContainer {
	pub fn new(element: Element) -> Self {
		Self { element }
	}

	pub fn element(&self) -> &Element {
		&self.element
	}
}

impl RowContainer for DomRowContainer {
	type Row = DomRow;

	fn clone_last_row(&self) -> Option<DomRow> {
		let last = self.element.last_element_child()?;
		let clone = last
			.clone_node_with_deep(true)
			.inspect_err(|error| error_log!("could not clone formset row: {:?}", error))
			.ok()?;
		clone
			.dyn_into::<Element>()
			.inspect_err(|node| error_log!("cloned formset row is not an element: {:?}", node))
			.ok()
			.map(DomRow::new)
	}

	fn append_row(&mut self, row: DomRow) {
		if let Err(error) = self.element.append_child(&row.element) {
			error_log!("could not append formset row: {:?}", error);
		}
	}
}

/// A detached copy of a formset row.
#[derive(Debug, Clone)]
pub struct DomRow {
	element: Element,
}

impl DomRow {
	pub fn new(element: Element) -> Self {
		Self { element }
	}

	pub fn element(&self) -> &Element {
		&self.element
	}
}

impl FormsetRow for DomRow {
	fn rewrite_indexed_attributes(&mut self, rewrite: &mut dyn FnMut(&str) -> Option<String>) {
		for element in matching_elements(&self.element, INDEXED_SELECTOR) {
			for attribute in INDEXED_ATTRIBUTES {
				if let Some(value) = element.get_attribute(attribute)
					&& let Some(renamed) = rewrite(&value)
				{
					set_attribute(&element, attribute, &renamed);
				}
			}
		}
	}

	fn visit_fields(&mut self, visit: &mut dyn FnMut(&mut dyn RowField)) {
		for element in matching_elements(&self.element, FIELD_SELECTOR) {
			visit(&mut DomField {
				element,
				row: &self.element,
			});
		}
	}

	fn clear_errors(&mut self) -> bool {
		let errors = matching_elements(&self.element, ERROR_LIST_SELECTOR);
		for error in &errors {
			error.remove();
		}
		!errors.is_empty()
	}
}

/// One control inside a [`DomRow`].
struct DomField<'a> {
	element: Element,
	row: &'a Element,
}

impl DomField<'_> {
	fn label(&self) -> Option<Element> {
		let by_id = self
			.element
			.get_attribute("id")
			.and_then(|id| self.row.query_selector(&format!("label[for=\"{}\"]", id)).ok()?);
		by_id.or_else(|| self.row.query_selector("label").ok()?)
	}
}

impl RowField for DomField<'_> {
	fn kind(&self) -> FieldKind {
		if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
			match input.type_().as_str() {
				"hidden" => FieldKind::Hidden,
				"file" => FieldKind::File,
				"checkbox" | "radio" => FieldKind::Checkbox,
				_ => FieldKind::Text,
			}
		} else if self.element.is_instance_of::<HtmlSelectElement>() {
			FieldKind::Select
		} else {
			FieldKind::TextArea
		}
	}

	fn name(&self) -> String {
		self.element.get_attribute("name").unwrap_or_default()
	}

	fn value(&self) -> String {
		control_value(&self.element)
	}

	fn set_value(&mut self, value: &str) {
		// A checkbox submits its value when checked; only `checked` is state.
		if self.kind() == FieldKind::Checkbox {
			return;
		}
		set_control_value(&self.element, value);
	}

	fn set_checked(&mut self, checked: bool) {
		if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
			input.set_checked(checked);
		}
	}

	fn set_label(&mut self, text: &str) {
		match self.label() {
			Some(label) => label.set_text_content(Some(text)),
			None => debug_log!("no label for {}", self.name()),
		}
	}
}

/// The hidden `TOTAL_FORMS` input of a formset.
#[derive(Debug, Clone)]
pub struct DomCounter {
	input: HtmlInputElement,
}

impl DomCounter {
	pub fn new(input: HtmlInputElement) -> Self {
		Self { input }
	}

	/// Finds `#id_{prefix}-TOTAL_FORMS`.
	pub fn find(document: &Document, prefix: &str) -> DomResult<Self> {
		let id = format!("id_{}", ManagementForm::new(prefix).field_name(TOTAL_FORMS));
		let input = element_by_id(document, &id)?
			.dyn_into::<HtmlInputElement>()
			.map_err(|_| DomError::MissingElement(id))?;
		Ok(Self::new(input))
	}
}

impl CounterField for DomCounter {
	fn counter_name(&self) -> String {
		self.input.name()
	}

	fn raw_count(&self) -> String {
		self.input.value()
	}

	fn set_raw_count(&mut self, value: &str) {
		self.input.set_value(value);
	}
}

/// Element ids of one formset on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormsetBinding {
	pub prefix: &'static str,
	pub container_id: &'static str,
	pub button_id: &'static str,
}

/// Listing photos on the listing form.
pub const PHOTO_FORMSET: FormsetBinding = FormsetBinding {
	prefix: "images",
	container_id: "photo-formset",
	button_id: "add-photo-form",
};

/// Phone numbers on the user form.
pub const PHONE_NUMBER_FORMSET: FormsetBinding = FormsetBinding {
	prefix: "phone_numbers",
	container_id: "phone-number-formset",
	button_id: "add-phone-number-form",
};

/// Appends one row to the formset described by `binding`.
pub fn add_formset_row<P: ClearingPolicy>(
	document: &Document,
	binding: FormsetBinding,
	replicator: &FormsetReplicator<P>,
) -> DomResult<usize> {
	let mut container = DomRowContainer::new(element_by_id(document, binding.container_id)?);
	let mut counter = DomCounter::find(document, binding.prefix)?;
	Ok(replicator.add_row(&mut container, &mut counter)?)
}

/// Wires the formset's add button to the replicator.
pub fn install_formset<P: ClearingPolicy + 'static>(
	document: &Document,
	binding: FormsetBinding,
	replicator: FormsetReplicator<P>,
) -> DomResult<()> {
	let button = element_by_id(document, binding.button_id)?;
	element_by_id(document, binding.container_id)?;

	let page = document.clone();
	let on_click = Closure::<dyn FnMut()>::new(move || {
		match add_formset_row(&page, binding, &replicator) {
			Ok(index) => debug_log!("{} row {} added", binding.prefix, index),
			Err(error) => error_log!("could not add {} row: {}", binding.prefix, error),
		}
	});
	button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
	on_click.forget();
	Ok(())
}
