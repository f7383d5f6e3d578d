//! CSRF token lookup for AJAX mutations
//!
//! Django sets the `csrftoken` cookie on every admin page; state-changing
//! requests echo it back in the `X-CSRFToken` header. When the cookie is
//! `HttpOnly` the token is taken from the form's hidden input instead.

/// The cookie name used by Django for CSRF tokens.
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// The header name used to send CSRF tokens in AJAX requests.
pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";

/// The form field name for CSRF tokens.
pub const CSRF_FORM_FIELD: &str = "csrfmiddlewaretoken";

/// Extracts and percent-decodes one cookie from a `document.cookie` string.
///
/// The cookie string format is: "name1=value1; name2=value2; ..."
///
/// # Examples
///
/// ```
/// use estate_pages::csrf::parse_cookie_value;
///
/// let cookies = "sessionid=abc; csrftoken=a%2Bb";
/// assert_eq!(parse_cookie_value(cookies, "csrftoken"), Some("a+b".to_string()));
/// assert_eq!(parse_cookie_value(cookies, "csrf"), None);
/// ```
pub fn parse_cookie_value(cookie_str: &str, name: &str) -> Option<String> {
	cookie_str
		.split(';')
		.filter_map(|part| part.trim().split_once('='))
		.find(|(key, _)| key.trim() == name)
		.map(|(_, value)| {
			let value = value.trim();
			urlencoding::decode(value)
				.map(|decoded| decoded.into_owned())
				.unwrap_or_else(|_| value.to_string())
		})
}

/// Retrieves the CSRF token from the page, cookie first.
#[cfg(target_arch = "wasm32")]
pub fn csrf_token() -> Option<String> {
	use wasm_bindgen::JsCast;
	use web_sys::{HtmlDocument, HtmlInputElement, window};

	let document = window()?.document()?;

	let from_cookie = document
		.dyn_ref::<HtmlDocument>()
		.and_then(|html| html.cookie().ok())
		.and_then(|cookies| parse_cookie_value(&cookies, CSRF_COOKIE_NAME));
	if from_cookie.is_some() {
		return from_cookie;
	}

	let selector = format!("input[name=\"{}\"]", CSRF_FORM_FIELD);
	let input: HtmlInputElement = document.query_selector(&selector).ok()??.dyn_into().ok()?;
	Some(input.value())
}

/// Retrieves the CSRF token (non-WASM stub).
#[cfg(not(target_arch = "wasm32"))]
pub fn csrf_token() -> Option<String> {
	None
}
