//! JSON endpoints used by the admin pages.
//!
//! [`ApiClient`] sends the requests built by the [`address`](crate::address),
//! [`locations`](crate::locations) and [`listing`](crate::listing) modules.
//! Requests are only issued from the browser; native builds get stubs that
//! fail with [`ApiError::Request`].

use crate::address::{
	AddressQuery, FillAddressResponse, LocalityUpdate, RealEstateType, VerifyAddressResponse,
	fill_address,
};
use crate::config::PageConfig;
use crate::listing::{SoldStatusResponse, sold_status_url};
use crate::locations::OptionsResponse;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	#[error("Request failed: {0}")]
	Request(String),
	#[error("{url} answered with status {status}")]
	Status { url: String, status: u16 },
	#[error("Failed to decode response: {0}")]
	Decode(String),
	#[error("No CSRF token found on the page")]
	MissingCsrfToken,
	#[error("Failed to encode query: {0}")]
	Encode(#[from] serde_urlencoded::ser::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Decodes a JSON response body.
pub fn decode_json<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
	serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Sends page requests relative to the configured site root.
#[derive(Debug, Clone, Default)]
pub struct ApiClient {
	config: PageConfig,
}

impl ApiClient {
	pub fn new(config: PageConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &PageConfig {
		&self.config
	}

	/// Checks whether a listing already exists at `query`'s address.
	pub async fn verify_address(&self, query: &AddressQuery) -> ApiResult<VerifyAddressResponse> {
		let url = query.url(&self.config)?;
		self.get_json(&url).await
	}

	/// The value the locality select should take for `street`.
	///
	/// A blank street clears the locality without a request. `None` means
	/// the server did not know the street and the select stays as it is.
	pub async fn locality_for_street(&self, street: &str) -> ApiResult<Option<String>> {
		match fill_address(&self.config, street)? {
			LocalityUpdate::Reset => Ok(Some(String::new())),
			LocalityUpdate::Fetch(url) => {
				let response: FillAddressResponse = self.get_json(&url).await?;
				Ok(response.locality_value())
			}
		}
	}

	/// Fetches replacement options for a dependent location select.
	pub async fn load_options<R: OptionsResponse>(&self, url: &str) -> ApiResult<R> {
		self.get_json(url).await
	}

	pub async fn set_status_sold(
		&self,
		listing_id: &str,
		real_estate_type: RealEstateType,
	) -> ApiResult<SoldStatusResponse> {
		let url = sold_status_url(&self.config, listing_id, real_estate_type)?;
		self.post_json(&url).await
	}

	#[cfg(target_arch = "wasm32")]
	async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
		use gloo_net::http::Request;

		let response = Request::get(url)
			.send()
			.await
			.map_err(|e| ApiError::Request(e.to_string()))?;
		read_json(url, response).await
	}

	#[cfg(target_arch = "wasm32")]
	async fn post_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
		use crate::csrf::{CSRF_HEADER_NAME, csrf_token};
		use gloo_net::http::Request;

		let token = csrf_token().ok_or(ApiError::MissingCsrfToken)?;
		let response = Request::post(url)
			.header(CSRF_HEADER_NAME, &token)
			.send()
			.await
			.map_err(|e| ApiError::Request(e.to_string()))?;
		read_json(url, response).await
	}

	#[cfg(not(target_arch = "wasm32"))]
	async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
		Err(unsupported(url))
	}

	#[cfg(not(target_arch = "wasm32"))]
	async fn post_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
		Err(unsupported(url))
	}
}

#[cfg(target_arch = "wasm32")]
async fn read_json<T: DeserializeOwned>(
	url: &str,
	response: gloo_net::http::Response,
) -> ApiResult<T> {
	if !response.ok() {
		return Err(ApiError::Status {
			url: url.to_string(),
			status: response.status(),
		});
	}
	let body = response
		.text()
		.await
		.map_err(|e| ApiError::Decode(e.to_string()))?;
	decode_json(&body)
}

#[cfg(not(target_arch = "wasm32"))]
fn unsupported(url: &str) -> ApiError {
	ApiError::Request(format!("cannot reach {} outside the browser", url))
}
