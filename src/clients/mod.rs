//! HTTP client layer for the pricing API.
//!
//! # Overview
//!
//! - [`ApiClient`]: the async client every façade calls into
//! - [`ApiRequest`]: a request to be sent to the API
//! - [`ApiResponse`]: a successful, parsed response
//! - [`QueryParams`] / [`QueryValue`]: ordered, URL-encoded query parameters
//! - [`ApiError`]: the single error type returned by every call
//!
//! # Example
//!
//! ```rust,ignore
//! use pricing_api::clients::{ApiClient, QueryParams};
//! use pricing_api::BaseUrl;
//!
//! let client = ApiClient::with_base_url(BaseUrl::local())?;
//!
//! let mut query = QueryParams::new();
//! query.insert("q", "polo").insert("category", vec!["Polos", "T-Shirts"]);
//!
//! let results = client.get("/products/search", Some(query)).await?;
//! println!("{}", results["products"]);
//! ```
//!
//! # Error Behavior
//!
//! Calls are never retried. A failed call is logged once and returned to
//! the caller immediately.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{ApiError, DecodeError, HttpError, InvalidRequestError};
pub use http_client::{ApiClient, SDK_VERSION};
pub use http_request::{ApiRequest, ApiRequestBuilder, HttpMethod, QueryParams, QueryValue};
pub use http_response::ApiResponse;
