//! Error types for API calls.
//!
//! # Error Handling
//!
//! - [`ApiError::Transport`]: the request never reached the server
//! - [`HttpError`]: the server answered with a non-2xx status
//! - [`DecodeError`]: a 2xx response carried a body that is not JSON
//! - [`InvalidRequestError`]: a request failed validation before sending
//! - [`ApiError::UnexpectedShape`]: a JSON response did not match the type a
//!   façade expected
//! - [`ApiError::Serialize`]: a façade request body could not be encoded
//!
//! # Example
//!
//! ```rust,ignore
//! use pricing_api::{ApiClient, ApiError};
//!
//! match client.get("/inventory", None).await {
//!     Ok(body) => println!("Inventory: {body}"),
//!     Err(ApiError::Http(e)) => println!("API error {}: {}", e.status, e.message),
//!     Err(ApiError::Transport(e)) => println!("Network error: {e}"),
//!     Err(other) => println!("{other}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when the server answers with a non-2xx status.
///
/// The message is the server's `"message"` field when the body is a JSON
/// object carrying one, otherwise `"HTTP {status}: {reason}"`.
///
/// # Example
///
/// ```rust
/// use pricing_api::clients::HttpError;
///
/// let error = HttpError {
///     status: 404,
///     message: "Not found".to_string(),
///     body: Some(serde_json::json!({"message": "Not found"})),
/// };
///
/// assert_eq!(error.to_string(), "Not found");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct HttpError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// Human-readable error message.
    pub message: String,
    /// The parsed JSON error body, when the body was valid JSON.
    pub body: Option<serde_json::Value>,
}

/// Error returned when a successful response body is not valid JSON.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DecodeError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// Generic description of the failure.
    pub message: String,
    /// The undecodable response text.
    pub raw_body: String,
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// A body was attached to a method that does not send one.
    #[error("Cannot send a request body with {method}.")]
    BodyNotAllowed {
        /// The HTTP method that was used.
        method: String,
    },

    /// An extra header name or value cannot be sent over HTTP.
    #[error("Invalid request header '{name}'.")]
    InvalidHeader {
        /// The rejected header name.
        name: String,
    },
}

/// Unified error type for all API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or connection failure; no response was received.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server responded with a failure status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The server responded successfully with an undecodable body.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),

    /// A JSON response did not have the expected shape.
    #[error("Unexpected response from {endpoint}: {source}")]
    UnexpectedShape {
        /// The endpoint that produced the response.
        endpoint: String,
        /// The deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// A request body could not be serialized to JSON.
    #[error("Failed to serialize request body for {endpoint}: {source}")]
    Serialize {
        /// The endpoint the body was meant for.
        endpoint: String,
        /// The serialization failure.
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => Some(e.status),
            Self::Decode(e) => Some(e.status),
            _ => None,
        }
    }

    /// Returns `true` if the request never reached the server.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
