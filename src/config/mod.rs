//! Configuration types for the pricing API client.
//!
//! # Overview
//!
//! - [`ApiConfig`]: immutable client settings
//! - [`ApiConfigBuilder`]: a builder for constructing [`ApiConfig`] instances
//! - [`BaseUrl`]: a validated base URL newtype
//!
//! Configuration is captured once when the client is constructed and never
//! mutated afterwards, so a single client can be shared across tasks.
//!
//! # Example
//!
//! ```rust
//! use pricing_api::{ApiConfig, BaseUrl};
//!
//! let config = ApiConfig::builder()
//!     .base_url(BaseUrl::local())
//!     .header("X-Api-Key", "secret")
//!     .user_agent_prefix("PricingDashboard/2.1")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "http://localhost:3002/api");
//! ```

mod newtypes;

pub use newtypes::{BaseUrl, DEFAULT_BASE_URL, LOCAL_BASE_URL};

use std::collections::BTreeMap;

use reqwest::header::{HeaderName, HeaderValue};

use crate::error::ConfigError;

/// Immutable configuration for [`ApiClient`](crate::clients::ApiClient).
#[derive(Clone, Debug)]
pub struct ApiConfig {
    base_url: BaseUrl,
    static_headers: BTreeMap<String, String>,
    user_agent_prefix: Option<String>,
}

impl ApiConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Returns the base URL every endpoint is appended to.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the static headers sent with every request.
    #[must_use]
    pub const fn static_headers(&self) -> &BTreeMap<String, String> {
        &self.static_headers
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::production(),
            static_headers: BTreeMap::new(),
            user_agent_prefix: None,
        }
    }
}

// Verify ApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
};

/// Builder for [`ApiConfig`].
///
/// All fields are optional; the base URL defaults to
/// [`DEFAULT_BASE_URL`](crate::config::DEFAULT_BASE_URL).
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<BaseUrl>,
    static_headers: BTreeMap<String, String>,
    user_agent_prefix: Option<String>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with no fields set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Adds a static header sent with every request, such as an API key.
    ///
    /// Setting the same header twice keeps the last value.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.static_headers.insert(name.into(), value.into());
        self
    }

    /// Sets a prefix for the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ApiConfig`], validating static headers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if a header name or value
    /// cannot be sent over HTTP.
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        for (name, value) in &self.static_headers {
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ConfigError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        }

        Ok(ApiConfig {
            base_url: self.base_url.unwrap_or_default(),
            static_headers: self.static_headers,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
