//! Validated newtypes for client configuration.

use std::fmt;

use crate::error::ConfigError;

/// Production endpoint of the pricing proxy API.
pub const DEFAULT_BASE_URL: &str = "https://caspio-pricing-proxy-ab30a049961a.herokuapp.com/api";

/// Endpoint of a locally running pricing proxy, for development.
pub const LOCAL_BASE_URL: &str = "http://localhost:3002/api";

/// A validated base URL that every endpoint path is appended to.
///
/// The URL must use the `http` or `https` scheme and name a host. Any
/// trailing slashes are removed so that endpoint paths (which start with
/// `/`) can be appended directly.
///
/// # Example
///
/// ```rust
/// use pricing_api::BaseUrl;
///
/// let url = BaseUrl::new("http://localhost:3002/api/").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:3002/api");
/// assert_eq!(url.scheme(), "http");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the scheme is not `http`
    /// or `https`, the host is missing, or the URL carries a query string
    /// or fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let url = raw.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidBaseUrl { url: raw.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let remainder = &url[scheme_end + 3..];
        let host_end = remainder.find([':', '/']).unwrap_or(remainder.len());
        if remainder[..host_end].is_empty() || remainder.contains(['?', '#', ' ']) {
            return Err(invalid());
        }

        Ok(Self { url, scheme_end })
    }

    /// Returns the production base URL.
    #[must_use]
    pub fn production() -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            scheme_end: 5,
        }
    }

    /// Returns the base URL of a local development server.
    #[must_use]
    pub fn local() -> Self {
        Self {
            url: LOCAL_BASE_URL.to_string(),
            scheme_end: 4,
        }
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Joins an endpoint path onto this base URL.
    ///
    /// A missing leading `/` on the endpoint is added.
    #[must_use]
    pub fn join(&self, endpoint: &str) -> String {
        if endpoint.is_empty() || endpoint.starts_with('/') {
            format!("{}{endpoint}", self.url)
        } else {
            format!("{}/{endpoint}", self.url)
        }
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self::production()
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
