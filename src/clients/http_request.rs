//! Request types for the pricing API.
//!
//! This module provides [`ApiRequest`] and its builder, plus the ordered
//! query parameter types used to build request URLs.

use std::collections::BTreeMap;
use std::fmt;

use crate::clients::errors::InvalidRequestError;

/// HTTP methods supported by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for methods that carry a request body.
    #[must_use]
    pub const fn allows_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }

    pub(crate) const fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single query parameter value.
///
/// Scalars serialize as one `key=value` pair; lists serialize as the key
/// repeated once per element (`category=A&category=B`).
#[derive(Clone, Debug, PartialEq)]
pub enum QueryValue {
    /// A string value.
    Text(String),
    /// An integer value.
    Integer(i64),
    /// A floating point value.
    Float(f64),
    /// A boolean, serialized as `true` or `false`.
    Bool(bool),
    /// A list of values, serialized as repeated keys.
    List(Vec<String>),
}

impl QueryValue {
    /// Returns the serialized values for this parameter, one per key
    /// occurrence.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        match self {
            Self::Text(s) => vec![s.clone()],
            Self::Integer(n) => vec![n.to_string()],
            Self::Float(n) => vec![n.to_string()],
            Self::Bool(b) => vec![b.to_string()],
            Self::List(items) => items.clone(),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(String::from).collect())
    }
}

impl From<&[String]> for QueryValue {
    fn from(value: &[String]) -> Self {
        Self::List(value.to_vec())
    }
}

/// Ordered query parameters.
///
/// Keys keep their first insertion position; inserting an existing key
/// replaces its value in place.
///
/// # Example
///
/// ```rust
/// use pricing_api::clients::QueryParams;
///
/// let mut query = QueryParams::new();
/// query.insert("q", "shirt");
/// query.insert("category", vec!["T-Shirts", "Polos"]);
/// query.insert_opt("limit", None::<u32>);
///
/// assert_eq!(query.to_query_string(), "q=shirt&category=T-Shirts&category=Polos");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a parameter, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Inserts a parameter only when a value is present.
    pub fn insert_opt<V: Into<QueryValue>>(
        &mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Returns the value stored for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattens the parameters into `(key, value)` pairs, repeating list keys.
    #[must_use]
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .flat_map(|(key, value)| {
                value
                    .values()
                    .into_iter()
                    .map(move |v| (key.clone(), v))
            })
            .collect()
    }

    /// Serializes the parameters as a URL-encoded query string without the
    /// leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.pairs()
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// A request to be sent to the API.
///
/// Use [`ApiRequest::builder`] to construct requests.
///
/// # Example
///
/// ```rust
/// use pricing_api::clients::{ApiRequest, HttpMethod};
/// use serde_json::json;
///
/// let request = ApiRequest::builder(HttpMethod::Post, "/cart-sessions")
///     .body(json!({"SessionID": "session_1", "IsActive": true}))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.path, "/cart-sessions");
/// ```
#[derive(Clone, Debug)]
pub struct ApiRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The endpoint path, relative to the base URL.
    pub path: String,
    /// Query parameters appended to the URL.
    pub query: QueryParams,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Headers added on top of the client's static headers.
    pub headers: BTreeMap<String, String>,
}

impl ApiRequest {
    /// Creates a new builder for the given method and endpoint path.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> ApiRequestBuilder {
        ApiRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError::BodyNotAllowed`] if a body is set on a
    /// GET or DELETE request.
    pub fn verify(&self) -> Result<(), InvalidRequestError> {
        if self.body.is_some() && !self.method.allows_body() {
            return Err(InvalidRequestError::BodyNotAllowed {
                method: self.method.to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`ApiRequest`].
#[derive(Debug)]
pub struct ApiRequestBuilder {
    method: HttpMethod,
    path: String,
    query: QueryParams,
    body: Option<serde_json::Value>,
    headers: BTreeMap<String, String>,
}

impl ApiRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: None,
            headers: BTreeMap::new(),
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Replaces all query parameters.
    #[must_use]
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Builds the [`ApiRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if the request fails validation.
    pub fn build(self) -> Result<ApiRequest, InvalidRequestError> {
        let request = ApiRequest {
            method: self.method,
            path: self.path,
            query: self.query,
            body: self.body,
            headers: self.headers,
        };
        request.verify()?;
        Ok(request)
    }
}
