//! HTTP client for the pricing API.
//!
//! This module provides the [`ApiClient`] type: a base URL, one shared
//! connection pool, and a uniform request/response/error pipeline used by
//! every façade in [`crate::resources`].

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;

use crate::clients::errors::{ApiError, DecodeError, HttpError, InvalidRequestError};
use crate::clients::http_request::{ApiRequest, HttpMethod, QueryParams};
use crate::clients::http_response::{collect_headers, is_success, parse_body, ApiResponse};
use crate::config::{ApiConfig, BaseUrl};
use crate::error::ConfigError;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

const JSON_CONTENT_TYPE: &str = "application/json";
const DECODE_FAILURE_MESSAGE: &str = "Response body is not valid JSON";

/// HTTP client for the pricing API.
///
/// The client handles:
/// - URL construction from the configured base URL and an endpoint path
/// - Default headers (`Content-Type: application/json`, `User-Agent`, and
///   any static headers from [`ApiConfig`])
/// - Translation of failures into [`ApiError`], logging each one before it
///   is returned
///
/// Failed calls are never retried.
///
/// # Thread Safety
///
/// `ApiClient` is `Clone + Send + Sync`. Clones share one connection pool and
/// one immutable configuration.
///
/// # Example
///
/// ```rust,ignore
/// use pricing_api::{ApiClient, ApiConfig, BaseUrl};
/// use pricing_api::clients::QueryParams;
///
/// let config = ApiConfig::builder().base_url(BaseUrl::local()).build()?;
/// let client = ApiClient::new(config)?;
///
/// let query: QueryParams = [("styleNumber", "PC61")].into_iter().collect();
/// let costs = client.get("/base-item-costs", Some(query)).await?;
/// ```
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    config: Arc<ApiConfig>,
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl ApiClient {
    /// Creates a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a default header cannot be encoded or the
    /// underlying connection cannot be created.
    pub fn new(config: ApiConfig) -> Result<Self, ConfigError> {
        let headers = Self::default_headers(&config)?;

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::HttpClient {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Creates a client for the given base URL with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the underlying connection cannot be created.
    pub fn with_base_url(base_url: BaseUrl) -> Result<Self, ConfigError> {
        Self::new(ApiConfig::builder().base_url(base_url).build()?)
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &BaseUrl {
        self.config.base_url()
    }

    /// Builds the full URL for an endpoint and its query parameters.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pricing_api::{ApiClient, BaseUrl};
    /// use pricing_api::clients::QueryParams;
    ///
    /// let client = ApiClient::with_base_url(BaseUrl::local()).unwrap();
    /// let mut query = QueryParams::new();
    /// query.insert("category", vec!["A", "B"]);
    ///
    /// assert_eq!(
    ///     client.build_url("/products/search", &query),
    ///     "http://localhost:3002/api/products/search?category=A&category=B"
    /// );
    /// ```
    #[must_use]
    pub fn build_url(&self, endpoint: &str, query: &QueryParams) -> String {
        let url = self.base_url().join(endpoint);
        let query_string = query.to_query_string();
        if query_string.is_empty() {
            url
        } else {
            format!("{url}?{query_string}")
        }
    }

    /// Sends a request and returns the parsed JSON body.
    ///
    /// On a 2xx status the parsed body is returned, or an empty JSON object
    /// when the body is empty.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] if no response was received
    /// - [`ApiError::Http`] for a non-2xx status
    /// - [`ApiError::Decode`] if a 2xx body is not valid JSON
    /// - [`ApiError::InvalidRequest`] if a body is given for GET or DELETE
    pub async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        query: Option<QueryParams>,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, ApiError> {
        let request = ApiRequest {
            method,
            path: endpoint.to_string(),
            query: query.unwrap_or_default(),
            body,
            headers: std::collections::BTreeMap::new(),
        };
        self.send(request).await.map(|response| response.body)
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get(
        &self,
        endpoint: &str,
        query: Option<QueryParams>,
    ) -> Result<serde_json::Value, ApiError> {
        self.request(HttpMethod::Get, endpoint, query, None).await
    }

    /// Sends a POST request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post(
        &self,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, ApiError> {
        self.request(HttpMethod::Post, endpoint, None, body).await
    }

    /// Sends a PUT request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn put(
        &self,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, ApiError> {
        self.request(HttpMethod::Put, endpoint, None, body).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete(&self, endpoint: &str) -> Result<serde_json::Value, ApiError> {
        self.request(HttpMethod::Delete, endpoint, None, None).await
    }

    /// Sends a prebuilt request and returns the full response.
    ///
    /// Every failure is logged with the endpoint before it is returned.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`]; additionally returns
    /// [`InvalidRequestError::InvalidHeader`] for an unencodable extra header.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let result = self.execute(&request).await;
        if let Err(error) = &result {
            tracing::error!("API request failed for {}: {}", request.path, error);
        }
        result
    }

    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        request.verify()?;

        let url = self.build_url(&request.path, &request.query);
        tracing::debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.as_reqwest(), &url);
        for (name, value) in &request.headers {
            let (name, value) = encode_header(name, value).ok_or_else(|| {
                InvalidRequestError::InvalidHeader { name: name.clone() }
            })?;
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let res = builder.send().await?;
        let status = res.status();
        let headers = collect_headers(res.headers());
        let text = res.text().await?;

        if !is_success(status.as_u16()) {
            return Err(error_from_response(status, &text).into());
        }

        let body = parse_body(&text).map_err(|_| DecodeError {
            status: status.as_u16(),
            message: DECODE_FAILURE_MESSAGE.to_string(),
            raw_body: text.clone(),
        })?;

        Ok(ApiResponse::new(status.as_u16(), headers, body))
    }

    fn default_headers(config: &ApiConfig) -> Result<HeaderMap, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Caspio Pricing Client v{SDK_VERSION}");

        let mut headers = HeaderMap::new();
        for (name, value) in config.static_headers() {
            let (name, value) =
                encode_header(name, value).ok_or_else(|| ConfigError::InvalidHeader {
                    name: name.clone(),
                    reason: "header cannot be encoded".to_string(),
                })?;
            headers.insert(name, value);
        }

        let user_agent =
            HeaderValue::from_str(&user_agent).map_err(|e| ConfigError::InvalidHeader {
                name: USER_AGENT.to_string(),
                reason: e.to_string(),
            })?;
        headers.insert(USER_AGENT, user_agent);
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        Ok(headers)
    }
}

fn encode_header(name: &str, value: &str) -> Option<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(name.as_bytes()).ok()?;
    let value = HeaderValue::from_str(value).ok()?;
    Some((name, value))
}

/// Translates a non-2xx response into an [`HttpError`].
///
/// The server's `"message"` field wins when the body is a JSON object that
/// carries one. A body that fails to decode is not an error of its own: the
/// message falls back to `"HTTP {status}: {reason}"`.
fn error_from_response(status: StatusCode, text: &str) -> HttpError {
    let body = serde_json::from_str::<serde_json::Value>(text).ok();

    let message = body
        .as_ref()
        .and_then(|b| b.get("message"))
        .and_then(message_text)
        .unwrap_or_else(|| {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            )
        });

    HttpError {
        status: status.as_u16(),
        message,
        body,
    }
}

fn message_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn local_client() -> ApiClient {
        ApiClient::with_base_url(BaseUrl::local()).unwrap()
    }

    #[test]
    fn test_build_url_without_query() {
        let client = local_client();
        assert_eq!(
            client.build_url("/inventory", &QueryParams::new()),
            "http://localhost:3002/api/inventory"
        );
    }

    #[test]
    fn test_build_url_with_query() {
        let client = local_client();
        let query: QueryParams = [("styleNumber", "PC61"), ("color", "Navy")]
            .into_iter()
            .collect();

        assert_eq!(
            client.build_url("/product-details", &query),
            "http://localhost:3002/api/product-details?styleNumber=PC61&color=Navy"
        );
    }

    #[test]
    fn test_build_url_round_trips_list_params() {
        let client = local_client();
        let mut query = QueryParams::new();
        query.insert("q", "tee shirt");
        query.insert("category", vec!["T-Shirts", "Polos & Knits"]);

        let url = reqwest::Url::parse(&client.build_url("/products/search", &query)).unwrap();
        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(decoded, query.pairs());
    }

    #[test]
    fn test_default_headers_include_json_content_type() {
        let config = ApiConfig::builder()
            .header("X-Api-Key", "secret")
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let headers = ApiClient::default_headers(&config).unwrap();

        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get("x-api-key").unwrap(), "secret");
        let user_agent = headers.get(USER_AGENT).unwrap().to_str().unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("Caspio Pricing Client v"));
    }

    #[test]
    fn test_static_header_cannot_replace_content_type() {
        let config = ApiConfig::builder()
            .header("Content-Type", "text/plain")
            .build()
            .unwrap();
        let headers = ApiClient::default_headers(&config).unwrap();

        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_error_uses_server_message() {
        let error = error_from_response(StatusCode::NOT_FOUND, r#"{"message": "Not found"}"#);

        assert_eq!(error.status, 404);
        assert_eq!(error.message, "Not found");
        assert_eq!(error.body, Some(json!({"message": "Not found"})));
    }

    #[test]
    fn test_error_synthesizes_message_for_empty_body() {
        let error = error_from_response(StatusCode::INTERNAL_SERVER_ERROR, "");

        assert_eq!(error.status, 500);
        assert_eq!(error.message, "HTTP 500: Internal Server Error");
        assert!(error.body.is_none());
    }

    #[test]
    fn test_error_falls_back_when_body_is_not_json() {
        let error = error_from_response(StatusCode::BAD_GATEWAY, "<html>upstream</html>");

        assert_eq!(error.message, "HTTP 502: Bad Gateway");
        assert!(error.body.is_none());
    }

    #[test]
    fn test_error_falls_back_when_message_missing() {
        let error = error_from_response(StatusCode::BAD_REQUEST, r#"{"error": "bad"}"#);

        assert_eq!(error.message, "HTTP 400: Bad Request");
        assert_eq!(error.body, Some(json!({"error": "bad"})));
    }

    #[test]
    fn test_error_ignores_message_in_non_object_body() {
        let error = error_from_response(StatusCode::CONFLICT, r#"["message"]"#);
        assert_eq!(error.message, "HTTP 409: Conflict");
    }

    #[test]
    fn test_error_renders_non_string_message() {
        let error = error_from_response(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message": 42}"#);
        assert_eq!(error.message, "42");

        let error = error_from_response(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message": null}"#);
        assert_eq!(error.message, "HTTP 422: Unprocessable Entity");
    }

    #[test]
    fn test_error_for_unknown_status() {
        let status = StatusCode::from_u16(599).unwrap();
        let error = error_from_response(status, "");
        assert_eq!(error.message, "HTTP 599: Unknown Status");
    }

    #[test]
    fn test_client_is_send_sync_and_clone() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<ApiClient>();
    }

    // ===========================================
    // Failure logging
    // ===========================================

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_http_failure_is_logged_with_endpoint_and_message() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/product-details"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
            .mount(&server)
            .await;

        let base_url = BaseUrl::new(format!("{}/api", server.uri())).unwrap();
        let client = ApiClient::with_base_url(base_url).unwrap();
        let result = client.get("/product-details", None).await;

        assert!(result.is_err());
        assert!(logs_contain("API request failed for /product-details"));
        assert!(logs_contain("Not found"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_transport_failure_is_logged() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let base_url = BaseUrl::new(format!("http://127.0.0.1:{port}/api")).unwrap();
        let client = ApiClient::with_base_url(base_url).unwrap();
        let result = client.get("/inventory", None).await;

        assert!(result.is_err());
        assert!(logs_contain("API request failed for /inventory"));
        assert!(logs_contain("Network error"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_rejected_request_is_logged() {
        let client = local_client();
        let result = client
            .request(HttpMethod::Delete, "/artrequests/5", None, Some(json!({})))
            .await;

        assert!(result.is_err());
        assert!(logs_contain("API request failed for /artrequests/5"));
        assert!(logs_contain("Cannot send a request body with DELETE."));
    }
}
