//! Integration tests for the API client request pipeline.
//!
//! These tests run the client against a local mock server and verify
//! response normalization, error translation and query serialization.

use pricing_api::clients::QueryParams;
use pricing_api::{ApiClient, ApiConfig, ApiError, BaseUrl, HttpMethod, InvalidRequestError};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client pointed at the mock server's `/api` prefix.
fn create_client(server: &MockServer) -> ApiClient {
    let base_url = BaseUrl::new(format!("{}/api", server.uri())).unwrap();
    ApiClient::with_base_url(base_url).unwrap()
}

// ============================================================================
// Successful responses
// ============================================================================

#[tokio::test]
async fn test_2xx_json_body_is_returned_as_is() {
    let server = MockServer::start().await;
    let payload = json!({
        "products": [{"style": "PC61", "colors": ["Navy", "White"]}],
        "facets": {"brand": [{"name": "Port & Company", "count": 12}]}
    });

    Mock::given(method("GET"))
        .and(path("/api/products/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let body = assert_ok!(client.get("/products/search", None).await);

    assert_eq!(body, payload);
}

#[tokio::test]
async fn test_2xx_empty_body_becomes_empty_object() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/artrequests/5"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/artrequests/5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let client = create_client(&server);

    let deleted = assert_ok!(client.delete("/artrequests/5").await);
    assert_eq!(deleted, json!({}));

    let updated = assert_ok!(client.put("/artrequests/5", Some(json!({"Status": "Completed"}))).await);
    assert_eq!(updated, json!({}));
}

#[tokio::test]
async fn test_2xx_invalid_json_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/inventory"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = assert_err!(client.get("/inventory", None).await);

    match error {
        ApiError::Decode(e) => {
            assert_eq!(e.status, 200);
            assert_eq!(e.message, "Response body is not valid JSON");
            assert_eq!(e.raw_body, "<html>maintenance</html>");
        }
        other => panic!("Expected Decode error, got: {other:?}"),
    }
}

// ============================================================================
// Request shape
// ============================================================================

#[tokio::test]
async fn test_requests_send_json_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/pricing-tiers"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let body = assert_ok!(client.get("/pricing-tiers", None).await);

    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    let session = json!({"SessionID": "session_1_2", "UserID": null, "IsActive": true});

    Mock::given(method("POST"))
        .and(path("/api/cart-sessions"))
        .and(body_json(session.clone()))
        .respond_with(ResponseTemplate::new(201).set_body_json(session.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let body = assert_ok!(client.post("/cart-sessions", Some(session.clone())).await);

    assert_eq!(body["SessionID"], json!("session_1_2"));
}

#[tokio::test]
async fn test_static_headers_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/order-dashboard"))
        .and(header("x-api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"summary": {}})))
        .mount(&server)
        .await;

    let config = ApiConfig::builder()
        .base_url(BaseUrl::new(format!("{}/api", server.uri())).unwrap())
        .header("X-Api-Key", "secret")
        .build()
        .unwrap();
    let client = ApiClient::new(config).unwrap();

    assert_ok!(client.get("/order-dashboard", None).await);
}

#[tokio::test]
async fn test_list_query_params_repeat_keys_and_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/search"))
        .and(query_param("category", "T-Shirts"))
        .and(query_param("category", "Polos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let mut query = QueryParams::new();
    query
        .insert("q", "")
        .insert("category", vec!["T-Shirts", "Polos"])
        .insert("sort", "price_asc");

    assert_ok!(client.get("/products/search", Some(query.clone())).await);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let decoded: Vec<(String, String)> = requests[0].url.query_pairs().into_owned().collect();
    assert_eq!(decoded, query.pairs());
    assert_eq!(
        requests[0].url.query(),
        Some("q=&category=T-Shirts&category=Polos&sort=price_asc")
    );
}

#[tokio::test]
async fn test_body_on_get_is_rejected_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = assert_err!(
        client
            .request(HttpMethod::Get, "/inventory", None, Some(json!({"x": 1})))
            .await
    );

    assert!(matches!(
        error,
        ApiError::InvalidRequest(InvalidRequestError::BodyNotAllowed { .. })
    ));
}

// ============================================================================
// Error translation
// ============================================================================

#[tokio::test]
async fn test_404_uses_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/product-details"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = assert_err!(client.get("/product-details", None).await);

    assert_eq!(error.status(), Some(404));
    match error {
        ApiError::Http(e) => {
            assert_eq!(e.status, 404);
            assert_eq!(e.message, "Not found");
            assert_eq!(e.body, Some(json!({"message": "Not found"})));
        }
        other => panic!("Expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_500_empty_body_synthesizes_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/order-odbc"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = assert_err!(client.get("/order-odbc", None).await);

    match error {
        ApiError::Http(e) => {
            assert_eq!(e.status, 500);
            assert_eq!(e.message, "HTTP 500: Internal Server Error");
            assert!(e.body.is_none());
        }
        other => panic!("Expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_500_non_json_body_synthesizes_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/cart-items"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Application Error"))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = assert_err!(client.post("/cart-items", Some(json!({}))).await);

    assert_eq!(error.to_string(), "HTTP 500: Internal Server Error");
}

#[tokio::test]
async fn test_error_without_message_field_keeps_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/embroidery-costs"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "stitchCount required"})))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = assert_err!(client.get("/embroidery-costs", None).await);

    match error {
        ApiError::Http(e) => {
            assert_eq!(e.message, "HTTP 400: Bad Request");
            assert_eq!(e.body, Some(json!({"error": "stitchCount required"})));
        }
        other => panic!("Expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_call_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/inventory"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = assert_err!(client.get("/inventory", None).await);

    assert_eq!(error.status(), Some(503));
    server.verify().await;
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind and release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let base_url = BaseUrl::new(format!("http://127.0.0.1:{port}/api")).unwrap();
    let client = ApiClient::with_base_url(base_url).unwrap();

    let error = assert_err!(client.get("/inventory", None).await);

    assert!(error.is_transport());
    assert_eq!(error.status(), None);
    assert!(error.to_string().starts_with("Network error:"));
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_clones_share_client_across_tasks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/base-item-costs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"S": 3.5, "M": 3.5})))
        .expect(8)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.get("/base-item-costs", None).await })
        })
        .collect();

    for handle in handles {
        let body = assert_ok!(handle.await.unwrap());
        assert_eq!(body["M"], json!(3.5));
    }
}
