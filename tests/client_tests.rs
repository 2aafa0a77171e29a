//! Integration tests for the networking client.
//!
//! These tests run the full pipeline against a local mock server using the
//! default reqwest transport.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use networking::clients::{ContentEntry, HttpMethod, HttpRequest};
use networking::{HttpError, NetworkClient, NetworkConfig};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Product {
    id: u64,
    title: String,
}

/// Creates a client whose token provider yields `token-1`, `token-2`, ...
fn create_client(notifier_calls: Option<Arc<AtomicUsize>>) -> NetworkClient {
    let config = NetworkConfig::builder()
        .retry_delay(Duration::from_millis(10))
        .build()
        .unwrap();
    let tokens = Arc::new(AtomicUsize::new(0));

    let mut builder = NetworkClient::builder()
        .config(config)
        .token_provider(move || format!("token-{}", tokens.fetch_add(1, Ordering::SeqCst) + 1));
    if let Some(calls) = notifier_calls {
        builder = builder.on_unauthorized(move || {
            calls.fetch_add(1, Ordering::SeqCst);
        });
    }
    builder.build().unwrap()
}

fn url(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{route}", server.uri())).unwrap()
}

// ============================================================================
// JSON calls
// ============================================================================

#[tokio::test]
async fn test_get_sends_json_and_bearer_headers() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/1"))
        .and(header("Accept", "application/json"))
        .and(header("Authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1,
            "title": "Shirt"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(None);
    let product: Product = client.get(url(&mock_server, "/products/1"), true).await.unwrap();

    assert_eq!(
        product,
        Product {
            id: 1,
            title: "Shirt".to_string()
        }
    );
}

#[tokio::test]
async fn test_post_serializes_payload() {
    let mock_server = MockServer::start().await;
    let payload = Product {
        id: 2,
        title: "Hat".to_string(),
    };
    Mock::given(method("POST"))
        .and(path("/products"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(&payload))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(None);
    let created: Product = client
        .post(url(&mock_server, "/products"), &payload, false)
        .await
        .unwrap();

    assert_eq!(created, payload);
}

#[tokio::test]
async fn test_patch_and_put_use_their_verbs() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/products/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/products/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(None);
    let body = serde_json::json!({"title": "Renamed"});

    let _: serde_json::Value = client
        .patch(url(&mock_server, "/products/3"), &body, true)
        .await
        .unwrap();
    let (): () = client
        .put(url(&mock_server, "/products/3"), &body, true)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_perform_overrides_method() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/raw"))
        .and(header("X-Custom", "value"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[1,2]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(None);
    let request = HttpRequest::builder(HttpMethod::Get, url(&mock_server, "/raw"))
        .header("X-Custom", "value")
        .build();

    let numbers: Vec<u8> = client.perform(request, HttpMethod::Put).await.unwrap();
    assert_eq!(numbers, vec![1, 2]);
}

// ============================================================================
// Failure mapping
// ============================================================================

#[tokio::test]
async fn test_server_error_is_rejection() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(Some(Arc::new(AtomicUsize::new(0))));
    let result = client.get::<Product>(url(&mock_server, "/x"), true).await;

    assert!(matches!(
        result,
        Err(HttpError::ServerRejection { code: 500 })
    ));
}

#[tokio::test]
async fn test_malformed_body_is_decode_mismatch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": "#))
        .mount(&mock_server)
        .await;

    let client = create_client(None);
    let result = client.get::<Product>(url(&mock_server, "/x"), false).await;

    assert!(matches!(result, Err(HttpError::DecodeMismatch { .. })));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let mock_server = MockServer::start().await;
    let target = url(&mock_server, "/gone");
    drop(mock_server);

    let client = create_client(Some(Arc::new(AtomicUsize::new(0))));
    let result = client.get::<Product>(target, true).await;

    assert!(matches!(result, Err(HttpError::Transport(_))));
}

// ============================================================================
// Retry on 401
// ============================================================================

#[tokio::test]
async fn test_unauthorized_then_success_retries_with_fresh_token() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("Authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(header("Authorization", "Bearer token-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 9,
            "title": "Retried"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let notified = Arc::new(AtomicUsize::new(0));
    let client = create_client(Some(Arc::clone(&notified)));

    let product: Product = client.get(url(&mock_server, "/me"), true).await.unwrap();

    assert_eq!(product.title, "Retried");
    assert_eq!(notified.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_two_unauthorized_responses_stop_after_one_retry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&mock_server)
        .await;

    let notified = Arc::new(AtomicUsize::new(0));
    let client = create_client(Some(Arc::clone(&notified)));

    let result = client.get::<Product>(url(&mock_server, "/me"), true).await;

    assert!(matches!(
        result,
        Err(HttpError::ServerRejection { code: 401 })
    ));
    assert_eq!(notified.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unauthorized_without_notifier_is_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(None);
    let result = client.get::<Product>(url(&mock_server, "/me"), true).await;

    assert!(matches!(
        result,
        Err(HttpError::ServerRejection { code: 401 })
    ));
}

// ============================================================================
// Uploads
// ============================================================================

#[tokio::test]
async fn test_upload_image_sends_multipart_form() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/avatar"))
        .and(header("Authorization", "Bearer token-1"))
        .and(body_string_contains(
            "Content-Disposition: form-data; name=\"files\"; filename=\"me.jpg\"",
        ))
        .and(body_string_contains("Content-Type: image/jpg"))
        .and(body_string_contains(
            "Content-Disposition: form-data; name=\"caption\"",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": 4, "title": "me"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(None);
    let product: Product = client
        .upload_image(
            url(&mock_server, "/avatar"),
            &[("caption".to_string(), "hi".to_string())],
            vec![("me.jpg".to_string(), b"jpegbytes".to_vec())],
        )
        .await
        .unwrap();

    assert_eq!(product.id, 4);
}

#[tokio::test]
async fn test_patch_signature_image_uses_patch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/signature"))
        .and(body_string_contains("filename=\"sig.jpg\""))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(None);
    let _: serde_json::Value = client
        .patch_signature_image(
            url(&mock_server, "/signature"),
            &[],
            vec![("sig.jpg".to_string(), b"ink".to_vec())],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_upload_multipart_content_reads_file_and_sets_length() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"video-frames").unwrap();

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/videos"))
        .and(body_string_contains("filename=\"clip.mp4\""))
        .and(body_string_contains("Content-Type: video/mp4"))
        .and(body_string_contains("video-frames"))
        .and(body_string_contains("name=\"title\""))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": 5, "title": "clip"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(None);
    let product: Product = client
        .upload_multipart_content(
            url(&mock_server, "/videos"),
            &[("title".to_string(), "clip".to_string())],
            vec![ContentEntry::new("clip.mp4", "video/mp4", file.path())],
        )
        .await
        .unwrap();

    assert_eq!(product.title, "clip");

    let received = mock_server.received_requests().await.unwrap();
    let announced = received[0]
        .headers
        .iter()
        .find(|(name, _)| name.as_str().eq_ignore_ascii_case("content-length"))
        .map(|(_, values)| values.last().as_str().to_string());
    assert_eq!(announced, Some(received[0].body.len().to_string()));
    assert!(received[0].body.len() > "video-frames".len());
}

#[tokio::test]
async fn test_upload_multipart_content_missing_file_sends_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = create_client(None);
    let result = client
        .upload_multipart_content::<serde_json::Value>(
            url(&mock_server, "/videos"),
            &[],
            vec![ContentEntry::new(
                "missing.mp4",
                "video/mp4",
                dir.path().join("missing.mp4"),
            )],
        )
        .await;

    assert!(matches!(result, Err(HttpError::ContentSource { .. })));
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_concurrent_calls_each_resolve_once() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": 1, "title": "a"}"#))
        .expect(8)
        .mount(&mock_server)
        .await;

    let client = Arc::new(create_client(None));
    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = Arc::clone(&client);
        let target = url(&mock_server, "/p");
        handles.push(tokio::spawn(async move {
            client.get::<Product>(target, true).await
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
}
