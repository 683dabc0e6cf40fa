use std::time::Duration;

use filedepot::{Error, FileDepot, HttpFileDepotClient};
use serde_json::json;
use wiremock::matchers::{any, body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "message": "OK",
        "data": data,
    }))
}

fn item(id: &str, file_name: &str, size: u64) -> serde_json::Value {
    json!({
        "id": id,
        "fileName": file_name,
        "size": size,
        "contentType": "text/plain",
        "createdAt": "2026-10-18T09:00:00",
        "updatedAt": "2026-10-18T09:00:00",
    })
}

async fn setup() -> (MockServer, HttpFileDepotClient) {
    let server = MockServer::start().await;
    let client = HttpFileDepotClient::new(server.uri()).unwrap();
    (server, client)
}

/// Fails the test on drop if any request reaches the server.
async fn forbid_requests(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_prepare_upload() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/files/prepare-upload"))
        .respond_with(ok(json!({
            "id": "3f2b9c1e-0000-4000-8000-000000000001",
            "uploadUrl": "http://minio:9000/depot/3f2b?X-Amz-Algorithm=AWS4-HMAC-SHA256",
            "expirySeconds": 900,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let prepared = client.prepare_upload().await.unwrap();
    assert_eq!(prepared.id, "3f2b9c1e-0000-4000-8000-000000000001");
    assert!(prepared.upload_url.contains("X-Amz-Algorithm"));
    assert_eq!(prepared.expiry_seconds, 900);
}

#[tokio::test]
async fn test_confirm_upload_sends_id_and_file_name() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/files/confirm-upload"))
        .and(body_json(json!({"id": "f-1", "fileName": "notes.txt"})))
        .respond_with(ok(item("f-1", "notes.txt", 42)))
        .expect(1)
        .mount(&server)
        .await;

    let confirmed = client.confirm_upload("f-1", Some("notes.txt")).await.unwrap();
    assert_eq!(confirmed.id, "f-1");
    assert_eq!(confirmed.file_name, "notes.txt");
    assert_eq!(confirmed.size, 42);
}

#[tokio::test]
async fn test_confirm_upload_without_file_name() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/files/confirm-upload"))
        .and(body_json(json!({"id": "f-2", "fileName": null})))
        .respond_with(ok(item("f-2", "f-2", 3)))
        .expect(1)
        .mount(&server)
        .await;

    let confirmed = client.confirm_upload("f-2", None).await.unwrap();
    assert_eq!(confirmed.file_name, "f-2");
}

#[tokio::test]
async fn test_get_file_metadata_without_content() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/files/f-1"))
        .and(query_param_is_missing("withContent"))
        .respond_with(ok(item("f-1", "notes.txt", 42)))
        .expect(1)
        .mount(&server)
        .await;

    let metadata = client.get_file_metadata("f-1", false).await.unwrap();
    assert_eq!(metadata.id, "f-1");
    assert_eq!(metadata.content, None);
    assert_eq!(metadata.content_type.as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn test_get_file_metadata_with_content() {
    let (server, client) = setup().await;
    let mut body = item("f-1", "notes.txt", 11);
    body["content"] = json!("hello world");
    Mock::given(method("GET"))
        .and(path("/api/files/f-1"))
        .and(query_param("withContent", "true"))
        .respond_with(ok(body))
        .expect(1)
        .mount(&server)
        .await;

    let metadata = client.get_file_metadata("f-1", true).await.unwrap();
    assert_eq!(metadata.content.as_deref(), Some("hello world"));
}

#[tokio::test]
async fn test_get_download_url() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/files/f-1/download-url"))
        .respond_with(ok(json!({
            "downloadUrl": "http://minio:9000/depot/f-1?X-Amz-Algorithm=AWS4-HMAC-SHA256",
            "expirySeconds": 300,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let target = client.get_download_url("f-1").await.unwrap();
    assert!(target.download_url.ends_with("X-Amz-Algorithm=AWS4-HMAC-SHA256"));
    assert_eq!(target.expiry_seconds, 300);
}

#[tokio::test]
async fn test_delete_files_posts_id_array() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/files/delete"))
        .and(body_json(json!(["f-1", "f-2"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "deleted",
            "data": null,
        })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .delete_files(&["f-1".to_owned(), "f-2".to_owned()])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_download_batch_returns_raw_bytes() {
    let (server, client) = setup().await;
    let zip = b"PK\x03\x04fake-zip-content".to_vec();
    Mock::given(method("POST"))
        .and(path("/api/files/download/batch"))
        .and(body_json(json!({"ids": ["f-1", "f-2"]})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/zip")
                .set_body_bytes(zip.clone()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let bytes = client
        .download_batch(&["f-1".to_owned(), "f-2".to_owned()])
        .await
        .unwrap();
    assert_eq!(bytes, zip);
}

#[tokio::test]
async fn test_download_batch_failure_envelope() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/files/download/batch"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "message": "File not found: f-9",
        })))
        .mount(&server)
        .await;

    let err = client.download_batch(&["f-9".to_owned()]).await.unwrap_err();
    assert!(err.is_server());
    assert_eq!(err.to_string(), "File not found: f-9");
}

#[tokio::test]
async fn test_get_chunks_with_embedding() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/files/f-1/chunks"))
        .and(query_param("withEmbedding", "true"))
        .respond_with(ok(json!([
            {"index": 0, "content": "first part", "embedding": [0.25, 0.5]},
            {"index": 1, "content": "second part", "embedding": [0.75, 1.0]},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let chunks = client.get_chunks("f-1", true).await.unwrap();
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[1].content, "second part");
    assert_eq!(chunks[0].embedding, Some(vec![0.25, 0.5]));
}

#[tokio::test]
async fn test_get_chunks_without_embedding() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/files/f-1/chunks"))
        .and(query_param_is_missing("withEmbedding"))
        .respond_with(ok(json!([{"index": 0, "content": "only part"}])))
        .expect(1)
        .mount(&server)
        .await;

    let chunks = client.get_chunks("f-1", false).await.unwrap();
    assert_eq!(chunks[0].embedding, None);
}

#[tokio::test]
async fn test_success_false_becomes_server_error() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/files/non-existent-uuid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "File not found: non-existent-uuid",
            "data": null,
        })))
        .mount(&server)
        .await;

    match client.get_file_metadata("non-existent-uuid", false).await {
        Err(Error::Server(e)) => {
            assert_eq!(e.message(), "File not found: non-existent-uuid");
            assert_eq!(e.code(), None);
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_with_envelope_keeps_code() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/files/f-1/download-url"))
        .respond_with(ResponseTemplate::new(410).set_body_json(json!({
            "success": false,
            "code": "FILE_DELETED",
            "message": "File was deleted",
        })))
        .mount(&server)
        .await;

    let err = client.get_download_url("f-1").await.unwrap_err();
    assert!(err.is_server());
    assert_eq!(err.to_string(), "[FILE_DELETED] File was deleted");
}

#[tokio::test]
async fn test_error_status_without_envelope_is_client_error() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/files/prepare-upload"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>Internal Server Error</html>"))
        .mount(&server)
        .await;

    let err = client.prepare_upload().await.unwrap_err();
    assert!(err.is_client());
    assert!(err.to_string().starts_with("unexpected: "));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_malformed_json_is_client_error() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/files/prepare-upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"success\": tru"))
        .mount(&server)
        .await;

    let err = client.prepare_upload().await.unwrap_err();
    assert!(err.is_client());
}

#[tokio::test]
async fn test_empty_body_is_server_error() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/files/prepare-upload"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client.prepare_upload().await.unwrap_err();
    assert!(err.is_server());
    assert_eq!(err.to_string(), "No response from server");
}

#[tokio::test]
async fn test_success_without_data_is_server_error() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/files/f-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let err = client.get_file_metadata("f-1", false).await.unwrap_err();
    assert!(err.is_server());
    assert_eq!(err.to_string(), "No data in response");
}

#[tokio::test]
async fn test_timeout_is_client_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files/f-1/download-url"))
        .respond_with(
            ok(json!({"downloadUrl": "http://x", "expirySeconds": 1}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = HttpFileDepotClient::builder(server.uri())
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let err = client.get_download_url("f-1").await.unwrap_err();
    assert!(err.is_client());
}

#[tokio::test]
async fn test_connection_refused_is_client_error() {
    // Nothing listens on port 1
    let client = HttpFileDepotClient::new("http://127.0.0.1:1").unwrap();
    let err = client.prepare_upload().await.unwrap_err();
    assert!(err.is_client());
    assert!(err.to_string().starts_with("unexpected: "));
}

#[tokio::test]
async fn test_blank_ids_never_reach_the_network() {
    let (server, client) = setup().await;
    forbid_requests(&server).await;

    for blank in ["", "   "] {
        let results = [
            client.confirm_upload(blank, Some("a.txt")).await.map(|_| ()),
            client.get_file_metadata(blank, false).await.map(|_| ()),
            client.get_download_url(blank).await.map(|_| ()),
            client.get_chunks(blank, true).await.map(|_| ()),
        ];
        for result in results {
            let err = result.unwrap_err();
            assert!(err.is_invalid_argument());
            assert_eq!(err.to_string(), "id must not be null or blank");
        }
    }
}

#[tokio::test]
async fn test_dot_segment_ids_never_reach_another_endpoint() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/files/download-url"))
        .respond_with(ok(json!({"downloadUrl": "http://elsewhere", "expirySeconds": 1})))
        .expect(0)
        .mount(&server)
        .await;
    forbid_requests(&server).await;

    for dots in [".", ".."] {
        let results = [
            client.get_download_url(dots).await.map(|_| ()),
            client.get_file_metadata(dots, true).await.map(|_| ()),
            client.get_chunks(dots, false).await.map(|_| ()),
        ];
        for result in results {
            let err = result.unwrap_err();
            assert!(err.is_invalid_argument());
            assert_eq!(err.to_string(), "id must not be a relative path segment");
        }
    }
}

#[tokio::test]
async fn test_bad_id_lists_never_reach_the_network() {
    let (server, client) = setup().await;
    forbid_requests(&server).await;

    let err = client.delete_files(&[]).await.unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(err.to_string(), "ids must not be null or empty");

    let err = client.download_batch(&[]).await.unwrap_err();
    assert_eq!(err.to_string(), "ids must not be null or empty");

    let ids = vec!["valid-id".to_owned(), "  ".to_owned()];
    let err = client.delete_files(&ids).await.unwrap_err();
    assert_eq!(err.to_string(), "ids[1] must not be null or blank");
    let err = client.download_batch(&ids).await.unwrap_err();
    assert_eq!(err.to_string(), "ids[1] must not be null or blank");
}

#[tokio::test]
async fn test_long_file_name_never_reaches_the_network() {
    let (server, client) = setup().await;
    forbid_requests(&server).await;

    let long_name = "a".repeat(256);
    let err = client
        .confirm_upload("valid-id", Some(&long_name))
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("fileName"));
}

#[tokio::test]
async fn test_file_name_at_limit_is_accepted() {
    let (server, client) = setup().await;
    let name = "b".repeat(255);
    Mock::given(method("POST"))
        .and(path("/api/files/confirm-upload"))
        .respond_with(ok(item("f-3", &name, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let confirmed = client.confirm_upload("f-3", Some(&name)).await.unwrap();
    assert_eq!(confirmed.file_name.chars().count(), 255);
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/depot/api/files/f-1/chunks"))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpFileDepotClient::new(format!("{}/depot/", server.uri())).unwrap();
    assert!(client.get_chunks("f-1", false).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_usable_as_trait_object() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/files/prepare-upload"))
        .respond_with(ok(json!({"id": "f-4", "uploadUrl": "http://x", "expirySeconds": 60})))
        .mount(&server)
        .await;

    let depot: Box<dyn FileDepot> = Box::new(client);
    assert_eq!(depot.prepare_upload().await.unwrap().id, "f-4");
}
