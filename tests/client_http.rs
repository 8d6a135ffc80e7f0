//
//  listmonk-ops
//  tests/client_http.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! End-to-end client tests against a mock listmonk server.

use std::io::Write;

use listmonk_ops::api::common::{CrudResult, ErrorKind};
use listmonk_ops::api::options::CallOptions;
use listmonk_ops::api::transport::FilePart;
use listmonk_ops::config::{Config, ConfigOverrides};
use listmonk_ops::{ApiError, ListmonkClient};
use mockito::{Matcher, Server};
use serde_json::json;

fn client(server: &Server) -> ListmonkClient {
    let config = Config::new(&format!("{}/api", server.url()), "api-admin", "s3cret");
    ListmonkClient::new(config).unwrap()
}

#[tokio::test]
async fn test_token_auth_header_and_flattened_payload() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/lists/4")
        .match_header("authorization", "token api-admin:s3cret")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {"id": 4, "name": "Weekly", "type": "public", "optin": "single"}}"#)
        .create_async()
        .await;

    let result = client(&server)
        .lists()
        .get_by_id(CallOptions::new().id(4))
        .await
        .unwrap();

    mock.assert_async().await;
    let envelope = result.found().unwrap();
    assert_eq!(envelope.data.name, "Weekly");
    assert_eq!(envelope.data.list_type, "public");
    assert_eq!(envelope.response.status, 200);
    assert_eq!(envelope.request.method, "GET");
}

#[tokio::test]
async fn test_get_by_id_not_found_is_data() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/subscribers/99")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Subscriber not found"}"#)
        .create_async()
        .await;

    let result = client(&server)
        .subscribers()
        .get_by_id(CallOptions::new().id(99))
        .await
        .unwrap();

    match result {
        CrudResult::Rejected(rejection) => {
            assert!(rejection.is_not_found());
            assert_eq!(rejection.message, "Subscriber not found");
        }
        CrudResult::Found(_) => panic!("expected a rejection"),
    }
}

#[tokio::test]
async fn test_list_failure_is_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/campaigns")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(404)
        .create_async()
        .await;

    let err = client(&server)
        .campaigns()
        .list(Some(CallOptions::new().query("page", 2)))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/dashboard/counts")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "invalid API credentials"}"#)
        .create_async()
        .await;

    let err = client(&server).dashboard().counts().await.unwrap_err();

    assert!(matches!(err, ApiError::Authentication { .. }));
    assert_eq!(err.to_string(), "invalid API credentials");
}

#[tokio::test]
async fn test_paged_list_is_flattened() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/lists")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": {
                    "results": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}],
                    "total": 3,
                    "page": 1,
                    "per_page": 2
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let page = client(&server).lists().list(None).await.unwrap();

    assert_eq!(page.data.results.len(), 2);
    assert_eq!(page.data.total_pages(), 2);
    assert_eq!(page.data.next_page(), Some(2));
}

#[tokio::test]
async fn test_custom_headers_reach_the_server() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/health")
        .match_header("x-tenant", "acme")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": true}"#)
        .create_async()
        .await;

    let mut headers = std::collections::BTreeMap::new();
    headers.insert("X-Tenant".to_string(), "acme".to_string());
    let config = Config::resolve(ConfigOverrides {
        base_url: Some(format!("{}/api", server.url())),
        token: Some("s3cret".into()),
        headers,
        ..Default::default()
    })
    .unwrap();

    let healthy = ListmonkClient::new(config).unwrap().system().health().await.unwrap();

    mock.assert_async().await;
    assert!(healthy.data);
}

#[tokio::test]
async fn test_media_upload_is_multipart() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/media")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=.+".into()),
        )
        .match_body(Matcher::Regex("filename=\"banner.txt\"".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {"id": 12, "filename": "banner.txt", "url": "/uploads/banner.txt"}}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("banner.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"hello").unwrap();

    let uploaded = client(&server)
        .media()
        .upload(FilePart::from_path(&path).unwrap())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(uploaded.data.id, 12);
    assert_eq!(uploaded.data.filename, "banner.txt");
}
