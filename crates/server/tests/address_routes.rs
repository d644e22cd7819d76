use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;

use server::{startup::build_app, AppState};
use service::address::repository::memory::InMemoryAddressRepository;
use service::address::{Address, AddressRepository};
use service::errors::{Result as StorageResult, StorageError};

fn build_memory_app() -> Router {
    build_app(AppState::new(Arc::new(InMemoryAddressRepository::new())))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Vec<u8>)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

async fn seed(app: &Router) -> anyhow::Result<()> {
    let body = json!({"name": "Test Name", "phoneNumber": "1234567890"});
    send(app, "POST", "/addresses", Some(body)).await?;
    Ok(())
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("json body")
}

#[tokio::test]
async fn health_ok() -> anyhow::Result<()> {
    let app = build_memory_app();
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn create_returns_assigned_id() -> anyhow::Result<()> {
    let app = build_memory_app();
    let (status, body) = send(
        &app,
        "POST",
        "/addresses",
        Some(json!({"name": "Test Name", "phoneNumber": "1234567890"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        as_json(&body),
        json!({"id": 1, "name": "Test Name", "phoneNumber": "1234567890"})
    );
    Ok(())
}

#[tokio::test]
async fn list_returns_all_records() -> anyhow::Result<()> {
    let app = build_memory_app();
    let (_, body) = send(&app, "GET", "/addresses", None).await?;
    assert_eq!(as_json(&body), json!([]));

    seed(&app).await?;
    let (status, body) = send(&app, "GET", "/addresses", None).await?;
    assert_eq!(status, StatusCode::OK);
    let body = as_json(&body);
    assert_eq!(body[0]["name"], "Test Name");
    assert_eq!(body[0]["phoneNumber"], "1234567890");
    Ok(())
}

#[tokio::test]
async fn get_missing_is_404() -> anyhow::Result<()> {
    let app = build_memory_app();
    let (status, body) = send(&app, "GET", "/addresses/1", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
    Ok(())
}

#[tokio::test]
async fn update_existing_and_missing() -> anyhow::Result<()> {
    let app = build_memory_app();
    seed(&app).await?;

    let (status, body) = send(
        &app,
        "PUT",
        "/addresses/1",
        Some(json!({"id": 1, "name": "Updated Name", "phoneNumber": "0987654321"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        as_json(&body),
        json!({"id": 1, "name": "Updated Name", "phoneNumber": "0987654321"})
    );

    let (status, _) = send(
        &app,
        "PUT",
        "/addresses/999",
        Some(json!({"name": "Nobody", "phoneNumber": "0"})),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // the miss did not create anything
    let (_, body) = send(&app, "GET", "/addresses", None).await?;
    assert_eq!(as_json(&body).as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn delete_then_delete_again() -> anyhow::Result<()> {
    let app = build_memory_app();
    seed(&app).await?;

    let (status, body) = send(&app, "DELETE", "/addresses/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, _) = send(&app, "GET", "/addresses/1", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/addresses/1", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn legacy_api_prefix_and_field_name() -> anyhow::Result<()> {
    let app = build_memory_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/addresses",
        Some(json!({"name": "Legacy", "phonenumber": "555"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["phoneNumber"], "555");

    let (status, body) = send(&app, "GET", "/addresses/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["name"], "Legacy");
    Ok(())
}

#[tokio::test]
async fn malformed_bodies_are_rejected_before_the_service() -> anyhow::Result<()> {
    let app = build_memory_app();

    let (status, body) = send(&app, "POST", "/addresses", Some(json!({"name": "No phone"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(as_json(&body)["error"], "Validation Error");

    let req = Request::builder()
        .method("POST")
        .uri("/addresses")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/addresses", None).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", "/addresses", None).await?;
    assert_eq!(as_json(&body), json!([]));
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() -> anyhow::Result<()> {
    let app = build_memory_app();
    let (status, _) = send(&app, "GET", "/addresses/abc", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let app = build_memory_app();
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(as_json(&body)["paths"]["/addresses/{id}"].is_object());
    Ok(())
}

struct UnavailableRepository;

#[async_trait]
impl AddressRepository for UnavailableRepository {
    async fn find_all(&self) -> StorageResult<Vec<Address>> {
        Err(StorageError::Unavailable("db down".into()))
    }
    async fn find_by_id(&self, _id: i64) -> StorageResult<Option<Address>> {
        Err(StorageError::Unavailable("db down".into()))
    }
    async fn save(&self, _address: Address) -> StorageResult<Address> {
        Err(StorageError::Unavailable("db down".into()))
    }
    async fn exists_by_id(&self, _id: i64) -> StorageResult<bool> {
        Err(StorageError::Unavailable("db down".into()))
    }
    async fn delete_by_id(&self, _id: i64) -> StorageResult<()> {
        Err(StorageError::Unavailable("db down".into()))
    }
}

#[tokio::test]
async fn storage_failure_is_500() -> anyhow::Result<()> {
    let app = build_app(AppState::new(Arc::new(UnavailableRepository)));

    for (method, uri, body) in [
        ("GET", "/addresses", None),
        ("GET", "/addresses/1", None),
        ("POST", "/addresses", Some(json!({"name": "A", "phoneNumber": "1"}))),
        ("PUT", "/addresses/1", Some(json!({"name": "A", "phoneNumber": "1"}))),
        ("DELETE", "/addresses/1", None),
    ] {
        let (status, resp) = send(&app, method, uri, body).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        let resp = as_json(&resp);
        assert_eq!(resp["error"], "Storage Failure");
        assert_eq!(resp["code"], 2001);
    }
    Ok(())
}
