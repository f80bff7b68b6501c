//! Integration tests for the reference data API.
//!
//! These tests load `tests/fixtures/ket_qua.json` and drive the router
//! in-process; no network access is needed.

use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use dvhc_api::api::{create_router, AppState};
use dvhc_api::dataset::ReferenceData;
use dvhc_api::error::DatasetError;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/ket_qua.json")
}

fn fixture_json() -> Value {
    let raw = std::fs::read_to_string(fixture_path()).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn app() -> Router {
    let data = ReferenceData::load(fixture_path()).unwrap();
    create_router(AppState::new(data))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[test]
fn fixture_loads() {
    let data = ReferenceData::load(fixture_path()).unwrap();

    assert_eq!(data.len(), 3);
    assert_eq!(data.commune_count(), 3);
}

#[test]
fn missing_file_fails_to_load() {
    let err = ReferenceData::load("does/not/exist/ket_qua.json").unwrap_err();
    assert!(matches!(err, DatasetError::Read { .. }));
}

#[tokio::test]
async fn tinh_matches_dataset_order() {
    let (status, body) = get_json(app(), "/tinh").await;

    let expected: Vec<Value> = fixture_json()
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["tinh"].clone())
        .collect();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(expected));
}

#[tokio::test]
async fn xa_for_numeric_code() {
    let (status, body) = get_json(app(), "/xa/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, fixture_json()[0]["xa"]);
}

#[tokio::test]
async fn xa_for_zero_padded_text_code_is_unreachable() {
    // "04" never equals the string form of an integer path parameter.
    let (status, body) = get_json(app(), "/xa/4").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn xa_for_province_without_communes() {
    let (status, body) = get_json(app(), "/xa/79").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn full_matches_file() {
    let (status, body) = get_json(app(), "/full").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, fixture_json());
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = app()
        .oneshot(Request::builder().uri("/tinh/1").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
