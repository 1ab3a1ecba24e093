//! HTTP tests against the built-in catalog.
#![allow(clippy::unwrap_used)]

mod common;

use axum::http::StatusCode;
use common::{get, memory_router};
use distant_reading::server::{MISSING_ID_MESSAGE, NOT_FOUND_BODY};

#[tokio::test]
async fn test_home_page() {
    let response = get(memory_router(), "/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.content_type.unwrap().starts_with("text/html"));
    assert!(response.body.starts_with("<h1>Distant Reading Archive</h1>"));
}

#[tokio::test]
async fn test_all_returns_catalog_in_order() {
    let response = get(memory_router(), "/api/v1/resources/books/all").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type.as_deref(), Some("application/json"));
    let ids: Vec<i64> = response.books().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_all_uses_published_field_name() {
    let response = get(memory_router(), "/api/v1/resources/books/all").await;
    let json: serde_json::Value = serde_json::from_str(&response.body).unwrap();

    assert_eq!(json[0]["published"], "1992");
    assert_eq!(json[0]["first_sentence"], "The coldsleep itself was dreamless.");
}

#[tokio::test]
async fn test_id_lookup_returns_single_record() {
    let response = get(memory_router(), "/api/v1/resources/books?id=1").await;

    assert_eq!(response.status, StatusCode::OK);
    let books = response.books();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, 1);
    assert_eq!(books[0].author, "Ursula K. Le Guin");
}

#[tokio::test]
async fn test_unknown_id_is_empty_array() {
    let response = get(memory_router(), "/api/v1/resources/books?id=42").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "[]");
}

#[tokio::test]
async fn test_other_params_are_ignored() {
    let response = get(memory_router(), "/api/v1/resources/books?id=2&author=Nobody").await;

    assert_eq!(response.ids(), vec![2]);
}

#[tokio::test]
async fn test_missing_id_is_plain_text_error() {
    let response = get(memory_router(), "/api/v1/resources/books").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.content_type.unwrap().starts_with("text/plain"));
    assert_eq!(response.body, MISSING_ID_MESSAGE);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let response = get(memory_router(), "/api/v1/resources/books?id=abc").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("must be an integer"));
}

#[tokio::test]
async fn test_unmatched_route_is_fixed_404() {
    let response = get(memory_router(), "/api/v2/anything").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, NOT_FOUND_BODY);
}

#[tokio::test]
async fn test_repeated_id_uses_first_value() {
    let response = get(memory_router(), "/api/v1/resources/books?id=1&id=2").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.ids(), vec![1]);
}
