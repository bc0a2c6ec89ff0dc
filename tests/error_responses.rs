//! Tests to verify API errors return consistent JSON responses.
//!
//! The custom extractors convert Axum's plain text rejections into JSON
//! error bodies; these tests pin that behavior down.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use common::*;

#[tokio::test]
async fn invalid_json_body_returns_json_error() {
    let state = setup_test_state();
    let (_user, token) = {
        let conn = state.db.get().unwrap();
        create_test_user(&conn, "customer@example.com")
    };
    let app = test_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/debit-cards")
                .header("content-type", "application/json")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::from("{ invalid json }"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("application/json"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).expect("Response should be valid JSON");
    assert_eq!(json["error"], "Bad request");
}

#[tokio::test]
async fn non_numeric_path_id_returns_json_error() {
    let state = setup_test_state();
    let (_user, token) = {
        let conn = state.db.get().unwrap();
        create_test_user(&conn, "customer@example.com")
    };
    let app = test_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/debit-cards/not-a-number")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).expect("Response should be valid JSON");
    assert_eq!(json["error"], "Bad request");
}

#[tokio::test]
async fn unauthorized_error_is_json() {
    let state = setup_test_state();
    let app = test_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/debit-cards")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).expect("Response should be valid JSON");
    assert_eq!(json["error"], "Unauthorized");
}
