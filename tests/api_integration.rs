//! Integration tests for the REST API surface.
#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use loadprofile::api::{AppState, router};

fn make_app() -> axum::Router {
    let config = common::daily_config();
    let profile = common::build(&config);
    router(Arc::new(AppState { config, profile }))
}

#[tokio::test]
async fn profile_endpoint_reports_config_and_stats() {
    let app = make_app();
    let req = Request::builder()
        .uri("/profile")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["date"], "2023-01-01");
    assert_eq!(json["rows"], 24);
    assert_eq!(json["interval"], "hourly");
    assert!(json["stats"]["idle_baseline_kw"].is_number());
}

#[tokio::test]
async fn series_endpoint_returns_every_row() {
    let app = make_app();
    let req = Request::builder()
        .uri("/series")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(json.len(), 24);
    assert_eq!(json[0]["timestamp"], "2023-01-01 00:00");
    assert!(json[0]["loads"]["Total Load"].is_number());
}

#[tokio::test]
async fn series_range_is_inclusive() {
    let app = make_app();
    let req = Request::builder()
        .uri("/series?from=20&to=23")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(json.len(), 4);
    assert_eq!(json[0]["row"], 20);
}

#[tokio::test]
async fn inverted_range_is_a_client_error() {
    let app = make_app();
    let req = Request::builder()
        .uri("/series?from=9&to=2")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
