// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request validation tests for the authenticated API.
//!
//! These run against an offline mock database: every case here must be
//! rejected with 400 before the handler ever touches the store.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use chrono::{Duration, Utc};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

mod common;

fn authed_request(token: &str, method: Method, uri: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap()
}

async fn error_code(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    json["error"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn test_dashboard_rejects_out_of_range_tz_offset() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    // UTC-14:01 does not exist anywhere on Earth
    let response = app
        .oneshot(authed_request(
            &token,
            Method::GET,
            "/api/dashboard?tz_offset_minutes=-841",
            Body::empty(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "bad_request");
}

#[tokio::test]
async fn test_dashboard_rejects_malformed_date() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    let response = app
        .oneshot(authed_request(
            &token,
            Method::GET,
            "/api/dashboard?date=not-a-date",
            Body::empty(),
        ))
        .await
        .unwrap();

    // Query deserialization failure, rejected by the extractor
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_meals_rejects_unknown_meal_type() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    let response = app
        .oneshot(authed_request(
            &token,
            Method::GET,
            "/api/meals?meal_type=brunch",
            Body::empty(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_meals_rejects_out_of_range_tz_offset() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    let response = app
        .oneshot(authed_request(
            &token,
            Method::GET,
            "/api/meals?tz_offset_minutes=100000",
            Body::empty(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_meal_rejects_empty_name() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    let body = json!({
        "name": "",
        "description": "Oats with berries",
        "meal_type": "breakfast",
        "calories": "350",
        "protein_g": "12",
        "carbs_g": "60",
        "fats_g": "8",
        "occurred_at": Utc::now().to_rfc3339(),
    });

    let response = app
        .oneshot(authed_request(
            &token,
            Method::POST,
            "/api/meals",
            Body::from(body.to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_meal_rejects_future_timestamp() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    let body = json!({
        "name": "Time traveler's lunch",
        "description": "Logged from tomorrow",
        "meal_type": "lunch",
        "calories": "500",
        "protein_g": "30",
        "carbs_g": "40",
        "fats_g": "20",
        "occurred_at": (Utc::now() + Duration::hours(2)).to_rfc3339(),
    });

    let response = app
        .oneshot(authed_request(
            &token,
            Method::POST,
            "/api/meals",
            Body::from(body.to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "bad_request");
}

#[tokio::test]
async fn test_create_meal_allows_small_clock_skew() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    // 30 seconds ahead is within the skew grace, so the request passes
    // validation and fails later at the offline store instead.
    let body = json!({
        "name": "Snack",
        "description": "Apple",
        "meal_type": "snack",
        "calories": "95",
        "protein_g": "0.5",
        "carbs_g": "25",
        "fats_g": "0.3",
        "occurred_at": (Utc::now() + Duration::seconds(30)).to_rfc3339(),
    });

    let response = app
        .oneshot(authed_request(
            &token,
            Method::POST,
            "/api/meals",
            Body::from(body.to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(response).await, "database_error");
}

#[tokio::test]
async fn test_put_targets_rejects_negative_values() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    let body = json!({
        "calories": 2000.0,
        "protein_g": -150.0,
        "carbs_g": 200.0,
        "fats_g": 65.0,
    });

    let response = app
        .oneshot(authed_request(
            &token,
            Method::PUT,
            "/api/targets",
            Body::from(body.to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_meal_rejects_malformed_id() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    let response = app
        .oneshot(authed_request(
            &token,
            Method::DELETE,
            "/api/meals/not-a-uuid",
            Body::empty(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_rejects_invalid_email_and_short_password() {
    let (app, _state) = common::create_test_app();

    for body in [
        json!({ "email": "not-an-email", "name": "Sam", "password": "longenough1" }),
        json!({ "email": "sam@example.com", "name": "Sam", "password": "short" }),
    ] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/auth/signup")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
