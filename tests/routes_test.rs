// ABOUTME: HTTP-level tests driving the assembled router end to end
// ABOUTME: Gateway header auth, status codes, and the JSON error envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

mod common;

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use common::create_test_resources;
use liftcycle::server;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn json_request(method: &str, uri: &str, user_id: Uuid, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-user-id", user_id.to_string())
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_is_open() -> Result<()> {
    let (resources, _template_id) = create_test_resources().await?;
    let app = server::router(resources);

    let response = app
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    assert_eq!(body["status"], "healthy");

    Ok(())
}

#[tokio::test]
async fn test_missing_user_header_is_unauthorized() -> Result<()> {
    let (resources, _template_id) = create_test_resources().await?;
    let app = server::router(resources);

    let response = app
        .oneshot(
            Request::get("/api/workouts/today")
                .body(Body::empty())
                .unwrap(),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await?;
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");

    Ok(())
}

#[tokio::test]
async fn test_malformed_user_header_is_unauthorized() -> Result<()> {
    let (resources, _template_id) = create_test_resources().await?;
    let app = server::router(resources);

    let response = app
        .oneshot(
            Request::get("/api/workouts/today")
                .header("x-user-id", "not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await?;
    assert_eq!(body["error"]["code"], "AUTH_INVALID");

    Ok(())
}

#[tokio::test]
async fn test_template_listing() -> Result<()> {
    let (resources, template_id) = create_test_resources().await?;
    let app = server::router(resources);

    let response = app
        .oneshot(Request::get("/api/workouts").body(Body::empty()).unwrap())
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    let templates = body["templates"].as_array().unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0]["id"], template_id.to_string());
    assert_eq!(templates[0]["cycle_days"], 4);

    Ok(())
}

#[tokio::test]
async fn test_full_plan_lifecycle_over_http() -> Result<()> {
    let (resources, template_id) = create_test_resources().await?;
    let app = server::router(resources);
    let user_id = Uuid::new_v4();

    // Activate
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/user-workouts",
            user_id,
            json!({
                "template_id": template_id,
                "start_date": "2025-03-01",
                "squat_weight": 100.0,
                "bench_weight": 80.0,
                "deadlift_weight": 120.0,
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    // A second activation conflicts
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/user-workouts",
            user_id,
            json!({
                "template_id": template_id,
                "start_date": "2025-03-01",
                "squat_weight": 100.0,
                "bench_weight": 80.0,
                "deadlift_weight": 120.0,
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await?;
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");

    // Day detail for a chest day
    let response = app
        .clone()
        .oneshot(
            Request::get("/api/workouts/detail?date=2025-03-02")
                .header("x-user-id", user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["day_index"], 2);
    assert!(body["exercises"]["chest"].is_array());

    // Missing date parameter is an explicit 400
    let response = app
        .clone()
        .oneshot(
            Request::get("/api/workouts/detail")
                .header("x-user-id", user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Save a session
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/workouts/save-log",
            user_id,
            json!({
                "date": "2025-03-02",
                "duration_seconds": 3000,
                "exercises": [
                    {"exercise_id": "bench-001", "set_number": 1, "weight": 50.0,
                     "reps": 5, "completed": true},
                ],
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["day_index"], 2);
    assert_eq!(body["set_count"], 1);

    // History reflects the save
    let response = app
        .clone()
        .oneshot(
            Request::get("/api/workouts/history?year=2025&month=3")
                .header("x-user-id", user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["2025-03-02"]["exercise_count"], 1);

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/workouts/history/2025-03-02")
                .header("x-user-id", user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    // Cancellation needs the exact phrase
    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            "/api/user-workouts/cancel",
            user_id,
            json!({"confirmation": "yes please"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            "/api/user-workouts/cancel",
            user_id,
            json!({"confirmation": "cancel my plan"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    // After cancellation the schedule views report no active plan
    let response = app
        .oneshot(
            Request::get("/api/workouts/today")
                .header("x-user-id", user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_history_requires_year_and_month() -> Result<()> {
    let (resources, _template_id) = create_test_resources().await?;
    let app = server::router(resources);

    let response = app
        .oneshot(
            Request::get("/api/workouts/history?year=2025")
                .header("x-user-id", Uuid::new_v4().to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await?;
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");

    Ok(())
}
