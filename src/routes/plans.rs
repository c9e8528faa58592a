// ABOUTME: Plan activation and cancellation route handlers
// ABOUTME: POST creates the single active plan; DELETE requires the confirmation phrase
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use crate::auth::AuthedUser;
use crate::context::ServerResources;
use crate::errors::AppError;
use crate::services::{CancelPlanRequest, CreatePlanRequest, PlanService};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// Plan lifecycle routes
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create all plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/user-workouts", post(Self::handle_create))
            .route("/user-workouts/cancel", delete(Self::handle_cancel))
            .with_state(resources)
    }

    /// Activate a plan from a template and the caller's lift baselines
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        user: AuthedUser,
        Json(request): Json<CreatePlanRequest>,
    ) -> Result<Response, AppError> {
        let plan = PlanService::new(resources).activate(user.0, request).await?;

        Ok((
            StatusCode::CREATED,
            Json(json!({
                "plan_id": plan.id,
                "start_date": plan.start_date,
            })),
        )
            .into_response())
    }

    /// Cancel the caller's active plan (exact confirmation phrase required)
    async fn handle_cancel(
        State(resources): State<Arc<ServerResources>>,
        user: AuthedUser,
        Json(request): Json<CancelPlanRequest>,
    ) -> Result<Response, AppError> {
        let cancelled_plan_id = PlanService::new(resources).cancel(user.0, request).await?;

        Ok(Json(json!({ "cancelled_plan_id": cancelled_plan_id })).into_response())
    }
}
