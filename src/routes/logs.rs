// ABOUTME: Session log save route handler
// ABOUTME: Full-replace write of one date's per-set training logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use crate::auth::AuthedUser;
use crate::context::ServerResources;
use crate::errors::AppError;
use crate::services::{SaveSessionRequest, SessionLogService};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

/// Session log routes
pub struct LogRoutes;

impl LogRoutes {
    /// Create all session log routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workouts/save-log", post(Self::handle_save))
            .with_state(resources)
    }

    /// Replace the saved set logs for one date
    async fn handle_save(
        State(resources): State<Arc<ServerResources>>,
        user: AuthedUser,
        Json(request): Json<SaveSessionRequest>,
    ) -> Result<Response, AppError> {
        let saved = SessionLogService::new(resources).save(user.0, request).await?;
        Ok(Json(saved).into_response())
    }
}
