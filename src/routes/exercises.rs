// ABOUTME: Prescription mutation route handlers
// ABOUTME: Add, replace, and delete exercises on the caller's active plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use crate::auth::AuthedUser;
use crate::context::ServerResources;
use crate::errors::AppError;
use crate::services::{AddExerciseRequest, PrescriptionService, ReplaceExerciseRequest};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, post, put},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

/// Prescription mutation routes
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all prescription routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workouts/exercise", post(Self::handle_add))
            .route("/workouts/exercise/:id", put(Self::handle_replace))
            .route("/workouts/exercise/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Append an exercise to the caller's active plan
    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        user: AuthedUser,
        Json(request): Json<AddExerciseRequest>,
    ) -> Result<Response, AppError> {
        let prescription = PrescriptionService::new(resources)
            .add(user.0, request)
            .await?;

        Ok((StatusCode::CREATED, Json(prescription)).into_response())
    }

    /// Replace a prescription's exercise and targets
    async fn handle_replace(
        State(resources): State<Arc<ServerResources>>,
        user: AuthedUser,
        Path(prescription_id): Path<Uuid>,
        Json(request): Json<ReplaceExerciseRequest>,
    ) -> Result<Response, AppError> {
        PrescriptionService::new(resources)
            .replace(user.0, prescription_id, request)
            .await?;

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Delete a prescription
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        user: AuthedUser,
        Path(prescription_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        PrescriptionService::new(resources)
            .remove(user.0, prescription_id)
            .await?;

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
