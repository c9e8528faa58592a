// ABOUTME: Template catalog route handlers
// ABOUTME: Read-only listing of available workout templates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use crate::context::ServerResources;
use crate::errors::AppError;
use crate::models::WorkoutTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct ListTemplatesResponse {
    templates: Vec<WorkoutTemplate>,
}

/// Template catalog routes
pub struct TemplateRoutes;

impl TemplateRoutes {
    /// Create all template routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workouts", get(Self::handle_list))
            .with_state(resources)
    }

    /// List all workout templates
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let templates = resources.database.list_templates().await?;
        Ok(Json(ListTemplatesResponse { templates }).into_response())
    }
}
