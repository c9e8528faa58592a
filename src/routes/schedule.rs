// ABOUTME: Schedule view route handlers - today, week window, day detail
// ABOUTME: Every read resolves the day index directly from the plan start date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use crate::auth::AuthedUser;
use crate::context::ServerResources;
use crate::errors::AppError;
use crate::services::ScheduleService;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for the day detail endpoint
#[derive(Deserialize, Default)]
struct DetailQuery {
    #[serde(default)]
    date: Option<NaiveDate>,
}

/// Schedule view routes
pub struct ScheduleRoutes;

impl ScheduleRoutes {
    /// Create all schedule routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workouts/today", get(Self::handle_today))
            .route("/workouts/schedule", get(Self::handle_schedule))
            .route("/workouts/detail", get(Self::handle_detail))
            .with_state(resources)
    }

    /// Today's slot plus the upcoming one
    async fn handle_today(
        State(resources): State<Arc<ServerResources>>,
        user: AuthedUser,
    ) -> Result<Response, AppError> {
        let view = ScheduleService::new(resources).today_view(user.0).await?;
        Ok(Json(view).into_response())
    }

    /// The seven-day window starting today
    async fn handle_schedule(
        State(resources): State<Arc<ServerResources>>,
        user: AuthedUser,
    ) -> Result<Response, AppError> {
        let schedule = ScheduleService::new(resources).week_schedule(user.0).await?;
        Ok(Json(schedule).into_response())
    }

    /// Reconciled day view for one calendar date
    async fn handle_detail(
        State(resources): State<Arc<ServerResources>>,
        user: AuthedUser,
        Query(params): Query<DetailQuery>,
    ) -> Result<Response, AppError> {
        let date = params.date.ok_or_else(|| AppError::missing_field("date"))?;
        let view = ScheduleService::new(resources).day_view(user.0, date).await?;
        Ok(Json(view).into_response())
    }
}
