// ABOUTME: History rollup route handlers - month calendar and day detail
// ABOUTME: Read-only aggregation over committed sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use crate::auth::AuthedUser;
use crate::context::ServerResources;
use crate::errors::AppError;
use crate::services::HistoryService;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for the month history endpoint
#[derive(Deserialize, Default)]
struct MonthQuery {
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    month: Option<u32>,
}

/// History routes
pub struct HistoryRoutes;

impl HistoryRoutes {
    /// Create all history routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workouts/history", get(Self::handle_month))
            .route("/workouts/history/:date", get(Self::handle_day))
            .with_state(resources)
    }

    /// Month rollup keyed by date
    async fn handle_month(
        State(resources): State<Arc<ServerResources>>,
        user: AuthedUser,
        Query(params): Query<MonthQuery>,
    ) -> Result<Response, AppError> {
        let year = params.year.ok_or_else(|| AppError::missing_field("year"))?;
        let month = params.month.ok_or_else(|| AppError::missing_field("month"))?;

        let rollup = HistoryService::new(resources).month(user.0, year, month).await?;
        Ok(Json(rollup).into_response())
    }

    /// Full detail of one trained date
    async fn handle_day(
        State(resources): State<Arc<ServerResources>>,
        user: AuthedUser,
        Path(date): Path<String>,
    ) -> Result<Response, AppError> {
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| AppError::invalid_input("date must be formatted YYYY-MM-DD"))?;

        let detail = HistoryService::new(resources).day(user.0, date).await?;
        Ok(Json(detail).into_response())
    }
}
