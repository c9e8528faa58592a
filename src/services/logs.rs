// ABOUTME: Session save service - full-replace writes of a date's set logs
// ABOUTME: Clients submit the complete desired state; last write wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use super::active_plan_with_template;
use crate::context::ServerResources;
use crate::cycle;
use crate::database::SessionSave;
use crate::errors::{AppError, AppResult};
use crate::models::SetEntry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Request payload for a session save
#[derive(Debug, Clone, Deserialize)]
pub struct SaveSessionRequest {
    pub date: NaiveDate,
    #[serde(default)]
    pub duration_seconds: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    /// The complete desired per-set state for the date. An empty list is
    /// valid and clears the session's logs.
    pub exercises: Vec<SetEntry>,
}

/// Result of a session save
#[derive(Debug, Serialize)]
pub struct SaveSessionResponse {
    pub session_id: Uuid,
    pub day_index: i64,
    pub set_count: usize,
}

/// Full-replace session log writes
pub struct SessionLogService {
    resources: Arc<ServerResources>,
}

impl SessionLogService {
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Save the complete set-log state for one date.
    ///
    /// Finds or creates the (plan, date) session, snapshots the resolved
    /// day index on creation, and replaces all of the session's logs with
    /// the submitted entries in one transaction. The entries are stored
    /// verbatim; nothing is cross-checked against the current
    /// prescriptions. The session is marked completed on every save.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` without an active plan, `InvalidInput` for a
    /// date before the plan start or a non-positive set number
    pub async fn save(
        &self,
        user_id: Uuid,
        request: SaveSessionRequest,
    ) -> AppResult<SaveSessionResponse> {
        for entry in &request.exercises {
            if entry.set_number < 1 {
                return Err(AppError::invalid_input(format!(
                    "set_number must be positive, got {} for exercise {}",
                    entry.set_number, entry.exercise_id
                )));
            }
        }

        let (plan, template) =
            active_plan_with_template(&self.resources.database, user_id).await?;

        let day_index = cycle::resolve_day(plan.start_date, template.cycle_days, request.date)?;

        let save = SessionSave {
            plan_id: plan.id,
            session_date: request.date,
            day_index,
            duration_seconds: request.duration_seconds,
            notes: request.notes,
        };

        let session_id = self
            .resources
            .database
            .save_session(&save, &request.exercises)
            .await?;

        info!(
            session_id = %session_id,
            plan_id = %plan.id,
            date = %request.date,
            sets = request.exercises.len(),
            "session logs saved"
        );

        Ok(SaveSessionResponse {
            session_id,
            day_index,
            set_count: request.exercises.len(),
        })
    }
}
