// ABOUTME: History aggregation - monthly rollups and single-day session detail
// ABOUTME: Read-only over committed sessions; survives plan cancellation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use super::fetch_exercise_info;
use crate::context::ServerResources;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// One session in the month rollup
#[derive(Debug, Serialize)]
pub struct MonthEntry {
    pub name: String,
    pub completed: bool,
    pub exercise_count: i64,
}

/// One set within a day history exercise
#[derive(Debug, Serialize)]
pub struct HistorySet {
    pub set_number: i64,
    pub weight: f64,
    pub reps: i64,
    pub effort: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One exercise in a day history, sets ordered by set number
#[derive(Debug, Serialize)]
pub struct ExerciseHistory {
    pub exercise_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub sets: Vec<HistorySet>,
}

/// Full detail of one trained date
#[derive(Debug, Serialize)]
pub struct DayHistory {
    pub name: String,
    pub completed: bool,
    pub duration_seconds: Option<i64>,
    pub notes: Option<String>,
    pub exercises: Vec<ExerciseHistory>,
}

/// Read-only history rollups
pub struct HistoryService {
    resources: Arc<ServerResources>,
}

impl HistoryService {
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Month rollup: one entry per trained date, keyed `YYYY-MM-DD`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an out-of-range month
    pub async fn month(
        &self,
        user_id: Uuid,
        year: i32,
        month: u32,
    ) -> AppResult<BTreeMap<String, MonthEntry>> {
        if !(1..=12).contains(&month) {
            return Err(AppError::invalid_input(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }

        let rows = self
            .resources
            .database
            .month_history(user_id, year, month)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    row.session_date.format("%Y-%m-%d").to_string(),
                    MonthEntry {
                        name: row.template_name,
                        completed: row.completed,
                        exercise_count: row.exercise_count,
                    },
                )
            })
            .collect())
    }

    /// Full detail of one trained date, enriched with catalog metadata
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no session exists for the date
    pub async fn day(&self, user_id: Uuid, date: NaiveDate) -> AppResult<DayHistory> {
        let row = self
            .resources
            .database
            .day_history(user_id, date)
            .await?
            .ok_or_else(|| AppError::not_found("workout session"))?;

        // Logs arrive ordered by (exercise, set number); group them while
        // keeping that order.
        let mut grouped: BTreeMap<String, ExerciseHistory> = BTreeMap::new();
        for log_row in row.logs {
            let entry = grouped
                .entry(log_row.exercise_id.clone())
                .or_insert_with(|| ExerciseHistory {
                    exercise_id: log_row.exercise_id.clone(),
                    muscle_group: log_row.muscle_group.clone(),
                    name: None,
                    image: None,
                    sets: Vec::new(),
                });
            entry.sets.push(HistorySet {
                set_number: log_row.log.set_number,
                weight: log_row.log.weight,
                reps: log_row.log.reps,
                effort: log_row.log.effort,
                completed: log_row.log.completed,
                notes: log_row.log.notes,
            });
        }

        let catalog_info =
            fetch_exercise_info(&self.resources.catalog, grouped.keys().cloned()).await;

        let exercises = grouped
            .into_values()
            .map(|mut exercise| {
                if let Some(info) = catalog_info.get(&exercise.exercise_id) {
                    exercise.name = Some(info.name.clone());
                    exercise.image = Some(info.image.clone());
                }
                exercise
            })
            .collect();

        Ok(DayHistory {
            name: row.template_name,
            completed: row.completed,
            duration_seconds: row.duration_seconds,
            notes: row.notes,
            exercises,
        })
    }
}
