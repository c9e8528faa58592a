// ABOUTME: Domain services - plan activation, scheduling views, session logs, history
// ABOUTME: Route handlers stay thin; all orchestration lives here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

//! Domain services for the scheduling engine

mod history;
mod logs;
mod plans;
mod prescriptions;
mod schedule;

pub use history::{DayHistory, ExerciseHistory, HistoryService, HistorySet, MonthEntry};
pub use logs::{SaveSessionRequest, SaveSessionResponse, SessionLogService};
pub use plans::{CancelPlanRequest, CreatePlanRequest, PlanService, CANCEL_CONFIRMATION};
pub use prescriptions::{AddExerciseRequest, PrescriptionService, ReplaceExerciseRequest};
pub use schedule::{DaySlot, DayView, ExerciseView, ScheduleService, TodayView, WeekSchedule};

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::external::{ExerciseCatalog, ExerciseInfo};
use crate::models::{ActivePlan, WorkoutTemplate};
use futures_util::future::join_all;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use uuid::Uuid;

/// The caller's active plan together with its template.
///
/// A plan referencing a vanished template is a broken store, not a user
/// error.
pub(crate) async fn active_plan_with_template(
    database: &Database,
    user_id: Uuid,
) -> AppResult<(ActivePlan, WorkoutTemplate)> {
    let plan = database
        .active_plan(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("active workout plan"))?;

    let template = database
        .get_template(plan.template_id)
        .await?
        .ok_or_else(|| AppError::database("active plan references a missing template"))?;

    Ok((plan, template))
}

/// Fetch catalog metadata for a set of exercise ids concurrently.
///
/// Lookups are independent and read-only, so they fan out. A failed or
/// timed-out lookup degrades that exercise's display fields to empty; it
/// never fails the whole request.
pub(crate) async fn fetch_exercise_info(
    catalog: &Arc<dyn ExerciseCatalog>,
    ids: impl IntoIterator<Item = String>,
) -> HashMap<String, ExerciseInfo> {
    let unique: BTreeSet<String> = ids.into_iter().collect();

    let lookups = unique.into_iter().map(|id| {
        let catalog = Arc::clone(catalog);
        async move {
            let result = catalog.exercise_info(&id).await;
            (id, result)
        }
    });

    let mut found = HashMap::new();
    for (id, result) in join_all(lookups).await {
        match result {
            Ok(info) => {
                found.insert(id, info);
            }
            Err(error) => {
                tracing::warn!(exercise_id = %id, %error, "exercise metadata lookup failed");
            }
        }
    }
    found
}
