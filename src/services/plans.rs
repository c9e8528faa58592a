// ABOUTME: Plan activation and cancellation service
// ABOUTME: Seeds prescriptions from the template via the load-derivation rule
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use crate::context::ServerResources;
use crate::cycle;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{ActivePlan, ExercisePrescription};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Exact phrase a client must echo back to cancel its plan. A UX safety
/// gate against accidental taps, not a security control.
pub const CANCEL_CONFIRMATION: &str = "cancel my plan";

/// Request payload for plan activation
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlanRequest {
    pub template_id: Uuid,
    pub start_date: NaiveDate,
    pub squat_weight: f64,
    pub bench_weight: f64,
    pub deadlift_weight: f64,
}

/// Request payload for plan cancellation
#[derive(Debug, Clone, Deserialize)]
pub struct CancelPlanRequest {
    pub confirmation: String,
}

/// Plan activation and cancellation
pub struct PlanService {
    resources: Arc<ServerResources>,
}

impl PlanService {
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Activate a plan for `user_id`, seeding one prescription per
    /// template exercise entry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for non-positive baselines, `NotFound` for
    /// an unknown template, and `ResourceAlreadyExists` when the user
    /// already has an active plan (invariant: at most one)
    pub async fn activate(
        &self,
        user_id: Uuid,
        request: CreatePlanRequest,
    ) -> AppResult<ActivePlan> {
        for (field, value) in [
            ("squat_weight", request.squat_weight),
            ("bench_weight", request.bench_weight),
            ("deadlift_weight", request.deadlift_weight),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(AppError::invalid_input(format!(
                    "{field} must be a positive number"
                )));
            }
        }

        let database = &self.resources.database;
        let template = database
            .get_template(request.template_id)
            .await?
            .ok_or_else(|| AppError::not_found("workout template"))?;

        let plan = ActivePlan::new(
            user_id,
            template.id,
            request.start_date,
            request.squat_weight,
            request.bench_weight,
            request.deadlift_weight,
        );

        let prescriptions: Vec<ExercisePrescription> = database
            .template_exercises(template.id)
            .await?
            .into_iter()
            .map(|exercise| ExercisePrescription {
                id: Uuid::new_v4(),
                plan_id: plan.id,
                weight: cycle::starting_weight(
                    &exercise.muscle_group,
                    request.squat_weight,
                    request.bench_weight,
                    request.deadlift_weight,
                ),
                exercise_id: exercise.exercise_id,
                muscle_group: exercise.muscle_group,
                sets: exercise.sets,
                reps: exercise.reps,
                rest_seconds: exercise.rest_seconds,
            })
            .collect();

        database
            .create_plan_with_prescriptions(&plan, &prescriptions)
            .await
            .map_err(|error| {
                if error.code == ErrorCode::ResourceAlreadyExists {
                    AppError::conflict("an active workout plan already exists for this user")
                } else {
                    error
                }
            })?;

        info!(
            plan_id = %plan.id,
            user_id = %user_id,
            template = %template.name,
            prescriptions = prescriptions.len(),
            "workout plan activated"
        );

        Ok(plan)
    }

    /// Cancel the caller's active plan.
    ///
    /// Deactivates the plan and drops its prescriptions; session history
    /// stays queryable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the confirmation phrase does not match
    /// exactly, `NotFound` when the user has no active plan
    pub async fn cancel(&self, user_id: Uuid, request: CancelPlanRequest) -> AppResult<Uuid> {
        if request.confirmation != CANCEL_CONFIRMATION {
            return Err(AppError::invalid_input(format!(
                "confirmation phrase must be exactly \"{CANCEL_CONFIRMATION}\""
            )));
        }

        let database = &self.resources.database;
        let plan = database
            .active_plan(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("active workout plan"))?;

        database.cancel_plan(plan.id).await?;

        info!(plan_id = %plan.id, user_id = %user_id, "workout plan cancelled");

        Ok(plan.id)
    }
}
