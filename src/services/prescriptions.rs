// ABOUTME: Prescription mutation service - add, replace, delete exercise assignments
// ABOUTME: Ownership-checked; history is never rewritten by prescription edits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use crate::context::ServerResources;
use crate::errors::{AppError, AppResult};
use crate::models::ExercisePrescription;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

const DEFAULT_REST_SECONDS: i64 = 60;

/// Request payload for appending an exercise to the active plan
#[derive(Debug, Clone, Deserialize)]
pub struct AddExerciseRequest {
    pub exercise_id: String,
    pub muscle_group: String,
    pub sets: i64,
    pub reps: i64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default = "default_rest_seconds")]
    pub rest_seconds: i64,
}

fn default_rest_seconds() -> i64 {
    DEFAULT_REST_SECONDS
}

/// Request payload for replacing an existing prescription
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceExerciseRequest {
    pub exercise_id: String,
    pub muscle_group: String,
    pub sets: i64,
    pub reps: i64,
    pub rest_seconds: i64,
}

/// Prescription mutations on the caller's active plan
pub struct PrescriptionService {
    resources: Arc<ServerResources>,
}

impl PrescriptionService {
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Append an exercise to the caller's active plan.
    ///
    /// Always appends; the same catalog exercise may appear twice within
    /// a plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the caller has no active plan,
    /// `InvalidInput` for malformed fields
    pub async fn add(
        &self,
        user_id: Uuid,
        request: AddExerciseRequest,
    ) -> AppResult<ExercisePrescription> {
        validate_targets(&request.exercise_id, &request.muscle_group, request.sets, request.reps)?;
        if request.weight < 0.0 || request.rest_seconds < 0 {
            return Err(AppError::invalid_input(
                "weight and rest_seconds must be non-negative",
            ));
        }

        let database = &self.resources.database;
        let plan = database
            .active_plan(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("active workout plan"))?;

        let prescription = ExercisePrescription {
            id: Uuid::new_v4(),
            plan_id: plan.id,
            exercise_id: request.exercise_id,
            muscle_group: request.muscle_group,
            sets: request.sets,
            reps: request.reps,
            weight: request.weight,
            rest_seconds: request.rest_seconds,
        };

        database.insert_prescription(&prescription).await?;

        info!(
            prescription_id = %prescription.id,
            plan_id = %plan.id,
            exercise_id = %prescription.exercise_id,
            "exercise added to plan"
        );

        Ok(prescription)
    }

    /// Replace a prescription's exercise and targets going forward.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown prescription id,
    /// `PermissionDenied` when it belongs to another user's plan
    pub async fn replace(
        &self,
        user_id: Uuid,
        prescription_id: Uuid,
        request: ReplaceExerciseRequest,
    ) -> AppResult<()> {
        validate_targets(&request.exercise_id, &request.muscle_group, request.sets, request.reps)?;
        if request.rest_seconds < 0 {
            return Err(AppError::invalid_input("rest_seconds must be non-negative"));
        }

        self.check_ownership(user_id, prescription_id).await?;

        self.resources
            .database
            .update_prescription(
                prescription_id,
                &request.exercise_id,
                &request.muscle_group,
                request.sets,
                request.reps,
                request.rest_seconds,
            )
            .await?;

        info!(prescription_id = %prescription_id, "prescription replaced");

        Ok(())
    }

    /// Delete a prescription. Historical set logs are untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown prescription id,
    /// `PermissionDenied` when it belongs to another user's plan
    pub async fn remove(&self, user_id: Uuid, prescription_id: Uuid) -> AppResult<()> {
        self.check_ownership(user_id, prescription_id).await?;

        self.resources
            .database
            .delete_prescription(prescription_id)
            .await?;

        info!(prescription_id = %prescription_id, "prescription deleted");

        Ok(())
    }

    async fn check_ownership(&self, user_id: Uuid, prescription_id: Uuid) -> AppResult<()> {
        let owner = self
            .resources
            .database
            .prescription_owner(prescription_id)
            .await?
            .ok_or_else(|| AppError::not_found("exercise prescription"))?;

        if owner != user_id {
            return Err(AppError::unauthorized(
                "prescription belongs to another user's plan",
            ));
        }

        Ok(())
    }
}

fn validate_targets(
    exercise_id: &str,
    muscle_group: &str,
    sets: i64,
    reps: i64,
) -> AppResult<()> {
    if exercise_id.is_empty() {
        return Err(AppError::missing_field("exercise_id"));
    }
    if muscle_group.is_empty() {
        return Err(AppError::missing_field("muscle_group"));
    }
    if sets < 1 || reps < 1 {
        return Err(AppError::invalid_input("sets and reps must be positive"));
    }
    Ok(())
}
