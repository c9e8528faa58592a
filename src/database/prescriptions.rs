// ABOUTME: Prescription store queries - a plan's mutable exercise assignments
// ABOUTME: Append, replace, and delete with plan-ownership lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use super::templates::parse_uuid;
use super::Database;
use crate::errors::AppResult;
use crate::models::ExercisePrescription;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Append a prescription to a plan.
    ///
    /// No uniqueness constraint on exercise id within a plan; a muscle
    /// group may list the same catalog exercise twice.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_prescription(
        &self,
        prescription: &ExercisePrescription,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO plan_exercises
             (id, plan_id, exercise_id, muscle_group, sets, reps, weight, rest_seconds)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(prescription.id.to_string())
        .bind(prescription.plan_id.to_string())
        .bind(&prescription.exercise_id)
        .bind(&prescription.muscle_group)
        .bind(prescription.sets)
        .bind(prescription.reps)
        .bind(prescription.weight)
        .bind(prescription.rest_seconds)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// All prescriptions of a plan, in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn prescriptions_for_plan(
        &self,
        plan_id: Uuid,
    ) -> AppResult<Vec<ExercisePrescription>> {
        let rows = sqlx::query(
            "SELECT id, plan_id, exercise_id, muscle_group, sets, reps, weight, rest_seconds
             FROM plan_exercises
             WHERE plan_id = $1
             ORDER BY rowid ASC",
        )
        .bind(plan_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_prescription).collect()
    }

    /// The user owning the plan a prescription belongs to, if the row exists
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn prescription_owner(&self, prescription_id: Uuid) -> AppResult<Option<Uuid>> {
        let row = sqlx::query(
            "SELECT up.user_id
             FROM plan_exercises pe
             JOIN user_plans up ON pe.plan_id = up.id
             WHERE pe.id = $1",
        )
        .bind(prescription_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(|r| parse_uuid(r, "user_id")).transpose()
    }

    /// Replace a prescription's exercise and targets going forward.
    ///
    /// Prior session history is never rewritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_prescription(
        &self,
        prescription_id: Uuid,
        exercise_id: &str,
        muscle_group: &str,
        sets: i64,
        reps: i64,
        rest_seconds: i64,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE plan_exercises
             SET exercise_id = $2, muscle_group = $3, sets = $4, reps = $5, rest_seconds = $6
             WHERE id = $1",
        )
        .bind(prescription_id.to_string())
        .bind(exercise_id)
        .bind(muscle_group)
        .bind(sets)
        .bind(reps)
        .bind(rest_seconds)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete a prescription. Historical set logs are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_prescription(&self, prescription_id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM plan_exercises WHERE id = $1")
            .bind(prescription_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

pub(super) fn row_to_prescription(row: &SqliteRow) -> AppResult<ExercisePrescription> {
    Ok(ExercisePrescription {
        id: parse_uuid(row, "id")?,
        plan_id: parse_uuid(row, "plan_id")?,
        exercise_id: row.try_get("exercise_id")?,
        muscle_group: row.try_get("muscle_group")?,
        sets: row.try_get("sets")?,
        reps: row.try_get("reps")?,
        weight: row.try_get("weight")?,
        rest_seconds: row.try_get("rest_seconds")?,
    })
}
