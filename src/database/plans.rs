// ABOUTME: Active plan storage - activation, lookup, and cancellation
// ABOUTME: Single-active-plan invariant enforced by a partial unique index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use super::templates::parse_uuid;
use super::Database;
use crate::errors::AppResult;
use crate::models::{ActivePlan, ExercisePrescription};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create plan tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_plans(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                template_id TEXT NOT NULL REFERENCES workout_templates(id),
                start_date DATE NOT NULL,
                squat_weight REAL NOT NULL,
                bench_weight REAL NOT NULL,
                deadlift_weight REAL NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // One active plan per user. The INSERT itself races on this index,
        // so concurrent activations cannot both succeed.
        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_user_plans_one_active
             ON user_plans(user_id) WHERE is_active = 1",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS plan_exercises (
                id TEXT PRIMARY KEY,
                plan_id TEXT NOT NULL REFERENCES user_plans(id) ON DELETE CASCADE,
                exercise_id TEXT NOT NULL,
                muscle_group TEXT NOT NULL,
                sets INTEGER NOT NULL,
                reps INTEGER NOT NULL,
                weight REAL NOT NULL DEFAULT 0,
                rest_seconds INTEGER NOT NULL DEFAULT 60
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_plan_exercises_plan ON plan_exercises(plan_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_user_plans_user ON user_plans(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a plan and its seeded prescriptions as one transaction.
    ///
    /// A second active plan for the same user hits the partial unique
    /// index and surfaces as a conflict; nothing is written in that case.
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` on an active-plan conflict, or a
    /// database error if any statement fails
    pub async fn create_plan_with_prescriptions(
        &self,
        plan: &ActivePlan,
        prescriptions: &[ExercisePrescription],
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO user_plans
             (id, user_id, template_id, start_date, squat_weight, bench_weight,
              deadlift_weight, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(plan.id.to_string())
        .bind(plan.user_id.to_string())
        .bind(plan.template_id.to_string())
        .bind(plan.start_date)
        .bind(plan.squat_weight)
        .bind(plan.bench_weight)
        .bind(plan.deadlift_weight)
        .bind(plan.is_active)
        .bind(plan.created_at)
        .execute(&mut *tx)
        .await?;

        for prescription in prescriptions {
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
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// The user's active plan, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn active_plan(&self, user_id: Uuid) -> AppResult<Option<ActivePlan>> {
        let row = sqlx::query(
            "SELECT id, user_id, template_id, start_date, squat_weight, bench_weight,
                    deadlift_weight, is_active, created_at
             FROM user_plans
             WHERE user_id = $1 AND is_active = 1
             LIMIT 1",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_plan).transpose()
    }

    /// Deactivate a plan and drop its prescriptions.
    ///
    /// Sessions and set logs are untouched; history stays queryable after
    /// cancellation.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn cancel_plan(&self, plan_id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE user_plans SET is_active = 0 WHERE id = $1")
            .bind(plan_id.to_string())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM plan_exercises WHERE plan_id = $1")
            .bind(plan_id.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

fn row_to_plan(row: &SqliteRow) -> AppResult<ActivePlan> {
    Ok(ActivePlan {
        id: parse_uuid(row, "id")?,
        user_id: parse_uuid(row, "user_id")?,
        template_id: parse_uuid(row, "template_id")?,
        start_date: row.try_get("start_date")?,
        squat_weight: row.try_get("squat_weight")?,
        bench_weight: row.try_get("bench_weight")?,
        deadlift_weight: row.try_get("deadlift_weight")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
    })
}
