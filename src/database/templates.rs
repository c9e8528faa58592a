// ABOUTME: Template store queries - read-only workout template catalog
// ABOUTME: Templates, per-day muscle groups, and default exercise lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use super::Database;
use crate::errors::AppResult;
use crate::models::{parse_muscle_groups, TemplateDay, TemplateExercise, WorkoutTemplate};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create template tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_templates(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_templates (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                difficulty TEXT,
                image_url TEXT,
                cycle_days INTEGER NOT NULL CHECK (cycle_days > 0),
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // Muscle groups are stored comma-separated; a missing row for a
        // day index is a rest day.
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_template_days (
                template_id TEXT NOT NULL REFERENCES workout_templates(id) ON DELETE CASCADE,
                day_index INTEGER NOT NULL CHECK (day_index > 0),
                muscle_groups TEXT NOT NULL,
                PRIMARY KEY (template_id, day_index)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_template_exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                template_id TEXT NOT NULL REFERENCES workout_templates(id) ON DELETE CASCADE,
                exercise_id TEXT NOT NULL,
                muscle_group TEXT NOT NULL,
                sets INTEGER NOT NULL,
                reps INTEGER NOT NULL,
                rest_seconds INTEGER NOT NULL DEFAULT 60
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_template_exercises_template
             ON workout_template_exercises(template_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List all workout templates
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_templates(&self) -> AppResult<Vec<WorkoutTemplate>> {
        let rows = sqlx::query(
            "SELECT id, name, description, difficulty, image_url, cycle_days
             FROM workout_templates ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_template).collect()
    }

    /// Fetch one template by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_template(&self, template_id: Uuid) -> AppResult<Option<WorkoutTemplate>> {
        let row = sqlx::query(
            "SELECT id, name, description, difficulty, image_url, cycle_days
             FROM workout_templates WHERE id = $1",
        )
        .bind(template_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_template).transpose()
    }

    /// Muscle groups assigned to one day index; `None` means rest day
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn template_day(
        &self,
        template_id: Uuid,
        day_index: i64,
    ) -> AppResult<Option<TemplateDay>> {
        let row = sqlx::query(
            "SELECT template_id, day_index, muscle_groups
             FROM workout_template_days
             WHERE template_id = $1 AND day_index = $2",
        )
        .bind(template_id.to_string())
        .bind(day_index)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_template_day).transpose()
    }

    /// All assigned days of a template, ordered by day index
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn template_days(&self, template_id: Uuid) -> AppResult<Vec<TemplateDay>> {
        let rows = sqlx::query(
            "SELECT template_id, day_index, muscle_groups
             FROM workout_template_days
             WHERE template_id = $1
             ORDER BY day_index ASC",
        )
        .bind(template_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_template_day).collect()
    }

    /// The template's flat exercise list (per-template, not per-day)
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn template_exercises(&self, template_id: Uuid) -> AppResult<Vec<TemplateExercise>> {
        let rows = sqlx::query(
            "SELECT template_id, exercise_id, muscle_group, sets, reps, rest_seconds
             FROM workout_template_exercises
             WHERE template_id = $1
             ORDER BY id ASC",
        )
        .bind(template_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(TemplateExercise {
                    template_id: parse_uuid(row, "template_id")?,
                    exercise_id: row.try_get("exercise_id")?,
                    muscle_group: row.try_get("muscle_group")?,
                    sets: row.try_get("sets")?,
                    reps: row.try_get("reps")?,
                    rest_seconds: row.try_get("rest_seconds")?,
                })
            })
            .collect()
    }

    /// Insert a template (seeding and tests)
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_template(&self, template: &WorkoutTemplate) -> AppResult<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO workout_templates
             (id, name, description, difficulty, image_url, cycle_days)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(template.id.to_string())
        .bind(&template.name)
        .bind(&template.description)
        .bind(&template.difficulty)
        .bind(&template.image_url)
        .bind(template.cycle_days)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert a template day assignment (seeding and tests)
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_template_day(&self, day: &TemplateDay) -> AppResult<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO workout_template_days
             (template_id, day_index, muscle_groups)
             VALUES ($1, $2, $3)",
        )
        .bind(day.template_id.to_string())
        .bind(day.day_index)
        .bind(day.muscle_groups.join(","))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert a template exercise entry (seeding and tests)
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_template_exercise(&self, exercise: &TemplateExercise) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO workout_template_exercises
             (template_id, exercise_id, muscle_group, sets, reps, rest_seconds)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(exercise.template_id.to_string())
        .bind(&exercise.exercise_id)
        .bind(&exercise.muscle_group)
        .bind(exercise.sets)
        .bind(exercise.reps)
        .bind(exercise.rest_seconds)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn row_to_template(row: &SqliteRow) -> AppResult<WorkoutTemplate> {
    Ok(WorkoutTemplate {
        id: parse_uuid(row, "id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        difficulty: row.try_get("difficulty")?,
        image_url: row.try_get("image_url")?,
        cycle_days: row.try_get("cycle_days")?,
    })
}

fn row_to_template_day(row: &SqliteRow) -> AppResult<TemplateDay> {
    let raw_groups: String = row.try_get("muscle_groups")?;
    Ok(TemplateDay {
        template_id: parse_uuid(row, "template_id")?,
        day_index: row.try_get("day_index")?,
        muscle_groups: parse_muscle_groups(&raw_groups),
    })
}

/// Read a TEXT column holding a UUID
pub(super) fn parse_uuid(row: &SqliteRow, column: &str) -> AppResult<Uuid> {
    let raw: String = row.try_get(column)?;
    Uuid::parse_str(&raw)
        .map_err(|e| crate::errors::AppError::database(format!("corrupt uuid in {column}: {e}")))
}
