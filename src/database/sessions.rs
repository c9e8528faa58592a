// ABOUTME: Session and set-log storage - find-or-create sessions, full-replace saves
// ABOUTME: Also serves the month and day history rollup queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use super::templates::parse_uuid;
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{SetEntry, SetLog, WorkoutSession};
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// Parameters for a session save
#[derive(Debug, Clone)]
pub struct SessionSave {
    pub plan_id: Uuid,
    pub session_date: NaiveDate,
    /// Day index resolved at save time, snapshotted on the session row
    pub day_index: i64,
    pub duration_seconds: Option<i64>,
    pub notes: Option<String>,
}

/// One session in a month history rollup
#[derive(Debug, Clone)]
pub struct MonthHistoryRow {
    pub session_date: NaiveDate,
    pub template_name: String,
    pub completed: bool,
    /// Distinct exercise ids with at least one log in the session
    pub exercise_count: i64,
}

/// A full day history: session summary plus its ordered set logs
#[derive(Debug, Clone)]
pub struct DayHistoryRow {
    pub template_name: String,
    pub completed: bool,
    pub duration_seconds: Option<i64>,
    pub notes: Option<String>,
    pub logs: Vec<HistoryLogRow>,
}

/// One set log in a day history, with the owning prescription's muscle
/// group when that prescription still exists
#[derive(Debug, Clone)]
pub struct HistoryLogRow {
    pub exercise_id: String,
    pub muscle_group: Option<String>,
    pub log: SetLog,
}

impl Database {
    /// Create session tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_sessions(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_sessions (
                id TEXT PRIMARY KEY,
                plan_id TEXT NOT NULL REFERENCES user_plans(id),
                session_date DATE NOT NULL,
                day_index INTEGER NOT NULL,
                completed BOOLEAN NOT NULL DEFAULT 0,
                duration_seconds INTEGER,
                notes TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE (plan_id, session_date)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS set_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL REFERENCES workout_sessions(id) ON DELETE CASCADE,
                exercise_id TEXT NOT NULL,
                set_number INTEGER NOT NULL CHECK (set_number > 0),
                weight REAL NOT NULL,
                reps INTEGER NOT NULL,
                effort TEXT NOT NULL DEFAULT 'normal',
                completed BOOLEAN NOT NULL DEFAULT 0,
                notes TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_set_logs_session ON set_logs(session_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_sessions_plan_date
             ON workout_sessions(plan_id, session_date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Find-or-create the session for (plan, date) and replace its logs.
    ///
    /// One transaction: session upsert, delete of all existing logs,
    /// verbatim insert of the submitted entries. A concurrent reader sees
    /// the pre- or post-save state, never a partially replaced one. The
    /// session is marked completed on every save; an empty entry list
    /// clears the logs but keeps the session row.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn save_session(&self, save: &SessionSave, entries: &[SetEntry]) -> AppResult<Uuid> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO workout_sessions
             (id, plan_id, session_date, day_index, completed, duration_seconds, notes)
             VALUES ($1, $2, $3, $4, 1, $5, $6)
             ON CONFLICT (plan_id, session_date) DO UPDATE SET
                 completed = 1,
                 duration_seconds = COALESCE(excluded.duration_seconds, duration_seconds),
                 notes = COALESCE(excluded.notes, notes)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(save.plan_id.to_string())
        .bind(save.session_date)
        .bind(save.day_index)
        .bind(save.duration_seconds)
        .bind(&save.notes)
        .execute(&mut *tx)
        .await?;

        let session_id: String = sqlx::query_scalar(
            "SELECT id FROM workout_sessions WHERE plan_id = $1 AND session_date = $2",
        )
        .bind(save.plan_id.to_string())
        .bind(save.session_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM set_logs WHERE session_id = $1")
            .bind(&session_id)
            .execute(&mut *tx)
            .await?;

        for entry in entries {
            sqlx::query(
                "INSERT INTO set_logs
                 (session_id, exercise_id, set_number, weight, reps, effort, completed, notes)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(&session_id)
            .bind(&entry.exercise_id)
            .bind(entry.set_number)
            .bind(entry.weight)
            .bind(entry.reps)
            .bind(&entry.effort)
            .bind(entry.completed)
            .bind(&entry.notes)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Uuid::parse_str(&session_id)
            .map_err(|e| AppError::database(format!("corrupt session id: {e}")))
    }

    /// The session for (plan, date), if one has been saved
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn session_for_date(
        &self,
        plan_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<WorkoutSession>> {
        let row = sqlx::query(
            "SELECT id, plan_id, session_date, day_index, completed, duration_seconds, notes
             FROM workout_sessions
             WHERE plan_id = $1 AND session_date = $2",
        )
        .bind(plan_id.to_string())
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_session).transpose()
    }

    /// All set logs saved for (plan, date), ordered by exercise and set
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn session_logs(&self, plan_id: Uuid, date: NaiveDate) -> AppResult<Vec<SetLog>> {
        let rows = sqlx::query(
            "SELECT sl.exercise_id, sl.set_number, sl.weight, sl.reps, sl.effort,
                    sl.completed, sl.notes
             FROM set_logs sl
             JOIN workout_sessions ws ON sl.session_id = ws.id
             WHERE ws.plan_id = $1 AND ws.session_date = $2
             ORDER BY sl.exercise_id ASC, sl.set_number ASC",
        )
        .bind(plan_id.to_string())
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_log).collect()
    }

    /// One row per session the user trained in the given month
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn month_history(
        &self,
        user_id: Uuid,
        year: i32,
        month: u32,
    ) -> AppResult<Vec<MonthHistoryRow>> {
        let month_key = format!("{year:04}-{month:02}");

        let rows = sqlx::query(
            "SELECT ws.session_date, wt.name AS template_name, ws.completed,
                    COUNT(DISTINCT sl.exercise_id) AS exercise_count
             FROM workout_sessions ws
             JOIN user_plans up ON ws.plan_id = up.id
             JOIN workout_templates wt ON up.template_id = wt.id
             LEFT JOIN set_logs sl ON sl.session_id = ws.id
             WHERE up.user_id = $1 AND strftime('%Y-%m', ws.session_date) = $2
             GROUP BY ws.id
             ORDER BY ws.session_date ASC",
        )
        .bind(user_id.to_string())
        .bind(month_key)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(MonthHistoryRow {
                    session_date: row.try_get("session_date")?,
                    template_name: row.try_get("template_name")?,
                    completed: row.try_get("completed")?,
                    exercise_count: row.try_get("exercise_count")?,
                })
            })
            .collect()
    }

    /// The full history of one trained date, or `None` when no session
    /// exists for it
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn day_history(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<DayHistoryRow>> {
        let session = sqlx::query(
            "SELECT ws.id, wt.name AS template_name, ws.completed,
                    ws.duration_seconds, ws.notes
             FROM workout_sessions ws
             JOIN user_plans up ON ws.plan_id = up.id
             JOIN workout_templates wt ON up.template_id = wt.id
             WHERE up.user_id = $1 AND ws.session_date = $2
             LIMIT 1",
        )
        .bind(user_id.to_string())
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        let Some(session) = session else {
            return Ok(None);
        };

        let session_id: String = session.try_get("id")?;
        // The muscle group comes from the owning plan's prescription when
        // it still exists; deleted prescriptions leave it unset.
        let log_rows = sqlx::query(
            "SELECT sl.exercise_id, sl.set_number, sl.weight, sl.reps, sl.effort,
                    sl.completed, sl.notes,
                    (SELECT pe.muscle_group FROM plan_exercises pe
                     WHERE pe.plan_id = ws.plan_id AND pe.exercise_id = sl.exercise_id
                     LIMIT 1) AS muscle_group
             FROM set_logs sl
             JOIN workout_sessions ws ON sl.session_id = ws.id
             WHERE sl.session_id = $1
             ORDER BY sl.exercise_id ASC, sl.set_number ASC",
        )
        .bind(&session_id)
        .fetch_all(&self.pool)
        .await?;

        let logs = log_rows
            .iter()
            .map(|row| {
                Ok(HistoryLogRow {
                    exercise_id: row.try_get("exercise_id")?,
                    muscle_group: row.try_get("muscle_group")?,
                    log: row_to_log(row)?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Some(DayHistoryRow {
            template_name: session.try_get("template_name")?,
            completed: session.try_get("completed")?,
            duration_seconds: session.try_get("duration_seconds")?,
            notes: session.try_get("notes")?,
            logs,
        }))
    }
}

fn row_to_session(row: &SqliteRow) -> AppResult<WorkoutSession> {
    Ok(WorkoutSession {
        id: parse_uuid(row, "id")?,
        plan_id: parse_uuid(row, "plan_id")?,
        session_date: row.try_get("session_date")?,
        day_index: row.try_get("day_index")?,
        completed: row.try_get("completed")?,
        duration_seconds: row.try_get("duration_seconds")?,
        notes: row.try_get("notes")?,
    })
}

fn row_to_log(row: &SqliteRow) -> AppResult<SetLog> {
    Ok(SetLog {
        exercise_id: row.try_get("exercise_id")?,
        set_number: row.try_get("set_number")?,
        weight: row.try_get("weight")?,
        reps: row.try_get("reps")?,
        effort: row.try_get("effort")?,
        completed: row.try_get("completed")?,
        notes: row.try_get("notes")?,
    })
}
