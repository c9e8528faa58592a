// ABOUTME: Workout session and per-set log models
// ABOUTME: One session per plan and calendar date; set logs are replaced wholesale on save
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Effort label applied when the client does not supply one
pub const DEFAULT_EFFORT: &str = "normal";

/// The record of a single calendar date's training activity for a plan.
///
/// Unique per (plan, date). The day index is snapshotted at creation from
/// the cycle resolver so history survives later template or plan edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub session_date: NaiveDate,
    pub day_index: i64,
    pub completed: bool,
    pub duration_seconds: Option<i64>,
    pub notes: Option<String>,
}

/// A stored per-set log row belonging to one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetLog {
    pub exercise_id: String,
    /// 1-based, unique within (session, exercise)
    pub set_number: i64,
    pub weight: f64,
    pub reps: i64,
    pub effort: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One submitted set in a session save request.
///
/// Saves are full-replace: the client always submits the complete desired
/// state for the date and these entries are stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetEntry {
    pub exercise_id: String,
    pub set_number: i64,
    pub weight: f64,
    pub reps: i64,
    #[serde(default = "default_effort")]
    pub effort: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_effort() -> String {
    DEFAULT_EFFORT.to_owned()
}
