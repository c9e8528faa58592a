// ABOUTME: Workout template models describing repeating training cycles
// ABOUTME: Templates, per-day muscle group assignments, and default exercise lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A workout template: a fixed-length repeating training cycle.
///
/// Templates are read-only from this subsystem's perspective; the catalog
/// is seeded out of band and user plans only reference it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub image_url: Option<String>,
    /// Number of distinct day indices before the cycle repeats
    pub cycle_days: i64,
}

/// Muscle group assignment for one day index within a template's cycle.
///
/// A day index with no row is a rest day; absence is meaningful, not an
/// error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDay {
    pub template_id: Uuid,
    /// 1-based position within the cycle
    pub day_index: i64,
    pub muscle_groups: Vec<String>,
}

/// One entry in a template's flat exercise list.
///
/// The list is per-template, not per-day: the same entry participates in
/// every day index whose muscle groups include its group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateExercise {
    pub template_id: Uuid,
    /// Opaque key into the external exercise catalog
    pub exercise_id: String,
    pub muscle_group: String,
    pub sets: i64,
    pub reps: i64,
    pub rest_seconds: i64,
}

/// Parse a stored comma-separated muscle group list
#[must_use]
pub fn parse_muscle_groups(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
