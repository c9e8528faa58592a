// ABOUTME: Active plan and exercise prescription models
// ABOUTME: A user's single active training plan and its mutable exercise assignments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's training plan instantiated from a workout template.
///
/// At most one plan per user may be active at a time; the storage layer
/// enforces this with a partial unique index, so concurrent activations
/// race in the database rather than in application code. The elapsed-day
/// count is always derived from `start_date`, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivePlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub template_id: Uuid,
    /// Calendar date the cycle starts on (no time component)
    pub start_date: NaiveDate,
    /// One-rep-max baselines used to derive starting loads
    pub squat_weight: f64,
    pub bench_weight: f64,
    pub deadlift_weight: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ActivePlan {
    /// Build a fresh active plan for `user_id`
    #[must_use]
    pub fn new(
        user_id: Uuid,
        template_id: Uuid,
        start_date: NaiveDate,
        squat_weight: f64,
        bench_weight: f64,
        deadlift_weight: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            template_id,
            start_date,
            squat_weight,
            bench_weight,
            deadlift_weight,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// A concrete, mutable exercise assignment owned by a plan.
///
/// Seeded in bulk at plan activation from the template's exercise list and
/// independently editable afterwards. Deleting or replacing a prescription
/// never rewrites historical set logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExercisePrescription {
    pub id: Uuid,
    pub plan_id: Uuid,
    /// Opaque key into the external exercise catalog
    pub exercise_id: String,
    pub muscle_group: String,
    pub sets: i64,
    pub reps: i64,
    pub weight: f64,
    pub rest_seconds: i64,
}
