// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, template seeding, and resource bundle helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project
#![allow(dead_code)]

//! Shared test utilities for `liftcycle`
//!
//! Common setup functions to reduce duplication across integration tests.
//! The seeded test template is a four-day cycle:
//!
//! - day 1: legs
//! - day 2: chest, shoulders
//! - day 3: rest (no row)
//! - day 4: back, biceps, core

use anyhow::Result;
use chrono::NaiveDate;
use liftcycle::{
    config::ServerConfig,
    context::ServerResources,
    database::Database,
    external::{ExerciseCatalog, StaticCatalog},
    models::{ActivePlan, TemplateDay, TemplateExercise, WorkoutTemplate},
    services::{CreatePlanRequest, PlanService},
};
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Cycle length of the seeded test template
pub const TEST_CYCLE_DAYS: i64 = 4;

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    Ok(database)
}

/// Seed the standard four-day test template and return its id
pub async fn seed_template(database: &Database) -> Result<Uuid> {
    let template_id = Uuid::new_v4();

    database
        .insert_template(&WorkoutTemplate {
            id: template_id,
            name: "Strength Base".into(),
            description: Some("four-day test cycle".into()),
            difficulty: Some("beginner".into()),
            image_url: None,
            cycle_days: TEST_CYCLE_DAYS,
        })
        .await?;

    let days = [
        (1, vec!["legs"]),
        (2, vec!["chest", "shoulders"]),
        (4, vec!["back", "biceps", "core"]),
    ];
    for (day_index, groups) in days {
        database
            .insert_template_day(&TemplateDay {
                template_id,
                day_index,
                muscle_groups: groups.into_iter().map(String::from).collect(),
            })
            .await?;
    }

    let exercises = [
        ("squat-001", "legs", 5, 5, 120),
        ("bench-001", "chest", 5, 5, 120),
        ("press-001", "shoulders", 3, 8, 90),
        ("row-001", "back", 4, 6, 90),
        ("curl-001", "biceps", 3, 10, 60),
        ("plank-001", "core", 3, 12, 60),
    ];
    for (exercise_id, muscle_group, sets, reps, rest_seconds) in exercises {
        database
            .insert_template_exercise(&TemplateExercise {
                template_id,
                exercise_id: exercise_id.into(),
                muscle_group: muscle_group.into(),
                sets,
                reps,
                rest_seconds,
            })
            .await?;
    }

    Ok(template_id)
}

/// Catalog double knowing a couple of the seeded exercises
pub fn test_catalog() -> Arc<dyn ExerciseCatalog> {
    Arc::new(
        StaticCatalog::new()
            .with_exercise("squat-001", "barbell squat", "https://img.test/squat.gif")
            .with_exercise("bench-001", "bench press", "https://img.test/bench.gif"),
    )
}

/// Database + seeded template + static catalog, bundled for services
pub async fn create_test_resources() -> Result<(Arc<ServerResources>, Uuid)> {
    let database = create_test_database().await?;
    let template_id = seed_template(&database).await?;
    let resources = Arc::new(ServerResources::new(
        database,
        test_catalog(),
        ServerConfig::default(),
    ));
    Ok((resources, template_id))
}

/// Same bundle with a custom catalog (degradation tests)
pub async fn create_test_resources_with_catalog(
    catalog: Arc<dyn ExerciseCatalog>,
) -> Result<(Arc<ServerResources>, Uuid)> {
    let database = create_test_database().await?;
    let template_id = seed_template(&database).await?;
    let resources = Arc::new(ServerResources::new(
        database,
        catalog,
        ServerConfig::default(),
    ));
    Ok((resources, template_id))
}

/// Activate a plan with the standard 100/80/120 baselines
pub async fn activate_test_plan(
    resources: &Arc<ServerResources>,
    user_id: Uuid,
    template_id: Uuid,
    start_date: NaiveDate,
) -> Result<ActivePlan> {
    let plan = PlanService::new(resources.clone())
        .activate(
            user_id,
            CreatePlanRequest {
                template_id,
                start_date,
                squat_weight: 100.0,
                bench_weight: 80.0,
                deadlift_weight: 120.0,
            },
        )
        .await?;
    Ok(plan)
}

/// Shorthand date constructor
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
