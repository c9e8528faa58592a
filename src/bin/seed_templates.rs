// ABOUTME: Seeds the workout template catalog with demo training cycles
// ABOUTME: Idempotent - reuses fixed template ids so reruns update in place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

//! Seed demo workout templates.
//!
//! The engine treats templates as a read-only catalog; this binary
//! populates it for local development and demos.

use anyhow::Result;
use liftcycle::{
    config::ServerConfig,
    database::Database,
    logging,
    models::{TemplateDay, TemplateExercise, WorkoutTemplate},
};
use tracing::info;
use uuid::Uuid;

const STRENGTH_BASE_ID: &str = "5f1c9d2e-8a41-4b6f-9d3a-1e2f3a4b5c6d";
const PUSH_PULL_LEGS_ID: &str = "7a2b4c6d-1e3f-4a5b-8c7d-9e0f1a2b3c4d";

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env()?;

    let config = ServerConfig::from_env()?;
    let database = Database::new(&config.database_url).await?;

    seed_strength_base(&database).await?;
    seed_push_pull_legs(&database).await?;

    info!("template catalog seeded");
    Ok(())
}

async fn seed_strength_base(database: &Database) -> Result<()> {
    let id = Uuid::parse_str(STRENGTH_BASE_ID)?;

    database
        .insert_template(&WorkoutTemplate {
            id,
            name: "Strength Base".into(),
            description: Some("Four-day cycle building the three main lifts".into()),
            difficulty: Some("beginner".into()),
            image_url: None,
            cycle_days: 4,
        })
        .await?;

    let days = [
        (1, vec!["legs"]),
        (2, vec!["chest", "shoulders"]),
        // day 3 is a rest day: no row
        (4, vec!["back", "biceps"]),
    ];
    for (day_index, groups) in days {
        database
            .insert_template_day(&TemplateDay {
                template_id: id,
                day_index,
                muscle_groups: groups.into_iter().map(String::from).collect(),
            })
            .await?;
    }

    // Replace the exercise list wholesale so reruns stay idempotent
    sqlx::query("DELETE FROM workout_template_exercises WHERE template_id = $1")
        .bind(id.to_string())
        .execute(database.pool())
        .await?;

    let exercises = [
        ("0043", "legs", 5, 5, 180),
        ("0032", "legs", 3, 8, 120),
        ("0025", "chest", 5, 5, 180),
        ("0178", "shoulders", 3, 8, 120),
        ("0652", "back", 4, 6, 150),
        ("0294", "biceps", 3, 10, 90),
    ];
    for (exercise_id, muscle_group, sets, reps, rest_seconds) in exercises {
        database
            .insert_template_exercise(&TemplateExercise {
                template_id: id,
                exercise_id: exercise_id.into(),
                muscle_group: muscle_group.into(),
                sets,
                reps,
                rest_seconds,
            })
            .await?;
    }

    info!(template_id = %id, "seeded Strength Base");
    Ok(())
}

async fn seed_push_pull_legs(database: &Database) -> Result<()> {
    let id = Uuid::parse_str(PUSH_PULL_LEGS_ID)?;

    database
        .insert_template(&WorkoutTemplate {
            id,
            name: "Push Pull Legs".into(),
            description: Some("Classic six-on-one-off split over a seven-day cycle".into()),
            difficulty: Some("intermediate".into()),
            image_url: None,
            cycle_days: 7,
        })
        .await?;

    let days = [
        (1, vec!["chest", "shoulders", "triceps"]),
        (2, vec!["back", "biceps"]),
        (3, vec!["legs"]),
        (4, vec!["chest", "shoulders", "triceps"]),
        (5, vec!["back", "biceps"]),
        (6, vec!["legs", "core"]),
        // day 7 is a rest day: no row
    ];
    for (day_index, groups) in days {
        database
            .insert_template_day(&TemplateDay {
                template_id: id,
                day_index,
                muscle_groups: groups.into_iter().map(String::from).collect(),
            })
            .await?;
    }

    sqlx::query("DELETE FROM workout_template_exercises WHERE template_id = $1")
        .bind(id.to_string())
        .execute(database.pool())
        .await?;

    let exercises = [
        ("0025", "chest", 4, 8, 150),
        ("0289", "chest", 3, 12, 90),
        ("0178", "shoulders", 4, 10, 90),
        ("0201", "triceps", 3, 12, 60),
        ("0652", "back", 4, 8, 150),
        ("0160", "back", 3, 12, 90),
        ("0294", "biceps", 3, 12, 60),
        ("0043", "legs", 4, 8, 180),
        ("0032", "legs", 3, 12, 120),
        ("0464", "core", 3, 15, 60),
    ];
    for (exercise_id, muscle_group, sets, reps, rest_seconds) in exercises {
        database
            .insert_template_exercise(&TemplateExercise {
                template_id: id,
                exercise_id: exercise_id.into(),
                muscle_group: muscle_group.into(),
                sets,
                reps,
                rest_seconds,
            })
            .await?;
    }

    info!(template_id = %id, "seeded Push Pull Legs");
    Ok(())
}
