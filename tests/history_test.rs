// ABOUTME: Integration tests for history aggregation - month rollups and day detail
// ABOUTME: Catalog degradation and history survival after plan cancellation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

mod common;

use anyhow::Result;
use common::{
    activate_test_plan, create_test_resources, create_test_resources_with_catalog, date,
};
use liftcycle::errors::ErrorCode;
use liftcycle::external::StaticCatalog;
use liftcycle::models::SetEntry;
use liftcycle::services::{
    CancelPlanRequest, HistoryService, PlanService, SaveSessionRequest, ScheduleService,
    SessionLogService,
};
use std::sync::Arc;
use uuid::Uuid;

fn entry(exercise_id: &str, set_number: i64, weight: f64, reps: i64) -> SetEntry {
    SetEntry {
        exercise_id: exercise_id.into(),
        set_number,
        weight,
        reps,
        effort: "normal".into(),
        completed: true,
        notes: None,
    }
}

async fn save(
    resources: &Arc<liftcycle::context::ServerResources>,
    user_id: Uuid,
    day: chrono::NaiveDate,
    duration_seconds: Option<i64>,
    notes: Option<&str>,
    exercises: Vec<SetEntry>,
) -> Result<()> {
    SessionLogService::new(resources.clone())
        .save(
            user_id,
            SaveSessionRequest {
                date: day,
                duration_seconds,
                notes: notes.map(String::from),
                exercises,
            },
        )
        .await?;
    Ok(())
}

#[tokio::test]
async fn test_month_rollup_counts_distinct_exercises() -> Result<()> {
    let (resources, template_id) = create_test_resources().await?;
    let user_id = Uuid::new_v4();
    activate_test_plan(&resources, user_id, template_id, date(2025, 3, 1)).await?;

    save(
        &resources,
        user_id,
        date(2025, 3, 1),
        None,
        None,
        vec![
            entry("squat-001", 1, 70.0, 5),
            entry("squat-001", 2, 70.0, 5),
        ],
    )
    .await?;
    save(
        &resources,
        user_id,
        date(2025, 3, 2),
        Some(2700),
        None,
        vec![
            entry("bench-001", 1, 48.0, 5),
            entry("bench-001", 2, 48.0, 5),
            entry("press-001", 1, 30.0, 8),
        ],
    )
    .await?;
    // A session in a different month must not appear
    save(
        &resources,
        user_id,
        date(2025, 4, 1),
        None,
        None,
        vec![entry("squat-001", 1, 72.5, 5)],
    )
    .await?;

    let rollup = HistoryService::new(resources).month(user_id, 2025, 3).await?;

    assert_eq!(rollup.len(), 2);

    let first = &rollup["2025-03-01"];
    assert_eq!(first.name, "Strength Base");
    assert!(first.completed);
    assert_eq!(first.exercise_count, 1); // two sets, one distinct exercise

    let second = &rollup["2025-03-02"];
    assert_eq!(second.exercise_count, 2);

    Ok(())
}

#[tokio::test]
async fn test_month_rejects_out_of_range() -> Result<()> {
    let (resources, _template_id) = create_test_resources().await?;

    let err = HistoryService::new(resources)
        .month(Uuid::new_v4(), 2025, 13)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    Ok(())
}

#[tokio::test]
async fn test_day_detail_groups_and_orders_sets() -> Result<()> {
    let (resources, template_id) = create_test_resources().await?;
    let user_id = Uuid::new_v4();
    activate_test_plan(&resources, user_id, template_id, date(2025, 3, 1)).await?;

    let session_date = date(2025, 3, 2);
    save(
        &resources,
        user_id,
        session_date,
        Some(3600),
        Some("bench felt heavy"),
        vec![
            // Submitted out of order; the detail view sorts by set number
            entry("bench-001", 2, 50.0, 5),
            entry("bench-001", 1, 48.0, 5),
            entry("press-001", 1, 30.0, 8),
        ],
    )
    .await?;

    let detail = HistoryService::new(resources).day(user_id, session_date).await?;

    assert_eq!(detail.name, "Strength Base");
    assert!(detail.completed);
    assert_eq!(detail.duration_seconds, Some(3600));
    assert_eq!(detail.notes.as_deref(), Some("bench felt heavy"));
    assert_eq!(detail.exercises.len(), 2);

    let bench = detail
        .exercises
        .iter()
        .find(|e| e.exercise_id == "bench-001")
        .unwrap();
    assert_eq!(bench.muscle_group.as_deref(), Some("chest"));
    assert_eq!(bench.name.as_deref(), Some("bench press"));
    let numbers: Vec<i64> = bench.sets.iter().map(|s| s.set_number).collect();
    assert_eq!(numbers, vec![1, 2]);

    // press-001 is unknown to the catalog: fields degrade to empty
    let press = detail
        .exercises
        .iter()
        .find(|e| e.exercise_id == "press-001")
        .unwrap();
    assert!(press.name.is_none());
    assert!(press.image.is_none());

    Ok(())
}

#[tokio::test]
async fn test_day_detail_without_session_is_not_found() -> Result<()> {
    let (resources, template_id) = create_test_resources().await?;
    let user_id = Uuid::new_v4();
    activate_test_plan(&resources, user_id, template_id, date(2025, 3, 1)).await?;

    let err = HistoryService::new(resources)
        .day(user_id, date(2025, 3, 2))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    Ok(())
}

#[tokio::test]
async fn test_history_survives_plan_cancellation() -> Result<()> {
    let (resources, template_id) = create_test_resources().await?;
    let user_id = Uuid::new_v4();
    activate_test_plan(&resources, user_id, template_id, date(2025, 3, 1)).await?;

    let session_date = date(2025, 3, 2);
    save(
        &resources,
        user_id,
        session_date,
        None,
        None,
        vec![entry("bench-001", 1, 48.0, 5)],
    )
    .await?;

    PlanService::new(resources.clone())
        .cancel(
            user_id,
            CancelPlanRequest {
                confirmation: "cancel my plan".into(),
            },
        )
        .await?;

    let service = HistoryService::new(resources);
    let rollup = service.month(user_id, 2025, 3).await?;
    assert_eq!(rollup.len(), 1);

    let detail = service.day(user_id, session_date).await?;
    assert_eq!(detail.exercises.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_unavailable_catalog_degrades_fields_only() -> Result<()> {
    let (resources, template_id) =
        create_test_resources_with_catalog(Arc::new(StaticCatalog::unavailable())).await?;
    let user_id = Uuid::new_v4();
    activate_test_plan(&resources, user_id, template_id, date(2025, 3, 1)).await?;

    let session_date = date(2025, 3, 2);
    save(
        &resources,
        user_id,
        session_date,
        None,
        None,
        vec![entry("bench-001", 1, 48.0, 5)],
    )
    .await?;

    // Day view still answers, with empty display fields
    let view = ScheduleService::new(resources.clone())
        .day_view(user_id, session_date)
        .await?;
    let bench = view.exercises["chest"]
        .iter()
        .find(|e| e.exercise_id == "bench-001")
        .unwrap();
    assert!(bench.name.is_none());
    assert!(bench.image.is_none());
    assert_eq!(bench.sets.len(), 1);

    // Same policy for history
    let detail = HistoryService::new(resources).day(user_id, session_date).await?;
    assert!(detail.exercises[0].name.is_none());
    assert_eq!(detail.exercises[0].sets.len(), 1);

    Ok(())
}
