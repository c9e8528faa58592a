// ABOUTME: Integration tests for database setup and migration behavior
// ABOUTME: File creation, migration idempotence, and the active-plan unique index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

mod common;

use anyhow::Result;
use common::{activate_test_plan, date, init_test_logging, seed_template};
use liftcycle::database::Database;
use liftcycle::errors::ErrorCode;
use liftcycle::models::ActivePlan;
use uuid::Uuid;

#[tokio::test]
async fn test_file_database_is_created_on_first_connect() -> Result<()> {
    init_test_logging();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("liftcycle-test.db");
    let url = format!("sqlite:{}", path.display());

    let database = Database::new(&url).await?;
    assert!(path.exists(), "sqlite file should be created with mode=rwc");

    // Migrations are idempotent across reconnects
    database.migrate().await?;
    drop(database);
    let database = Database::new(&url).await?;
    database.migrate().await?;

    let templates = database.list_templates().await?;
    assert!(templates.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_active_plan_unique_index_survives_direct_inserts() -> Result<()> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    let template_id = seed_template(&database).await?;
    let user_id = Uuid::new_v4();

    let first = ActivePlan::new(user_id, template_id, date(2025, 3, 1), 100.0, 80.0, 120.0);
    database.create_plan_with_prescriptions(&first, &[]).await?;

    // Bypassing the service layer still cannot violate the invariant
    let second = ActivePlan::new(user_id, template_id, date(2025, 4, 1), 100.0, 80.0, 120.0);
    let err = database
        .create_plan_with_prescriptions(&second, &[])
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    // A cancelled plan frees the slot
    database.cancel_plan(first.id).await?;
    database.create_plan_with_prescriptions(&second, &[]).await?;

    Ok(())
}

#[tokio::test]
async fn test_resources_shared_across_clones() -> Result<()> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    let template_id = seed_template(&database).await?;

    // Clones share the pool; a plan written through one is visible via another
    let clone = database.clone();
    let resources = std::sync::Arc::new(liftcycle::context::ServerResources::new(
        clone,
        common::test_catalog(),
        liftcycle::config::ServerConfig::default(),
    ));

    let user_id = Uuid::new_v4();
    activate_test_plan(&resources, user_id, template_id, date(2025, 3, 1)).await?;

    assert!(database.active_plan(user_id).await?.is_some());

    Ok(())
}
