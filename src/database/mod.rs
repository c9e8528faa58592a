// ABOUTME: Database management for the Liftcycle scheduling engine
// ABOUTME: Owns the SQLite pool and runs idempotent schema migrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

//! # Database Management
//!
//! This module owns the connection pool and the schema. Query methods are
//! split across per-domain files (`templates`, `plans`, `prescriptions`,
//! `sessions`), all implemented on the shared [`Database`] handle.

mod plans;
mod prescriptions;
mod sessions;
mod templates;

pub use sessions::{DayHistoryRow, HistoryLogRow, MonthHistoryRow, SessionSave};

use crate::errors::AppResult;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database handle for plan, prescription, and session storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains("mode=")
            && !database_url.contains(":memory:")
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        // An in-memory SQLite database exists per connection; a pool of
        // them would hand out empty stores. Pin those to one connection.
        let pool = if connection_options.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&connection_options)
                .await?
        } else {
            SqlitePool::connect(&connection_options).await?
        };

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_templates().await?;
        self.migrate_plans().await?;
        self.migrate_sessions().await?;
        Ok(())
    }
}
