// ABOUTME: Shared server resources threaded through every route handler
// ABOUTME: Database handle, exercise catalog client, and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use crate::config::ServerConfig;
use crate::database::Database;
use crate::external::ExerciseCatalog;
use std::sync::Arc;

/// Shared resources for all request handlers.
///
/// Constructed once at startup and passed as `Arc<ServerResources>` into
/// every router; handlers hold no other state.
pub struct ServerResources {
    pub database: Database,
    pub catalog: Arc<dyn ExerciseCatalog>,
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle the server's shared state
    #[must_use]
    pub fn new(database: Database, catalog: Arc<dyn ExerciseCatalog>, config: ServerConfig) -> Self {
        Self {
            database,
            catalog,
            config,
        }
    }
}
