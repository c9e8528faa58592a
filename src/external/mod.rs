// ABOUTME: Clients for external services consumed by the scheduling engine
// ABOUTME: Currently the exercise catalog metadata service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

//! External service integrations

pub mod catalog;

pub use catalog::{CatalogClient, ExerciseCatalog, ExerciseInfo, StaticCatalog};
