// ABOUTME: Route module organization for the Liftcycle HTTP API
// ABOUTME: One module per domain; handlers stay thin and delegate to services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

//! HTTP routes, organized by domain. Each module exposes a unit struct
//! with a `routes()` constructor returning an axum `Router`.

/// Prescription mutation routes
pub mod exercises;
/// Health check routes
pub mod health;
/// History rollup routes
pub mod history;
/// Session log save routes
pub mod logs;
/// Plan activation and cancellation routes
pub mod plans;
/// Schedule view routes (today, week, day detail)
pub mod schedule;
/// Template catalog routes
pub mod templates;

pub use exercises::ExerciseRoutes;
pub use health::HealthRoutes;
pub use history::HistoryRoutes;
pub use logs::LogRoutes;
pub use plans::PlanRoutes;
pub use schedule::ScheduleRoutes;
pub use templates::TemplateRoutes;
