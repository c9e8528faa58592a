// ABOUTME: Domain models for templates, plans, prescriptions, and sessions
// ABOUTME: Shared data structures used by the database, service, and route layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

//! Core data structures for the workout scheduling engine

mod plan;
mod session;
mod template;

pub use plan::{ActivePlan, ExercisePrescription};
pub use session::{SetEntry, SetLog, WorkoutSession, DEFAULT_EFFORT};
pub use template::{
    parse_muscle_groups, TemplateDay, TemplateExercise, WorkoutTemplate,
};
