// ABOUTME: Schedule views - today, seven-day window, and the reconciled day detail
// ABOUTME: Every view resolves its day index directly from the plan start date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use super::{active_plan_with_template, fetch_exercise_info};
use crate::context::ServerResources;
use crate::cycle;
use crate::errors::AppResult;
use crate::models::{SetLog, DEFAULT_EFFORT};
use chrono::{Days, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use uuid::Uuid;

/// One resolved day of the cycle
#[derive(Debug, Clone, Serialize)]
pub struct DaySlot {
    pub date: NaiveDate,
    pub day_index: i64,
    pub muscle_groups: Vec<String>,
    pub rest_day: bool,
}

/// Dashboard view: today's slot plus the next calendar day
#[derive(Debug, Serialize)]
pub struct TodayView {
    /// Plain day count since plan start, derived on every read
    pub elapsed_day_count: i64,
    pub today: DaySlot,
    pub upcoming: DaySlot,
}

/// Seven-day window starting today
#[derive(Debug, Serialize)]
pub struct WeekSchedule {
    pub days: Vec<DaySlot>,
}

/// One prescription in a day view, with its displayed sets
#[derive(Debug, Serialize)]
pub struct ExerciseView {
    pub prescription_id: Uuid,
    pub exercise_id: String,
    pub muscle_group: String,
    /// Saved logs for the date when present, synthesized defaults otherwise
    pub sets: Vec<SetLog>,
    pub reps: i64,
    pub weight: f64,
    pub rest_seconds: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Reconciled view of one calendar date
#[derive(Debug, Serialize)]
pub struct DayView {
    pub day_index: i64,
    pub rest_day: bool,
    /// Prescriptions grouped by muscle group; empty on rest days
    pub exercises: BTreeMap<String, Vec<ExerciseView>>,
}

/// Date-facing schedule reads
pub struct ScheduleService {
    resources: Arc<ServerResources>,
}

impl ScheduleService {
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Today's slot and the upcoming one
    ///
    /// # Errors
    ///
    /// Returns `NotFound` without an active plan, `InvalidInput` when the
    /// plan starts in the future
    pub async fn today_view(&self, user_id: Uuid) -> AppResult<TodayView> {
        let (plan, template) =
            active_plan_with_template(&self.resources.database, user_id).await?;
        let today = Utc::now().date_naive();

        let day_map = self.day_map(template.id).await?;
        let today_slot = build_slot(&day_map, plan.start_date, template.cycle_days, today)?;
        let upcoming_slot = build_slot(
            &day_map,
            plan.start_date,
            template.cycle_days,
            today + Days::new(1),
        )?;

        Ok(TodayView {
            elapsed_day_count: cycle::elapsed_day_count(plan.start_date, today),
            today: today_slot,
            upcoming: upcoming_slot,
        })
    }

    /// The seven-day window starting today
    ///
    /// # Errors
    ///
    /// Returns `NotFound` without an active plan, `InvalidInput` when the
    /// plan starts in the future
    pub async fn week_schedule(&self, user_id: Uuid) -> AppResult<WeekSchedule> {
        let (plan, template) =
            active_plan_with_template(&self.resources.database, user_id).await?;
        let today = Utc::now().date_naive();

        let day_map = self.day_map(template.id).await?;
        let days = (0..7)
            .map(|offset| {
                build_slot(
                    &day_map,
                    plan.start_date,
                    template.cycle_days,
                    today + Days::new(offset),
                )
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(WeekSchedule { days })
    }

    /// The reconciled day view for one calendar date.
    ///
    /// Saved per-set logs win over template-derived defaults; a rest day
    /// yields an empty exercise map, not an error.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` without an active plan, `InvalidInput` for a
    /// date before the plan start
    pub async fn day_view(&self, user_id: Uuid, date: NaiveDate) -> AppResult<DayView> {
        let database = &self.resources.database;
        let (plan, template) = active_plan_with_template(database, user_id).await?;

        let day_index = cycle::resolve_day(plan.start_date, template.cycle_days, date)?;

        let muscle_groups = match database.template_day(template.id, day_index).await? {
            Some(day) => day.muscle_groups,
            None => Vec::new(),
        };
        if muscle_groups.is_empty() {
            return Ok(DayView {
                day_index,
                rest_day: true,
                exercises: BTreeMap::new(),
            });
        }

        let prescriptions: Vec<_> = database
            .prescriptions_for_plan(plan.id)
            .await?
            .into_iter()
            .filter(|prescription| muscle_groups.contains(&prescription.muscle_group))
            .collect();

        // Saved logs for the date, keyed by exercise id. The query orders
        // by set number, so each bucket arrives sorted.
        let mut logs_by_exercise: HashMap<String, Vec<SetLog>> = HashMap::new();
        for log in database.session_logs(plan.id, date).await? {
            logs_by_exercise
                .entry(log.exercise_id.clone())
                .or_default()
                .push(log);
        }

        let catalog_info = fetch_exercise_info(
            &self.resources.catalog,
            prescriptions.iter().map(|p| p.exercise_id.clone()),
        )
        .await;

        let mut exercises: BTreeMap<String, Vec<ExerciseView>> = BTreeMap::new();
        for prescription in prescriptions {
            let sets = logs_by_exercise
                .get(&prescription.exercise_id)
                .cloned()
                .unwrap_or_else(|| synthesize_sets(&prescription));

            let info = catalog_info.get(&prescription.exercise_id);
            let view = ExerciseView {
                prescription_id: prescription.id,
                exercise_id: prescription.exercise_id.clone(),
                muscle_group: prescription.muscle_group.clone(),
                sets,
                reps: prescription.reps,
                weight: prescription.weight,
                rest_seconds: prescription.rest_seconds,
                name: info.map(|i| i.name.clone()),
                image: info.map(|i| i.image.clone()),
            };

            exercises
                .entry(prescription.muscle_group)
                .or_default()
                .push(view);
        }

        Ok(DayView {
            day_index,
            rest_day: false,
            exercises,
        })
    }

    /// All assigned day indices of a template, keyed by index
    async fn day_map(&self, template_id: Uuid) -> AppResult<HashMap<i64, Vec<String>>> {
        let days = self.resources.database.template_days(template_id).await?;
        Ok(days
            .into_iter()
            .map(|day| (day.day_index, day.muscle_groups))
            .collect())
    }
}

fn build_slot(
    day_map: &HashMap<i64, Vec<String>>,
    start_date: NaiveDate,
    cycle_days: i64,
    date: NaiveDate,
) -> AppResult<DaySlot> {
    let day_index = cycle::resolve_day(start_date, cycle_days, date)?;
    let muscle_groups = day_map.get(&day_index).cloned().unwrap_or_default();
    let rest_day = muscle_groups.is_empty();

    Ok(DaySlot {
        date,
        day_index,
        muscle_groups,
        rest_day,
    })
}

/// Template-derived default sets shown when no log exists for the date
fn synthesize_sets(prescription: &crate::models::ExercisePrescription) -> Vec<SetLog> {
    (1..=prescription.sets.max(0))
        .map(|set_number| SetLog {
            exercise_id: prescription.exercise_id.clone(),
            set_number,
            weight: prescription.weight,
            reps: prescription.reps,
            effort: DEFAULT_EFFORT.to_owned(),
            completed: false,
            notes: None,
        })
        .collect()
}
