//! # Progress
//!
//! Weight-goal tracking and the demo history shown on the progress charts.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Keeps the ratio finite when initial and target weight coincide.
const MIN_SPAN_KG: f64 = 0.0001;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GoalInput {
    pub initial_kg: f64,
    pub target_kg: f64,
    pub current_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub current_kg: f64,
    /// 1.0 means the goal is reached
    pub fraction: f64,
    pub reached: bool,
    pub hint: &'static str,
}

pub fn goal_progress(input: GoalInput) -> GoalProgress {
    let span = (input.initial_kg - input.target_kg).max(MIN_SPAN_KG);
    let fraction = (input.initial_kg - input.current_kg) / span;
    let reached = fraction >= 1.0;
    GoalProgress {
        current_kg: input.current_kg,
        fraction,
        reached,
        hint: if reached {
            "Goal reached! Consider starting a maintenance or definition phase."
        } else {
            "Stay consistent and keep logging workouts and meals."
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressPoint {
    pub day: NaiveDate,
    pub weight_kg: f64,
    pub workouts: u32,
}

/// Demo series: weight drops 0.1 kg a day from `start_kg`, with a workout
/// every other day.
pub fn demo_history(start: NaiveDate, days: u32, start_kg: f64) -> Vec<ProgressPoint> {
    (0..days)
        .filter_map(|i| {
            let day = start.checked_add_days(Days::new(u64::from(i)))?;
            Some(ProgressPoint {
                day,
                weight_kg: start_kg - f64::from(i) * 0.1,
                workouts: if i % 2 == 0 { 1 } else { 0 },
            })
        })
        .collect()
}
