//! # Workouts
//!
//! Canned workout suggestions per activity level.

use serde::{Deserialize, Serialize};

use crate::profile::ActivityLevel;

const LONG_SESSION_MIN: u32 = 60;
const EXTRA_WATER_ML: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Legs,
    Chest,
    Back,
    Shoulders,
    Mobility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutSuggestion {
    pub duration_min: u32,
    pub intensity: Intensity,
    pub exercises: Vec<&'static str>,
}

pub fn suggestions_for_level(level: ActivityLevel) -> WorkoutSuggestion {
    match level {
        ActivityLevel::Beginner => WorkoutSuggestion {
            duration_min: 30,
            intensity: Intensity::Low,
            exercises: vec![
                "Brisk walk (10-15 min)",
                "Bodyweight squat 3x12",
                "Incline push-up 3x10",
                "Plank 3x20s",
            ],
        },
        ActivityLevel::Intermediate => WorkoutSuggestion {
            duration_min: 45,
            intensity: Intensity::Moderate,
            exercises: vec![
                "Easy run 10 min",
                "Squat 4x10",
                "Bench press 4x8-10",
                "Row 4x10",
                "Plank 3x40s",
            ],
        },
        ActivityLevel::Advanced => WorkoutSuggestion {
            duration_min: 60,
            intensity: Intensity::High,
            exercises: vec![
                "HIIT 10x(1' hard / 1' easy)",
                "Heavy back squat 5x5",
                "Deadlift 5x5",
                "Pull-up 4x to failure",
                "Plank 3x60s",
            ],
        },
    }
}

/// Avoids training the same group on consecutive days by switching to
/// mobility work.
pub fn vary_muscle_group(yesterday: MuscleGroup, today: MuscleGroup) -> MuscleGroup {
    if today == yesterday {
        MuscleGroup::Mobility
    } else {
        today
    }
}

/// Extra water for sessions longer than an hour.
pub fn extra_hydration_ml(duration_min: u32) -> u32 {
    if duration_min > LONG_SESSION_MIN {
        EXTRA_WATER_ML
    } else {
        0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutPlan {
    pub level: ActivityLevel,
    pub suggestion: WorkoutSuggestion,
    pub muscle_group: MuscleGroup,
    /// The requested group was swapped to avoid a repeat.
    pub varied: bool,
    pub extra_hydration_ml: u32,
}

pub fn plan(level: ActivityLevel, yesterday: MuscleGroup, today: MuscleGroup) -> WorkoutPlan {
    let suggestion = suggestions_for_level(level);
    let extra_hydration_ml = extra_hydration_ml(suggestion.duration_min);
    WorkoutPlan {
        level,
        muscle_group: vary_muscle_group(yesterday, today),
        varied: today == yesterday,
        extra_hydration_ml,
        suggestion,
    }
}
