//! # User Profile
//!
//! Body measurements and preferences that personalize the diet and
//! workout recommendations.

use pr_core::error::{AppError, Result};
use serde::{Deserialize, Serialize};

pub const AGE_RANGE: (u32, u32) = (12, 100);
pub const HEIGHT_CM_RANGE: (f64, f64) = (50.0, 250.0);
pub const WEIGHT_KG_RANGE: (f64, f64) = (20.0, 300.0);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Cutting,
    Bulking,
    #[default]
    Maintenance,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthCondition {
    None,
    Diabetes,
    Hypertension,
    HeartDisease,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub level: ActivityLevel,
    #[serde(default)]
    pub goal: Goal,
    #[serde(default)]
    pub conditions: Vec<HealthCondition>,
}

/// What a saved profile switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileReview {
    pub personalized: bool,
    pub limit_intense_training: bool,
}

/// Range checks shared by the profile and the nutrition planner.
pub fn check_body(age: u32, height_cm: f64, weight_kg: f64) -> Result<()> {
    if !(AGE_RANGE.0..=AGE_RANGE.1).contains(&age) {
        return Err(AppError::ValidationError(format!(
            "age must be between {} and {} years",
            AGE_RANGE.0, AGE_RANGE.1
        )));
    }
    if !(HEIGHT_CM_RANGE.0..=HEIGHT_CM_RANGE.1).contains(&height_cm) {
        return Err(AppError::ValidationError(format!(
            "height must be between {} and {} cm",
            HEIGHT_CM_RANGE.0, HEIGHT_CM_RANGE.1
        )));
    }
    if !(WEIGHT_KG_RANGE.0..=WEIGHT_KG_RANGE.1).contains(&weight_kg) {
        return Err(AppError::ValidationError(format!(
            "weight must be between {} and {} kg",
            WEIGHT_KG_RANGE.0, WEIGHT_KG_RANGE.1
        )));
    }
    Ok(())
}

impl Profile {
    pub fn validate(&self) -> Result<()> {
        check_body(self.age, self.height_cm, self.weight_kg)
    }

    /// Any reported condition other than `None` caps training intensity.
    pub fn limits_intense_training(&self) -> bool {
        self.conditions.iter().any(|c| *c != HealthCondition::None)
    }

    pub fn review(&self) -> Result<ProfileReview> {
        self.validate()?;
        Ok(ProfileReview {
            personalized: true,
            limit_intense_training: self.limits_intense_training(),
        })
    }
}
