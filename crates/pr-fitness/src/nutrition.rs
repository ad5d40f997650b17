//! # Nutrition
//!
//! Calorie targets, macro split and diet alerts.

use pr_core::error::Result;
use serde::{Deserialize, Serialize};

use crate::profile::{check_body, Goal, Sex};

/// Fiber intake assumed when the caller does not report one (percent of
/// the recommended amount).
pub const DEFAULT_FIBER_PCT: u32 = 30;

/// Deficit above this fraction of the base calories is flagged.
const EXTREME_DEFICIT: f64 = 0.30;
const MAX_CARB_PCT: u32 = 50;
const MIN_FIBER_PCT: u32 = 30;

/// Basal metabolic rate (Mifflin-St Jeor), kcal/day.
pub fn bmr_mifflin(height_cm: f64, weight_kg: f64, age: u32, sex: Sex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Daily target: 15% deficit for cutting, 10% surplus for bulking.
pub fn target_calories(bmr: f64, goal: Goal) -> i32 {
    let factor = match goal {
        Goal::Cutting => 0.85,
        Goal::Bulking => 1.10,
        Goal::Maintenance => 1.0,
    };
    (bmr * factor) as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Macros {
    pub protein_kcal: i32,
    pub carb_kcal: i32,
    pub fat_kcal: i32,
    pub carb_pct: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MacroGrams {
    pub protein_g: i32,
    pub carb_g: i32,
    pub fat_g: i32,
}

impl Macros {
    /// 4 kcal/g for protein and carbs, 9 kcal/g for fat.
    pub fn grams(&self) -> MacroGrams {
        MacroGrams {
            protein_g: self.protein_kcal.div_euclid(4),
            carb_g: self.carb_kcal.div_euclid(4),
            fat_g: self.fat_kcal.div_euclid(9),
        }
    }
}

pub fn macros_for_goal(kcal: i32, goal: Goal) -> Macros {
    let (protein, carbs, fat) = match goal {
        Goal::Cutting => (0.30, 0.40, 0.30),
        Goal::Bulking => (0.25, 0.50, 0.25),
        Goal::Maintenance => (0.30, 0.45, 0.25),
    };
    let kcal = f64::from(kcal);
    Macros {
        protein_kcal: (kcal * protein) as i32,
        carb_kcal: (kcal * carbs) as i32,
        fat_kcal: (kcal * fat) as i32,
        carb_pct: (carbs * 100.0) as u32,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DietAlert {
    ExtremeDeficit,
    HighCarbs,
    LowFiber,
}

impl DietAlert {
    pub fn message(&self) -> &'static str {
        match self {
            DietAlert::ExtremeDeficit => "Calorie deficit above 30%. Risk of an extreme strategy.",
            DietAlert::HighCarbs => {
                "Carbohydrates above 50% of calories. Consider rebalancing with protein and fat."
            }
            DietAlert::LowFiber => "Low fiber intake (below 30% of the recommended amount).",
        }
    }
}

pub fn diet_alerts(base_kcal: i32, target_kcal: i32, carb_pct: u32, fiber_pct: u32) -> Vec<DietAlert> {
    let mut alerts = Vec::new();
    let deficit = f64::from(base_kcal - target_kcal) / f64::from(base_kcal.max(1));
    if deficit > EXTREME_DEFICIT {
        alerts.push(DietAlert::ExtremeDeficit);
    }
    if carb_pct > MAX_CARB_PCT {
        alerts.push(DietAlert::HighCarbs);
    }
    if fiber_pct < MIN_FIBER_PCT {
        alerts.push(DietAlert::LowFiber);
    }
    alerts
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NutritionRequest {
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub goal: Goal,
    pub fiber_pct: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertView {
    pub code: DietAlert,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionPlan {
    pub bmr: i32,
    pub target_kcal: i32,
    pub macros: Macros,
    pub grams: MacroGrams,
    pub alerts: Vec<AlertView>,
}

pub fn plan(req: &NutritionRequest) -> Result<NutritionPlan> {
    check_body(req.age, req.height_cm, req.weight_kg)?;

    let bmr = bmr_mifflin(req.height_cm, req.weight_kg, req.age, req.sex);
    let target_kcal = target_calories(bmr, req.goal);
    let macros = macros_for_goal(target_kcal, req.goal);
    let alerts = diet_alerts(
        bmr as i32,
        target_kcal,
        macros.carb_pct,
        req.fiber_pct.unwrap_or(DEFAULT_FIBER_PCT),
    )
    .into_iter()
    .map(|code| AlertView {
        code,
        message: code.message(),
    })
    .collect();

    Ok(NutritionPlan {
        bmr: bmr as i32,
        target_kcal,
        grams: macros.grams(),
        macros,
        alerts,
    })
}
