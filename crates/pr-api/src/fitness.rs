//! Handlers for the profile, diet, workout, progress and notification pages.
//! All of them are stateless wrappers over `pr-fitness`.

use actix_web::{web, HttpResponse};
use chrono::{Days, NaiveDate, Utc};
use pr_fitness::notifications;
use pr_fitness::nutrition::{self, NutritionRequest};
use pr_fitness::progress::{self, GoalInput};
use pr_fitness::workout::{self, MuscleGroup};
use pr_fitness::{ActivityLevel, Profile};
use serde::Deserialize;

use crate::error::ApiResult;

const HISTORY_DAYS: u32 = 30;
const HISTORY_START_KG: f64 = 75.0;

pub async fn review_profile(body: web::Json<Profile>) -> ApiResult<HttpResponse> {
    let review = body.review()?;
    Ok(HttpResponse::Ok().json(review))
}

pub async fn nutrition_plan(body: web::Json<NutritionRequest>) -> ApiResult<HttpResponse> {
    let plan = nutrition::plan(&body)?;
    Ok(HttpResponse::Ok().json(plan))
}

#[derive(Debug, Deserialize)]
pub struct WorkoutParams {
    #[serde(default)]
    pub level: ActivityLevel,
    pub yesterday: MuscleGroup,
    pub today: MuscleGroup,
}

pub async fn workout_plan(params: web::Query<WorkoutParams>) -> HttpResponse {
    HttpResponse::Ok().json(workout::plan(params.level, params.yesterday, params.today))
}

pub async fn goal_progress(body: web::Json<GoalInput>) -> HttpResponse {
    HttpResponse::Ok().json(progress::goal_progress(body.into_inner()))
}

/// Demo weight/workout series ending today, for the progress charts.
pub async fn progress_history() -> HttpResponse {
    let today = Utc::now().date_naive();
    let start = today
        .checked_sub_days(Days::new(u64::from(HISTORY_DAYS - 1)))
        .unwrap_or(today);
    HttpResponse::Ok().json(progress::demo_history(start, HISTORY_DAYS, HISTORY_START_KG))
}

#[derive(Debug, Deserialize)]
pub struct NotificationParams {
    pub last_activity: NaiveDate,
}

pub async fn list_notifications(params: web::Query<NotificationParams>) -> HttpResponse {
    let today = Utc::now().date_naive();
    HttpResponse::Ok().json(notifications::notices(params.last_activity, today))
}
