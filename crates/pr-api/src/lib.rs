//! # pr-api
//!
//! The web routing and orchestration layer for Power Routine.

pub mod error;
pub mod fitness;
pub mod handlers;
pub mod middleware;

pub use handlers::{AppState, DISPLAY_NAME_HEADER};

use actix_web::web;

/// Configures the routes for the feed, groups and fitness pages.
///
/// # Developer Note
/// We use a scoped configuration to allow the main binary to mount
/// the API under different paths if needed (e.g., /v1/).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            // Server-rendered pages
            .route("/", web::get().to(handlers::feed_page))
            .route("/leaderboard", web::get().to(handlers::leaderboard_page))
            // Feed
            .route("/api/feed", web::get().to(handlers::list_feed))
            .route("/api/feed/{item_id}/like", web::post().to(handlers::like_feed_item))
            // Photos
            .route("/api/photos", web::post().to(handlers::upload_photo))
            .route("/api/photos/{photo_id}/image", web::get().to(handlers::photo_image))
            .route("/api/photos/{photo_id}/like", web::post().to(handlers::like_photo))
            // Articles
            .route("/api/articles", web::post().to(handlers::publish_article))
            // Groups
            .route("/api/groups", web::post().to(handlers::create_group))
            .route("/api/groups/mine", web::get().to(handlers::my_groups))
            .route("/api/groups/{name}/join", web::post().to(handlers::join_group))
            .route("/api/leaderboard", web::get().to(handlers::leaderboard))
            // Fitness
            .route("/api/profile", web::post().to(fitness::review_profile))
            .route("/api/nutrition/plan", web::post().to(fitness::nutrition_plan))
            .route("/api/workouts", web::get().to(fitness::workout_plan))
            .route("/api/progress", web::post().to(fitness::goal_progress))
            .route("/api/progress/history", web::get().to(fitness::progress_history))
            .route("/api/notifications", web::get().to(fitness::list_notifications)),
    );
}
