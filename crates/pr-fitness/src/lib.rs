//! # pr-fitness
//!
//! Stateless diet and training helpers behind the profile, diet, workout,
//! progress and notification pages.

pub mod notifications;
pub mod nutrition;
pub mod profile;
pub mod progress;
pub mod workout;

pub use profile::{ActivityLevel, Goal, HealthCondition, Profile, ProfileReview, Sex};
