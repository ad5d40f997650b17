//! power-routine/crates/pr-core/src/lib.rs
//!
//! The social feed engine and interface definitions for Power Routine:
//! photos, articles, likes, groups and the group leaderboard.

pub mod error;
pub mod feed;
pub mod groups;
pub mod hub;
pub mod leaderboard;
pub mod likes;
pub mod models;
pub mod photos;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use feed::{Feed, FeedQuery, FeedSort};
pub use hub::{NewPhoto, SocialHub};
pub use models::*;
pub use traits::*;
