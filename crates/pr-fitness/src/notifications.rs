//! # Notifications
//!
//! Inactivity alerts and wellness reminders.

use chrono::NaiveDate;
use serde::Serialize;

pub const INACTIVITY_THRESHOLD_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Alert,
    Success,
    Tip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

pub fn inactivity_notice(last_activity: NaiveDate, today: NaiveDate) -> Notice {
    let idle = (today - last_activity).num_days();
    if idle >= INACTIVITY_THRESHOLD_DAYS {
        Notice::new(
            NoticeLevel::Alert,
            format!("No activity for {idle} days. How about a light workout today?"),
        )
    } else {
        Notice::new(NoticeLevel::Success, "Activity on track. Keep it up!")
    }
}

pub fn wellness_tips() -> Vec<Notice> {
    [
        "Drink water throughout the day (30-35 ml per kg of body weight).",
        "Aim for 7-9 hours of sleep per night for better recovery.",
    ]
    .into_iter()
    .map(|tip| Notice::new(NoticeLevel::Tip, tip))
    .collect()
}

/// The inactivity check followed by the standing tips.
pub fn notices(last_activity: NaiveDate, today: NaiveDate) -> Vec<Notice> {
    let mut all = vec![inactivity_notice(last_activity, today)];
    all.extend(wellness_tips());
    all
}
