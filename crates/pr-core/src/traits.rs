//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use chrono::{DateTime, Utc};

/// Time source for `created_at` stamps.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used outside of tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Identity contract. Supplies the display name attached to every
/// like, join, create and upload. No authentication is performed.
pub trait IdentityProvider: Send + Sync {
    /// Resolves the display name for a request.
    ///
    /// `requested` is whatever name the client asked for (if any);
    /// `session_key` identifies the session when no name was given.
    fn display_name(&self, requested: Option<&str>, session_key: &str) -> String;
}
