//! Relative age shown on cards.

use chrono::{DateTime, Utc};
use std::fmt;

/// How long ago a case was opened, at card granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAge {
    /// Less than an hour ago.
    JustNow,
    /// Whole hours, under a day.
    Hours(i64),
    /// Whole days.
    Days(i64),
}

impl CardAge {
    /// Computes the age of something created at `created_at`, seen at `now`.
    ///
    /// Timestamps in the future read as [`CardAge::JustNow`].
    #[must_use]
    pub fn between(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let elapsed = now.signed_duration_since(created_at);
        let hours = elapsed.num_hours();
        if hours < 1 {
            Self::JustNow
        } else if hours < 24 {
            Self::Hours(hours)
        } else {
            Self::Days(elapsed.num_days())
        }
    }
}

impl fmt::Display for CardAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JustNow => f.write_str("just now"),
            Self::Hours(hours) => write!(f, "{hours}h ago"),
            Self::Days(days) => write!(f, "{days}d ago"),
        }
    }
}
