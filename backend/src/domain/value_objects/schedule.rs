use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scheduled start and end of a live session; start is always before end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
}

impl Schedule {
    pub fn new(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result<Self, String> {
        if starts_at >= ends_at {
            return Err("Session must start before it ends".to_string());
        }
        Ok(Self { starts_at, ends_at })
    }

    pub fn from_stored(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self { starts_at, ends_at }
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.ends_at <= now
    }
}
