use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseId(i64);

impl CourseId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parses a path segment; only plain positive integers are accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        super::session_id::parse_positive(raw).map(Self)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
