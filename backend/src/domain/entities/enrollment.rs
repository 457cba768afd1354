use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domain::value_objects::{SessionId, UserId};

/// Grants one user access to one session; at most one per (user, session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub id: Uuid,
    pub user_id: UserId,
    pub session_id: SessionId,
    pub enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(user_id: UserId, session_id: SessionId, enrolled_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            session_id,
            enrolled_at,
        }
    }
}
