use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session as returned by `GET /api/sessions/{id}` and `GET /api/sessions/upcoming`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: i64,
    pub course_id: i64,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub published: bool,
    /// Only present when the caller holds an enrollment for the session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
}

/// Body of `GET /api/enrollments/check/{sessionId}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentCheck {
    pub enrolled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentReceipt {
    pub enrollment_id: String,
    pub session_id: i64,
    pub enrolled_at: DateTime<Utc>,
}

/// Instructor request for `POST /api/sessions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSessionRequest {
    pub course_id: i64,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub meeting_link: String,
}

/// Instructor request for `PUT /api/sessions/{id}/schedule`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleSessionRequest {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseStatusResponse {
    pub course_id: i64,
    pub status: CourseStatus,
}

/// Error body returned by every failing API call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
