use crate::domain::value_objects::{CourseId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: CourseId,
    pub instructor_id: UserId,
    pub title: String,
    pub status: CourseStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseStatus {
    Pending,
    Approved,
    Rejected,
}

impl CourseStatus {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            CourseStatus::Pending => "pending",
            CourseStatus::Approved => "approved",
            CourseStatus::Rejected => "rejected",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(CourseStatus::Pending),
            "approved" => Some(CourseStatus::Approved),
            "rejected" => Some(CourseStatus::Rejected),
            _ => None,
        }
    }
}

impl Course {
    pub fn is_approved(&self) -> bool {
        self.status == CourseStatus::Approved
    }

    pub fn is_taught_by(&self, user_id: &UserId) -> bool {
        &self.instructor_id == user_id
    }
}
