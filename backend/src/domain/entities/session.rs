use chrono::{DateTime, Utc};
use crate::domain::value_objects::{CourseId, MeetingLink, Schedule, SessionId};

/// A scheduled live meeting belonging to a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub course_id: CourseId,
    pub schedule: Schedule,
    pub meeting_link: MeetingLink,
    pub published: bool,
}

/// A session that has not been stored yet; storage assigns the id.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub course_id: CourseId,
    pub schedule: Schedule,
    pub meeting_link: MeetingLink,
}

impl Session {
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.published && !self.schedule.has_ended(now)
    }

    pub fn publish(&mut self) {
        self.published = true;
    }

    pub fn reschedule(&mut self, schedule: Schedule) {
        self.schedule = schedule;
    }
}
