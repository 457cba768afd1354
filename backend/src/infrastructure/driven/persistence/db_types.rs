use chrono::{DateTime, Utc};
use crate::application::ports::RepositoryError;
use crate::domain::entities::{Course, CourseStatus, Session};
use crate::domain::value_objects::{CourseId, MeetingLink, Schedule, SessionId, UserId};

#[derive(sqlx::FromRow)]
pub struct DbSession {
    pub id: i64,
    pub course_id: i64,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub meeting_link: String,
    pub published: bool,
}

impl From<DbSession> for Session {
    fn from(row: DbSession) -> Self {
        Session {
            id: SessionId::new(row.id),
            course_id: CourseId::new(row.course_id),
            schedule: Schedule::from_stored(row.starts_at, row.ends_at),
            meeting_link: MeetingLink::from_stored(row.meeting_link),
            published: row.published,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct DbCourse {
    pub id: i64,
    pub instructor_id: i64,
    pub title: String,
    pub status: String,
}

impl TryFrom<DbCourse> for Course {
    type Error = RepositoryError;

    fn try_from(row: DbCourse) -> Result<Self, Self::Error> {
        let status = CourseStatus::from_db_str(&row.status)
            .ok_or_else(|| RepositoryError::Corrupt(format!("Unknown course status: {}", row.status)))?;
        Ok(Course {
            id: CourseId::new(row.id),
            instructor_id: UserId::new(row.instructor_id),
            title: row.title,
            status,
        })
    }
}
