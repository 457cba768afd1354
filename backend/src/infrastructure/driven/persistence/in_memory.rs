use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use crate::application::ports::{CourseRepository, EnrollmentRepository, RepositoryError, SessionRepository};
use crate::domain::entities::{Course, CourseStatus, Enrollment, NewSession, Session};
use crate::domain::value_objects::{CourseId, Schedule, SessionId, UserId};

/// In-memory courses, sessions and enrollments. Starts empty; used for smoke
/// runs without a database and in tests. In production these live in PostgreSQL.
#[derive(Default)]
pub struct InMemoryCatalog {
    courses: RwLock<HashMap<CourseId, Course>>,
    sessions: RwLock<HashMap<SessionId, Session>>,
    enrollments: RwLock<HashMap<(UserId, SessionId), Enrollment>>,
    next_session_id: RwLock<i64>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn insert_course(&self, course: Course) {
        self.courses.write().await.insert(course.id, course);
    }

    #[cfg(test)]
    pub async fn insert_session(&self, session: Session) {
        let mut next = self.next_session_id.write().await;
        *next = (*next).max(session.id.value());
        self.sessions.write().await.insert(session.id, session);
    }
}

#[async_trait]
impl SessionRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn list_upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Session>, RepositoryError> {
        let courses = self.courses.read().await;
        let sessions = self.sessions.read().await;
        let mut upcoming: Vec<Session> = sessions
            .values()
            .filter(|s| s.is_upcoming(now))
            .filter(|s| courses.get(&s.course_id).is_some_and(Course::is_approved))
            .cloned()
            .collect();
        upcoming.sort_by_key(|s| (s.schedule.starts_at(), s.id));
        Ok(upcoming)
    }

    async fn create(&self, new: &NewSession) -> Result<Session, RepositoryError> {
        let mut next = self.next_session_id.write().await;
        *next += 1;
        let session = Session {
            id: SessionId::new(*next),
            course_id: new.course_id,
            schedule: new.schedule,
            meeting_link: new.meeting_link.clone(),
            published: false,
        };
        self.sessions.write().await.insert(session.id, session.clone());
        Ok(session)
    }

    async fn update_schedule(&self, id: &SessionId, schedule: &Schedule) -> Result<(), RepositoryError> {
        if let Some(session) = self.sessions.write().await.get_mut(id) {
            session.reschedule(*schedule);
        }
        Ok(())
    }

    async fn set_published(&self, id: &SessionId, published: bool) -> Result<(), RepositoryError> {
        if let Some(session) = self.sessions.write().await.get_mut(id) {
            session.published = published;
        }
        Ok(())
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryCatalog {
    async fn exists(&self, user_id: &UserId, session_id: &SessionId) -> Result<bool, RepositoryError> {
        Ok(self.enrollments.read().await.contains_key(&(*user_id, *session_id)))
    }

    async fn create(&self, enrollment: &Enrollment) -> Result<(), RepositoryError> {
        let mut enrollments = self.enrollments.write().await;
        let key = (enrollment.user_id, enrollment.session_id);
        if enrollments.contains_key(&key) {
            return Err(RepositoryError::Duplicate);
        }
        enrollments.insert(key, enrollment.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &UserId, session_id: &SessionId) -> Result<bool, RepositoryError> {
        Ok(self.enrollments.write().await.remove(&(*user_id, *session_id)).is_some())
    }
}

#[async_trait]
impl CourseRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError> {
        Ok(self.courses.read().await.get(id).cloned())
    }

    async fn update_status(&self, id: &CourseId, status: CourseStatus) -> Result<(), RepositoryError> {
        if let Some(course) = self.courses.write().await.get_mut(id) {
            course.status = status;
        }
        Ok(())
    }
}
