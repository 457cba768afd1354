use chrono::{DateTime, Utc};
use crate::application::ports::{CourseRepository, SessionRepository};
use crate::domain::entities::Session;
use crate::domain::value_objects::{Schedule, SessionId, UserId};
use crate::error::AppError;

pub async fn execute<C, S>(
    courses: &C,
    sessions: &S,
    instructor_id: &UserId,
    session_id: &SessionId,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
) -> Result<Session, AppError>
where
    C: CourseRepository + ?Sized,
    S: SessionRepository + ?Sized,
{
    let schedule = Schedule::new(starts_at, ends_at).map_err(AppError::Validation)?;
    let mut session = super::owned_session(courses, sessions, instructor_id, session_id).await?;
    sessions.update_schedule(session_id, &schedule).await?;
    session.reschedule(schedule);
    tracing::info!(session_id = %session_id, starts_at = %starts_at, "session rescheduled");
    Ok(session)
}
