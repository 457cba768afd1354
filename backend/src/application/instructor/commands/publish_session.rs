use crate::application::ports::{CourseRepository, SessionRepository};
use crate::domain::entities::Session;
use crate::domain::value_objects::{SessionId, UserId};
use crate::error::AppError;

pub async fn execute<C, S>(
    courses: &C,
    sessions: &S,
    instructor_id: &UserId,
    session_id: &SessionId,
) -> Result<Session, AppError>
where
    C: CourseRepository + ?Sized,
    S: SessionRepository + ?Sized,
{
    let mut session = super::owned_session(courses, sessions, instructor_id, session_id).await?;
    if !session.published {
        sessions.set_published(session_id, true).await?;
        session.publish();
        tracing::info!(session_id = %session_id, "session published");
    }
    Ok(session)
}
