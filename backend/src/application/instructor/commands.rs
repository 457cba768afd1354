// Instructor commands

pub mod publish_session;
pub mod reschedule_session;
pub mod schedule_session;

use crate::application::ports::{CourseRepository, SessionRepository};
use crate::domain::entities::Session;
use crate::domain::value_objects::{SessionId, UserId};
use crate::error::AppError;

/// Loads a session and checks that `instructor_id` teaches its course.
async fn owned_session<C, S>(
    courses: &C,
    sessions: &S,
    instructor_id: &UserId,
    session_id: &SessionId,
) -> Result<Session, AppError>
where
    C: CourseRepository + ?Sized,
    S: SessionRepository + ?Sized,
{
    let session = sessions
        .find_by_id(session_id)
        .await?
        .ok_or(AppError::NotFound("session"))?;
    let course = courses
        .find_by_id(&session.course_id)
        .await?
        .ok_or(AppError::NotFound("course"))?;
    if !course.is_taught_by(instructor_id) {
        return Err(AppError::Forbidden("session belongs to another instructor"));
    }
    Ok(session)
}
