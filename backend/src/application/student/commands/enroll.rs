use chrono::{DateTime, Utc};
use crate::application::ports::{EnrollmentRepository, RepositoryError, SessionRepository};
use crate::domain::entities::Enrollment;
use crate::domain::value_objects::{SessionId, UserId};
use crate::error::AppError;

pub async fn execute<S, E>(
    sessions: &S,
    enrollments: &E,
    user_id: &UserId,
    session_id: &SessionId,
    now: DateTime<Utc>,
) -> Result<Enrollment, AppError>
where
    S: SessionRepository + ?Sized,
    E: EnrollmentRepository + ?Sized,
{
    let session = sessions
        .find_by_id(session_id)
        .await?
        .filter(|s| s.published)
        .ok_or(AppError::NotFound("session"))?;
    if session.schedule.has_ended(now) {
        return Err(AppError::Conflict("session has already ended"));
    }

    let enrollment = Enrollment::new(*user_id, *session_id, now);
    match enrollments.create(&enrollment).await {
        Ok(()) => {
            tracing::info!(user_id = %user_id, session_id = %session_id, "enrolled");
            Ok(enrollment)
        }
        Err(RepositoryError::Duplicate) => Err(AppError::Conflict("already enrolled")),
        Err(e) => Err(e.into()),
    }
}
