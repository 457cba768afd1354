use crate::application::ports::EnrollmentRepository;
use crate::domain::value_objects::{SessionId, UserId};
use crate::error::AppError;

pub async fn execute<E: EnrollmentRepository + ?Sized>(
    enrollments: &E,
    user_id: &UserId,
    session_id: &SessionId,
) -> Result<(), AppError> {
    if !enrollments.delete(user_id, session_id).await? {
        return Err(AppError::NotFound("enrollment"));
    }
    tracing::info!(user_id = %user_id, session_id = %session_id, "enrollment cancelled");
    Ok(())
}
