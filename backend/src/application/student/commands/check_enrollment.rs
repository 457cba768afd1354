use crate::application::ports::EnrollmentRepository;
use crate::domain::value_objects::{SessionId, UserId};
use crate::error::AppError;

pub async fn execute<E: EnrollmentRepository + ?Sized>(
    enrollments: &E,
    user_id: &UserId,
    session_id: &SessionId,
) -> Result<bool, AppError> {
    enrollments
        .exists(user_id, session_id)
        .await
        .map_err(|e| AppError::TransientLookup(e.to_string()))
}
