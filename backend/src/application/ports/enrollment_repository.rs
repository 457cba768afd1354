use async_trait::async_trait;
use crate::application::ports::RepositoryError;
use crate::domain::entities::Enrollment;
use crate::domain::value_objects::{SessionId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn exists(&self, user_id: &UserId, session_id: &SessionId) -> Result<bool, RepositoryError>;
    /// Fails with `RepositoryError::Duplicate` if (user, session) is already enrolled.
    async fn create(&self, enrollment: &Enrollment) -> Result<(), RepositoryError>;
    /// Returns whether a record was removed.
    async fn delete(&self, user_id: &UserId, session_id: &SessionId) -> Result<bool, RepositoryError>;
}
