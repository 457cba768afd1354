use async_trait::async_trait;
use crate::application::ports::RepositoryError;
use crate::domain::entities::{Course, CourseStatus};
use crate::domain::value_objects::CourseId;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError>;
    async fn update_status(&self, id: &CourseId, status: CourseStatus) -> Result<(), RepositoryError>;
}
