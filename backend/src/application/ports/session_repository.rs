use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::application::ports::RepositoryError;
use crate::domain::entities::{NewSession, Session};
use crate::domain::value_objects::{Schedule, SessionId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError>;
    /// Published sessions of approved courses that have not ended, earliest first.
    async fn list_upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Session>, RepositoryError>;
    async fn create(&self, session: &NewSession) -> Result<Session, RepositoryError>;
    async fn update_schedule(&self, id: &SessionId, schedule: &Schedule) -> Result<(), RepositoryError>;
    async fn set_published(&self, id: &SessionId, published: bool) -> Result<(), RepositoryError>;
}
