use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use crate::application::ports::{RepositoryError, SessionRepository};
use crate::domain::entities::{NewSession, Session};
use crate::domain::value_objects::{Schedule, SessionId};
use crate::infrastructure::driven::persistence::db_types::DbSession;

pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        let row: Option<DbSession> = sqlx::query_as(
            "SELECT id, course_id, starts_at, ends_at, meeting_link, published
             FROM sessions
             WHERE id = $1"
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Session::from))
    }

    async fn list_upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Session>, RepositoryError> {
        let rows: Vec<DbSession> = sqlx::query_as(
            "SELECT s.id, s.course_id, s.starts_at, s.ends_at, s.meeting_link, s.published
             FROM sessions s
             JOIN courses c ON c.id = s.course_id
             WHERE s.published AND c.status = 'approved' AND s.ends_at > $1
             ORDER BY s.starts_at, s.id"
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Session::from).collect())
    }

    async fn create(&self, session: &NewSession) -> Result<Session, RepositoryError> {
        let row: DbSession = sqlx::query_as(
            "INSERT INTO sessions (course_id, starts_at, ends_at, meeting_link, published)
             VALUES ($1, $2, $3, $4, FALSE)
             RETURNING id, course_id, starts_at, ends_at, meeting_link, published"
        )
        .bind(session.course_id.value())
        .bind(session.schedule.starts_at())
        .bind(session.schedule.ends_at())
        .bind(session.meeting_link.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_schedule(&self, id: &SessionId, schedule: &Schedule) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE sessions SET starts_at = $2, ends_at = $3 WHERE id = $1")
            .bind(id.value())
            .bind(schedule.starts_at())
            .bind(schedule.ends_at())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_published(&self, id: &SessionId, published: bool) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE sessions SET published = $2 WHERE id = $1")
            .bind(id.value())
            .bind(published)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
