use async_trait::async_trait;
use sqlx::PgPool;
use crate::application::ports::{EnrollmentRepository, RepositoryError};
use crate::domain::entities::Enrollment;
use crate::domain::value_objects::{SessionId, UserId};

pub struct PostgresEnrollmentRepository {
    pool: PgPool,
}

impl PostgresEnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentRepository for PostgresEnrollmentRepository {
    async fn exists(&self, user_id: &UserId, session_id: &SessionId) -> Result<bool, RepositoryError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM enrollments WHERE user_id = $1 AND session_id = $2)"
        )
        .bind(user_id.value())
        .bind(session_id.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(&self, enrollment: &Enrollment) -> Result<(), RepositoryError> {
        // (user_id, session_id) is unique; a violation maps to RepositoryError::Duplicate
        sqlx::query(
            "INSERT INTO enrollments (id, user_id, session_id, enrolled_at)
             VALUES ($1, $2, $3, $4)"
        )
        .bind(enrollment.id)
        .bind(enrollment.user_id.value())
        .bind(enrollment.session_id.value())
        .bind(enrollment.enrolled_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, user_id: &UserId, session_id: &SessionId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM enrollments WHERE user_id = $1 AND session_id = $2")
            .bind(user_id.value())
            .bind(session_id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
