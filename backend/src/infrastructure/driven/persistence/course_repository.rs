use async_trait::async_trait;
use sqlx::PgPool;
use crate::application::ports::{CourseRepository, RepositoryError};
use crate::domain::entities::{Course, CourseStatus};
use crate::domain::value_objects::CourseId;
use crate::infrastructure::driven::persistence::db_types::DbCourse;

pub struct PostgresCourseRepository {
    pool: PgPool,
}

impl PostgresCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PostgresCourseRepository {
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError> {
        let row: Option<DbCourse> = sqlx::query_as(
            "SELECT id, instructor_id, title, status
             FROM courses
             WHERE id = $1"
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Course::try_from).transpose()
    }

    async fn update_status(&self, id: &CourseId, status: CourseStatus) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE courses SET status = $2 WHERE id = $1")
            .bind(id.value())
            .bind(status.as_db_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
