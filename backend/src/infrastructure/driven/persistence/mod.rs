mod db_types;
pub mod course_repository;
pub mod enrollment_repository;
pub mod in_memory;
pub mod session_repository;

pub use course_repository::PostgresCourseRepository;
pub use enrollment_repository::PostgresEnrollmentRepository;
pub use in_memory::InMemoryCatalog;
pub use session_repository::PostgresSessionRepository;

use crate::application::ports::RepositoryError;

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::Duplicate,
            _ => RepositoryError::Unavailable(format!("Database error: {err}")),
        }
    }
}
