// Application ports - Driven ports (output ports implemented by infrastructure)

pub mod course_repository;
pub mod enrollment_repository;
pub mod session_repository;

pub use course_repository::CourseRepository;
pub use enrollment_repository::EnrollmentRepository;
pub use session_repository::SessionRepository;

#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint rejected the write.
    #[error("record already exists")]
    Duplicate,

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}
