use crate::application::ports::CourseRepository;
use crate::domain::entities::{Course, CourseStatus};
use crate::domain::value_objects::CourseId;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

pub async fn execute<C: CourseRepository + ?Sized>(
    courses: &C,
    course_id: &CourseId,
    decision: Decision,
) -> Result<Course, AppError> {
    let mut course = courses
        .find_by_id(course_id)
        .await?
        .ok_or(AppError::NotFound("course"))?;
    let status = match decision {
        Decision::Approve => CourseStatus::Approved,
        Decision::Reject => CourseStatus::Rejected,
    };
    if course.status != status {
        courses.update_status(course_id, status).await?;
        course.status = status;
        tracing::info!(course_id = %course_id, status = status.as_db_str(), "course reviewed");
    }
    Ok(course)
}
