use chrono::{DateTime, Utc};
use crate::application::ports::{CourseRepository, SessionRepository};
use crate::domain::entities::{NewSession, Session};
use crate::domain::value_objects::{CourseId, MeetingLink, Schedule, UserId};
use crate::error::AppError;

pub struct ScheduleSessionCommand {
    pub instructor_id: UserId,
    pub course_id: CourseId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub meeting_link: String,
}

/// Creates an unpublished session for an approved course the caller teaches.
pub async fn execute<C, S>(courses: &C, sessions: &S, cmd: ScheduleSessionCommand) -> Result<Session, AppError>
where
    C: CourseRepository + ?Sized,
    S: SessionRepository + ?Sized,
{
    let schedule = Schedule::new(cmd.starts_at, cmd.ends_at).map_err(AppError::Validation)?;
    let meeting_link = MeetingLink::new(cmd.meeting_link).map_err(AppError::Validation)?;

    let course = courses
        .find_by_id(&cmd.course_id)
        .await?
        .ok_or(AppError::NotFound("course"))?;
    if !course.is_taught_by(&cmd.instructor_id) {
        return Err(AppError::Forbidden("course belongs to another instructor"));
    }
    if !course.is_approved() {
        return Err(AppError::Conflict("course is not approved"));
    }

    let session = sessions
        .create(&NewSession {
            course_id: cmd.course_id,
            schedule,
            meeting_link,
        })
        .await?;
    tracing::info!(session_id = %session.id, course_id = %cmd.course_id, "session scheduled");
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockCourseRepository, MockSessionRepository};
    use crate::application::test_support::{course, session};
    use crate::domain::entities::CourseStatus;
    use chrono::Duration;

    fn command(link: &str, length: Duration) -> ScheduleSessionCommand {
        let starts_at = Utc::now() + Duration::days(1);
        ScheduleSessionCommand {
            instructor_id: UserId::new(5),
            course_id: CourseId::new(3),
            starts_at,
            ends_at: starts_at + length,
            meeting_link: link.to_string(),
        }
    }

    fn courses_with(status: CourseStatus, instructor: i64) -> MockCourseRepository {
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(course(3, instructor, status))));
        courses
    }

    #[tokio::test]
    async fn schedules_for_approved_course() {
        let courses = courses_with(CourseStatus::Approved, 5);
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_create()
            .withf(|new| new.course_id == CourseId::new(3) && new.meeting_link.as_str() == "https://meet.example.com/x")
            .times(1)
            .return_once(|_| Ok(session(9, 3, false)));
        let created = execute(&courses, &sessions, command("https://meet.example.com/x", Duration::hours(1)))
            .await
            .unwrap();
        assert!(!created.published);
    }

    #[tokio::test]
    async fn rejects_inverted_schedule_before_touching_storage() {
        let courses = MockCourseRepository::new();
        let sessions = MockSessionRepository::new();
        let result = execute(&courses, &sessions, command("https://meet.example.com/x", Duration::hours(-1))).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn rejects_bad_link() {
        let courses = MockCourseRepository::new();
        let sessions = MockSessionRepository::new();
        let result = execute(&courses, &sessions, command("meet.example.com/x", Duration::hours(1))).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn other_instructors_course_is_forbidden() {
        let courses = courses_with(CourseStatus::Approved, 6);
        let sessions = MockSessionRepository::new();
        let result = execute(&courses, &sessions, command("https://meet.example.com/x", Duration::hours(1))).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn pending_course_cannot_take_sessions() {
        let courses = courses_with(CourseStatus::Pending, 5);
        let sessions = MockSessionRepository::new();
        let result = execute(&courses, &sessions, command("https://meet.example.com/x", Duration::hours(1))).await;
        assert!(matches!(result, Err(AppError::Conflict("course is not approved"))));
    }
}
