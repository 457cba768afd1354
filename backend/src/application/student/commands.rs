// Student commands

pub mod cancel_enrollment;
pub mod check_enrollment;
pub mod enroll;
pub mod get_session;
pub mod join_session;
pub mod list_upcoming_sessions;
