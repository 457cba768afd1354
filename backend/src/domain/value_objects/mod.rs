pub mod user_id;
pub mod session_id;
pub mod course_id;
pub mod user_role;
pub mod meeting_link;
pub mod schedule;

pub use user_id::UserId;
pub use session_id::SessionId;
pub use course_id::CourseId;
pub use user_role::UserRole;
pub use meeting_link::MeetingLink;
pub use schedule::Schedule;
