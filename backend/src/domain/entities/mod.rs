pub mod course;
pub mod enrollment;
pub mod session;

pub use course::{Course, CourseStatus};
pub use enrollment::Enrollment;
pub use session::{NewSession, Session};
