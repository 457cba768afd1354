// Infrastructure layer - external concerns (database, HTTP)
// Implements interfaces defined in application layer

use std::sync::Arc;
use shared::access::EntryPoints;
use crate::application::ports::{CourseRepository, EnrollmentRepository, SessionRepository};
use crate::infrastructure::driving::http::ApiRoutes;

pub mod driven;    // Output adapters (repositories)
pub mod driving;   // Input adapters (HTTP)

#[derive(Clone)]
pub struct AppState {
    pub jwt_secret: String,
    pub entry_points: EntryPoints,
    pub routes: Arc<ApiRoutes>,
    pub session_repo: Arc<dyn SessionRepository>,
    pub enrollment_repo: Arc<dyn EnrollmentRepository>,
    pub course_repo: Arc<dyn CourseRepository>,
}
