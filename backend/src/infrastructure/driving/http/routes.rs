//! The API's route table. Every `/api` request is dispatched through it.

use axum::http::Method;
use crate::routing::{RouteError, RouteTable};

/// Canonical location of the upcoming-sessions listing.
pub const UPCOMING_SESSIONS_PATH: &str = "/api/sessions/upcoming";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Health,
    /// Old singular spelling, permanently redirected to the listing.
    LegacyUpcoming,
    UpcomingSessions,
    SessionDetail,
    JoinSession,
    ScheduleSession,
    RescheduleSession,
    PublishSession,
    CheckEnrollment,
    Enroll,
    CancelEnrollment,
    ApproveCourse,
    RejectCourse,
}

/// One ordered table per HTTP method.
pub struct ApiRoutes {
    get: RouteTable<Endpoint>,
    post: RouteTable<Endpoint>,
    put: RouteTable<Endpoint>,
    delete: RouteTable<Endpoint>,
}

impl ApiRoutes {
    pub fn table(&self, method: &Method) -> Option<&RouteTable<Endpoint>> {
        match *method {
            Method::GET | Method::HEAD => Some(&self.get),
            Method::POST => Some(&self.post),
            Method::PUT => Some(&self.put),
            Method::DELETE => Some(&self.delete),
            _ => None,
        }
    }

    /// Whether `path` is routable under any method.
    pub fn knows_path(&self, path: &str) -> bool {
        [&self.get, &self.post, &self.put, &self.delete]
            .iter()
            .any(|table| table.dispatch(path).is_some())
    }

    /// Replays fixed sample requests and fails if any lands on the wrong route.
    pub fn verify(&self) -> Result<(), RouteError> {
        self.get.verify([
            ("/health", Some("/health")),
            ("/session/upcoming", Some("/session/upcoming")),
            ("/sessions/upcoming", Some("/sessions/upcoming")),
            ("/sessions/upcoming/", Some("/sessions/upcoming")),
            ("/sessions/42", Some("/sessions/{id}")),
            ("/sessions/not-a-number", Some("/sessions/{id}")),
            ("/sessions/42/join", Some("/sessions/{id}/join")),
            ("/sessions/upcoming/join", Some("/sessions/{id}/join")),
            ("/enrollments/check/42", Some("/enrollments/check/{session_id}")),
            ("/sessions", None),
        ])?;
        self.post.verify([
            ("/sessions", Some("/sessions")),
            ("/sessions/42/publish", Some("/sessions/{id}/publish")),
            ("/enrollments/42", Some("/enrollments/{session_id}")),
            ("/admin/courses/3/approve", Some("/admin/courses/{id}/approve")),
            ("/admin/courses/3/reject", Some("/admin/courses/{id}/reject")),
        ])?;
        self.put.verify([
            ("/sessions/42/schedule", Some("/sessions/{id}/schedule")),
            ("/sessions/upcoming", None),
        ])?;
        self.delete.verify([
            ("/enrollments/42", Some("/enrollments/{session_id}")),
            ("/enrollments/check/42", None),
        ])?;
        Ok(())
    }
}

/// Builds the table. Literal routes are registered before parameterised
/// routes that could otherwise capture them.
pub fn api_routes() -> Result<ApiRoutes, RouteError> {
    let get = RouteTable::new()
        .route("/health", Endpoint::Health)?
        .route("/session/upcoming", Endpoint::LegacyUpcoming)?
        .route("/sessions/upcoming", Endpoint::UpcomingSessions)?
        .route("/sessions/{id}", Endpoint::SessionDetail)?
        .route("/sessions/{id}/join", Endpoint::JoinSession)?
        .route("/enrollments/check/{session_id}", Endpoint::CheckEnrollment)?;

    let post = RouteTable::new()
        .route("/sessions", Endpoint::ScheduleSession)?
        .route("/sessions/{id}/publish", Endpoint::PublishSession)?
        .route("/enrollments/{session_id}", Endpoint::Enroll)?
        .route("/admin/courses/{id}/approve", Endpoint::ApproveCourse)?
        .route("/admin/courses/{id}/reject", Endpoint::RejectCourse)?;

    let put = RouteTable::new().route("/sessions/{id}/schedule", Endpoint::RescheduleSession)?;

    let delete = RouteTable::new().route("/enrollments/{session_id}", Endpoint::CancelEnrollment)?;

    Ok(ApiRoutes { get, post, put, delete })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_passes_self_check() {
        let routes = api_routes().unwrap();
        routes.verify().unwrap();
    }

    #[test]
    fn upcoming_is_never_captured_by_id_route() {
        let routes = api_routes().unwrap();
        let m = routes.table(&Method::GET).unwrap().dispatch("/sessions/upcoming").unwrap();
        assert_eq!(*m.handler, Endpoint::UpcomingSessions);

        let m = routes.table(&Method::GET).unwrap().dispatch("/sessions/42").unwrap();
        assert_eq!(*m.handler, Endpoint::SessionDetail);
        assert_eq!(m.params.get("id"), Some("42"));
    }

    #[test]
    fn path_known_under_other_method() {
        let routes = api_routes().unwrap();
        assert!(routes.table(&Method::PUT).unwrap().dispatch("/sessions/upcoming").is_none());
        assert!(routes.knows_path("/sessions/upcoming"));
        assert!(!routes.knows_path("/courses"));
        assert!(routes.table(&Method::PATCH).is_none());
    }
}
