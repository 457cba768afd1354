pub mod admin;
pub mod enrollments;
pub mod middleware;
pub mod routes;
pub mod sessions;

pub use routes::{api_routes, ApiRoutes, Endpoint};

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use shared::protocol::ErrorBody;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::domain::value_objects::{CourseId, SessionId};
use crate::error::AppError;
use crate::infrastructure::AppState;
use crate::routing::RouteParams;
use middleware::AuthenticatedUser;

const API_PREFIX: &str = "/api";

pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/api/*rest", any(dispatch))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Everything a handler may need from the request, after routing.
pub struct ApiRequest {
    pub user: Option<AuthenticatedUser>,
    pub params: RouteParams,
    pub body: Bytes,
}

impl ApiRequest {
    pub fn user(&self) -> Result<&AuthenticatedUser, AppError> {
        self.user.as_ref().ok_or(AppError::AuthenticationRequired)
    }

    /// Raw parameter text, exactly as it appeared in the path.
    pub fn param(&self, name: &str) -> &str {
        self.params.get(name).unwrap_or_default()
    }

    pub fn session_id(&self, name: &str) -> Result<SessionId, AppError> {
        SessionId::parse(self.param(name)).ok_or(AppError::NotFound("session"))
    }

    pub fn course_id(&self, name: &str) -> Result<CourseId, AppError> {
        CourseId::parse(self.param(name)).ok_or(AppError::NotFound("course"))
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        serde_json::from_slice(&self.body).map_err(|e| AppError::Validation(e.to_string()))
    }
}

/// Single entry point for `/api/*`: matches the raw path against the route
/// table so parameter values reach handlers unchanged.
pub async fn dispatch(
    State(state): State<AppState>,
    user: Option<AuthenticatedUser>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let path = uri.path().strip_prefix(API_PREFIX).unwrap_or(uri.path());

    let matched = state
        .routes
        .table(&method)
        .and_then(|table| table.dispatch(path))
        .map(|m| (*m.handler, m.params));
    let Some((endpoint, params)) = matched else {
        if state.routes.knows_path(path) {
            return (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(ErrorBody {
                    error: format!("method {method} not allowed"),
                    code: Some("method_not_allowed".to_string()),
                }),
            )
                .into_response();
        }
        return AppError::NotFound("route").into_response();
    };

    tracing::debug!(method = %method, path, endpoint = ?endpoint, "dispatching");
    let request = ApiRequest { user, params, body };
    let result = match endpoint {
        Endpoint::Health => Ok((StatusCode::OK, "OK").into_response()),
        Endpoint::LegacyUpcoming => Ok(sessions::legacy_upcoming()),
        Endpoint::UpcomingSessions => sessions::upcoming(&state).await,
        Endpoint::SessionDetail => sessions::detail(&state, &request).await,
        Endpoint::JoinSession => sessions::join(&state, &request).await,
        Endpoint::ScheduleSession => sessions::schedule(&state, &request).await,
        Endpoint::RescheduleSession => sessions::reschedule(&state, &request).await,
        Endpoint::PublishSession => sessions::publish(&state, &request).await,
        Endpoint::CheckEnrollment => enrollments::check(&state, &request).await,
        Endpoint::Enroll => enrollments::enroll(&state, &request).await,
        Endpoint::CancelEnrollment => enrollments::cancel(&state, &request).await,
        Endpoint::ApproveCourse => admin::approve_course(&state, &request).await,
        Endpoint::RejectCourse => admin::reject_course(&state, &request).await,
    };
    result.unwrap_or_else(IntoResponse::into_response)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn health_is_served_through_route_table() {
        let (app, _) = app().await;
        let response = send(&app, Method::GET, "/api/health", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let (app, _) = app().await;
        let response = send(&app, Method::GET, "/api/courses", None, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorBody = json_body(response).await;
        assert_eq!(body.code.as_deref(), Some("not_found"));
    }

    #[tokio::test]
    async fn known_path_under_wrong_method_is_405() {
        let (app, _) = app().await;
        let response = send(&app, Method::PUT, "/api/sessions/upcoming", None, None).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn malformed_json_is_unprocessable() {
        let (app, _) = app().await;
        let auth = bearer(2, &["instructor"]);
        let response = send(
            &app,
            Method::POST,
            "/api/sessions",
            Some(&auth),
            Some(serde_json::json!({ "course_id": "one" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
