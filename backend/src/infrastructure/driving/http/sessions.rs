use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use chrono::Utc;
use shared::protocol::{RescheduleSessionRequest, ScheduleSessionRequest, SessionSummary};

use super::routes::UPCOMING_SESSIONS_PATH;
use super::ApiRequest;
use crate::application::instructor::commands::{publish_session, reschedule_session, schedule_session};
use crate::application::student::commands::{get_session, join_session, list_upcoming_sessions};
use crate::domain::entities::Session;
use crate::domain::value_objects::{CourseId, UserRole};
use crate::error::AppError;
use crate::infrastructure::AppState;

fn summary(session: Session, include_link: bool) -> SessionSummary {
    SessionSummary {
        id: session.id.value(),
        course_id: session.course_id.value(),
        starts_at: session.schedule.starts_at(),
        ends_at: session.schedule.ends_at(),
        published: session.published,
        meeting_link: include_link.then(|| session.meeting_link.into_string()),
    }
}

pub fn legacy_upcoming() -> Response {
    Redirect::permanent(UPCOMING_SESSIONS_PATH).into_response()
}

pub async fn upcoming(state: &AppState) -> Result<Response, AppError> {
    let sessions = list_upcoming_sessions::execute(&*state.session_repo, Utc::now()).await?;
    let body: Vec<SessionSummary> = sessions.into_iter().map(|s| summary(s, false)).collect();
    Ok(Json(body).into_response())
}

pub async fn detail(state: &AppState, req: &ApiRequest) -> Result<Response, AppError> {
    let session_id = req.session_id("id")?;
    let viewer = req.user.as_ref().map(|u| &u.id);
    let detail = get_session::execute(&*state.session_repo, &*state.enrollment_repo, viewer, &session_id).await?;
    Ok(Json(summary(detail.session, detail.meeting_link_visible)).into_response())
}

/// Redirects to wherever the caller may go for this session's meeting.
pub async fn join(state: &AppState, req: &ApiRequest) -> Result<Response, AppError> {
    let user_id = req.user.as_ref().map(|u| &u.id);
    let resolution = join_session::execute(
        &*state.session_repo,
        &*state.enrollment_repo,
        user_id,
        req.param("id"),
        &state.entry_points,
    )
    .await;
    match resolution {
        Ok(resolution) => Ok(Redirect::to(&resolution.destination.location(&state.entry_points)).into_response()),
        Err(AppError::NotFound(_)) => Ok(Redirect::to(&state.entry_points.not_found_path).into_response()),
        Err(e) => Err(e),
    }
}

pub async fn schedule(state: &AppState, req: &ApiRequest) -> Result<Response, AppError> {
    let user = req.user()?;
    user.require_role(UserRole::Instructor)?;
    let body: ScheduleSessionRequest = req.json()?;
    let session = schedule_session::execute(
        &*state.course_repo,
        &*state.session_repo,
        schedule_session::ScheduleSessionCommand {
            instructor_id: user.id,
            course_id: CourseId::new(body.course_id),
            starts_at: body.starts_at,
            ends_at: body.ends_at,
            meeting_link: body.meeting_link,
        },
    )
    .await?;
    // The instructor owns the session, so the link is theirs to see
    Ok((StatusCode::CREATED, Json(summary(session, true))).into_response())
}

pub async fn reschedule(state: &AppState, req: &ApiRequest) -> Result<Response, AppError> {
    let user = req.user()?;
    user.require_role(UserRole::Instructor)?;
    let session_id = req.session_id("id")?;
    let body: RescheduleSessionRequest = req.json()?;
    let session = reschedule_session::execute(
        &*state.course_repo,
        &*state.session_repo,
        &user.id,
        &session_id,
        body.starts_at,
        body.ends_at,
    )
    .await?;
    Ok(Json(summary(session, true)).into_response())
}

pub async fn publish(state: &AppState, req: &ApiRequest) -> Result<Response, AppError> {
    let user = req.user()?;
    user.require_role(UserRole::Instructor)?;
    let session_id = req.session_id("id")?;
    let session = publish_session::execute(&*state.course_repo, &*state.session_repo, &user.id, &session_id).await?;
    Ok(Json(summary(session, true)).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::Method;
    use chrono::Duration;
    use serde_json::json;
    use shared::protocol::ErrorBody;

    use super::super::test_support::*;
    use super::*;
    use crate::application::ports::{EnrollmentRepository, MockEnrollmentRepository, RepositoryError};
    use crate::application::test_support::MEETING_LINK;
    use crate::domain::entities::Enrollment;
    use crate::domain::value_objects::{SessionId, UserId};
    use crate::infrastructure::driven::InMemoryCatalog;
    use crate::infrastructure::driving::http::create_router;

    async fn enroll(catalog: &InMemoryCatalog, user_id: i64, session_id: i64) {
        let enrollment = Enrollment::new(UserId::new(user_id), SessionId::new(session_id), Utc::now());
        EnrollmentRepository::create(catalog, &enrollment).await.unwrap();
    }

    #[tokio::test]
    async fn upcoming_is_not_captured_by_detail_route() {
        let (app, _) = app().await;
        let response = send(&app, Method::GET, "/api/sessions/upcoming", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let sessions: Vec<SessionSummary> = json_body(response).await;
        assert_eq!(sessions.iter().map(|s| s.id).collect::<Vec<_>>(), vec![42]);
        assert!(sessions.iter().all(|s| s.meeting_link.is_none()));
    }

    #[tokio::test]
    async fn legacy_upcoming_path_redirects_permanently() {
        let (app, _) = app().await;
        let response = send(&app, Method::GET, "/api/session/upcoming", None, None).await;
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(location(&response), "/api/sessions/upcoming");
    }

    #[tokio::test]
    async fn detail_hides_link_unless_enrolled() {
        let (app, catalog) = app().await;
        let anonymous: SessionSummary = json_body(send(&app, Method::GET, "/api/sessions/42", None, None).await).await;
        assert_eq!(anonymous.id, 42);
        assert_eq!(anonymous.meeting_link, None);

        let auth = bearer(7, &["student"]);
        let not_enrolled: SessionSummary =
            json_body(send(&app, Method::GET, "/api/sessions/42", Some(&auth), None).await).await;
        assert_eq!(not_enrolled.meeting_link, None);

        enroll(&catalog, 7, 42).await;
        let enrolled: SessionSummary =
            json_body(send(&app, Method::GET, "/api/sessions/42", Some(&auth), None).await).await;
        assert_eq!(enrolled.meeting_link.as_deref(), Some(MEETING_LINK));
    }

    #[tokio::test]
    async fn detail_of_non_numeric_or_draft_session_is_not_found() {
        let (app, _) = app().await;
        for uri in ["/api/sessions/abc", "/api/sessions/43", "/api/sessions/999"] {
            let response = send(&app, Method::GET, uri, None, None).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn join_without_token_redirects_to_login() {
        let (app, _) = app().await;
        let response = send(&app, Method::GET, "/api/sessions/42/join", None, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login?next=%2Fsessions%2F42");
    }

    #[tokio::test]
    async fn anonymous_join_of_malformed_id_redirects_to_login() {
        let (app, _) = app().await;
        let response = send(&app, Method::GET, "/api/sessions/abc/join", None, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login?next=%2Fsessions%2Fabc");
    }

    #[tokio::test]
    async fn join_with_invalid_token_redirects_to_login() {
        let (app, _) = app().await;
        let response = send(&app, Method::GET, "/api/sessions/42/join", Some("Bearer nonsense"), None).await;
        assert_eq!(location(&response), "/login?next=%2Fsessions%2F42");
    }

    #[tokio::test]
    async fn join_routes_by_enrollment() {
        let (app, catalog) = app().await;
        let auth = bearer(7, &["student"]);

        let response = send(&app, Method::GET, "/api/sessions/42/join", Some(&auth), None).await;
        assert_eq!(location(&response), "/sessions/42");

        enroll(&catalog, 7, 42).await;
        let response = send(&app, Method::GET, "/api/sessions/42/join", Some(&auth), None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), MEETING_LINK);
    }

    #[tokio::test]
    async fn join_unknown_session_redirects_to_not_found() {
        let (app, _) = app().await;
        let auth = bearer(7, &["student"]);
        for uri in ["/api/sessions/999/join", "/api/sessions/43/join", "/api/sessions/upcoming/join"] {
            let response = send(&app, Method::GET, uri, Some(&auth), None).await;
            assert_eq!(location(&response), "/not-found", "{uri}");
        }
    }

    #[tokio::test]
    async fn join_fails_closed_when_enrollment_lookup_errors() {
        let catalog = seeded_catalog().await;
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_exists()
            .times(1)
            .returning(|_, _| Err(RepositoryError::Unavailable("connection refused".into())));
        let state = state_with(catalog.clone(), Arc::new(enrollments), catalog.clone());
        let app = create_router(state, &[]);

        let auth = bearer(7, &["student"]);
        let response = send(&app, Method::GET, "/api/sessions/42/join", Some(&auth), None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/sessions/42");
    }

    #[tokio::test]
    async fn instructor_schedules_and_publishes_session() {
        let (app, _) = app().await;
        let auth = bearer(2, &["instructor"]);
        let starts_at = Utc::now() + Duration::days(1);
        let request = json!({
            "course_id": 1,
            "starts_at": starts_at,
            "ends_at": starts_at + Duration::hours(1),
            "meeting_link": "https://meet.example.com/new-room",
        });

        let response = send(&app, Method::POST, "/api/sessions", Some(&auth), Some(request)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: SessionSummary = json_body(response).await;
        assert!(!created.published);
        assert_eq!(created.meeting_link.as_deref(), Some("https://meet.example.com/new-room"));

        let uri = format!("/api/sessions/{}/publish", created.id);
        let published: SessionSummary = json_body(send(&app, Method::POST, &uri, Some(&auth), None).await).await;
        assert!(published.published);

        let upcoming: Vec<SessionSummary> =
            json_body(send(&app, Method::GET, "/api/sessions/upcoming", None, None).await).await;
        assert!(upcoming.iter().any(|s| s.id == created.id));
    }

    #[tokio::test]
    async fn scheduling_requires_instructor_of_approved_course() {
        let (app, _) = app().await;
        let starts_at = Utc::now() + Duration::days(1);
        let request = |course_id: i64| {
            Some(json!({
                "course_id": course_id,
                "starts_at": starts_at,
                "ends_at": starts_at + Duration::hours(1),
                "meeting_link": "https://meet.example.com/room",
            }))
        };

        let student = bearer(7, &["student"]);
        let response = send(&app, Method::POST, "/api/sessions", Some(&student), request(1)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let other_instructor = bearer(3, &["instructor"]);
        let response = send(&app, Method::POST, "/api/sessions", Some(&other_instructor), request(1)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let owner = bearer(2, &["instructor"]);
        let response = send(&app, Method::POST, "/api/sessions", Some(&owner), request(5)).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: ErrorBody = json_body(response).await;
        assert_eq!(body.code.as_deref(), Some("conflict"));
    }

    #[tokio::test]
    async fn reschedule_rejects_inverted_window() {
        let (app, _) = app().await;
        let auth = bearer(2, &["instructor"]);
        let starts_at = Utc::now() + Duration::days(2);
        let request = json!({ "starts_at": starts_at, "ends_at": starts_at - Duration::hours(1) });
        let response = send(&app, Method::PUT, "/api/sessions/42/schedule", Some(&auth), Some(request)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let request = json!({ "starts_at": starts_at, "ends_at": starts_at + Duration::hours(1) });
        let response = send(&app, Method::PUT, "/api/sessions/42/schedule", Some(&auth), Some(request)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let session: SessionSummary = json_body(response).await;
        assert_eq!(session.starts_at, starts_at);
    }
}
