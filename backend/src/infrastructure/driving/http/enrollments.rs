use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use shared::protocol::{EnrollmentCheck, EnrollmentReceipt};

use super::ApiRequest;
use crate::application::student::commands::{cancel_enrollment, check_enrollment, enroll as enroll_command};
use crate::error::AppError;
use crate::infrastructure::AppState;

/// `GET /enrollments/check/{session_id}`: 401 without a valid token, 503 when
/// the lookup itself fails.
pub async fn check(state: &AppState, req: &ApiRequest) -> Result<Response, AppError> {
    let user = req.user()?;
    let session_id = req.session_id("session_id")?;
    let enrolled = check_enrollment::execute(&*state.enrollment_repo, &user.id, &session_id).await?;
    Ok(Json(EnrollmentCheck { enrolled }).into_response())
}

pub async fn enroll(state: &AppState, req: &ApiRequest) -> Result<Response, AppError> {
    let user = req.user()?;
    let session_id = req.session_id("session_id")?;
    let enrollment = enroll_command::execute(
        &*state.session_repo,
        &*state.enrollment_repo,
        &user.id,
        &session_id,
        Utc::now(),
    )
    .await?;
    let receipt = EnrollmentReceipt {
        enrollment_id: enrollment.id.to_string(),
        session_id: enrollment.session_id.value(),
        enrolled_at: enrollment.enrolled_at,
    };
    Ok((StatusCode::CREATED, Json(receipt)).into_response())
}

pub async fn cancel(state: &AppState, req: &ApiRequest) -> Result<Response, AppError> {
    let user = req.user()?;
    let session_id = req.session_id("session_id")?;
    cancel_enrollment::execute(&*state.enrollment_repo, &user.id, &session_id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
