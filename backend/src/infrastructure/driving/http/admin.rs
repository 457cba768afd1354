use axum::{
    response::{IntoResponse, Response},
    Json,
};
use shared::protocol::{CourseStatus as WireCourseStatus, CourseStatusResponse};

use super::ApiRequest;
use crate::application::admin::commands::review_course::{self, Decision};
use crate::domain::entities::CourseStatus;
use crate::domain::value_objects::UserRole;
use crate::error::AppError;
use crate::infrastructure::AppState;

fn wire_status(status: CourseStatus) -> WireCourseStatus {
    match status {
        CourseStatus::Pending => WireCourseStatus::Pending,
        CourseStatus::Approved => WireCourseStatus::Approved,
        CourseStatus::Rejected => WireCourseStatus::Rejected,
    }
}

async fn review(state: &AppState, req: &ApiRequest, decision: Decision) -> Result<Response, AppError> {
    req.user()?.require_role(UserRole::Admin)?;
    let course_id = req.course_id("id")?;
    let course = review_course::execute(&*state.course_repo, &course_id, decision).await?;
    Ok(Json(CourseStatusResponse {
        course_id: course.id.value(),
        status: wire_status(course.status),
    })
    .into_response())
}

pub async fn approve_course(state: &AppState, req: &ApiRequest) -> Result<Response, AppError> {
    review(state, req, Decision::Approve).await
}

pub async fn reject_course(state: &AppState, req: &ApiRequest) -> Result<Response, AppError> {
    review(state, req, Decision::Reject).await
}
