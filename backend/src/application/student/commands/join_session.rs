use shared::access::{resolve, AccessContext, EnrollmentLookup, EntryPoints, LookupFailure, Resolution, SessionAccess};
use crate::application::ports::{EnrollmentRepository, SessionRepository};
use crate::domain::value_objects::{SessionId, UserId};
use crate::error::AppError;

/// Decides where a request to join a session's meeting goes.
///
/// Anonymous callers go to login before the id is looked at, so the return
/// path carries the id as requested. For signed-in callers a session id that
/// is not a positive integer is `NotFound`. A failed enrollment lookup never
/// exposes the link: the caller is sent to the session detail view and the
/// failure is logged here, once.
pub async fn execute<S, E>(
    sessions: &S,
    enrollments: &E,
    user_id: Option<&UserId>,
    raw_session_id: &str,
    entry_points: &EntryPoints,
) -> Result<Resolution, AppError>
where
    S: SessionRepository + ?Sized,
    E: EnrollmentRepository + ?Sized,
{
    let Some(user_id) = user_id else {
        return Ok(Resolution::login(entry_points.session_detail(raw_session_id)));
    };
    let session_id = SessionId::parse(raw_session_id).ok_or(AppError::NotFound("session"))?;

    let mut context = AccessContext {
        session_id: session_id.value(),
        user_id: Some(user_id.value()),
        session: None,
        enrollment: EnrollmentLookup::NotChecked,
    };

    let session = sessions.find_by_id(&session_id).await?;
    if let Some(session) = session.filter(|s| s.published) {
        context.enrollment = match enrollments.exists(user_id, &session_id).await {
            Ok(enrolled) => EnrollmentLookup::from(enrolled),
            Err(e) => EnrollmentLookup::Failed(LookupFailure(e.to_string())),
        };
        context.session = Some(SessionAccess {
            published: true,
            meeting_link: Some(session.meeting_link.into_string()),
        });
    }

    let resolution = resolve(&context, entry_points);
    if let Some(failure) = &resolution.lookup_failure {
        tracing::warn!(
            session_id = %session_id,
            user_id = ?context.user_id,
            error = %failure,
            "enrollment lookup failed, sending caller to session detail"
        );
    }
    tracing::debug!(session_id = %session_id, state = ?resolution.state, "join resolved");
    Ok(resolution)
}
