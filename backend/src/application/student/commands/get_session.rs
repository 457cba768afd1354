use crate::application::ports::{EnrollmentRepository, SessionRepository};
use crate::domain::entities::Session;
use crate::domain::value_objects::{SessionId, UserId};
use crate::error::AppError;

pub struct SessionDetail {
    pub session: Session,
    /// True only when the viewer's enrollment was confirmed.
    pub meeting_link_visible: bool,
}

pub async fn execute<S, E>(
    sessions: &S,
    enrollments: &E,
    viewer: Option<&UserId>,
    session_id: &SessionId,
) -> Result<SessionDetail, AppError>
where
    S: SessionRepository + ?Sized,
    E: EnrollmentRepository + ?Sized,
{
    let session = sessions
        .find_by_id(session_id)
        .await?
        .filter(|s| s.published)
        .ok_or(AppError::NotFound("session"))?;

    let meeting_link_visible = match viewer {
        Some(user_id) => match enrollments.exists(user_id, session_id).await {
            Ok(enrolled) => enrolled,
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "enrollment lookup failed, hiding meeting link");
                false
            }
        },
        None => false,
    };

    Ok(SessionDetail {
        session,
        meeting_link_visible,
    })
}
