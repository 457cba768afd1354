use chrono::{DateTime, Utc};
use crate::application::ports::SessionRepository;
use crate::domain::entities::Session;
use crate::error::AppError;

pub async fn execute<S: SessionRepository + ?Sized>(
    sessions: &S,
    now: DateTime<Utc>,
) -> Result<Vec<Session>, AppError> {
    let mut upcoming = sessions.list_upcoming(now).await?;
    // Storage already filters; this guards adapters that are lax about it
    upcoming.retain(|s| s.is_upcoming(now));
    upcoming.sort_by_key(|s| (s.schedule.starts_at(), s.id));
    Ok(upcoming)
}
