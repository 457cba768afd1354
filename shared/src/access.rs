//! Decides where a request for a session's live meeting should land.
//!
//! Everything the decision depends on is passed in explicitly, so the same
//! function backs the server's join endpoint and the client navigator.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::form_urlencoded;

/// How far the caller got through the access checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    Unauthenticated,
    /// Authenticated, but the session is missing or unpublished.
    Unknown,
    NotEnrolled,
    Enrolled,
}

/// Where the caller is sent next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Destination {
    Login { return_to: String },
    NotFound,
    SessionDetail { session_id: i64 },
    MeetingLink { url: String },
}

/// Paths of the views the resolver can send a caller to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoints {
    pub login_path: String,
    pub not_found_path: String,
    pub sessions_path: String,
}

impl Default for EntryPoints {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            not_found_path: "/not-found".to_string(),
            sessions_path: "/sessions".to_string(),
        }
    }
}

impl EntryPoints {
    pub fn session_detail(&self, session_id: impl fmt::Display) -> String {
        format!("{}/{}", self.sessions_path.trim_end_matches('/'), session_id)
    }
}

impl Destination {
    /// Location header value for this destination.
    pub fn location(&self, entry_points: &EntryPoints) -> String {
        match self {
            Destination::Login { return_to } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("next", return_to)
                    .finish();
                format!("{}?{}", entry_points.login_path, query)
            }
            Destination::NotFound => entry_points.not_found_path.clone(),
            Destination::SessionDetail { session_id } => entry_points.session_detail(*session_id),
            Destination::MeetingLink { url } => url.clone(),
        }
    }

    pub fn is_meeting_link(&self) -> bool {
        matches!(self, Destination::MeetingLink { .. })
    }
}

/// What is known about the requested session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAccess {
    pub published: bool,
    /// `None` when the link was withheld from the caller.
    pub meeting_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("enrollment lookup failed: {0}")]
pub struct LookupFailure(pub String);

/// Outcome of the enrollment lookup for (user, session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentLookup {
    NotChecked,
    Enrolled,
    NotEnrolled,
    Failed(LookupFailure),
}

impl From<bool> for EnrollmentLookup {
    fn from(enrolled: bool) -> Self {
        if enrolled {
            EnrollmentLookup::Enrolled
        } else {
            EnrollmentLookup::NotEnrolled
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    pub session_id: i64,
    pub user_id: Option<i64>,
    /// `None` when the session does not exist.
    pub session: Option<SessionAccess>,
    pub enrollment: EnrollmentLookup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub state: AccessState,
    pub destination: Destination,
    /// Set when the enrollment lookup failed; the caller logs it.
    pub lookup_failure: Option<LookupFailure>,
}

impl Resolution {
    /// Sends an unauthenticated caller to login, returning to `return_to` afterwards.
    pub fn login(return_to: String) -> Self {
        Resolution {
            state: AccessState::Unauthenticated,
            destination: Destination::Login { return_to },
            lookup_failure: None,
        }
    }
}

pub fn resolve(ctx: &AccessContext, entry_points: &EntryPoints) -> Resolution {
    if ctx.user_id.is_none() {
        return Resolution::login(entry_points.session_detail(ctx.session_id));
    }

    let session = match &ctx.session {
        Some(session) if session.published => session,
        _ => {
            return Resolution {
                state: AccessState::Unknown,
                destination: Destination::NotFound,
                lookup_failure: None,
            }
        }
    };

    let not_enrolled = |lookup_failure| Resolution {
        state: AccessState::NotEnrolled,
        destination: Destination::SessionDetail {
            session_id: ctx.session_id,
        },
        lookup_failure,
    };

    match (&ctx.enrollment, &session.meeting_link) {
        (EnrollmentLookup::Enrolled, Some(url)) => Resolution {
            state: AccessState::Enrolled,
            destination: Destination::MeetingLink { url: url.clone() },
            lookup_failure: None,
        },
        (EnrollmentLookup::Failed(failure), _) => not_enrolled(Some(failure.clone())),
        // Enrolled without a visible link, not checked, or not enrolled
        _ => not_enrolled(None),
    }
}
