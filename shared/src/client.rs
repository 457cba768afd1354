use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::protocol::{EnrollmentCheck, SessionSummary};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Remote calls the navigator needs to decide where a meeting request goes.
#[async_trait]
pub trait MeetingAccessBackend: Send + Sync {
    /// `Ok(None)` when the session does not exist (or the id is not a session id).
    async fn fetch_session(&self, session_id: i64, bearer: Option<&str>) -> Result<Option<SessionSummary>, ClientError>;

    async fn check_enrollment(&self, session_id: i64, bearer: &str) -> Result<bool, ClientError>;
}

/// `reqwest` client for the server's HTTP API.
pub struct HttpBackend {
    http: reqwest::Client,
    api_base: String,
}

impl HttpBackend {
    pub fn new(http: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

#[async_trait]
impl MeetingAccessBackend for HttpBackend {
    async fn fetch_session(&self, session_id: i64, bearer: Option<&str>) -> Result<Option<SessionSummary>, ClientError> {
        let mut request = self.http.get(self.url(&format!("/sessions/{session_id}")));
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        match response.status() {
            StatusCode::OK => Ok(Some(response.json().await?)),
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(ClientError::UnexpectedStatus(status.as_u16())),
        }
    }

    async fn check_enrollment(&self, session_id: i64, bearer: &str) -> Result<bool, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/enrollments/check/{session_id}")))
            .bearer_auth(bearer)
            .send()
            .await?;
        match response.status() {
            StatusCode::OK => {
                let check: EnrollmentCheck = response.json().await?;
                Ok(check.enrolled)
            }
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthenticated),
            status => Err(ClientError::UnexpectedStatus(status.as_u16())),
        }
    }
}
