use serde::{Deserialize, Serialize};
use std::fmt;

/// External video-conferencing link. The text is kept exactly as entered;
/// parsing only validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingLink(String);

impl MeetingLink {
    pub fn new(link: String) -> Result<Self, String> {
        let parsed = url::Url::parse(&link).map_err(|e| format!("Invalid meeting link: {e}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err("Meeting link must use http or https".to_string());
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err("Meeting link must have a host".to_string());
        }
        Ok(Self(link))
    }

    /// Rebuilds a link read back from storage without re-validating it.
    pub fn from_stored(link: String) -> Self {
        Self(link)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MeetingLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
