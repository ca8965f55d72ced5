use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// API address offered before the user types one
pub const DEFAULT_API_HOST: &str = "http://localhost:8000";

/// Why a submission did not succeed
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubmitError {
    /// Rejected locally, no request was sent
    #[error("{0}")]
    Validation(String),
    /// No response reached the client
    #[error("transport failure: {0}")]
    Transport(String),
    /// Backend answered with a non-2xx status
    #[error("rejected with HTTP {status}")]
    Rejected { status: u16, detail: Option<String> },
    /// 2xx response whose body could not be understood
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl SubmitError {
    /// Text shown to the user.
    ///
    /// Validation errors and backend `detail` strings are shown verbatim,
    /// everything else is reported with `fallback`.
    pub fn alert_message(&self, fallback: &str) -> String {
        match self {
            SubmitError::Validation(msg) => msg.clone(),
            SubmitError::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Validated base address of the backend API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiHost {
    url: Url,
    text: String,
}

impl ApiHost {
    /// Accepts absolute `http`/`https` addresses; a trailing slash is dropped.
    pub fn parse(text: &str) -> Result<Self, SubmitError> {
        let text = text.trim();
        let invalid = || SubmitError::Validation("Invalid API address".to_string());

        let url = Url::parse(text).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https")
            || url.host_str().is_none()
            || url.cannot_be_a_base()
        {
            return Err(invalid());
        }

        let text = if url.query().is_none() && url.fragment().is_none() {
            text.trim_end_matches('/').to_string()
        } else {
            text.to_string()
        };

        Ok(Self { url, text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Full address of an endpoint below this host, e.g. `/login`.
    ///
    /// The endpoint extends the base path; query and fragment of the base
    /// address are kept.
    pub fn endpoint(&self, path: &str) -> String {
        let mut url = self.url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        url.to_string()
    }
}

impl fmt::Display for ApiHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Blocking notice shown to the user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Identity of a mounted screen instance.
///
/// Every navigation mounts a new instance; requests remember the instance
/// that issued them so late results can be told apart.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ScreenId(pub u64);

impl ScreenId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Phase of the submit action of a screen
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// Submission guard shared by every form that talks to the backend.
///
/// While a request is in flight the trigger is disabled and the busy
/// indicator is shown; settling re-enables both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionGuard {
    state: SubmissionState,
}

impl SubmissionGuard {
    /// Enter `Submitting`. Returns `false` if a request is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.state = SubmissionState::Submitting;
        true
    }

    /// Back to `Idle`, whatever the outcome
    pub fn settle(&mut self) {
        self.state = SubmissionState::Idle;
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn can_submit(&self) -> bool {
        !self.is_busy()
    }
}
