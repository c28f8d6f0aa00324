use reqwest::StatusCode;

use super::types::{ClipsResponse, ErrorResponse};

/// Errors returned by [`TwitchClient`](super::TwitchClient) operations
#[derive(Debug, thiserror::Error)]
pub enum ClipError {
    #[error("Missing Client-ID or Client-Secret")]
    MissingCredentials,

    #[error("No access token, refresh the auth token first")]
    Unauthenticated,

    #[error("Client-ID missing")]
    MissingClientId,

    /// Rejected locally before any request was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transport error: {0:#}")]
    Transport(#[source] anyhow::Error),

    #[error("Request cancelled")]
    Cancelled,

    #[error("API error {status} ({label}): {message}")]
    Api {
        label: String,
        message: String,
        status: u16,
    },

    #[error("Failed to decode response body {raw_body:?}: {source}")]
    Decode {
        raw_body: String,
        #[source]
        source: serde_json::Error,
        /// Clips that could still be decoded, only set by clip lookups
        partial: Option<Box<ClipsResponse>>,
    },

    #[error("API returned an empty result")]
    EmptyResult,
}

impl ClipError {
    pub(crate) fn decode(raw_body: &str, source: serde_json::Error) -> Self {
        ClipError::Decode {
            raw_body: raw_body.to_string(),
            source,
            partial: None,
        }
    }

    /// Returns true for a 401 response, the usual cue to refresh the token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClipError::Api { status: 401, .. })
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            ClipError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Best-effort clips salvaged from a lookup whose body failed to decode
    pub fn partial_clips(&self) -> Option<&ClipsResponse> {
        match self {
            ClipError::Decode {
                partial: Some(partial),
                ..
            } => Some(&**partial),
            _ => None,
        }
    }
}

/// Checks a response against the one status an endpoint succeeds with
///
/// Returns the body on success. Otherwise the body is read as an
/// [`ErrorResponse`]; when it is not one, the error is built from the status
/// line alone.
pub fn classify_response(status: u16, body: &str, expected: u16) -> Result<&str, ClipError> {
    if status == expected {
        return Ok(body);
    }

    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) if !err.message.is_empty() || !err.error.is_empty() => Err(ClipError::Api {
            label: err.error,
            message: err.message,
            status: if err.status == 0 { status } else { err.status },
        }),
        _ => Err(from_status_line(status)),
    }
}

fn from_status_line(status: u16) -> ClipError {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status");

    ClipError::Api {
        label: reason.to_string(),
        message: format!("{} {}", status, reason),
        status,
    }
}
