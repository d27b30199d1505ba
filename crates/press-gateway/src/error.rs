//! Error types for the content gateway.

use std::fmt;

/// Error from a content API request.
///
/// Public gateway operations never return this; it is surfaced by the
/// `try_*` variants and logged before the non-failing variants fall back
/// to their defaults.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned a non-success status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// I/O error while talking to the server.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Response body is not the JSON we expected.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure class of a [`GatewayError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection refused, DNS failure, timeout.
    Transport,
    /// Server answered with a non-success status.
    Status,
    /// Body could not be decoded.
    Decode,
}

impl GatewayError {
    /// Classify the error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::HttpRequest(ureq::Error::StatusCode(_)) | Self::HttpResponse { .. } => {
                FailureKind::Status
            }
            Self::HttpRequest(ureq::Error::Json(_)) | Self::Json(_) => FailureKind::Decode,
            Self::HttpRequest(_) | Self::Io(_) => FailureKind::Transport,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Transport => "transport",
            Self::Status => "status",
            Self::Decode => "decode",
        })
    }
}
