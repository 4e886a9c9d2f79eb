//! Client-facing error taxonomy.
//!
//! Every failure a caller must branch on is a [`ClientError`] variant; all
//! of them are terminal for the current transcription job and none of them
//! tear down the capture side. Internal plumbing that only bubbles errors
//! up (settings and history I/O) uses `anyhow` instead.

use thiserror::Error;

/// Errors surfaced by the capture, session, and transcription components.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Microphone access was refused or the device could not be opened.
    /// Recoverable: the user may retry; no existing artifact is touched.
    #[error("Microphone access denied: {0}")]
    PermissionDenied(String),

    /// Required fields were missing at submit time. Never reaches the
    /// network.
    #[error("{0}")]
    Validation(String),

    /// No bearer credential available from the session store. Never
    /// reaches the network.
    #[error("Not authenticated. Please log in again.")]
    Unauthenticated,

    /// The request never produced a structured response: connection
    /// failure, or a non-2xx status without a parseable body.
    #[error("Transcription request failed: {0}")]
    Transport(String),

    /// The server rejected the request with a structured `detail` message,
    /// reproduced verbatim.
    #[error("{0}")]
    Server(String),

    /// A 2xx response that does not carry the expected transcript field.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// The capture pipeline failed to materialize a recording.
    #[error("Recording failed: {0}")]
    Capture(String),
}

impl ClientError {
    /// Whether the error was raised before any network I/O happened.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::PermissionDenied(_)
                | ClientError::Validation(_)
                | ClientError::Unauthenticated
        )
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

/// Result type alias using [`ClientError`].
pub type Result<T> = std::result::Result<T, ClientError>;
