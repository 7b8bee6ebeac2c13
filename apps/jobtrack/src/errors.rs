use thiserror::Error;

/// Client-level error type shared by the API client, matchers and controllers.
///
/// Controllers collapse every variant except `Cancelled` into a single
/// blocking notification; the variants exist so logs and tests can tell the
/// failure kinds apart.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Backend unreachable, connection reset, timeout.
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The request was superseded by a newer one before it completed.
    #[error("Request cancelled")]
    Cancelled,
}

impl ClientError {
    /// True when the backend could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }
}
