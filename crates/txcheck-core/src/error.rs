#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Missing or unusable caller input, rejected before any upstream call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("upstream failure: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failures talking to a third-party chain API. Every variant means the
/// lookup outcome is indeterminate, never that the transaction is absent.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("server error {code}: {message}")]
    ServerError { code: i64, message: String },
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

impl CoreError {
    pub(crate) fn invalid_response(message: impl Into<String>) -> Self {
        Self::Upstream(UpstreamError::InvalidResponse(message.into()))
    }
}
