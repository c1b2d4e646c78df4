// Errors reported by the remote client. Everything above the client works
// with `anyhow` and attaches context as it propagates.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The instance answered, but with a failure status or an `error` body.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no access token, log in first")]
    NotAuthenticated,
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
