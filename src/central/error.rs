use http::StatusCode;
use thiserror::Error;

/// Why a resource class contributed nothing to a scrape.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("cannot decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Value of the `reason` label on failure counters.
    pub fn reason(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Status(_) => "status",
            FetchError::Decode(_) => "decode",
        }
    }
}

/// Why a token exchange left the token state untouched.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token exchange request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("token exchange rejected with status {0}")]
    Status(StatusCode),
    #[error("cannot decode token exchange response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("token exchange response carries no access_token")]
    MissingAccessToken,
}
