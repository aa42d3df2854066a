use thiserror::Error;

/// Transport-level failure for a single probe.
///
/// This is the only error kind the scan engine recovers from per path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("Too many redirects: {0}")]
    TooManyRedirects(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl RequestError {
    /// Human-readable message handed to error callbacks
    pub fn message(&self) -> String {
        self.to_string()
    }
}
