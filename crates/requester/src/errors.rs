use thiserror::Error;

#[derive(Error, Debug)]
pub enum RequesterError {
    #[error("HTTP client error: {0}")]
    ClientError(#[from] reqwest::Error),

    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
