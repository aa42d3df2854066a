use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}
