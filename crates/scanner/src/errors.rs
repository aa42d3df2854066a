use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Scan is not running")]
    NotRunning,

    #[error("Failed to spawn worker thread: {0}")]
    Thread(#[from] std::io::Error),
}
