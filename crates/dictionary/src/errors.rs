use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to walk wordlist directory: {0}")]
    WalkDirError(#[from] walkdir::Error),

    #[error("Wordlist not found: {0}")]
    NotFound(String),
}
