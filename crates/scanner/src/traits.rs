use dirsift_models::{RequestError, Response};

/// Fetches candidate paths relative to a base URL.
///
/// Called concurrently from every worker thread; each call blocks until the
/// response is complete or the transport fails.
pub trait Requester: Send + Sync {
    fn request(&self, path: &str) -> Result<Response, RequestError>;

    fn base_url(&self) -> &str;
}

/// Shared source of candidate paths.
///
/// `next_path` must hand every path to exactly one caller; once exhausted it
/// keeps returning `None` until `reset` rewinds it.
pub trait Dictionary: Send + Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn reset(&self);

    fn next_path(&self) -> Option<String>;

    /// Extensions registered as suffix classes, without the leading dot
    fn extensions(&self) -> &[String];
}
