use std::sync::atomic::AtomicUsize;

/// Candidate paths loaded from word lists, handed out through an atomic cursor
pub struct WordlistDictionary {
    pub(super) paths: Vec<String>,
    pub(super) extensions: Vec<String>,
    pub(super) cursor: AtomicUsize,
}
