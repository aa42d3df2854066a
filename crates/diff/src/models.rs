use bytes::Bytes;

/// Knobs for the dynamic comparison heuristics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParserTuning {
    /// Pattern sets at least this large tolerate one missing pattern
    pub min_patterns: usize,
    /// Similarity a longer candidate needs when a small pattern set fails
    pub fallback_ratio: f64,
}

impl Default for ParserTuning {
    fn default() -> Self {
        Self {
            min_patterns: 20,
            fallback_ratio: 0.75,
        }
    }
}

/// Fingerprint of a page built from two samples of it.
///
/// Identical samples make the page static (exact comparison). Otherwise the
/// whitespace tokens both samples share, in order, form the static pattern
/// set that later bodies must contain.
#[derive(Debug, Clone)]
pub struct DynamicContentParser {
    pub(super) base: Bytes,
    pub(super) base_token_count: usize,
    /// `None` for a static page
    pub(super) static_patterns: Option<Vec<String>>,
    pub(super) comparison_ratio: f64,
    pub(super) tuning: ParserTuning,
}
