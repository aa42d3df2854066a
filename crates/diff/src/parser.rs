use super::matcher::SequenceMatcher;
use super::models::{DynamicContentParser, ParserTuning};
use bytes::Bytes;

pub(crate) fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

impl DynamicContentParser {
    pub fn new(base: Bytes, variant: &[u8]) -> Self {
        Self::with_tuning(base, variant, ParserTuning::default())
    }

    pub fn with_tuning(base: Bytes, variant: &[u8], tuning: ParserTuning) -> Self {
        let (base_token_count, static_patterns, comparison_ratio) = {
            let base_text = String::from_utf8_lossy(&base);
            let base_tokens = tokenize(&base_text);

            if base.as_ref() == variant {
                (base_tokens.len(), None, 1.0)
            } else {
                let variant_text = String::from_utf8_lossy(variant);
                let variant_tokens = tokenize(&variant_text);
                let patterns: Vec<String> = SequenceMatcher::new(&base_tokens, &variant_tokens)
                    .common_elements()
                    .map(|token| token.to_string())
                    .collect();
                let ratio = SequenceMatcher::new(base.as_ref(), variant).ratio();
                (base_tokens.len(), Some(patterns), ratio)
            }
        };

        Self {
            base,
            base_token_count,
            static_patterns,
            comparison_ratio,
            tuning,
        }
    }

    pub fn is_static(&self) -> bool {
        self.static_patterns.is_none()
    }

    /// Similarity of the two samples this parser was built from
    pub fn comparison_ratio(&self) -> f64 {
        self.comparison_ratio
    }

    pub fn static_patterns(&self) -> &[String] {
        self.static_patterns.as_deref().unwrap_or(&[])
    }

    pub fn base(&self) -> &Bytes {
        &self.base
    }

    pub fn tuning(&self) -> ParserTuning {
        self.tuning
    }

    /// Whether `content` is the same page as the samples, modulo dynamic fragments
    pub fn compare_to(&self, content: &[u8]) -> bool {
        let Some(patterns) = &self.static_patterns else {
            return self.base.as_ref() == content;
        };

        // samples without a common token (minified bodies): an empty pattern list would match anything
        if patterns.is_empty() {
            let ratio = SequenceMatcher::new(self.base.as_ref(), content).ratio();
            return ratio > self.tuning.fallback_ratio;
        }

        let text = String::from_utf8_lossy(content);
        let tokens = tokenize(&text);
        let high_confidence = patterns.len() >= self.tuning.min_patterns;

        if contains_patterns(patterns, &tokens, if high_confidence { 1 } else { 0 }) {
            return true;
        }

        if !high_confidence && tokens.len() > self.base_token_count {
            let ratio = SequenceMatcher::new(self.base.as_ref(), content).ratio();
            tracing::trace!(
                "Pattern check failed on {} patterns, fallback ratio {:.3}",
                patterns.len(),
                ratio
            );
            return ratio > self.tuning.fallback_ratio;
        }

        false
    }
}

/// Forward-only subsequence search: each pattern must appear after the previous hit
fn contains_patterns(patterns: &[String], tokens: &[&str], tolerance: usize) -> bool {
    let mut position = 0;
    let mut missing = 0;

    for pattern in patterns {
        match tokens[position..].iter().position(|token| *token == pattern) {
            Some(offset) => position += offset + 1,
            None => {
                missing += 1;
                if missing > tolerance {
                    return false;
                }
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(base: &str, variant: &str) -> DynamicContentParser {
        DynamicContentParser::new(Bytes::from(base.to_string()), variant.as_bytes())
    }

    fn numbered_page(marker: &str) -> String {
        let words: Vec<String> = (0..25).map(|i| format!("word{i}")).collect();
        format!("{} {}", words.join(" "), marker)
    }

    #[test]
    fn test_static_page_is_exact_match_only() {
        let p = parser("<h1>Not Found</h1>", "<h1>Not Found</h1>");

        assert!(p.is_static());
        assert_eq!(p.comparison_ratio(), 1.0);
        assert!(p.compare_to(b"<h1>Not Found</h1>"));
        assert!(!p.compare_to(b"<h1>Not Found</h1> "));
        assert!(!p.compare_to(b"<h1>Found</h1>"));
    }

    #[test]
    fn test_dynamic_page_extracts_common_tokens() {
        let p = parser(
            "<html> <p> csrf=abc </p> </html>",
            "<html> <p> csrf=def </p> </html>",
        );

        assert!(!p.is_static());
        assert_eq!(p.static_patterns(), &["<html>", "<p>", "</p>", "</html>"]);
        assert!(p.compare_to(b"<html> <p> csrf=zzz </p> </html>"));
        assert!(!p.compare_to(b"<html> <div> </div> </html>"));
    }

    #[test]
    fn test_single_token_bodies_fall_back_to_ratio() {
        let p = parser(r#"{"id":1,"csrf":"aaaa"}"#, r#"{"id":1,"csrf":"bbbb"}"#);

        assert!(!p.is_static());
        assert!(p.static_patterns().is_empty());
        assert!(p.compare_to(br#"{"id":1,"csrf":"cccc"}"#));
        assert!(!p.compare_to(b"<html><body>Welcome</body></html>"));
        assert!(!p.compare_to(b"x"));
    }

    #[test]
    fn test_small_pattern_set_has_no_tolerance() {
        let p = parser("a b c t1 d e", "a b c t2 d e");

        // "c" missing, candidate is shorter than base: no fallback
        assert!(!p.compare_to(b"a b t3 d e"));
    }

    #[test]
    fn test_large_pattern_set_tolerates_one_miss() {
        let p = parser(&numbered_page("ts=1"), &numbered_page("ts=2"));
        assert_eq!(p.static_patterns().len(), 25);

        let one_missing = numbered_page("ts=3").replace("word7 ", "");
        assert!(p.compare_to(one_missing.as_bytes()));

        let two_missing = one_missing.replace("word8 ", "");
        assert!(!p.compare_to(two_missing.as_bytes()));
    }

    #[test]
    fn test_patterns_are_matched_in_order() {
        let p = parser("alpha beta gamma x1", "alpha beta gamma x2");

        // every pattern is present, but "alpha" only after "gamma"
        assert!(!p.compare_to(b"beta gamma alpha"));
        assert!(p.compare_to(b"alpha beta gamma x9"));
    }

    #[test]
    fn test_reordering_non_pattern_tokens_keeps_result() {
        let p = parser("head n=1 body tail", "head n=2 body tail");

        let original = p.compare_to(b"head q=1 body r=2 tail");
        let reordered = p.compare_to(b"head r=2 body q=1 tail");
        assert_eq!(original, reordered);
        assert!(original);
    }

    #[test]
    fn test_ratio_fallback_for_longer_candidates() {
        let base = "<html> <body> id=1 hello world </body> </html>";
        let p = parser(base, "<html> <body> id=2 hello world </body> </html>");

        // "world" became "world!", but the page is clearly the same template
        assert!(p.compare_to(b"<html> <body> id=3 hello world! </body> </html> extra"));

        // longer, but unrelated
        assert!(!p.compare_to(b"completely different document with many more tokens in it"));
    }

    #[test]
    fn test_tuning_changes_tolerance() {
        let tuning = ParserTuning {
            min_patterns: 3,
            fallback_ratio: 0.75,
        };
        let p = DynamicContentParser::with_tuning(
            Bytes::from_static(b"a b c d x1"),
            b"a b c d x2",
            tuning,
        );

        assert!(p.compare_to(b"a c d x3"));
        assert!(!p.compare_to(b"a d x3"));
    }

    #[test]
    fn test_comparison_ratio_reflects_samples() {
        let similar = parser("<p>Page 1 of the shop</p>", "<p>Page 2 of the shop</p>");
        assert!(similar.comparison_ratio() > 0.9);

        let different = parser("<p>Login</p>", "{\"error\": true}");
        assert!(different.comparison_ratio() < 0.5);
    }
}
