use super::models::{ProbeSet, ProbeVerdict, WildcardProbe};
use crate::traits::Requester;
use dirsift_config::ScanSettings;
use dirsift_diff::{DynamicContentParser, ParserTuning};
use dirsift_models::Response;
use dirsift_utils::{is_directory_path, normalize_extension, random_token};
use parking_lot::RwLock;
use std::sync::Arc;

pub(crate) fn tuning(settings: &ScanSettings) -> ParserTuning {
    ParserTuning {
        min_patterns: settings.min_static_patterns,
        fallback_ratio: settings.fallback_ratio,
    }
}

impl WildcardProbe {
    pub fn new(suffix: impl Into<String>, baseline: Option<Response>, threshold: f64, tuning: ParserTuning) -> Self {
        Self {
            suffix: suffix.into(),
            baseline,
            fingerprint: RwLock::new(None),
            threshold,
            tuning,
        }
    }

    /// Requests `fail_path + suffix` and keeps the response as the baseline
    pub fn setup(
        requester: &dyn Requester,
        fail_path: &str,
        suffix: &str,
        settings: &ScanSettings,
    ) -> Self {
        let path = format!("{}{}", fail_path, suffix);
        let baseline = match requester.request(&path) {
            Ok(response) => {
                tracing::debug!(
                    "Baseline for '{}' ({}): status {}, {} bytes",
                    suffix,
                    path,
                    response.status,
                    response.content_length()
                );
                Some(response)
            }
            Err(e) => {
                tracing::warn!("Baseline request for '{}' failed: {}", path, e.message());
                None
            }
        };

        Self::new(suffix, baseline, settings.similarity_threshold, tuning(settings))
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn fingerprint(&self) -> Option<Arc<DynamicContentParser>> {
        self.fingerprint.read().clone()
    }

    pub fn classify(
        &self,
        path: &str,
        response: &Response,
        known_fingerprints: &[Arc<DynamicContentParser>],
    ) -> ProbeVerdict {
        if response.is_not_found() {
            return ProbeVerdict::NotFound;
        }

        if self.matches_baseline(response) {
            tracing::debug!("{} matches the '{}' baseline", path, self.suffix);
            return ProbeVerdict::NotFound;
        }

        if known_fingerprints
            .iter()
            .any(|fingerprint| fingerprint.compare_to(&response.body))
        {
            tracing::debug!("{} matches a known wildcard cluster", path);
            return ProbeVerdict::Wildcard;
        }

        ProbeVerdict::Candidate
    }

    fn matches_baseline(&self, response: &Response) -> bool {
        let Some(baseline) = &self.baseline else {
            return false;
        };
        if baseline.status != response.status {
            return false;
        }

        if let Some(fingerprint) = self.fingerprint() {
            return fingerprint.compare_to(&response.body);
        }

        let parser = DynamicContentParser::with_tuning(
            baseline.body.clone(),
            &response.body,
            self.tuning,
        );
        if parser.comparison_ratio() < self.threshold {
            return false;
        }

        let mut slot = self.fingerprint.write();
        if slot.is_none() {
            *slot = Some(Arc::new(parser));
        }
        true
    }
}

impl ProbeSet {
    /// Issues one baseline request per suffix class
    pub fn setup(requester: &dyn Requester, extensions: &[String], settings: &ScanSettings) -> Self {
        let fail_path = settings
            .test_fail_path
            .clone()
            .filter(|path| !path.is_empty())
            .unwrap_or_else(random_token);

        let mut suffixes: Vec<String> = Vec::new();
        for extension in extensions {
            let extension = normalize_extension(extension);
            if extension.is_empty() {
                continue;
            }
            let suffix = format!(".{}", extension);
            if !suffixes.contains(&suffix) {
                suffixes.push(suffix);
            }
        }

        let default = WildcardProbe::setup(requester, &fail_path, "", settings);
        let directory = WildcardProbe::setup(requester, &fail_path, "/", settings);
        let extensions = suffixes
            .iter()
            .map(|suffix| WildcardProbe::setup(requester, &fail_path, suffix, settings))
            .collect();

        Self::from_probes(default, directory, extensions)
    }

    pub fn from_probes(default: WildcardProbe, directory: WildcardProbe, mut extensions: Vec<WildcardProbe>) -> Self {
        extensions.sort_by(|a, b| b.suffix.len().cmp(&a.suffix.len()));
        Self {
            default,
            directory,
            extensions,
        }
    }

    /// Suffix class of a path: directory, longest matching extension, or default
    pub fn select(&self, path: &str) -> &WildcardProbe {
        if is_directory_path(path) {
            return &self.directory;
        }
        self.extensions
            .iter()
            .find(|probe| path.ends_with(&probe.suffix))
            .unwrap_or(&self.default)
    }

    /// Classifies against the path's suffix class, or the default class
    /// when that class has no baseline
    pub fn classify(
        &self,
        path: &str,
        response: &Response,
        known_fingerprints: &[Arc<DynamicContentParser>],
    ) -> ProbeVerdict {
        let probe = self.select(path);
        let probe = if probe.has_baseline() { probe } else { &self.default };
        probe.classify(path, response, known_fingerprints)
    }

    /// Suffix classes, never fewer than the default and directory ones
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.extensions.len() + 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirsift_models::Headers;

    fn response(status: u16, body: &str) -> Response {
        Response::new(status, Headers::new(), body.to_string())
    }

    fn probe(suffix: &str, baseline: Option<Response>) -> WildcardProbe {
        WildcardProbe::new(suffix, baseline, 0.90, ParserTuning::default())
    }

    fn probes() -> ProbeSet {
        ProbeSet::from_probes(
            probe("", Some(response(200, "default soft 404"))),
            probe("/", Some(response(403, "forbidden"))),
            vec![
                probe(".php", Some(response(200, "php soft 404"))),
                probe(".tar.gz", None),
                probe(".gz", Some(response(200, "gz soft 404"))),
            ],
        )
    }

    #[test]
    fn test_select_suffix_class() {
        let set = probes();

        assert_eq!(set.select("admin/").suffix(), "/");
        assert_eq!(set.select("index.php").suffix(), ".php");
        assert_eq!(set.select("backup.tar.gz").suffix(), ".tar.gz");
        assert_eq!(set.select("notes.gz").suffix(), ".gz");
        assert_eq!(set.select("robots.txt").suffix(), "");
        assert_eq!(set.select("admin").suffix(), "");
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_default_and_directory_classes_always_exist() {
        let set = ProbeSet::from_probes(probe("", None), probe("/", None), Vec::new());

        assert_eq!(set.len(), 2);
        assert_eq!(set.select("index.php").suffix(), "");
        assert_eq!(set.select("admin/").suffix(), "/");
    }

    #[test]
    fn test_missing_baseline_falls_back_to_default() {
        let set = probes();

        // ".tar.gz" has no baseline; the default baseline applies
        let verdict = set.classify("site.tar.gz", &response(200, "default soft 404"), &[]);
        assert_eq!(verdict, ProbeVerdict::NotFound);
    }

    #[test]
    fn test_classify_not_found_status() {
        let p = probe("", None);
        assert_eq!(p.classify("x", &response(404, "anything"), &[]), ProbeVerdict::NotFound);
        assert_eq!(p.classify("x", &response(200, "anything"), &[]), ProbeVerdict::Candidate);
    }

    #[test]
    fn test_classify_attaches_fingerprint_once() {
        let p = probe("", Some(response(200, "<p> Not here: abc123 </p>")));
        assert!(p.fingerprint().is_none());

        let verdict = p.classify("abc", &response(200, "<p> Not here: abc124 </p>"), &[]);
        assert_eq!(verdict, ProbeVerdict::NotFound);
        assert!(p.fingerprint().is_some());

        assert_eq!(
            p.classify("z", &response(200, "<p> Not here: zzzzzz </p>"), &[]),
            ProbeVerdict::NotFound
        );
        assert_eq!(
            p.classify("login", &response(200, "<form> Sign in </form>"), &[]),
            ProbeVerdict::Candidate
        );
    }

    #[test]
    fn test_classify_requires_same_status() {
        let p = probe("", Some(response(200, "same body")));
        assert_eq!(p.classify("x", &response(500, "same body"), &[]), ProbeVerdict::Candidate);
    }

    #[test]
    fn test_classify_known_fingerprints() {
        let p = probe("", None);
        let cluster = Arc::new(DynamicContentParser::new(
            bytes::Bytes::from_static(b"<h1> Hello user1 </h1>"),
            b"<h1> Hello user2 </h1>",
        ));

        let verdict = p.classify("user3", &response(200, "<h1> Hello user3 </h1>"), &[cluster]);
        assert_eq!(verdict, ProbeVerdict::Wildcard);
    }
}
