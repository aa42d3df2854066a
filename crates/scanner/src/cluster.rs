use super::models::{ClusterEntry, ClusterIndex, ClusterOutcome, ClusterSummary};
use bytes::Bytes;
use dirsift_diff::{generate_matching_regex, DynamicContentParser, ParserTuning};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

impl ClusterIndex {
    pub fn new(threshold: f64, tuning: ParserTuning) -> Self {
        Self {
            buckets: Mutex::new(BTreeMap::new()),
            threshold,
            tuning,
        }
    }

    /// Compares `body` with every entry of its bucket and records it when
    /// nothing matches. The whole compare-or-insert runs under one lock.
    pub fn record_or_match(&self, bucket: u64, path: &str, body: &Bytes, worker: usize) -> ClusterOutcome {
        let mut buckets = self.buckets.lock();
        let entries = buckets.entry(bucket).or_default();

        for entry in entries.iter_mut() {
            match entry {
                ClusterEntry::Bare {
                    body: known,
                    path: first_path,
                    worker: first_worker,
                } => {
                    let parser = DynamicContentParser::with_tuning(known.clone(), body, self.tuning);
                    let ratio = parser.comparison_ratio();
                    if ratio < self.threshold {
                        continue;
                    }

                    tracing::debug!(
                        "{} duplicates {} (bucket {}, ratio {:.3})",
                        path,
                        first_path,
                        bucket,
                        ratio
                    );
                    let upgraded = ClusterEntry::Compared {
                        fingerprint: Arc::new(parser),
                        ratio,
                        first_path: std::mem::take(first_path),
                        first_worker: *first_worker,
                        second_path: path.to_string(),
                        second_worker: worker,
                    };
                    *entry = upgraded;
                    return ClusterOutcome::MatchFound;
                }
                ClusterEntry::Compared {
                    fingerprint,
                    first_path,
                    ..
                } => {
                    if fingerprint.compare_to(body) {
                        tracing::debug!("{} falls in the cluster of {} (bucket {})", path, first_path, bucket);
                        return ClusterOutcome::MatchFound;
                    }
                }
            }
        }

        entries.push(ClusterEntry::Bare {
            body: body.clone(),
            path: path.to_string(),
            worker,
        });
        ClusterOutcome::NoMatch
    }

    /// Fingerprints of every cluster that has seen at least two pages
    pub fn fingerprints(&self) -> Vec<Arc<DynamicContentParser>> {
        self.buckets
            .lock()
            .values()
            .flatten()
            .filter_map(|entry| match entry {
                ClusterEntry::Compared { fingerprint, .. } => Some(fingerprint.clone()),
                ClusterEntry::Bare { .. } => None,
            })
            .collect()
    }

    pub fn summary(&self) -> Vec<ClusterSummary> {
        let buckets = self.buckets.lock();
        let mut summary = Vec::new();

        for (bucket, entries) in buckets.iter() {
            for entry in entries {
                summary.push(match entry {
                    ClusterEntry::Bare { path, worker, .. } => ClusterSummary {
                        bucket: *bucket,
                        path: path.clone(),
                        worker: *worker,
                        ratio: None,
                        second_path: None,
                        second_worker: None,
                        path_pattern: None,
                    },
                    ClusterEntry::Compared {
                        ratio,
                        first_path,
                        first_worker,
                        second_path,
                        second_worker,
                        ..
                    } => ClusterSummary {
                        bucket: *bucket,
                        path: first_path.clone(),
                        worker: *first_worker,
                        ratio: Some(*ratio),
                        second_path: Some(second_path.clone()),
                        second_worker: Some(*second_worker),
                        path_pattern: Some(generate_matching_regex(first_path, second_path)),
                    },
                });
            }
        }

        summary
    }

    /// Number of entries across all buckets
    pub fn len(&self) -> usize {
        self.buckets.lock().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
