use crate::traits::{Dictionary, Requester};
use bytes::Bytes;
use dirsift_config::ScanSettings;
use dirsift_diff::{DynamicContentParser, ParserTuning};
use dirsift_models::{ProbeResult, Response, ScanFailure, ScanMatch};
use parking_lot::{Condvar, Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub type ProbeCallback = Arc<dyn Fn(&ProbeResult) + Send + Sync>;
pub type ErrorCallback = Arc<dyn Fn(&str, &str) + Send + Sync>;

/// Concurrent path discovery over a fixed pool of worker threads
pub struct ScanEngine {
    pub(super) requester: Arc<dyn Requester>,
    pub(super) dictionary: Arc<dyn Dictionary>,
    pub(super) settings: ScanSettings,
    pub(super) callbacks: Callbacks,
    pub(super) run: Mutex<Option<Arc<ScanRun>>>,
}

#[derive(Clone, Default)]
pub(crate) struct Callbacks {
    pub(crate) matched: Vec<ProbeCallback>,
    pub(crate) not_found: Vec<ProbeCallback>,
    pub(crate) errors: Vec<ErrorCallback>,
}

/// State of one scan, replaced by every `start()`
pub(crate) struct ScanRun {
    pub(crate) requester: Arc<dyn Requester>,
    pub(crate) dictionary: Arc<dyn Dictionary>,
    pub(crate) callbacks: Callbacks,
    pub(crate) probes: ProbeSet,
    pub(crate) clusters: ClusterIndex,
    pub(crate) gate: PauseGate,
    pub(crate) running: AtomicBool,
    pub(crate) matches: Mutex<Vec<ScanMatch>>,
    pub(crate) errors: Mutex<Vec<ScanFailure>>,
    pub(crate) thread_count: usize,
}

/// Gate workers pass between paths. Closing it parks them; `parked` and
/// `live` let the closer wait until every live worker is parked.
pub(crate) struct PauseGate {
    pub(super) state: Mutex<GateState>,
    pub(super) changed: Condvar,
}

pub(crate) struct GateState {
    pub(super) paused: bool,
    pub(super) parked: usize,
    pub(super) live: usize,
}

/// Tri-state answer of a wildcard probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeVerdict {
    NotFound,
    Wildcard,
    Candidate,
}

/// Baseline of one suffix class: the response to a path that should not exist
pub struct WildcardProbe {
    pub(super) suffix: String,
    /// `None` when the baseline request failed
    pub(super) baseline: Option<Response>,
    pub(super) fingerprint: RwLock<Option<Arc<DynamicContentParser>>>,
    pub(super) threshold: f64,
    pub(super) tuning: ParserTuning,
}

/// Every suffix class of a scan: default, directory and one per extension
pub struct ProbeSet {
    pub(super) default: WildcardProbe,
    pub(super) directory: WildcardProbe,
    /// Longest suffix first
    pub(super) extensions: Vec<WildcardProbe>,
}

/// Pages accepted during the scan, grouped by size bucket
pub struct ClusterIndex {
    pub(super) buckets: Mutex<BTreeMap<u64, Vec<ClusterEntry>>>,
    pub(super) threshold: f64,
    pub(super) tuning: ParserTuning,
}

#[derive(Debug, Clone)]
pub enum ClusterEntry {
    /// First page seen in its cluster, not compared yet
    Bare {
        body: Bytes,
        path: String,
        worker: usize,
    },
    /// A second page matched the first one; the pair's fingerprint stands for the cluster
    Compared {
        fingerprint: Arc<DynamicContentParser>,
        ratio: f64,
        first_path: String,
        first_worker: usize,
        second_path: String,
        second_worker: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterOutcome {
    MatchFound,
    NoMatch,
}

/// One cluster entry, without its body
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSummary {
    pub bucket: u64,
    pub path: String,
    pub worker: usize,
    pub ratio: Option<f64>,
    pub second_path: Option<String>,
    pub second_worker: Option<usize>,
    /// Regex covering both paths of a compared entry
    pub path_pattern: Option<String>,
}
