use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    // Application lifecycle
    Starting,
    Interrupted,

    // Configuration
    ConfigLoading { path: String },
    ConfigCreated { path: String },
    ConfigLoaded { wordlists: usize, extensions: usize },

    // Scan
    TargetInfo { url: String, paths: usize, threads: usize },
    Found { status: u16, size: u64, path: String, redirect: Option<String> },
    RequestFailed { path: String, message: String },
    Paused { clusters: usize },
    ScanCompleted { matches: usize, errors: usize, duration: Duration },

    // Reports
    ReportSaved { path: String },

    // Errors
    Error { context: String, error: String },
}

pub struct EventBus {
    pub(super) silent_mode: bool,
}
