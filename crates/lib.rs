// Re-export all public APIs from the workspace crates

pub use dirsift_models::*;
pub use dirsift_events::*;
pub use dirsift_utils::*;
pub use dirsift_diff::*;
pub use dirsift_config::*;
pub use dirsift_scanner::*;
pub use dirsift_requester::*;
pub use dirsift_dictionary::*;
pub use dirsift_report::*;

/// Prelude module for convenient imports
pub mod prelude {
    // Core models
    pub use dirsift_models::{Classification, ProbeResult, Response, ScanFailure, ScanMatch};

    // Events
    pub use dirsift_events::{EventBus, ScanEvent};

    // Configuration
    pub use dirsift_config::Config;

    // Scanner
    pub use dirsift_scanner::{Dictionary, Requester, ScanEngine, ScanError};

    // Collaborators
    pub use dirsift_requester::HttpRequester;
    pub use dirsift_dictionary::WordlistDictionary;
    pub use dirsift_report::ReportManager;

    // Similarity
    pub use dirsift_diff::DynamicContentParser;
}
