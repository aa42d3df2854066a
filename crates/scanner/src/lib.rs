mod models;
mod traits;
mod gate;
mod wildcard;
mod cluster;
mod engine;
mod worker;
mod errors;

pub use models::{
    ClusterEntry, ClusterIndex, ClusterOutcome, ClusterSummary, ErrorCallback, ProbeCallback,
    ProbeSet, ProbeVerdict, ScanEngine, WildcardProbe,
};
pub use traits::{Dictionary, Requester};
pub use errors::ScanError;
pub use dirsift_config::ScanSettings;
