use chrono::{DateTime, Utc};
use dirsift_config::ReportFormat;
use parking_lot::Mutex;
use serde::Serialize;
use std::path::PathBuf;

/// One accepted path as it appears in reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub url: String,
    pub status: u16,
    #[serde(rename = "content-length")]
    pub content_length: u64,
    #[serde(rename = "content-type")]
    pub content_type: Option<String>,
    pub redirect: Option<String>,
}

/// Header information shared by every format
#[derive(Debug, Clone, Serialize)]
pub struct ReportInfo {
    pub target: String,
    pub time: DateTime<Utc>,
}

/// Renders entries in one output format
pub trait ReportFormatter: Send + Sync {
    fn format(&self) -> ReportFormat;

    fn render(&self, info: &ReportInfo, entries: &[ReportEntry]) -> Result<String, crate::ReportError>;
}

/// Accumulates entries for one format and writes them on save
pub struct ReportWriter {
    pub(super) formatter: Box<dyn ReportFormatter>,
    pub(super) entries: Mutex<Vec<ReportEntry>>,
    pub(super) path: PathBuf,
}

/// One writer per configured format
pub struct ReportManager {
    pub(super) info: ReportInfo,
    pub(super) writers: Vec<ReportWriter>,
}
