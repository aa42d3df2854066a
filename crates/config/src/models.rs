use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub target: TargetSettings,
    #[serde(default = "super::defaults::scan_settings")]
    pub scan: ScanSettings,
    #[serde(default = "super::defaults::dictionary_settings")]
    pub dictionary: DictionarySettings,
    #[serde(default = "super::defaults::request_settings")]
    pub request: RequestSettings,
    #[serde(default = "super::defaults::report_settings")]
    pub report: ReportSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetSettings {
    pub url: String,
    pub wordlists: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanSettings {
    #[serde(default = "super::defaults::threads")]
    pub threads: usize,
    /// Path used for the baseline probes; a random token when unset
    #[serde(default)]
    pub test_fail_path: Option<String>,
    #[serde(default = "super::defaults::similarity_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "super::defaults::min_static_patterns")]
    pub min_static_patterns: usize,
    #[serde(default = "super::defaults::fallback_ratio")]
    pub fallback_ratio: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DictionarySettings {
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub force_extensions: bool,
    #[serde(default)]
    pub lowercase: bool,
    #[serde(default)]
    pub prefixes: Vec<String>,
    #[serde(default)]
    pub suffixes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequestSettings {
    #[serde(default = "super::defaults::timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "super::defaults::user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub follow_redirects: bool,
    #[serde(default = "super::defaults::max_retries")]
    pub max_retries: u32,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub proxy: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportSettings {
    #[serde(default = "super::defaults::report_formats")]
    pub formats: Vec<ReportFormat>,
    #[serde(default = "super::defaults::output_dir")]
    pub output_dir: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Plain,
    Json,
    Csv,
    Markdown,
    Xml,
    Html,
    Sql,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Plain => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Markdown => "md",
            ReportFormat::Xml => "xml",
            ReportFormat::Html => "html",
            ReportFormat::Sql => "sql",
        }
    }
}
