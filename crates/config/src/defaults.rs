/// Default values for configuration fields

pub fn threads() -> usize {
    25
}

pub fn similarity_threshold() -> f64 {
    0.90  // Same-bucket pages at least this similar are duplicates
}

pub fn min_static_patterns() -> usize {
    20  // Smaller pattern sets allow no missing pattern
}

pub fn fallback_ratio() -> f64 {
    0.75
}

pub fn scan_settings() -> super::models::ScanSettings {
    super::models::ScanSettings {
        threads: threads(),
        test_fail_path: None,
        similarity_threshold: similarity_threshold(),
        min_static_patterns: min_static_patterns(),
        fallback_ratio: fallback_ratio(),
    }
}

pub fn dictionary_settings() -> super::models::DictionarySettings {
    super::models::DictionarySettings::default()
}

pub fn timeout_secs() -> u64 {
    10
}

pub fn user_agent() -> String {
    format!("dirsift/{}", env!("CARGO_PKG_VERSION"))
}

pub fn max_retries() -> u32 {
    1  // Retries on transport errors only
}

pub fn request_settings() -> super::models::RequestSettings {
    super::models::RequestSettings {
        timeout_secs: timeout_secs(),
        user_agent: user_agent(),
        follow_redirects: false,
        max_retries: max_retries(),
        headers: Default::default(),
        proxy: None,
    }
}

pub fn report_formats() -> Vec<super::models::ReportFormat> {
    vec![super::models::ReportFormat::Plain]
}

pub fn output_dir() -> String {
    "reports".to_string()
}

pub fn report_settings() -> super::models::ReportSettings {
    super::models::ReportSettings {
        formats: report_formats(),
        output_dir: output_dir(),
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# dirsift Configuration
# ===============================================================================

[target]
url = "http://localhost:8080/"       # Base URL every candidate path is appended to
wordlists = ["wordlists/common.txt"] # Files or directories (*.txt) of candidate paths

[scan]
threads = 25                         # Worker threads (capped at the number of candidates)
# test_fail_path = "dirsift-probe"   # Baseline probe path (random token when unset)
similarity_threshold = 0.90          # Same-size pages at least this similar are duplicates
min_static_patterns = 20             # Pattern sets this large tolerate one missing token
fallback_ratio = 0.75                # Ratio needed by the fallback comparison

[dictionary]
extensions = ["php", "html"]         # Substituted for %EXT% in wordlist entries
force_extensions = false             # Also try every entry with each extension and as a directory
lowercase = false                    # Lowercase every entry
prefixes = []                        # Added in front of every file entry
suffixes = []                        # Added after every file entry

[request]
timeout_secs = 10                    # Per-request timeout
follow_redirects = false             # Report 30x responses instead of following them
max_retries = 1                      # Retries on transport errors
# user_agent = "dirsift"
# proxy = "http://127.0.0.1:8080"

[request.headers]
# Cookie = "session=..."

[report]
formats = ["plain"]                  # plain | json | csv | markdown | xml | html | sql
output_dir = "reports"
"#;
