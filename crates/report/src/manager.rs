use super::errors::ReportError;
use super::formats::formatter_for;
use super::models::{ReportEntry, ReportFormatter, ReportInfo, ReportManager, ReportWriter};
use chrono::{DateTime, Utc};
use dirsift_config::ReportSettings;
use dirsift_models::ScanMatch;
use dirsift_utils::join_url;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

type Result<T> = std::result::Result<T, ReportError>;

impl ReportEntry {
    pub fn from_match(target: &str, found: &ScanMatch) -> Self {
        Self {
            url: join_url(target, &found.path),
            status: found.status,
            content_length: found.content_length,
            content_type: found.content_type.clone(),
            redirect: found.redirect.clone(),
        }
    }
}

impl ReportWriter {
    pub fn new(formatter: Box<dyn ReportFormatter>, path: PathBuf) -> Self {
        Self {
            formatter,
            entries: Mutex::new(Vec::new()),
            path,
        }
    }

    pub fn append(&self, entry: ReportEntry) {
        self.entries.lock().push(entry);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn render(&self, info: &ReportInfo) -> Result<String> {
        let entries = self.entries.lock().clone();
        self.formatter.render(info, &entries)
    }

    pub async fn save(&self, info: &ReportInfo) -> Result<()> {
        let content = self.render(info)?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, content).await?;
        tracing::debug!("Wrote {:?} report to {}", self.formatter.format(), self.path.display());
        Ok(())
    }
}

impl ReportManager {
    /// Report files are named `<target>_<start time>.<ext>` inside the output directory
    pub fn new(settings: &ReportSettings, target: &str, started: DateTime<Utc>) -> Self {
        let stem = format!("{}_{}", file_stem(target), started.format("%Y%m%d_%H%M%S"));
        let output_dir = PathBuf::from(&settings.output_dir);

        let mut formats = Vec::new();
        for format in &settings.formats {
            if !formats.contains(format) {
                formats.push(*format);
            }
        }

        let writers = formats
            .into_iter()
            .map(|format| {
                let path = output_dir.join(format!("{}.{}", stem, format.extension()));
                ReportWriter::new(formatter_for(format), path)
            })
            .collect();

        Self {
            info: ReportInfo {
                target: target.to_string(),
                time: started,
            },
            writers,
        }
    }

    /// Called for every accepted path
    pub fn update(&self, found: &ScanMatch) {
        let entry = ReportEntry::from_match(&self.info.target, found);
        for writer in &self.writers {
            writer.append(entry.clone());
        }
    }

    pub fn writers(&self) -> &[ReportWriter] {
        &self.writers
    }

    /// Writes every report; returns the files written
    pub async fn save(&self) -> Result<Vec<PathBuf>> {
        let mut saved = Vec::with_capacity(self.writers.len());
        for writer in &self.writers {
            writer.save(&self.info).await?;
            saved.push(writer.path.clone());
        }
        Ok(saved)
    }
}

/// "https://example.com:8443/app/" -> "example.com_8443_app"
fn file_stem(target: &str) -> String {
    let without_scheme = target.split("://").nth(1).unwrap_or(target);
    let stem: String = without_scheme
        .trim_end_matches('/')
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "report".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dirsift_config::ReportFormat;

    fn found(path: &str) -> ScanMatch {
        ScanMatch {
            path: path.to_string(),
            status: 200,
            content_length: 10,
            content_type: None,
            redirect: None,
        }
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("https://example.com:8443/app/"), "example.com_8443_app");
        assert_eq!(file_stem("http://10.0.0.1/"), "10.0.0.1");
        assert_eq!(file_stem(""), "report");
    }

    #[tokio::test]
    async fn test_save_writes_every_format() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ReportSettings {
            formats: vec![ReportFormat::Plain, ReportFormat::Json, ReportFormat::Json],
            output_dir: dir.path().join("out").to_string_lossy().into_owned(),
        };
        let started = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let manager = ReportManager::new(&settings, "http://example.com/", started);
        assert_eq!(manager.writers().len(), 2);

        manager.update(&found("admin/"));
        manager.update(&found("/login.php"));

        let saved = manager.save().await.unwrap();
        assert_eq!(saved.len(), 2);
        assert!(saved[0].ends_with("example.com_20240501_120000.txt"));

        let plain = std::fs::read_to_string(&saved[0]).unwrap();
        assert!(plain.contains("http://example.com/admin/"));
        assert!(plain.contains("http://example.com/login.php"));

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&saved[1]).unwrap()).unwrap();
        assert_eq!(json["results"].as_array().map(Vec::len), Some(2));
    }
}
