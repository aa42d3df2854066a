use super::defaults::DEFAULT_CONFIG_TEMPLATE;
use super::errors::ConfigError;
use super::models::Config;
use dirsift_events::{EventBus, ScanEvent};
use std::path::Path;
use std::sync::Arc;

type Result<T> = std::result::Result<T, ConfigError>;

impl Config {
    /// Loads configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file_with_events(path, None).await
    }

    /// Loads configuration from a file with optional event bus for notifications
    pub async fn from_file_with_events<P: AsRef<Path>>(
        path: P,
        events: Option<&Arc<EventBus>>,
    ) -> Result<Self> {
        let path = path.as_ref();

        // Create default config if it doesn't exist
        if !path.exists() {
            create_default_config(path).await?;
            if let Some(events) = events {
                events.emit(ScanEvent::ConfigCreated {
                    path: path.display().to_string(),
                });
            }
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config = Self::from_toml(&content)?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

/// Creates a default configuration file
async fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    tokio::fs::write(path, DEFAULT_CONFIG_TEMPLATE).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReportFormat;

    #[test]
    fn test_template_is_valid() {
        let config = Config::from_toml(DEFAULT_CONFIG_TEMPLATE).unwrap();

        assert_eq!(config.scan.threads, 25);
        assert_eq!(config.scan.similarity_threshold, 0.90);
        assert_eq!(config.scan.min_static_patterns, 20);
        assert_eq!(config.dictionary.extensions, vec!["php", "html"]);
        assert_eq!(config.report.formats, vec![ReportFormat::Plain]);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [target]
            url = "https://example.com"
            wordlists = ["words.txt"]
            "#,
        )
        .unwrap();

        assert_eq!(config.scan.fallback_ratio, 0.75);
        assert_eq!(config.scan.test_fail_path, None);
        assert_eq!(config.request.timeout_secs, 10);
        assert!(!config.request.follow_redirects);
        assert!(config.dictionary.extensions.is_empty());
        assert_eq!(config.report.output_dir, "reports");
    }

    #[test]
    fn test_every_report_format_parses() {
        let config = Config::from_toml(
            r#"
            [target]
            url = "https://example.com"
            wordlists = ["words.txt"]

            [report]
            formats = ["plain", "json", "csv", "markdown", "xml", "html", "sql"]
            "#,
        )
        .unwrap();

        let extensions: Vec<&str> = config.report.formats.iter().map(|format| format.extension()).collect();
        assert_eq!(extensions, vec!["txt", "json", "csv", "md", "xml", "html", "sql"]);
    }

    #[test]
    fn test_unknown_report_format_is_rejected() {
        let result = Config::from_toml(
            r#"
            [target]
            url = "https://example.com"
            wordlists = ["words.txt"]

            [report]
            formats = ["pdf"]
            "#,
        );

        assert!(matches!(result, Err(ConfigError::TomlParseError(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_created_from_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dirsift.toml");

        let config = Config::from_file(&path).await.unwrap();

        assert!(path.exists());
        assert_eq!(config.target.url, "http://localhost:8080/");
    }
}
