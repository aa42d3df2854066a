use super::errors::ConfigError;
use super::models::Config;

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.target.url.trim();
        if url.is_empty() {
            return Err(invalid("target.url must not be empty"));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(invalid(format!(
                "target.url must start with http:// or https:// (got '{}')",
                url
            )));
        }
        if self.target.wordlists.is_empty() {
            return Err(invalid("target.wordlists must list at least one file"));
        }

        if self.scan.threads == 0 {
            return Err(invalid("scan.threads must be at least 1"));
        }
        check_ratio("scan.similarity_threshold", self.scan.similarity_threshold)?;
        check_ratio("scan.fallback_ratio", self.scan.fallback_ratio)?;
        if self.scan.min_static_patterns == 0 {
            return Err(invalid("scan.min_static_patterns must be at least 1"));
        }

        if self.request.timeout_secs == 0 {
            return Err(invalid("request.timeout_secs must be at least 1"));
        }

        Ok(())
    }
}

fn check_ratio(name: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must be in (0, 1] (got {})", name, value)))
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidConfig(message.into())
}
