use dirsift::prelude::{Config, EventBus, ScanEvent};
use anyhow::Result;
use std::sync::Arc;

pub async fn load(config_path: &str, events: &Arc<EventBus>) -> Result<Config> {
    let abs_config_path = std::env::current_dir()?.join(config_path);

    events.emit(ScanEvent::ConfigLoading {
        path: abs_config_path.display().to_string(),
    });

    let config = Config::from_file_with_events(config_path, Some(events)).await?;

    events.emit(ScanEvent::ConfigLoaded {
        wordlists: config.target.wordlists.len(),
        extensions: config.dictionary.extensions.len(),
    });

    Ok(config)
}
