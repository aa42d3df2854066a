use super::models::{EventBus, ScanEvent};
use std::sync::Arc;
use colored::Colorize;
use dirsift_utils::human_size;

impl EventBus {
    pub fn new(silent_mode: bool) -> Arc<Self> {
        Arc::new(Self { silent_mode })
    }

    pub fn emit(&self, event: ScanEvent) {
        match event {
            // Application lifecycle
            ScanEvent::Starting => {
                println!("\n{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
                println!("  {}", "dirsift - Web Path Discovery".white().bold());
                println!("  {} {}", "Version".dimmed(), env!("CARGO_PKG_VERSION").cyan());
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
            }
            ScanEvent::Interrupted => {
                println!("\n  {} {}", "⏸".yellow(), "Interrupted, pausing workers...".yellow());
            }

            // Configuration
            ScanEvent::ConfigLoading { path } => {
                println!("  {} {}", "Loading config".dimmed(), path.cyan());
            }
            ScanEvent::ConfigCreated { path } => {
                tracing::warn!("Configuration file not found");
                tracing::info!("Created default configuration at: {}", path);
            }
            ScanEvent::ConfigLoaded { wordlists, extensions } => {
                println!(
                    "  {} {} wordlist(s), {} extension(s)",
                    "✓".green(),
                    wordlists.to_string().cyan(),
                    extensions.to_string().cyan()
                );
            }

            // Scan
            ScanEvent::TargetInfo { url, paths, threads } => {
                println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green());
                println!("  {} {}", "Target ".white(), url.blue());
                println!("  {} {}", "Paths  ".white(), paths.to_string().cyan());
                println!("  {} {}", "Threads".white(), threads.to_string().cyan());
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green());
            }
            ScanEvent::Found { status, size, path, redirect } => {
                let status_text = status.to_string();
                let status_text = match status {
                    200..=299 => status_text.green(),
                    300..=399 => status_text.cyan(),
                    401 | 403 => status_text.blue(),
                    500..=599 => status_text.red(),
                    _ => status_text.yellow(),
                };
                match redirect {
                    Some(location) => println!(
                        "  {} {:>8}  {}  {} {}",
                        status_text,
                        human_size(size).dimmed(),
                        path,
                        "->".dimmed(),
                        location.dimmed()
                    ),
                    None => println!("  {} {:>8}  {}", status_text, human_size(size).dimmed(), path),
                }
            }
            ScanEvent::RequestFailed { path, message } => {
                if self.silent_mode {
                    tracing::debug!("{}: {}", path, message);
                } else {
                    println!("  {} {} {}", "✗".red(), path, message.dimmed());
                }
            }
            ScanEvent::Paused { clusters } => {
                println!("  {} Paused ({} response cluster(s))", "⏸".yellow(), clusters.to_string().cyan());
            }
            ScanEvent::ScanCompleted { matches, errors, duration } => {
                println!("\n{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
                println!(
                    "  {} {} match(es), {} error(s) in {:.1}s",
                    "✓".green(),
                    matches.to_string().cyan(),
                    errors.to_string().cyan(),
                    duration.as_secs_f64()
                );
            }

            // Reports
            ScanEvent::ReportSaved { path } => {
                println!("  {} Report {}", "✓".green(), path.cyan());
            }

            // Errors
            ScanEvent::Error { context, error } => {
                tracing::error!("{}: {}", context, error);
            }
        }
    }
}
