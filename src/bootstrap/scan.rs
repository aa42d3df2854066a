use dirsift::prelude::{
    Config, Dictionary, EventBus, HttpRequester, ProbeResult, ReportManager, Requester, ScanEngine, ScanEvent,
    WordlistDictionary,
};
use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(300);

pub struct ScanOutcome {
    pub reports: Arc<ReportManager>,
    pub matches: usize,
    pub errors: usize,
    pub duration: Duration,
}

/// Runs a whole scan on the current thread. The HTTP client is blocking, so
/// this must run outside the async runtime (`spawn_blocking`).
pub fn run(config: &Config, events: &Arc<EventBus>, interrupted: &AtomicBool) -> Result<ScanOutcome> {
    let dictionary = Arc::new(
        WordlistDictionary::from_wordlists(&config.target.wordlists, &config.dictionary)
            .context("Failed to load word lists")?,
    );
    let requester = Arc::new(
        HttpRequester::new(&config.target.url, &config.request).context("Failed to build HTTP client")?,
    );
    let reports = Arc::new(ReportManager::new(&config.report, requester.base_url(), chrono::Utc::now()));

    events.emit(ScanEvent::TargetInfo {
        url: requester.base_url().to_string(),
        paths: dictionary.len(),
        threads: config.scan.threads.min(dictionary.len()),
    });

    let engine = ScanEngine::new(requester, dictionary, config.scan.clone())
        .on_match({
            let events = Arc::clone(events);
            let reports = Arc::clone(&reports);
            move |result: &ProbeResult| {
                let found = result.to_match();
                events.emit(ScanEvent::Found {
                    status: found.status,
                    size: found.content_length,
                    path: found.path.clone(),
                    redirect: found.redirect.clone(),
                });
                reports.update(&found);
            }
        })
        .on_not_found(|result: &ProbeResult| {
            tracing::trace!("{} rejected ({:?})", result.path, result.reason);
        })
        .on_error({
            let events = Arc::clone(events);
            move |path: &str, message: &str| {
                events.emit(ScanEvent::RequestFailed {
                    path: path.to_string(),
                    message: message.to_string(),
                });
            }
        });

    let started = Instant::now();
    engine.start()?;

    while !engine.wait(Some(POLL_INTERVAL)) {
        if !interrupted.load(Ordering::SeqCst) {
            continue;
        }

        events.emit(ScanEvent::Interrupted);
        if engine.pause().is_ok() {
            events.emit(ScanEvent::Paused {
                clusters: engine.cluster_summary().len(),
            });
        }
        engine.stop();
        engine.wait(None);
        break;
    }

    let outcome = ScanOutcome {
        reports,
        matches: engine.matches().len(),
        errors: engine.errors().len(),
        duration: started.elapsed(),
    };

    events.emit(ScanEvent::ScanCompleted {
        matches: outcome.matches,
        errors: outcome.errors,
        duration: outcome.duration,
    });

    Ok(outcome)
}
