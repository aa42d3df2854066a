use super::errors::ScanError;
use super::models::{Callbacks, ClusterIndex, ClusterSummary, PauseGate, ProbeSet, ScanEngine, ScanRun};
use super::wildcard::tuning;
use super::worker;
use crate::traits::{Dictionary, Requester};
use dirsift_config::ScanSettings;
use dirsift_models::{ProbeResult, ScanFailure, ScanMatch};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

type Result<T> = std::result::Result<T, ScanError>;

impl ScanEngine {
    pub fn new(requester: Arc<dyn Requester>, dictionary: Arc<dyn Dictionary>, settings: ScanSettings) -> Self {
        Self {
            requester,
            dictionary,
            settings,
            callbacks: Callbacks::default(),
            run: Mutex::new(None),
        }
    }

    /// Called on a worker thread for every accepted path
    pub fn on_match<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ProbeResult) + Send + Sync + 'static,
    {
        self.callbacks.matched.push(Arc::new(callback));
        self
    }

    /// Called on a worker thread for every rejected path (404, wildcard, duplicate)
    pub fn on_not_found<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ProbeResult) + Send + Sync + 'static,
    {
        self.callbacks.not_found.push(Arc::new(callback));
        self
    }

    /// Called on a worker thread with the path and message of every failed request
    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.callbacks.errors.push(Arc::new(callback));
        self
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Probes the baselines, then spawns the workers and returns.
    ///
    /// Every call starts from scratch: a previous scan still in progress is
    /// stopped and drained first, then matches, errors, clusters and
    /// baselines are rebuilt.
    pub fn start(&self) -> Result<()> {
        if let Some(previous) = self.current() {
            if previous.gate.live() > 0 {
                tracing::debug!("Stopping previous scan before restart");
                previous.running.store(false, Ordering::SeqCst);
                previous.gate.open();
                previous.gate.wait_idle(None);
            }
        }

        self.dictionary.reset();

        let probes = ProbeSet::setup(self.requester.as_ref(), self.dictionary.extensions(), &self.settings);
        let thread_count = self.settings.threads.min(self.dictionary.len());

        let run = Arc::new(ScanRun {
            requester: Arc::clone(&self.requester),
            dictionary: Arc::clone(&self.dictionary),
            callbacks: self.callbacks.clone(),
            probes,
            clusters: ClusterIndex::new(self.settings.similarity_threshold, tuning(&self.settings)),
            gate: PauseGate::new(thread_count),
            running: AtomicBool::new(thread_count > 0),
            matches: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
            thread_count,
        });
        *self.run.lock() = Some(Arc::clone(&run));

        tracing::info!(
            "Scanning {} ({} paths, {} threads)",
            self.requester.base_url(),
            self.dictionary.len(),
            thread_count
        );

        for index in 0..thread_count {
            if let Err(e) = worker::spawn(Arc::clone(&run), index) {
                tracing::error!("Failed to spawn worker {}: {}", index, e);
                run.gate.retire_many(thread_count - index);
                run.running.store(false, Ordering::SeqCst);
                run.gate.open();
                return Err(ScanError::Thread(e));
            }
        }

        Ok(())
    }

    /// Blocks until every worker has finished its current path and parked.
    /// No callback fires after this returns until `play()` or `stop()`.
    pub fn pause(&self) -> Result<()> {
        let run = self
            .current()
            .filter(|run| run.running.load(Ordering::SeqCst))
            .ok_or(ScanError::NotRunning)?;

        run.gate.close();
        tracing::debug!("Paused {} worker(s)", run.gate.live());

        let summary = run.clusters.summary();
        if !summary.is_empty() {
            tracing::info!("Responses diff info:");
            for entry in &summary {
                match (&entry.second_path, entry.ratio) {
                    (Some(second), Some(ratio)) => tracing::info!(
                        "  bucket {}: {} (worker {}) ~ {} (worker {}), ratio {:.3}, pattern {}",
                        entry.bucket,
                        entry.path,
                        entry.worker,
                        second,
                        entry.second_worker.unwrap_or_default(),
                        ratio,
                        entry.path_pattern.as_deref().unwrap_or("-")
                    ),
                    _ => tracing::info!("  bucket {}: {} (worker {})", entry.bucket, entry.path, entry.worker),
                }
            }
        }

        Ok(())
    }

    /// Resumes parked workers
    pub fn play(&self) {
        if let Some(run) = self.current() {
            run.gate.open();
        }
    }

    /// Workers exit after their current path; an in-flight request is not interrupted
    pub fn stop(&self) {
        if let Some(run) = self.current() {
            run.running.store(false, Ordering::SeqCst);
            run.gate.open();
        }
    }

    pub fn is_running(&self) -> bool {
        self.current()
            .is_some_and(|run| run.running.load(Ordering::SeqCst) && run.gate.live() > 0)
    }

    pub fn is_paused(&self) -> bool {
        self.current().is_some_and(|run| run.gate.is_paused())
    }

    /// True once every worker has exited, or when nothing was started
    pub fn is_finished(&self) -> bool {
        self.current().map_or(true, |run| run.gate.live() == 0)
    }

    /// Waits for every worker to exit. `false` if the timeout elapsed first.
    pub fn wait(&self, timeout: Option<Duration>) -> bool {
        match self.current() {
            Some(run) => run.gate.wait_idle(timeout),
            None => true,
        }
    }

    pub fn matches(&self) -> Vec<ScanMatch> {
        self.current()
            .map(|run| run.matches.lock().clone())
            .unwrap_or_default()
    }

    pub fn errors(&self) -> Vec<ScanFailure> {
        self.current()
            .map(|run| run.errors.lock().clone())
            .unwrap_or_default()
    }

    pub fn cluster_summary(&self) -> Vec<ClusterSummary> {
        self.current()
            .map(|run| run.clusters.summary())
            .unwrap_or_default()
    }

    /// Workers spawned by the last `start()`
    pub fn thread_count(&self) -> usize {
        self.current().map_or(0, |run| run.thread_count)
    }

    fn current(&self) -> Option<Arc<ScanRun>> {
        self.run.lock().clone()
    }
}
