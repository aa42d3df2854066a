use super::models::{ClusterOutcome, ProbeVerdict, ScanRun};
use dirsift_models::{Classification, ProbeResult, ScanFailure};
use dirsift_utils::size_bucket;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;

/// Retires the worker from the pause gate however its loop ends
struct WorkerGuard<'a> {
    run: &'a ScanRun,
    worker: usize,
}

impl Drop for WorkerGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            tracing::error!("Worker {} panicked", self.worker);
        }
        if self.run.gate.retire() == 0 {
            self.run.running.store(false, Ordering::SeqCst);
            tracing::debug!("Last worker finished");
        }
    }
}

pub(crate) fn spawn(run: Arc<ScanRun>, worker: usize) -> std::io::Result<()> {
    thread::Builder::new()
        .name(format!("dirsift-worker-{}", worker))
        .spawn(move || work(&run, worker))
        .map(|_| ())
}

fn work(run: &ScanRun, worker: usize) {
    let _guard = WorkerGuard { run, worker };

    loop {
        run.gate.checkpoint();
        if !run.running.load(Ordering::SeqCst) {
            break;
        }
        let Some(path) = run.dictionary.next_path() else {
            break;
        };
        run.process(&path, worker);
    }
}

impl ScanRun {
    /// Request, classify and report one path
    pub(crate) fn process(&self, path: &str, worker: usize) {
        let response = match self.requester.request(path) {
            Ok(response) => response,
            Err(e) => {
                let message = e.message();
                tracing::debug!("Request for {} failed: {}", path, message);
                self.errors.lock().push(ScanFailure {
                    path: path.to_string(),
                    message: message.clone(),
                });
                for callback in &self.callbacks.errors {
                    callback(path, &message);
                }
                return;
            }
        };

        let fingerprints = self.clusters.fingerprints();
        let reason = match self.probes.classify(path, &response, &fingerprints) {
            ProbeVerdict::NotFound => Classification::NotFound,
            ProbeVerdict::Wildcard => Classification::Wildcard,
            ProbeVerdict::Candidate => {
                let bucket = size_bucket(response.content_length());
                match self.clusters.record_or_match(bucket, path, &response.body, worker) {
                    ClusterOutcome::MatchFound => Classification::Duplicate,
                    ClusterOutcome::NoMatch => Classification::Found,
                }
            }
        };

        let result = ProbeResult::new(path.to_string(), response, reason);
        if reason.is_found() {
            tracing::debug!("Found {} ({})", path, result.response.status);
            self.matches.lock().push(result.to_match());
            for callback in &self.callbacks.matched {
                callback(&result);
            }
        } else {
            for callback in &self.callbacks.not_found {
                callback(&result);
            }
        }
    }
}
