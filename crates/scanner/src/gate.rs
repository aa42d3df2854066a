use super::models::{GateState, PauseGate};
use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

impl PauseGate {
    /// Open gate expecting `workers` live workers
    pub(crate) fn new(workers: usize) -> Self {
        Self {
            state: Mutex::new(GateState {
                paused: false,
                parked: 0,
                live: workers,
            }),
            changed: Condvar::new(),
        }
    }

    /// Called by a worker between paths; blocks while the gate is closed
    pub(crate) fn checkpoint(&self) {
        let mut state = self.state.lock();
        if !state.paused {
            return;
        }

        state.parked += 1;
        self.changed.notify_all();
        while state.paused {
            self.changed.wait(&mut state);
        }
        state.parked -= 1;
    }

    /// Closes the gate and blocks until every live worker is parked at it.
    /// Returns early if the gate is reopened meanwhile.
    pub(crate) fn close(&self) {
        let mut state = self.state.lock();
        state.paused = true;
        while state.paused && state.parked < state.live {
            self.changed.wait(&mut state);
        }
    }

    pub(crate) fn open(&self) {
        let mut state = self.state.lock();
        state.paused = false;
        self.changed.notify_all();
    }

    /// Removes a worker for good; returns how many are left
    pub(crate) fn retire(&self) -> usize {
        let mut state = self.state.lock();
        state.live = state.live.saturating_sub(1);
        self.changed.notify_all();
        state.live
    }

    /// Removes workers that were never started
    pub(crate) fn retire_many(&self, count: usize) {
        let mut state = self.state.lock();
        state.live = state.live.saturating_sub(count);
        self.changed.notify_all();
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.state.lock().paused
    }

    pub(crate) fn live(&self) -> usize {
        self.state.lock().live
    }

    /// Waits until no worker is live. `false` if the timeout elapsed first.
    pub(crate) fn wait_idle(&self, timeout: Option<Duration>) -> bool {
        let deadline = timeout.map(|timeout| Instant::now() + timeout);
        let mut state = self.state.lock();

        while state.live > 0 {
            match deadline {
                Some(deadline) => {
                    if self.changed.wait_until(&mut state, deadline).timed_out() {
                        return state.live == 0;
                    }
                }
                None => self.changed.wait(&mut state),
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_close_waits_for_every_worker() {
        let gate = Arc::new(PauseGate::new(3));
        let stop = Arc::new(AtomicBool::new(false));
        let passes = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let (gate, stop, passes) = (gate.clone(), stop.clone(), passes.clone());
                thread::spawn(move || {
                    while !stop.load(Ordering::SeqCst) {
                        gate.checkpoint();
                        passes.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(2));
                    }
                    gate.retire();
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        gate.close();
        assert!(gate.is_paused());

        let frozen = passes.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(passes.load(Ordering::SeqCst), frozen);

        stop.store(true, Ordering::SeqCst);
        gate.open();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(gate.wait_idle(Some(Duration::from_secs(1))));
    }

    #[test]
    fn test_close_returns_when_workers_retire() {
        let gate = Arc::new(PauseGate::new(1));
        let worker = {
            let gate = gate.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                gate.retire();
            })
        };

        gate.close();
        assert_eq!(gate.live(), 0);
        worker.join().unwrap();
    }

    #[test]
    fn test_wait_idle_times_out() {
        let gate = PauseGate::new(1);
        assert!(!gate.wait_idle(Some(Duration::from_millis(10))));

        gate.retire();
        assert!(gate.wait_idle(Some(Duration::from_millis(10))));
    }
}
