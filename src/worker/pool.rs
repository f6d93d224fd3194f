//! Worker pool management and search resolution.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{after, bounded, never, select, tick, Receiver, Sender};
use tracing::info;

use crate::currency::CurrencyConfig;
use crate::error::{Result, VanityError};
use crate::matcher::Pattern;
use crate::mnemonic::{MnemonicSource, WordCount};

use super::cpu::{CpuWorker, WorkerStats};

/// Result of a successful vanity search.
#[derive(Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The matching address
    pub address: String,
    /// The mnemonic that derives it
    pub mnemonic: String,
    /// The ID of the worker that found this result
    pub worker_id: usize,
}

impl fmt::Debug for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchResult")
            .field("address", &self.address)
            .field("mnemonic", &"<redacted>")
            .field("worker_id", &self.worker_id)
            .finish()
    }
}

/// What every worker derives and what it looks for.
#[derive(Clone)]
pub struct SearchSettings {
    pub currency: CurrencyConfig,
    pub pattern: Pattern,
    pub words: WordCount,
    pub passphrase: String,
}

impl fmt::Debug for SearchSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchSettings")
            .field("currency", &self.currency.currency())
            .field("pattern", &self.pattern)
            .field("words", &self.words)
            .field("passphrase", &"<redacted>")
            .finish()
    }
}

/// First-wins outcome slot shared by the workers of one search.
///
/// Only the first `publish` reaches the channel and raises the stop flag;
/// later ones are dropped.
pub(crate) struct Resolution {
    resolved: AtomicBool,
    stop_flag: Arc<AtomicBool>,
    outcome_tx: Sender<Result<SearchResult>>,
}

impl Resolution {
    fn new(stop_flag: Arc<AtomicBool>, outcome_tx: Sender<Result<SearchResult>>) -> Self {
        Self {
            resolved: AtomicBool::new(false),
            stop_flag,
            outcome_tx,
        }
    }

    /// Publishes the search outcome. Returns false if another outcome won.
    pub(crate) fn publish(&self, outcome: Result<SearchResult>) -> bool {
        if self
            .resolved
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        // Only the winner sends, so a capacity of one never blocks.
        let _ = self.outcome_tx.send(outcome);
        self.stop_flag.store(true, Ordering::Release);
        true
    }

    #[inline]
    pub(crate) fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Acquire)
    }
}

/// Runs a vanity search on a pool of worker threads.
///
/// Workers start on construction. [`WorkerPool::wait`] blocks until the
/// first match or the first fatal error, stops the remaining workers, joins
/// them and returns that outcome.
pub struct WorkerPool {
    /// Worker thread handles (Option to allow taking during join)
    handles: Option<Vec<JoinHandle<()>>>,
    /// Receives the single search outcome
    outcome_rx: Receiver<Result<SearchResult>>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
    /// Shared statistics
    stats: Arc<WorkerStats>,
    /// Start time
    start_time: Instant,
}

impl WorkerPool {
    /// Creates a pool and starts `num_workers` workers.
    pub fn new(
        num_workers: usize,
        settings: SearchSettings,
        source: Arc<dyn MnemonicSource>,
    ) -> Self {
        let (outcome_tx, outcome_rx) = bounded(1);
        let stop_flag = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(WorkerStats::new());
        let resolution = Arc::new(Resolution::new(stop_flag.clone(), outcome_tx));
        let settings = Arc::new(settings);

        let handles = (0..num_workers)
            .map(|id| {
                let settings = settings.clone();
                let source = source.clone();
                let resolution = resolution.clone();
                let stats = stats.clone();

                thread::Builder::new()
                    .name(format!("vanity-worker-{}", id))
                    .spawn(move || {
                        let worker = CpuWorker::new(id, settings, source, resolution, stats);
                        worker.run();
                    })
                    .expect("Failed to spawn worker thread")
            })
            .collect();

        // Only workers hold the sender now; the channel disconnects once
        // they have all exited.
        drop(resolution);

        Self {
            handles: Some(handles),
            outcome_rx,
            stop_flag,
            stats,
            start_time: Instant::now(),
        }
    }

    /// Waits for the search to resolve.
    ///
    /// Logs progress every `report_interval`. If `timeout` elapses first the
    /// search is stopped with [`VanityError::Timeout`]; if the stop flag is
    /// raised externally it ends with [`VanityError::Cancelled`]. All
    /// workers have exited when this returns.
    pub fn wait(
        mut self,
        report_interval: Duration,
        timeout: Option<Duration>,
    ) -> Result<SearchResult> {
        let ticker = tick(report_interval);
        let deadline = match timeout {
            Some(limit) => after(limit),
            None => never(),
        };

        let outcome = loop {
            select! {
                recv(self.outcome_rx) -> msg => {
                    break msg.unwrap_or(Err(VanityError::Cancelled));
                }
                recv(ticker) -> _ => self.log_progress(),
                recv(deadline) -> _ => {
                    break Err(VanityError::Timeout(timeout.unwrap_or_default()));
                }
            }
        };

        self.stop();
        self.join_workers();

        // A match published while the deadline fired still wins.
        let outcome = match outcome {
            Err(err @ (VanityError::Timeout(_) | VanityError::Cancelled)) => {
                self.outcome_rx.try_recv().unwrap_or(Err(err))
            }
            other => other,
        };

        match &outcome {
            Ok(result) => info!(
                worker = result.worker_id,
                attempts = self.total_attempts(),
                elapsed = ?self.elapsed(),
                "match found"
            ),
            Err(err) => info!(error = %err, attempts = self.total_attempts(), "search ended"),
        }

        outcome
    }

    fn log_progress(&self) {
        info!(
            elapsed = self.elapsed().as_secs(),
            attempts = self.total_attempts(),
            rate = %format!("{:.1}/s", self.attempts_per_second()),
            skipped = self.total_skipped(),
            "searching"
        );
    }

    /// Signals all workers to stop.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Release);
    }

    fn join_workers(&mut self) {
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                let _ = handle.join();
            }
        }
    }

    /// Returns the total candidates checked across all workers.
    pub fn total_attempts(&self) -> u64 {
        self.stats.total_attempts()
    }

    /// Returns the total candidates skipped after a derivation failure.
    pub fn total_skipped(&self) -> u64 {
        self.stats.total_skipped()
    }

    /// Returns the elapsed time since the pool was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the current rate (attempts per second).
    pub fn attempts_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_attempts() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Returns a clone of the stop flag for external use (e.g., signal handlers).
    pub fn stop_flag_clone(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Returns the shared counters; they stay readable after [`WorkerPool::wait`].
    pub fn stats(&self) -> Arc<WorkerStats> {
        self.stats.clone()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.stop();
        self.join_workers();
    }
}
