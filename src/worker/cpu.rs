//! CPU worker: mnemonic -> address attempts until the search resolves.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::crypto::HdDeriver;
use crate::error::Result;
use crate::mnemonic::MnemonicSource;

use super::pool::{Resolution, SearchSettings};
use super::SearchResult;

/// Statistics shared by all workers of a pool.
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Candidates fully derived and checked against the pattern
    pub attempts: AtomicU64,
    /// Candidates discarded because a derivation step was out of range
    pub skipped: AtomicU64,
}

impl WorkerStats {
    /// Creates new worker stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total candidates checked.
    pub fn total_attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Returns the total candidates skipped.
    pub fn total_skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }
}

/// A CPU worker that derives and tests candidate addresses.
pub struct CpuWorker {
    /// Worker ID
    id: usize,
    /// What to derive and what to look for
    settings: Arc<SearchSettings>,
    /// Where fresh mnemonics come from
    source: Arc<dyn MnemonicSource>,
    /// First-wins result slot and cancellation signal
    resolution: Arc<Resolution>,
    /// Shared statistics
    stats: Arc<WorkerStats>,
    /// Per-thread secp256k1 context
    deriver: HdDeriver,
}

impl CpuWorker {
    /// Creates a new CPU worker.
    pub(crate) fn new(
        id: usize,
        settings: Arc<SearchSettings>,
        source: Arc<dyn MnemonicSource>,
        resolution: Arc<Resolution>,
        stats: Arc<WorkerStats>,
    ) -> Self {
        Self {
            id,
            settings,
            source,
            resolution,
            stats,
            deriver: HdDeriver::new(),
        }
    }

    /// Runs the worker loop.
    ///
    /// Checks the stop signal before each attempt and exits when:
    /// - A match is found (published as the search result)
    /// - A fatal error occurs (published as the search error)
    /// - Another worker resolved the search, or it was cancelled
    ///
    /// Candidates that fail derivation are skipped.
    pub fn run(&self) {
        while !self.resolution.is_stopped() {
            match self.attempt() {
                Ok(Some(result)) => {
                    self.stats.attempts.fetch_add(1, Ordering::Relaxed);
                    if self.resolution.publish(Ok(result)) {
                        debug!(worker = self.id, "published match");
                    }
                    break;
                }
                Ok(None) => {
                    self.stats.attempts.fetch_add(1, Ordering::Relaxed);
                }
                Err(err) if err.is_recoverable() => {
                    self.stats.skipped.fetch_add(1, Ordering::Relaxed);
                    debug!(worker = self.id, error = %err, "skipping candidate");
                }
                Err(err) => {
                    warn!(worker = self.id, error = %err, "worker failed");
                    self.resolution.publish(Err(err));
                    break;
                }
            }
        }
    }

    /// One candidate: fresh mnemonic, full derivation, prefix check.
    fn attempt(&self) -> Result<Option<SearchResult>> {
        let settings = &*self.settings;
        let mnemonic = self.source.generate(settings.words)?;
        let address =
            settings
                .currency
                .derive_address(&self.deriver, &mnemonic, &settings.passphrase)?;

        if settings.pattern.matches(&address).is_match() {
            Ok(Some(SearchResult {
                address,
                mnemonic,
                worker_id: self.id,
            }))
        } else {
            Ok(None)
        }
    }
}
