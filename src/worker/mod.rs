//! Worker pool for parallel vanity search.
//!
//! This module provides:
//! - Multi-threaded CPU workers running the full derivation pipeline
//! - First-wins resolution with cooperative cancellation
//! - Progress tracking and reporting

mod cpu;
mod pool;

pub use cpu::{CpuWorker, WorkerStats};
pub use pool::{SearchResult, SearchSettings, WorkerPool};
