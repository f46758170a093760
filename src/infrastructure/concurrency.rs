/// Concurrency management for WhatCode.
/// Sizes the rayon pool used for batch visualization.

use anyhow::Result;
use tracing::info;

/// Worker count for batch runs: half the cores, minimum 1.
pub fn worker_count() -> usize {
    std::cmp::max(1, num_cpus::get() / 2)
}

/// Initialize the global rayon thread pool with controlled worker count.
/// Reserves ~50% of CPU capacity for the API server's connection threads.
pub fn init_thread_pool() -> Result<()> {
    let workers = worker_count();

    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()?;

    info!(workers, cores = num_cpus::get(), "initialized thread pool");

    Ok(())
}
