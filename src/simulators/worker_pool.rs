//! Bounded worker pool shared by every gate application of an engine
//!
//! Work is split statically: the output buffer is cut into one contiguous
//! run of units per worker, so every output slot has exactly one writer and
//! results do not depend on scheduling.

use std::sync::Arc;

use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::debug;

use crate::error::ConfigurationError;

/// Clamp a configured worker count to at least one
pub fn clamp_concurrency(requested: usize, knob: &str) -> usize {
    if requested == 0 {
        debug!(knob, "non-positive concurrency clamped to 1");
        1
    } else {
        requested
    }
}

/// A fixed-size pool. A single-worker pool runs work on the calling thread.
#[derive(Clone)]
pub struct WorkerPool {
    workers: usize,
    pool: Option<Arc<ThreadPool>>,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self, ConfigurationError> {
        let workers = workers.max(1);
        let pool = if workers > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("qtransform-worker-{}", i))
                .build()?;
            Some(Arc::new(pool))
        } else {
            None
        };

        Ok(WorkerPool { workers, pool })
    }

    /// Pool that runs everything on the calling thread
    pub fn sequential() -> Self {
        WorkerPool {
            workers: 1,
            pool: None,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Set `output[i] = compute(i)` for every slot
    pub fn fill<T, F>(&self, output: &mut [T], compute: F)
    where
        T: Send,
        F: Fn(usize) -> T + Sync,
    {
        self.for_each_unit(output, 1, |index, slot| slot[0] = compute(index));
    }

    /// Split `output` into units of `unit_len` consecutive slots and call
    /// `compute(unit_index, unit)` on each, partitioned across the workers.
    pub fn for_each_unit<T, F>(&self, output: &mut [T], unit_len: usize, compute: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync,
    {
        debug_assert!(unit_len > 0 && output.len() % unit_len == 0);

        let units = output.len() / unit_len;
        let run = |first_unit: usize, chunk: &mut [T]| {
            for (offset, unit) in chunk.chunks_mut(unit_len).enumerate() {
                compute(first_unit + offset, unit);
            }
        };

        match &self.pool {
            Some(pool) if units > 1 => {
                let units_per_worker = (units + self.workers - 1) / self.workers;
                pool.install(|| {
                    output
                        .par_chunks_mut(units_per_worker * unit_len)
                        .enumerate()
                        .for_each(|(worker, chunk)| run(worker * units_per_worker, chunk));
                });
            }
            _ => run(0, output),
        }
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers)
            .finish()
    }
}
