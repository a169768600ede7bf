//! Fixed worker pool that drives one frame of particle work.
//!
//! Each frame the population is cut into one contiguous chunk per worker.
//! A chunk's death check and integration run as a single job, so the two
//! never race on the same indices, while different chunks run in parallel.
//! `run_frame` returns only after every chunk job has finished.

use std::{
    ops::Range,
    time::{Duration, Instant},
};

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, trace};

use crate::{
    core::ParticleStore,
    error::{SimulationError, SimulationResult},
};

use super::simulation_tasks::FrameTasks;

/// Worker count used when none is configured.
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Summary of one completed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub respawned: usize,
    pub chunks: usize,
    pub elapsed: Duration,
}

/// Splits `[0, len)` into at most `workers` contiguous, disjoint ranges.
///
/// With `len % workers == 0` every range has exactly `len / workers`
/// elements. Otherwise the ranges are `ceil(len / workers)` long and the
/// last one is shorter.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    assert!(workers > 0, "worker count must be greater than 0");
    if len == 0 {
        return Vec::new();
    }
    let chunk_len = len.div_ceil(workers);
    (0..len)
        .step_by(chunk_len)
        .map(|begin| begin..(begin + chunk_len).min(len))
        .collect()
}

pub struct WorkScheduler {
    pool: ThreadPool,
    worker_count: usize,
}

impl WorkScheduler {
    pub fn new(worker_count: usize) -> SimulationResult<Self> {
        if worker_count == 0 {
            return Err(SimulationError::Precondition(
                "worker count must be greater than 0".to_string(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|index| format!("particle-worker-{}", index))
            .build()?;
        info!(worker_count, "started particle worker pool");

        Ok(Self { pool, worker_count })
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Runs `tasks` over every chunk of `store` and blocks until all chunks
    /// are done.
    pub fn run_frame(&self, store: &mut ParticleStore, tasks: &FrameTasks) -> FrameReport {
        let start = Instant::now();
        let ranges = partition(store.len(), self.worker_count);
        let chunk_len = ranges.first().map_or(1, |range| range.len());

        let chunks = store.split_chunks_mut(chunk_len);
        debug_assert_eq!(chunks.len(), ranges.len());

        // One slot per chunk, dropped at the end of the frame.
        let mut respawned = vec![0usize; chunks.len()];

        self.pool.scope(|scope| {
            for (mut chunk, slot) in chunks.into_iter().zip(respawned.iter_mut()) {
                scope.spawn(move |_| {
                    *slot = tasks.execute(&mut chunk);
                    trace!(range = ?chunk.range(), respawned = *slot, "chunk done");
                });
            }
        });

        let report = FrameReport {
            respawned: respawned.iter().sum(),
            chunks: respawned.len(),
            elapsed: start.elapsed(),
        };
        debug!(
            respawned = report.respawned,
            chunks = report.chunks,
            elapsed_us = report.elapsed.as_micros() as u64,
            "frame complete"
        );
        report
    }

    /// Stops the worker threads. No frame can be in flight here since
    /// `run_frame` only returns after its barrier.
    pub fn shutdown(self) {
        info!(worker_count = self.worker_count, "stopping particle worker pool");
        drop(self.pool);
    }
}
