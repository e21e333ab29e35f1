//! Fixed-size worker pool for the per-file phases.

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{RepoGuardError, Result};

/// One job per logical CPU.
#[must_use]
pub fn default_jobs() -> usize {
    num_cpus::get().max(1)
}

/// A dedicated rayon pool sized by `jobs`.
///
/// Work submitted through [`WorkerPool::install`] runs on this pool only, never on the
/// global rayon pool, so `jobs` bounds the parallelism of every phase.
pub struct WorkerPool {
    pool: ThreadPool,
    jobs: usize,
}

impl WorkerPool {
    /// # Errors
    /// Returns `InvalidJobs` for `jobs == 0`, or `WorkerPool` if the threads cannot start.
    pub fn new(jobs: usize) -> Result<Self> {
        if jobs == 0 {
            return Err(RepoGuardError::InvalidJobs(jobs));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(jobs)
            .thread_name(|i| format!("repo-guard-worker-{i}"))
            .build()?;
        tracing::debug!(jobs, "started worker pool");
        Ok(Self { pool, jobs })
    }

    #[must_use]
    pub const fn jobs(&self) -> usize {
        self.jobs
    }

    /// Run `op` inside the pool; parallel iterators it creates use the pool's threads.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("jobs", &self.jobs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
