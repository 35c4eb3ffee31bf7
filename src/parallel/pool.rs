//! Rayon thread pool configuration for scenario batches.
//!
//! Use [WorkerPool::install] to run a parallel batch with a fixed number of
//! threads, or rely on Rayon's default (all CPU cores).

use rayon::ThreadPoolBuilder;

use crate::error::StaffingResult;

/// Configures how many worker threads are used for parallel batch execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerPool {
    /// Number of worker threads. If 0, use Rayon default (num_cpus).
    pub workers: usize,
}

impl WorkerPool {
    /// Use all available CPU cores (Rayon default).
    pub fn default_workers() -> Self {
        Self::default()
    }

    /// Use exactly `n` worker threads.
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Run a closure on a thread pool with this worker count. If [workers](WorkerPool::workers) is 0,
    /// uses the global Rayon pool. Otherwise builds a temporary pool with that many threads.
    pub fn install<F, R>(&self, f: F) -> StaffingResult<R>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return Ok(f());
        }
        let pool = ThreadPoolBuilder::new().num_threads(self.workers).build()?;
        log::debug!("running batch on a dedicated pool of {} workers", self.workers);
        Ok(pool.install(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_runs_inline_on_global_pool() {
        let pool = WorkerPool::default_workers();
        assert_eq!(pool.workers, 0);
        assert_eq!(pool.install(|| 7).expect("global pool"), 7);
    }

    #[test]
    fn dedicated_pool_uses_requested_thread_count() {
        let pool = WorkerPool::with_workers(2);
        let threads = pool
            .install(rayon::current_num_threads)
            .expect("pool should build");
        assert_eq!(threads, 2);
    }
}
