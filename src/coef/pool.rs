//! Worker pool and thread budgets for the two layers of parallelism.
//!
//! The outer layer fans out across variables and variable pairs on a
//! long-lived pool. The inner layer (comparing the partitions of a single
//! pair) receives an explicit [`ThreadBudget`] from its caller and runs
//! serially whenever the outer layer already has more than one task.

use crate::errors::Result;
use std::sync::Arc;
use tracing::debug;

/// Number of threads a parallel routine is allowed to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadBudget {
    /// Run on the calling thread only.
    Serial,
    /// Fan out over the current pool, which has this many workers.
    Parallel(usize),
}

impl ThreadBudget {
    pub fn threads(self) -> usize {
        match self {
            Self::Serial => 1,
            Self::Parallel(n) => n.max(1),
        }
    }

    pub fn is_serial(self) -> bool {
        self.threads() == 1
    }

    /// Budget left for the inner layer when the outer layer runs `n_tasks`.
    pub fn for_inner_layer(self, n_tasks: usize) -> Self {
        if n_tasks == 1 {
            self
        } else {
            Self::Serial
        }
    }
}

/// Resolve a requested worker count, where zero means "all cores".
pub fn get_worker_count(jobs: usize) -> usize {
    if jobs == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    } else {
        jobs
    }
}

/// A rayon thread pool shared by every computation of a [`Clustermatch`](super::Clustermatch)
/// instance. Cloning is cheap and shares the same workers.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    pool: Arc<rayon::ThreadPool>,
    n_threads: usize,
}

impl WorkerPool {
    /// Build a pool with `jobs` workers (zero means one per core).
    pub fn new(jobs: usize) -> Result<Self> {
        let n_threads = get_worker_count(jobs);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .thread_name(|i| format!("clustermatch-worker-{i}"))
            .build()?;

        debug!(n_threads, "created worker pool");

        Ok(Self {
            pool: Arc::new(pool),
            n_threads,
        })
    }

    pub fn n_threads(&self) -> usize {
        self.n_threads
    }

    /// Full budget of this pool.
    pub fn budget(&self) -> ThreadBudget {
        if self.n_threads > 1 {
            ThreadBudget::Parallel(self.n_threads)
        } else {
            ThreadBudget::Serial
        }
    }

    /// Run `op` inside the pool so nested rayon iterators use its workers.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}
