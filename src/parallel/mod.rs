pub mod batch;
pub mod pool;

pub use batch::{
    run_scenarios, run_scenarios_parallel, run_scenarios_with_pool, summarize, RunSummary,
};
pub use pool::WorkerPool;
