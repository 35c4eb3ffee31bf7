//! Batch execution of independent scenarios.
//!
//! Scenarios share nothing but the read-only parameter set, so a batch can be
//! computed serially or spread across Rayon workers. Either way the outcomes
//! come back in input order.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::StaffingResult;
use crate::parallel::pool::WorkerPool;
use crate::staffing::{compute_scenario, Parameters, Scenario, ScenarioOutcome};

pub fn run_scenarios(scenarios: &[Scenario], params: &Parameters) -> Vec<ScenarioOutcome> {
    run_with_parallelism(scenarios, params, false)
}

/// Like [run_scenarios] but distributes scenarios across the current Rayon pool.
pub fn run_scenarios_parallel(
    scenarios: &[Scenario],
    params: &Parameters,
) -> Vec<ScenarioOutcome> {
    run_with_parallelism(scenarios, params, true)
}

/// Parallel run inside [WorkerPool::install], for a pinned worker count.
pub fn run_scenarios_with_pool(
    scenarios: &[Scenario],
    params: &Parameters,
    pool: &WorkerPool,
) -> StaffingResult<Vec<ScenarioOutcome>> {
    pool.install(|| run_scenarios_parallel(scenarios, params))
}

fn run_with_parallelism(
    scenarios: &[Scenario],
    params: &Parameters,
    parallel: bool,
) -> Vec<ScenarioOutcome> {
    let run_one = |scenario: &Scenario| compute_scenario(scenario, params);

    let outcomes: Vec<ScenarioOutcome> = if parallel {
        scenarios.par_iter().map(run_one).collect()
    } else {
        scenarios.iter().map(run_one).collect()
    };

    log::info!(
        "computed {} scenario(s), {} empty",
        outcomes.len(),
        outcomes.iter().filter(|o| o.is_empty()).count()
    );
    outcomes
}

/// Totals over the complete days of a run. Empty days are counted but never
/// contribute to the numeric totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub days: usize,
    pub empty_days: usize,
    pub total_rooms: u64,
    pub rooms_covered: u64,
    pub rooms_uncovered: i64,
    pub solo_rooms: u64,
    pub crnas_shortage: u64,
    pub faculty_overage: i64,
}

pub fn summarize(outcomes: &[ScenarioOutcome]) -> RunSummary {
    let mut summary = RunSummary {
        days: outcomes.len(),
        ..RunSummary::default()
    };
    for outcome in outcomes {
        let Some(result) = &outcome.result else {
            summary.empty_days += 1;
            continue;
        };
        summary.total_rooms += u64::from(result.total_rooms);
        summary.rooms_covered += u64::from(result.max_rooms_coverable);
        summary.rooms_uncovered += result.rooms_left_to_cover;
        summary.solo_rooms += u64::from(result.solo_rooms);
        summary.crnas_shortage += u64::from(result.crnas_shortage);
        summary.faculty_overage += result.faculty_overage;
    }
    summary
}
