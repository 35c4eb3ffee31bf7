//! Staffing allocation: parameter set, scenario model and the allocation engine.

pub mod engine;
pub mod params;
pub mod scenario;

pub use engine::{
    compute, compute_scenario, percent_solo, supervising_faculty, ScenarioOutcome,
    ScenarioResult, EPSILON,
};
pub use params::{
    load_parameters, resolve_parameters, round_half_up, ModelRevision, Parameters,
    RoundingPolicy, PARAMS_ENV_VAR,
};
pub use scenario::{RawScenario, Scenario, ScenarioInput};
