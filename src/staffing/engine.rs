//! Allocation engine: maps one complete scenario plus the parameter set to a
//! fully derived [ScenarioResult].
//!
//! Rooms are assigned greedily in a fixed order (trainees, then flexible
//! CRNAs, then solo faculty) after fixed buffers are withheld. Supervisory
//! faculty is charged before solo coverage. Every clamp floors at zero where
//! the quantity is computed, except `rooms_left_to_cover`, which is the exact
//! uncovered demand.

use serde::{Deserialize, Serialize};

use crate::staffing::params::{round_half_up, Parameters, RoundingPolicy};
use crate::staffing::scenario::{Scenario, ScenarioInput};

/// Quotients within this distance above a whole number count as that whole number.
pub const EPSILON: f64 = 1e-9;

/// Every intermediate and final quantity of one scenario's allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub total_rooms: u32,
    pub trainees_available: u32,
    pub crnas_available: u32,
    pub faculty_available: u32,

    pub fixed_crna_buffer: u32,
    pub fixed_faculty_buffer: u32,
    pub crnas_available_for_rooms: u32,
    pub faculty_available_for_coverage: u32,

    pub trainee_rooms: u32,
    pub crna_rooms: u32,
    pub solo_rooms: u32,

    /// Raw `trainee_rooms / trainee_supervision_ratio`.
    pub trainee_supervision_load: f64,
    /// Raw `crna_rooms / crna_supervision_ratio`.
    pub crna_supervision_load: f64,
    pub faculty_for_trainees: u32,
    pub faculty_for_crnas: u32,
    /// Supervising faculty actually charged against coverage faculty.
    pub supervisory_faculty: u32,

    /// Coverage faculty left idle after supervision and solo rooms.
    pub faculty_buffer: u32,
    pub max_rooms_coverable: u32,
    pub rooms_left_to_cover: i64,

    pub crna_demand: u32,
    pub crnas_shortage: u32,

    pub faculty_needed: u32,
    pub faculty_required: u32,
    pub faculty_overage: i64,
    pub mor_asc_sat_faculty: i64,
    pub percent_solo: u32,
}

/// Supervising faculty needed for `rooms` at `ratio`, rounded up. Zero rooms need nobody.
pub fn supervising_faculty(rooms: u32, ratio: f64) -> u32 {
    if rooms == 0 {
        return 0;
    }
    (supervision_load(rooms, ratio) - EPSILON).ceil() as u32
}

fn supervision_load(rooms: u32, ratio: f64) -> f64 {
    f64::from(rooms) / ratio
}

/// Whole percent of MOR/ASC/Sat faculty working solo; 0 when that pool is empty.
pub fn percent_solo(solo_rooms: u32, mor_asc_sat_faculty: i64) -> u32 {
    if mor_asc_sat_faculty <= 0 {
        return 0;
    }
    // ties to even
    (f64::from(solo_rooms) / mor_asc_sat_faculty as f64 * 100.0).round_ties_even() as u32
}

/// Compute one scenario. Pure: identical inputs give identical results.
pub fn compute(scenario: &ScenarioInput, params: &Parameters) -> ScenarioResult {
    let total_rooms = scenario.total_rooms;

    let faculty_available_for_coverage = scenario
        .faculty_available
        .saturating_sub(params.fixed_faculty_buffer);
    let crnas_available_for_rooms = scenario
        .crnas_available
        .saturating_sub(params.fixed_crna_buffer);

    let trainee_rooms = scenario.trainees_available.min(total_rooms);
    let mut rooms_left = total_rooms - trainee_rooms;

    let crna_rooms = crnas_available_for_rooms.min(rooms_left);
    rooms_left -= crna_rooms;

    let trainee_supervision_load = supervision_load(trainee_rooms, params.trainee_supervision_ratio);
    let crna_supervision_load = supervision_load(crna_rooms, params.crna_supervision_ratio);
    let faculty_for_trainees = supervising_faculty(trainee_rooms, params.trainee_supervision_ratio);
    let faculty_for_crnas = supervising_faculty(crna_rooms, params.crna_supervision_ratio);
    let supervisory_faculty = match params.rounding {
        RoundingPolicy::CeilPerTier => faculty_for_trainees.saturating_add(faculty_for_crnas),
        RoundingPolicy::HalfUpCombined => {
            round_half_up(trainee_supervision_load + crna_supervision_load) as u32
        }
    };

    let mut faculty_left = faculty_available_for_coverage.saturating_sub(supervisory_faculty);

    let solo_rooms = faculty_left.min(rooms_left);
    faculty_left -= solo_rooms;
    rooms_left -= solo_rooms;

    let faculty_buffer = faculty_left;
    let max_rooms_coverable = trainee_rooms + crna_rooms + solo_rooms;
    let rooms_left_to_cover = i64::from(total_rooms) - i64::from(max_rooms_coverable);
    debug_assert_eq!(rooms_left_to_cover, i64::from(rooms_left));

    let crna_demand = total_rooms
        .saturating_sub(trainee_rooms)
        .saturating_sub(solo_rooms)
        .saturating_sub(params.fixed_crna_buffer);
    let crnas_shortage = crna_demand.saturating_sub(scenario.crnas_available);

    // Sums saturate at u32::MAX.
    let faculty_needed = params
        .fixed_faculty_buffer
        .saturating_add(supervisory_faculty)
        .saturating_add(solo_rooms);
    let faculty_required = faculty_needed
        .saturating_add(params.cd_mor_faculty)
        .saturating_add(params.nl_or_block_faculty);
    let faculty_overage = i64::from(scenario.faculty_available) - i64::from(faculty_required);
    let mor_asc_sat_faculty = i64::from(faculty_required) - i64::from(params.nl_faculty);

    log::debug!(
        "{}: rooms={} trainees={} crnas={} faculty={}",
        scenario.name,
        total_rooms,
        scenario.trainees_available,
        scenario.crnas_available,
        scenario.faculty_available
    );
    log::debug!(
        "{}: coverage faculty {} - {} = {}, flexible crnas {} - {} = {}",
        scenario.name,
        scenario.faculty_available,
        params.fixed_faculty_buffer,
        faculty_available_for_coverage,
        scenario.crnas_available,
        params.fixed_crna_buffer,
        crnas_available_for_rooms
    );
    log::debug!(
        "{}: trainee rooms {} (1:{} -> {:.2}), crna rooms {} (1:{} -> {:.2}), supervisory {} ({:?})",
        scenario.name,
        trainee_rooms,
        params.trainee_supervision_ratio,
        trainee_supervision_load,
        crna_rooms,
        params.crna_supervision_ratio,
        crna_supervision_load,
        supervisory_faculty,
        params.rounding
    );
    log::debug!(
        "{}: solo rooms {}, covered {}/{}, uncovered {}, faculty buffer {}",
        scenario.name,
        solo_rooms,
        max_rooms_coverable,
        total_rooms,
        rooms_left_to_cover,
        faculty_buffer
    );
    log::debug!(
        "{}: crna demand {} shortage {}, faculty required {} overage {}",
        scenario.name,
        crna_demand,
        crnas_shortage,
        faculty_required,
        faculty_overage
    );

    ScenarioResult {
        name: scenario.name.clone(),
        total_rooms,
        trainees_available: scenario.trainees_available,
        crnas_available: scenario.crnas_available,
        faculty_available: scenario.faculty_available,
        fixed_crna_buffer: params.fixed_crna_buffer,
        fixed_faculty_buffer: params.fixed_faculty_buffer,
        crnas_available_for_rooms,
        faculty_available_for_coverage,
        trainee_rooms,
        crna_rooms,
        solo_rooms,
        trainee_supervision_load,
        crna_supervision_load,
        faculty_for_trainees,
        faculty_for_crnas,
        supervisory_faculty,
        faculty_buffer,
        max_rooms_coverable,
        rooms_left_to_cover,
        crna_demand,
        crnas_shortage,
        faculty_needed,
        faculty_required,
        faculty_overage,
        mor_asc_sat_faculty,
        percent_solo: percent_solo(solo_rooms, mor_asc_sat_faculty),
    }
}

/// Result slot for one scenario; `result` is `None` for an empty day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Option<ScenarioResult>,
}

impl ScenarioOutcome {
    pub fn is_empty(&self) -> bool {
        self.result.is_none()
    }
}

/// Compute a tagged scenario. Empty days produce an outcome without a result.
pub fn compute_scenario(scenario: &Scenario, params: &Parameters) -> ScenarioOutcome {
    match scenario {
        Scenario::Complete(input) => ScenarioOutcome {
            name: input.name.clone(),
            result: Some(compute(input, params)),
        },
        Scenario::Empty { name } => {
            log::warn!("{name}: input data is empty; output will remain blank");
            ScenarioOutcome {
                name: name.clone(),
                result: None,
            }
        }
    }
}
