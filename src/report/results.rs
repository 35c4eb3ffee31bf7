//! Result table: one row per scenario, one column per result field.

use std::io::Write;

use crate::error::StaffingResult;
use crate::staffing::{ScenarioOutcome, ScenarioResult};

pub const RESULT_COLUMNS: [&str; 27] = [
    "scenario_name",
    "total_rooms",
    "trainees_available",
    "crnas_available",
    "faculty_available",
    "fixed_crna_buffer",
    "fixed_faculty_buffer",
    "crnas_available_for_rooms",
    "faculty_available_for_coverage",
    "trainee_rooms",
    "crna_rooms",
    "solo_rooms",
    "trainee_supervision_load",
    "crna_supervision_load",
    "faculty_for_trainees",
    "faculty_for_crnas",
    "supervisory_faculty",
    "faculty_buffer",
    "max_rooms_coverable",
    "rooms_left_to_cover",
    "crna_demand",
    "crnas_shortage",
    "faculty_needed",
    "faculty_required",
    "faculty_overage",
    "mor_asc_sat_faculty",
    "percent_solo",
];

/// Field values in [RESULT_COLUMNS] order. Loads keep two decimals.
pub fn result_record(result: &ScenarioResult) -> Vec<String> {
    vec![
        result.name.clone(),
        result.total_rooms.to_string(),
        result.trainees_available.to_string(),
        result.crnas_available.to_string(),
        result.faculty_available.to_string(),
        result.fixed_crna_buffer.to_string(),
        result.fixed_faculty_buffer.to_string(),
        result.crnas_available_for_rooms.to_string(),
        result.faculty_available_for_coverage.to_string(),
        result.trainee_rooms.to_string(),
        result.crna_rooms.to_string(),
        result.solo_rooms.to_string(),
        format!("{:.2}", result.trainee_supervision_load),
        format!("{:.2}", result.crna_supervision_load),
        result.faculty_for_trainees.to_string(),
        result.faculty_for_crnas.to_string(),
        result.supervisory_faculty.to_string(),
        result.faculty_buffer.to_string(),
        result.max_rooms_coverable.to_string(),
        result.rooms_left_to_cover.to_string(),
        result.crna_demand.to_string(),
        result.crnas_shortage.to_string(),
        result.faculty_needed.to_string(),
        result.faculty_required.to_string(),
        result.faculty_overage.to_string(),
        result.mor_asc_sat_faculty.to_string(),
        result.percent_solo.to_string(),
    ]
}

/// Empty days keep their name and leave every other column blank.
pub fn outcome_record(outcome: &ScenarioOutcome) -> Vec<String> {
    match &outcome.result {
        Some(result) => result_record(result),
        None => {
            let mut record = vec![String::new(); RESULT_COLUMNS.len()];
            record[0] = outcome.name.clone();
            record
        }
    }
}

pub fn write_results_csv<W: Write>(outcomes: &[ScenarioOutcome], writer: W) -> StaffingResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(RESULT_COLUMNS)?;
    for outcome in outcomes {
        csv_writer.write_record(outcome_record(outcome))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn results_to_json(outcomes: &[ScenarioOutcome]) -> StaffingResult<String> {
    Ok(serde_json::to_string_pretty(outcomes)?)
}

/// Tab-separated table for terminal output.
pub fn format_results_table(outcomes: &[ScenarioOutcome]) -> String {
    let mut out = RESULT_COLUMNS.join("\t");
    out.push('\n');
    for outcome in outcomes {
        out.push_str(&outcome_record(outcome).join("\t"));
        out.push('\n');
    }
    out
}
