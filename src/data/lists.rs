//! Scenarios given as parallel comma-separated count lists (`--total-rooms 20,22 ...`).

use crate::error::{StaffingError, StaffingResult};
use crate::staffing::{Scenario, ScenarioInput};

/// Parse `"20, 22,18"` into counts. Any token that is not a non-negative integer fails.
pub fn parse_count_list(value: &str, field: &str) -> StaffingResult<Vec<u32>> {
    value
        .split(',')
        .enumerate()
        .map(|(index, token)| {
            token
                .trim()
                .parse::<u32>()
                .map_err(|_| StaffingError::InvalidInteger {
                    field: field.to_string(),
                    scenario: format!("Scenario {}", index + 1),
                    value: token.trim().to_string(),
                })
        })
        .collect()
}

/// Zip four equally long lists into scenarios named `Scenario 1..n`.
pub fn build_scenarios(
    total_rooms: &[u32],
    trainees: &[u32],
    crnas: &[u32],
    faculty: &[u32],
) -> StaffingResult<Vec<Scenario>> {
    let lengths = vec![total_rooms.len(), trainees.len(), crnas.len(), faculty.len()];
    if lengths.iter().any(|&len| len != lengths[0]) {
        return Err(StaffingError::LengthMismatch { lengths });
    }

    Ok((0..total_rooms.len())
        .map(|i| {
            Scenario::from(ScenarioInput {
                name: format!("Scenario {}", i + 1),
                total_rooms: total_rooms[i],
                trainees_available: trainees[i],
                crnas_available: crnas[i],
                faculty_available: faculty[i],
            })
        })
        .collect())
}
