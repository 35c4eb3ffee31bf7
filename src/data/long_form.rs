//! Long form: one row per scenario under a header of named columns.

use crate::data::table::{cell_to_count, normalize_label, Table};
use crate::error::{StaffingError, StaffingResult};
use crate::staffing::{RawScenario, Scenario};

pub const NAME_COLUMN: &str = "scenario_name";
pub const REQUIRED_COLUMNS: [&str; 5] = [NAME_COLUMN, "total_rooms", "trainees", "crnas", "faculty"];

struct LongColumns {
    name: usize,
    total_rooms: usize,
    trainees: usize,
    crnas: usize,
    faculty: usize,
}

fn find_columns(table: &Table) -> StaffingResult<LongColumns> {
    let header: Vec<String> = table
        .row(0)
        .unwrap_or_default()
        .iter()
        .map(|cell| normalize_label(&cell.label()))
        .collect();
    let find = |column: &str| {
        header
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| StaffingError::MissingColumn {
                column: column.to_string(),
                expected: REQUIRED_COLUMNS.join(", "),
            })
    };
    Ok(LongColumns {
        name: find(NAME_COLUMN)?,
        total_rooms: find("total_rooms")?,
        trainees: find("trainees")?,
        crnas: find("crnas")?,
        faculty: find("faculty")?,
    })
}

/// True when the header row names the long-form scenario column.
pub fn is_long_form(table: &Table) -> bool {
    table
        .row(0)
        .unwrap_or_default()
        .iter()
        .any(|cell| normalize_label(&cell.label()) == NAME_COLUMN)
}

/// Parse every non-blank data row into a scenario. Blank names fall back to `Scenario N`.
pub fn read_long_form(table: &Table) -> StaffingResult<Vec<Scenario>> {
    let columns = find_columns(table)?;
    let mut scenarios = Vec::new();

    for (index, row) in table.rows().iter().enumerate().skip(1) {
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let name = match table.cell(index, columns.name).label() {
            label if label.is_empty() => format!("Scenario {}", scenarios.len() + 1),
            label => label,
        };
        let count = |col: usize, field: &str| cell_to_count(table.cell(index, col), field, &name);
        let raw = RawScenario {
            total_rooms: count(columns.total_rooms, "total_rooms")?,
            trainees: count(columns.trainees, "trainees")?,
            crnas: count(columns.crnas, "crnas")?,
            faculty: count(columns.faculty, "faculty")?,
            name,
        };
        scenarios.push(raw.resolve());
    }

    log::info!("read {} long-form scenario(s)", scenarios.len());
    Ok(scenarios)
}
