//! Wide form: one column per day, named rows for each count.
//!
//! The first column holds row labels; the first row holds day headers
//! (dates in a workbook, any text in CSV).

use serde::Serialize;

use crate::data::table::{cell_to_count, normalize_label, Table};
use crate::error::StaffingResult;
use crate::staffing::{RawScenario, Scenario};

pub const REQUIRED_ROWS: [&str; 4] = ["total_rooms", "trainees", "crnas", "faculty"];

/// Header of one day column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHeader {
    /// Display name (`dd-Mon` for date headers).
    pub label: String,
    /// Short weekday name when the header is a date.
    pub weekday: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideInput {
    pub days: Vec<DayHeader>,
    pub scenarios: Vec<Scenario>,
}

fn find_row(table: &Table, label: &str) -> Option<usize> {
    (1..table.height()).find(|&row| normalize_label(&table.cell(row, 0).label()) == label)
}

fn column_is_blank(table: &Table, col: usize) -> bool {
    (0..table.height()).all(|row| table.cell(row, col).is_empty())
}

/// Parse every day column. A required row that is absent altogether makes every
/// day empty; a blank cell makes only its own day empty.
pub fn read_wide_form(table: &Table) -> StaffingResult<WideInput> {
    let rows: Vec<Option<usize>> = REQUIRED_ROWS.iter().map(|label| find_row(table, label)).collect();
    for (label, row) in REQUIRED_ROWS.iter().zip(&rows) {
        if row.is_none() {
            log::warn!("input has no '{label}' row; every day will be blank");
        }
    }

    let mut days = Vec::new();
    let mut scenarios = Vec::new();

    for col in 1..table.width() {
        if column_is_blank(table, col) {
            continue;
        }
        let header = table.cell(0, col);
        let label = match header.label() {
            label if label.is_empty() => format!("Day {}", days.len() + 1),
            label => label,
        };

        let mut counts = [None; 4];
        for (slot, (field, row)) in counts.iter_mut().zip(REQUIRED_ROWS.iter().zip(&rows)) {
            if let Some(row) = row {
                *slot = cell_to_count(table.cell(*row, col), field, &label)?;
            }
        }
        let [total_rooms, trainees, crnas, faculty] = counts;

        days.push(DayHeader {
            label: label.clone(),
            weekday: header.weekday(),
        });
        scenarios.push(
            RawScenario {
                name: label,
                total_rooms,
                trainees,
                crnas,
                faculty,
            }
            .resolve(),
        );
    }

    log::info!("read {} wide-form day(s)", scenarios.len());
    Ok(WideInput { days, scenarios })
}
