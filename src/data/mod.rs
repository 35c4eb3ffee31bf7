//! Scenario input: table loading plus the long-form, wide-form and list readers.

pub mod lists;
pub mod long_form;
pub mod table;
pub mod wide_form;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use lists::{build_scenarios, parse_count_list};
pub use long_form::{is_long_form, read_long_form};
pub use table::{Cell, Table, TableFormat};
pub use wide_form::{read_wide_form, DayHeader, WideInput};

use crate::error::StaffingResult;
use crate::staffing::Scenario;

/// How scenarios are laid out in the input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputLayout {
    /// Long form when the header names `scenario_name`, wide form otherwise.
    #[default]
    Auto,
    Long,
    Wide,
}

impl FromStr for InputLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "long" => Ok(Self::Long),
            "wide" => Ok(Self::Wide),
            other => Err(format!("unknown layout '{other}' (expected auto, long or wide)")),
        }
    }
}

impl fmt::Display for InputLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Long => "long",
            Self::Wide => "wide",
        })
    }
}

/// Scenarios read from a table, tagged by the layout they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedScenarios {
    Long(Vec<Scenario>),
    Wide(WideInput),
}

impl LoadedScenarios {
    pub fn scenarios(&self) -> &[Scenario] {
        match self {
            Self::Long(scenarios) => scenarios,
            Self::Wide(wide) => &wide.scenarios,
        }
    }
}

pub fn read_table(table: &Table, layout: InputLayout) -> StaffingResult<LoadedScenarios> {
    let layout = match layout {
        InputLayout::Auto if is_long_form(table) => InputLayout::Long,
        InputLayout::Auto => InputLayout::Wide,
        explicit => explicit,
    };
    log::debug!("reading input as {layout} form");
    match layout {
        InputLayout::Long => read_long_form(table).map(LoadedScenarios::Long),
        _ => read_wide_form(table).map(LoadedScenarios::Wide),
    }
}

/// Load a CSV or workbook file and read its scenarios.
pub fn load_scenarios(path: &Path, layout: InputLayout) -> StaffingResult<LoadedScenarios> {
    let table = Table::load(path)?;
    read_table(&table, layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_layout_detects_long_form_header() {
        let long = Table::from_csv_reader(
            "scenario_name,total_rooms,trainees,crnas,faculty\nA,1,1,1,1\n".as_bytes(),
        )
        .expect("csv should parse");
        assert!(matches!(read_table(&long, InputLayout::Auto), Ok(LoadedScenarios::Long(_))));

        let wide = Table::from_csv_reader("label,Mon\ntotal_rooms,1\n".as_bytes())
            .expect("csv should parse");
        assert!(matches!(read_table(&wide, InputLayout::Auto), Ok(LoadedScenarios::Wide(_))));
    }

    #[test]
    fn layouts_parse_from_cli_spelling() {
        assert_eq!("Wide".parse::<InputLayout>(), Ok(InputLayout::Wide));
        assert!("tall".parse::<InputLayout>().is_err());
    }
}
