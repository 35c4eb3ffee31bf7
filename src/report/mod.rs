//! Output: the result table, the daily report grid and output file naming.

pub mod daily;
pub mod paths;
pub mod results;

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

pub use daily::{build_daily_report, ColumnLayout, DailyReport, Fill, ReportRow, ReportWriter, RowStyle};
pub use paths::derive_output_path;
pub use results::{
    format_results_table, outcome_record, result_record, results_to_json, write_results_csv,
    RESULT_COLUMNS,
};

use crate::error::{StaffingError, StaffingResult};
use crate::staffing::ScenarioOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected csv or json)")),
        }
    }
}

fn create(path: &Path) -> StaffingResult<File> {
    File::create(path).map_err(|err| StaffingError::io(path, err))
}

pub fn write_outcomes(
    path: &Path,
    outcomes: &[ScenarioOutcome],
    format: OutputFormat,
) -> StaffingResult<()> {
    let mut file = create(path)?;
    match format {
        OutputFormat::Csv => write_results_csv(outcomes, file)?,
        OutputFormat::Json => {
            let json = results_to_json(outcomes)?;
            file.write_all(json.as_bytes())
                .map_err(|err| StaffingError::io(path, err))?;
        }
    }
    log::info!("wrote {} result row(s) to {}", outcomes.len(), path.display());
    Ok(())
}

pub fn write_daily_report(
    path: &Path,
    report: &DailyReport,
    format: OutputFormat,
) -> StaffingResult<()> {
    let mut file = create(path)?;
    match format {
        OutputFormat::Csv => report.write_csv(file)?,
        OutputFormat::Json => {
            let json = report.to_json()?;
            file.write_all(json.as_bytes())
                .map_err(|err| StaffingError::io(path, err))?;
        }
    }
    log::info!("wrote daily report ({} day(s)) to {}", report.days.len(), path.display());
    Ok(())
}
