//! Daily report: a label-by-day grid for wide-form input.
//!
//! [ReportWriter] owns the row cursor and the column layout; rows are emitted
//! through it in order and it yields an immutable [DailyReport]. Styling is
//! carried as annotations ([RowStyle]) for whatever renderer draws the grid.

use std::io::Write;

use serde::{Serialize, Serializer};

use crate::data::DayHeader;
use crate::error::StaffingResult;
use crate::staffing::{Parameters, ScenarioOutcome, ScenarioResult};

/// Days per week block; a spacer column follows each block.
pub const DAYS_PER_BLOCK: usize = 5;
/// Column holding row labels (B in a spreadsheet).
pub const LABEL_COLUMN: usize = 1;
/// Rows 0 and 1 hold the day and weekday headers.
pub const FIRST_BODY_ROW: usize = 2;
pub const REPORT_TITLE: &str = "Main/NL/ASC";

/// Highlight colour. Serializes as its RGB hex code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Yellow,
    Blue,
    Green,
}

impl Fill {
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Yellow => "FFF200",
            Self::Blue => "CFEAF7",
            Self::Green => "E3F4D7",
        }
    }
}

impl Serialize for Fill {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowStyle {
    pub fill: Option<Fill>,
    pub bold: bool,
}

impl RowStyle {
    pub const PLAIN: Self = Self {
        fill: None,
        bold: false,
    };
    pub const BOLD: Self = Self {
        fill: None,
        bold: true,
    };

    pub const fn filled(fill: Fill) -> Self {
        Self {
            fill: Some(fill),
            bold: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Absolute grid row.
    pub index: usize,
    pub label: String,
    /// One entry per day; blank for empty days.
    pub values: Vec<String>,
    pub style: RowStyle,
}

/// Day columns placed after the label column, with a spacer after each block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnLayout {
    pub day_columns: Vec<usize>,
}

impl ColumnLayout {
    pub fn for_days(count: usize) -> Self {
        let mut col = LABEL_COLUMN + 1;
        let mut day_columns = Vec::with_capacity(count);
        for i in 0..count {
            day_columns.push(col);
            col += 1;
            if (i + 1) % DAYS_PER_BLOCK == 0 {
                col += 1;
            }
        }
        Self { day_columns }
    }

    pub fn width(&self) -> usize {
        self.day_columns
            .last()
            .map_or(LABEL_COLUMN + 1, |last| last + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyReport {
    pub days: Vec<DayHeader>,
    pub layout: ColumnLayout,
    pub rows: Vec<ReportRow>,
    pub height: usize,
}

impl DailyReport {
    pub fn row(&self, label: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|row| row.label == label)
    }

    /// Dense grid of display strings, header rows included.
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        let mut grid = vec![vec![String::new(); self.layout.width()]; self.height];
        for (day, &col) in self.days.iter().zip(&self.layout.day_columns) {
            grid[0][col] = day.label.clone();
            grid[1][col] = day.weekday.clone().unwrap_or_default();
        }
        grid[1][LABEL_COLUMN] = REPORT_TITLE.to_string();
        for row in &self.rows {
            grid[row.index][LABEL_COLUMN] = row.label.clone();
            for (value, &col) in row.values.iter().zip(&self.layout.day_columns) {
                grid[row.index][col] = value.clone();
            }
        }
        grid
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> StaffingResult<()> {
        let mut csv_writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);
        for row in self.to_grid() {
            csv_writer.write_record(&row)?;
        }
        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn to_json(&self) -> StaffingResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Row emitter with its own cursor.
#[derive(Debug)]
pub struct ReportWriter {
    days: Vec<DayHeader>,
    layout: ColumnLayout,
    cursor: usize,
    rows: Vec<ReportRow>,
}

impl ReportWriter {
    pub fn new(days: Vec<DayHeader>) -> Self {
        let layout = ColumnLayout::for_days(days.len());
        Self {
            days,
            layout,
            cursor: FIRST_BODY_ROW,
            rows: Vec::new(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn write_row(&mut self, label: impl Into<String>, values: Vec<String>, style: RowStyle) {
        self.rows.push(ReportRow {
            index: self.cursor,
            label: label.into(),
            values,
            style,
        });
        self.cursor += 1;
    }

    /// Bold label with no values.
    pub fn section(&mut self, label: impl Into<String>) {
        self.write_row(label, Vec::new(), RowStyle::BOLD);
    }

    pub fn blank(&mut self) {
        self.cursor += 1;
    }

    pub fn finish(self) -> DailyReport {
        DailyReport {
            days: self.days,
            layout: self.layout,
            rows: self.rows,
            height: self.cursor,
        }
    }
}

/// Ratio as written in a row label: `2` rather than `2.0`, `3.5` as is.
fn ratio_label(ratio: f64) -> String {
    if ratio.fract() == 0.0 {
        format!("1:{ratio:.0}")
    } else {
        format!("1:{ratio}")
    }
}

fn values<T: ToString>(
    outcomes: &[ScenarioOutcome],
    field: impl Fn(&ScenarioResult) -> T,
) -> Vec<String> {
    outcomes
        .iter()
        .map(|outcome| {
            outcome
                .result
                .as_ref()
                .map(|result| field(result).to_string())
                .unwrap_or_default()
        })
        .collect()
}

/// Lay out every outcome as one day column of the standard report.
pub fn build_daily_report(
    days: &[DayHeader],
    outcomes: &[ScenarioOutcome],
    params: &Parameters,
) -> DailyReport {
    let mut writer = ReportWriter::new(days.to_vec());

    writer.write_row("NFP demand", values(outcomes, |r| r.total_rooms), RowStyle::PLAIN);
    writer.write_row(
        "Demand (no Flex CRNAs)",
        values(outcomes, |r| i64::from(r.total_rooms) - i64::from(r.fixed_crna_buffer)),
        RowStyle::PLAIN,
    );
    writer.write_row("Main/NL/ASC Trainee", values(outcomes, |r| r.trainee_rooms), RowStyle::PLAIN);
    writer.write_row(
        "Solo Faculty",
        values(outcomes, |r| r.solo_rooms),
        RowStyle::filled(Fill::Yellow),
    );
    writer.write_row("Main/NL/ASC CRNA", values(outcomes, |r| r.crna_rooms), RowStyle::PLAIN);
    writer.write_row(
        "Rooms left to cover",
        values(outcomes, |r| r.rooms_left_to_cover),
        RowStyle::filled(Fill::Blue),
    );

    writer.blank();
    writer.section("Room ratio");
    writer.write_row("1:1", values(outcomes, |r| r.fixed_faculty_buffer), RowStyle::PLAIN);
    writer.write_row(
        ratio_label(params.trainee_supervision_ratio),
        values(outcomes, |r| r.faculty_for_trainees),
        RowStyle::PLAIN,
    );
    writer.write_row(
        ratio_label(params.crna_supervision_ratio),
        values(outcomes, |r| r.faculty_for_crnas),
        RowStyle::PLAIN,
    );

    writer.blank();
    writer.write_row(
        "Supervisory Faculty needed",
        values(outcomes, |r| r.fixed_faculty_buffer.saturating_add(r.supervisory_faculty)),
        RowStyle::PLAIN,
    );
    writer.write_row("Solo Faculty", values(outcomes, |r| r.solo_rooms), RowStyle::PLAIN);
    // Unlabelled running total of the two rows above.
    writer.write_row("", values(outcomes, |r| r.faculty_needed), RowStyle::BOLD);

    writer.blank();
    writer.write_row("Faculty needed", values(outcomes, |r| r.faculty_needed), RowStyle::BOLD);
    writer.write_row("+ CD (MOR)", values(outcomes, |_| params.cd_mor_faculty), RowStyle::PLAIN);
    writer.write_row(
        "+ NL OR Block",
        values(outcomes, |_| params.nl_or_block_faculty),
        RowStyle::PLAIN,
    );
    writer.write_row("Faculty required", values(outcomes, |r| r.faculty_required), RowStyle::BOLD);

    writer.blank();
    writer.write_row("NL fac", values(outcomes, |_| params.nl_faculty), RowStyle::BOLD);
    writer.write_row("MOR/ASC/Sat", values(outcomes, |r| r.mor_asc_sat_faculty), RowStyle::BOLD);

    writer.blank();
    writer.write_row(
        "% solo",
        values(outcomes, |r| format!("{}%", r.percent_solo)),
        RowStyle::filled(Fill::Green),
    );

    writer.blank();
    writer.write_row("Faculty Scheduled", values(outcomes, |r| r.faculty_available), RowStyle::PLAIN);
    writer.write_row("Expec. Solo Faculty", values(outcomes, |r| r.solo_rooms), RowStyle::PLAIN);
    writer.write_row(
        "Overage of Faculty:",
        values(outcomes, |r| r.faculty_overage),
        RowStyle::filled(Fill::Blue),
    );

    writer.blank();
    writer.write_row(
        "CRNAs Scheduled:",
        values(outcomes, |r| r.crnas_available),
        RowStyle::PLAIN,
    );
    writer.write_row("CRNA Demand:", values(outcomes, |r| r.crna_demand), RowStyle::PLAIN);
    writer.write_row(
        "CRNA shortage:",
        values(outcomes, |r| r.crnas_shortage),
        RowStyle::filled(Fill::Yellow),
    );

    writer.finish()
}
