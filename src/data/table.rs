//! Rectangular cell grid read from CSV or from the first sheet of a workbook.
//!
//! The grid keeps cells untyped beyond what the source already knows
//! (number, text, date). Interpreting rows and columns is left to the
//! long-form and wide-form readers.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::Reader;
use chrono::{Days, NaiveDate};

use crate::error::{StaffingError, StaffingResult};

/// Text values a spreadsheet export uses for "no value".
const MISSING_MARKERS: &[&str] = &["nan", "na", "n/a", "#n/a", "null", "none"];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl Cell {
    /// Classify a raw text field the way a CSV export means it.
    pub fn from_text(raw: &str) -> Self {
        let value = raw.trim();
        if value.is_empty() || MISSING_MARKERS.contains(&value.to_ascii_lowercase().as_str()) {
            return Self::Empty;
        }
        if let Ok(int) = value.parse::<i64>() {
            return Self::Int(int);
        }
        match value.parse::<f64>() {
            Ok(float) if float.is_finite() => Self::Float(float),
            _ => Self::Text(value.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Display form used for names and labels.
    pub fn label(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) if f.fract() == 0.0 => format!("{f:.0}"),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s.clone(),
            Self::Date(d) => d.format("%d-%b").to_string(),
        }
    }

    /// Short weekday name, only for date cells.
    pub fn weekday(&self) -> Option<String> {
        match self {
            Self::Date(d) => Some(d.format("%a").to_string()),
            _ => None,
        }
    }
}

impl From<&calamine::Data> for Cell {
    fn from(data: &calamine::Data) -> Self {
        match data {
            calamine::Data::Empty | calamine::Data::Error(_) => Self::Empty,
            calamine::Data::Int(i) => Self::Int(*i),
            calamine::Data::Float(f) if f.is_nan() => Self::Empty,
            calamine::Data::Float(f) => Self::Float(*f),
            calamine::Data::String(s) => Self::from_text(s),
            calamine::Data::Bool(b) => Self::Text(b.to_string()),
            calamine::Data::DateTime(dt) => excel_serial_to_date(dt.as_f64())
                .map(Self::Date)
                .unwrap_or_else(|| Self::Float(dt.as_f64())),
            calamine::Data::DateTimeIso(s) => s
                .get(..10)
                .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
                .map(Self::Date)
                .unwrap_or_else(|| Self::Text(s.clone())),
            calamine::Data::DurationIso(s) => Self::Text(s.clone()),
        }
    }
}

/// Excel 1900-system serial day number to a calendar date.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    // Serials up to 60 sit before the phantom 1900-02-29.
    let epoch = if serial < 61.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    epoch.checked_add_days(Days::new(serial.floor() as u64))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Spreadsheet,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> StaffingResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Spreadsheet),
            _ => Err(StaffingError::UnsupportedFormat { extension }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Table {
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        Self { rows, width }
    }

    /// Read every record, header included, from CSV text.
    pub fn from_csv_reader<R: Read>(reader: R) -> StaffingResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(Cell::from_text).collect());
        }
        Ok(Self::from_rows(rows))
    }

    /// Read the first worksheet of a workbook.
    pub fn from_workbook(path: &Path) -> StaffingResult<Self> {
        let mut workbook = calamine::open_workbook_auto(path)?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(StaffingError::EmptyInput)?;
        let range = workbook.worksheet_range(&sheet_name)?;
        log::debug!(
            "reading sheet '{}' ({} rows x {} cols)",
            sheet_name,
            range.height(),
            range.width()
        );
        // Ranges start at the first used cell; keep leading blank rows/cols out.
        let rows = range
            .rows()
            .map(|row| row.iter().map(Cell::from).collect())
            .collect();
        Ok(Self::from_rows(rows))
    }

    pub fn load(path: &Path) -> StaffingResult<Self> {
        if !path.exists() {
            return Err(StaffingError::InputNotFound(path.to_path_buf()));
        }
        let table = match TableFormat::from_path(path)? {
            TableFormat::Csv => {
                let file = File::open(path).map_err(|err| StaffingError::io(path, err))?;
                Self::from_csv_reader(file)?
            }
            TableFormat::Spreadsheet => Self::from_workbook(path)?,
        };
        if table.height() == 0 {
            return Err(StaffingError::EmptyInput);
        }
        log::info!(
            "loaded {} ({} rows x {} cols)",
            path.display(),
            table.height(),
            table.width()
        );
        Ok(table)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Out-of-range positions read as [Cell::Empty].
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(EMPTY)
    }
}

/// Header and row-label normalisation: trimmed, lower-case, spaces as underscores.
pub fn normalize_label(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Read a non-negative count. `Ok(None)` means the value is missing.
pub fn cell_to_count(cell: &Cell, field: &str, scenario: &str) -> StaffingResult<Option<u32>> {
    let invalid = |value: String| StaffingError::InvalidInteger {
        field: field.to_string(),
        scenario: scenario.to_string(),
        value,
    };
    match cell {
        Cell::Empty => Ok(None),
        Cell::Int(i) => u32::try_from(*i).map(Some).map_err(|_| invalid(i.to_string())),
        Cell::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX) => {
            Ok(Some(*f as u32))
        }
        other => Err(invalid(other.label())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spreadsheet_cells_convert_to_table_cells() {
        use calamine::{CellErrorType, Data, ExcelDateTime, ExcelDateTimeType};

        let monday = NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date");
        let serial = ExcelDateTime::new(45299.5, ExcelDateTimeType::DateTime, false);
        assert_eq!(Cell::from(&Data::DateTime(serial)), Cell::Date(monday));
        assert_eq!(
            Cell::from(&Data::DateTimeIso("2024-01-08T07:30:00".to_string())),
            Cell::Date(monday)
        );
        assert_eq!(
            Cell::from(&Data::DateTimeIso("next week".to_string())),
            Cell::Text("next week".to_string())
        );

        assert_eq!(Cell::from(&Data::Float(f64::NAN)), Cell::Empty);
        assert_eq!(Cell::from(&Data::Float(12.0)), Cell::Float(12.0));
        assert_eq!(Cell::from(&Data::Int(7)), Cell::Int(7));
        assert_eq!(Cell::from(&Data::Error(CellErrorType::NA)), Cell::Empty);
        assert_eq!(Cell::from(&Data::Empty), Cell::Empty);
        assert_eq!(Cell::from(&Data::String(" 9 ".to_string())), Cell::Int(9));
        assert_eq!(Cell::from(&Data::String("#N/A".to_string())), Cell::Empty);
        assert_eq!(Cell::from(&Data::Bool(true)), Cell::Text("true".to_string()));
    }

    #[test]
    fn text_cells_classify_numbers_and_missing_markers() {
        assert_eq!(Cell::from_text(" 12 "), Cell::Int(12));
        assert_eq!(Cell::from_text("12.0"), Cell::Float(12.0));
        assert_eq!(Cell::from_text(""), Cell::Empty);
        assert_eq!(Cell::from_text("NaN"), Cell::Empty);
        assert_eq!(Cell::from_text("N/A"), Cell::Empty);
        assert_eq!(Cell::from_text("Mon"), Cell::Text("Mon".to_string()));
    }

    #[test]
    fn counts_accept_whole_numbers_only() {
        assert_eq!(cell_to_count(&Cell::Int(4), "trainees", "Mon").ok(), Some(Some(4)));
        assert_eq!(cell_to_count(&Cell::Float(4.0), "trainees", "Mon").ok(), Some(Some(4)));
        assert_eq!(cell_to_count(&Cell::Empty, "trainees", "Mon").ok(), Some(None));
        assert!(cell_to_count(&Cell::Float(4.5), "trainees", "Mon").is_err());
        assert!(cell_to_count(&Cell::Int(-1), "trainees", "Mon").is_err());

        let err = cell_to_count(&Cell::Text("four".to_string()), "trainees", "Mon")
            .expect_err("text is not a count");
        assert_eq!(err.to_string(), "invalid integer in trainees for Mon: 'four'");
    }

    #[test]
    fn csv_rows_are_padded_to_the_widest_record() {
        let table = Table::from_csv_reader("a,b,c\n1\n".as_bytes()).expect("csv should parse");
        assert_eq!(table.width(), 3);
        assert_eq!(table.cell(1, 0), &Cell::Int(1));
        assert_eq!(table.cell(1, 2), &Cell::Empty);
        assert_eq!(table.cell(9, 9), &Cell::Empty);
    }

    #[test]
    fn excel_serials_map_to_calendar_dates() {
        assert_eq!(excel_serial_to_date(1.0), NaiveDate::from_ymd_opt(1900, 1, 1));
        assert_eq!(excel_serial_to_date(45299.0), NaiveDate::from_ymd_opt(2024, 1, 8));
        assert_eq!(excel_serial_to_date(0.0), None);
    }

    #[test]
    fn date_cells_render_day_and_weekday() {
        let cell = Cell::Date(NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date"));
        assert_eq!(cell.label(), "08-Jan");
        assert_eq!(cell.weekday().as_deref(), Some("Mon"));
    }

    #[test]
    fn labels_normalize_case_and_spacing() {
        assert_eq!(normalize_label("  Total Rooms "), "total_rooms");
        assert_eq!(normalize_label("CRNAs"), "crnas");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(matches!(
            TableFormat::from_path(Path::new("week.txt")),
            Err(StaffingError::UnsupportedFormat { .. })
        ));
        assert_eq!(
            TableFormat::from_path(Path::new("week_input.XLSX")).ok(),
            Some(TableFormat::Spreadsheet)
        );
        assert_eq!(
            TableFormat::from_path(Path::new("week.xlsb")).ok(),
            Some(TableFormat::Spreadsheet)
        );
        let message = TableFormat::from_path(Path::new("week.txt"))
            .expect_err("txt is not a table")
            .to_string();
        for extension in ["csv", "xlsx", "xlsm", "xlsb", "xls", "ods"] {
            assert!(message.contains(extension), "{message}");
        }
    }
}
