//! Daily operating-room staffing allocation for an anesthesiology department.
//!
//! Given rooms, trainees, CRNAs and faculty for a day, the [staffing] engine
//! assigns rooms tier by tier (trainees, flexible CRNAs, solo faculty),
//! charges supervisory faculty by ratio, and reports uncovered rooms, CRNA
//! shortage and faculty overage. [data] reads scenarios from CSV or workbook
//! tables, [parallel] runs batches, and [report] writes the results.

pub mod cli;
pub mod data;
pub mod error;
pub mod parallel;
pub mod report;
pub mod staffing;

pub use error::{StaffingError, StaffingResult};
pub use staffing::{compute, Parameters, Scenario, ScenarioInput, ScenarioOutcome, ScenarioResult};
