//! Parameter set: supervision ratios, fixed staff buffers and rounding policy.
//!
//! Every tunable of the allocation lives here so that each historical variant
//! of the model can be reproduced by configuration alone (see [ModelRevision]).

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{StaffingError, StaffingResult};

/// Environment variable naming a default parameter file for the CLI.
pub const PARAMS_ENV_VAR: &str = "ORSTAFF_PARAMS";

/// How fractional supervisory load is turned into whole faculty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Round each tier's load up on its own: a partial supervisor is a whole one.
    #[default]
    CeilPerTier,
    /// Sum the raw trainee and CRNA loads, then round half up once.
    HalfUpCombined,
}

/// `floor(x + 0.5)`: halves go up, everything below goes down.
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Named presets matching the model variants that have been used in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelRevision {
    /// 1:2 / 1:4 ratios, 6 fixed CRNAs, main-OR buffer plus board runner.
    #[default]
    Scenario,
    /// 1:2 / 1:3.5 ratios, 6 fixed CRNAs, 4 fixed faculty.
    Ratio35,
    /// 1:2 / 1:3.5 ratios, 6 fixed CRNAs, 3 cardiac faculty, half-up on the combined total.
    DailyReport,
}

impl ModelRevision {
    pub const ALL: [ModelRevision; 3] = [Self::Scenario, Self::Ratio35, Self::DailyReport];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scenario => "scenario",
            Self::Ratio35 => "ratio35",
            Self::DailyReport => "daily-report",
        }
    }

    pub fn parameters(self) -> Parameters {
        match self {
            Self::Scenario => Parameters::default(),
            Self::Ratio35 => Parameters {
                crna_supervision_ratio: 3.5,
                fixed_faculty_buffer: 4,
                ..Parameters::default()
            },
            Self::DailyReport => Parameters {
                crna_supervision_ratio: 3.5,
                fixed_faculty_buffer: 3,
                rounding: RoundingPolicy::HalfUpCombined,
                ..Parameters::default()
            },
        }
    }
}

impl fmt::Display for ModelRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelRevision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|rev| rev.as_str() == normalized)
            .ok_or_else(|| {
                format!("unknown model revision '{s}' (expected scenario, ratio35 or daily-report)")
            })
    }
}

/// Immutable per-run configuration shared by every scenario computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    /// Trainee rooms one supervising faculty can oversee.
    pub trainee_supervision_ratio: f64,
    /// CRNA rooms one supervising faculty can oversee.
    pub crna_supervision_ratio: f64,
    /// CRNAs permanently held for fixed locations.
    pub fixed_crna_buffer: u32,
    /// Faculty permanently held for fixed roles (cardiac, board runner, main OR, NL OR).
    pub fixed_faculty_buffer: u32,
    pub rounding: RoundingPolicy,
    /// Clinical director for the main OR, added on top of the faculty needed.
    pub cd_mor_faculty: u32,
    /// NL OR block, added on top of the faculty needed.
    pub nl_or_block_faculty: u32,
    /// Faculty working non-main locations; subtracted to get MOR/ASC/Sat faculty.
    pub nl_faculty: u32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            trainee_supervision_ratio: 2.0,
            crna_supervision_ratio: 4.0,
            fixed_crna_buffer: 6,
            fixed_faculty_buffer: 2,
            rounding: RoundingPolicy::CeilPerTier,
            cd_mor_faculty: 1,
            nl_or_block_faculty: 1,
            nl_faculty: 5,
        }
    }
}

impl Parameters {
    /// Ratios must be strictly positive and finite; they are used as divisors.
    pub fn validate(&self) -> StaffingResult<()> {
        check_ratio("trainee_supervision_ratio", self.trainee_supervision_ratio)?;
        check_ratio("crna_supervision_ratio", self.crna_supervision_ratio)?;
        Ok(())
    }

    /// Parse and validate a YAML parameter document. Omitted fields keep their defaults.
    pub fn from_yaml_str(raw: &str) -> StaffingResult<Self> {
        let params: Parameters = serde_yaml::from_str(raw)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_yaml_string(&self) -> StaffingResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn check_ratio(name: &'static str, value: f64) -> StaffingResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(StaffingError::InvalidParameter {
            name,
            reason: format!("must be a positive, finite number (got {value})"),
        })
    }
}

/// Load a YAML parameter file.
pub fn load_parameters(path: impl AsRef<Path>) -> StaffingResult<Parameters> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|err| StaffingError::io(path, err))?;
    let params = Parameters::from_yaml_str(&raw)?;
    log::info!("loaded parameters from {}", path.display());
    Ok(params)
}

/// Resolve the run's parameter set: an explicit file wins, then [PARAMS_ENV_VAR],
/// then the named revision (or the default revision).
pub fn resolve_parameters(
    file: Option<&Path>,
    revision: Option<ModelRevision>,
) -> StaffingResult<Parameters> {
    if let Some(path) = file {
        return load_parameters(path);
    }
    if let Ok(path) = std::env::var(PARAMS_ENV_VAR) {
        if !path.trim().is_empty() {
            return load_parameters(path.trim());
        }
    }
    Ok(revision.unwrap_or_default().parameters())
}
