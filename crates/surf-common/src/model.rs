//! Forecast model variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SurfError;

/// One of the forecast sources shown for every location.
///
/// Each model has its own forecast table and its own plot per location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ForecastModel {
    /// Bias-corrected forecast, shown by default.
    #[default]
    Corrected,
    /// Raw GFSWave output.
    #[serde(rename = "gfs")]
    GfsWave,
    /// Raw ECMWF WAM output.
    Ecmwf,
}

impl ForecastModel {
    /// All models, in toggle order.
    pub const ALL: [ForecastModel; 3] = [
        ForecastModel::Corrected,
        ForecastModel::GfsWave,
        ForecastModel::Ecmwf,
    ];

    /// Directory name used for both plots and tables of this model.
    pub fn dir_name(&self) -> &'static str {
        match self {
            ForecastModel::Corrected => "corrected",
            ForecastModel::GfsWave => "gfs",
            ForecastModel::Ecmwf => "ecmwf",
        }
    }

    /// Exact match on [`dir_name`](Self::dir_name), used for URL segments.
    pub fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|model| model.dir_name() == name)
    }

    /// Label shown on the model toggle.
    pub fn label(&self) -> &'static str {
        match self {
            ForecastModel::Corrected => "Corrected",
            ForecastModel::GfsWave => "GFSWave-v16",
            ForecastModel::Ecmwf => "ECMWF-WAM",
        }
    }
}

impl fmt::Display for ForecastModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for ForecastModel {
    type Err = SurfError;

    /// Accepts the directory name or the toggle label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "corrected" => Ok(ForecastModel::Corrected),
            "gfs" | "gfswave" | "gfswave-v16" => Ok(ForecastModel::GfsWave),
            "ecmwf" | "ecmwf-wam" => Ok(ForecastModel::Ecmwf),
            _ => Err(SurfError::UnknownModel(s.to_string())),
        }
    }
}
