//! Data types produced by the trend analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analyzers::grade::grade;
use crate::analyzers::model::LinearFit;
use crate::analyzers::nest::GroupKey;
use crate::error::PipelineError;

/// One row per group: the group key plus the scalar quality metrics of its
/// fitted model. Groups whose model could not be fit keep their row, with
/// null metrics and the failure recorded in `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSummary {
    pub country: String,
    pub continent: Option<String>,
    pub n_obs: usize,
    pub r_squared: Option<f64>,
    pub slope: Option<f64>,
    pub intercept: Option<f64>,
    pub slope_std_err: Option<f64>,
    pub grade: Option<String>,
    pub error: Option<String>,
}

impl TrendSummary {
    pub fn from_fit(key: &GroupKey, fit: &LinearFit) -> Self {
        TrendSummary {
            country: key.country.clone(),
            continent: key.continent.clone(),
            n_obs: fit.n_obs,
            r_squared: Some(fit.r_squared),
            slope: Some(fit.slope),
            intercept: Some(fit.intercept),
            slope_std_err: fit.slope_std_err,
            grade: Some(grade(fit.r_squared).to_string()),
            error: None,
        }
    }

    /// A null summary row for a group that could not be modeled.
    pub fn from_error(key: &GroupKey, n_obs: usize, error: &PipelineError) -> Self {
        TrendSummary {
            country: key.country.clone(),
            continent: key.continent.clone(),
            n_obs,
            r_squared: None,
            slope: None,
            intercept: None,
            slope_std_err: None,
            grade: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_fit(&self) -> bool {
        self.r_squared.is_some()
    }
}

/// Entry for one flagged group in the report.
#[derive(Debug, Clone, Serialize)]
pub struct FlaggedEntry {
    pub country: String,
    pub continent: Option<String>,
    pub r_squared: f64,
    pub grade: String,
}

/// Report of the groups whose trend quality fell below the threshold.
#[derive(Debug, Serialize)]
pub struct FlaggedReport {
    pub generated_at: DateTime<Utc>,
    pub metric: String,
    pub threshold: f64,
    pub flagged: Vec<FlaggedEntry>,
}
