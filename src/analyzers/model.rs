//! Ordinary least-squares fit of one metric against time.

use crate::error::PipelineError;

/// A fitted line `y = intercept + slope * x` with its quality statistics.
///
/// `r_squared` is the fraction of variance in y explained by the line.
/// When the response has no variance at all, it is reported as 0.0 rather
/// than NaN. `slope_std_err` is absent when there are no residual degrees
/// of freedom (exactly two points).
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub slope_std_err: Option<f64>,
    pub n_obs: usize,
}

impl LinearFit {
    /// Fits the line minimizing the sum of squared residuals over
    /// `(x, y)` points.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InsufficientData`] when fewer than 2 distinct x
    /// values are present; a vertical line has no least-squares solution.
    pub fn fit(points: &[(f64, f64)]) -> Result<Self, PipelineError> {
        let n = points.len();
        let distinct = distinct_x(points);
        if distinct < 2 {
            return Err(PipelineError::InsufficientData { distinct });
        }

        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        let mut tss = 0.0;
        for (x, y) in points {
            let dx = x - mean_x;
            let dy = y - mean_y;
            sxx += dx * dx;
            sxy += dx * dy;
            tss += dy * dy;
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;

        // RSS = TSS - slope * Sxy at the optimum; clamp fp noise.
        let rss = (tss - slope * sxy).max(0.0);
        let r_squared = if tss > 0.0 { 1.0 - rss / tss } else { 0.0 };

        let dof = n as f64 - 2.0;
        let slope_std_err = if dof > 0.0 {
            Some(((rss / dof) / sxx).sqrt())
        } else {
            None
        };

        Ok(LinearFit {
            slope,
            intercept,
            r_squared,
            slope_std_err,
            n_obs: n,
        })
    }

    /// Predicted value of the metric at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

fn distinct_x(points: &[(f64, f64)]) -> usize {
    let mut xs: Vec<f64> = points.iter().map(|(x, _)| *x).collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    xs.len()
}
