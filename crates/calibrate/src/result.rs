//! Result type for a calibration run.

use crate::params::CalibrationParams;

/// Calibrated coefficients and the best-fit reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    params: CalibrationParams,
    reconstructed: Vec<f64>,
    cost: f64,
    iterations: u64,
    correlation: Option<f64>,
}

impl Calibration {
    pub(crate) fn new(
        params: CalibrationParams,
        reconstructed: Vec<f64>,
        cost: f64,
        iterations: u64,
        correlation: Option<f64>,
    ) -> Self {
        Self {
            params,
            reconstructed,
            cost,
            iterations,
            correlation,
        }
    }

    /// Returns the calibrated coefficients.
    pub fn params(&self) -> &CalibrationParams {
        &self.params
    }

    /// Returns the model output at the calibrated coefficients.
    pub fn reconstructed(&self) -> &[f64] {
        &self.reconstructed
    }

    /// Consumes self and returns `(params, reconstructed)`.
    pub fn into_parts(self) -> (CalibrationParams, Vec<f64>) {
        (self.params, self.reconstructed)
    }

    /// Sum of squared residuals at the calibrated coefficients.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Root-mean-square residual.
    pub fn rmse(&self) -> f64 {
        (self.cost / self.reconstructed.len() as f64).sqrt()
    }

    /// Nelder-Mead iterations used across all runs.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Pearson correlation between reconstruction and observations, or
    /// `None` if either has zero variance.
    pub fn correlation(&self) -> Option<f64> {
        self.correlation
    }
}
