//! Self-calibrated PDSI approximation.
//!
//! A linear water-balance model `a·precip + b·temp + c·soil_moisture` is
//! calibrated against a target PDSI series.

use crate::config::CalibrationConfig;
use crate::error::CalibrationError;
use crate::optimizer::{ModelInput, calibrate};
use crate::params::CalibrationParams;
use crate::result::Calibration;

/// Coefficient names of the water-balance model, in input order.
pub const PDSI_COEFFICIENTS: [&str; 3] = ["a", "b", "c"];

/// Aligned climate drivers of the water-balance model.
#[derive(Debug, Clone, Copy)]
pub struct PdsiInputs<'a> {
    /// Precipitation.
    pub precip: &'a [f64],
    /// Temperature.
    pub temp: &'a [f64],
    /// Soil moisture.
    pub soil_moisture: &'a [f64],
}

impl ModelInput for PdsiInputs<'_> {
    fn n_steps(&self) -> usize {
        self.precip.len()
    }
}

/// `a·precip + b·temp + c·soil_moisture`, element-wise. Missing
/// coefficients count as zero.
pub fn water_balance_model(inputs: &PdsiInputs<'_>, params: &CalibrationParams) -> Vec<f64> {
    let [a, b, c] = PDSI_COEFFICIENTS.map(|name| params.get(name).unwrap_or(0.0));
    inputs
        .precip
        .iter()
        .zip(inputs.temp)
        .zip(inputs.soil_moisture)
        .map(|((p, t), s)| a * p + b * t + c * s)
        .collect()
}

/// Calibrates the linear water-balance model against `target`.
///
/// Coefficients `a`, `b` and `c` start from `initial`, defaulting to 1.0
/// where absent; other names in `initial` are ignored.
///
/// # Errors
///
/// [`CalibrationError::InvalidCalibrationInput`] if the four series do not
/// share a length, plus any error of [`calibrate`].
#[tracing::instrument(skip_all, fields(n = target.len()))]
pub fn self_calibrated_pdsi(
    inputs: &PdsiInputs<'_>,
    target: &[f64],
    initial: &CalibrationParams,
    config: &CalibrationConfig,
) -> Result<Calibration, CalibrationError> {
    let n = inputs.precip.len();
    for (name, len) in [
        ("temp", inputs.temp.len()),
        ("soil_moisture", inputs.soil_moisture.len()),
    ] {
        if len != n {
            return Err(CalibrationError::InvalidCalibrationInput {
                reason: format!("{name} has {len} steps, precip has {n}"),
            });
        }
    }

    let start: CalibrationParams = PDSI_COEFFICIENTS
        .iter()
        .map(|&name| (name, initial.get(name).unwrap_or(1.0)))
        .collect();

    calibrate(water_balance_model, target, inputs, &start, config)
}
