//! Configuration for the calibration search.

use crate::error::CalibrationError;

/// Configuration for [`calibrate`](crate::calibrate).
///
/// # Example
///
/// ```
/// use drought_calibrate::CalibrationConfig;
///
/// let config = CalibrationConfig::new().with_max_iters(2_000).with_restarts(2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct CalibrationConfig {
    max_iters: u64,
    sd_tolerance: f64,
    restarts: usize,
}

impl CalibrationConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `max_iters = 5000` per run, `sd_tolerance = 1e-12`,
    /// `restarts = 1`.
    pub fn new() -> Self {
        Self {
            max_iters: 5000,
            sd_tolerance: 1e-12,
            restarts: 1,
        }
    }

    // --- Builder methods ---

    /// Sets the iteration cap of each Nelder-Mead run.
    pub fn with_max_iters(mut self, n: u64) -> Self {
        self.max_iters = n;
        self
    }

    /// Sets the tolerance on the standard deviation of the simplex costs.
    pub fn with_sd_tolerance(mut self, tol: f64) -> Self {
        self.sd_tolerance = tol;
        self
    }

    /// Sets how many times the search restarts from the best vertex.
    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    // --- Accessors ---

    /// Returns the per-run iteration cap.
    pub fn max_iters(&self) -> u64 {
        self.max_iters
    }

    /// Returns the cost standard-deviation tolerance.
    pub fn sd_tolerance(&self) -> f64 {
        self.sd_tolerance
    }

    /// Returns the number of restarts.
    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if self.max_iters == 0 {
            return Err(CalibrationError::InvalidConfig {
                reason: "max_iters must be >= 1".to_string(),
            });
        }
        if !self.sd_tolerance.is_finite() || self.sd_tolerance <= 0.0 {
            return Err(CalibrationError::InvalidConfig {
                reason: format!(
                    "sd_tolerance must be finite and > 0, got {}",
                    self.sd_tolerance
                ),
            });
        }
        Ok(())
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = CalibrationConfig::new();
        assert_eq!(c.max_iters(), 5000);
        assert_eq!(c.sd_tolerance(), 1e-12);
        assert_eq!(c.restarts(), 1);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn invalid_values() {
        assert!(CalibrationConfig::new().with_max_iters(0).validate().is_err());
        assert!(
            CalibrationConfig::new()
                .with_sd_tolerance(-1.0)
                .validate()
                .is_err()
        );
        assert!(
            CalibrationConfig::new()
                .with_sd_tolerance(f64::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn zero_restarts_allowed() {
        assert!(CalibrationConfig::new().with_restarts(0).validate().is_ok());
    }
}
