//! Configuration for distribution fitting.

use crate::error::DistributionError;

/// How the location parameter is treated during fitting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Location {
    /// Estimated jointly with shape and scale by maximum likelihood.
    #[default]
    Free,
    /// Held at the given value (e.g. `0.0` for the classic two-parameter
    /// SPI gamma fit). Must lie below the smallest positive observation.
    Fixed(f64),
}

/// Configuration for [`fit`](crate::fit).
///
/// # Example
///
/// ```
/// use drought_distribution::{FitConfig, Location};
///
/// let config = FitConfig::new()
///     .with_location(Location::Fixed(0.0))
///     .with_min_samples(10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct FitConfig {
    location: Location,
    min_samples: usize,
    max_iters: u64,
    sd_tolerance: f64,
}

impl FitConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `location = Free`, `min_samples = 3`, `max_iters = 500`,
    /// `sd_tolerance = 1e-10`.
    pub fn new() -> Self {
        Self {
            location: Location::Free,
            min_samples: 3,
            max_iters: 500,
            sd_tolerance: 1e-10,
        }
    }

    // --- Builder methods ---

    /// Sets how the location parameter is estimated.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Sets the minimum number of positive observations required.
    pub fn with_min_samples(mut self, n: usize) -> Self {
        self.min_samples = n;
        self
    }

    /// Sets the iteration cap of the location search.
    pub fn with_max_iters(mut self, n: u64) -> Self {
        self.max_iters = n;
        self
    }

    /// Sets the Nelder-Mead cost standard-deviation tolerance of the
    /// location search.
    pub fn with_sd_tolerance(mut self, tol: f64) -> Self {
        self.sd_tolerance = tol;
        self
    }

    // --- Accessors ---

    /// Returns the location mode.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Returns the minimum number of positive observations.
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Returns the iteration cap of the location search.
    pub fn max_iters(&self) -> u64 {
        self.max_iters
    }

    /// Returns the location search tolerance.
    pub fn sd_tolerance(&self) -> f64 {
        self.sd_tolerance
    }

    /// Validates this configuration.
    ///
    /// `min_samples` must be at least 2, `max_iters` at least 1,
    /// `sd_tolerance` finite and positive, and a fixed location finite.
    pub fn validate(&self) -> Result<(), DistributionError> {
        if self.min_samples < 2 {
            return Err(DistributionError::InvalidConfig {
                reason: format!("min_samples must be >= 2, got {}", self.min_samples),
            });
        }
        if self.max_iters == 0 {
            return Err(DistributionError::InvalidConfig {
                reason: "max_iters must be >= 1".to_string(),
            });
        }
        if !self.sd_tolerance.is_finite() || self.sd_tolerance <= 0.0 {
            return Err(DistributionError::InvalidConfig {
                reason: format!(
                    "sd_tolerance must be finite and > 0, got {}",
                    self.sd_tolerance
                ),
            });
        }
        if let Location::Fixed(loc) = self.location {
            if !loc.is_finite() {
                return Err(DistributionError::InvalidConfig {
                    reason: format!("fixed location must be finite, got {loc}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        Self::new()
    }
}
