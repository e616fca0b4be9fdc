//! Error types for the drought-distribution crate.

use crate::family::Family;

/// Error type for all fallible operations in the drought-distribution crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistributionError {
    /// Returned when too few strictly positive observations remain after
    /// dropping missing values and zeros.
    #[error("insufficient data: got {n} positive observations, need at least {min}")]
    InsufficientData {
        /// Number of usable observations.
        n: usize,
        /// Minimum number required.
        min: usize,
    },

    /// Returned when a family name is not one of `gamma`, `weibull`,
    /// `lognormal`.
    #[error("unsupported distribution: {name:?} (expected gamma, weibull or lognormal)")]
    UnsupportedDistribution {
        /// The unrecognized name.
        name: String,
    },

    /// Returned when a negative value reaches a positive-support fitter.
    #[error("negative value {value} at index {index} in a positive-support sample")]
    NegativeSupport {
        /// Index of the first negative value.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when distribution parameters are outside their domain.
    #[error("invalid {family} parameters (shape={shape}, loc={loc}, scale={scale}): {reason}")]
    InvalidParameters {
        /// Family the parameters were meant for.
        family: Family,
        /// Shape parameter.
        shape: f64,
        /// Location parameter.
        loc: f64,
        /// Scale parameter.
        scale: f64,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the likelihood cannot be maximized for the sample.
    #[error("{family} fit failed: {reason}")]
    FitFailed {
        /// Family being fitted.
        family: Family,
        /// Description of the failure.
        reason: String,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
