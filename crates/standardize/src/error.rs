//! Error types for the drought-standardize crate.

use drought_distribution::DistributionError;
use drought_series::SeriesError;

/// Error type for all fallible operations in the drought-standardize crate.
///
/// Invalid scales, empty series and SPEI length mismatches surface through
/// the wrapped [`SeriesError`]; fitting and CDF problems through the wrapped
/// [`DistributionError`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StandardizeError {
    /// Wrapped error from the series crate (aggregation, water balance).
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// Wrapped error from the distribution crate (fitting, CDF).
    #[error(transparent)]
    Distribution(#[from] DistributionError),

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_error_is_transparent() {
        let e: StandardizeError = SeriesError::InvalidScale { scale: 0, len: 5 }.into();
        assert!(matches!(
            e,
            StandardizeError::Series(SeriesError::InvalidScale { .. })
        ));
        assert_eq!(
            e.to_string(),
            SeriesError::InvalidScale { scale: 0, len: 5 }.to_string()
        );
    }

    #[test]
    fn distribution_error_is_transparent() {
        let inner = DistributionError::InsufficientData { n: 1, min: 3 };
        let e: StandardizeError = inner.clone().into();
        assert_eq!(e.to_string(), inner.to_string());
    }

    #[test]
    fn display_invalid_config() {
        let e = StandardizeError::InvalidConfig {
            reason: "support_margin must be > 0".to_string(),
        };
        assert!(e.to_string().contains("support_margin"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<StandardizeError>();
    }
}
