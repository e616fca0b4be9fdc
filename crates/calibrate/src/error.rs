//! Error types for the drought-calibrate crate.

/// Error type for all fallible operations in the drought-calibrate crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalibrationError {
    /// Returned before the search starts when the inputs cannot define a
    /// least-squares problem.
    #[error("invalid calibration input: {reason}")]
    InvalidCalibrationInput {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a search run hits its iteration cap before meeting
    /// its tolerance.
    #[error("calibration did not converge within {iters} iterations (best cost {cost})")]
    DidNotConverge {
        /// Iterations performed across all runs.
        iters: u64,
        /// Best sum of squared residuals reached.
        cost: f64,
    },

    /// Returned when two parameter sets do not have the same coefficient
    /// names.
    #[error("parameter mismatch: expected {expected:?}, got {got:?}")]
    ParameterMismatch {
        /// Coefficient names of the old set.
        expected: Vec<String>,
        /// Coefficient names of the new set.
        got: Vec<String>,
    },

    /// Returned when update weights are not finite, negative, or do not sum
    /// to one.
    #[error("invalid update weights: old={weight_old}, new={weight_new} (must be >= 0 and sum to 1)")]
    InvalidWeights {
        /// Weight on the old parameters.
        weight_old: f64,
        /// Weight on the new parameters.
        weight_new: f64,
    },

    /// Returned when the optimizer itself fails.
    #[error("optimization failed: {reason}")]
    OptimizationFailed {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_input() {
        let e = CalibrationError::InvalidCalibrationInput {
            reason: "observed series is empty".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid calibration input: observed series is empty"
        );
    }

    #[test]
    fn display_did_not_converge() {
        let e = CalibrationError::DidNotConverge {
            iters: 10,
            cost: 2.5,
        };
        assert!(e.to_string().contains("10 iterations"));
        assert!(e.to_string().contains("2.5"));
    }

    #[test]
    fn display_parameter_mismatch() {
        let e = CalibrationError::ParameterMismatch {
            expected: vec!["a".to_string(), "b".to_string()],
            got: vec!["a".to_string()],
        };
        assert!(e.to_string().contains("[\"a\", \"b\"]"));
    }

    #[test]
    fn display_invalid_weights() {
        let e = CalibrationError::InvalidWeights {
            weight_old: 0.5,
            weight_new: 0.6,
        };
        assert!(e.to_string().contains("old=0.5"));
        assert!(e.to_string().contains("new=0.6"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CalibrationError>();
    }
}
