//! Error types for the drought-series crate.

/// Error type for all fallible operations in the drought-series crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when a series has no observations.
    #[error("series is empty")]
    EmptySeries,

    /// Returned when the aggregation scale is zero or longer than the series.
    #[error("invalid aggregation scale {scale} for a series of length {len} (must be 1..={len})")]
    InvalidScale {
        /// The requested scale.
        scale: usize,
        /// Length of the series.
        len: usize,
    },

    /// Returned when two inputs that must align have different lengths.
    #[error("length mismatch for {field}: expected {expected}, got {got}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
        /// Name of the offending input.
        field: String,
    },

    /// Returned when two aligned series carry different dates.
    #[error("timestamp mismatch at index {index}")]
    TimestampMismatch {
        /// First index at which the timestamps differ.
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_series() {
        assert_eq!(SeriesError::EmptySeries.to_string(), "series is empty");
    }

    #[test]
    fn error_invalid_scale() {
        let e = SeriesError::InvalidScale { scale: 0, len: 12 };
        assert_eq!(
            e.to_string(),
            "invalid aggregation scale 0 for a series of length 12 (must be 1..=12)"
        );
    }

    #[test]
    fn error_length_mismatch() {
        let e = SeriesError::LengthMismatch {
            expected: 10,
            got: 9,
            field: "pet".to_string(),
        };
        assert_eq!(e.to_string(), "length mismatch for pet: expected 10, got 9");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<SeriesError>();
    }
}
