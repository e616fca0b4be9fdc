//! The `TimeSeries` container.

use chrono::NaiveDate;

use crate::error::SeriesError;

/// An ordered sequence of optional observations with optional dates.
///
/// A missing observation is `None`; it is never coerced to zero. When
/// timestamps are present there is exactly one per value. Order is
/// significant and every operation in the workspace preserves it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    timestamps: Option<Vec<NaiveDate>>,
    values: Vec<Option<f64>>,
}

impl TimeSeries {
    /// Creates an undated series.
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self {
            timestamps: None,
            values,
        }
    }

    /// Creates a dated series.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] if the two vectors differ in
    /// length.
    pub fn with_timestamps(
        timestamps: Vec<NaiveDate>,
        values: Vec<Option<f64>>,
    ) -> Result<Self, SeriesError> {
        if timestamps.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                expected: values.len(),
                got: timestamps.len(),
                field: "timestamps".to_string(),
            });
        }
        Ok(Self {
            timestamps: Some(timestamps),
            values,
        })
    }

    /// Builds an undated series from raw values, treating any non-finite
    /// value (`NaN`, `±inf`) as missing.
    pub fn from_values(values: &[f64]) -> Self {
        Self::new(
            values
                .iter()
                .map(|&v| if v.is_finite() { Some(v) } else { None })
                .collect(),
        )
    }

    /// Number of entries, missing ones included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the values, `None` marking missing entries.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Returns the timestamps, if the series is dated.
    pub fn timestamps(&self) -> Option<&[NaiveDate]> {
        self.timestamps.as_deref()
    }

    /// Returns the value at `index`, or `None` if missing or out of range.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Iterates `(timestamp, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (Option<NaiveDate>, Option<f64>)> + '_ {
        self.values.iter().enumerate().map(move |(i, v)| {
            let ts = self.timestamps.as_ref().map(|t| t[i]);
            (ts, *v)
        })
    }

    /// Collects the non-missing values in order.
    pub fn observed(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    /// Number of missing entries.
    pub fn n_missing(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Flattens to raw `f64`, writing `NaN` for missing entries.
    pub fn to_nan_vec(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
    }

    /// Returns a series with the same timestamps and new values.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] if `values` does not match this
    /// series' length.
    pub fn with_values(&self, values: Vec<Option<f64>>) -> Result<Self, SeriesError> {
        if values.len() != self.values.len() {
            return Err(SeriesError::LengthMismatch {
                expected: self.values.len(),
                got: values.len(),
                field: "values".to_string(),
            });
        }
        Ok(Self {
            timestamps: self.timestamps.clone(),
            values,
        })
    }

    /// Applies `f` to every present value; missing entries stay missing.
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(f64) -> f64,
    {
        Self {
            timestamps: self.timestamps.clone(),
            values: self.values.iter().map(|v| v.map(&mut f)).collect(),
        }
    }
}

impl From<Vec<f64>> for TimeSeries {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(&values)
    }
}

impl From<Vec<Option<f64>>> for TimeSeries {
    fn from(values: Vec<Option<f64>>) -> Self {
        Self::new(values)
    }
}
