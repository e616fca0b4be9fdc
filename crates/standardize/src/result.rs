//! Result type for the standardization pipeline.

use drought_distribution::{DistParams, Family};
use drought_series::TimeSeries;

/// A standardized index series together with the distribution behind it.
///
/// The parameters describe the aggregated series directly (for SPEI any
/// support shift is already folded into the location), so they can be stored
/// and passed back as a baseline climatology on a later run.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardizedIndex {
    series: TimeSeries,
    params: DistParams,
    family: Family,
    scale: usize,
    fitted: bool,
}

impl StandardizedIndex {
    /// Creates a new result.
    pub(crate) fn new(
        series: TimeSeries,
        params: DistParams,
        family: Family,
        scale: usize,
        fitted: bool,
    ) -> Self {
        Self {
            series,
            params,
            family,
            scale,
            fitted,
        }
    }

    /// Returns the z-score series, aligned with the input.
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Returns the z-scores; the first `scale - 1` entries are missing.
    pub fn values(&self) -> &[Option<f64>] {
        self.series.values()
    }

    /// Consumes self and returns the owned z-score series.
    pub fn into_series(self) -> TimeSeries {
        self.series
    }

    /// Returns the distribution parameters used.
    pub fn params(&self) -> &DistParams {
        &self.params
    }

    /// Returns the distribution family used.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Returns the aggregation scale.
    pub fn scale(&self) -> usize {
        self.scale
    }

    /// Whether the parameters were fitted in this run (`false` when a
    /// baseline was supplied).
    pub fn was_fitted(&self) -> bool {
        self.fitted
    }
}
