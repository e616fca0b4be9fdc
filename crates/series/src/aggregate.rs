//! Right-aligned rolling aggregation.

use crate::error::SeriesError;
use crate::series::TimeSeries;

/// Sums `scale` consecutive periods, right-aligned.
///
/// The value at index `i` summarizes periods `i - scale + 1 ..= i`. The first
/// `scale - 1` entries have insufficient history and are missing, as is any
/// window containing a missing observation. Output length and timestamps
/// match the input.
///
/// Each window is summed independently in index order, so results are exact
/// and reproducible rather than accumulated through a running total.
///
/// # Errors
///
/// Returns [`SeriesError::EmptySeries`] for an empty input and
/// [`SeriesError::InvalidScale`] if `scale` is zero or exceeds the length.
///
/// # Example
///
/// ```
/// use drought_series::{TimeSeries, aggregate};
///
/// let s = TimeSeries::from_values(&[1.0, 2.0, 3.0, 4.0]);
/// let agg = aggregate(&s, 3).unwrap();
/// assert_eq!(agg.values(), &[None, None, Some(6.0), Some(9.0)]);
/// ```
pub fn aggregate(series: &TimeSeries, scale: usize) -> Result<TimeSeries, SeriesError> {
    let n = series.len();
    if n == 0 {
        return Err(SeriesError::EmptySeries);
    }
    if scale == 0 || scale > n {
        return Err(SeriesError::InvalidScale { scale, len: n });
    }

    let values = series.values();
    let mut out = vec![None; n];
    for (i, slot) in out.iter_mut().enumerate().skip(scale - 1) {
        let window = &values[i + 1 - scale..=i];
        *slot = window
            .iter()
            .try_fold(0.0, |acc, v| v.map(|x| acc + x));
    }

    series.with_values(out)
}
