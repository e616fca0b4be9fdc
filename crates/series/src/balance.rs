//! Climatic water balance.

use crate::error::SeriesError;
use crate::series::TimeSeries;

/// Computes `D = precipitation - potential evapotranspiration` per period.
///
/// A period is missing in the output if it is missing in either input. The
/// result keeps the precipitation series' timestamps; if both inputs are
/// dated their dates must agree.
///
/// The balance can be negative, so the result is not valid input for a
/// positive-support distribution without a shift.
///
/// # Errors
///
/// Returns [`SeriesError::EmptySeries`], [`SeriesError::LengthMismatch`] or
/// [`SeriesError::TimestampMismatch`].
pub fn water_balance(precip: &TimeSeries, pet: &TimeSeries) -> Result<TimeSeries, SeriesError> {
    if precip.is_empty() {
        return Err(SeriesError::EmptySeries);
    }
    if precip.len() != pet.len() {
        return Err(SeriesError::LengthMismatch {
            expected: precip.len(),
            got: pet.len(),
            field: "pet".to_string(),
        });
    }
    if let (Some(a), Some(b)) = (precip.timestamps(), pet.timestamps()) {
        if let Some(index) = a.iter().zip(b).position(|(x, y)| x != y) {
            return Err(SeriesError::TimestampMismatch { index });
        }
    }

    let values = precip
        .values()
        .iter()
        .zip(pet.values())
        .map(|(p, e)| match (p, e) {
            (Some(p), Some(e)) => Some(p - e),
            _ => None,
        })
        .collect();

    precip.with_values(values)
}
