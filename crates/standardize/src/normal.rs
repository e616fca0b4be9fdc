//! Probability to standard-normal score.

use std::f64::consts::SQRT_2;

use statrs::function::erf::erfc_inv;

/// Lower clamp for probabilities before inversion; the upper clamp is
/// `1 - PROB_FLOOR`.
const PROB_FLOOR: f64 = f64::EPSILON;

/// Maps a cumulative probability to a standard-normal z-score.
///
/// `p` is clamped into `[ε, 1 - ε]` first, so probabilities of exactly 0 or 1
/// give large finite scores instead of infinities. `NaN` stays `NaN`.
///
/// ```
/// use drought_standardize::z_score;
///
/// assert!(z_score(0.5).abs() < 1e-12);
/// assert!(z_score(0.0).is_finite());
/// ```
pub fn z_score(p: f64) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    // Φ⁻¹(p) = -√2 · erfc⁻¹(2p)
    -SQRT_2 * erfc_inv(2.0 * p.clamp(PROB_FLOOR, 1.0 - PROB_FLOOR))
}
