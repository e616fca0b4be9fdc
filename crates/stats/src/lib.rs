//! Statistical helper functions shared by the drought index crates.
//!
//! Every function here is pure: no shared state, no allocation beyond the
//! returned value. Missing observations are the caller's concern; these
//! helpers operate on plain `f64` slices.

/// Normalization scheme for [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// `(x - mean) / sd`, using the population standard deviation.
    #[default]
    ZScore,
    /// `(x - min) / (max - min)`.
    MinMax,
}

/// How uncertainties combine in [`error_propagation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Addition or subtraction: absolute uncertainties add in quadrature.
    Sum,
    /// Multiplication or division: relative uncertainties add in quadrature.
    Product,
}

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Population standard deviation (N denominator). Returns 0.0 if empty.
pub fn population_sd(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    let ss: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    (ss / data.len() as f64).sqrt()
}

/// Rescales `data` with the chosen [`Normalization`].
///
/// Returns `None` for empty input or when the spread (population sd for
/// z-scores, range for min-max) is zero or not finite.
pub fn normalize(data: &[f64], method: Normalization) -> Option<Vec<f64>> {
    if data.is_empty() {
        return None;
    }
    let (center, spread) = match method {
        Normalization::ZScore => (mean(data), population_sd(data)),
        Normalization::MinMax => {
            let min = data.iter().copied().fold(f64::INFINITY, f64::min);
            let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (min, max - min)
        }
    };
    if !spread.is_finite() || spread == 0.0 {
        return None;
    }
    Some(data.iter().map(|&x| (x - center) / spread).collect())
}

/// Propagated uncertainty of a sum or product of measured values.
///
/// For [`Propagation::Sum`] the result is `sqrt(Σ uᵢ²)`. For
/// [`Propagation::Product`] it is `|Π xᵢ| · sqrt(Σ (uᵢ/xᵢ)²)`.
///
/// Returns `None` if the slices differ in length or, for products, any value
/// is zero.
pub fn error_propagation(values: &[f64], uncertainties: &[f64], op: Propagation) -> Option<f64> {
    if values.len() != uncertainties.len() {
        return None;
    }
    match op {
        Propagation::Sum => Some(uncertainties.iter().map(|u| u * u).sum::<f64>().sqrt()),
        Propagation::Product => {
            if values.iter().any(|&v| v == 0.0) {
                return None;
            }
            let rel = values
                .iter()
                .zip(uncertainties)
                .map(|(v, u)| (u / v) * (u / v))
                .sum::<f64>()
                .sqrt();
            let product: f64 = values.iter().product();
            Some(product.abs() * rel)
        }
    }
}

/// Pearson correlation coefficient.
///
/// Filters to indices where both `x[i]` and `y[i]` are finite.
/// Returns `None` if fewer than 3 finite pairs or if the denominator is zero
/// (constant input).
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(xi, yi)| xi.is_finite() && yi.is_finite())
        .map(|(xi, yi)| (*xi, *yi))
        .collect();

    if pairs.len() < 3 {
        return None;
    }

    let n = pairs.len() as f64;
    let mx: f64 = pairs.iter().map(|(xi, _)| xi).sum::<f64>() / n;
    let my: f64 = pairs.iter().map(|(_, yi)| yi).sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for &(xi, yi) in &pairs {
        let dx = xi - mx;
        let dy = yi - my;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denom = (sum_xx * sum_yy).sqrt();
    if denom == 0.0 {
        return None;
    }

    Some(sum_xy / denom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_sd() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sd(&data), 2.138090, epsilon = 1e-6);
    }

    #[test]
    fn test_sd_single() {
        assert_eq!(sd(&[5.0]), 0.0);
    }

    #[test]
    fn test_population_sd() {
        // Classic example: population sd of this set is exactly 2.
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(population_sd(&data), 2.0, epsilon = 1e-12);
        assert_eq!(population_sd(&[]), 0.0);
    }

    #[test]
    fn test_variance_two() {
        // [3.0, 7.0]: mean=5, sum_sq=8, var=8/1=8
        assert_relative_eq!(variance(&[3.0, 7.0]), 8.0, epsilon = 1e-10);
    }

    #[test]
    fn test_variance_empty() {
        assert_eq!(variance(&[]), 0.0);
    }

    #[test]
    fn test_normalize_zscore() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let z = normalize(&data, Normalization::ZScore).unwrap();
        assert_relative_eq!(z[0], -1.5, epsilon = 1e-12);
        assert_relative_eq!(z[7], 2.0, epsilon = 1e-12);
        assert_relative_eq!(mean(&z), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_minmax() {
        let z = normalize(&[10.0, 15.0, 20.0], Normalization::MinMax).unwrap();
        assert_eq!(z, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_normalize_constant_is_none() {
        assert!(normalize(&[3.0, 3.0, 3.0], Normalization::ZScore).is_none());
        assert!(normalize(&[3.0, 3.0, 3.0], Normalization::MinMax).is_none());
        assert!(normalize(&[], Normalization::ZScore).is_none());
    }

    #[test]
    fn test_error_propagation_sum() {
        let u = error_propagation(&[10.0, 20.0], &[3.0, 4.0], Propagation::Sum).unwrap();
        assert_relative_eq!(u, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_error_propagation_product() {
        // 10 ± 1 (10%) times 20 ± 2 (10%): 200 * sqrt(0.02)
        let u = error_propagation(&[10.0, 20.0], &[1.0, 2.0], Propagation::Product).unwrap();
        assert_relative_eq!(u, 200.0 * 0.02_f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn test_error_propagation_invalid() {
        assert!(error_propagation(&[1.0], &[1.0, 2.0], Propagation::Sum).is_none());
        assert!(error_propagation(&[0.0, 1.0], &[1.0, 1.0], Propagation::Product).is_none());
    }

    #[test]
    fn test_pearson_correlation_perfect() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        let r = pearson_correlation(&x, &y);
        assert_relative_eq!(r.unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pearson_correlation_insufficient() {
        assert!(pearson_correlation(&[1.0, 2.0], &[3.0, 4.0]).is_none());
    }

    #[test]
    fn test_pearson_correlation_with_nan() {
        let x = [1.0, f64::NAN, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, f64::NAN, 8.0, 10.0];
        // Finite pairs: (1,2), (4,8), (5,10) — 3 pairs, perfect linear
        let r = pearson_correlation(&x, &y);
        assert_relative_eq!(r.unwrap(), 1.0, epsilon = 1e-6);
    }
}
