//! Gap filling for missing observations.

use crate::series::TimeSeries;

/// Strategy used by [`fill_missing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMethod {
    /// Linear interpolation by index between the nearest present neighbours.
    /// Leading and trailing gaps have only one neighbour and stay missing.
    #[default]
    Interpolate,
    /// Carry the last present value forward.
    Forward,
    /// Carry the next present value backward.
    Backward,
}

/// Returns a copy of `series` with gaps filled by `method`.
///
/// Present values are never modified. Gaps that the method cannot reach
/// (e.g. leading gaps under [`FillMethod::Forward`]) remain missing.
pub fn fill_missing(series: &TimeSeries, method: FillMethod) -> TimeSeries {
    let values = series.values();
    let filled = match method {
        FillMethod::Forward => carry(values.iter()),
        FillMethod::Backward => {
            let mut out = carry(values.iter().rev());
            out.reverse();
            out
        }
        FillMethod::Interpolate => interpolate(values),
    };
    series.with_values(filled).unwrap_or_else(|_| series.clone())
}

fn carry<'a>(values: impl Iterator<Item = &'a Option<f64>>) -> Vec<Option<f64>> {
    let mut last = None;
    values
        .map(|v| {
            if v.is_some() {
                last = *v;
            }
            last
        })
        .collect()
}

fn interpolate(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = values.to_vec();
    let mut prev: Option<(usize, f64)> = None;
    for (i, v) in values.iter().enumerate() {
        let Some(x) = *v else { continue };
        if let Some((j, y)) = prev {
            let span = (i - j) as f64;
            for (k, slot) in out.iter_mut().enumerate().take(i).skip(j + 1) {
                let t = (k - j) as f64 / span;
                *slot = Some(y + t * (x - y));
            }
        }
        prev = Some((i, x));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series() -> TimeSeries {
        TimeSeries::new(vec![None, Some(1.0), None, None, Some(4.0), None])
    }

    #[test]
    fn interpolate_inner_gap() {
        let f = fill_missing(&series(), FillMethod::Interpolate);
        let v = f.values();
        assert_eq!(v[0], None);
        assert_relative_eq!(v[2].unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(v[3].unwrap(), 3.0, epsilon = 1e-12);
        assert_eq!(v[5], None);
    }

    #[test]
    fn forward_fill() {
        let f = fill_missing(&series(), FillMethod::Forward);
        assert_eq!(
            f.values(),
            &[None, Some(1.0), Some(1.0), Some(1.0), Some(4.0), Some(4.0)]
        );
    }

    #[test]
    fn backward_fill() {
        let f = fill_missing(&series(), FillMethod::Backward);
        assert_eq!(
            f.values(),
            &[Some(1.0), Some(1.0), Some(4.0), Some(4.0), Some(4.0), None]
        );
    }

    #[test]
    fn no_gaps_unchanged() {
        let s = TimeSeries::from_values(&[1.0, 2.0, 3.0]);
        for m in [FillMethod::Interpolate, FillMethod::Forward, FillMethod::Backward] {
            assert_eq!(fill_missing(&s, m), s);
        }
    }
}
