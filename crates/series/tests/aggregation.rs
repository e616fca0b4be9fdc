use approx::assert_relative_eq;
use drought_series::{FillMethod, NaiveDate, TimeSeries, aggregate, fill_missing, water_balance};

fn ramp(n: usize) -> Vec<f64> {
    (0..n).map(|i| ((i * 37) % 11) as f64 + 0.5).collect()
}

// ---------------------------------------------------------------------------
// 1. trailing_window_sums
// ---------------------------------------------------------------------------
#[test]
fn trailing_window_sums() {
    let raw = ramp(50);
    let series = TimeSeries::from_values(&raw);
    for scale in [1, 2, 3, 6, 12, 24, 50] {
        let agg = aggregate(&series, scale).unwrap();
        assert_eq!(agg.len(), raw.len());
        for (i, v) in agg.values().iter().enumerate() {
            if i + 1 < scale {
                assert!(v.is_none(), "scale {scale}: index {i} should be missing");
            } else {
                let expected: f64 = raw[i + 1 - scale..=i].iter().sum();
                assert_relative_eq!(v.unwrap(), expected, epsilon = 1e-9);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 2. dates_survive_the_pipeline
// ---------------------------------------------------------------------------
#[test]
fn dates_survive_the_pipeline() {
    let dates: Vec<NaiveDate> = (1..=6)
        .map(|m| NaiveDate::from_ymd_opt(2001, m, 1).unwrap())
        .collect();
    let precip = TimeSeries::with_timestamps(
        dates.clone(),
        vec![Some(40.0), None, Some(20.0), Some(35.0), Some(10.0), Some(55.0)],
    )
    .unwrap();
    let pet = TimeSeries::with_timestamps(dates.clone(), vec![Some(30.0); 6]).unwrap();

    let filled = fill_missing(&precip, FillMethod::Interpolate);
    let balance = water_balance(&filled, &pet).unwrap();
    let agg = aggregate(&balance, 2).unwrap();

    assert_eq!(agg.timestamps(), Some(dates.as_slice()));
    assert_eq!(
        agg.values(),
        &[None, Some(10.0), Some(-10.0), Some(-5.0), Some(-15.0), Some(5.0)]
    );
}

// ---------------------------------------------------------------------------
// 3. missing_window_without_filling
// ---------------------------------------------------------------------------
#[test]
fn missing_window_without_filling() {
    let s = TimeSeries::from_values(&[1.0, f64::NAN, 3.0, 4.0, 5.0]);
    let agg = aggregate(&s, 2).unwrap();
    assert_eq!(agg.values(), &[None, None, None, Some(7.0), Some(9.0)]);
}
