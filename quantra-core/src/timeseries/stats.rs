//! Rolling statistics, winsorization, and synthetic series generation.
//!
//! Rolling functions expand over the leading edge: the first output entry
//! looks back over one observation, the second over two, up to the window
//! size. Missing-markers are skipped inside each window; a window with no
//! usable observations yields a marker. The resolved window's ramp is
//! applied to the output, trimming the warm-up entries.
//!
//! This module is meant to be used qualified (`stats::min`, `stats::sum`)
//! since several names collide with the prelude.

use chrono::Utc;
use rand::Rng;

use quantra_types::QuantraError;

use super::series::{TimeSeries, is_missing};
use super::window::{WindowSpec, apply_ramp, normalize_window};

fn rolling(
    x: &TimeSeries,
    spec: impl Into<WindowSpec>,
    stat: impl Fn(&[f64]) -> f64,
) -> Result<TimeSeries, QuantraError> {
    if !x.is_strictly_increasing() {
        return Err(QuantraError::unordered(
            "rolling statistics require a strictly increasing date index",
        ));
    }
    let window = normalize_window(x, spec, None)?;
    let points: Vec<(chrono::NaiveDate, f64)> = x.iter().collect();

    let rolled: TimeSeries = points
        .iter()
        .enumerate()
        .map(|(i, (d, _))| {
            let lookback = window.size.min(i + 1);
            let values: Vec<f64> = points[i + 1 - lookback..=i]
                .iter()
                .map(|(_, v)| *v)
                .filter(|v| !is_missing(*v))
                .collect();
            let value = if values.is_empty() { f64::NAN } else { stat(&values) };
            (*d, value)
        })
        .collect();

    apply_ramp(&rolled, window)
}

/// Rolling minimum over the trailing window.
///
/// # Errors
///
/// Returns [`QuantraError::Unordered`] for an out-of-order index and
/// [`QuantraError::InvalidArg`] for an invalid window.
pub fn min(x: &TimeSeries, w: impl Into<WindowSpec>) -> Result<TimeSeries, QuantraError> {
    rolling(x, w, |values| values.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Rolling maximum over the trailing window.
///
/// # Errors
///
/// Returns [`QuantraError::Unordered`] for an out-of-order index and
/// [`QuantraError::InvalidArg`] for an invalid window.
pub fn max(x: &TimeSeries, w: impl Into<WindowSpec>) -> Result<TimeSeries, QuantraError> {
    rolling(x, w, |values| {
        values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Rolling arithmetic mean over the trailing window.
///
/// # Errors
///
/// Returns [`QuantraError::Unordered`] for an out-of-order index and
/// [`QuantraError::InvalidArg`] for an invalid window.
pub fn mean(x: &TimeSeries, w: impl Into<WindowSpec>) -> Result<TimeSeries, QuantraError> {
    rolling(x, w, |values| {
        values.iter().sum::<f64>() / values.len() as f64
    })
}

/// Rolling sum over the trailing window.
///
/// # Errors
///
/// Returns [`QuantraError::Unordered`] for an out-of-order index and
/// [`QuantraError::InvalidArg`] for an invalid window.
pub fn sum(x: &TimeSeries, w: impl Into<WindowSpec>) -> Result<TimeSeries, QuantraError> {
    rolling(x, w, |values| values.iter().sum())
}

/// Rolling sample standard deviation over the trailing window.
///
/// A window with fewer than two usable observations yields a
/// missing-marker.
///
/// # Errors
///
/// Returns [`QuantraError::Unordered`] for an out-of-order index and
/// [`QuantraError::InvalidArg`] for an invalid window.
pub fn stdev(x: &TimeSeries, w: impl Into<WindowSpec>) -> Result<TimeSeries, QuantraError> {
    rolling(x, w, |values| sample_std(values))
}

fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let n = values.len() as f64;
    let mu = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / (n - 1.0);
    var.sqrt()
}

/// Clamp outliers to `limit` standard deviations around the full-series
/// mean.
///
/// # Errors
///
/// Returns [`QuantraError::Unordered`] when the date index is not strictly
/// increasing.
pub fn winsorize(x: &TimeSeries, limit: f64) -> Result<TimeSeries, QuantraError> {
    let values: Vec<f64> = x.values().filter(|v| !is_missing(*v)).collect();
    // With no usable observations the bounds are NaN and the clamps are
    // no-ops, since no value compares above or below a NaN bound.
    let mu = values.iter().sum::<f64>() / values.len() as f64;
    let sigma = sample_std(&values);

    let capped = super::algebra::ceil(x, mu + sigma * limit)?;
    super::algebra::floor(&capped, mu - sigma * limit)
}

/// A synthetic daily random walk of `n` observations starting today.
///
/// Levels start at 100 and move by a standard normal increment each day.
#[must_use]
pub fn generate_series(n: usize) -> TimeSeries {
    let start = Utc::now().date_naive();
    let mut rng = rand::rng();
    let mut level = 100.0;
    let mut values = Vec::with_capacity(n);
    for _ in 0..n {
        values.push(level);
        level += standard_normal(&mut rng);
    }
    TimeSeries::from_daily(start, values)
}

/// Box-Muller transform over two uniform draws.
fn standard_normal(rng: &mut impl Rng) -> f64 {
    let u1: f64 = rng.random::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeseries::window::Window;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        TimeSeries::from_daily(start, values.iter().copied())
    }

    #[test]
    fn mean_expands_over_the_leading_edge() {
        let x = series(&[2.0, 4.0, 6.0, 8.0]);
        let got = mean(&x, WindowSpec::with_size(2)).unwrap();
        let values: Vec<f64> = got.values().collect();
        assert_eq!(values, vec![2.0, 3.0, 5.0, 7.0]);
    }

    #[test]
    fn sum_skips_markers_inside_the_window() {
        let x = series(&[1.0, f64::NAN, 3.0]);
        let got = sum(&x, WindowSpec::with_size(2)).unwrap();
        let values: Vec<f64> = got.values().collect();
        assert_eq!(values, vec![1.0, 1.0, 3.0]);
    }

    #[test]
    fn all_missing_window_yields_a_marker() {
        let x = series(&[f64::NAN, f64::NAN, 5.0]);
        let got = max(&x, WindowSpec::with_size(2)).unwrap();
        let values: Vec<f64> = got.values().collect();
        assert!(values[0].is_nan());
        assert!(values[1].is_nan());
        assert_eq!(values[2], 5.0);
    }

    #[test]
    fn min_and_max_track_the_window() {
        let x = series(&[3.0, 1.0, 4.0, 1.0, 5.0]);
        let lo: Vec<f64> = min(&x, WindowSpec::with_size(3)).unwrap().values().collect();
        let hi: Vec<f64> = max(&x, WindowSpec::with_size(3)).unwrap().values().collect();
        assert_eq!(lo, vec![3.0, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(hi, vec![3.0, 3.0, 4.0, 4.0, 5.0]);
    }

    #[test]
    fn stdev_needs_two_observations() {
        let x = series(&[1.0, 2.0, 4.0]);
        let got: Vec<f64> = stdev(&x, WindowSpec::with_size(2)).unwrap().values().collect();
        assert!(got[0].is_nan());
        assert!((got[1] - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((got[2] - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn integer_window_trims_its_own_ramp() {
        let x = series(&[1.0, 2.0, 3.0, 4.0]);
        let got = sum(&x, 2usize).unwrap();
        // Ramp of 2 drops the two expanding entries.
        let values: Vec<f64> = got.values().collect();
        assert_eq!(values, vec![5.0, 7.0]);
    }

    #[test]
    fn rolling_rejects_out_of_order_input() {
        let d1 = NaiveDate::from_ymd_opt(2021, 3, 2).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        let x = TimeSeries::new(vec![(d1, 1.0), (d2, 2.0)]);
        assert!(matches!(
            mean(&x, WindowSpec::unset()),
            Err(QuantraError::Unordered(_))
        ));
    }

    #[test]
    fn rolling_rejects_zero_window() {
        let x = series(&[1.0, 2.0]);
        assert!(matches!(
            mean(&x, Window::new(0, 0)),
            Err(QuantraError::InvalidArg(_))
        ));
    }

    #[test]
    fn winsorize_clamps_outliers_both_ways() {
        let x = series(&[-100.0, 0.0, 0.0, 0.0, 100.0]);
        let got = winsorize(&x, 0.5).unwrap();
        let values: Vec<f64> = got.values().collect();
        // mu = 0, sample variance = 20000 / 4, bound = 0.5 * sigma.
        let bound = 0.5 * 5000f64.sqrt();
        assert_eq!(values[0], -bound);
        assert_eq!(values[1], 0.0);
        assert_eq!(values[4], bound);
    }

    #[test]
    fn generate_series_walks_daily_from_one_hundred() {
        let x = generate_series(5);
        assert_eq!(x.len(), 5);
        assert!(x.is_strictly_increasing());
        assert_eq!(x.values().next(), Some(100.0));
    }
}
