//! Resampling a series onto an arbitrary set of requested dates.

use chrono::NaiveDate;

use quantra_types::QuantraError;

use super::align::AlignMethod;
use super::series::TimeSeries;

/// Resample `x` onto `dates` using the given method.
///
/// Requested dates are sorted and deduplicated first. `Intersect` keeps
/// only requested dates the series actually has; `Nan` and `Zero` index the
/// output by every requested date, marking or zero-filling the absent ones;
/// `Step` takes the latest stored value at or before each requested date,
/// with dates before the first observation taking the first value.
///
/// # Errors
///
/// Returns [`QuantraError::InvalidArg`] for `Step` on an empty series and
/// for `Time`, which has no resampling interpretation here.
pub fn interpolate(
    x: &TimeSeries,
    dates: &[NaiveDate],
    method: AlignMethod,
) -> Result<TimeSeries, QuantraError> {
    let mut requested: Vec<NaiveDate> = dates.to_vec();
    requested.sort_unstable();
    requested.dedup();

    match method {
        AlignMethod::Intersect => Ok(requested
            .iter()
            .filter_map(|d| x.get(*d).map(|v| (*d, v)))
            .collect()),
        AlignMethod::Nan => Ok(requested
            .iter()
            .map(|d| (*d, x.get(*d).unwrap_or(f64::NAN)))
            .collect()),
        AlignMethod::Zero => Ok(requested
            .iter()
            .map(|d| (*d, x.get(*d).unwrap_or(0.0)))
            .collect()),
        AlignMethod::Step => step_resample(x, &requested),
        AlignMethod::Time => Err(QuantraError::invalid_arg(
            "time interpolation is not supported for resampling",
        )),
    }
}

/// Latest stored value at or before each requested date. Unlike step
/// alignment, a requested date before the first observation takes the
/// first value rather than staying missing.
fn step_resample(x: &TimeSeries, requested: &[NaiveDate]) -> Result<TimeSeries, QuantraError> {
    if x.is_empty() {
        return Err(QuantraError::invalid_arg(
            "cannot step-interpolate an empty series",
        ));
    }
    let mut obs: Vec<(NaiveDate, f64)> = x.iter().collect();
    obs.sort_by_key(|(d, _)| *d);

    Ok(requested
        .iter()
        .map(|d| {
            let idx = obs.partition_point(|(od, _)| *od <= *d);
            let (_, v) = if idx == 0 { obs[0] } else { obs[idx - 1] };
            (*d, v)
        })
        .collect())
}

/// The series value observed at `date` under the given method, if any.
///
/// # Errors
///
/// Propagates the same conditions as [`interpolate`].
pub fn value_at(
    x: &TimeSeries,
    date: NaiveDate,
    method: AlignMethod,
) -> Result<Option<f64>, QuantraError> {
    let resampled = interpolate(x, std::slice::from_ref(&date), method)?;
    Ok(resampled.first().map(|(_, v)| v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, day).unwrap()
    }

    #[test]
    fn intersect_keeps_only_present_dates() {
        let x = TimeSeries::new(vec![(d(1), 1.0), (d(3), 3.0)]);
        let got = interpolate(&x, &[d(1), d(2), d(3)], AlignMethod::Intersect).unwrap();
        assert_eq!(got, TimeSeries::new(vec![(d(1), 1.0), (d(3), 3.0)]));
    }

    #[test]
    fn nan_indexes_every_requested_date() {
        let x = TimeSeries::new(vec![(d(1), 1.0)]);
        let got = interpolate(&x, &[d(1), d(2)], AlignMethod::Nan).unwrap();
        assert_eq!(got, TimeSeries::new(vec![(d(1), 1.0), (d(2), f64::NAN)]));
    }

    #[test]
    fn step_takes_latest_at_or_before() {
        let x = TimeSeries::new(vec![(d(2), 2.0), (d(4), 4.0)]);
        let got = interpolate(&x, &[d(1), d(3), d(5)], AlignMethod::Step).unwrap();
        // d(1) precedes the first observation and takes its value.
        assert_eq!(
            got,
            TimeSeries::new(vec![(d(1), 2.0), (d(3), 2.0), (d(5), 4.0)])
        );
    }

    #[test]
    fn step_on_empty_series_is_rejected() {
        let x = TimeSeries::default();
        assert!(matches!(
            interpolate(&x, &[d(1)], AlignMethod::Step),
            Err(QuantraError::InvalidArg(_))
        ));
    }

    #[test]
    fn time_is_rejected() {
        let x = TimeSeries::new(vec![(d(1), 1.0)]);
        assert!(matches!(
            interpolate(&x, &[d(1)], AlignMethod::Time),
            Err(QuantraError::InvalidArg(_))
        ));
    }

    #[test]
    fn requested_dates_are_sorted_and_deduplicated() {
        let x = TimeSeries::new(vec![(d(1), 1.0), (d(2), 2.0)]);
        let got = interpolate(&x, &[d(2), d(1), d(2)], AlignMethod::Nan).unwrap();
        assert_eq!(got, TimeSeries::new(vec![(d(1), 1.0), (d(2), 2.0)]));
    }

    #[test]
    fn value_at_reads_a_single_date() {
        let x = TimeSeries::new(vec![(d(1), 1.0), (d(4), 4.0)]);
        assert_eq!(value_at(&x, d(3), AlignMethod::Step).unwrap(), Some(1.0));
        assert_eq!(
            value_at(&x, d(3), AlignMethod::Intersect).unwrap(),
            None
        );
    }
}
