use chrono::NaiveDate;
use proptest::prelude::*;
use quantra_core::{TimeSeries, Window, WindowSpec, apply_ramp, normalize_window, stats};

fn series(n: usize) -> TimeSeries {
    let start = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
    TimeSeries::from_daily(start, (0..n).map(|i| i as f64 + 1.0))
}

#[test]
fn resolution_covers_every_request_shape() {
    let x = series(10);

    let cases: [(WindowSpec, Option<usize>, Window); 5] = [
        (WindowSpec::unset(), None, Window::new(10, 0)),
        (WindowSpec::unset(), Some(2), Window::new(2, 0)),
        (WindowSpec::from(5usize), None, Window::new(5, 5)),
        (WindowSpec::with_size(2), None, Window::new(2, 0)),
        (WindowSpec::with_ramp(2), None, Window::new(10, 2)),
    ];
    for (spec, default_size, expected) in cases {
        assert_eq!(normalize_window(&x, spec, default_size).unwrap(), expected);
    }
}

#[test]
fn invalid_windows_are_rejected_up_front() {
    let x = series(10);
    assert!(normalize_window(&x, Window::new(0, 0), None).is_err());
    assert!(normalize_window(&x, Window::new(2, 11), None).is_err());
    assert!(apply_ramp(&x, Window::new(0, 0)).is_err());
    // Validation fires even when the size alone would empty the output.
    assert!(apply_ramp(&x, Window::new(11, 11)).is_err());
}

#[test]
fn integer_window_statistics_trim_the_warmup() {
    let x = series(5);
    let got = stats::mean(&x, 3usize).unwrap();
    let values: Vec<f64> = got.values().collect();
    assert_eq!(values, vec![3.0, 4.0]);
}

proptest! {
    #[test]
    fn normalization_resolves_or_rejects_deterministically(
        len in 0usize..60,
        size in proptest::option::of(0usize..80),
        ramp in proptest::option::of(0usize..80),
        default_size in proptest::option::of(1usize..80),
    ) {
        let x = series(len);
        let spec = WindowSpec { size, ramp };
        let resolved_size = size.or(default_size).unwrap_or(len);
        let resolved_ramp = ramp.unwrap_or(0);

        match normalize_window(&x, spec, default_size) {
            Ok(w) => {
                prop_assert_eq!(w, Window::new(resolved_size, resolved_ramp));
                if !x.is_empty() {
                    prop_assert!(w.size > 0);
                    prop_assert!(w.ramp <= x.len());
                }
            }
            Err(_) => {
                prop_assert!(!x.is_empty());
                prop_assert!(resolved_size == 0 || resolved_ramp > len);
            }
        }
    }

    #[test]
    fn ramp_output_length_law(len in 0usize..60, size in 1usize..80, ramp in 0usize..80) {
        let x = series(len);
        match apply_ramp(&x, Window::new(size, ramp)) {
            Ok(out) => {
                if size > len {
                    prop_assert_eq!(out.len(), 0);
                } else {
                    prop_assert_eq!(out.len(), len - ramp);
                    let expected: TimeSeries = x.iter().skip(ramp).collect();
                    prop_assert_eq!(out, expected);
                }
            }
            Err(_) => prop_assert!(!x.is_empty() && ramp > len),
        }
    }

    #[test]
    fn rolling_statistics_obey_the_window_bounds(
        values in proptest::collection::vec(-1e3..1e3f64, 1..50),
        size in 1usize..10,
    ) {
        let x = TimeSeries::from_daily(
            NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
            values.iter().copied(),
        );
        let lo = stats::min(&x, WindowSpec::with_size(size)).unwrap();
        let hi = stats::max(&x, WindowSpec::with_size(size)).unwrap();
        let avg = stats::mean(&x, WindowSpec::with_size(size)).unwrap();

        prop_assert_eq!(lo.len(), x.len());
        for ((l, h), m) in lo.values().zip(hi.values()).zip(avg.values()) {
            prop_assert!(l <= h);
            prop_assert!(l - 1e-9 <= m && m <= h + 1e-9);
        }
    }
}
