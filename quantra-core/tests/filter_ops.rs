use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use quantra_core::{FilterOperator, QuantraError, TimeSeries, filter_values, is_missing};

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 3, n).unwrap()
}

fn daily(values: &[f64]) -> TimeSeries {
    TimeSeries::from_daily(day(1), values.iter().copied())
}

#[test]
fn operator_table_removes_matching_entries() {
    let x = daily(&[-1.0, 0.0, 10.0, 1.0]);

    let cases = [
        (FilterOperator::Equals, vec![-1.0, 10.0, 1.0]),
        (FilterOperator::Greater, vec![-1.0, 0.0]),
        (FilterOperator::Less, vec![0.0, 10.0, 1.0]),
        (FilterOperator::LessOrEqual, vec![10.0, 1.0]),
        (FilterOperator::GreaterOrEqual, vec![-1.0]),
        (FilterOperator::NotEquals, vec![0.0]),
    ];
    for (op, expected) in cases {
        let got: Vec<f64> = filter_values(&x, Some(op), Some(0.0))
            .unwrap()
            .values()
            .collect();
        assert_eq!(got, expected, "{op:?}");
    }
}

#[test]
fn no_arguments_drops_missing_markers() {
    let x = TimeSeries::new(vec![(day(1), 1.0), (day(2), f64::NAN), (day(3), 3.0)]);
    let got = filter_values(&x, None, None).unwrap();
    assert_eq!(got, TimeSeries::new(vec![(day(1), 1.0), (day(3), 3.0)]));
}

#[test]
fn markers_survive_all_operators_except_not_equals() {
    let x = TimeSeries::new(vec![(day(1), f64::NAN)]);
    let survives = [
        FilterOperator::Equals,
        FilterOperator::Less,
        FilterOperator::Greater,
        FilterOperator::LessOrEqual,
        FilterOperator::GreaterOrEqual,
    ];
    for op in survives {
        let got = filter_values(&x, Some(op), Some(0.0)).unwrap();
        assert_eq!(got.len(), 1, "{op:?}");
    }
    let got = filter_values(&x, Some(FilterOperator::NotEquals), Some(0.0)).unwrap();
    assert!(got.is_empty());
}

#[test]
fn mismatched_arguments_are_rejected() {
    let x = daily(&[1.0]);
    assert!(matches!(
        filter_values(&x, Some(FilterOperator::Equals), None),
        Err(QuantraError::InvalidArg(_))
    ));
    assert!(matches!(
        filter_values(&x, None, Some(1.0)),
        Err(QuantraError::InvalidArg(_))
    ));
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..1000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2018, 1, 1).unwrap() + Duration::days(offset)
    })
}

fn arb_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -1e3..1e3f64,
        1 => Just(f64::NAN),
    ]
}

fn arb_operator() -> impl Strategy<Value = FilterOperator> {
    prop_oneof![
        Just(FilterOperator::Equals),
        Just(FilterOperator::NotEquals),
        Just(FilterOperator::Less),
        Just(FilterOperator::Greater),
        Just(FilterOperator::LessOrEqual),
        Just(FilterOperator::GreaterOrEqual),
    ]
}

fn removes(op: FilterOperator, v: f64, threshold: f64) -> bool {
    match op {
        FilterOperator::Equals => v == threshold,
        FilterOperator::NotEquals => v != threshold,
        FilterOperator::Less => v < threshold,
        FilterOperator::Greater => v > threshold,
        FilterOperator::LessOrEqual => v <= threshold,
        FilterOperator::GreaterOrEqual => v >= threshold,
    }
}

proptest! {
    #[test]
    fn survivors_are_exactly_the_non_matching_entries(
        entries in proptest::collection::vec((arb_date(), arb_value()), 0..50),
        op in arb_operator(),
        threshold in -1e3..1e3f64,
    ) {
        let x = TimeSeries::new(entries);
        let got = filter_values(&x, Some(op), Some(threshold)).unwrap();
        let expected: TimeSeries = x
            .iter()
            .filter(|(_, v)| !removes(op, *v, threshold))
            .collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn no_argument_filter_keeps_observed_entries_in_order(
        entries in proptest::collection::vec((arb_date(), arb_value()), 0..50),
    ) {
        let x = TimeSeries::new(entries);
        let got = filter_values(&x, None, None).unwrap();
        let expected: TimeSeries = x.iter().filter(|(_, v)| !is_missing(*v)).collect();
        prop_assert_eq!(got, expected);
    }
}
