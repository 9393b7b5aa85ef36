//! Pointwise arithmetic, unary transforms, clamps, and filtering.
//!
//! Binary operations accept any mix of scalars and series through
//! [`Operand`]. Two series are aligned first; a scalar against a series
//! broadcasts onto the series' own dates without alignment; two scalars
//! combine directly. Integer arithmetic stays integral where the operation
//! is closed over integers and promotes to floats otherwise. Division uses
//! IEEE semantics throughout, so a zero divisor yields an infinity or a
//! missing-marker rather than an error.

use serde::{Deserialize, Serialize};

use quantra_types::QuantraError;

use super::align::{AlignMethod, align};
use super::series::{Operand, Scalar, TimeSeries, is_missing};

fn add_scalars(a: Scalar, b: Scalar) -> Scalar {
    match (a, b) {
        (Scalar::Int(ia), Scalar::Int(ib)) => ia
            .checked_add(ib)
            .map_or(Scalar::Float(ia as f64 + ib as f64), Scalar::Int),
        _ => Scalar::Float(a.as_f64() + b.as_f64()),
    }
}

fn subtract_scalars(a: Scalar, b: Scalar) -> Scalar {
    match (a, b) {
        (Scalar::Int(ia), Scalar::Int(ib)) => ia
            .checked_sub(ib)
            .map_or(Scalar::Float(ia as f64 - ib as f64), Scalar::Int),
        _ => Scalar::Float(a.as_f64() - b.as_f64()),
    }
}

fn multiply_scalars(a: Scalar, b: Scalar) -> Scalar {
    match (a, b) {
        (Scalar::Int(ia), Scalar::Int(ib)) => ia
            .checked_mul(ib)
            .map_or(Scalar::Float(ia as f64 * ib as f64), Scalar::Int),
        _ => Scalar::Float(a.as_f64() * b.as_f64()),
    }
}

/// True division always yields a float, so integer / integer keeps the
/// fractional part and a zero divisor produces an IEEE infinity or marker.
fn divide_scalars(a: Scalar, b: Scalar) -> Scalar {
    Scalar::Float(a.as_f64() / b.as_f64())
}

fn floordiv_scalars(a: Scalar, b: Scalar) -> Scalar {
    match (a, b) {
        (Scalar::Int(ia), Scalar::Int(ib)) if ib != 0 => match ia.checked_div(ib) {
            Some(q) => {
                // Truncated quotient steps down when signs differ and the
                // division is inexact, matching floor semantics.
                let r = ia % ib;
                Scalar::Int(if r != 0 && (ia < 0) != (ib < 0) { q - 1 } else { q })
            }
            None => Scalar::Float((ia as f64 / ib as f64).floor()),
        },
        _ => Scalar::Float((a.as_f64() / b.as_f64()).floor()),
    }
}

fn combine(
    x: Operand,
    y: Operand,
    method: AlignMethod,
    scalar_op: impl Fn(Scalar, Scalar) -> Scalar,
    value_op: impl Fn(f64, f64) -> f64,
) -> Operand {
    match (x, y) {
        (Operand::Scalar(a), Operand::Scalar(b)) => Operand::Scalar(scalar_op(a, b)),
        // A scalar broadcasts onto the series' own index; no alignment.
        (Operand::Scalar(a), Operand::Series(s)) => {
            Operand::Series(s.map_values(|v| value_op(a.as_f64(), v)))
        }
        (Operand::Series(s), Operand::Scalar(b)) => {
            Operand::Series(s.map_values(|v| value_op(v, b.as_f64())))
        }
        (Operand::Series(sx), Operand::Series(sy)) => {
            let (ax, ay) = align(&sx, &sy, method);
            Operand::Series(
                ax.iter()
                    .zip(ay.values())
                    .map(|((d, a), b)| (d, value_op(a, b)))
                    .collect(),
            )
        }
    }
}

/// Add two operands pointwise.
#[must_use]
pub fn add(x: impl Into<Operand>, y: impl Into<Operand>, method: AlignMethod) -> Operand {
    combine(x.into(), y.into(), method, add_scalars, |a, b| a + b)
}

/// Subtract `y` from `x` pointwise.
#[must_use]
pub fn subtract(x: impl Into<Operand>, y: impl Into<Operand>, method: AlignMethod) -> Operand {
    combine(x.into(), y.into(), method, subtract_scalars, |a, b| a - b)
}

/// Multiply two operands pointwise.
#[must_use]
pub fn multiply(x: impl Into<Operand>, y: impl Into<Operand>, method: AlignMethod) -> Operand {
    combine(x.into(), y.into(), method, multiply_scalars, |a, b| a * b)
}

/// Divide `x` by `y` pointwise. Zero divisors follow IEEE semantics.
#[must_use]
pub fn divide(x: impl Into<Operand>, y: impl Into<Operand>, method: AlignMethod) -> Operand {
    combine(x.into(), y.into(), method, divide_scalars, |a, b| a / b)
}

/// Floor-divide `x` by `y` pointwise, rounding each quotient toward
/// negative infinity.
#[must_use]
pub fn floordiv(x: impl Into<Operand>, y: impl Into<Operand>, method: AlignMethod) -> Operand {
    combine(x.into(), y.into(), method, floordiv_scalars, |a, b| (a / b).floor())
}

/// e raised to each value.
#[must_use]
pub fn exp(x: &TimeSeries) -> TimeSeries {
    x.map_values(f64::exp)
}

/// Natural logarithm of each value.
#[must_use]
pub fn log(x: &TimeSeries) -> TimeSeries {
    x.map_values(f64::ln)
}

/// Each value raised to the power `y`.
#[must_use]
pub fn power(x: &TimeSeries, y: f64) -> TimeSeries {
    x.map_values(|v| v.powf(y))
}

/// Square root. A scalar whose root is integral comes back as an integer.
#[must_use]
pub fn sqrt(x: impl Into<Operand>) -> Operand {
    match x.into() {
        Operand::Series(s) => Operand::Series(s.map_values(f64::sqrt)),
        Operand::Scalar(s) => {
            let r = s.as_f64().sqrt();
            if r.is_finite() && r == r.round() && r.abs() <= i64::MAX as f64 {
                Operand::Scalar(Scalar::Int(r as i64))
            } else {
                Operand::Scalar(Scalar::Float(r))
            }
        }
    }
}

/// Absolute value of each entry.
#[must_use]
pub fn abs(x: &TimeSeries) -> TimeSeries {
    x.map_values(f64::abs)
}

fn ensure_increasing(x: &TimeSeries, op: &str) -> Result<(), QuantraError> {
    if x.is_strictly_increasing() {
        Ok(())
    } else {
        Err(QuantraError::unordered(format!(
            "{op} requires a strictly increasing date index"
        )))
    }
}

/// Raise every value below `value` up to `value`.
///
/// Missing-markers pass through untouched.
///
/// # Errors
///
/// Returns [`QuantraError::Unordered`] when the date index is not strictly
/// increasing.
pub fn floor(x: &TimeSeries, value: f64) -> Result<TimeSeries, QuantraError> {
    ensure_increasing(x, "floor")?;
    Ok(x.map_values(|v| if v < value { value } else { v }))
}

/// Lower every value above `value` down to `value`.
///
/// Missing-markers pass through untouched.
///
/// # Errors
///
/// Returns [`QuantraError::Unordered`] when the date index is not strictly
/// increasing.
pub fn ceil(x: &TimeSeries, value: f64) -> Result<TimeSeries, QuantraError> {
    ensure_increasing(x, "ceil")?;
    Ok(x.map_values(|v| if v > value { value } else { v }))
}

/// Comparison used to select which entries a filter removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    /// Remove entries equal to the value.
    Equals,
    /// Remove entries not equal to the value.
    NotEquals,
    /// Remove entries less than the value.
    Less,
    /// Remove entries greater than the value.
    Greater,
    /// Remove entries less than or equal to the value.
    LessOrEqual,
    /// Remove entries greater than or equal to the value.
    GreaterOrEqual,
}

fn compare(v: f64, op: FilterOperator, threshold: f64) -> bool {
    match op {
        FilterOperator::Equals => v == threshold,
        FilterOperator::NotEquals => v != threshold,
        FilterOperator::Less => v < threshold,
        FilterOperator::Greater => v > threshold,
        FilterOperator::LessOrEqual => v <= threshold,
        FilterOperator::GreaterOrEqual => v >= threshold,
    }
}

/// Remove entries matched by the operator and value; with neither, remove
/// missing-markers.
///
/// Comparisons follow IEEE semantics, so missing-markers survive every
/// operator except [`FilterOperator::NotEquals`], where NaN compares
/// unequal to any threshold and is removed.
///
/// # Errors
///
/// Returns [`QuantraError::InvalidArg`] when exactly one of `operator` and
/// `value` is given.
pub fn filter_values(
    x: &TimeSeries,
    operator: Option<FilterOperator>,
    value: Option<f64>,
) -> Result<TimeSeries, QuantraError> {
    match (operator, value) {
        (None, None) => Ok(retain(x, |v| !is_missing(v))),
        (Some(op), Some(threshold)) => Ok(retain(x, |v| !compare(v, op, threshold))),
        (Some(_), None) => Err(QuantraError::invalid_arg(
            "no value specified for the filter operator",
        )),
        (None, Some(_)) => Err(QuantraError::invalid_arg(
            "no operator specified for the filter value",
        )),
    }
}

fn retain(x: &TimeSeries, keep: impl Fn(f64) -> bool) -> TimeSeries {
    x.iter().filter(|(_, v)| keep(*v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, day).unwrap()
    }

    fn series(values: &[f64]) -> TimeSeries {
        TimeSeries::from_daily(d(1), values.iter().copied())
    }

    #[test]
    fn scalar_add_stays_integral() {
        assert_eq!(add(1, 2, AlignMethod::Step), Operand::Scalar(Scalar::Int(3)));
    }

    #[test]
    fn scalar_overflow_promotes_to_float() {
        let got = add(i64::MAX, 1, AlignMethod::Step);
        assert_eq!(got, Operand::Scalar(Scalar::Float(i64::MAX as f64 + 1.0)));
    }

    #[test]
    fn scalar_divide_is_true_division() {
        assert_eq!(divide(1, 2, AlignMethod::Step), Operand::Scalar(Scalar::Float(0.5)));
    }

    #[test]
    fn scalar_divide_by_zero_is_infinite() {
        let Operand::Scalar(Scalar::Float(v)) = divide(1, 0, AlignMethod::Step) else {
            panic!("expected float scalar");
        };
        assert!(v.is_infinite() && v.is_sign_positive());
    }

    #[test]
    fn scalar_floordiv_rounds_toward_negative_infinity() {
        assert_eq!(floordiv(7, 2, AlignMethod::Step), Operand::Scalar(Scalar::Int(3)));
        assert_eq!(floordiv(-7, 2, AlignMethod::Step), Operand::Scalar(Scalar::Int(-4)));
        assert_eq!(floordiv(7, -2, AlignMethod::Step), Operand::Scalar(Scalar::Int(-4)));
        assert_eq!(floordiv(-7, -2, AlignMethod::Step), Operand::Scalar(Scalar::Int(3)));
    }

    #[test]
    fn scalar_floordiv_overflow_promotes() {
        let got = floordiv(i64::MIN, -1, AlignMethod::Step);
        assert_eq!(
            got,
            Operand::Scalar(Scalar::Float((i64::MIN as f64 / -1.0).floor()))
        );
    }

    #[test]
    fn scalar_broadcast_skips_alignment() {
        let x = series(&[1.0, 2.0, 4.0]);
        let got = divide(2, &x, AlignMethod::Intersect);
        assert_eq!(
            got.as_series().unwrap(),
            &series(&[2.0, 1.0, 0.5])
        );
    }

    #[test]
    fn sqrt_of_perfect_square_is_integer() {
        assert_eq!(sqrt(9), Operand::Scalar(Scalar::Int(3)));
    }

    #[test]
    fn sqrt_of_non_square_is_float() {
        let Operand::Scalar(Scalar::Float(v)) = sqrt(10) else {
            panic!("expected float scalar");
        };
        assert!((v - 10f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn floor_requires_ordered_index() {
        let x = TimeSeries::new(vec![(d(2), 1.0), (d(1), 2.0)]);
        assert!(matches!(floor(&x, 0.0), Err(QuantraError::Unordered(_))));
    }

    #[test]
    fn clamps_preserve_markers() {
        let x = TimeSeries::new(vec![(d(1), 1.0), (d(2), f64::NAN), (d(3), 3.0)]);
        let got = floor(&x, 2.0).unwrap();
        assert_eq!(
            got,
            TimeSeries::new(vec![(d(1), 2.0), (d(2), f64::NAN), (d(3), 3.0)])
        );
    }

    #[test]
    fn filter_requires_both_or_neither() {
        let x = series(&[1.0]);
        assert!(matches!(
            filter_values(&x, Some(FilterOperator::Equals), None),
            Err(QuantraError::InvalidArg(_))
        ));
        assert!(matches!(
            filter_values(&x, None, Some(1.0)),
            Err(QuantraError::InvalidArg(_))
        ));
    }

    #[test]
    fn filter_without_args_drops_markers() {
        let x = TimeSeries::new(vec![(d(1), 1.0), (d(2), f64::NAN), (d(3), 3.0)]);
        let got = filter_values(&x, None, None).unwrap();
        assert_eq!(got, TimeSeries::new(vec![(d(1), 1.0), (d(3), 3.0)]));
    }

    #[test]
    fn not_equals_also_removes_markers() {
        let x = TimeSeries::new(vec![(d(1), 0.0), (d(2), f64::NAN), (d(3), 1.0)]);
        let got = filter_values(&x, Some(FilterOperator::NotEquals), Some(0.0)).unwrap();
        assert_eq!(got, TimeSeries::new(vec![(d(1), 0.0)]));
    }
}
