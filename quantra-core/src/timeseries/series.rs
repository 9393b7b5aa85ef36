use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Returns `true` when `value` is the missing-value marker.
///
/// Series use IEEE NaN as the marker, so pointwise arithmetic over a missing
/// observation stays missing without extra branching.
///
/// ```
/// use quantra_core::is_missing;
///
/// assert!(is_missing(f64::NAN));
/// assert!(!is_missing(0.0));
/// ```
#[must_use]
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// A date-indexed series of `f64` observations.
///
/// Entries are kept in the order the caller supplied them; the type never
/// reorders on construction. Operations that require a strictly increasing
/// index (clamps, windowed statistics) verify it and fail with
/// [`QuantraError::Unordered`](crate::QuantraError::Unordered) rather than
/// silently sorting. Alignment produces sorted output regardless of input
/// order.
///
/// Equality compares missing-markers as equal to each other, so aligned
/// fixtures containing gaps can be asserted directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    points: Vec<(NaiveDate, f64)>,
}

impl TimeSeries {
    /// Build a series from (date, value) pairs, preserving their order.
    #[must_use]
    pub const fn new(points: Vec<(NaiveDate, f64)>) -> Self {
        Self { points }
    }

    /// Build a series of consecutive calendar days starting at `start`.
    #[must_use]
    pub fn from_daily(start: NaiveDate, values: impl IntoIterator<Item = f64>) -> Self {
        let mut date = start;
        let mut points = Vec::new();
        for v in values {
            points.push((date, v));
            date = date.succ_opt().unwrap_or(date);
        }
        Self { points }
    }

    /// Build a constant series over the given dates.
    #[must_use]
    pub fn constant(dates: impl IntoIterator<Item = NaiveDate>, value: f64) -> Self {
        Self {
            points: dates.into_iter().map(|d| (d, value)).collect(),
        }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over (date, value) pairs in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points.iter().copied()
    }

    /// Iterate over the date index in stored order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|(d, _)| *d)
    }

    /// Iterate over the values in stored order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, v)| *v)
    }

    /// The stored (date, value) pairs.
    #[must_use]
    pub fn as_slice(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    /// Value at `date`, if the series has an observation for it.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points.iter().find(|(d, _)| *d == date).map(|(_, v)| *v)
    }

    /// First (date, value) pair, if any.
    #[must_use]
    pub fn first(&self) -> Option<(NaiveDate, f64)> {
        self.points.first().copied()
    }

    /// Last (date, value) pair, if any.
    #[must_use]
    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        self.points.last().copied()
    }

    /// Append an observation, preserving caller responsibility for ordering.
    pub fn push(&mut self, date: NaiveDate, value: f64) {
        self.points.push((date, value));
    }

    /// Whether the date index is strictly increasing.
    #[must_use]
    pub fn is_strictly_increasing(&self) -> bool {
        self.points.windows(2).all(|w| w[0].0 < w[1].0)
    }

    /// New series with the same index and `f` applied to every value.
    #[must_use]
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            points: self.points.iter().map(|(d, v)| (*d, f(*v))).collect(),
        }
    }
}

impl PartialEq for TimeSeries {
    fn eq(&self, other: &Self) -> bool {
        self.points.len() == other.points.len()
            && self.points.iter().zip(other.points.iter()).all(|(a, b)| {
                a.0 == b.0 && (a.1 == b.1 || (is_missing(a.1) && is_missing(b.1)))
            })
    }
}

impl FromIterator<(NaiveDate, f64)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// A bare numeric operand: integer or float.
///
/// Integer arithmetic stays integral where the operation is closed over
/// integers; anything else promotes to a float.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// A signed integer value.
    Int(i64),
    /// A floating-point value.
    Float(f64),
}

impl Scalar {
    /// The value as a float, widening integers.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// Either a scalar or a series; the operand model of the algebra functions.
///
/// Scalar/scalar arithmetic bypasses alignment entirely; a scalar against a
/// series broadcasts over the series' dates; two series are aligned first.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A bare number with no date index.
    Scalar(Scalar),
    /// A date-indexed series.
    Series(TimeSeries),
}

impl Operand {
    /// The scalar inside, if this operand is one.
    #[must_use]
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Self::Scalar(s) => Some(*s),
            Self::Series(_) => None,
        }
    }

    /// The series inside, if this operand is one.
    #[must_use]
    pub fn as_series(&self) -> Option<&TimeSeries> {
        match self {
            Self::Scalar(_) => None,
            Self::Series(s) => Some(s),
        }
    }

    /// Consume the operand, returning the series inside, if any.
    #[must_use]
    pub fn into_series(self) -> Option<TimeSeries> {
        match self {
            Self::Scalar(_) => None,
            Self::Series(s) => Some(s),
        }
    }
}

impl From<Scalar> for Operand {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Self::Scalar(Scalar::Int(v))
    }
}

impl From<i32> for Operand {
    fn from(v: i32) -> Self {
        Self::Scalar(Scalar::Int(i64::from(v)))
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Self::Scalar(Scalar::Float(v))
    }
}

impl From<TimeSeries> for Operand {
    fn from(s: TimeSeries) -> Self {
        Self::Series(s)
    }
}

impl From<&TimeSeries> for Operand {
    fn from(s: &TimeSeries) -> Self {
        Self::Series(s.clone())
    }
}
