//! Date-index alignment of series pairs.
//!
//! [`align`] reconciles two series onto a common date index ahead of any
//! pointwise combination. The returned pair always shares an identical,
//! sorted index; what happens to dates present in only one input is decided
//! by the [`AlignMethod`].

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::series::{TimeSeries, is_missing};

/// Strategy for reconciling the date indices of two series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlignMethod {
    /// Keep only dates present in both series.
    Intersect,
    /// Union of dates; entries absent from one side become missing-markers.
    Nan,
    /// Union of dates; entries absent from one side become zero.
    Zero,
    /// Union of dates; gaps carry the most recent earlier value forward.
    /// Dates before a side's first observation stay missing.
    #[default]
    Step,
    /// Union of dates; gaps are linearly interpolated between the
    /// surrounding observations. Dates outside a side's observed range stay
    /// missing.
    Time,
}

/// Align `x` and `y` onto a shared, strictly increasing date index.
///
/// Duplicate dates within one input collapse to their first occurrence.
/// The output pair always has equal length and identical dates, so callers
/// can zip the two without further checks.
#[must_use]
pub fn align(x: &TimeSeries, y: &TimeSeries, method: AlignMethod) -> (TimeSeries, TimeSeries) {
    let mx = dedup(x);
    let my = dedup(y);

    let dates: Vec<NaiveDate> = match method {
        AlignMethod::Intersect => mx.keys().filter(|d| my.contains_key(d)).copied().collect(),
        AlignMethod::Nan | AlignMethod::Zero | AlignMethod::Step | AlignMethod::Time => mx
            .keys()
            .chain(my.keys())
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    };

    (fill(&mx, &dates, method), fill(&my, &dates, method))
}

/// Collapse duplicate dates, keeping the first occurrence of each.
fn dedup(x: &TimeSeries) -> BTreeMap<NaiveDate, f64> {
    let mut map = BTreeMap::new();
    for (date, value) in x.iter() {
        map.entry(date).or_insert(value);
    }
    map
}

fn fill(map: &BTreeMap<NaiveDate, f64>, dates: &[NaiveDate], method: AlignMethod) -> TimeSeries {
    match method {
        AlignMethod::Intersect | AlignMethod::Nan => dates
            .iter()
            .map(|d| (*d, map.get(d).copied().unwrap_or(f64::NAN)))
            .collect(),
        AlignMethod::Zero => dates
            .iter()
            .map(|d| (*d, map.get(d).copied().unwrap_or(0.0)))
            .collect(),
        AlignMethod::Step => {
            let mut last = None;
            dates
                .iter()
                .map(|d| {
                    let value = match map.get(d) {
                        Some(v) if !is_missing(*v) => {
                            last = Some(*v);
                            *v
                        }
                        // A stored missing-marker carries forward like a gap.
                        _ => last.unwrap_or(f64::NAN),
                    };
                    (*d, value)
                })
                .collect()
        }
        AlignMethod::Time => time_fill(map, dates),
    }
}

/// Linear interpolation in calendar days between surrounding observations.
fn time_fill(map: &BTreeMap<NaiveDate, f64>, dates: &[NaiveDate]) -> TimeSeries {
    let obs: Vec<(NaiveDate, f64)> = map
        .iter()
        .filter(|(_, v)| !is_missing(**v))
        .map(|(d, v)| (*d, *v))
        .collect();

    dates
        .iter()
        .map(|d| {
            let value = match map.get(d) {
                Some(v) if !is_missing(*v) => *v,
                _ => interp_at(&obs, *d),
            };
            (*d, value)
        })
        .collect()
}

fn interp_at(obs: &[(NaiveDate, f64)], date: NaiveDate) -> f64 {
    let idx = obs.partition_point(|(d, _)| *d < date);
    if idx == 0 || idx == obs.len() {
        return f64::NAN;
    }
    let (d0, v0) = obs[idx - 1];
    let (d1, v1) = obs[idx];
    let span = (d1 - d0).num_days() as f64;
    let elapsed = (date - d0).num_days() as f64;
    v0 + (v1 - v0) * (elapsed / span)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, day).unwrap()
    }

    #[test]
    fn intersect_keeps_shared_dates_only() {
        let x = TimeSeries::new(vec![(d(1), 1.0), (d(2), 2.0), (d(4), 4.0)]);
        let y = TimeSeries::new(vec![(d(2), 20.0), (d(3), 30.0), (d(4), 40.0)]);
        let (ax, ay) = align(&x, &y, AlignMethod::Intersect);
        assert_eq!(ax, TimeSeries::new(vec![(d(2), 2.0), (d(4), 4.0)]));
        assert_eq!(ay, TimeSeries::new(vec![(d(2), 20.0), (d(4), 40.0)]));
    }

    #[test]
    fn nan_marks_one_sided_dates_missing() {
        let x = TimeSeries::new(vec![(d(1), 1.0)]);
        let y = TimeSeries::new(vec![(d(2), 2.0)]);
        let (ax, ay) = align(&x, &y, AlignMethod::Nan);
        assert_eq!(ax, TimeSeries::new(vec![(d(1), 1.0), (d(2), f64::NAN)]));
        assert_eq!(ay, TimeSeries::new(vec![(d(1), f64::NAN), (d(2), 2.0)]));
    }

    #[test]
    fn zero_fills_absent_dates_but_preserves_stored_markers() {
        let x = TimeSeries::new(vec![(d(1), f64::NAN), (d(2), 2.0)]);
        let y = TimeSeries::new(vec![(d(2), 5.0), (d(3), 6.0)]);
        let (ax, _) = align(&x, &y, AlignMethod::Zero);
        // The stored marker on d(1) survives; only the absent d(3) is zero.
        assert_eq!(
            ax,
            TimeSeries::new(vec![(d(1), f64::NAN), (d(2), 2.0), (d(3), 0.0)])
        );
    }

    #[test]
    fn step_carries_forward_without_backfill() {
        let x = TimeSeries::new(vec![(d(2), 2.0)]);
        let y = TimeSeries::new(vec![(d(1), 1.0), (d(3), 3.0)]);
        let (ax, ay) = align(&x, &y, AlignMethod::Step);
        // d(1) precedes x's first observation: no backfill, stays missing.
        assert_eq!(
            ax,
            TimeSeries::new(vec![(d(1), f64::NAN), (d(2), 2.0), (d(3), 2.0)])
        );
        assert_eq!(
            ay,
            TimeSeries::new(vec![(d(1), 1.0), (d(2), 1.0), (d(3), 3.0)])
        );
    }

    #[test]
    fn step_carries_over_stored_markers() {
        let x = TimeSeries::new(vec![(d(1), 1.0), (d(2), f64::NAN), (d(3), 3.0)]);
        let y = TimeSeries::new(vec![(d(1), 0.0), (d(2), 0.0), (d(3), 0.0)]);
        let (ax, _) = align(&x, &y, AlignMethod::Step);
        assert_eq!(
            ax,
            TimeSeries::new(vec![(d(1), 1.0), (d(2), 1.0), (d(3), 3.0)])
        );
    }

    #[test]
    fn time_interpolates_between_observations() {
        let x = TimeSeries::new(vec![(d(1), 1.0), (d(4), 4.0)]);
        let y = TimeSeries::new(vec![(d(2), 0.0), (d(3), 0.0)]);
        let (ax, _) = align(&x, &y, AlignMethod::Time);
        assert_eq!(
            ax,
            TimeSeries::new(vec![(d(1), 1.0), (d(2), 2.0), (d(3), 3.0), (d(4), 4.0)])
        );
    }

    #[test]
    fn time_leaves_edges_missing() {
        let x = TimeSeries::new(vec![(d(2), 2.0), (d(3), 3.0)]);
        let y = TimeSeries::new(vec![(d(1), 0.0), (d(4), 0.0)]);
        let (ax, _) = align(&x, &y, AlignMethod::Time);
        assert_eq!(
            ax,
            TimeSeries::new(vec![
                (d(1), f64::NAN),
                (d(2), 2.0),
                (d(3), 3.0),
                (d(4), f64::NAN)
            ])
        );
    }

    #[test]
    fn duplicate_dates_collapse_to_first_occurrence() {
        let x = TimeSeries::new(vec![(d(1), 1.0), (d(1), 9.0)]);
        let y = TimeSeries::new(vec![(d(1), 5.0)]);
        let (ax, _) = align(&x, &y, AlignMethod::Intersect);
        assert_eq!(ax, TimeSeries::new(vec![(d(1), 1.0)]));
    }

    #[test]
    fn unsorted_input_aligns_sorted() {
        let x = TimeSeries::new(vec![(d(3), 3.0), (d(1), 1.0)]);
        let y = TimeSeries::new(vec![(d(1), 0.0), (d(3), 0.0)]);
        let (ax, _) = align(&x, &y, AlignMethod::Intersect);
        assert!(ax.is_strictly_increasing());
        assert_eq!(ax, TimeSeries::new(vec![(d(1), 1.0), (d(3), 3.0)]));
    }
}
