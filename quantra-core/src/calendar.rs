//! Business-day arithmetic over a week mask and holiday set.
//!
//! A [`Calendar`] pairs a weekly open/closed mask with explicit holiday
//! dates. It answers membership queries and supports offsetting, counting,
//! and enumerating business days under the usual roll conventions.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use quantra_types::QuantraError;

/// Week mask for a Monday-to-Friday trading week.
pub const DEFAULT_WEEK_MASK: &str = "1111100";

/// Earliest date holiday data is maintained for.
#[must_use]
pub fn holiday_low_limit() -> NaiveDate {
    NaiveDate::from_ymd_opt(1952, 1, 1).expect("valid calendar bound")
}

/// Latest date holiday data is maintained for.
#[must_use]
pub fn holiday_high_limit() -> NaiveDate {
    NaiveDate::from_ymd_opt(2052, 12, 31).expect("valid calendar bound")
}

/// Parse a seven-character week mask, Monday first, `1` meaning open.
///
/// ```
/// use quantra_core::calendar::parse_week_mask;
///
/// let mask = parse_week_mask("1111100")?;
/// assert!(mask[0] && !mask[5]);
/// # Ok::<(), quantra_core::QuantraError>(())
/// ```
///
/// # Errors
///
/// Returns [`QuantraError::InvalidArg`] unless the mask is exactly seven
/// characters of `0` and `1`.
pub fn parse_week_mask(mask: &str) -> Result<[bool; 7], QuantraError> {
    let bytes = mask.as_bytes();
    if bytes.len() != 7 || !bytes.iter().all(|b| matches!(b, b'0' | b'1')) {
        return Err(QuantraError::invalid_arg(format!(
            "invalid week mask: {mask}"
        )));
    }
    let mut out = [false; 7];
    for (slot, byte) in out.iter_mut().zip(bytes) {
        *slot = *byte == b'1';
    }
    Ok(out)
}

/// How to resolve a date that is not itself a business day before applying
/// an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Roll {
    /// Reject non-business-day input.
    #[default]
    Raise,
    /// Move forward to the next business day.
    Following,
    /// Move back to the previous business day.
    Preceding,
    /// Following, unless that leaves the month, then preceding.
    ModifiedFollowing,
    /// Preceding, unless that leaves the month, then following.
    ModifiedPreceding,
}

/// A trading calendar: a weekly mask plus explicit holidays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    week_mask: [bool; 7],
    holidays: BTreeSet<NaiveDate>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            week_mask: [true, true, true, true, true, false, false],
            holidays: BTreeSet::new(),
        }
    }
}

impl Calendar {
    /// Build a calendar from an explicit mask and holiday set.
    #[must_use]
    pub const fn new(week_mask: [bool; 7], holidays: BTreeSet<NaiveDate>) -> Self {
        Self { week_mask, holidays }
    }

    /// A Monday-to-Friday calendar with the given holidays.
    #[must_use]
    pub fn with_holidays(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Whether `date` falls on an open weekday and is not a holiday.
    #[must_use]
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        self.week_mask[date.weekday().num_days_from_monday() as usize]
            && !self.holidays.contains(&date)
    }

    fn has_business_days(&self) -> bool {
        self.week_mask.iter().any(|&open| open)
    }

    fn ensure_has_business_days(&self) -> Result<(), QuantraError> {
        if self.has_business_days() {
            Ok(())
        } else {
            Err(QuantraError::invalid_arg(
                "week mask admits no business days",
            ))
        }
    }

    fn following(&self, mut date: NaiveDate) -> Result<NaiveDate, QuantraError> {
        while !self.is_business_day(date) {
            date = date.succ_opt().ok_or_else(date_overflow)?;
        }
        Ok(date)
    }

    fn preceding(&self, mut date: NaiveDate) -> Result<NaiveDate, QuantraError> {
        while !self.is_business_day(date) {
            date = date.pred_opt().ok_or_else(date_overflow)?;
        }
        Ok(date)
    }

    fn roll(&self, date: NaiveDate, roll: Roll) -> Result<NaiveDate, QuantraError> {
        if self.is_business_day(date) {
            return Ok(date);
        }
        match roll {
            Roll::Raise => Err(QuantraError::invalid_arg(format!(
                "{date} is not a business day"
            ))),
            Roll::Following => self.following(date),
            Roll::Preceding => self.preceding(date),
            Roll::ModifiedFollowing => {
                let rolled = self.following(date)?;
                if (rolled.year(), rolled.month()) == (date.year(), date.month()) {
                    Ok(rolled)
                } else {
                    self.preceding(date)
                }
            }
            Roll::ModifiedPreceding => {
                let rolled = self.preceding(date)?;
                if (rolled.year(), rolled.month()) == (date.year(), date.month()) {
                    Ok(rolled)
                } else {
                    self.following(date)
                }
            }
        }
    }

    /// Move `offset` business days from `date`, resolving a non-business
    /// start according to `roll` first.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::InvalidArg`] when `roll` is
    /// [`Roll::Raise`] and `date` is not a business day, or when the mask
    /// admits no business days at all.
    pub fn business_day_offset(
        &self,
        date: NaiveDate,
        offset: i32,
        roll: Roll,
    ) -> Result<NaiveDate, QuantraError> {
        self.ensure_has_business_days()?;
        let mut current = self.roll(date, roll)?;
        for _ in 0..offset.unsigned_abs() {
            current = if offset > 0 {
                self.following(current.succ_opt().ok_or_else(date_overflow)?)?
            } else {
                self.preceding(current.pred_opt().ok_or_else(date_overflow)?)?
            };
        }
        Ok(current)
    }

    /// Count business days in the half-open interval `[begin, end)`.
    ///
    /// Reversed bounds count the reversed interval, negated.
    #[must_use]
    pub fn business_day_count(&self, begin: NaiveDate, end: NaiveDate) -> i64 {
        if begin > end {
            return -self.business_day_count(end, begin);
        }
        begin
            .iter_days()
            .take_while(|d| *d < end)
            .filter(|d| self.is_business_day(*d))
            .count() as i64
    }

    /// All business days from `begin` through `end`, inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::InvalidArg`] when `begin` exceeds `end` or
    /// is not itself a business day.
    pub fn business_date_range(
        &self,
        begin: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>, QuantraError> {
        if begin > end {
            return Err(QuantraError::invalid_arg("begin must be <= end"));
        }
        if !self.is_business_day(begin) {
            return Err(QuantraError::invalid_arg(format!(
                "{begin} is not a business day"
            )));
        }
        Ok(begin
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| self.is_business_day(*d))
            .collect())
    }

    /// The `n` business days ending at `end`, newest first.
    ///
    /// A non-business `end` rolls back to the preceding business day.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::InvalidArg`] when the mask admits no
    /// business days.
    pub fn business_days_before(
        &self,
        end: NaiveDate,
        n: usize,
    ) -> Result<Vec<NaiveDate>, QuantraError> {
        if n == 0 {
            return Ok(Vec::new());
        }
        self.ensure_has_business_days()?;
        let mut current = self.roll(end, Roll::Preceding)?;
        let mut dates = Vec::with_capacity(n);
        for i in 0..n {
            if i > 0 {
                current = self.preceding(current.pred_opt().ok_or_else(date_overflow)?)?;
            }
            dates.push(current);
        }
        Ok(dates)
    }

    /// The `n` business days starting at `begin`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::InvalidArg`] when `begin` is not a business
    /// day or the mask admits no business days.
    pub fn business_days_after(
        &self,
        begin: NaiveDate,
        n: usize,
    ) -> Result<Vec<NaiveDate>, QuantraError> {
        if n == 0 {
            return Ok(Vec::new());
        }
        self.ensure_has_business_days()?;
        let mut current = self.roll(begin, Roll::Raise)?;
        let mut dates = Vec::with_capacity(n);
        for i in 0..n {
            if i > 0 {
                current = self.following(current.succ_opt().ok_or_else(date_overflow)?)?;
            }
            dates.push(current);
        }
        Ok(dates)
    }
}

fn date_overflow() -> QuantraError {
    QuantraError::invalid_arg("date outside the supported range")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, month, day).unwrap()
    }

    #[test]
    fn weekends_are_closed_by_default() {
        let cal = Calendar::default();
        assert!(cal.is_business_day(d(3, 8))); // Monday
        assert!(!cal.is_business_day(d(3, 6))); // Saturday
        assert!(!cal.is_business_day(d(3, 7))); // Sunday
    }

    #[test]
    fn holidays_close_open_weekdays() {
        let cal = Calendar::with_holidays([d(3, 9)]);
        assert!(!cal.is_business_day(d(3, 9))); // Tuesday holiday
        assert!(cal.is_business_day(d(3, 10)));
    }

    #[test]
    fn raise_rejects_weekend_input() {
        let cal = Calendar::default();
        assert!(matches!(
            cal.business_day_offset(d(3, 6), 1, Roll::Raise),
            Err(QuantraError::InvalidArg(_))
        ));
    }

    #[test]
    fn following_and_preceding_roll_over_the_weekend() {
        let cal = Calendar::default();
        assert_eq!(
            cal.business_day_offset(d(3, 6), 0, Roll::Following).unwrap(),
            d(3, 8)
        );
        assert_eq!(
            cal.business_day_offset(d(3, 6), 0, Roll::Preceding).unwrap(),
            d(3, 5)
        );
    }

    #[test]
    fn modified_following_stays_inside_the_month() {
        let cal = Calendar::default();
        // 2021-07-31 is a Saturday; following lands in August.
        assert_eq!(
            cal.business_day_offset(d(7, 31), 0, Roll::ModifiedFollowing)
                .unwrap(),
            d(7, 30)
        );
        // 2021-08-01 is a Sunday; preceding lands in July.
        assert_eq!(
            cal.business_day_offset(d(8, 1), 0, Roll::ModifiedPreceding)
                .unwrap(),
            d(8, 2)
        );
    }

    #[test]
    fn offsets_step_over_weekends_and_holidays() {
        let cal = Calendar::with_holidays([d(3, 9)]);
        assert_eq!(
            cal.business_day_offset(d(3, 8), 1, Roll::Raise).unwrap(),
            d(3, 10)
        );
        assert_eq!(
            cal.business_day_offset(d(3, 12), 1, Roll::Raise).unwrap(),
            d(3, 15)
        );
        assert_eq!(
            cal.business_day_offset(d(3, 10), -1, Roll::Raise).unwrap(),
            d(3, 8)
        );
    }

    #[test]
    fn count_is_half_open_and_sign_reverses() {
        let cal = Calendar::default();
        assert_eq!(cal.business_day_count(d(3, 8), d(3, 13)), 5);
        assert_eq!(cal.business_day_count(d(3, 8), d(3, 8)), 0);
        assert_eq!(cal.business_day_count(d(3, 13), d(3, 8)), -5);
    }

    #[test]
    fn count_skips_holidays() {
        let cal = Calendar::with_holidays([d(3, 9)]);
        assert_eq!(cal.business_day_count(d(3, 8), d(3, 13)), 4);
    }

    #[test]
    fn date_range_is_inclusive() {
        let cal = Calendar::with_holidays([d(3, 9)]);
        assert_eq!(
            cal.business_date_range(d(3, 8), d(3, 12)).unwrap(),
            vec![d(3, 8), d(3, 10), d(3, 11), d(3, 12)]
        );
    }

    #[test]
    fn date_range_rejects_bad_bounds() {
        let cal = Calendar::default();
        assert!(matches!(
            cal.business_date_range(d(3, 12), d(3, 8)),
            Err(QuantraError::InvalidArg(_))
        ));
        assert!(matches!(
            cal.business_date_range(d(3, 6), d(3, 12)),
            Err(QuantraError::InvalidArg(_))
        ));
    }

    #[test]
    fn days_before_descend_from_a_rolled_end() {
        let cal = Calendar::default();
        // 2021-03-13 is a Saturday, rolled back to Friday the 12th.
        assert_eq!(
            cal.business_days_before(d(3, 13), 3).unwrap(),
            vec![d(3, 12), d(3, 11), d(3, 10)]
        );
    }

    #[test]
    fn days_after_ascend_from_begin() {
        let cal = Calendar::default();
        assert_eq!(
            cal.business_days_after(d(3, 11), 3).unwrap(),
            vec![d(3, 11), d(3, 12), d(3, 15)]
        );
        assert!(cal.business_days_after(d(3, 6), 1).is_err());
    }

    #[test]
    fn custom_mask_opens_saturday() {
        let mask = parse_week_mask("1111110").unwrap();
        let cal = Calendar::new(mask, BTreeSet::new());
        assert!(cal.is_business_day(d(3, 6)));
        assert!(!cal.is_business_day(d(3, 7)));
    }

    #[test]
    fn bad_masks_are_rejected() {
        assert!(parse_week_mask("11111").is_err());
        assert!(parse_week_mask("11111x0").is_err());
    }

    #[test]
    fn all_closed_mask_cannot_offset() {
        let cal = Calendar::new([false; 7], BTreeSet::new());
        assert!(matches!(
            cal.business_day_offset(d(3, 8), 1, Roll::Following),
            Err(QuantraError::InvalidArg(_))
        ));
    }
}
