//! Calendar components of a series' date index, as series themselves.

use chrono::Datelike;

use super::series::TimeSeries;

fn component(x: &TimeSeries, f: impl Fn(chrono::NaiveDate) -> f64) -> TimeSeries {
    x.iter().map(|(d, _)| (d, f(d))).collect()
}

/// Day of month (1..=31) for each entry.
#[must_use]
pub fn day(x: &TimeSeries) -> TimeSeries {
    component(x, |d| f64::from(d.day()))
}

/// Month of year (1..=12) for each entry.
#[must_use]
pub fn month(x: &TimeSeries) -> TimeSeries {
    component(x, |d| f64::from(d.month()))
}

/// Calendar year for each entry.
#[must_use]
pub fn year(x: &TimeSeries) -> TimeSeries {
    component(x, |d| f64::from(d.year()))
}

/// Quarter of year (1..=4) for each entry.
#[must_use]
pub fn quarter(x: &TimeSeries) -> TimeSeries {
    component(x, |d| f64::from((d.month() - 1) / 3 + 1))
}

/// Day of week for each entry, with Monday as 0 through Sunday as 6.
#[must_use]
pub fn weekday(x: &TimeSeries) -> TimeSeries {
    component(x, |d| f64::from(d.weekday().num_days_from_monday()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn components_track_the_index() {
        // 2021-03-31 was a Wednesday.
        let date = NaiveDate::from_ymd_opt(2021, 3, 31).unwrap();
        let x = TimeSeries::new(vec![(date, 42.0)]);

        assert_eq!(day(&x).values().next(), Some(31.0));
        assert_eq!(month(&x).values().next(), Some(3.0));
        assert_eq!(year(&x).values().next(), Some(2021.0));
        assert_eq!(quarter(&x).values().next(), Some(1.0));
        assert_eq!(weekday(&x).values().next(), Some(2.0));
    }

    #[test]
    fn quarter_boundaries() {
        let dates = [
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2021, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2021, 9, 30).unwrap(),
            NaiveDate::from_ymd_opt(2021, 12, 31).unwrap(),
        ];
        let x = TimeSeries::constant(dates, 0.0);
        let got: Vec<f64> = quarter(&x).values().collect();
        assert_eq!(got, vec![1.0, 2.0, 3.0, 4.0]);
    }
}
