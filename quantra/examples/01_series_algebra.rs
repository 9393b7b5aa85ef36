use chrono::{Datelike, NaiveDate};
use quantra::{AlignMethod, TimeSeries, add, divide, filter_values, stats};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Two daily temperature series; Austin is missing the mid-week day.
    let start = NaiveDate::from_ymd_opt(2021, 3, 1).expect("valid date");
    let boston = TimeSeries::from_daily(start, [40.1, 41.3, 38.0, 43.5, 44.2]);
    let austin: TimeSeries = boston
        .dates()
        .zip([62.5, 64.0, 66.2, 61.8, 63.9])
        .filter(|(date, _)| date.day() != 3)
        .collect();

    // 2. Pointwise sum under step alignment: the missing Austin day carries
    //    the previous observation forward.
    let total = add(&boston, &austin, AlignMethod::Step)
        .into_series()
        .expect("series inputs produce a series");
    println!("step-aligned sum:");
    for (date, value) in total.iter() {
        println!("  {date}  {value:6.1}");
    }

    // 3. Intersection instead keeps only the shared dates.
    let shared = add(&boston, &austin, AlignMethod::Intersect)
        .into_series()
        .expect("series inputs produce a series");
    println!("intersection keeps {} of {} days", shared.len(), boston.len());

    // 4. NaN alignment marks the gap; filtering with no operator drops the
    //    markers again.
    let sparse = divide(&austin, &boston, AlignMethod::Nan)
        .into_series()
        .expect("series inputs produce a series");
    let dense = filter_values(&sparse, None, None)?;
    println!("ratio has {} observed days of {}", dense.len(), sparse.len());

    // 5. A 3-day rolling mean over the summed series.
    let smoothed = stats::mean(&total, 3)?;
    println!("3-day rolling mean:");
    for (date, value) in smoothed.iter() {
        println!("  {date}  {value:6.2}");
    }

    Ok(())
}
