mod common;

use chrono::NaiveDate;
use common::get_provider;
use quantra::{Quantra, Roll};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let quantra = Quantra::builder()
        .with_data_provider(get_provider())
        .build()?;

    // 1. Resolve a calendar for NYSE; the holiday data comes from the
    //    provider and is cached for repeat lookups.
    let nyse = quantra.calendars().resolve(&["NYSE"]).await?;

    // 2. Good Friday 2021: the preceding Thursday plus one business day
    //    lands on the following Monday.
    let thursday = NaiveDate::from_ymd_opt(2021, 4, 1).expect("valid date");
    let next = nyse.business_day_offset(thursday, 1, Roll::Raise)?;
    println!("{thursday} + 1 NYSE business day = {next}");

    // 3. Counting trading days over the same stretch.
    let end = NaiveDate::from_ymd_opt(2021, 4, 9).expect("valid date");
    println!(
        "{} NYSE trading days in [{thursday}, {end})",
        nyse.business_day_count(thursday, end)
    );

    // 4. A joint NYSE+LSE calendar closes on either exchange's holiday.
    let joint = quantra.calendars().resolve(&["NYSE", "LSE"]).await?;
    let spring_holiday = NaiveDate::from_ymd_opt(2021, 5, 31).expect("valid date");
    println!(
        "{spring_holiday} open on the joint calendar: {}",
        joint.is_business_day(spring_holiday)
    );

    Ok(())
}
