mod common;

use chrono::NaiveDate;
use common::get_provider;
use quantra::{DataQuery, Dataset, Quantra, WindowSpec, stats};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Wire a data provider (mock unless QUANTRA_EXAMPLES_API_URL is set).
    let quantra = Quantra::builder()
        .with_data_provider(get_provider())
        .build()?;

    // 2. Inspect the weather dataset's shape.
    let weather = quantra.dataset(Dataset::WEATHER);
    let definition = weather.definition().await?;
    println!(
        "dataset {} is dimensioned by {:?} over {}",
        definition.id, definition.dimensions.symbol_dimensions, definition.dimensions.time_field
    );

    // 3. Pull raw rows for one city and week.
    let query = DataQuery::range(
        NaiveDate::from_ymd_opt(2021, 3, 1).expect("valid date"),
        NaiveDate::from_ymd_opt(2021, 3, 5).expect("valid date"),
    )
    .with_filter("city", vec!["Boston".to_string()]);
    let rows = weather.get_data(&query).await?;
    println!("{} Boston rows", rows.len());

    // 4. The same data as a date-indexed series, ready for the algebra.
    // A size-only window keeps every date, expanding over the leading edge.
    let temps = weather.get_data_series("maxTemperature", &query).await?;
    let smoothed = stats::mean(&temps, WindowSpec::with_size(3))?;
    for ((date, raw), (_, smooth)) in temps.iter().zip(smoothed.iter()) {
        println!("  {date}  raw {raw:5.1}  3d-mean {smooth:5.2}");
    }

    Ok(())
}
