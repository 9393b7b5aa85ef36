mod common;

use chrono::NaiveDate;
use common::get_provider;
use quantra::{DataQuery, Dataset, Quantra};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,quantra=trace,quantra_api=trace
    // (build with the `tracing` feature enabled to emit facade spans)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    // Wire a provider (mock unless QUANTRA_EXAMPLES_API_URL is set).
    let quantra = Quantra::builder()
        .with_data_provider(get_provider())
        .build()?;

    // Dataset definition
    let weather = quantra.dataset(Dataset::WEATHER);
    let _ = weather.definition().await?;

    // Raw rows for one week
    let query = DataQuery::range(
        NaiveDate::from_ymd_opt(2021, 3, 1).expect("valid date"),
        NaiveDate::from_ymd_opt(2021, 3, 5).expect("valid date"),
    );
    let _ = weather.get_data(&query).await?;

    // Calendar resolution (cached after the first call)
    let _ = quantra.calendars().resolve(&["NYSE"]).await?;

    Ok(())
}
