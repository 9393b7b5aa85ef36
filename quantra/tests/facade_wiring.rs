//! End-to-end facade behavior over the mock providers.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use quantra::{
    BacktestQuery, DataQuery, Dataset, DatasetDefinition, DatasetDimensions, Quantra, QuantraError,
};
use quantra_mock::{DynamicMockProvider, MockBehavior, MockProvider};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn mock_facade() -> Quantra {
    Quantra::builder()
        .with_data_provider(Arc::new(MockProvider::new()))
        .build()
        .expect("facade builds with a provider")
}

fn boston_week() -> DataQuery {
    DataQuery::range(date(2021, 3, 1), date(2021, 3, 5))
        .with_filter("city", vec!["Boston".to_string()])
}

#[test]
fn building_without_a_data_provider_fails() {
    let err = Quantra::builder().build().unwrap_err();
    assert!(matches!(&err, QuantraError::InvalidArg(msg) if msg.contains("no data provider")));
}

#[test]
fn backtests_require_a_registered_provider() {
    let err = mock_facade().backtests().unwrap_err();
    assert!(
        matches!(&err, QuantraError::InvalidArg(msg) if msg.contains("with_backtest_provider"))
    );
}

#[tokio::test]
async fn weather_rows_round_trip_through_the_facade() {
    let quantra = mock_facade();
    let rows = quantra
        .dataset(Dataset::WEATHER)
        .get_data(&boston_week())
        .await
        .unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].text("city"), Some("Boston"));
    assert_eq!(rows[0].value("maxTemperature"), Some(40.1));
}

#[tokio::test]
async fn get_data_series_returns_a_sorted_single_symbol_series() {
    let quantra = mock_facade();
    let series = quantra
        .dataset(Dataset::WEATHER)
        .get_data_series("maxTemperature", &boston_week())
        .await
        .unwrap();
    assert_eq!(series.len(), 5);
    assert!(series.is_strictly_increasing());
    assert_eq!(
        series.values().collect::<Vec<_>>(),
        vec![40.1, 41.3, 38.0, 43.5, 44.2]
    );
}

#[tokio::test]
async fn get_data_series_rejects_rows_spanning_multiple_symbols() {
    let quantra = mock_facade();
    let err = quantra
        .dataset(Dataset::WEATHER)
        .get_data_series(
            "maxTemperature",
            &DataQuery::range(date(2021, 3, 1), date(2021, 3, 5)),
        )
        .await
        .unwrap_err();
    assert!(matches!(&err, QuantraError::InvalidArg(msg) if msg.contains("distinct city")));
}

#[tokio::test]
async fn get_data_series_requires_a_single_symbol_dimension() {
    let (provider, controller) = DynamicMockProvider::new_with_controller();
    controller
        .set_definition_behavior(
            "PAIRS",
            MockBehavior::Return(DatasetDefinition {
                id: "PAIRS".to_string(),
                dimensions: DatasetDimensions {
                    symbol_dimensions: vec!["base".to_string(), "quote".to_string()],
                    time_field: "date".to_string(),
                },
                ..DatasetDefinition::default()
            }),
        )
        .await;
    let quantra = Quantra::builder()
        .with_data_provider(provider)
        .build()
        .unwrap();

    let err = quantra
        .dataset("PAIRS")
        .get_data_series("spread", &DataQuery::default())
        .await
        .unwrap_err();
    let QuantraError::InvalidArg(msg) = &err else {
        panic!("expected InvalidArg, got {err:?}");
    };
    assert!(msg.contains("exactly one symbol dimension"));
}

#[tokio::test]
async fn unknown_datasets_surface_as_invalid_arguments() {
    let quantra = mock_facade();
    let err = quantra.dataset("NOPE").definition().await.unwrap_err();
    assert!(matches!(&err, QuantraError::InvalidArg(msg) if msg.contains("unknown dataset")));
}

#[tokio::test(start_paused = true)]
async fn slow_provider_calls_hit_the_deadline() {
    let quantra = Quantra::builder()
        .with_data_provider(Arc::new(MockProvider::new()))
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = quantra
        .dataset("TIMEOUT")
        .get_data(&DataQuery::default())
        .await
        .unwrap_err();
    let QuantraError::ProviderTimeout { capability } = &err else {
        panic!("expected ProviderTimeout, got {err:?}");
    };
    assert_eq!(capability, "dataset query");
}

#[tokio::test]
async fn backtest_service_forwards_to_the_provider() {
    let mock = Arc::new(MockProvider::new());
    let quantra = Quantra::builder()
        .with_data_provider(mock.clone())
        .with_backtest_provider(mock)
        .build()
        .unwrap();
    let backtests = quantra.backtests().unwrap();

    let all = backtests.list(&BacktestQuery::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let got = backtests.get("bt-momentum-us").await.unwrap();
    assert_eq!(got.name.as_deref(), Some("US Momentum Basket"));

    let (own, comparison) = backtests.comparison_results("bt-momentum-us").await.unwrap();
    assert_eq!(own.len(), 3);
    assert_eq!(comparison.len(), 3);

    let missing = backtests.get("ghost").await.unwrap_err();
    assert!(matches!(&missing, QuantraError::NotFound { what } if what.contains("ghost")));
}
