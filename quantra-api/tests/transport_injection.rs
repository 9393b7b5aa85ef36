#![cfg(feature = "test-adapters")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use quantra_api::{BacktestsClient, DataClient, Transport};
use quantra_core::{BacktestProvider, DataProvider, QuantraError};
use quantra_types::{BacktestQuery, CoverageRequest, DataQuery};
use serde_json::json;

#[tokio::test]
async fn query_routes_through_an_injected_transport() {
    let transport = <dyn Transport>::from_fn(|method, path, _query, body| {
        assert_eq!(method, "POST");
        assert_eq!(path, "/data/weather/query");
        assert_eq!(body, Some(json!({})));
        Ok(json!({"data": [{"date": "2021-03-01", "temperature": 41.0}]}))
    });

    let rows = DataClient::from_transport(transport)
        .query("weather", &DataQuery::default())
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value("temperature"), Some(41.0));
}

#[tokio::test]
async fn coverage_pages_with_a_stateful_fake() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let transport = <dyn Transport>::from_fn(move |_method, _path, query, _body| {
        match seen.fetch_add(1, Ordering::SeqCst) {
            0 => {
                assert!(!query.iter().any(|(k, _)| k == "scrollId"));
                Ok(json!({"results": [{"gsid": "1"}], "scrollId": "next"}))
            }
            _ => {
                assert!(query.contains(&("scrollId".to_string(), "next".to_string())));
                Ok(json!({"results": []}))
            }
        }
    });

    let rows = DataClient::from_transport(transport)
        .coverage("uscanfpp_mini", &CoverageRequest::default())
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text("gsid"), Some("1"));
}

#[tokio::test]
async fn delete_dispatches_the_delete_verb() {
    let transport = <dyn Transport>::from_fn(|method, path, _query, body| {
        assert_eq!(
            (method, path.as_str(), body),
            ("DELETE", "/backtests/b-9", None)
        );
        Ok(json!(null))
    });

    BacktestsClient::from_transport(transport)
        .delete("b-9")
        .await
        .unwrap();
}

#[tokio::test]
async fn transport_errors_pass_through_untouched() {
    let transport =
        <dyn Transport>::from_fn(|_, _, _, _| Err(QuantraError::request(503, "backend drain")));

    let err = BacktestsClient::from_transport(transport)
        .list(&BacktestQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(&err, QuantraError::Request { status: 503, .. }));
}

#[tokio::test]
async fn a_missing_envelope_field_is_a_decode_error() {
    let transport = <dyn Transport>::from_fn(|_, _, _, _| Ok(json!({"rows": []})));

    let err = DataClient::from_transport(transport)
        .query("weather", &DataQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(&err, QuantraError::Decode(m) if m.contains("data")));
}
