use quantra_types::{Backtest, BacktestResult, BacktestRun};
use serde_json::{Value, json};

pub fn all() -> Vec<Backtest> {
    vec![
        backtest(json!({
            "id": "bt-momentum-us",
            "name": "US Momentum Basket",
            "ownerId": "user-1",
            "mqSymbol": "MQA0001",
            "status": "Live",
        })),
        backtest(json!({
            "id": "bt-vol-carry",
            "name": "Vol Carry",
            "ownerId": "user-2",
            "mqSymbol": "MQA0002",
            "status": "Draft",
        })),
    ]
}

pub fn results(backtest_id: &str) -> Vec<BacktestResult> {
    let rows: &[(&str, f64)] = match backtest_id {
        "bt-momentum-us" => &[
            ("2021-03-01", 0.012),
            ("2021-03-02", -0.004),
            ("2021-03-03", 0.007),
        ],
        "bt-vol-carry" => &[("2021-03-01", 0.003), ("2021-03-02", 0.001)],
        _ => &[],
    };
    rows.iter()
        .map(|(date, pnl)| result(json!({"id": backtest_id, "date": date, "pnl": pnl})))
        .collect()
}

pub fn comparison() -> Vec<BacktestResult> {
    [("2021-03-01", 0.008), ("2021-03-02", -0.002), ("2021-03-03", 0.005)]
        .into_iter()
        .map(|(date, pnl)| result(json!({"id": "SPX", "date": date, "pnl": pnl})))
        .collect()
}

pub fn run() -> BacktestRun {
    serde_json::from_value(json!({
        "Data": [
            {"date": "2021-03-01", "pnl": 0.012, "cumulative": 0.012},
            {"date": "2021-03-02", "pnl": -0.004, "cumulative": 0.008},
        ],
        "RiskData": [
            {"date": "2021-03-01", "var": 0.021},
            {"date": "2021-03-02", "var": 0.019},
        ],
    }))
    .unwrap()
}

pub fn ref_data() -> Value {
    json!({
        "currencies": ["USD", "EUR", "GBP"],
        "volatilityTypes": ["implied", "realized"],
        "hedgeFrequencies": ["Daily", "Weekly", "Monthly"],
    })
}

fn backtest(value: Value) -> Backtest {
    serde_json::from_value(value).unwrap()
}

fn result(value: Value) -> BacktestResult {
    serde_json::from_value(value).unwrap()
}
