use quantra_types::{DataRow, DatasetDefinition, DatasetDimensions};
use serde_json::{Value, json};

pub fn rows(dataset_id: &str) -> Option<Vec<DataRow>> {
    match dataset_id {
        "WEATHER" => Some(weather()),
        "HOLIDAY" => Some(holidays()),
        "USCANFPP_MINI" => Some(fundamentals()),
        "TREOD" => Some(prices()),
        _ => None,
    }
}

pub fn definition(dataset_id: &str) -> Option<DatasetDefinition> {
    let (symbol_dimensions, time_field) = match dataset_id {
        "WEATHER" => (vec!["city"], "date"),
        "HOLIDAY" => (vec!["exchange"], "date"),
        "USCANFPP_MINI" => (vec!["gsid"], "date"),
        "TREOD" => (vec!["assetId"], "date"),
        _ => return None,
    };
    Some(DatasetDefinition {
        id: dataset_id.to_string(),
        dimensions: DatasetDimensions {
            symbol_dimensions: symbol_dimensions.into_iter().map(str::to_string).collect(),
            time_field: time_field.to_string(),
        },
        ..DatasetDefinition::default()
    })
}

pub fn coverage(dataset_id: &str) -> Option<Vec<DataRow>> {
    match dataset_id {
        "WEATHER" => Some(vec![
            row(json!({"city": "Austin"})),
            row(json!({"city": "Boston"})),
        ]),
        "HOLIDAY" => Some(vec![
            row(json!({"exchange": "LSE"})),
            row(json!({"exchange": "NYSE"})),
        ]),
        "USCANFPP_MINI" => Some(vec![
            row(json!({"gsid": "75154", "ticker": "AVY", "name": "Avery Dennison Corp"})),
            row(json!({"gsid": "193067", "ticker": "BAH", "name": "Booz Allen Hamilton"})),
            row(json!({"gsid": "895082", "ticker": "NOW", "name": "ServiceNow Inc"})),
        ]),
        "TREOD" => Some(vec![
            row(json!({"assetId": "MAXW87PCS9HSTCTJ", "bbid": "SPX"})),
        ]),
        _ => None,
    }
}

fn row(value: Value) -> DataRow {
    serde_json::from_value(value).unwrap()
}

fn weather() -> Vec<DataRow> {
    [
        ("2021-03-01", "Boston", 40.1, 0.0),
        ("2021-03-02", "Boston", 41.3, 0.2),
        ("2021-03-03", "Boston", 38.0, 1.1),
        ("2021-03-04", "Boston", 43.5, 0.0),
        ("2021-03-05", "Boston", 44.2, 0.0),
        ("2021-03-01", "Austin", 62.5, 0.0),
        ("2021-03-02", "Austin", 64.0, 0.0),
        ("2021-03-03", "Austin", 66.2, 0.3),
        ("2021-03-04", "Austin", 61.8, 0.0),
        ("2021-03-05", "Austin", 63.9, 0.1),
    ]
    .into_iter()
    .map(|(date, city, max_temperature, precipitation)| {
        row(json!({
            "date": date,
            "city": city,
            "maxTemperature": max_temperature,
            "precipitation": precipitation,
        }))
    })
    .collect()
}

fn holidays() -> Vec<DataRow> {
    [
        ("2021-01-01", "NYSE", "New Year's Day"),
        ("2021-01-18", "NYSE", "Martin Luther King Jr. Day"),
        ("2021-02-15", "NYSE", "Presidents' Day"),
        ("2021-04-02", "NYSE", "Good Friday"),
        ("2021-05-31", "NYSE", "Memorial Day"),
        ("2021-07-05", "NYSE", "Independence Day (Observed)"),
        ("2021-09-06", "NYSE", "Labor Day"),
        ("2021-11-25", "NYSE", "Thanksgiving Day"),
        ("2021-12-24", "NYSE", "Christmas Day (Observed)"),
        ("2021-01-01", "LSE", "New Year's Day"),
        ("2021-04-02", "LSE", "Good Friday"),
        ("2021-04-05", "LSE", "Easter Monday"),
        ("2021-05-03", "LSE", "Early May Bank Holiday"),
        ("2021-05-31", "LSE", "Spring Bank Holiday"),
        ("2021-08-30", "LSE", "Summer Bank Holiday"),
        ("2021-12-27", "LSE", "Christmas Day (Substitute)"),
        ("2021-12-28", "LSE", "Boxing Day (Substitute)"),
    ]
    .into_iter()
    .map(|(date, exchange, description)| {
        row(json!({
            "date": date,
            "exchange": exchange,
            "description": description,
        }))
    })
    .collect()
}

fn fundamentals() -> Vec<DataRow> {
    [
        ("2021-01-04", "75154", 0.42, 0.81, 0.61, 0.55),
        ("2021-01-05", "75154", 0.43, 0.80, 0.62, 0.54),
        ("2021-01-06", "75154", 0.44, 0.82, 0.63, 0.56),
        ("2021-01-04", "193067", 0.71, 0.52, 0.64, 0.48),
        ("2021-01-05", "193067", 0.70, 0.53, 0.63, 0.47),
        ("2021-01-06", "193067", 0.72, 0.51, 0.65, 0.49),
        ("2021-01-04", "895082", 0.38, 0.93, 0.69, 0.77),
        ("2021-01-05", "895082", 0.37, 0.94, 0.68, 0.78),
        ("2021-01-06", "895082", 0.39, 0.92, 0.70, 0.76),
    ]
    .into_iter()
    .map(|(date, gsid, financial_returns, growth, integrated, multiple)| {
        row(json!({
            "date": date,
            "gsid": gsid,
            "financialReturnsScore": financial_returns,
            "growthScore": growth,
            "integratedScore": integrated,
            "multipleScore": multiple,
        }))
    })
    .collect()
}

fn prices() -> Vec<DataRow> {
    [
        ("2021-03-01", 3901.82, 3842.51),
        ("2021-03-02", 3870.29, 3903.64),
        ("2021-03-03", 3819.72, 3863.99),
        ("2021-03-04", 3768.47, 3818.53),
        ("2021-03-05", 3841.94, 3793.58),
    ]
    .into_iter()
    .map(|(date, close_price, open_price)| {
        row(json!({
            "date": date,
            "assetId": "MAXW87PCS9HSTCTJ",
            "bbid": "SPX",
            "closePrice": close_price,
            "openPrice": open_price,
        }))
    })
    .collect()
}
