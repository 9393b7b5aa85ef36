use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use async_trait::async_trait;
use quantra_core::{BacktestProvider, DataProvider, QuantraError};
use quantra_types::{
    Backtest, BacktestQuery, BacktestResult, BacktestRun, CoverageRequest, DataQuery, DataRow,
    DatasetDefinition,
};
use serde_json::Value;

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockProvider, MockBehavior};

/// Mock provider for CI-safe examples. Serves deterministic rows from static fixtures.
pub struct MockProvider;

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn unknown_dataset(dataset_id: &str) -> QuantraError {
        QuantraError::invalid_arg(format!("unknown dataset {dataset_id}"))
    }

    async fn maybe_fail_or_stall(
        dataset_id: &str,
        capability: &'static str,
    ) -> Result<(), QuantraError> {
        match dataset_id {
            "FAIL" => Err(QuantraError::Other(format!(
                "forced failure: {capability}"
            ))),
            "TIMEOUT" => {
                // Kept short to avoid slowing tests; long enough for a tight
                // caller deadline to expire first.
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

fn within_range(row: &DataRow, query: &DataQuery) -> bool {
    let Some(date) = row.date else {
        return query.start_date.is_none() && query.end_date.is_none();
    };
    if let Some(start) = query.start_date
        && date < start
    {
        return false;
    }
    if let Some(end) = query.end_date
        && date > end
    {
        return false;
    }
    true
}

fn within_as_of(row: &DataRow, query: &DataQuery) -> bool {
    match (row.date, query.as_of_date) {
        (Some(date), Some(as_of)) => date <= as_of,
        _ => true,
    }
}

fn matches_filters(row: &DataRow, query: &DataQuery) -> bool {
    query.filters.iter().all(|(key, want)| {
        let Some(have) = row.fields.get(key) else {
            return false;
        };
        match want {
            Value::Array(options) => options.contains(have),
            other => have == other,
        }
    })
}

fn project(mut row: DataRow, fields: Option<&Vec<String>>) -> DataRow {
    if let Some(fields) = fields {
        row.fields.retain(|key, _| fields.iter().any(|f| f == key));
    }
    row
}

#[async_trait]
impl DataProvider for MockProvider {
    async fn query(
        &self,
        dataset_id: &str,
        query: &DataQuery,
    ) -> Result<Vec<DataRow>, QuantraError> {
        Self::maybe_fail_or_stall(dataset_id, "query").await?;
        let rows = fixtures::datasets::rows(dataset_id)
            .ok_or_else(|| Self::unknown_dataset(dataset_id))?;
        Ok(rows
            .into_iter()
            .filter(|row| within_range(row, query) && matches_filters(row, query))
            .map(|row| project(row, query.fields.as_ref()))
            .collect())
    }

    async fn query_last(
        &self,
        dataset_id: &str,
        query: &DataQuery,
    ) -> Result<Vec<DataRow>, QuantraError> {
        Self::maybe_fail_or_stall(dataset_id, "query_last").await?;
        let definition = fixtures::datasets::definition(dataset_id)
            .ok_or_else(|| Self::unknown_dataset(dataset_id))?;
        let rows = fixtures::datasets::rows(dataset_id)
            .ok_or_else(|| Self::unknown_dataset(dataset_id))?;

        // One row per symbol combination: the latest at or before the as-of date.
        let mut latest: BTreeMap<Vec<String>, DataRow> = BTreeMap::new();
        for row in rows
            .into_iter()
            .filter(|row| matches_filters(row, query) && within_as_of(row, query))
        {
            let key: Vec<String> = definition
                .dimensions
                .symbol_dimensions
                .iter()
                .map(|dim| {
                    row.fields
                        .get(dim)
                        .map(ToString::to_string)
                        .unwrap_or_default()
                })
                .collect();
            match latest.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(row);
                }
                Entry::Occupied(mut slot) if row.date > slot.get().date => {
                    slot.insert(row);
                }
                Entry::Occupied(_) => {}
            }
        }
        Ok(latest
            .into_values()
            .map(|row| project(row, query.fields.as_ref()))
            .collect())
    }

    async fn coverage(
        &self,
        dataset_id: &str,
        request: &CoverageRequest,
    ) -> Result<Vec<DataRow>, QuantraError> {
        Self::maybe_fail_or_stall(dataset_id, "coverage").await?;
        let mut rows = fixtures::datasets::coverage(dataset_id)
            .ok_or_else(|| Self::unknown_dataset(dataset_id))?;
        rows.truncate(request.limit);
        Ok(rows)
    }

    async fn definition(&self, dataset_id: &str) -> Result<DatasetDefinition, QuantraError> {
        fixtures::datasets::definition(dataset_id).ok_or_else(|| Self::unknown_dataset(dataset_id))
    }
}

#[async_trait]
impl BacktestProvider for MockProvider {
    async fn list(&self, query: &BacktestQuery) -> Result<Vec<Backtest>, QuantraError> {
        let mut list: Vec<Backtest> = fixtures::backtests::all()
            .into_iter()
            .filter(|b| {
                query.id.as_ref().is_none_or(|id| b.id.as_ref() == Some(id))
                    && query
                        .owner_id
                        .as_ref()
                        .is_none_or(|owner| b.owner_id.as_ref() == Some(owner))
                    && query
                        .name
                        .as_ref()
                        .is_none_or(|name| b.name.as_ref() == Some(name))
                    && query
                        .mq_symbol
                        .as_ref()
                        .is_none_or(|symbol| b.mq_symbol.as_ref() == Some(symbol))
            })
            .collect();
        list.truncate(query.limit);
        Ok(list)
    }

    async fn get(&self, backtest_id: &str) -> Result<Backtest, QuantraError> {
        fixtures::backtests::all()
            .into_iter()
            .find(|b| b.id.as_deref() == Some(backtest_id))
            .ok_or_else(|| QuantraError::not_found(format!("backtest {backtest_id}")))
    }

    async fn create(&self, backtest: &Backtest) -> Result<Backtest, QuantraError> {
        let mut stored = backtest.clone();
        stored.id.get_or_insert_with(|| "bt-new".to_string());
        Ok(stored)
    }

    async fn update(
        &self,
        backtest_id: &str,
        backtest: &Backtest,
    ) -> Result<Backtest, QuantraError> {
        self.get(backtest_id).await?;
        let mut stored = backtest.clone();
        stored.id = Some(backtest_id.to_string());
        Ok(stored)
    }

    async fn delete(&self, backtest_id: &str) -> Result<(), QuantraError> {
        self.get(backtest_id).await.map(|_| ())
    }

    async fn results(&self, backtest_id: &str) -> Result<Vec<BacktestResult>, QuantraError> {
        self.get(backtest_id).await?;
        Ok(fixtures::backtests::results(backtest_id))
    }

    async fn comparison_results(
        &self,
        backtest_id: &str,
    ) -> Result<(Vec<BacktestResult>, Vec<BacktestResult>), QuantraError> {
        self.get(backtest_id).await?;
        Ok((
            fixtures::backtests::results(backtest_id),
            fixtures::backtests::comparison(),
        ))
    }

    async fn schedule(&self, backtest_id: &str) -> Result<(), QuantraError> {
        self.get(backtest_id).await.map(|_| ())
    }

    async fn run(&self, _backtest: &Backtest) -> Result<BacktestRun, QuantraError> {
        Ok(fixtures::backtests::run())
    }

    async fn ref_data(&self) -> Result<Value, QuantraError> {
        Ok(fixtures::backtests::ref_data())
    }

    async fn update_ref_data(&self, _ref_data: &Value) -> Result<(), QuantraError> {
        // Stateless mock: accepted and discarded.
        Ok(())
    }
}
