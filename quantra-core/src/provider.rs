//! Provider roles the facade is wired against.
//!
//! Implementations back these seams with a remote service, a mock, or a
//! recorded fixture. All methods are async and implementations must be
//! shareable across tasks.

use async_trait::async_trait;
use serde_json::Value;

use quantra_types::{
    Backtest, BacktestQuery, BacktestResult, BacktestRun, CoverageRequest, DataQuery, DataRow,
    DatasetDefinition, QuantraError,
};

/// Serves dataset rows, coverage, and definitions.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Rows of `dataset_id` matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error when the dataset is unknown or the backend fails.
    async fn query(
        &self,
        dataset_id: &str,
        query: &DataQuery,
    ) -> Result<Vec<DataRow>, QuantraError>;

    /// Most recent rows of `dataset_id` at the query's as-of date.
    ///
    /// # Errors
    ///
    /// Returns an error when the dataset is unknown or the backend fails.
    async fn query_last(
        &self,
        dataset_id: &str,
        query: &DataQuery,
    ) -> Result<Vec<DataRow>, QuantraError>;

    /// Coverage rows describing the symbols available in `dataset_id`.
    ///
    /// # Errors
    ///
    /// Returns an error when the dataset is unknown or the backend fails.
    async fn coverage(
        &self,
        dataset_id: &str,
        request: &CoverageRequest,
    ) -> Result<Vec<DataRow>, QuantraError>;

    /// Definition of `dataset_id`: its dimensions and parameters.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::InvalidArg`] for an unknown dataset.
    async fn definition(&self, dataset_id: &str) -> Result<DatasetDefinition, QuantraError>;
}

/// Manages backtest definitions and their computed results.
#[async_trait]
pub trait BacktestProvider: Send + Sync {
    /// Backtests matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend fails.
    async fn list(&self, query: &BacktestQuery) -> Result<Vec<Backtest>, QuantraError>;

    /// The backtest with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::NotFound`] when no such backtest exists.
    async fn get(&self, backtest_id: &str) -> Result<Backtest, QuantraError>;

    /// Persist a new backtest, returning the stored copy.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend rejects the definition.
    async fn create(&self, backtest: &Backtest) -> Result<Backtest, QuantraError>;

    /// Replace the backtest with the given id, returning the stored copy.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::NotFound`] when no such backtest exists.
    async fn update(
        &self,
        backtest_id: &str,
        backtest: &Backtest,
    ) -> Result<Backtest, QuantraError>;

    /// Delete the backtest with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::NotFound`] when no such backtest exists.
    async fn delete(&self, backtest_id: &str) -> Result<(), QuantraError>;

    /// Stored results for the given backtest.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend fails.
    async fn results(&self, backtest_id: &str) -> Result<Vec<BacktestResult>, QuantraError>;

    /// Stored results alongside comparison results for the given backtest.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend fails.
    async fn comparison_results(
        &self,
        backtest_id: &str,
    ) -> Result<(Vec<BacktestResult>, Vec<BacktestResult>), QuantraError>;

    /// Queue the backtest for recalculation.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend fails.
    async fn schedule(&self, backtest_id: &str) -> Result<(), QuantraError>;

    /// Calculate a transient backtest without persisting it.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend rejects the definition.
    async fn run(&self, backtest: &Backtest) -> Result<BacktestRun, QuantraError>;

    /// Reference data shared by all backtests.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend fails.
    async fn ref_data(&self) -> Result<Value, QuantraError>;

    /// Replace the shared reference data.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend fails.
    async fn update_ref_data(&self, ref_data: &Value) -> Result<(), QuantraError>;
}
