//! Deadline-wrapped passthroughs to the registered backtest provider.

use std::sync::Arc;
use std::time::Duration;

use quantra_core::{BacktestProvider, QuantraError};
use quantra_types::{Backtest, BacktestQuery, BacktestResult, BacktestRun};
use serde_json::Value;

use crate::core::provider_call_with_timeout;

/// Backtest operations behind the facade's per-call deadline.
///
/// Obtained from [`Quantra::backtests`](crate::Quantra::backtests); cheap to
/// create and to drop. Every method forwards to the registered
/// [`BacktestProvider`] and fails with [`QuantraError::ProviderTimeout`]
/// when the call exceeds the configured deadline.
pub struct BacktestService {
    provider: Arc<dyn BacktestProvider>,
    timeout: Duration,
}

impl std::fmt::Debug for BacktestService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BacktestService")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl BacktestService {
    pub(crate) const fn new(provider: Arc<dyn BacktestProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Backtests matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider fails or the deadline expires.
    pub async fn list(&self, query: &BacktestQuery) -> Result<Vec<Backtest>, QuantraError> {
        provider_call_with_timeout("backtest list", self.timeout, self.provider.list(query)).await
    }

    /// The backtest with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::NotFound`] when no such backtest exists.
    pub async fn get(&self, backtest_id: &str) -> Result<Backtest, QuantraError> {
        provider_call_with_timeout("backtest get", self.timeout, self.provider.get(backtest_id))
            .await
    }

    /// Persist a new backtest, returning the stored copy.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider rejects the definition.
    pub async fn create(&self, backtest: &Backtest) -> Result<Backtest, QuantraError> {
        provider_call_with_timeout(
            "backtest create",
            self.timeout,
            self.provider.create(backtest),
        )
        .await
    }

    /// Replace the backtest with the given id, returning the stored copy.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::NotFound`] when no such backtest exists.
    pub async fn update(
        &self,
        backtest_id: &str,
        backtest: &Backtest,
    ) -> Result<Backtest, QuantraError> {
        provider_call_with_timeout(
            "backtest update",
            self.timeout,
            self.provider.update(backtest_id, backtest),
        )
        .await
    }

    /// Delete the backtest with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::NotFound`] when no such backtest exists.
    pub async fn delete(&self, backtest_id: &str) -> Result<(), QuantraError> {
        provider_call_with_timeout(
            "backtest delete",
            self.timeout,
            self.provider.delete(backtest_id),
        )
        .await
    }

    /// Stored results for the given backtest.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider fails or the deadline expires.
    pub async fn results(&self, backtest_id: &str) -> Result<Vec<BacktestResult>, QuantraError> {
        provider_call_with_timeout(
            "backtest results",
            self.timeout,
            self.provider.results(backtest_id),
        )
        .await
    }

    /// Stored results alongside comparison results for the given backtest.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider fails or the deadline expires.
    pub async fn comparison_results(
        &self,
        backtest_id: &str,
    ) -> Result<(Vec<BacktestResult>, Vec<BacktestResult>), QuantraError> {
        provider_call_with_timeout(
            "backtest comparison results",
            self.timeout,
            self.provider.comparison_results(backtest_id),
        )
        .await
    }

    /// Queue the backtest for recalculation.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider fails or the deadline expires.
    pub async fn schedule(&self, backtest_id: &str) -> Result<(), QuantraError> {
        provider_call_with_timeout(
            "backtest schedule",
            self.timeout,
            self.provider.schedule(backtest_id),
        )
        .await
    }

    /// Calculate a transient backtest without persisting it.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider rejects the definition.
    pub async fn run(&self, backtest: &Backtest) -> Result<BacktestRun, QuantraError> {
        provider_call_with_timeout("backtest run", self.timeout, self.provider.run(backtest)).await
    }

    /// Reference data shared by all backtests.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider fails or the deadline expires.
    pub async fn ref_data(&self) -> Result<Value, QuantraError> {
        provider_call_with_timeout("backtest ref data", self.timeout, self.provider.ref_data())
            .await
    }

    /// Replace the shared reference data.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider fails or the deadline expires.
    pub async fn update_ref_data(&self, ref_data: &Value) -> Result<(), QuantraError> {
        provider_call_with_timeout(
            "backtest ref data update",
            self.timeout,
            self.provider.update_ref_data(ref_data),
        )
        .await
    }
}
