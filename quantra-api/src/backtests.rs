//! Backtest CRUD, results, and calculation client.

use std::sync::Arc;

use async_trait::async_trait;
use quantra_core::{BacktestProvider, QuantraError};
use quantra_types::{ApiConfig, Backtest, BacktestQuery, BacktestResult, BacktestRun};
use serde_json::Value;

use crate::TransportArc;
use crate::transport::{HttpTransport, Transport, take_field};

/// REST client for the `/backtests` service.
pub struct BacktestsClient {
    transport: TransportArc,
}

impl BacktestsClient {
    /// Build against the production HTTP transport described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: ApiConfig) -> Result<Self, QuantraError> {
        Ok(Self {
            transport: Arc::new(HttpTransport::new(config)?),
        })
    }

    /// Build from a shared transport handle (tests/injection).
    #[cfg(feature = "test-adapters")]
    #[must_use]
    pub fn from_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Build from a shared production transport.
    #[cfg(not(feature = "test-adapters"))]
    #[must_use]
    pub fn from_transport(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    async fn results_page(&self, backtest_id: &str) -> Result<Value, QuantraError> {
        self.transport
            .get("/backtests/results", &[("id", backtest_id.to_string())])
            .await
    }
}

#[async_trait]
impl BacktestProvider for BacktestsClient {
    async fn list(&self, query: &BacktestQuery) -> Result<Vec<Backtest>, QuantraError> {
        let mut params: Vec<(&str, String)> = vec![("limit", query.limit.to_string())];
        if let Some(id) = &query.id {
            params.push(("id", id.clone()));
        }
        if let Some(owner_id) = &query.owner_id {
            params.push(("ownerId", owner_id.clone()));
        }
        if let Some(name) = &query.name {
            params.push(("name", name.clone()));
        }
        if let Some(mq_symbol) = &query.mq_symbol {
            params.push(("mqSymbol", mq_symbol.clone()));
        }
        let mut response = self.transport.get("/backtests", &params).await?;
        Ok(serde_json::from_value(take_field(
            &mut response,
            "results",
        )?)?)
    }

    async fn get(&self, backtest_id: &str) -> Result<Backtest, QuantraError> {
        let response = self
            .transport
            .get(&format!("/backtests/{backtest_id}"), &[])
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    async fn create(&self, backtest: &Backtest) -> Result<Backtest, QuantraError> {
        let body = serde_json::to_value(backtest)?;
        let response = self.transport.post("/backtests", Some(&body)).await?;
        Ok(serde_json::from_value(response)?)
    }

    async fn update(
        &self,
        backtest_id: &str,
        backtest: &Backtest,
    ) -> Result<Backtest, QuantraError> {
        let body = serde_json::to_value(backtest)?;
        let response = self
            .transport
            .put(&format!("/backtests/{backtest_id}"), &body)
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    async fn delete(&self, backtest_id: &str) -> Result<(), QuantraError> {
        self.transport
            .delete(&format!("/backtests/{backtest_id}"))
            .await?;
        Ok(())
    }

    async fn results(&self, backtest_id: &str) -> Result<Vec<BacktestResult>, QuantraError> {
        let mut response = self.results_page(backtest_id).await?;
        Ok(serde_json::from_value(take_field(
            &mut response,
            "backtestResults",
        )?)?)
    }

    async fn comparison_results(
        &self,
        backtest_id: &str,
    ) -> Result<(Vec<BacktestResult>, Vec<BacktestResult>), QuantraError> {
        let mut response = self.results_page(backtest_id).await?;
        let own = serde_json::from_value(take_field(&mut response, "backtestResults")?)?;
        let comparison = serde_json::from_value(take_field(&mut response, "comparisonResults")?)?;
        Ok((own, comparison))
    }

    async fn schedule(&self, backtest_id: &str) -> Result<(), QuantraError> {
        self.transport
            .post(&format!("/backtests/{backtest_id}/schedule"), None)
            .await?;
        Ok(())
    }

    async fn run(&self, backtest: &Backtest) -> Result<BacktestRun, QuantraError> {
        let body = serde_json::to_value(backtest)?;
        let response = self
            .transport
            .post("/backtests/calculate", Some(&body))
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    async fn ref_data(&self) -> Result<Value, QuantraError> {
        self.transport.get("/backtests/refData", &[]).await
    }

    async fn update_ref_data(&self, ref_data: &Value) -> Result<(), QuantraError> {
        self.transport.put("/backtests/refData", ref_data).await?;
        Ok(())
    }
}
