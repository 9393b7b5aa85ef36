//! Dataset query, coverage, and definition client.

use std::sync::Arc;

use async_trait::async_trait;
use quantra_core::{DataProvider, QuantraError};
use quantra_types::{ApiConfig, CoverageRequest, DataQuery, DataRow, DatasetDefinition};
use serde_json::Value;

use crate::TransportArc;
use crate::transport::{HttpTransport, Transport, take_field};

/// REST client for the `/data` service.
///
/// Implements [`DataProvider`] for the read paths and adds the write paths
/// (dataset creation, definition updates, row uploads) as inherent methods.
pub struct DataClient {
    transport: TransportArc,
}

impl DataClient {
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

    /// Create a dataset, returning the stored definition.
    ///
    /// # Errors
    ///
    /// Returns an error when the service rejects the definition.
    pub async fn create_dataset(
        &self,
        definition: &DatasetDefinition,
    ) -> Result<DatasetDefinition, QuantraError> {
        let body = serde_json::to_value(definition)?;
        let response = self.transport.post("/data/datasets", Some(&body)).await?;
        Ok(serde_json::from_value(response)?)
    }

    /// Replace the definition of `dataset_id`, returning the stored copy.
    ///
    /// # Errors
    ///
    /// Returns an error when the dataset is unknown or the service rejects
    /// the definition.
    pub async fn update_definition(
        &self,
        dataset_id: &str,
        definition: &DatasetDefinition,
    ) -> Result<DatasetDefinition, QuantraError> {
        let body = serde_json::to_value(definition)?;
        let response = self
            .transport
            .put(&format!("/data/datasets/{dataset_id}"), &body)
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    /// Upload rows into `dataset_id`, returning the service's ingest
    /// summary.
    ///
    /// # Errors
    ///
    /// Returns an error when the service rejects the rows.
    pub async fn upload(&self, dataset_id: &str, rows: &[DataRow]) -> Result<Value, QuantraError> {
        let body = serde_json::to_value(rows)?;
        self.transport
            .post(&format!("/data/{dataset_id}"), Some(&body))
            .await
    }
}

#[async_trait]
impl DataProvider for DataClient {
    async fn query(
        &self,
        dataset_id: &str,
        query: &DataQuery,
    ) -> Result<Vec<DataRow>, QuantraError> {
        let body = serde_json::to_value(query)?;
        let mut response = self
            .transport
            .post(&format!("/data/{dataset_id}/query"), Some(&body))
            .await?;
        Ok(serde_json::from_value(take_field(&mut response, "data")?)?)
    }

    async fn query_last(
        &self,
        dataset_id: &str,
        query: &DataQuery,
    ) -> Result<Vec<DataRow>, QuantraError> {
        let body = serde_json::to_value(query)?;
        let mut response = self
            .transport
            .post(&format!("/data/{dataset_id}/last/query"), Some(&body))
            .await?;
        Ok(serde_json::from_value(take_field(&mut response, "data")?)?)
    }

    async fn coverage(
        &self,
        dataset_id: &str,
        request: &CoverageRequest,
    ) -> Result<Vec<DataRow>, QuantraError> {
        let path = format!("/data/{dataset_id}/coverage");
        let mut rows: Vec<DataRow> = Vec::new();
        let mut scroll_id = request.scroll_id.clone();

        // Pages are scrolled until the service returns an empty page or
        // stops handing back a scroll id.
        loop {
            let mut query: Vec<(&str, String)> = vec![
                ("scroll", request.scroll.clone()),
                ("limit", request.limit.to_string()),
            ];
            if let Some(id) = &scroll_id {
                query.push(("scrollId", id.clone()));
            }
            if let Some(offset) = request.offset {
                query.push(("offset", offset.to_string()));
            }
            if let Some(fields) = &request.fields {
                for field in fields {
                    query.push(("fields", field.clone()));
                }
            }

            let mut response = self.transport.get(&path, &query).await?;
            let page: Vec<DataRow> = serde_json::from_value(take_field(&mut response, "results")?)?;
            if page.is_empty() {
                break;
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(dataset = dataset_id, page_len = page.len(), "coverage page");
            rows.extend(page);

            match response.get("scrollId").and_then(Value::as_str) {
                Some(id) => scroll_id = Some(id.to_string()),
                None => break,
            }
        }
        Ok(rows)
    }

    async fn definition(&self, dataset_id: &str) -> Result<DatasetDefinition, QuantraError> {
        let response = self
            .transport
            .get(&format!("/data/datasets/{dataset_id}"), &[])
            .await;
        match response {
            Ok(value) => Ok(serde_json::from_value(value)?),
            Err(QuantraError::NotFound { .. }) => Err(QuantraError::invalid_arg(format!(
                "unknown dataset {dataset_id}"
            ))),
            Err(e) => Err(e),
        }
    }
}
