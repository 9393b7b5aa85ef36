//! Per-dataset handles over the shared data provider.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use quantra_core::{DataProvider, QuantraError, TimeSeries};
use quantra_types::{CoverageRequest, DataQuery, DataRow, DatasetDefinition};

use crate::core::provider_call_with_timeout;

/// Handle on one dataset.
///
/// Obtained from [`Quantra::dataset`](crate::Quantra::dataset). The handle
/// clones the shared provider `Arc`, so it holds no connection state and
/// stays valid after the facade is dropped.
pub struct Dataset {
    provider: Arc<dyn DataProvider>,
    id: String,
    timeout: Duration,
}

impl Dataset {
    /// Exchange holiday calendar, dimensioned by `exchange`.
    pub const HOLIDAY: &'static str = "HOLIDAY";
    /// Daily weather observations, dimensioned by `city`.
    pub const WEATHER: &'static str = "WEATHER";
    /// US/Canada fundamentals factor sample, dimensioned by `gsid`.
    pub const USCANFPP_MINI: &'static str = "USCANFPP_MINI";
    /// End-of-day prices, dimensioned by `assetId`.
    pub const TREOD: &'static str = "TREOD";

    pub(crate) const fn new(
        provider: Arc<dyn DataProvider>,
        id: String,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            id,
            timeout,
        }
    }

    /// Identifier of this dataset.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The dataset's definition: its dimensions and vendor parameters.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::InvalidArg`] for an unknown dataset, or a
    /// transport error from the provider.
    pub async fn definition(&self) -> Result<DatasetDefinition, QuantraError> {
        provider_call_with_timeout(
            "dataset definition",
            self.timeout,
            self.provider.definition(&self.id),
        )
        .await
    }

    /// Rows matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error when the dataset is unknown, the provider fails, or
    /// the call exceeds the configured deadline.
    pub async fn get_data(&self, query: &DataQuery) -> Result<Vec<DataRow>, QuantraError> {
        provider_call_with_timeout(
            "dataset query",
            self.timeout,
            self.provider.query(&self.id, query),
        )
        .await
    }

    /// Most recent row per symbol at the query's as-of date.
    ///
    /// # Errors
    ///
    /// Returns an error when the dataset is unknown, the provider fails, or
    /// the call exceeds the configured deadline.
    pub async fn get_data_last(&self, query: &DataQuery) -> Result<Vec<DataRow>, QuantraError> {
        provider_call_with_timeout(
            "dataset last query",
            self.timeout,
            self.provider.query_last(&self.id, query),
        )
        .await
    }

    /// Coverage rows describing the symbols this dataset carries.
    ///
    /// # Errors
    ///
    /// Returns an error when the dataset is unknown, the provider fails, or
    /// the call exceeds the configured deadline.
    pub async fn coverage(&self, request: &CoverageRequest) -> Result<Vec<DataRow>, QuantraError> {
        provider_call_with_timeout(
            "dataset coverage",
            self.timeout,
            self.provider.coverage(&self.id, request),
        )
        .await
    }

    /// One field of one symbol as a date-indexed series.
    ///
    /// The query should pin the dataset's symbol dimension to a single
    /// value; the observation dates become the series index, sorted
    /// ascending. Rows without a value for `field` become missing-markers.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::InvalidArg`] when the dataset does not have
    /// exactly one symbol dimension, or when the returned rows span more
    /// than one symbol.
    pub async fn get_data_series(
        &self,
        field: &str,
        query: &DataQuery,
    ) -> Result<TimeSeries, QuantraError> {
        let definition = self.definition().await?;
        let dimensions = definition.dimensions.symbol_dimensions;
        let [dimension] = dimensions.as_slice() else {
            return Err(QuantraError::invalid_arg(format!(
                "get_data_series requires a dataset with exactly one symbol dimension; {} has {}",
                self.id,
                dimensions.len()
            )));
        };

        // Ask only for the dimension and the requested field; the dimension
        // is needed back to verify the rows describe a single symbol.
        let mut narrowed = query.clone();
        narrowed.fields = Some(vec![dimension.clone(), field.to_string()]);
        let mut rows = self.get_data(&narrowed).await?;

        let distinct = rows
            .iter()
            .filter_map(|row| row.fields.get(dimension).map(ToString::to_string))
            .collect::<BTreeSet<_>>()
            .len();
        if distinct > 1 {
            return Err(QuantraError::invalid_arg(format!(
                "not a series: rows span {distinct} distinct {dimension} values"
            )));
        }

        rows.sort_by_key(|row| row.date);
        Ok(rows
            .iter()
            .filter_map(|row| {
                let date = row.date?;
                Some((date, row.value(field).unwrap_or(f64::NAN)))
            })
            .collect())
    }
}
