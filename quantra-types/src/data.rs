//! Query and row types for the platform's dataset service.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sampling frequency requested from the data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Frequency {
    /// Daily, end-of-day observations.
    #[default]
    #[serde(rename = "End Of Day")]
    EndOfDay,
    /// Intraday, real-time observations.
    #[serde(rename = "Real Time")]
    RealTime,
}

/// A query against a dataset: date range plus arbitrary symbol filters.
///
/// Filters under `where` are dataset-specific dimension values, e.g.
/// `city = ["Boston", "Austin"]` for a weather dataset or a list of entity
/// identifiers for a fundamentals dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuery {
    /// Inclusive start of the requested date range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Inclusive end of the requested date range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Request the data as of this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of_date: Option<NaiveDate>,
    /// Only rows ingested since this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<NaiveDate>,
    /// Dataset fields to include; all fields when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    /// Sampling frequency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    /// Dimension filters applied server-side.
    #[serde(rename = "where", skip_serializing_if = "BTreeMap::is_empty", default)]
    pub filters: BTreeMap<String, Value>,
}

impl DataQuery {
    /// Query covering the inclusive `start..=end` date range.
    #[must_use]
    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Self::default()
        }
    }

    /// Restrict the response to a single field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.fields = Some(vec![field.into()]);
        self
    }

    /// Add a dimension filter, replacing any previous value for `key`.
    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

/// One row returned by the dataset service.
///
/// Rows are schemaless beyond the date column: every dataset carries its own
/// dimension and measure fields, kept here in a flattened map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    /// Observation date, when the dataset is date-indexed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Remaining dataset fields keyed by name.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl DataRow {
    /// Numeric value of `field`, if present and numeric.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<f64> {
        self.fields.get(field).and_then(Value::as_f64)
    }

    /// Text value of `field`, if present and textual.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}

/// Server-side definition of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetDefinition {
    /// Dataset identifier.
    pub id: String,
    /// Index structure of the dataset.
    #[serde(default)]
    pub dimensions: DatasetDimensions,
    /// Vendor parameters.
    #[serde(default)]
    pub parameters: DatasetParameters,
}

/// Index structure of a dataset: which fields identify an entity and which
/// field carries the observation timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetDimensions {
    /// Fields that identify an entity (e.g. `gsid`, `assetId`).
    #[serde(default)]
    pub symbol_dimensions: Vec<String>,
    /// Field holding the observation date or time.
    #[serde(default)]
    pub time_field: String,
}

/// Vendor parameters attached to a dataset definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetParameters {
    /// Identifier-resolution strategy advertised by the vendor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_strategy: Option<String>,
}

/// Parameters for a dataset coverage scan.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageRequest {
    /// Scroll session duration, e.g. `"30s"`.
    pub scroll: String,
    /// Continuation token from a previous page.
    pub scroll_id: Option<String>,
    /// Page size.
    pub limit: usize,
    /// Offset into the coverage set.
    pub offset: Option<usize>,
    /// Coverage fields to return; server default when `None`.
    pub fields: Option<Vec<String>>,
}

impl Default for CoverageRequest {
    fn default() -> Self {
        Self {
            scroll: "30s".to_string(),
            scroll_id: None,
            limit: 4000,
            offset: None,
            fields: None,
        }
    }
}
