//! Types for the platform's backtest service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A backtest definition as stored by the platform.
///
/// Only the identity fields the SDK reasons about are typed; the remainder
/// of the (large, vendor-evolving) document rides along in `extra` so that
/// round-tripping a definition through update calls never drops fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backtest {
    /// Server-assigned identifier; absent on creation payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Owning user identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// Platform symbol the backtest trades.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mq_symbol: Option<String>,
    /// Untyped remainder of the definition.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Filters for listing backtests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacktestQuery {
    /// Maximum number of results.
    pub limit: usize,
    /// Filter by backtest identifier.
    pub id: Option<String>,
    /// Filter by owner.
    pub owner_id: Option<String>,
    /// Filter by display name.
    pub name: Option<String>,
    /// Filter by platform symbol.
    pub mq_symbol: Option<String>,
}

impl Default for BacktestQuery {
    fn default() -> Self {
        Self {
            limit: 100,
            id: None,
            owner_id: None,
            name: None,
            mq_symbol: None,
        }
    }
}

/// One stored result row for a backtest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestResult {
    /// Backtest the row belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Untyped result payload.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Output of an on-the-fly backtest calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestRun {
    /// Performance rows.
    #[serde(rename = "Data", default)]
    pub performance: Vec<Value>,
    /// Risk rows.
    #[serde(rename = "RiskData", default)]
    pub risks: Vec<Value>,
}
