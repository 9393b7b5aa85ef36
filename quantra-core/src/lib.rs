//! quantra-core
//!
//! Core types, traits, and the time-series algebra shared across the
//! quantra ecosystem.
//!
//! - `timeseries`: the series container, alignment, arithmetic, windows,
//!   interpolation, date components, and rolling statistics.
//! - `calendar`: business-day arithmetic over week masks and holidays.
//! - `provider`: the async roles a data or backtest backend implements.
//!
//! The algebra itself is synchronous and pure: functions take their inputs
//! by value or reference and return new values, never touching shared
//! state. Only the provider traits are async, and they assume a Tokio 1.x
//! runtime like the rest of the ecosystem.
#![warn(missing_docs)]

/// Business-day arithmetic over week masks and holiday sets.
pub mod calendar;
/// Async provider roles backing datasets and backtests.
pub mod provider;
/// Time-series primitives and the pointwise algebra.
pub mod timeseries;

pub use calendar::{Calendar, Roll};
pub use provider::{BacktestProvider, DataProvider};
pub use quantra_types::QuantraError;
pub use timeseries::align::{AlignMethod, align};
pub use timeseries::algebra::{
    FilterOperator, abs, add, ceil, divide, exp, filter_values, floor, floordiv, log, multiply,
    power, sqrt, subtract,
};
pub use timeseries::interpolate::{interpolate, value_at};
pub use timeseries::series::{Operand, Scalar, TimeSeries, is_missing};
pub use timeseries::window::{Window, WindowSpec, apply_ramp, normalize_window};
pub use timeseries::{dates, stats};
