//! # quantra
//!
//! High-level financial timeseries SDK for Rust: dataset queries, a
//! pointwise series algebra, trading calendars, and backtests behind one
//! pluggable provider seam.
//!
//! The [`Quantra`] facade wires a [`DataProvider`] (and optionally a
//! [`BacktestProvider`]) behind cheap handles:
//!
//! - [`Dataset`] for row queries, coverage scans, and single-symbol series
//!   extraction,
//! - [`CalendarService`] for cached business-day calendars built from
//!   exchange holiday data,
//! - [`BacktestService`] for backtest CRUD, results, and transient runs,
//! - [`ChatSession`] for a small scripted data assistant.
//!
//! The series math itself ([`add`], [`align`], windows, rolling stats) is
//! synchronous and pure: no I/O, no shared state, no runtime requirement.
//! Only the provider seams are async.
//!
//! ## Key behaviors and trade-offs
//!
//! - **Per-call deadlines.** Every provider call goes through the
//!   configured `provider_timeout` (default 30s) and fails with
//!   [`QuantraError::ProviderTimeout`] instead of hanging the caller.
//! - **Calendar caching.** Holiday calendars are cached per sorted exchange
//!   set, so repeated lookups cost one provider round trip total.
//! - **Missing data is explicit.** Absent observations surface as NaN
//!   missing-markers that flow through the algebra; [`filter_values`] with
//!   no operator strips them when a dense series is needed.
//! - **Pluggable providers.** Any `Arc<dyn DataProvider>` works: the REST
//!   clients in `quantra-api`, the deterministic `quantra-mock` fixtures,
//!   or your own implementation.
//!
//! ## Examples
//!
//! Build the facade and pull a single-symbol series:
//! ```rust,ignore
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use quantra::{DataQuery, Dataset, Quantra};
//!
//! let quantra = Quantra::builder()
//!     .with_data_provider(Arc::new(quantra_mock::MockProvider::new()))
//!     .build()?;
//!
//! let query = DataQuery::range(
//!     NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2021, 3, 5).unwrap(),
//! )
//! .with_filter("city", vec!["Boston".to_string()]);
//!
//! let temps = quantra
//!     .dataset(Dataset::WEATHER)
//!     .get_data_series("maxTemperature", &query)
//!     .await?;
//! ```
//!
//! Combine series with explicit alignment:
//! ```rust,ignore
//! use quantra::{AlignMethod, add};
//!
//! let total = add(&boston, &austin, AlignMethod::Step);
//! ```
//!
//! Business-day arithmetic over exchange holidays:
//! ```rust,ignore
//! use quantra::Roll;
//!
//! let nyse = quantra.calendars().resolve(&["NYSE"]).await?;
//! let settle = nyse.business_day_offset(trade_date, 2, Roll::Following)?;
//! ```
//!
//! See `quantra/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;

mod backtest;
mod calendar;
mod chat;
mod dataset;

pub use backtest::BacktestService;
pub use calendar::CalendarService;
pub use chat::ChatSession;
pub use core::{Quantra, QuantraBuilder};
pub use dataset::Dataset;

// Re-export the algebra and provider seams for convenience
pub use quantra_core::{
    // Alignment and arithmetic
    AlignMethod,
    // Provider roles
    BacktestProvider,
    // Business-day arithmetic
    Calendar,
    DataProvider,
    FilterOperator,
    Operand,
    QuantraError,
    Roll,
    Scalar,
    // The series container
    TimeSeries,
    // Windows
    Window,
    WindowSpec,
    abs,
    add,
    align,
    apply_ramp,
    ceil,
    divide,
    exp,
    filter_values,
    floor,
    floordiv,
    interpolate,
    is_missing,
    log,
    multiply,
    normalize_window,
    power,
    sqrt,
    subtract,
    value_at,
};
pub use quantra_core::{dates, stats};

// Re-export the request/response types the provider seams speak
pub use quantra_types::{
    ApiConfig, Backtest, BacktestQuery, BacktestResult, BacktestRun, CalendarConfig,
    CoverageRequest, DataQuery, DataRow, DatasetDefinition, DatasetDimensions, DatasetParameters,
    Frequency, QuantraConfig,
};
