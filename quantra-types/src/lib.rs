//! Quantra-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod backtest;
mod config;
mod data;
mod error;

pub use backtest::{Backtest, BacktestQuery, BacktestResult, BacktestRun};
pub use config::{ApiConfig, CalendarConfig, QuantraConfig};
pub use data::{
    CoverageRequest, DataQuery, DataRow, DatasetDefinition, DatasetDimensions, DatasetParameters,
    Frequency,
};
pub use error::QuantraError;
