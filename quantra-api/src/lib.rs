//! quantra-api
//!
//! REST clients for the Quantra data and backtest services. `DataClient`
//! implements `DataProvider` and `BacktestsClient` implements
//! `BacktestProvider`, both on top of a swappable `Transport` seam so tests
//! can inject canned responses without a running service.
#![warn(missing_docs)]

/// Backtest CRUD, results, and calculation client.
pub mod backtests;
/// Dataset query, coverage, and definition client.
pub mod data;
/// The HTTP seam the clients talk through.
pub mod transport;

use std::sync::Arc;

#[cfg(feature = "test-adapters")]
type TransportArc = Arc<dyn transport::Transport>;
#[cfg(not(feature = "test-adapters"))]
type TransportArc = Arc<transport::HttpTransport>;

pub use backtests::BacktestsClient;
pub use data::DataClient;
pub use transport::{HttpTransport, Transport};
