pub mod backtests;
pub mod datasets;
