//! Time-series primitives and the pointwise algebra built on them.
//!
//! Modules include:
//! - `series`: the date-indexed [`TimeSeries`](series::TimeSeries) container and operand model
//! - `align`: reconciling two series onto a shared date index
//! - `algebra`: pointwise arithmetic, unary transforms, clamps, and filtering
//! - `window`: window normalization and ramp trimming
//! - `interpolate`: resampling onto arbitrary requested dates
//! - `dates`: calendar components of the index as series
//! - `stats`: rolling statistics, winsorization, and synthetic series

/// Date-index alignment of series pairs.
pub mod align;
/// Pointwise arithmetic, unary transforms, clamps, and filtering.
pub mod algebra;
/// Calendar components of the date index.
pub mod dates;
/// Resampling a series onto requested dates.
pub mod interpolate;
/// The series container, scalar type, and operand model.
pub mod series;
/// Rolling statistics and synthetic series generation.
pub mod stats;
/// Window normalization and ramp trimming.
pub mod window;
