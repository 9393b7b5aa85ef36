//! Window normalization and ramp trimming for rolling computations.

use serde::{Deserialize, Serialize};

use quantra_types::QuantraError;

use super::series::TimeSeries;

/// A fully resolved rolling window: its size and the warm-up ramp dropped
/// from the front of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Number of observations each rolling computation looks back over.
    pub size: usize,
    /// Number of leading output entries discarded as warm-up.
    pub ramp: usize,
}

impl Window {
    /// Build a window from an explicit size and ramp.
    #[must_use]
    pub const fn new(size: usize, ramp: usize) -> Self {
        Self { size, ramp }
    }
}

/// A window request with either component left unset.
///
/// [`normalize_window`] resolves the gaps against the series being
/// processed: an unset size falls back to the caller default or the series
/// length, and an unset ramp falls back to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// Requested window size, if any.
    pub size: Option<usize>,
    /// Requested ramp length, if any.
    pub ramp: Option<usize>,
}

impl WindowSpec {
    /// A spec with both components unset.
    #[must_use]
    pub const fn unset() -> Self {
        Self { size: None, ramp: None }
    }

    /// A spec with only the size set.
    #[must_use]
    pub const fn with_size(size: usize) -> Self {
        Self {
            size: Some(size),
            ramp: None,
        }
    }

    /// A spec with only the ramp set.
    #[must_use]
    pub const fn with_ramp(ramp: usize) -> Self {
        Self {
            size: None,
            ramp: Some(ramp),
        }
    }
}

/// A bare integer requests a window whose ramp equals its size.
impl From<usize> for WindowSpec {
    fn from(n: usize) -> Self {
        Self {
            size: Some(n),
            ramp: Some(n),
        }
    }
}

impl From<Window> for WindowSpec {
    fn from(w: Window) -> Self {
        Self {
            size: Some(w.size),
            ramp: Some(w.ramp),
        }
    }
}

fn check(x: &TimeSeries, w: Window) -> Result<(), QuantraError> {
    // Validation is skipped for empty input.
    if x.is_empty() {
        return Ok(());
    }
    if w.size == 0 {
        return Err(QuantraError::invalid_arg(
            "window size must be greater than zero",
        ));
    }
    if w.ramp > x.len() {
        return Err(QuantraError::invalid_arg(
            "window ramp must not exceed the series length",
        ));
    }
    Ok(())
}

/// Resolve a window request against the series it will run over.
///
/// Unset size falls back to `default_size`, then to the series length.
/// Unset ramp falls back to zero.
///
/// # Errors
///
/// Returns [`QuantraError::InvalidArg`] when the resolved size is zero or
/// the resolved ramp exceeds the series length (empty input skips both
/// checks).
pub fn normalize_window(
    x: &TimeSeries,
    spec: impl Into<WindowSpec>,
    default_size: Option<usize>,
) -> Result<Window, QuantraError> {
    let spec = spec.into();
    let fallback = default_size.unwrap_or_else(|| x.len());
    let window = Window::new(spec.size.unwrap_or(fallback), spec.ramp.unwrap_or(0));
    check(x, window)?;
    Ok(window)
}

/// Drop the window's warm-up entries from the front of `x`.
///
/// A window larger than the series empties it.
///
/// # Errors
///
/// Returns [`QuantraError::InvalidArg`] under the same conditions as
/// [`normalize_window`].
pub fn apply_ramp(x: &TimeSeries, window: Window) -> Result<TimeSeries, QuantraError> {
    check(x, window)?;
    if window.size > x.len() {
        return Ok(TimeSeries::default());
    }
    Ok(x.iter().skip(window.ramp).collect())
}
