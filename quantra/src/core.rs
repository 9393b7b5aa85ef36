//! Facade construction: configuration, provider wiring, and the per-call
//! deadline every service goes through.

use std::sync::Arc;
use std::time::Duration;

use quantra_core::{BacktestProvider, DataProvider, QuantraError};
use quantra_types::{CalendarConfig, QuantraConfig};

use crate::backtest::BacktestService;
use crate::calendar::CalendarService;
use crate::chat::ChatSession;
use crate::dataset::Dataset;

/// Entry point for dataset access, calendars, chat, and backtests.
///
/// Built via [`Quantra::builder`]. The facade owns no connection state of
/// its own: providers are shared behind `Arc`, and the handles it hands out
/// ([`Dataset`], [`CalendarService`], [`BacktestService`], [`ChatSession`])
/// stay valid after the facade is dropped.
pub struct Quantra {
    pub(crate) data: Arc<dyn DataProvider>,
    pub(crate) backtests: Option<Arc<dyn BacktestProvider>>,
    pub(crate) cfg: QuantraConfig,
    calendars: CalendarService,
}

impl std::fmt::Debug for Quantra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quantra")
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Quantra`].
#[derive(Default)]
pub struct QuantraBuilder {
    data: Option<Arc<dyn DataProvider>>,
    backtests: Option<Arc<dyn BacktestProvider>>,
    cfg: QuantraConfig,
}

impl QuantraBuilder {
    /// Create an empty builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the data provider the facade will query.
    ///
    /// Behavior and trade-offs:
    /// - Exactly one data provider is supported; a second call replaces the
    ///   first.
    /// - The provider is shared behind `Arc`, so registering a clone of an
    ///   existing handle is cheap.
    #[must_use]
    pub fn with_data_provider(mut self, provider: Arc<dyn DataProvider>) -> Self {
        self.data = Some(provider);
        self
    }

    /// Register a backtest provider.
    ///
    /// Behavior and trade-offs:
    /// - Optional. [`Quantra::backtests`] returns an error when no provider
    ///   was registered.
    /// - A second call replaces the first.
    #[must_use]
    pub fn with_backtest_provider(mut self, provider: Arc<dyn BacktestProvider>) -> Self {
        self.backtests = Some(provider);
        self
    }

    /// Set the deadline applied to every provider call.
    ///
    /// Behavior and trade-offs:
    /// - The deadline covers each individual provider call, not a whole
    ///   operation: [`Dataset::get_data_series`] spends one deadline on the
    ///   definition lookup and another on the row query.
    /// - Calls that exceed it fail with [`QuantraError::ProviderTimeout`]
    ///   instead of hanging the caller.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Configure the calendar service's holiday cache.
    ///
    /// Behavior and trade-offs:
    /// - Entries are keyed by the sorted, deduplicated exchange set, so
    ///   `["NYSE", "LSE"]` and `["LSE", "NYSE"]` share one entry.
    /// - A `cache_ttl` of `None` keeps calendars until capacity eviction.
    #[must_use]
    pub fn calendar_config(mut self, config: CalendarConfig) -> Self {
        self.cfg.calendar = config;
        self
    }

    /// Replace the whole configuration in one call.
    #[must_use]
    pub fn config(mut self, cfg: QuantraConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Validate the configuration and assemble the facade.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::InvalidArg`] when no data provider was
    /// registered.
    pub fn build(self) -> Result<Quantra, QuantraError> {
        let Some(data) = self.data else {
            return Err(QuantraError::InvalidArg(
                "no data provider registered; add one via with_data_provider(...)".to_string(),
            ));
        };
        let calendars = CalendarService::new(Arc::clone(&data), &self.cfg);
        Ok(Quantra {
            data,
            backtests: self.backtests,
            cfg: self.cfg,
            calendars,
        })
    }
}

/// Wrap a provider future with a deadline and standardized timeout mapping.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "quantra::core::provider_call_with_timeout",
        skip(fut),
        fields(
            capability = capability,
            timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        ),
    )
)]
pub(crate) async fn provider_call_with_timeout<T, Fut>(
    capability: &'static str,
    timeout: Duration,
    fut: Fut,
) -> Result<T, QuantraError>
where
    Fut: core::future::Future<Output = Result<T, QuantraError>>,
{
    (tokio::time::timeout(timeout, fut).await)
        .unwrap_or_else(|_| Err(QuantraError::provider_timeout(capability)))
}

impl Quantra {
    /// Start building a new `Quantra` instance.
    ///
    /// Typical usage registers a provider and tunes the deadline, e.g.:
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// let provider: Arc<dyn quantra::DataProvider> = todo!("wire a provider");
    ///
    /// let quantra = quantra::Quantra::builder()
    ///     .with_data_provider(provider)
    ///     .provider_timeout(Duration::from_secs(10))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> QuantraBuilder {
        QuantraBuilder::new()
    }

    /// Handle on one dataset.
    ///
    /// Handles are cheap: they clone the shared provider `Arc` and carry the
    /// facade's per-call deadline.
    #[must_use]
    pub fn dataset(&self, dataset_id: impl Into<String>) -> Dataset {
        Dataset::new(
            Arc::clone(&self.data),
            dataset_id.into(),
            self.cfg.provider_timeout,
        )
    }

    /// The calendar service backed by this facade's data provider.
    #[must_use]
    pub const fn calendars(&self) -> &CalendarService {
        &self.calendars
    }

    /// Backtest operations behind the facade's deadline.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::InvalidArg`] when no backtest provider was
    /// registered.
    pub fn backtests(&self) -> Result<BacktestService, QuantraError> {
        let provider = self.backtests.as_ref().ok_or_else(|| {
            QuantraError::InvalidArg(
                "no backtest provider registered; add one via with_backtest_provider(...)"
                    .to_string(),
            )
        })?;
        Ok(BacktestService::new(
            Arc::clone(provider),
            self.cfg.provider_timeout,
        ))
    }

    /// Start a conversational data-assistant session for `first_name`.
    ///
    /// Each session keeps its own transcript state; two sessions never
    /// observe each other.
    #[must_use]
    pub fn chat(&self, first_name: impl Into<String>) -> ChatSession {
        ChatSession::new(
            Arc::clone(&self.data),
            first_name.into(),
            self.cfg.provider_timeout,
        )
    }

    /// The configuration the facade was built with.
    #[must_use]
    pub const fn config(&self) -> &QuantraConfig {
        &self.cfg
    }
}
