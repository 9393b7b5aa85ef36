//! Trading calendars resolved from the holiday dataset, with caching.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use quantra_core::calendar::{holiday_high_limit, holiday_low_limit};
use quantra_core::{Calendar, DataProvider, QuantraError};
use quantra_types::{DataQuery, QuantraConfig};

use crate::core::provider_call_with_timeout;
use crate::dataset::Dataset;

/// Resolves trading calendars from exchange holiday data.
///
/// A resolved [`Calendar`] uses the standard Monday-to-Friday week and
/// observes the union of the requested exchanges' holidays. Results are
/// cached per exchange set: the key is the sorted, deduplicated list of
/// exchange codes, so the order callers pass them in does not matter.
pub struct CalendarService {
    provider: Arc<dyn DataProvider>,
    cache: Cache<Vec<String>, Calendar>,
    timeout: Duration,
}

impl CalendarService {
    pub(crate) fn new(provider: Arc<dyn DataProvider>, cfg: &QuantraConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(cfg.calendar.cache_capacity);
        if let Some(ttl) = cfg.calendar.cache_ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            provider,
            cache: builder.build(),
            timeout: cfg.provider_timeout,
        }
    }

    /// The calendar observing the given exchanges' holidays.
    ///
    /// A date counts as closed when any of the exchanges closes on it.
    /// Repeated lookups for the same exchange set are served from the cache
    /// without touching the provider.
    ///
    /// # Errors
    ///
    /// Returns an error when the holiday dataset query fails or exceeds the
    /// configured deadline.
    pub async fn resolve(&self, exchanges: &[&str]) -> Result<Calendar, QuantraError> {
        let mut key: Vec<String> = exchanges.iter().map(ToString::to_string).collect();
        key.sort_unstable();
        key.dedup();

        self.cache
            .try_get_with(key.clone(), self.fetch_holidays(key.clone()))
            .await
            .map_err(|shared| (*shared).clone())
    }

    async fn fetch_holidays(&self, exchanges: Vec<String>) -> Result<Calendar, QuantraError> {
        let query = DataQuery::range(holiday_low_limit(), holiday_high_limit())
            .with_filter("exchange", exchanges);
        let rows = provider_call_with_timeout(
            "calendar holidays",
            self.timeout,
            self.provider.query(Dataset::HOLIDAY, &query),
        )
        .await?;
        Ok(Calendar::with_holidays(
            rows.into_iter().filter_map(|row| row.date),
        ))
    }
}
