//! Configuration types shared across the facade and the REST clients.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection settings for the platform's REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API, without a trailing slash.
    pub base_url: String,
    /// Bearer token attached to every request when present.
    pub bearer_token: Option<String>,
    /// Per-request timeout applied by the HTTP transport.
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.quantra.dev/v1".to_string(),
            bearer_token: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Settings for the calendar service's holiday cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Maximum number of exchange sets kept in the cache.
    pub cache_capacity: u64,
    /// Optional expiry for cached calendars; `None` keeps entries for the
    /// lifetime of the service.
    pub cache_ttl: Option<Duration>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 32,
            cache_ttl: None,
        }
    }
}

/// Global configuration for the `Quantra` facade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantraConfig {
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Calendar cache settings.
    pub calendar: CalendarConfig,
}

impl Default for QuantraConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(30),
            calendar: CalendarConfig::default(),
        }
    }
}
