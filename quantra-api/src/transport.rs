//! Transport seam and the production HTTP transport.
//!
//! Clients issue requests through the [`Transport`] trait so tests can
//! inject canned responses without a network. The production
//! [`HttpTransport`] signs requests with the configured bearer token and
//! normalizes HTTP failures into [`QuantraError`] variants.

#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use quantra_core::QuantraError;
use quantra_types::ApiConfig;
use serde_json::Value;

/// HTTP abstraction the REST clients are written against.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `path` with the given query pairs.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::NotFound`] for a 404, [`QuantraError::Request`]
    /// for other non-success statuses, and [`QuantraError::Transport`] for
    /// connection failures.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, QuantraError>;

    /// POST `path` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Transport::get`].
    async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, QuantraError>;

    /// PUT `path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Transport::get`].
    async fn put(&self, path: &str, body: &Value) -> Result<Value, QuantraError>;

    /// DELETE `path`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Transport::get`].
    async fn delete(&self, path: &str) -> Result<Value, QuantraError>;
}

/// Production transport over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpTransport {
    /// Build a transport for the service described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`QuantraError::Transport`] when the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: ApiConfig) -> Result<Self, QuantraError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| QuantraError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "quantra::api::execute", skip(self, builder))
    )]
    async fn execute(
        &self,
        builder: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<Value, QuantraError> {
        let response = builder
            .send()
            .await
            .map_err(|e| QuantraError::Transport(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| QuantraError::Transport(e.to_string()))?;

        if !status.is_success() {
            // Some services report a missing resource with a 400-class body
            // instead of a 404 status; both normalize to the same variant.
            if status == reqwest::StatusCode::NOT_FOUND
                || text.to_ascii_lowercase().contains("not found")
            {
                return Err(QuantraError::not_found(context));
            }
            return Err(QuantraError::request(
                status.as_u16(),
                format!("{context}: {text}"),
            ));
        }
        if text.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, QuantraError> {
        let builder = self.request(reqwest::Method::GET, path).query(query);
        self.execute(builder, &format!("GET {path}")).await
    }

    async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, QuantraError> {
        let mut builder = self.request(reqwest::Method::POST, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(builder, &format!("POST {path}")).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, QuantraError> {
        let builder = self.request(reqwest::Method::PUT, path).json(body);
        self.execute(builder, &format!("PUT {path}")).await
    }

    async fn delete(&self, path: &str) -> Result<Value, QuantraError> {
        let builder = self.request(reqwest::Method::DELETE, path);
        self.execute(builder, &format!("DELETE {path}")).await
    }
}

/// Pull `key` out of a JSON response, failing on unexpected shapes.
pub(crate) fn take_field(value: &mut Value, key: &str) -> Result<Value, QuantraError> {
    value
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| QuantraError::Decode(format!("response missing `{key}` field")))
}

/* -------- Test-only lightweight transport constructor ------- */

#[cfg(feature = "test-adapters")]
impl dyn Transport {
    /// Build a `Transport` from a closure (tests only).
    ///
    /// The closure sees every request as (method, path, query, body) and
    /// returns the JSON the client should decode.
    pub fn from_fn<F>(f: F) -> Arc<dyn Transport>
    where
        F: Send
            + Sync
            + 'static
            + Fn(
                &'static str,
                String,
                Vec<(String, String)>,
                Option<Value>,
            ) -> Result<Value, QuantraError>,
    {
        struct FnTransport<F>(F);

        fn owned(query: &[(&str, String)]) -> Vec<(String, String)> {
            query
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect()
        }

        #[async_trait]
        impl<F> Transport for FnTransport<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(
                    &'static str,
                    String,
                    Vec<(String, String)>,
                    Option<Value>,
                ) -> Result<Value, QuantraError>,
        {
            async fn get(
                &self,
                path: &str,
                query: &[(&str, String)],
            ) -> Result<Value, QuantraError> {
                (self.0)("GET", path.to_string(), owned(query), None)
            }

            async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, QuantraError> {
                (self.0)("POST", path.to_string(), Vec::new(), body.cloned())
            }

            async fn put(&self, path: &str, body: &Value) -> Result<Value, QuantraError> {
                (self.0)("PUT", path.to_string(), Vec::new(), Some(body.clone()))
            }

            async fn delete(&self, path: &str) -> Result<Value, QuantraError> {
                (self.0)("DELETE", path.to_string(), Vec::new(), None)
            }
        }

        Arc::new(FnTransport(f))
    }
}
