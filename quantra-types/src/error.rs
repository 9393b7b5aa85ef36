use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the quantra workspace.
///
/// This covers argument validation errors, ordering-contract violations from
/// the algebra core, and the transport/decoding failures surfaced by the REST
/// clients. The algebra core never retries and never recovers internally: a
/// failure is always a caller contract violation or a backend fault,
/// surfaced immediately.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuantraError {
    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An operation that requires a strictly increasing date index was given
    /// out-of-order data.
    #[error("unordered input: {0}")]
    Unordered(String),

    /// Issues with returned or expected data (missing fields, wrong shape).
    #[error("data issue: {0}")]
    Data(String),

    /// A resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "dataset WEATHER".
        what: String,
    },

    /// The API answered with a failure status.
    #[error("request failed with status {status}: {message}")]
    Request {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The request never produced a response (connection, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// A provider call exceeded the facade's configured deadline.
    #[error("provider call timed out: {capability}")]
    ProviderTimeout {
        /// Label of the operation that was cut off.
        capability: String,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl QuantraError {
    /// Helper: build an `InvalidArg` error from any message.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Helper: build an `Unordered` error from any message.
    pub fn unordered(msg: impl Into<String>) -> Self {
        Self::Unordered(msg.into())
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `Request` error from a status code and message.
    pub fn request(status: u16, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error for the named operation.
    pub fn provider_timeout(capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            capability: capability.into(),
        }
    }
}

impl From<serde_json::Error> for QuantraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
