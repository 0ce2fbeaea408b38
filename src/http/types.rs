//! Connection trait and response envelope

use crate::error::{Error, Result};
use crate::types::{Method, QueryParams};
use async_trait::async_trait;
use serde_json::Value;

/// Envelope around every call made through a [`Connection`]
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T = Value> {
    /// Body exactly as received
    pub raw_body: String,
    /// HTTP status code
    pub status: u16,
    /// Whether the status is 2xx
    pub success: bool,
    /// Parsed/mapped body, only present on success
    pub body: Option<T>,
}

impl Response<Value> {
    /// Build an envelope from a status and raw body.
    ///
    /// Successful bodies are parsed as JSON (an empty body parses to
    /// `null`); a malformed successful body is a parse error.
    pub fn new(status: u16, raw_body: impl Into<String>) -> Result<Self> {
        let raw_body = raw_body.into();
        let success = is_success(status);
        let body = if success {
            if raw_body.trim().is_empty() {
                Some(Value::Null)
            } else {
                Some(serde_json::from_str(&raw_body)?)
            }
        } else {
            None
        };

        Ok(Self {
            raw_body,
            status,
            success,
            body,
        })
    }

    /// Items of the `data` array, empty when absent
    pub fn items(&self) -> &[Value] {
        self.body
            .as_ref()
            .and_then(|body| body.get("data"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl<T> Response<T> {
    /// Map the body, keeping status and raw body
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            raw_body: self.raw_body,
            status: self.status,
            success: self.success,
            body: self.body.map(f),
        }
    }

    /// Fail with `ConnectionError` unless the response is successful
    pub fn error_for_status(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Error::connection(self.status, self.raw_body))
        }
    }
}

/// Whether a status code counts as success
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Transport capability used by the client.
///
/// `execute` performs one call and always returns the envelope for any
/// HTTP status; only transport and parse failures are errors.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Perform one HTTP call
    async fn execute(
        &self,
        url: &str,
        method: Method,
        query: Option<&QueryParams>,
        body: Option<&Value>,
    ) -> Result<Response>;

    /// Install a bearer token for every later call
    fn set_token(&mut self, access_token: &str);
}
