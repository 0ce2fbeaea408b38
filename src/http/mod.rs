//! HTTP transport module
//!
//! The client talks to the roster API only through the [`Connection`]
//! trait. [`HttpConnection`] is the reqwest implementation.
//!
//! # Features
//!
//! - **Response envelope**: status, raw body and parsed body for every call
//! - **Automatic Retries**: retryable statuses and transport errors, with backoff
//! - **Endpoint table**: fixed endpoint URLs resolved at construction

mod client;
mod endpoints;
mod types;

pub use client::{HttpConnection, HttpConnectionConfig, HttpConnectionConfigBuilder};
pub use endpoints::{
    Endpoint, EndpointTable, DEFAULT_API_BASE, DEFAULT_GRADES_URL, DEFAULT_TOKENS_URL,
};
pub use types::{is_success, Connection, Response};
