//! In-memory connection for unit tests

use crate::error::{Error, Result};
use crate::http::{Connection, Response};
use crate::types::{Method, QueryParams};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// One recorded call
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub url: String,
    pub method: Method,
    pub query: QueryParams,
    pub body: Option<Value>,
    pub token: Option<String>,
}

/// Serves queued responses per URL and records every call
#[derive(Debug, Default)]
pub(crate) struct MockConnection {
    responses: Mutex<HashMap<String, VecDeque<Response>>>,
    calls: Mutex<Vec<Call>>,
    token: Option<String>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `url`
    pub fn with_response(self, url: &str, status: u16, body: &Value) -> Self {
        let response = Response::new(status, body.to_string()).unwrap();
        self.responses
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Queue a successful page for `url`
    pub fn with_page(self, url: &str, body: &Value) -> Self {
        self.with_response(url, 200, body)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, url: &str) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.url == url).collect()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

#[async_trait]
impl Connection for MockConnection {
    async fn execute(
        &self,
        url: &str,
        method: Method,
        query: Option<&QueryParams>,
        body: Option<&Value>,
    ) -> Result<Response> {
        self.calls.lock().unwrap().push(Call {
            url: url.to_string(),
            method,
            query: query.cloned().unwrap_or_default(),
            body: body.cloned(),
            token: self.token.clone(),
        });

        self.responses
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| Error::Other(format!("no mock response queued for {url}")))
    }

    fn set_token(&mut self, access_token: &str) {
        self.token = Some(access_token.to_string());
    }
}
