//! Pagination types
//!
//! Page-size constants, the next-page decision and the running state of
//! one listing.

use crate::types::{OptionStringExt, QueryParams};
use serde_json::Value;
use url::Url;

/// Page size sent with every listing request
pub const PAGE_LIMIT: u32 = 1000;

/// Query parameter carrying the page size
pub const LIMIT_PARAM: &str = "limit";

/// Query parameter carrying the cursor
pub const CURSOR_PARAM: &str = "starting_after";

/// Base used to resolve relative `links[].uri` values
const LINK_BASE: &str = "https://api.clever.com";

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available after this cursor
    Continue {
        /// Value for the `starting_after` parameter
        cursor: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation at the given cursor
    pub fn at(cursor: impl Into<String>) -> Self {
        Self::Continue {
            cursor: cursor.into(),
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Pages fetched so far
    pub page: u32,
    /// Cursor for the next request
    pub cursor: Option<String>,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Increment page number
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Set cursor
    pub fn set_cursor(&mut self, cursor: String) {
        self.cursor = Some(cursor);
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: u64) {
        self.total_fetched += count;
    }

    /// Query parameters for the next request
    pub fn query_params(&self, limit: u32) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert(LIMIT_PARAM.to_string(), limit.to_string());
        if let Some(cursor) = &self.cursor {
            params.insert(CURSOR_PARAM.to_string(), cursor.clone());
        }
        params
    }
}

/// Extract the cursor from the body's `rel: "next"` link, if any.
///
/// Link uris look like `/v2.1/students?limit=1000&starting_after=5f1c...`.
pub fn extract_next_cursor(body: &Value) -> Option<String> {
    let uri = body
        .get("links")?
        .as_array()?
        .iter()
        .find(|link| link.get("rel").and_then(Value::as_str) == Some("next"))?
        .get("uri")?
        .as_str()?;

    let url = Url::parse(LINK_BASE).ok()?.join(uri).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == CURSOR_PARAM)
        .map(|(_, value)| value.into_owned())
        .none_if_empty()
}
