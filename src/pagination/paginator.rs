//! Cursor paginator
//!
//! Drives the listing protocol against one endpoint and yields typed
//! records lazily: a page is requested only once the consumer has taken
//! every record of the previous one.

use super::types::{extract_next_cursor, NextPage, PaginationState, PAGE_LIMIT};
use crate::error::{Error, Result};
use crate::http::Connection;
use crate::records::{Record, RecordContext};
use crate::types::Method;
use futures::stream::{self, Stream, TryStreamExt};
use serde_json::Value;
use tracing::debug;

/// Cursor-based paginator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    /// Page size for every request
    pub limit: u32,
}

impl Default for Paginator {
    fn default() -> Self {
        Self { limit: PAGE_LIMIT }
    }
}

impl Paginator {
    /// Create a paginator with the default page size
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paginator with a custom page size
    pub fn with_limit(limit: u32) -> Self {
        Self { limit }
    }

    /// Process a page and decide whether another one follows.
    ///
    /// An empty page, or a page without a `next` link, ends the listing.
    pub fn process_response(
        &self,
        body: Option<&Value>,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records_count as u64);
        state.next_page();

        if records_count == 0 {
            state.mark_done();
            return NextPage::Done;
        }

        match body.and_then(extract_next_cursor) {
            Some(cursor) => {
                state.set_cursor(cursor.clone());
                NextPage::at(cursor)
            }
            None => {
                state.mark_done();
                NextPage::Done
            }
        }
    }

    /// Lazily list every record of type `T` behind `url`.
    ///
    /// Non-2xx pages fail with `ConnectionError`; transport errors are
    /// passed through untouched. Records keep server order.
    pub fn fetch<'a, C, T>(
        &'a self,
        connection: &'a C,
        url: &'a str,
        method: Method,
        ctx: RecordContext,
    ) -> impl Stream<Item = Result<T>> + 'a
    where
        C: Connection + ?Sized,
        T: Record + 'a,
    {
        stream::try_unfold(PaginationState::new(), move |state| {
            self.fetch_page::<C, T>(connection, url, method, ctx, state)
        })
        .map_ok(|records| stream::iter(records.into_iter().map(Ok::<T, Error>)))
        .try_flatten()
    }

    /// Drain a listing into a vector
    pub async fn fetch_all<C, T>(
        &self,
        connection: &C,
        url: &str,
        method: Method,
        ctx: RecordContext,
    ) -> Result<Vec<T>>
    where
        C: Connection + ?Sized,
        T: Record,
    {
        self.fetch(connection, url, method, ctx).try_collect().await
    }

    async fn fetch_page<C, T>(
        &self,
        connection: &C,
        url: &str,
        method: Method,
        ctx: RecordContext,
        mut state: PaginationState,
    ) -> Result<Option<(Vec<T>, PaginationState)>>
    where
        C: Connection + ?Sized,
        T: Record,
    {
        if state.done {
            return Ok(None);
        }

        let query = state.query_params(self.limit);
        let response = connection
            .execute(url, method, Some(&query), None)
            .await?
            .error_for_status()?;

        let records: Vec<T> = response
            .items()
            .iter()
            .map(|item| T::from_item(item, &ctx))
            .collect();

        debug!(
            url,
            page = state.page + 1,
            records = records.len(),
            "Fetched page"
        );

        if self
            .process_response(response.body.as_ref(), records.len(), &mut state)
            .is_done()
        {
            debug!(
                url,
                pages = state.page,
                total = state.total_fetched,
                "Pagination complete"
            );
        }

        Ok(Some((records, state)))
    }
}
