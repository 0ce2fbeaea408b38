//! Pagination module
//!
//! # Overview
//!
//! Listing endpoints return a `data` array plus a `links` array. While a
//! page holds records and carries a `rel: "next"` link, the paginator asks
//! for the following page with the same `limit` and the link's
//! `starting_after` cursor.

mod paginator;
mod types;

pub use paginator::Paginator;
pub use types::{
    extract_next_cursor, NextPage, PaginationState, CURSOR_PARAM, LIMIT_PARAM, PAGE_LIMIT,
};
