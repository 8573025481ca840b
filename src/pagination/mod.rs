//! Pagination module
//!
//! Cursor-based pagination over the Front API.
//!
//! # Overview
//!
//! A [`PageSource`] performs one round trip for a given set of
//! [`RequestOptions`]. The [`Collector`] threads the opaque cursor from page
//! to page, retries follow-up pages, and stops when the server stops
//! issuing cursors or a caller-supplied predicate cuts the collection off.

mod collector;
mod types;

pub use collector::{Collector, PageSource};
pub use types::{
    Page, PaginatedResponse, PaginationCursor, PaginationLinks, RequestOptions, LIMIT_PARAM,
    PAGE_TOKEN_PARAM,
};
