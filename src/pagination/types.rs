//! Pagination types
//!
//! Cursor, per-call options, the decoded page, and the wire envelope the
//! Front API wraps every list response in.

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Query parameter carrying the page size hint
pub const LIMIT_PARAM: &str = "limit";

/// Query parameter carrying the cursor
pub const PAGE_TOKEN_PARAM: &str = "page_token";

// ============================================================================
// Cursor
// ============================================================================

/// Opaque server-issued token pointing at the next page
///
/// Only ever extracted from a previous response and echoed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaginationCursor(String);

impl PaginationCursor {
    /// Wrap a token taken from a response
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaginationCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Request Options
// ============================================================================

/// Options for a single paginated call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// Cursor from the previous page, `None` for the first call
    pub cursor: Option<PaginationCursor>,
    /// Page size hint
    pub limit: u32,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::first(crate::config::DEFAULT_PAGE_SIZE)
    }
}

impl RequestOptions {
    /// Options for the first page
    pub fn first(limit: u32) -> Self {
        Self {
            cursor: None,
            limit,
        }
    }

    /// Options for the page following `cursor`
    pub fn after(cursor: PaginationCursor, limit: u32) -> Self {
        Self {
            cursor: Some(cursor),
            limit,
        }
    }

    /// Check if these options request the first page
    pub fn is_first(&self) -> bool {
        self.cursor.is_none()
    }

    /// Query parameters to put on the wire
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![(LIMIT_PARAM, self.limit.to_string())];
        if let Some(cursor) = &self.cursor {
            params.push((PAGE_TOKEN_PARAM, cursor.as_str().to_string()));
        }
        params
    }
}

// ============================================================================
// Page
// ============================================================================

/// One decoded list response
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in server order
    pub results: Vec<T>,
    /// Present iff more pages exist
    pub next_cursor: Option<PaginationCursor>,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(results: Vec<T>, next_cursor: Option<PaginationCursor>) -> Self {
        Self {
            results,
            next_cursor,
        }
    }

    /// Create a final page
    pub fn last(results: Vec<T>) -> Self {
        Self::new(results, None)
    }

    /// Check if another page follows
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

// ============================================================================
// Wire Envelope
// ============================================================================

/// List response envelope as returned by the API
///
/// ```json
/// {
///   "_pagination": { "next": "https://api2.frontapp.com/tags?page_token=abc" },
///   "_links": { "self": "https://api2.frontapp.com/tags" },
///   "_results": [ ... ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Pagination links
    #[serde(rename = "_pagination")]
    pub pagination: Option<PaginationLinks>,
    /// Resource links
    #[serde(rename = "_links")]
    pub links: Option<JsonValue>,
    /// Items, possibly absent
    #[serde(rename = "_results")]
    pub results: Option<Vec<T>>,
}

impl<T> PaginatedResponse<T> {
    /// Cursor for the next page, if any
    pub fn next_page_token(&self) -> Option<PaginationCursor> {
        self.pagination
            .as_ref()
            .and_then(PaginationLinks::next_page_token)
    }

    /// Convert into a page, treating absent results as empty
    pub fn into_page(self) -> Page<T> {
        let next_cursor = self.next_page_token();
        Page::new(self.results.unwrap_or_default(), next_cursor)
    }
}

/// The `_pagination` object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationLinks {
    /// Link to the next page
    pub next: Option<String>,
}

impl PaginationLinks {
    /// Extract the `page_token` value from the `next` link
    pub fn next_page_token(&self) -> Option<PaginationCursor> {
        let next = self.next.as_deref().map(str::trim).filter(|n| !n.is_empty())?;

        if let Ok(url) = Url::parse(next) {
            return url
                .query_pairs()
                .find(|(k, _)| k == PAGE_TOKEN_PARAM)
                .filter(|(_, token)| !token.is_empty())
                .map(|(_, token)| PaginationCursor::new(token.into_owned()));
        }

        // Not a URL we can parse: take whatever follows the last marker,
        // or the whole value if there is no marker.
        let marker = format!("{PAGE_TOKEN_PARAM}=");
        let token = next.rsplit(marker.as_str()).next().unwrap_or(next);
        let token = token.split('&').next().unwrap_or(token);
        if token.is_empty() {
            None
        } else {
            Some(PaginationCursor::new(token))
        }
    }
}
