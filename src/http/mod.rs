//! HTTP client module
//!
//! The transport behind every endpoint call.
//!
//! # Features
//!
//! - **Bearer Auth**: Token attached to every request, swappable at runtime
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Status Validation**: Non-2xx responses become typed errors
//! - **JSON Decoding**: Bodies decoded straight into the caller's type

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
