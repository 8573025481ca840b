// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # front-sync
//!
//! Client-side plumbing for the Front REST API: drain cursor-paginated
//! collections reliably and rebuild the tag hierarchy from parent/children
//! calls.
//!
//! ## Features
//!
//! - **Paginated Collection**: Opaque `page_token` cursors followed to exhaustion
//! - **Retry**: Follow-up pages retried with a fixed delay; the first call is not
//! - **Predicate Cutoff**: Stop early, e.g. at the first conversation older than N days
//! - **Tree Building**: Depth-first, pre-order, paced hierarchy walks
//! - **Rate Limiting**: Token bucket shared by every outgoing call
//! - **Cancellation**: Long collections and walks stop promptly on request
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use front_sync::{ClientConfig, FrontClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     front_sync::logging::init(tracing::Level::INFO)?;
//!
//!     let config = ClientConfig::default().with_env_overrides();
//!     let client = FrontClient::new(&config)?;
//!
//!     let contacts = client.fetch_all_contacts().await?;
//!     let recent = client.fetch_conversations_since(7).await?;
//!     let tags = client.fetch_all_tag_hierarchies().await?;
//!
//!     println!("{} contacts, {} recent conversations, {} tag trees",
//!         contacts.len(), recent.len(), tags.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          FrontClient                            │
//! │  list_*()  create_contact()  fetch_all_*()  fetch_tag_hierarchy │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────────┬──────────────┴───────┬────────────┬────────────┐
//! │  Pagination   │        Tree          │   Retry    │   Cancel   │
//! ├───────────────┼──────────────────────┼────────────┼────────────┤
//! │ PageSource    │ ChildSource          │ Fixed      │ Source     │
//! │ Collector     │ TreeBuilder          │ Linear     │ Signal     │
//! │ Cursor        │ Pacing               │ Exponential│            │
//! └───────────────┴──────────────────────┴────────────┴────────────┘
//!                                │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │            HttpClient (bearer auth, rate limit, JSON)           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// Tracing subscriber setup
pub mod logging;

/// Cooperative cancellation
pub mod cancel;

/// Retry policies
pub mod retry;

/// HTTP client with rate limiting
pub mod http;

/// Cursor pagination and the paginated collector
pub mod pagination;

/// Hierarchy reconstruction
pub mod tree;

/// Front API models and client
pub mod api;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

// Re-export commonly used types
pub use api::{Contact, ContactHandle, Conversation, CreateContact, FrontClient, Tag};
pub use cancel::{CancelSignal, CancelSource};
pub use config::{ClientConfig, PacingConfig, RetryConfig};
pub use pagination::{Collector, Page, PageSource, PaginationCursor, RequestOptions};
pub use retry::RetryPolicy;
pub use tree::{ChildSource, TreeBuilder, TreeNode};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
