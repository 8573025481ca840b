//! Front API module
//!
//! Typed resource models, endpoint adapters and the [`FrontClient`] facade
//! tying the HTTP transport, the paginated collector and the tree builder
//! together.

mod client;
mod endpoints;
mod models;

pub use client::FrontClient;
pub use endpoints::{ListEndpoint, TagChildren};
pub use models::{
    Assignee, Contact, ContactGroup, ContactHandle, Conversation, CreateContact, Recipient, Tag,
};
