//! Front API client
//!
//! One method per endpoint, plus collection helpers that drive the
//! paginated endpoints to exhaustion and rebuild the tag hierarchy. Each
//! collection reads the token once when it starts; `set_token` during a
//! collection only affects later calls.

use super::endpoints::{
    contact_path, tag_children_path, ListEndpoint, TagChildren, CONTACTS_PATH,
    CONVERSATIONS_PATH, TAGS_PATH,
};
use super::models::{Contact, ContactHandle, Conversation, CreateContact, Tag};
use crate::cancel::CancelSignal;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::{Collector, Page, PageSource, RequestOptions};
use crate::tree::{TreeBuilder, TreeNode};
use crate::types::JsonValue;
use chrono::Utc;
use tracing::{debug, info};

/// Client for the Front REST API
#[derive(Debug, Clone)]
pub struct FrontClient {
    http: HttpClient,
    collector: Collector,
    tree: TreeBuilder,
}

impl FrontClient {
    /// Create a client from a validated config
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_config(HttpClientConfig::from(config))?;
        Ok(Self {
            http,
            collector: Collector::from_config(config),
            tree: TreeBuilder::from_config(config),
        })
    }

    /// Create a client from parts
    pub fn from_parts(http: HttpClient, collector: Collector, tree: TreeBuilder) -> Self {
        Self {
            http,
            collector,
            tree,
        }
    }

    /// Make every collection started from this client observe `cancel`
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.collector = self.collector.with_cancel(cancel.clone());
        self.tree = self.tree.with_cancel(cancel);
        self
    }

    /// The underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// The collector used by the fetch_all helpers
    pub fn collector(&self) -> &Collector {
        &self.collector
    }

    /// The tree builder used for tag hierarchies
    pub fn tree_builder(&self) -> &TreeBuilder {
        &self.tree
    }

    /// Replace the bearer token
    pub async fn set_token(&self, token: Option<String>) {
        self.http.set_token(token).await;
    }

    // ========================================================================
    // Endpoints
    // ========================================================================

    /// GET /contacts
    pub async fn list_contacts(&self, options: RequestOptions) -> Result<Page<Contact>> {
        contacts(&self.http).fetch_page(options).await
    }

    /// POST /contacts
    pub async fn create_contact(&self, body: &CreateContact) -> Result<JsonValue> {
        self.http.post_json(CONTACTS_PATH, body).await
    }

    /// DELETE /contacts/{id}
    pub async fn delete_contact(&self, id: &str) -> Result<JsonValue> {
        self.http.delete(&contact_path(id)).await
    }

    /// GET /conversations
    pub async fn list_conversations(&self, options: RequestOptions) -> Result<Page<Conversation>> {
        conversations(&self.http).fetch_page(options).await
    }

    /// GET /tags
    pub async fn list_tags(&self, options: RequestOptions) -> Result<Page<Tag>> {
        tags(&self.http).fetch_page(options).await
    }

    /// GET /tags/{id}/children
    pub async fn list_tag_children(&self, tag: &Tag, options: RequestOptions) -> Result<Page<Tag>> {
        ListEndpoint::<Tag>::new(&self.http, tag_children_path(&tag.id))
            .fetch_page(options)
            .await
    }

    // ========================================================================
    // Contacts
    // ========================================================================

    /// Create a contact reachable through `handle` on `source`
    ///
    /// `extra_handles` are sent after the primary handle.
    pub async fn create_contact_with_name(
        &self,
        name: Option<&str>,
        handle: &str,
        source: &str,
        extra_handles: Vec<ContactHandle>,
    ) -> Result<JsonValue> {
        let body = CreateContact::new(
            name.map(ToString::to_string),
            ContactHandle::new(handle, source),
            extra_handles,
        );
        self.create_contact(&body).await
    }

    /// Every contact
    pub async fn fetch_all_contacts(&self) -> Result<Vec<Contact>> {
        let http = self.http.snapshot().await;
        self.collector.collect(&contacts(&http)).await
    }

    // ========================================================================
    // Conversations
    // ========================================================================

    /// Every conversation
    pub async fn fetch_all_conversations(&self) -> Result<Vec<Conversation>> {
        let http = self.http.snapshot().await;
        self.collector.collect(&conversations(&http)).await
    }

    /// Conversations created at most `max_age_days` whole days ago
    ///
    /// Relies on the API listing conversations newest first: pagination
    /// stops at the first conversation past the cutoff.
    pub async fn fetch_conversations_since(&self, max_age_days: i64) -> Result<Vec<Conversation>> {
        let http = self.http.snapshot().await;
        let now = Utc::now();
        let recent = self
            .collector
            .collect_while(&conversations(&http), |c: &Conversation| {
                (now - c.created_at).num_days() <= max_age_days
            })
            .await?;
        debug!(
            "Fetched {} conversation(s) from the last {} day(s)",
            recent.len(),
            max_age_days
        );
        Ok(recent)
    }

    // ========================================================================
    // Tags
    // ========================================================================

    /// Every top-level tag
    pub async fn fetch_all_tags(&self) -> Result<Vec<Tag>> {
        let http = self.http.snapshot().await;
        self.collector.collect(&tags(&http)).await
    }

    /// The hierarchy below `tag`
    pub async fn fetch_tag_hierarchy(&self, tag: Tag) -> Result<TreeNode<Tag>> {
        let http = self.http.snapshot().await;
        let children = TagChildren::new(&http, &self.collector);
        self.tree.build_subtree(tag, &children).await
    }

    /// One hierarchy per top-level tag, in list order
    pub async fn fetch_all_tag_hierarchies(&self) -> Result<Vec<TreeNode<Tag>>> {
        let http = self.http.snapshot().await;
        let roots = self.collector.collect(&tags(&http)).await?;
        info!("Building hierarchies for {} tag(s)", roots.len());

        let children = TagChildren::new(&http, &self.collector);
        self.tree.build_forest(roots, &children).await
    }
}

fn contacts(http: &HttpClient) -> ListEndpoint<'_, Contact> {
    ListEndpoint::new(http, CONTACTS_PATH)
}

fn conversations(http: &HttpClient) -> ListEndpoint<'_, Conversation> {
    ListEndpoint::new(http, CONVERSATIONS_PATH)
}

fn tags(http: &HttpClient) -> ListEndpoint<'_, Tag> {
    ListEndpoint::new(http, TAGS_PATH)
}
