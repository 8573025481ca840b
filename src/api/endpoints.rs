//! Endpoint adapters
//!
//! Bind an HTTP client and a path into the [`PageSource`] / [`ChildSource`]
//! shapes the collector and tree builder drive.

use super::models::Tag;
use crate::error::Result;
use crate::http::HttpClient;
use crate::pagination::{Collector, Page, PageSource, PaginatedResponse, RequestOptions};
use crate::tree::ChildSource;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

pub(crate) const CONTACTS_PATH: &str = "contacts";
pub(crate) const CONVERSATIONS_PATH: &str = "conversations";
pub(crate) const TAGS_PATH: &str = "tags";

pub(crate) fn contact_path(id: &str) -> String {
    format!("{CONTACTS_PATH}/{id}")
}

pub(crate) fn tag_children_path(id: &str) -> String {
    format!("{TAGS_PATH}/{id}/children")
}

/// A paginated GET endpoint returning items of type `T`
pub struct ListEndpoint<'a, T> {
    http: &'a HttpClient,
    path: String,
    _item: PhantomData<fn() -> T>,
}

impl<'a, T> ListEndpoint<'a, T> {
    /// Bind `path` on `http`
    pub fn new(http: &'a HttpClient, path: impl Into<String>) -> Self {
        Self {
            http,
            path: path.into(),
            _item: PhantomData,
        }
    }
}

#[async_trait]
impl<T> PageSource for ListEndpoint<'_, T>
where
    T: DeserializeOwned + Send,
{
    type Item = T;

    async fn fetch_page(&self, options: RequestOptions) -> Result<Page<T>> {
        let response: PaginatedResponse<T> = self.http.get_json(&self.path, Some(&options)).await?;
        Ok(response.into_page())
    }
}

/// Children of a tag, each list fully paginated
pub struct TagChildren<'a> {
    http: &'a HttpClient,
    collector: &'a Collector,
}

impl<'a> TagChildren<'a> {
    /// Children source backed by `http`, paginated by `collector`
    pub fn new(http: &'a HttpClient, collector: &'a Collector) -> Self {
        Self { http, collector }
    }
}

#[async_trait]
impl ChildSource for TagChildren<'_> {
    type Item = Tag;

    async fn fetch_children(&self, parent: &Tag) -> Result<Vec<Tag>> {
        let endpoint = ListEndpoint::<Tag>::new(self.http, tag_children_path(&parent.id));
        self.collector.collect(&endpoint).await
    }
}
