//! Hierarchical tree builder
//!
//! Walks a parent -> children endpoint depth-first, pre-order, one request at
//! a time. Pacing delays between roots and between siblings keep the walk
//! under the upstream rate limit.

use super::types::TreeNode;
use crate::cancel::CancelSignal;
use crate::config::{ClientConfig, PacingConfig};
use crate::error::Result;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use tracing::debug;

/// Fetches the direct children of an item
#[async_trait]
pub trait ChildSource: Send + Sync {
    /// Item type of parents and children
    type Item: Send + Sync;

    /// Fetch every direct child of `parent`, in server order
    async fn fetch_children(&self, parent: &Self::Item) -> Result<Vec<Self::Item>>;
}

/// Builds trees from a [`ChildSource`]
///
/// Any error aborts the whole build; a partially built tree or forest is
/// never returned.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    pacing: PacingConfig,
    cancel: CancelSignal,
}

impl TreeBuilder {
    /// Builder with the given pacing
    pub fn new(pacing: PacingConfig) -> Self {
        Self {
            pacing,
            cancel: CancelSignal::never(),
        }
    }

    /// Builder configured from a client config
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.pacing.clone())
    }

    /// Observe a cancellation signal
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }

    /// The pacing in use
    pub fn pacing(&self) -> &PacingConfig {
        &self.pacing
    }

    /// Build one tree per item, preserving input order
    pub async fn build_forest<S>(
        &self,
        items: Vec<S::Item>,
        source: &S,
    ) -> Result<Vec<TreeNode<S::Item>>>
    where
        S: ChildSource + ?Sized,
    {
        let mut forest = Vec::with_capacity(items.len());

        for (index, item) in items.into_iter().enumerate() {
            if index > 0 {
                self.cancel.sleep(self.pacing.root_delay()).await?;
            }
            forest.push(self.subtree(item, source, 0).await?);
        }

        debug!("Built forest of {} tree(s)", forest.len());
        Ok(forest)
    }

    /// Build the tree rooted at `item`
    pub async fn build_subtree<S>(&self, item: S::Item, source: &S) -> Result<TreeNode<S::Item>>
    where
        S: ChildSource + ?Sized,
    {
        self.subtree(item, source, 0).await
    }

    fn subtree<'a, S>(
        &'a self,
        item: S::Item,
        source: &'a S,
        level: usize,
    ) -> BoxFuture<'a, Result<TreeNode<S::Item>>>
    where
        S: ChildSource + ?Sized,
        S::Item: 'a,
    {
        async move {
            let children = self.cancel.guard(source.fetch_children(&item)).await?;
            let mut node = TreeNode::new(item);
            node.children.reserve(children.len());

            for (index, child) in children.into_iter().enumerate() {
                if index > 0 {
                    self.cancel.sleep(self.pacing.sibling_delay()).await?;
                }
                node.children.push(self.subtree(child, source, level + 1).await?);
            }

            debug!(
                "Built subtree at level {}: {} node(s)",
                level,
                node.len()
            );
            Ok(node)
        }
        .boxed()
    }
}
