//! Tree node types

use serde::Serialize;

/// One item plus the subtrees it exclusively owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode<T> {
    /// The wrapped item
    pub item: T,
    /// Children in the order the server returned them
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    /// Create a leaf
    pub fn new(item: T) -> Self {
        Self {
            item,
            children: Vec::new(),
        }
    }

    /// Create a node with the given children
    pub fn with_children(item: T, children: Vec<TreeNode<T>>) -> Self {
        Self { item, children }
    }

    /// Check if this node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this one
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::len).sum::<usize>()
    }

    /// Height of this subtree; a leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    /// Items in pre-order
    pub fn iter(&self) -> PreOrder<'_, T> {
        PreOrder { stack: vec![self] }
    }

    /// First node in pre-order whose item matches
    pub fn find<P>(&self, mut predicate: P) -> Option<&TreeNode<T>>
    where
        P: FnMut(&T) -> bool,
    {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if predicate(&node.item) {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }
}

/// Pre-order iterator over a tree's items
#[derive(Debug)]
pub struct PreOrder<'a, T> {
    stack: Vec<&'a TreeNode<T>>,
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(&node.item)
    }
}

impl<'a, T> IntoIterator for &'a TreeNode<T> {
    type Item = &'a T;
    type IntoIter = PreOrder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
