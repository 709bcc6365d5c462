//! Hierarchy input model
//!
//! A [`HierarchyNode`] exclusively owns its children, so the input is always a
//! rooted tree: no back-edges, no shared subtrees. Callers may attach their own
//! payload through the `data` field; the layout engine never looks at it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{FlowDirection, LayoutError, Result};

/// A node of the input tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode<T = ()> {
    /// Identifier, unique within one tree
    pub id: String,
    /// Flow direction for this node's own children (inherits the config default when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<FlowDirection>,
    /// Ordered children
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HierarchyNode<T>>,
    /// Caller-defined payload, opaque to the engine
    #[serde(default)]
    pub data: T,
}

impl<T: Default> HierarchyNode<T> {
    /// Create a leaf node with a default payload
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_data(id, T::default())
    }
}

impl<T> HierarchyNode<T> {
    /// Create a leaf node carrying `data`
    pub fn with_data(id: impl Into<String>, data: T) -> Self {
        Self {
            id: id.into(),
            direction: None,
            children: Vec::new(),
            data,
        }
    }

    /// Set the flow direction override for this node's children
    pub fn with_direction(mut self, direction: FlowDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Append one child
    pub fn with_child(mut self, child: HierarchyNode<T>) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children, keeping their order
    pub fn with_children(mut self, children: impl IntoIterator<Item = HierarchyNode<T>>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first preorder enumeration of this node and its descendants
    pub fn traverse(&self) -> Vec<&HierarchyNode<T>> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Depth-first preorder ids of this node and its descendants
    pub fn subtree_ids(&self) -> Vec<&str> {
        self.traverse().into_iter().map(|n| n.id.as_str()).collect()
    }

    /// Find a node by id within this subtree
    pub fn find(&self, id: &str) -> Option<&HierarchyNode<T>> {
        self.traverse().into_iter().find(|n| n.id == id)
    }

    /// Total number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        self.traverse().len()
    }

    /// Reject trees where an id appears more than once
    pub fn validate_unique_ids(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for node in self.traverse() {
            if !seen.insert(node.id.as_str()) {
                return Err(LayoutError::duplicate_id(&node.id));
            }
        }
        Ok(())
    }
}
