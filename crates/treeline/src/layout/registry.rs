//! Size registry: node id to caller-measured dimensions
//!
//! The engine never measures content itself. Callers register a size for every
//! node before running a layout; one registry per caller, since registration
//! and layout are not synchronized against each other.

use std::collections::HashMap;
use tracing::{trace, warn};

use crate::core::{Dimensions, HierarchyNode, LayoutError, Result};

/// Mapping from node id to registered dimensions
#[derive(Debug, Clone, Default)]
pub struct SizeRegistry {
    sizes: HashMap<String, Dimensions>,
}

impl SizeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or overwrite the size of `id`
    pub fn register(&mut self, id: impl Into<String>, size: Dimensions) -> Result<()> {
        let id = id.into();
        if !size.is_valid() {
            return Err(LayoutError::invalid_dimensions(id));
        }
        trace!(id = %id, width = size.width, height = size.height, "Registered size");
        self.sizes.insert(id, size);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Dimensions> {
        self.sizes.get(id).copied()
    }

    /// Size of `id`, or an unknown-node error
    pub fn require(&self, id: &str) -> Result<Dimensions> {
        self.get(id).ok_or_else(|| LayoutError::unknown_node(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sizes.contains_key(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Dimensions> {
        self.sizes.remove(id)
    }

    pub fn clear(&mut self) {
        self.sizes.clear();
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Ids in `root`'s tree (preorder) that have no registered size
    pub fn missing_ids<'a, T>(&self, root: &'a HierarchyNode<T>) -> Vec<&'a str> {
        root.traverse()
            .into_iter()
            .filter(|node| !self.contains(&node.id))
            .map(|node| node.id.as_str())
            .collect()
    }

    /// True iff every node of the tree has a registered size
    pub fn is_ready<T>(&self, root: &HierarchyNode<T>) -> bool {
        root.traverse().iter().all(|node| self.contains(&node.id))
    }

    /// Fail with the shortfall count unless every node has a size
    pub fn ensure_ready<T>(&self, root: &HierarchyNode<T>) -> Result<()> {
        let missing = self.missing_ids(root);
        if missing.is_empty() {
            return Ok(());
        }
        warn!(missing = missing.len(), first = missing[0], "Layout requested before all sizes were registered");
        Err(LayoutError::sizes_not_ready(missing.len()))
    }
}
