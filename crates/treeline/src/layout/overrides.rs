//! Sparse position overrides layered over a computed layout
//!
//! Interactive collaborators (dragging, live nudges) never mutate
//! [`PlacedNode`] values. They record per-node displacements here and read
//! the overlaid positions back through [`PositionOverrides::apply`].

use std::collections::HashMap;

use super::PlacedNode;
use crate::core::{HierarchyNode, Point};

/// Node id to position delta
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionOverrides {
    deltas: HashMap<String, Point>,
}

impl PositionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to whatever displacement `id` already has
    pub fn offset(&mut self, id: impl Into<String>, delta: Point) {
        *self.deltas.entry(id.into()).or_default() += delta;
    }

    /// Replace the displacement of `id`
    pub fn set(&mut self, id: impl Into<String>, delta: Point) {
        self.deltas.insert(id.into(), delta);
    }

    /// Shift `node` and all of its descendants by `delta`
    pub fn offset_subtree<T>(&mut self, node: &HierarchyNode<T>, delta: Point) {
        for id in node.subtree_ids() {
            self.offset(id, delta);
        }
    }

    pub fn get(&self, id: &str) -> Option<Point> {
        self.deltas.get(id).copied()
    }

    pub fn remove(&mut self, id: &str) -> Option<Point> {
        self.deltas.remove(id)
    }

    pub fn clear(&mut self) {
        self.deltas.clear();
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Effective position of a placed node
    pub fn position_of<T>(&self, placed: &PlacedNode<'_, T>) -> Point {
        match self.get(placed.id()) {
            Some(delta) => placed.position + delta,
            None => placed.position,
        }
    }

    /// New placed nodes with every recorded delta applied
    pub fn apply<'a, T>(&self, placed: &[PlacedNode<'a, T>]) -> Vec<PlacedNode<'a, T>> {
        placed
            .iter()
            .map(|p| p.moved_to(self.position_of(p)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_accumulates() {
        let mut overrides = PositionOverrides::new();
        overrides.offset("a", Point::new(10.0, 0.0));
        overrides.offset("a", Point::new(5.0, -3.0));
        assert_eq!(overrides.get("a"), Some(Point::new(15.0, -3.0)));
        overrides.set("a", Point::new(1.0, 1.0));
        assert_eq!(overrides.get("a"), Some(Point::new(1.0, 1.0)));
        assert_eq!(overrides.remove("a"), Some(Point::new(1.0, 1.0)));
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_offset_subtree() {
        let tree: HierarchyNode = HierarchyNode::new("r").with_child(
            HierarchyNode::new("a")
                .with_child(HierarchyNode::new("a1"))
                .with_child(HierarchyNode::new("a2")),
        );
        let mut overrides = PositionOverrides::new();
        overrides.offset_subtree(&tree.children[0], Point::new(0.0, 40.0));
        assert_eq!(overrides.len(), 3);
        assert_eq!(overrides.get("a2"), Some(Point::new(0.0, 40.0)));
        assert_eq!(overrides.get("r"), None);
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let tree: HierarchyNode = HierarchyNode::new("r").with_child(HierarchyNode::new("a"));
        let placed = vec![
            PlacedNode {
                node: &tree,
                position: Point::ORIGIN,
                depth: 0,
            },
            PlacedNode {
                node: &tree.children[0],
                position: Point::new(0.0, 100.0),
                depth: 1,
            },
        ];
        let mut overrides = PositionOverrides::new();
        overrides.offset("a", Point::new(-30.0, 10.0));

        let moved = overrides.apply(&placed);
        assert_eq!(moved[0].position, Point::ORIGIN);
        assert_eq!(moved[1].position, Point::new(-30.0, 110.0));
        assert_eq!(placed[1].position, Point::new(0.0, 100.0));
        assert_eq!(moved[1].depth, 1);
    }
}
