//! Subtree measurement
//!
//! The extent a subtree claims depends on how its root spreads its children:
//!
//! - horizontal: children side by side, so widths add up (plus `gap.x` between
//!   them) and the tallest child sits one `gap.y` below the node;
//! - vertical: children stacked, so heights add up (plus `gap.y` between them)
//!   and the widest child only contributes `compression` of its width, since
//!   stacked children are indented rather than spread.

use std::collections::HashMap;
use tracing::trace;

use super::SizeRegistry;
use crate::core::{Dimensions, FlowDirection, GraphConfig, HierarchyNode, Result};

/// Measured subtree extents keyed by node id, filled in one pass
pub type SubtreeExtents<'a> = HashMap<&'a str, Dimensions>;

/// Pure subtree measurement over a registry and a config
#[derive(Debug, Clone, Copy)]
pub struct SubtreeMeasurer<'r> {
    registry: &'r SizeRegistry,
    config: &'r GraphConfig,
}

impl<'r> SubtreeMeasurer<'r> {
    pub fn new(registry: &'r SizeRegistry, config: &'r GraphConfig) -> Self {
        Self { registry, config }
    }

    /// Width needed to draw `node`'s whole subtree
    pub fn measure_width<T>(&self, node: &HierarchyNode<T>) -> Result<f64> {
        Ok(self.measure(node)?.width)
    }

    /// Height needed to draw `node`'s whole subtree
    pub fn measure_height<T>(&self, node: &HierarchyNode<T>) -> Result<f64> {
        Ok(self.measure(node)?.height)
    }

    /// Width and height of `node`'s subtree
    pub fn measure<T>(&self, node: &HierarchyNode<T>) -> Result<Dimensions> {
        let own = self.registry.require(&node.id)?;
        if node.is_leaf() {
            return Ok(own);
        }
        let children = node
            .children
            .iter()
            .map(|child| self.measure(child))
            .collect::<Result<Vec<_>>>()?;
        Ok(combine(own, &children, self.config.direction_for(node), self.config))
    }

    /// Measure every subtree under `root` exactly once, bottom-up
    pub fn measure_all<'a, T>(&self, root: &'a HierarchyNode<T>) -> Result<SubtreeExtents<'a>> {
        let mut extents = SubtreeExtents::with_capacity(root.node_count());
        self.measure_into(root, &mut extents)?;
        Ok(extents)
    }

    fn measure_into<'a, T>(
        &self,
        node: &'a HierarchyNode<T>,
        extents: &mut SubtreeExtents<'a>,
    ) -> Result<Dimensions> {
        let own = self.registry.require(&node.id)?;
        let mut children = Vec::with_capacity(node.children.len());
        for child in &node.children {
            children.push(self.measure_into(child, extents)?);
        }
        let extent = if children.is_empty() {
            own
        } else {
            combine(own, &children, self.config.direction_for(node), self.config)
        };
        trace!(id = %node.id, width = extent.width, height = extent.height, "Measured subtree");
        extents.insert(node.id.as_str(), extent);
        Ok(extent)
    }
}

/// Combine a node's own size with its children's subtree extents
fn combine(
    own: Dimensions,
    children: &[Dimensions],
    direction: FlowDirection,
    config: &GraphConfig,
) -> Dimensions {
    let count = children.len() as f64;
    let widest = children.iter().map(|c| c.width).fold(0.0, f64::max);
    let tallest = children.iter().map(|c| c.height).fold(0.0, f64::max);

    match direction {
        FlowDirection::Horizontal => {
            let spread: f64 = children.iter().map(|c| c.width).sum::<f64>()
                + (count - 1.0) * config.gap.x;
            Dimensions::new(
                own.width.max(spread),
                own.height + config.gap.y + tallest,
            )
        }
        FlowDirection::Vertical => {
            let stack: f64 = children.iter().map(|c| c.height).sum::<f64>()
                + (count - 1.0) * config.gap.y;
            Dimensions::new(
                own.width + config.gap.x + config.tuning.compression * widest,
                own.height.max(stack),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Gap;

    fn setup(sizes: &[(&str, f64, f64)]) -> SizeRegistry {
        let mut registry = SizeRegistry::new();
        for (id, w, h) in sizes {
            registry.register(*id, Dimensions::new(*w, *h)).unwrap();
        }
        registry
    }

    #[test]
    fn test_leaf_is_own_size() {
        let registry = setup(&[("leaf", 30.0, 12.0)]);
        let config = GraphConfig::new(Gap::new(20.0, 60.0));
        let measurer = SubtreeMeasurer::new(&registry, &config);
        let leaf: HierarchyNode = HierarchyNode::new("leaf");
        assert_eq!(measurer.measure_width(&leaf).unwrap(), 30.0);
        assert_eq!(measurer.measure_height(&leaf).unwrap(), 12.0);
    }

    #[test]
    fn test_horizontal_spread() {
        let registry = setup(&[("r", 80.0, 40.0), ("a", 100.0, 50.0), ("b", 100.0, 30.0)]);
        let config = GraphConfig::new(Gap::new(20.0, 60.0));
        let measurer = SubtreeMeasurer::new(&registry, &config);
        let tree: HierarchyNode = HierarchyNode::new("r")
            .with_child(HierarchyNode::new("a"))
            .with_child(HierarchyNode::new("b"));
        // 100 + 100 + 20 wider than the root itself
        assert_eq!(measurer.measure_width(&tree).unwrap(), 220.0);
        // 40 + 60 + tallest child 50
        assert_eq!(measurer.measure_height(&tree).unwrap(), 150.0);
    }

    #[test]
    fn test_horizontal_parent_wider_than_children() {
        let registry = setup(&[("r", 500.0, 40.0), ("a", 100.0, 50.0)]);
        let config = GraphConfig::new(Gap::new(20.0, 60.0));
        let measurer = SubtreeMeasurer::new(&registry, &config);
        let tree: HierarchyNode = HierarchyNode::new("r").with_child(HierarchyNode::new("a"));
        assert_eq!(measurer.measure_width(&tree).unwrap(), 500.0);
    }

    #[test]
    fn test_vertical_stack_with_compression() {
        let registry = setup(&[("r", 80.0, 40.0), ("a", 100.0, 50.0), ("b", 200.0, 30.0)]);
        let config = GraphConfig::new(Gap::new(20.0, 60.0));
        let measurer = SubtreeMeasurer::new(&registry, &config);
        let tree: HierarchyNode = HierarchyNode::new("r")
            .with_direction(FlowDirection::Vertical)
            .with_child(HierarchyNode::new("a"))
            .with_child(HierarchyNode::new("b"));
        // 80 + 20 + 0.4 * 200
        assert_eq!(measurer.measure_width(&tree).unwrap(), 180.0);
        // max(40, 50 + 30 + 60)
        assert_eq!(measurer.measure_height(&tree).unwrap(), 140.0);
    }

    #[test]
    fn test_measure_all_matches_individual_measurement() {
        let registry = setup(&[
            ("r", 80.0, 40.0),
            ("a", 100.0, 50.0),
            ("a1", 60.0, 20.0),
            ("a2", 70.0, 25.0),
            ("b", 90.0, 30.0),
        ]);
        let config = GraphConfig::new(Gap::new(20.0, 60.0));
        let measurer = SubtreeMeasurer::new(&registry, &config);
        let tree: HierarchyNode = HierarchyNode::new("r")
            .with_child(
                HierarchyNode::new("a")
                    .with_direction(FlowDirection::Vertical)
                    .with_child(HierarchyNode::new("a1"))
                    .with_child(HierarchyNode::new("a2")),
            )
            .with_child(HierarchyNode::new("b"));

        let extents = measurer.measure_all(&tree).unwrap();
        assert_eq!(extents.len(), 5);
        for node in tree.traverse() {
            assert_eq!(extents[node.id.as_str()], measurer.measure(node).unwrap());
        }
    }

    #[test]
    fn test_missing_size_is_an_error() {
        let registry = setup(&[("r", 80.0, 40.0)]);
        let config = GraphConfig::new(Gap::new(20.0, 60.0));
        let measurer = SubtreeMeasurer::new(&registry, &config);
        let tree: HierarchyNode = HierarchyNode::new("r").with_child(HierarchyNode::new("ghost"));
        assert!(measurer.measure(&tree).is_err());
    }
}
