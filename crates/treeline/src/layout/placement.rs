//! Recursive node placement
//!
//! Every node is positioned by its centre. The root sits at the origin; each
//! other node is placed at the anchor its parent computed for it, according to
//! the parent's resolved flow direction:
//!
//! ```text
//! horizontal                      vertical
//!
//!        [parent]                 [parent]
//!   ┌───────┼───────┐                 ├── [child 0]
//! [c0]     [c1]    [c2]               ├── [child 1]
//!                                     └── [child 2]
//! ```

use tracing::{debug, trace};

use super::{SizeRegistry, SubtreeExtents};
use crate::core::{
    Bounds, Dimensions, FlowDirection, GraphConfig, HierarchyNode, LayoutError, Point, Result,
};

/// A node with its computed centre and depth (root depth is 0)
#[derive(Debug)]
pub struct PlacedNode<'a, T = ()> {
    pub node: &'a HierarchyNode<T>,
    pub position: Point,
    pub depth: usize,
}

impl<'a, T> PlacedNode<'a, T> {
    pub fn id(&self) -> &'a str {
        &self.node.id
    }

    /// Same node at a different position
    pub fn moved_to(&self, position: Point) -> Self {
        Self {
            node: self.node,
            position,
            depth: self.depth,
        }
    }
}

impl<T> Clone for PlacedNode<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PlacedNode<'_, T> {}

/// Places a whole tree given its measured subtree extents
#[derive(Debug, Clone, Copy)]
pub struct NodePlacer<'r> {
    registry: &'r SizeRegistry,
    config: &'r GraphConfig,
}

impl<'r> NodePlacer<'r> {
    pub fn new(registry: &'r SizeRegistry, config: &'r GraphConfig) -> Self {
        Self { registry, config }
    }

    /// Place `root` and its descendants, returned in depth-first preorder
    pub fn place<'a, T>(
        &self,
        root: &'a HierarchyNode<T>,
        extents: &SubtreeExtents<'a>,
    ) -> Result<Vec<PlacedNode<'a, T>>> {
        let mut placed = Vec::with_capacity(extents.len());
        self.place_node(root, 0, Point::ORIGIN, extents, &mut placed)?;
        Ok(placed)
    }

    fn place_node<'a, T>(
        &self,
        node: &'a HierarchyNode<T>,
        depth: usize,
        anchor: Point,
        extents: &SubtreeExtents<'a>,
        placed: &mut Vec<PlacedNode<'a, T>>,
    ) -> Result<()> {
        let position = if depth == 0 { Point::ORIGIN } else { anchor };
        placed.push(PlacedNode {
            node,
            position,
            depth,
        });
        if node.is_leaf() {
            return Ok(());
        }

        let bounds = Bounds::from_center(position, self.registry.require(&node.id)?);
        let direction = self.config.direction_for(node);
        debug!(
            id = %node.id,
            depth,
            %direction,
            children = node.children.len(),
            "Placing children"
        );

        let anchors = match direction {
            FlowDirection::Vertical => self.stacked_anchors(node, &bounds, extents)?,
            FlowDirection::Horizontal => self.spread_anchors(node, position, &bounds, extents)?,
        };

        for (child, child_anchor) in node.children.iter().zip(anchors) {
            trace!(id = %child.id, x = child_anchor.x, y = child_anchor.y, "Child anchor");
            self.place_node(child, depth + 1, child_anchor, extents, placed)?;
        }
        Ok(())
    }

    /// Children stacked below the parent and indented past its left edge
    fn stacked_anchors<T>(
        &self,
        node: &HierarchyNode<T>,
        bounds: &Bounds,
        extents: &SubtreeExtents<'_>,
    ) -> Result<Vec<Point>> {
        let gap = self.config.gap;
        let tuning = self.config.tuning;
        let heights = node
            .children
            .iter()
            .map(|child| extent_of(extents, child).map(|e| e.height))
            .collect::<Result<Vec<_>>>()?;

        let mut anchors = Vec::with_capacity(heights.len());
        let mut y = bounds.bottom + gap.y + heights[0] / 2.0 + tuning.vertical_shift;
        for (i, child) in node.children.iter().enumerate() {
            if i > 0 {
                y += heights[i - 1] / 2.0 + gap.y * tuning.sibling_factor + heights[i] / 2.0;
            }
            let own = self.registry.require(&child.id)?;
            let x = bounds.left + own.width / 2.0 + tuning.indent;
            anchors.push(Point::new(x, y));
        }
        Ok(anchors)
    }

    /// Children spread side by side, centred under the parent
    fn spread_anchors<T>(
        &self,
        node: &HierarchyNode<T>,
        position: Point,
        bounds: &Bounds,
        extents: &SubtreeExtents<'_>,
    ) -> Result<Vec<Point>> {
        let gap = self.config.gap;
        let widths = node
            .children
            .iter()
            .map(|child| extent_of(extents, child).map(|e| e.width))
            .collect::<Result<Vec<_>>>()?;

        let total = widths.iter().sum::<f64>() + (widths.len() as f64 - 1.0) * gap.x;
        let mut cursor = position.x - total / 2.0;
        let mut anchors = Vec::with_capacity(widths.len());
        for (child, width) in node.children.iter().zip(&widths) {
            let x = if widths.len() == 1 {
                position.x
            } else {
                cursor + width / 2.0
            };
            cursor += width + gap.x;
            let own = self.registry.require(&child.id)?;
            anchors.push(Point::new(x, bounds.bottom + gap.y + own.height / 2.0));
        }
        Ok(anchors)
    }
}

fn extent_of<T>(extents: &SubtreeExtents<'_>, node: &HierarchyNode<T>) -> Result<Dimensions> {
    extents
        .get(node.id.as_str())
        .copied()
        .ok_or_else(|| LayoutError::unknown_node(&node.id))
}
