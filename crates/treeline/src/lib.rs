//! Treeline - Hierarchical tree layout with routed connectors
//!
//! A library for positioning the nodes of a tree in 2D space from
//! caller-measured node sizes, and for routing smooth orthogonal connectors
//! between every parent and its children.
//!
//! # Quick Start
//!
//! ```rust
//! use treeline::{layout_tree, Dimensions, Gap, GraphConfig, HierarchyNode};
//!
//! let tree: HierarchyNode = HierarchyNode::new("root")
//!     .with_child(HierarchyNode::new("left"))
//!     .with_child(HierarchyNode::new("right"));
//!
//! let sizes = [
//!     ("root", Dimensions::new(80.0, 40.0)),
//!     ("left", Dimensions::new(100.0, 50.0)),
//!     ("right", Dimensions::new(100.0, 50.0)),
//! ];
//!
//! let layout = layout_tree(&tree, sizes, GraphConfig::new(Gap::new(20.0, 60.0))).unwrap();
//! assert_eq!(layout.nodes[0].position.x, 0.0);
//! assert_eq!(layout.edges.len(), 2);
//! ```
//!
//! # Advanced Usage
//!
//! Keep an engine around to re-route connectors after nodes are moved:
//!
//! ```rust
//! use treeline::prelude::*;
//!
//! let tree: HierarchyNode = HierarchyNode::new("root")
//!     .with_direction(FlowDirection::Vertical)
//!     .with_child(HierarchyNode::new("a"))
//!     .with_child(HierarchyNode::new("b"));
//!
//! let mut engine = LayoutEngine::new(GraphConfig::new(Gap::new(20.0, 60.0))).unwrap();
//! for id in ["root", "a", "b"] {
//!     engine.register_size(id, Dimensions::new(100.0, 40.0)).unwrap();
//! }
//! assert!(engine.is_ready(&tree));
//!
//! let layout = engine.compute(&tree).unwrap();
//!
//! let mut overrides = PositionOverrides::new();
//! overrides.offset("b", Point::new(40.0, 0.0));
//! let edges = engine.regenerate_edges_with(&layout.nodes, &overrides).unwrap();
//!
//! let path = edges[1].path().unwrap();
//! assert!(path.to_string().starts_with("M "));
//! ```

pub mod core;
pub mod layout;

pub use core::*;
pub use layout::{
    Edge, Layout, LayoutEngine, NodePlacer, PlacedNode, PositionOverrides, SizeRegistry,
    SubtreeExtents, SubtreeMeasurer,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        compile_path, Bounds, Dimensions, EdgeRouter, EdgeRoutingPolicy, FlowDirection, Gap,
        GraphConfig, GraphOptions, HierarchyNode, LayoutError, Path, PathCommand, Point,
    };
    pub use crate::layout::{Edge, Layout, LayoutEngine, PlacedNode, PositionOverrides};
}

/// Lay out a tree in one call
///
/// Registers every `(id, size)` pair into a fresh engine and computes the
/// layout.
///
/// # Arguments
/// * `root` - The tree to lay out
/// * `sizes` - Measured size of every node, keyed by id
/// * `config` - Spacing and direction settings
///
/// # Returns
/// * `Ok(Layout)` - Placed nodes, routed edges and overall bounds
/// * `Err` - If the config is invalid, a size is invalid or missing, or an id repeats
pub fn layout_tree<'a, T, I, S>(
    root: &'a HierarchyNode<T>,
    sizes: I,
    config: GraphConfig,
) -> Result<Layout<'a, T>>
where
    I: IntoIterator<Item = (S, Dimensions)>,
    S: Into<String>,
{
    let mut engine = LayoutEngine::new(config)?;
    for (id, size) in sizes {
        engine.register_size(id, size)?;
    }
    engine.compute(root)
}
