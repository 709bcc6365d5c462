//! Tree layout engine
//!
//! Pipeline: sizes are registered → [`LayoutEngine::compute`] validates the
//! tree, measures every subtree once, places every node, then routes one
//! connector per parent/child pair. Edge routing is also exposed on its own
//! ([`LayoutEngine::regenerate_edges`]) so interactive callers can refresh
//! connectors after moving nodes without re-running measurement or placement.

mod measure;
mod overrides;
mod placement;
mod registry;

pub use measure::{SubtreeExtents, SubtreeMeasurer};
pub use overrides::PositionOverrides;
pub use placement::{NodePlacer, PlacedNode};
pub use registry::SizeRegistry;

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, info, span, trace, warn, Level};

use crate::core::{
    compile_path, router_for, Bounds, Dimensions, EdgeRouter, GraphConfig, GraphOptions,
    HierarchyNode, LayoutError, Path, Point, Result,
};

/// A routed connector between a parent and one of its direct children
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub waypoints: Vec<Point>,
}

impl Edge {
    /// Compile the waypoints into a drawable path
    pub fn path(&self) -> Result<Path> {
        compile_path(&self.waypoints)
    }
}

/// Result of one layout pass
#[derive(Debug)]
pub struct Layout<'a, T = ()> {
    /// Placed nodes in depth-first preorder
    pub nodes: Vec<PlacedNode<'a, T>>,
    /// One edge per parent/child pair, ordered by target in depth-first preorder
    pub edges: Vec<Edge>,
    /// Box covering every placed node
    pub bounds: Bounds,
}

impl<'a, T> Layout<'a, T> {
    pub fn node(&self, id: &str) -> Option<&PlacedNode<'a, T>> {
        self.nodes.iter().find(|p| p.id() == id)
    }

    pub fn edge(&self, source: &str, target: &str) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }
}

/// Layout façade owning the configuration and the size registry
pub struct LayoutEngine {
    config: GraphConfig,
    registry: SizeRegistry,
    router: Box<dyn EdgeRouter>,
}

impl fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("config", &self.config)
            .field("registered", &self.registry.len())
            .field("router", &self.router.name())
            .finish()
    }
}

impl LayoutEngine {
    /// Create an engine with an empty registry
    pub fn new(config: GraphConfig) -> Result<Self> {
        Self::with_registry(config, SizeRegistry::new())
    }

    /// Create an engine from partial options, defaulting what is omitted
    pub fn from_options(options: &GraphOptions) -> Result<Self> {
        Self::new(options.resolve()?)
    }

    /// Create an engine around an existing registry
    pub fn with_registry(config: GraphConfig, registry: SizeRegistry) -> Result<Self> {
        config.validate()?;
        let router = router_for(&config.edge);
        Ok(Self {
            config,
            registry,
            router,
        })
    }

    /// Replace the connector routing strategy
    pub fn with_router(mut self, router: Box<dyn EdgeRouter>) -> Self {
        self.router = router;
        self
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn registry(&self) -> &SizeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SizeRegistry {
        &mut self.registry
    }

    /// Store or overwrite the measured size of a node
    pub fn register_size(&mut self, id: impl Into<String>, size: Dimensions) -> Result<()> {
        self.registry.register(id, size)
    }

    /// True iff every node of the tree has a registered size
    pub fn is_ready<T>(&self, root: &HierarchyNode<T>) -> bool {
        self.registry.is_ready(root)
    }

    /// Depth-first preorder enumeration of the tree
    pub fn traverse<'a, T>(&self, root: &'a HierarchyNode<T>) -> Vec<&'a HierarchyNode<T>> {
        root.traverse()
    }

    /// Depth-first ids of `node` and its descendants
    pub fn subtree_ids<'a, T>(&self, node: &'a HierarchyNode<T>) -> Vec<&'a str> {
        node.subtree_ids()
    }

    /// Subtree measurement over this engine's registry and config
    pub fn measurer(&self) -> SubtreeMeasurer<'_> {
        SubtreeMeasurer::new(&self.registry, &self.config)
    }

    /// Measure, place and route the whole tree.
    ///
    /// Fails without a partial result if any id is duplicated or any node
    /// lacks a registered size.
    pub fn compute<'a, T>(&self, root: &'a HierarchyNode<T>) -> Result<Layout<'a, T>> {
        let compute_span = span!(Level::INFO, "compute_layout", root = %root.id);
        let _enter = compute_span.enter();

        root.validate_unique_ids()?;
        self.registry.ensure_ready(root)?;

        let extents = self.measurer().measure_all(root)?;
        debug!(measured = extents.len(), "Measured subtrees");

        let nodes = NodePlacer::new(&self.registry, &self.config).place(root, &extents)?;
        let edges = self.regenerate_edges(&nodes)?;
        let bounds = self.bounds_of(&nodes)?;

        info!(
            nodes = nodes.len(),
            edges = edges.len(),
            width = bounds.width(),
            height = bounds.height(),
            "Layout computed"
        );
        Ok(Layout {
            nodes,
            edges,
            bounds,
        })
    }

    /// Route one connector per parent/child pair from already placed nodes.
    ///
    /// Positions are taken as given, so this works equally on fresh placement
    /// output and on nodes moved by a [`PositionOverrides`] overlay.
    pub fn regenerate_edges<T>(&self, placed: &[PlacedNode<'_, T>]) -> Result<Vec<Edge>> {
        let route_span = span!(Level::INFO, "regenerate_edges", placed = placed.len());
        let _enter = route_span.enter();

        let mut lookup: HashMap<&str, &PlacedNode<'_, T>> = HashMap::with_capacity(placed.len());
        for p in placed {
            if lookup.insert(p.id(), p).is_some() {
                return Err(LayoutError::duplicate_id(p.id()));
            }
        }

        let placed_children: HashSet<&str> = placed
            .iter()
            .flat_map(|p| p.node.children.iter().map(|c| c.id.as_str()))
            .collect();

        let mut edges = Vec::with_capacity(placed.len().saturating_sub(1));
        for top in placed.iter().filter(|p| !placed_children.contains(p.id())) {
            self.route_subtree(top, &lookup, &mut edges)?;
        }
        debug!(edges = edges.len(), router = self.router.name(), "Regenerated edges");
        Ok(edges)
    }

    /// Emit edges below `parent`, each one as its child is visited
    fn route_subtree<T>(
        &self,
        parent: &PlacedNode<'_, T>,
        lookup: &HashMap<&str, &PlacedNode<'_, T>>,
        edges: &mut Vec<Edge>,
    ) -> Result<()> {
        if parent.node.is_leaf() {
            return Ok(());
        }
        let parent_box = Bounds::from_center(parent.position, self.registry.require(parent.id())?);
        let direction = self.config.direction_for(parent.node);

        for child in &parent.node.children {
            let Some(&placed_child) = lookup.get(child.id.as_str()) else {
                warn!(parent = parent.id(), child = %child.id, "Child missing from placed nodes");
                return Err(LayoutError::unknown_node(&child.id));
            };
            let child_box =
                Bounds::from_center(placed_child.position, self.registry.require(&child.id)?);
            let waypoints = self.router.route(&parent_box, &child_box, direction);
            trace!(source = parent.id(), target = %child.id, points = waypoints.len(), "Routed edge");
            edges.push(Edge {
                source: parent.id().to_string(),
                target: child.id.clone(),
                waypoints,
            });
            self.route_subtree(placed_child, lookup, edges)?;
        }
        Ok(())
    }

    /// Route connectors against placed nodes with `overrides` applied
    pub fn regenerate_edges_with<T>(
        &self,
        placed: &[PlacedNode<'_, T>],
        overrides: &PositionOverrides,
    ) -> Result<Vec<Edge>> {
        self.regenerate_edges(&overrides.apply(placed))
    }

    /// Box covering every placed node
    pub fn bounds_of<T>(&self, placed: &[PlacedNode<'_, T>]) -> Result<Bounds> {
        let mut boxes = placed.iter().map(|p| {
            self.registry
                .require(p.id())
                .map(|size| Bounds::from_center(p.position, size))
        });
        let first = match boxes.next() {
            Some(first) => first?,
            None => return Ok(Bounds::from_center(Point::ORIGIN, Dimensions::default())),
        };
        boxes.try_fold(first, |acc, next| Ok(acc.union(&next?)))
    }
}
