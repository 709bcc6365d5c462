//! Connector routing between a parent and a child
//!
//! A router turns two node boxes into a short list of orthogonal waypoints.
//! Corner smoothing happens later in [`crate::core::path`].
//!
//! Two policies exist:
//!
//! - [`GeometricRouter`] classifies each pair from the placed geometry only,
//!   so connectors stay readable when a node has been dragged into an
//!   unexpected quadrant relative to its parent.
//! - [`FlowRouter`] routes from the parent's flow direction: a spine with
//!   branches for stacked children, a stepped Z for spread children.

use tracing::trace;

use super::{Bounds, EdgeConfig, EdgeRoutingPolicy, FlowDirection, Point};

/// A `|dy|` larger than this share of `|dx|` makes a connector primarily vertical
pub const VERTICAL_BIAS: f64 = 0.5;

/// Strategy for deriving connector waypoints
pub trait EdgeRouter: Send + Sync {
    /// Waypoints from `parent` to `child`, first point on the parent's border,
    /// last point on the child's border
    fn route(&self, parent: &Bounds, child: &Bounds, parent_direction: FlowDirection)
        -> Vec<Point>;

    /// Get the name of this routing policy
    fn name(&self) -> &'static str;
}

/// Side of the parent a connector leaves from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Below,
    Above,
    Right,
    Left,
}

impl Orientation {
    /// Classify the displacement between two box centres
    pub fn classify(parent: &Bounds, child: &Bounds) -> Self {
        let dx = child.center_x() - parent.center_x();
        let dy = child.center_y() - parent.center_y();
        if dy.abs() > dx.abs() * VERTICAL_BIAS {
            if dy > 0.0 {
                Orientation::Below
            } else {
                Orientation::Above
            }
        } else if dx >= 0.0 {
            Orientation::Right
        } else {
            Orientation::Left
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Orientation::Below | Orientation::Above)
    }
}

/// Four-way midpoint routing from the resulting geometry
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometricRouter;

impl GeometricRouter {
    pub fn new() -> Self {
        Self
    }
}

impl EdgeRouter for GeometricRouter {
    fn route(&self, parent: &Bounds, child: &Bounds, _: FlowDirection) -> Vec<Point> {
        let (px, py) = (parent.center_x(), parent.center_y());
        let (cx, cy) = (child.center_x(), child.center_y());
        let orientation = Orientation::classify(parent, child);
        trace!(?orientation, "Routing connector");

        match orientation {
            Orientation::Below => {
                let mid_y = (parent.bottom + child.top) / 2.0;
                vec![
                    Point::new(px, parent.bottom),
                    Point::new(px, mid_y),
                    Point::new(cx, mid_y),
                    Point::new(cx, child.top),
                ]
            }
            Orientation::Above => {
                let mid_y = (parent.top + child.bottom) / 2.0;
                vec![
                    Point::new(px, parent.top),
                    Point::new(px, mid_y),
                    Point::new(cx, mid_y),
                    Point::new(cx, child.bottom),
                ]
            }
            Orientation::Right => {
                let mid_x = (parent.right + child.left) / 2.0;
                vec![
                    Point::new(parent.right, py),
                    Point::new(mid_x, py),
                    Point::new(mid_x, cy),
                    Point::new(child.left, cy),
                ]
            }
            Orientation::Left => {
                let mid_x = (parent.left + child.right) / 2.0;
                vec![
                    Point::new(parent.left, py),
                    Point::new(mid_x, py),
                    Point::new(mid_x, cy),
                    Point::new(child.right, cy),
                ]
            }
        }
    }

    fn name(&self) -> &'static str {
        "geometric"
    }
}

/// Routing driven by the parent's configured flow direction
#[derive(Debug, Clone, Copy)]
pub struct FlowRouter {
    pub spine_offset: f64,
    pub spine_gap: f64,
}

impl FlowRouter {
    pub fn new(spine_offset: f64, spine_gap: f64) -> Self {
        Self {
            spine_offset,
            spine_gap,
        }
    }
}

impl Default for FlowRouter {
    fn default() -> Self {
        let defaults = EdgeConfig::default();
        Self::new(defaults.spine_offset, defaults.spine_gap)
    }
}

impl EdgeRouter for FlowRouter {
    fn route(&self, parent: &Bounds, child: &Bounds, parent_direction: FlowDirection) -> Vec<Point> {
        let reach = self.spine_gap + self.spine_offset;
        match parent_direction {
            // Spine down the parent's left side, branch right into the child
            FlowDirection::Vertical => {
                let spine_x = parent.left + reach;
                let cy = child.center_y();
                vec![
                    Point::new(spine_x, parent.bottom),
                    Point::new(spine_x, cy),
                    Point::new(child.left, cy),
                ]
            }
            // Stepped Z through a rail below the parent
            FlowDirection::Horizontal => {
                let px = parent.center_x();
                let cx = child.center_x();
                let rail_y = parent.bottom + reach;
                vec![
                    Point::new(px, parent.bottom),
                    Point::new(px, rail_y),
                    Point::new(cx, rail_y),
                    Point::new(cx, child.top),
                ]
            }
        }
    }

    fn name(&self) -> &'static str {
        "flow"
    }
}

/// Build the router selected by an edge config
pub fn router_for(config: &EdgeConfig) -> Box<dyn EdgeRouter> {
    match config.routing {
        EdgeRoutingPolicy::Geometric => Box::new(GeometricRouter::new()),
        EdgeRoutingPolicy::Flow => Box::new(FlowRouter::new(config.spine_offset, config.spine_gap)),
    }
}
