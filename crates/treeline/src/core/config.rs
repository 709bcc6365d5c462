//! Layout configuration
//!
//! [`GraphConfig`] is the resolved form the engine runs on: every field holds a
//! defined number. [`GraphOptions`] is the partial form callers deserialize
//! from JSON, where every field but `gap` may be omitted and is defaulted
//! independently by [`GraphOptions::resolve`].

use serde::{Deserialize, Serialize};

use super::{FlowDirection, HierarchyNode, LayoutError, Result};

/// Spacing between a parent and its children, and between siblings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gap {
    pub x: f64,
    pub y: f64,
}

impl Gap {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Placement tuning knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TuningConfig {
    /// Rightward step of vertically stacked children past the parent's left edge
    pub indent: f64,
    /// Constant Y adjustment applied to vertically stacked children
    pub vertical_shift: f64,
    /// Share of the widest child a vertical subtree reports to its ancestor
    pub compression: f64,
    /// Multiplier on `gap.y` between stacked siblings
    pub sibling_factor: f64,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            indent: 60.0,
            vertical_shift: -25.0,
            compression: 0.4,
            sibling_factor: 0.833,
        }
    }
}

/// How connectors are classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeRoutingPolicy {
    /// Four-way midpoint routing chosen from the placed geometry alone
    #[default]
    Geometric,
    /// Spine-and-branch for vertical parents, stepped Z for horizontal ones
    Flow,
}

/// Connector routing settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeConfig {
    /// Extra shift of the spine (flow routing only)
    pub spine_offset: f64,
    /// Distance of the spine from the parent's edge (flow routing only)
    pub spine_gap: f64,
    pub routing: EdgeRoutingPolicy,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            spine_offset: 0.0,
            spine_gap: 20.0,
            routing: EdgeRoutingPolicy::Geometric,
        }
    }
}

/// Fully resolved layout configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    pub gap: Gap,
    pub direction: FlowDirection,
    pub tuning: TuningConfig,
    pub edge: EdgeConfig,
}

impl GraphConfig {
    /// Configuration with the given gap and every other field defaulted
    pub fn new(gap: Gap) -> Self {
        Self {
            gap,
            direction: FlowDirection::default(),
            tuning: TuningConfig::default(),
            edge: EdgeConfig::default(),
        }
    }

    pub fn with_direction(mut self, direction: FlowDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_tuning(mut self, tuning: TuningConfig) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_edge(mut self, edge: EdgeConfig) -> Self {
        self.edge = edge;
        self
    }

    /// Direction in which `node`'s children flow.
    ///
    /// This is the single place direction is resolved; measurement, placement
    /// and flow routing all go through it.
    pub fn direction_for<T>(&self, node: &HierarchyNode<T>) -> FlowDirection {
        node.direction.unwrap_or(self.direction)
    }

    /// Check that every numeric field is usable
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("gap.x", self.gap.x),
            ("gap.y", self.gap.y),
            ("tuning.indent", self.tuning.indent),
            ("tuning.vertical_shift", self.tuning.vertical_shift),
            ("tuning.compression", self.tuning.compression),
            ("tuning.sibling_factor", self.tuning.sibling_factor),
            ("edge.spine_offset", self.edge.spine_offset),
            ("edge.spine_gap", self.edge.spine_gap),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(LayoutError::invalid_config(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        if self.gap.x < 0.0 || self.gap.y < 0.0 {
            return Err(LayoutError::invalid_config(format!(
                "gap must be non-negative, got ({}, {})",
                self.gap.x, self.gap.y
            )));
        }
        Ok(())
    }
}

/// Partial tuning block as supplied by callers
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TuningOptions {
    pub indent: Option<f64>,
    pub vertical_shift: Option<f64>,
    pub compression: Option<f64>,
    pub sibling_factor: Option<f64>,
}

/// Partial edge block as supplied by callers
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EdgeOptions {
    pub spine_offset: Option<f64>,
    pub spine_gap: Option<f64>,
    pub routing: Option<EdgeRoutingPolicy>,
}

/// Caller-facing configuration where everything but `gap` is optional
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphOptions {
    pub gap: Option<Gap>,
    pub direction: Option<FlowDirection>,
    pub tuning: TuningOptions,
    pub edge: EdgeOptions,
}

impl GraphOptions {
    /// Fill defaults field by field and validate the result
    pub fn resolve(&self) -> Result<GraphConfig> {
        let gap = self
            .gap
            .ok_or_else(|| LayoutError::invalid_config("gap is required"))?;
        let tuning_defaults = TuningConfig::default();
        let edge_defaults = EdgeConfig::default();

        let config = GraphConfig {
            gap,
            direction: self.direction.unwrap_or_default(),
            tuning: TuningConfig {
                indent: self.tuning.indent.unwrap_or(tuning_defaults.indent),
                vertical_shift: self
                    .tuning
                    .vertical_shift
                    .unwrap_or(tuning_defaults.vertical_shift),
                compression: self
                    .tuning
                    .compression
                    .unwrap_or(tuning_defaults.compression),
                sibling_factor: self
                    .tuning
                    .sibling_factor
                    .unwrap_or(tuning_defaults.sibling_factor),
            },
            edge: EdgeConfig {
                spine_offset: self.edge.spine_offset.unwrap_or(edge_defaults.spine_offset),
                spine_gap: self.edge.spine_gap.unwrap_or(edge_defaults.spine_gap),
                routing: self.edge.routing.unwrap_or(edge_defaults.routing),
            },
        };
        config.validate()?;
        Ok(config)
    }
}
