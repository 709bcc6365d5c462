//! Path compilation: waypoints to draw instructions
//!
//! Orthogonal corners (horizontal into vertical, or vertical into horizontal)
//! are replaced by a short straight lead-in and a quadratic curve whose control
//! point is the original corner. Any other transition stays a plain line.

use serde::Serialize;
use std::fmt;
use tracing::trace;

use super::{LayoutError, Point, Result};

/// Upper bound on the corner radius
pub const MAX_CORNER_RADIUS: f64 = 32.0;

/// A single draw instruction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo { to: Point },
    LineTo { to: Point },
    QuadTo { control: Point, to: Point },
}

impl PathCommand {
    /// Point the pen ends at after this instruction
    pub fn end(&self) -> Point {
        match *self {
            PathCommand::MoveTo { to } | PathCommand::LineTo { to } => to,
            PathCommand::QuadTo { to, .. } => to,
        }
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCommand::MoveTo { to } => write!(f, "M {} {}", coord(to.x), coord(to.y)),
            PathCommand::LineTo { to } => write!(f, "L {} {}", coord(to.x), coord(to.y)),
            PathCommand::QuadTo { control, to } => write!(
                f,
                "Q {} {} {} {}",
                coord(control.x),
                coord(control.y),
                coord(to.x),
                coord(to.y)
            ),
        }
    }
}

/// A validated instruction sequence that always starts with a move
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Build a path, rejecting empty sequences and ones not starting with a move
    pub fn from_commands(commands: Vec<PathCommand>) -> Result<Self> {
        match commands.first() {
            None => Err(LayoutError::path_error("empty instruction list")),
            Some(PathCommand::MoveTo { .. }) => Ok(Self { commands }),
            Some(other) => Err(LayoutError::path_error(format!(
                "path must start with a move, found `{}`",
                other
            ))),
        }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Number of quadratic corners in the path
    pub fn curve_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::QuadTo { .. }))
            .count()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

fn segment_axis(from: Point, to: Point) -> Option<Axis> {
    let same_x = from.x == to.x;
    let same_y = from.y == to.y;
    match (same_x, same_y) {
        (false, true) => Some(Axis::Horizontal),
        (true, false) => Some(Axis::Vertical),
        _ => None,
    }
}

/// Move `distance` from `from` towards `to`
fn step_towards(from: Point, to: Point, distance: f64) -> Point {
    match segment_axis(from, to) {
        Some(Axis::Horizontal) => Point::new(from.x + (to.x - from.x).signum() * distance, from.y),
        Some(Axis::Vertical) => Point::new(from.x, from.y + (to.y - from.y).signum() * distance),
        None => {
            let length = from.distance(to);
            if length == 0.0 {
                from
            } else {
                from.lerp(to, distance / length)
            }
        }
    }
}

/// Compile waypoints with the default corner radius
pub fn compile_path(points: &[Point]) -> Result<Path> {
    compile_path_with_radius(points, MAX_CORNER_RADIUS)
}

/// Compile waypoints, rounding orthogonal corners with at most `max_radius`.
///
/// The radius at each corner never exceeds half of the shorter adjacent
/// segment, so consecutive corners cannot overlap. Only exactly axis-aligned
/// segments form a corner; any diagonal, however slight, is drawn straight.
pub fn compile_path_with_radius(points: &[Point], max_radius: f64) -> Result<Path> {
    if points.len() < 2 {
        return Err(LayoutError::path_error(format!(
            "at least two waypoints are required, got {}",
            points.len()
        )));
    }

    let mut commands = Vec::with_capacity(points.len() * 2);
    commands.push(PathCommand::MoveTo { to: points[0] });

    for window in points.windows(3) {
        let (prev, corner, next) = (window[0], window[1], window[2]);
        let incoming = segment_axis(prev, corner);
        let outgoing = segment_axis(corner, next);

        let is_corner = matches!(
            (incoming, outgoing),
            (Some(Axis::Horizontal), Some(Axis::Vertical))
                | (Some(Axis::Vertical), Some(Axis::Horizontal))
        );
        if !is_corner {
            commands.push(PathCommand::LineTo { to: corner });
            continue;
        }

        let shorter = prev.distance(corner).min(corner.distance(next));
        let radius = max_radius.min(shorter / 2.0);
        let entry = step_towards(corner, prev, radius);
        let exit = step_towards(corner, next, radius);
        trace!(radius, x = corner.x, y = corner.y, "Rounding corner");

        commands.push(PathCommand::LineTo { to: entry });
        commands.push(PathCommand::QuadTo {
            control: corner,
            to: exit,
        });
    }

    commands.push(PathCommand::LineTo {
        to: points[points.len() - 1],
    });
    Path::from_commands(commands)
}

/// Format a coordinate with at most two decimals and no trailing zeros
fn coord(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
