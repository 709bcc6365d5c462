//! Core type definitions for tree layout
//!
//! This module contains the geometric vocabulary shared by every layout stage:
//! flow direction, points, node dimensions and axis-aligned bounds.
//!
//! The coordinate system has its origin at the root's centre, X grows to the
//! right and Y grows downward.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Flow direction for a node's children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    /// Children stacked below the parent, indented to the right
    Vertical,
    /// Children spread side by side beneath the parent
    #[default]
    Horizontal,
}

impl FlowDirection {
    /// Parse a direction name (`vertical`/`horizontal`, also `v`/`h`)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "vertical" | "v" => Some(FlowDirection::Vertical),
            "horizontal" | "h" => Some(FlowDirection::Horizontal),
            _ => None,
        }
    }

    /// Returns true if children are stacked
    pub fn is_vertical(&self) -> bool {
        matches!(self, FlowDirection::Vertical)
    }

    /// Returns true if children are spread side by side
    pub fn is_horizontal(&self) -> bool {
        matches!(self, FlowDirection::Horizontal)
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowDirection::Vertical => write!(f, "vertical"),
            FlowDirection::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// A 2D point (or displacement) in layout space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The coordinate system origin, where the root is always placed
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `to`; `t = 0` is `self`, `t = 1` is `to`
    pub fn lerp(self, to: Point, t: f64) -> Point {
        Point {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Measured size of a single node, supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides finite and non-negative
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// Axis-aligned box in layout space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    /// Box of the given size centred on `center`
    pub fn from_center(center: Point, size: Dimensions) -> Self {
        let half_w = size.width / 2.0;
        let half_h = size.height / 2.0;
        Self {
            left: center.x - half_w,
            top: center.y - half_h,
            right: center.x + half_w,
            bottom: center.y + half_h,
        }
    }

    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Smallest box containing both
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing() {
        assert_eq!(FlowDirection::from_str("vertical"), Some(FlowDirection::Vertical));
        assert_eq!(FlowDirection::from_str("V"), Some(FlowDirection::Vertical));
        assert_eq!(FlowDirection::from_str("Horizontal"), Some(FlowDirection::Horizontal));
        assert_eq!(FlowDirection::from_str("h"), Some(FlowDirection::Horizontal));
        assert_eq!(FlowDirection::from_str("diagonal"), None);
    }

    #[test]
    fn test_direction_default_and_display() {
        assert_eq!(FlowDirection::default(), FlowDirection::Horizontal);
        assert_eq!(FlowDirection::Vertical.to_string(), "vertical");
        assert_eq!(FlowDirection::Horizontal.to_string(), "horizontal");
        assert!(FlowDirection::Vertical.is_vertical());
        assert!(!FlowDirection::Vertical.is_horizontal());
    }

    #[test]
    fn test_direction_serde_lowercase() {
        let json = serde_json::to_string(&FlowDirection::Vertical).unwrap();
        assert_eq!(json, "\"vertical\"");
        let parsed: FlowDirection = serde_json::from_str("\"horizontal\"").unwrap();
        assert_eq!(parsed, FlowDirection::Horizontal);
    }

    #[test]
    fn test_point_lerp_and_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        assert_eq!(a.lerp(b, 0.25), Point::new(25.0, 0.0));
        assert_eq!(a.distance(Point::new(3.0, 4.0)), 5.0);
        assert_eq!(a + b, b);
        assert_eq!(b - b, Point::ORIGIN);
    }

    #[test]
    fn test_dimensions_validity() {
        assert!(Dimensions::new(0.0, 0.0).is_valid());
        assert!(Dimensions::new(10.0, 5.0).is_valid());
        assert!(!Dimensions::new(-1.0, 5.0).is_valid());
        assert!(!Dimensions::new(f64::NAN, 5.0).is_valid());
        assert!(!Dimensions::new(1.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_bounds_from_center() {
        let b = Bounds::from_center(Point::new(10.0, 20.0), Dimensions::new(40.0, 10.0));
        assert_eq!(b.left, -10.0);
        assert_eq!(b.right, 30.0);
        assert_eq!(b.top, 15.0);
        assert_eq!(b.bottom, 25.0);
        assert_eq!(b.center(), Point::new(10.0, 20.0));
        assert_eq!(b.width(), 40.0);
        assert_eq!(b.height(), 10.0);
    }

    #[test]
    fn test_bounds_union() {
        let a = Bounds::from_center(Point::ORIGIN, Dimensions::new(10.0, 10.0));
        let b = Bounds::from_center(Point::new(50.0, 50.0), Dimensions::new(10.0, 10.0));
        let u = a.union(&b);
        assert_eq!(u.left, -5.0);
        assert_eq!(u.top, -5.0);
        assert_eq!(u.right, 55.0);
        assert_eq!(u.bottom, 55.0);
    }
}
