//! Core vocabulary shared by every layout stage
//!
//! Geometry types, the input tree model, configuration, errors, and the two
//! stages that operate on placed geometry only: connector routing and path
//! compilation.

mod config;
pub mod edge_routing;
mod error;
pub mod logging;
pub mod path;
mod tree;
mod types;

pub use config::*;
pub use edge_routing::{router_for, EdgeRouter, FlowRouter, GeometricRouter, Orientation};
pub use error::*;
pub use logging::{init_default_logging, init_logging, LogFormat};
pub use path::{compile_path, compile_path_with_radius, Path, PathCommand, MAX_CORNER_RADIUS};
pub use tree::*;
pub use types::*;
