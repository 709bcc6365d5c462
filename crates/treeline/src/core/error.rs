//! Core error types for tree layout
//!
//! Every failure here is a precondition failure or a path construction
//! failure. None of them are transient, so nothing is retried internally.

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T, E = LayoutError> = std::result::Result<T, E>;

/// Core error types for layout, routing and path compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Sizes not ready: {missing} node(s) have no registered size")]
    SizesNotReady { missing: usize },

    #[error("Unknown node: {id}")]
    UnknownNode { id: String },

    #[error("Duplicate node id: {id}")]
    DuplicateId { id: String },

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid dimensions for node {id}: sizes must be finite and non-negative")]
    InvalidDimensions { id: String },

    #[error("Path error: {message}")]
    Path { message: String },
}

impl LayoutError {
    /// Create a new readiness error
    pub fn sizes_not_ready(missing: usize) -> Self {
        Self::SizesNotReady { missing }
    }

    /// Create a new unknown-node error
    pub fn unknown_node(id: impl Into<String>) -> Self {
        Self::UnknownNode { id: id.into() }
    }

    /// Create a new duplicate-id error
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    /// Create a new config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new dimensions error
    pub fn invalid_dimensions(id: impl Into<String>) -> Self {
        Self::InvalidDimensions { id: id.into() }
    }

    /// Create a new path construction error
    pub fn path_error(message: impl Into<String>) -> Self {
        Self::Path {
            message: message.into(),
        }
    }
}
