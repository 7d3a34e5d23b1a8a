//! Error types for the map, graph store and search layers.

use thiserror::Error;

/// Failures reported by [`HashtableMap`](crate::HashtableMap).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    #[error("key already maps to a value")]
    DuplicateKey,

    #[error("key not stored in this map")]
    KeyNotFound,
}

/// Failures reported by [`Graph`](crate::Graph) and the search layers built
/// on top of it.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GraphError {
    #[error("node not found in graph")]
    NodeNotFound,

    #[error("edge not found in graph")]
    EdgeNotFound,

    #[error("no path found between the given nodes")]
    NoPathFound,

    /// Weights must be finite and non-negative.
    #[error("invalid edge weight {0}: weights must be finite and non-negative")]
    InvalidWeight(f64),

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

pub type GraphResult<T> = Result<T, GraphError>;
