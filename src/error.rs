//! Error types for grid and landmark graph operations.

use thiserror::Error;

use crate::location::Location;

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while building or searching a graph.
///
/// None of these are fatal; every operation reporting one leaves the graph unchanged
/// apart from search state, which [`reset_values`](crate::GridGraph::reset_values) restores.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A vertex already exists at this location.
    #[error("a vertex already exists at {0}")]
    DuplicateVertex(Location),

    /// No vertex exists at this location.
    #[error("no vertex exists at {0}")]
    UnknownVertex(Location),

    /// The search space was exhausted before reaching `goal`.
    #[error("no path reaches {goal}")]
    NoSolution {
        /// The unreachable location.
        goal: Location,
    },

    /// The grid or landmark set handed in is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl GraphError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(details: impl Into<String>) -> Self {
        Self::InvalidInput(details.into())
    }
}
