#![warn(missing_docs)]

//! # `cairn`
//!
//! Shortest paths over obstacle grids, and tours over landmarks built on top of them.
//! Begin by parsing a [`CellGrid`] from text and turning it into a [`GridGraph`] with a [`GridBuilder`].
//! Query distances with [`GridGraph::find_path`], then reduce the grid to its landmarks with
//! [`LandmarkGraph::from_grid`] and walk them with [`LandmarkGraph::queue_ordered_tour`] or
//! [`LandmarkGraph::cost_ordered_tour`]. [`plan_tours`] does the latter in one call.
//!
//! # Grids
//! A grid is a rectangle of characters: a space is open ground, `*` an obstacle, and `A` to `Z` name points of interest.
//! Every cell becomes a vertex, obstacles included, joined to its orthogonal neighbors by unit edges.
//! Obstacles simply never receive a distance, so no path runs through one.
//!
//! # Search state
//! A* records its bookkeeping (distance so far, estimate, predecessor) on the vertices of the graph it searches,
//! which is what lets [`GridGraph::reconstruct_path`] recover the path afterwards.
//! That state outlives the query: call [`GridGraph::reset_values`] before searching the same graph again.
//! [`LandmarkGraph::from_grid`] takes care of this itself and works on a copy.
//!
//! # Tours
//! Neither tour is optimal. The queue-ordered tour visits landmarks in the order it discovers them,
//! and the cost-ordered tour greedily moves to the nearest unvisited landmark.
//! They exist to be compared with one another, not to solve the travelling salesman problem.

pub use astar::Route;
pub use builder::GridBuilder;
pub use cell::Cell;
pub use config::{Heuristic, SearchConfig};
pub use error::{GraphError, GraphResult};
pub use graph::{GridGraph, SearchState, Vertex};
pub use grid::CellGrid;
pub use landmark::{Landmark, LandmarkEdge, LandmarkGraph};
pub use location::{Dimension, Location};
pub use step::{NeighborOrder, SquareStep};
pub use tour::{plan_tours, Tour, TourComparison, TourStrategy};

pub(crate) mod astar;
pub mod builder;
pub(crate) mod cell;
pub mod config;
pub mod error;
pub(crate) mod graph;
pub(crate) mod grid;
pub(crate) mod landmark;
pub(crate) mod location;
pub(crate) mod step;
mod tests;
pub(crate) mod tour;
