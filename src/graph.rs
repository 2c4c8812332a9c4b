use std::collections::HashMap;

use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;

use crate::cell::Cell;
use crate::config::SearchConfig;
use crate::error::{GraphError, GraphResult};
use crate::location::{Dimension, Location};
use crate::step::SquareStep;

/// Stand-in for an infinite distance.
pub(crate) const UNREACHED: u32 = u32::MAX;

/// Per-vertex bookkeeping written by a single A* run.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SearchState {
    /// Best known distance from the search start.
    pub g_cost: u32,
    /// Estimated distance to the search goal.
    pub h_cost: u32,
    /// `g_cost + h_cost`, saturating.
    pub total_cost: u32,
    /// The previous vertex on the best known path.
    pub predecessor: Option<Location>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            g_cost: UNREACHED,
            h_cost: 0,
            total_cost: UNREACHED,
            predecessor: None,
        }
    }
}

/// A grid cell participating in search.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Vertex {
    pub(crate) location: Location,
    pub(crate) cell: Cell,
    pub(crate) search: SearchState,
}

impl Vertex {
    pub(crate) fn new(location: Location, cell: Cell) -> Self {
        Self { location, cell, search: SearchState::default() }
    }

    /// Where this vertex sits on the grid.
    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    /// The label this vertex was built from.
    #[inline]
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Shorthand for [`Cell::is_obstacle`].
    #[inline]
    pub fn is_obstacle(&self) -> bool {
        self.cell.is_obstacle()
    }

    /// Search state left behind by the most recent A* run since the last reset.
    #[inline]
    pub fn search(&self) -> &SearchState {
        &self.search
    }
}

/// Every cell of a grid as a vertex, connected to its orthogonal neighbors by unit edges.
///
/// Vertices live in an arena keyed by [`Location`] and adjacency is kept as location pairs, so neighbors never own each other.
/// Neighbors are enumerated in the [`NeighborOrder`](crate::NeighborOrder) of the graph's [`SearchConfig`].
///
/// Searching writes [`SearchState`] onto the vertices it touches.
/// Call [`reset_values`](Self::reset_values) between independent queries.
#[derive(Clone, Debug)]
pub struct GridGraph {
    pub(crate) vertices: HashMap<Location, Vertex>,
    pub(crate) adjacency: UnGraphMap<Location, ()>,
    // rows, cols
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) config: SearchConfig,
    // set by a search, cleared by reset_values
    pub(crate) dirty: bool,
}

impl GridGraph {
    /// An empty graph whose vertices must lie within `dims`, given as `(rows, cols)`.
    pub fn new(dims: (Dimension, Dimension), config: SearchConfig) -> Self {
        Self::with_capacity(dims, config, 0, 0)
    }

    pub(crate) fn with_capacity(dims: (Dimension, Dimension), config: SearchConfig, nodes: usize, edges: usize) -> Self {
        Self {
            vertices: HashMap::with_capacity(nodes),
            adjacency: UnGraphMap::with_capacity(nodes, edges),
            dims,
            config,
            dirty: false,
        }
    }

    /// Insert a vertex for `cell` at `location`.
    ///
    /// Fails with [`DuplicateVertex`](GraphError::DuplicateVertex) if `location` is taken
    /// and with [`InvalidInput`](GraphError::InvalidInput) if it lies outside the grid; the graph is untouched either way.
    pub fn add_vertex(&mut self, location: Location, cell: Cell) -> GraphResult<&Vertex> {
        if self.vertices.contains_key(&location) {
            return Err(GraphError::DuplicateVertex(location));
        }
        if !location.within(self.dims) {
            return Err(GraphError::invalid_input(format!("{location} lies outside the grid")));
        }

        self.adjacency.add_node(location);
        Ok(self.vertices.entry(location).or_insert(Vertex::new(location, cell)))
    }

    /// Connect `a` and `b` with an undirected unit edge. Adding an existing edge again is a no-op.
    ///
    /// Fails with [`UnknownVertex`](GraphError::UnknownVertex) unless both endpoints are present, leaving the graph untouched.
    pub fn add_edge(&mut self, a: Location, b: Location) -> GraphResult<()> {
        for location in [a, b] {
            if !self.contains(location) {
                return Err(GraphError::UnknownVertex(location));
            }
        }
        if a == b {
            return Err(GraphError::invalid_input(format!("cannot connect {a} to itself")));
        }

        self.adjacency.add_edge(a, b, ());
        Ok(())
    }

    /// Whether a vertex exists at `location`.
    #[inline]
    pub fn contains(&self, location: Location) -> bool {
        self.vertices.contains_key(&location)
    }

    /// The vertex at `location`.
    pub fn vertex(&self, location: Location) -> GraphResult<&Vertex> {
        self.vertices.get(&location).ok_or(GraphError::UnknownVertex(location))
    }

    pub(crate) fn vertex_mut(&mut self, location: Location) -> GraphResult<&mut Vertex> {
        self.vertices.get_mut(&location).ok_or(GraphError::UnknownVertex(location))
    }

    /// Neighbors of `location` in the configured [`NeighborOrder`](crate::NeighborOrder).
    ///
    /// Edges that are not a single orthogonal step come last, in the order they were added.
    /// An unknown `location` has no neighbors.
    pub fn neighbors(&self, location: Location) -> impl Iterator<Item = Location> {
        let order = self.config.neighbor_order;
        self.adjacency.neighbors(location)
            .sorted_by_key(|neighbor| SquareStep::direction_to(location, *neighbor).map_or(usize::MAX, |step| order.rank(step)))
    }

    /// Restore every vertex's [`SearchState`] to its initial value.
    pub fn reset_values(&mut self) {
        self.vertices.values_mut().for_each(|vertex| vertex.search = SearchState::default());
        self.dirty = false;
    }

    /// Every location with a vertex, in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.vertices.keys().copied().sorted()
    }

    /// The extent of the grid as `(rows, cols)`.
    #[inline]
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// The settings searches over this graph run with.
    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }
}
