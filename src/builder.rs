//! Turning parsed grids into searchable graphs.

use tracing::debug;

use crate::config::{Heuristic, SearchConfig};
use crate::error::GraphResult;
use crate::graph::GridGraph;
use crate::grid::CellGrid;
use crate::location::Location;
use crate::step::{NeighborOrder, SquareStep};

/// Builds a [`GridGraph`] from a [`CellGrid`].
///
/// Builders mutate themselves while configuring but can be [`Clone`]d to save their state at some point.
/// The grid itself is fixed; only search settings change.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    grid: CellGrid,
    config: SearchConfig,
}

impl GridBuilder {
    /// A builder over `grid` with the default [`SearchConfig`].
    pub fn new(grid: CellGrid) -> Self {
        Self { grid, config: SearchConfig::default() }
    }

    /// Parse `rows` as with [`CellGrid::from_rows`] and wrap the result in a builder.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> GraphResult<Self> {
        Ok(Self::new(CellGrid::from_rows(rows)?))
    }

    /// Use `heuristic` for every search on the built graph.
    pub fn heuristic(&mut self, heuristic: Heuristic) -> &mut Self {
        self.config.heuristic = heuristic;
        self
    }

    /// Enumerate neighbors in `order` on the built graph.
    pub fn neighbor_order(&mut self, order: NeighborOrder) -> &mut Self {
        self.config.neighbor_order = order;
        self
    }

    /// Replace all search settings at once.
    pub fn config(&mut self, config: SearchConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// The grid this builder wraps.
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Convert the grid into a [`GridGraph`], one vertex per cell, obstacles included.
    pub fn build(&self) -> GraphResult<GridGraph> {
        let (rows, cols) = self.grid.dims();
        let mut graph = GridGraph::with_capacity(
            self.grid.dims(),
            self.config,
            rows.get() * cols.get(),
            // "horizontal" edges
            (cols.get() - 1) * rows.get()
                // "vertical" edges
                + (rows.get() - 1) * cols.get(),
        );

        for (location, cell) in self.grid.cells() {
            graph.add_vertex(location, cell)?;
        }

        // every edge is undirected, so linking down and to the right covers all four directions
        for row in 0..rows.get() {
            for col in 0..cols.get() {
                let location = Location(row, col);
                for step in [SquareStep::Down, SquareStep::Right] {
                    let other = step.attempt_from(location);
                    if other.within(graph.dims()) {
                        graph.add_edge(location, other)?;
                    }
                }
            }
        }

        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            heuristic = %self.config.heuristic,
            neighbor_order = %self.config.neighbor_order,
            "built grid graph"
        );

        Ok(graph)
    }
}
