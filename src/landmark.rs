use std::collections::HashMap;

use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;
use tracing::debug;
use unordered_pair::UnorderedPair;

use crate::cell::Cell;
use crate::error::{GraphError, GraphResult};
use crate::graph::GridGraph;
use crate::grid::CellGrid;
use crate::location::Location;

/// A named point of interest on a grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Landmark {
    /// The name printed for this landmark in tours.
    pub name: char,
    /// Where it sits on the grid.
    pub location: Location,
}

impl Landmark {
    /// A landmark called `name` at `location`.
    pub fn new(name: char, location: Location) -> Self {
        Self { name, location }
    }

    /// Every lettered cell of `grid`, as landmarks in alphabetical order.
    ///
    /// A letter used more than once is reported at each of its cells; [`LandmarkGraph::from_grid`] rejects such a set.
    pub fn discover(grid: &CellGrid) -> Vec<Self> {
        grid.cells()
            .filter_map(|(location, cell)| cell.name().map(|name| Self::new(name, location)))
            .sorted_by_key(|landmark| (landmark.name, landmark.location))
            .collect_vec()
    }
}

/// One direction of a landmark pair: the destination and the shortest distance to it.
///
/// Two edges are equal when they lead to the same destination, whatever their weights.
#[derive(Clone, Copy, Debug)]
pub struct LandmarkEdge {
    /// The destination.
    pub to: Location,
    /// Steps on a shortest grid path to `to`.
    pub weight: u32,
}

impl PartialEq for LandmarkEdge {
    fn eq(&self, other: &Self) -> bool {
        self.to == other.to
    }
}

impl Eq for LandmarkEdge {}

#[derive(Clone, Copy, Debug)]
pub(crate) struct LandmarkVertex {
    pub(crate) landmark: Landmark,
    pub(crate) cell: Cell,
    pub(crate) visited: bool,
}

/// A complete weighted graph over landmarks, weighted by shortest grid distance.
///
/// Build one with [`from_grid`](Self::from_grid), or by hand with [`add_landmark`](Self::add_landmark) and [`add_edge`](Self::add_edge).
/// Edges are enumerated per landmark in the order they were added, which drives the tour solvers.
#[derive(Clone, Debug, Default)]
pub struct LandmarkGraph {
    pub(crate) graph: UnGraphMap<Location, u32>,
    pub(crate) vertices: HashMap<Location, LandmarkVertex>,
    pub(crate) names: HashMap<char, Location>,
}

impl LandmarkGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce `grid` to the given `landmarks`, in order.
    ///
    /// Works on an independent copy of `grid`, so the caller's search state is left alone.
    /// Every unordered pair, taken in list order, is measured with A* and joined by a symmetric edge;
    /// the copy is reset between pairs.
    ///
    /// Fails with [`InvalidInput`](GraphError::InvalidInput) for an empty list, repeated names or locations,
    /// a landmark outside the grid, or a pair with no path between them.
    pub fn from_grid(grid: &GridGraph, landmarks: &[Landmark]) -> GraphResult<Self> {
        if landmarks.is_empty() {
            return Err(GraphError::invalid_input("no landmarks given"));
        }

        let mut grid = grid.clone();
        grid.reset_values();

        let mut reduced = Self::new();
        for landmark in landmarks {
            if !landmark.location.within(grid.dims()) {
                return Err(GraphError::invalid_input(format!("landmark {} at {} lies outside the grid", landmark.name, landmark.location)));
            }
            let cell = grid.vertex(landmark.location)?.cell();
            reduced.add_landmark(*landmark, cell).map_err(|e| match e {
                GraphError::DuplicateVertex(location) => GraphError::invalid_input(format!("two landmarks share {location}")),
                other => other,
            })?;
        }

        for (a, b) in landmarks.iter().tuple_combinations() {
            let weight = match grid.find_path(a.location, b.location) {
                Ok(weight) => weight,
                Err(GraphError::NoSolution { .. }) => {
                    return Err(GraphError::invalid_input(format!("landmarks {} and {} are not connected", a.name, b.name)));
                }
                Err(e) => return Err(e),
            };
            grid.reset_values();

            debug!(from = %a.name, to = %b.name, weight, "landmark edge");
            reduced.add_edge(a.name, b.name, weight)?;
        }

        Ok(reduced)
    }

    /// Insert `landmark`, standing on `cell`.
    ///
    /// Fails with [`DuplicateVertex`](GraphError::DuplicateVertex) if its location is taken
    /// and with [`InvalidInput`](GraphError::InvalidInput) if its name is; nothing changes in either case.
    pub fn add_landmark(&mut self, landmark: Landmark, cell: Cell) -> GraphResult<()> {
        if self.vertices.contains_key(&landmark.location) {
            return Err(GraphError::DuplicateVertex(landmark.location));
        }
        if self.names.contains_key(&landmark.name) {
            return Err(GraphError::invalid_input(format!("landmark name {} is used twice", landmark.name)));
        }

        self.graph.add_node(landmark.location);
        self.names.insert(landmark.name, landmark.location);
        self.vertices.insert(landmark.location, LandmarkVertex { landmark, cell, visited: false });
        Ok(())
    }

    /// Join the landmarks named `a` and `b` with a symmetric edge of `weight`, replacing any earlier weight.
    pub fn add_edge(&mut self, a: char, b: char, weight: u32) -> GraphResult<()> {
        let a = self.location_of(a)?;
        let b = self.location_of(b)?;
        if a == b {
            return Err(GraphError::invalid_input(format!("cannot connect {a} to itself")));
        }

        self.graph.add_edge(a, b, weight);
        Ok(())
    }

    /// Where the landmark called `name` sits.
    pub fn location_of(&self, name: char) -> GraphResult<Location> {
        self.names.get(&name)
            .copied()
            .ok_or_else(|| GraphError::invalid_input(format!("no landmark named {name}")))
    }

    pub(crate) fn name_of(&self, location: Location) -> GraphResult<char> {
        self.vertices.get(&location)
            .map(|vertex| vertex.landmark.name)
            .ok_or(GraphError::UnknownVertex(location))
    }

    /// The distance between landmarks `a` and `b`, if they are connected. The same in both directions.
    pub fn weight(&self, a: char, b: char) -> Option<u32> {
        let (a, b) = (self.location_of(a).ok()?, self.location_of(b).ok()?);
        self.graph.edge_weight(a, b).copied()
    }

    /// Edges leaving `location`, in the order they were added.
    pub fn edges(&self, location: Location) -> impl Iterator<Item = LandmarkEdge> + '_ {
        self.graph.edges(location)
            .map(move |(a, b, weight)| LandmarkEdge { to: if a == location { b } else { a }, weight: *weight })
    }

    /// Every landmark pair with its weight, each pair once.
    pub fn pairs(&self) -> impl Iterator<Item = (UnorderedPair<char>, u32)> + '_ {
        self.graph.all_edges().filter_map(|(a, b, weight)| {
            let names = (self.name_of(a).ok()?, self.name_of(b).ok()?);
            Some((UnorderedPair::from(names), *weight))
        })
    }

    /// Every landmark, in no particular order.
    pub fn landmarks(&self) -> impl Iterator<Item = Landmark> + '_ {
        self.vertices.values().map(|vertex| vertex.landmark)
    }

    /// The grid cell under `location`, if a landmark stands there.
    pub fn cell(&self, location: Location) -> Option<Cell> {
        self.vertices.get(&location).map(|vertex| vertex.cell)
    }

    /// Number of landmarks.
    #[inline]
    pub fn landmark_count(&self) -> usize {
        self.vertices.len()
    }

    /// Clear the visit marks left by a tour.
    pub fn reset_values(&mut self) {
        self.vertices.values_mut().for_each(|vertex| vertex.visited = false);
    }

    pub(crate) fn is_visited(&self, location: Location) -> bool {
        self.vertices.get(&location).is_some_and(|vertex| vertex.visited)
    }

    pub(crate) fn visit(&mut self, location: Location) -> GraphResult<char> {
        let vertex = self.vertices.get_mut(&location).ok_or(GraphError::UnknownVertex(location))?;
        vertex.visited = true;
        Ok(vertex.landmark.name)
    }

    pub(crate) fn unvisited_edges(&self, location: Location) -> Vec<LandmarkEdge> {
        self.edges(location).filter(|edge| !self.is_visited(edge.to)).collect_vec()
    }
}
