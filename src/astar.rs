use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use itertools::Itertools;
use tracing::{debug, trace, warn};

use crate::error::{GraphError, GraphResult};
use crate::graph::{GridGraph, UNREACHED};
use crate::location::Location;

/// A shortest path found by [`GridGraph::find_route`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Route {
    /// Number of steps taken.
    pub cost: u32,
    /// Every location visited, from start to goal inclusive.
    pub steps: Vec<Location>,
}

#[derive(Copy, Clone, Eq, PartialEq)]
struct OpenEntry {
    total_cost: u32,
    // insertion counter; equal totals pop first-in first-out
    seq: u64,
    location: Location,
}

// flipped so that BinaryHeap pops the cheapest entry
impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.total_cost.cmp(&self.total_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl GridGraph {
    /// Find the number of steps on a shortest path from `start` to `goal` using A*.
    ///
    /// Returns [`NoSolution`](GraphError::NoSolution) when `goal` cannot be reached and
    /// [`UnknownVertex`](GraphError::UnknownVertex) when either endpoint is missing.
    ///
    /// # Search state
    /// The search writes [`SearchState`](crate::SearchState) onto every vertex it touches and leaves it there,
    /// so [`reconstruct_path`](Self::reconstruct_path) can follow it afterwards.
    /// Call [`reset_values`](Self::reset_values) before the next independent query.
    ///
    /// # Policy
    /// The open set is ordered by total cost; ties go to whichever vertex was discovered first,
    /// so the graph's [`NeighborOrder`](crate::NeighborOrder) decides among equally short paths.
    /// Expanded vertices are closed for good, even if a cheaper route to them turns up later.
    /// Obstacles never receive a cost, so they are never walked through, although an obstacle passed as `start` is searched from.
    pub fn find_path(&mut self, start: Location, goal: Location) -> GraphResult<u32> {
        for location in [start, goal] {
            if !self.contains(location) {
                return Err(GraphError::UnknownVertex(location));
            }
        }

        if self.dirty {
            warn!(%start, %goal, "searching over search state left by a previous query; call reset_values first");
        }
        self.dirty = true;

        let heuristic = self.config.heuristic;
        let start_total = {
            let state = &mut self.vertex_mut(start)?.search;
            state.g_cost = 0;
            state.h_cost = heuristic.estimate(start, goal);
            state.total_cost = state.h_cost;
            state.predecessor = None;
            state.total_cost
        };

        let mut open = BinaryHeap::new();
        let mut closed = HashSet::new();
        let mut seq = 0;
        open.push(OpenEntry { total_cost: start_total, seq, location: start });

        while let Some(OpenEntry { total_cost, location, .. }) = open.pop() {
            let current = *self.vertex(location)?.search();
            // an improvement re-pushes instead of updating in place; skip what it superseded
            if closed.contains(&location) || total_cost != current.total_cost {
                continue;
            }

            if location == goal {
                debug!(%start, %goal, cost = current.g_cost, expanded = closed.len(), "path found");
                return Ok(current.g_cost);
            }

            closed.insert(location);
            trace!(%location, g = current.g_cost, "expanding");

            for neighbor in self.neighbors(location).collect_vec() {
                if closed.contains(&neighbor) {
                    continue;
                }

                let tentative = current.g_cost.saturating_add(1);
                let vertex = self.vertex_mut(neighbor)?;
                if vertex.is_obstacle() || tentative >= vertex.search.g_cost {
                    continue;
                }

                let state = &mut vertex.search;
                state.g_cost = tentative;
                state.h_cost = heuristic.estimate(neighbor, goal);
                state.total_cost = tentative.saturating_add(state.h_cost);
                state.predecessor = Some(location);

                seq += 1;
                open.push(OpenEntry { total_cost: state.total_cost, seq, location: neighbor });
            }
        }

        debug!(%start, %goal, expanded = closed.len(), "no path");
        Err(GraphError::NoSolution { goal })
    }

    /// Walk predecessors back from `goal` and return the path they describe, start first.
    ///
    /// Only meaningful after [`find_path`](Self::find_path) and before the next [`reset_values`](Self::reset_values).
    /// Returns [`NoSolution`](GraphError::NoSolution) if no completed search reached `goal`.
    pub fn reconstruct_path(&self, goal: Location) -> GraphResult<Vec<Location>> {
        let vertex = self.vertex(goal)?;
        if vertex.search.g_cost == UNREACHED {
            return Err(GraphError::NoSolution { goal });
        }

        let mut path = vec![goal];
        let mut current = vertex.search.predecessor;
        while let Some(location) = current {
            path.push(location);
            current = self.vertex(location)?.search.predecessor;
        }

        path.reverse();
        Ok(path)
    }

    /// Shorthand for [`find_path`](Self::find_path) followed by [`reconstruct_path`](Self::reconstruct_path).
    ///
    /// Leaves search state behind like `find_path` does.
    pub fn find_route(&mut self, start: Location, goal: Location) -> GraphResult<Route> {
        let cost = self.find_path(start, goal)?;
        let steps = self.reconstruct_path(goal)?;
        Ok(Route { cost, steps })
    }
}
