use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use strum::{Display, EnumString, VariantArray};
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::graph::GridGraph;
use crate::landmark::{Landmark, LandmarkEdge, LandmarkGraph};
use crate::location::Location;

/// A walk over landmarks and what it cost.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tour {
    /// Sum of the weights of every edge taken, closing edge included.
    pub cost: u32,
    /// Landmark names in visiting order, from the start to the goal inclusive.
    pub sequence: Vec<char>,
}

/// How a tour picks the next landmark.
#[derive(Copy, Clone, Debug, Display, EnumString, VariantArray, Eq, PartialEq, Hash)]
#[strum(serialize_all = "kebab-case")]
pub enum TourStrategy {
    /// First discovered, first visited.
    QueueOrdered,
    /// Nearest unvisited neighbor of the landmark just visited.
    CostOrdered,
}

/// Both tours over the same landmarks, for comparison.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TourComparison {
    /// Result of [`TourStrategy::QueueOrdered`].
    pub queue_ordered: Tour,
    /// Result of [`TourStrategy::CostOrdered`].
    pub cost_ordered: Tour,
}

#[derive(Copy, Clone, Debug)]
struct RankedEdge {
    edge: LandmarkEdge,
    seq: usize,
}

// cheapest first, then first-added
impl Ord for RankedEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        other.edge.weight.cmp(&self.edge.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for RankedEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RankedEdge {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankedEdge {}

fn ranked(edges: Vec<LandmarkEdge>) -> BinaryHeap<RankedEdge> {
    edges.into_iter()
        .enumerate()
        .map(|(seq, edge)| RankedEdge { edge, seq })
        .collect()
}

/// Progress of a single tour.
struct Walk {
    goal: Location,
    last: Location,
    cost: u32,
    sequence: Vec<char>,
}

impl LandmarkGraph {
    /// Walk from `start` to `goal` taking landmarks in the order they are discovered.
    ///
    /// The queue is seeded with the edges leaving `start`. Each popped edge visits its destination;
    /// the destination's edges to unvisited landmarks are then queued, and an edge to a landmark that is already queued
    /// replaces the queued weight instead, so the weight charged is that of the edge actually walked.
    /// Once the queue runs dry the walk closes with the edge to `goal`.
    ///
    /// Pass the same name twice for a round trip. Every other landmark is visited exactly once, in no sense optimally.
    pub fn queue_ordered_tour(&mut self, start: char, goal: char) -> GraphResult<Tour> {
        let mut walk = self.begin(start, goal)?;

        let mut queue: VecDeque<LandmarkEdge> = self.unvisited_edges(walk.last).into();
        while let Some(edge) = queue.pop_front() {
            self.take(&mut walk, edge)?;

            for next in self.unvisited_edges(edge.to) {
                match queue.iter_mut().find(|queued| **queued == next) {
                    Some(queued) => queued.weight = next.weight,
                    None => queue.push_back(next),
                }
            }
        }

        self.close(walk, TourStrategy::QueueOrdered)
    }

    /// Walk from `start` to `goal`, always moving to the nearest unvisited landmark.
    ///
    /// Same shape as [`queue_ordered_tour`](Self::queue_ordered_tour), except the queue is a priority queue on weight,
    /// rebuilt after each visit from the unvisited edges of the landmark just visited. Ties go to the edge added first.
    pub fn cost_ordered_tour(&mut self, start: char, goal: char) -> GraphResult<Tour> {
        let mut walk = self.begin(start, goal)?;

        let mut queue = ranked(self.unvisited_edges(walk.last));
        while let Some(RankedEdge { edge, .. }) = queue.pop() {
            self.take(&mut walk, edge)?;
            queue = ranked(self.unvisited_edges(edge.to));
        }

        self.close(walk, TourStrategy::CostOrdered)
    }

    /// Dispatch to the tour named by `strategy`.
    pub fn tour(&mut self, strategy: TourStrategy, start: char, goal: char) -> GraphResult<Tour> {
        match strategy {
            TourStrategy::QueueOrdered => self.queue_ordered_tour(start, goal),
            TourStrategy::CostOrdered => self.cost_ordered_tour(start, goal),
        }
    }

    // the endpoints count as visited so the walk proper never passes through them
    fn begin(&mut self, start: char, goal: char) -> GraphResult<Walk> {
        self.reset_values();
        let (start, goal) = (self.location_of(start)?, self.location_of(goal)?);
        let name = self.visit(start)?;
        self.visit(goal)?;

        Ok(Walk { goal, last: start, cost: 0, sequence: vec![name] })
    }

    fn take(&mut self, walk: &mut Walk, edge: LandmarkEdge) -> GraphResult<()> {
        walk.sequence.push(self.visit(edge.to)?);
        walk.cost = walk.cost.saturating_add(edge.weight);
        walk.last = edge.to;
        Ok(())
    }

    fn close(&self, mut walk: Walk, strategy: TourStrategy) -> GraphResult<Tour> {
        if walk.last != walk.goal {
            let closing = self.edges(walk.last)
                .find(|edge| edge.to == walk.goal)
                .ok_or(GraphError::NoSolution { goal: walk.goal })?;
            walk.cost = walk.cost.saturating_add(closing.weight);
        }
        walk.sequence.push(self.name_of(walk.goal)?);

        let sequence: String = walk.sequence.iter().collect();
        debug!(%strategy, cost = walk.cost, %sequence, "tour complete");
        Ok(Tour { cost: walk.cost, sequence: walk.sequence })
    }
}

/// Reduce `grid` to `landmarks` and run both tours from and back to `start`.
///
/// Each strategy gets its own [`LandmarkGraph`] built from an independent copy of `grid`.
pub fn plan_tours(grid: &GridGraph, landmarks: &[Landmark], start: char) -> GraphResult<TourComparison> {
    let mut queue_graph = LandmarkGraph::from_grid(grid, landmarks)?;
    let mut cost_graph = LandmarkGraph::from_grid(grid, landmarks)?;

    Ok(TourComparison {
        queue_ordered: queue_graph.queue_ordered_tour(start, start)?,
        cost_ordered: cost_graph.cost_ordered_tour(start, start)?,
    })
}
