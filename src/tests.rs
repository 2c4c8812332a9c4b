#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use strum::VariantArray;

    use crate::builder::GridBuilder;
    use crate::cell::Cell;
    use crate::config::{Heuristic, SearchConfig};
    use crate::error::GraphError;
    use crate::graph::{GridGraph, SearchState};
    use crate::grid::CellGrid;
    use crate::landmark::{Landmark, LandmarkEdge, LandmarkGraph};
    use crate::location::Location;
    use crate::step::NeighborOrder;
    use crate::tour::{plan_tours, Tour, TourStrategy};

    fn graph(rows: &[&str]) -> GridGraph {
        GridBuilder::from_rows(rows).unwrap().build().unwrap()
    }

    // four corners, every pair joined along the open border
    const CORNERS: [&str; 5] = [
        "A   B",
        " *** ",
        "     ",
        " *** ",
        "C   D",
    ];

    #[test]
    fn parse_and_display() {
        let grid: CellGrid = "A *\n  B\n".parse().unwrap();
        assert_eq!(grid.dims().0.get(), 2);
        assert_eq!(grid.dims().1.get(), 3);
        assert_eq!(grid.get(Location(0, 2)), Some(Cell::Obstacle));
        assert_eq!(grid.get(Location(1, 2)), Some(Cell::Named('B')));
        assert_eq!(grid.get(Location(2, 0)), None);
        assert_eq!(format!("{}", grid), "A *\n  B\n");
    }

    #[test]
    fn reject_malformed_grids() {
        assert!(matches!(CellGrid::from_rows::<&str>(&[]), Err(GraphError::InvalidInput(_))));
        assert!(matches!(CellGrid::from_rows(&["", ""]), Err(GraphError::InvalidInput(_))));
        assert!(matches!(CellGrid::from_rows(&["   ", "  "]), Err(GraphError::InvalidInput(_))));
        assert!(matches!(CellGrid::from_rows(&["a  "]), Err(GraphError::InvalidInput(_))));
    }

    #[test]
    fn build_counts() {
        let graph = graph(&["   ", "   ", "   "]);
        assert_eq!(graph.vertex_count(), 9);
        assert_eq!(graph.edge_count(), 12);
        // obstacles are vertices too
        let graph = self::graph(&["***", "***"]);
        assert_eq!(graph.vertex_count(), 6);
        assert_eq!(graph.edge_count(), 7);
    }

    #[test]
    fn open_grid_corner_to_corner() {
        let mut graph = graph(&["   ", "   ", "   "]);
        assert_eq!(graph.find_path(Location(0, 0), Location(2, 2)), Ok(4));
    }

    #[test]
    fn route_through_gap() {
        let mut graph = graph(&["   ", " **", "   "]);
        let route = graph.find_route(Location(0, 0), Location(2, 2)).unwrap();

        assert_eq!(route.cost, 4);
        assert_eq!(route.steps, vec![Location(0, 0), Location(1, 0), Location(2, 0), Location(2, 1), Location(2, 2)]);
        assert!(route.steps.iter().all(|l| !graph.vertex(*l).unwrap().is_obstacle()));
    }

    #[test]
    fn path_to_self() {
        let mut graph = graph(&["   ", " * ", "   "]);
        assert_eq!(graph.find_path(Location(1, 2), Location(1, 2)), Ok(0));
        assert_eq!(graph.reconstruct_path(Location(1, 2)), Ok(vec![Location(1, 2)]));
    }

    #[test]
    fn enclosed_goal() {
        let mut graph = graph(&[
            "     ",
            " *** ",
            " *A* ",
            " *** ",
            "     ",
        ]);
        assert_eq!(graph.find_path(Location(0, 0), Location(2, 2)), Err(GraphError::NoSolution { goal: Location(2, 2) }));
        assert_eq!(graph.reconstruct_path(Location(2, 2)), Err(GraphError::NoSolution { goal: Location(2, 2) }));
    }

    #[test]
    fn obstacle_goal_unreachable_but_obstacle_start_searches() {
        let mut graph = graph(&["  *", "   "]);
        assert!(matches!(graph.find_path(Location(0, 0), Location(0, 2)), Err(GraphError::NoSolution { .. })));
        graph.reset_values();
        assert_eq!(graph.find_path(Location(0, 2), Location(0, 0)), Ok(2));
    }

    #[test]
    fn unknown_endpoints() {
        let mut graph = graph(&["  ", "  "]);
        assert_eq!(graph.find_path(Location(0, 0), Location(5, 5)), Err(GraphError::UnknownVertex(Location(5, 5))));
        assert_eq!(graph.find_path(Location(9, 0), Location(0, 0)), Err(GraphError::UnknownVertex(Location(9, 0))));
    }

    #[test]
    fn reset_then_repeat() {
        let mut graph = graph(&[
            "A  *    ",
            "** * ** ",
            "   *  * ",
            " *    *B",
        ]);
        let first = graph.find_route(Location(0, 0), Location(3, 7)).unwrap();
        assert!(graph.vertex(Location(0, 0)).unwrap().search().predecessor.is_none());

        graph.reset_values();
        assert!(graph.locations().all(|l| *graph.vertex(l).unwrap().search() == SearchState::default()));

        let second = graph.find_route(Location(0, 0), Location(3, 7)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.cost, 16);
    }

    #[test]
    fn duplicate_vertex_leaves_graph_alone() {
        let mut graph = graph(&["   ", "   "]);
        let before = *graph.vertex(Location(0, 1)).unwrap();
        let neighbors_before: Vec<_> = graph.neighbors(Location(0, 1)).collect();

        assert_eq!(graph.add_vertex(Location(0, 1), Cell::Obstacle), Err(GraphError::DuplicateVertex(Location(0, 1))));
        assert_eq!(*graph.vertex(Location(0, 1)).unwrap(), before);
        assert_eq!(graph.neighbors(Location(0, 1)).collect::<Vec<_>>(), neighbors_before);
        assert_eq!(graph.vertex_count(), 6);
    }

    #[test]
    fn edges_need_both_endpoints() {
        let mut graph = graph(&["   ", "   "]);
        let edges = graph.edge_count();
        assert_eq!(graph.add_edge(Location(0, 0), Location(7, 7)), Err(GraphError::UnknownVertex(Location(7, 7))));
        assert_eq!(graph.add_edge(Location(7, 7), Location(0, 0)), Err(GraphError::UnknownVertex(Location(7, 7))));
        assert_eq!(graph.edge_count(), edges);
        assert!(matches!(graph.add_vertex(Location(2, 0), Cell::Open), Err(GraphError::InvalidInput(_))));
    }

    #[test]
    fn hand_built_grid_graph() {
        let dims = (NonZero::new(2).unwrap(), NonZero::new(2).unwrap());
        let mut graph = GridGraph::new(dims, SearchConfig::default());
        assert_eq!(graph.vertex_count(), 0);

        for (location, cell) in [(Location(0, 0), Cell::Named('A')), (Location(0, 1), Cell::Open), (Location(1, 0), Cell::Open), (Location(1, 1), Cell::Named('B'))] {
            assert_eq!(graph.add_vertex(location, cell).unwrap().location(), location);
        }
        graph.add_edge(Location(0, 0), Location(0, 1)).unwrap();
        graph.add_edge(Location(0, 1), Location(1, 1)).unwrap();
        assert_eq!(graph.vertex(Location(1, 1)).unwrap().location(), Location(1, 1));
        assert_eq!(graph.edge_count(), 2);

        assert_eq!(graph.find_path(Location(0, 0), Location(1, 1)), Ok(2));
        assert_eq!(graph.reconstruct_path(Location(1, 1)), Ok(vec![Location(0, 0), Location(0, 1), Location(1, 1)]));

        // (1, 0) was never linked
        graph.reset_values();
        assert_eq!(graph.find_path(Location(0, 0), Location(1, 0)), Err(GraphError::NoSolution { goal: Location(1, 0) }));
    }

    #[test]
    fn neighbor_order() {
        let rows = ["   ", "   ", "   "];
        let graph = GridBuilder::from_rows(&rows).unwrap().build().unwrap();
        assert_eq!(
            graph.neighbors(Location(1, 1)).collect::<Vec<_>>(),
            vec![Location(1, 0), Location(1, 2), Location(0, 1), Location(2, 1)],
        );
        assert_eq!(graph.neighbors(Location(0, 0)).collect::<Vec<_>>(), vec![Location(0, 1), Location(1, 0)]);

        let graph = GridBuilder::from_rows(&rows).unwrap()
            .neighbor_order(NeighborOrder::RightLeftDownUp)
            .build()
            .unwrap();
        assert_eq!(
            graph.neighbors(Location(1, 1)).collect::<Vec<_>>(),
            vec![Location(1, 2), Location(1, 0), Location(2, 1), Location(0, 1)],
        );
    }

    #[test]
    fn neighbor_order_breaks_ties() {
        let rows = [" A ", " * ", " B "];

        let mut graph = GridBuilder::from_rows(&rows).unwrap().build().unwrap();
        let route = graph.find_route(Location(0, 1), Location(2, 1)).unwrap();
        assert_eq!(route.steps, vec![Location(0, 1), Location(0, 0), Location(1, 0), Location(2, 0), Location(2, 1)]);

        let mut graph = GridBuilder::from_rows(&rows).unwrap()
            .neighbor_order(NeighborOrder::RightLeftDownUp)
            .build()
            .unwrap();
        let route = graph.find_route(Location(0, 1), Location(2, 1)).unwrap();
        assert_eq!(route.steps, vec![Location(0, 1), Location(0, 2), Location(1, 2), Location(2, 2), Location(2, 1)]);
    }

    #[test]
    fn heuristics() {
        assert_eq!(Heuristic::Manhattan.estimate(Location(1, 5), Location(4, 1)), 7);
        assert_eq!(Heuristic::RowDoubled.estimate(Location(1, 5), Location(4, 1)), 6);
        assert_eq!(Heuristic::RowDoubled.estimate(Location(2, 0), Location(2, 8)), 0);
        assert_eq!("row-doubled".parse::<Heuristic>(), Ok(Heuristic::RowDoubled));

        let mut graph = GridBuilder::from_rows(&CORNERS).unwrap()
            .heuristic(Heuristic::RowDoubled)
            .build()
            .unwrap();
        assert_eq!(graph.config().heuristic, Heuristic::RowDoubled);
        assert_eq!(graph.find_path(Location(0, 0), Location(0, 4)), Ok(4));
    }

    #[test]
    fn render_route() {
        let mut builder = GridBuilder::from_rows(&["A  ", "** ", "B  "]).unwrap();
        let mut graph = builder.heuristic(Heuristic::Manhattan).build().unwrap();
        let route = graph.find_route(Location(0, 0), Location(2, 0)).unwrap();
        assert_eq!(route.cost, 6);
        assert_eq!(builder.grid().render_path(&route.steps), "A..\n**.\nB..\n");
    }

    #[test]
    fn discover_landmarks() {
        let grid = CellGrid::from_rows(&CORNERS).unwrap();
        assert_eq!(Landmark::discover(&grid), vec![
            Landmark::new('A', Location(0, 0)),
            Landmark::new('B', Location(0, 4)),
            Landmark::new('C', Location(4, 0)),
            Landmark::new('D', Location(4, 4)),
        ]);
    }

    #[test]
    fn landmark_graph_weights() {
        let grid = GridBuilder::from_rows(&CORNERS).unwrap().build().unwrap();
        let landmarks = Landmark::discover(&CellGrid::from_rows(&CORNERS).unwrap());
        let reduced = LandmarkGraph::from_grid(&grid, &landmarks).unwrap();

        assert_eq!(reduced.landmark_count(), 4);
        assert_eq!(reduced.pairs().count(), 6);
        for (a, b, weight) in [('A', 'B', 4), ('A', 'C', 4), ('A', 'D', 8), ('B', 'C', 8), ('B', 'D', 4), ('C', 'D', 4)] {
            assert_eq!(reduced.weight(a, b), Some(weight));
            assert_eq!(reduced.weight(b, a), Some(weight));
        }
        assert_eq!(reduced.cell(Location(4, 4)), Some(Cell::Named('D')));

        // edges keep the order landmarks were paired in
        assert_eq!(
            reduced.edges(Location(0, 4)).map(|e| (e.to, e.weight)).collect::<Vec<_>>(),
            vec![(Location(0, 0), 4), (Location(4, 0), 8), (Location(4, 4), 4)],
        );
        // the caller's grid is untouched
        assert!(grid.locations().all(|l| grid.vertex(l).unwrap().search().predecessor.is_none()));
    }

    #[test]
    fn landmark_edge_equality_ignores_weight() {
        let a = LandmarkEdge { to: Location(1, 1), weight: 3 };
        let b = LandmarkEdge { to: Location(1, 1), weight: 9 };
        let c = LandmarkEdge { to: Location(1, 2), weight: 3 };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn landmark_graph_rejects_bad_sets() {
        let grid = graph(&[
            "A    ",
            " *** ",
            " *B* ",
            " *** ",
            "C    ",
        ]);

        let enclosed = [Landmark::new('A', Location(0, 0)), Landmark::new('B', Location(2, 2))];
        assert!(matches!(LandmarkGraph::from_grid(&grid, &enclosed), Err(GraphError::InvalidInput(_))));

        let outside = [Landmark::new('A', Location(0, 0)), Landmark::new('Z', Location(5, 0))];
        assert!(matches!(LandmarkGraph::from_grid(&grid, &outside), Err(GraphError::InvalidInput(_))));

        let shared = [Landmark::new('A', Location(0, 0)), Landmark::new('Q', Location(0, 0))];
        assert!(matches!(LandmarkGraph::from_grid(&grid, &shared), Err(GraphError::InvalidInput(_))));

        let renamed = [Landmark::new('A', Location(0, 0)), Landmark::new('A', Location(4, 0))];
        assert!(matches!(LandmarkGraph::from_grid(&grid, &renamed), Err(GraphError::InvalidInput(_))));

        assert!(matches!(LandmarkGraph::from_grid(&grid, &[]), Err(GraphError::InvalidInput(_))));

        let fine = [Landmark::new('A', Location(0, 0)), Landmark::new('C', Location(4, 0))];
        assert_eq!(LandmarkGraph::from_grid(&grid, &fine).unwrap().weight('A', 'C'), Some(4));
    }

    #[test]
    fn hand_built_landmark_graph() {
        let mut reduced = LandmarkGraph::new();
        reduced.add_landmark(Landmark::new('A', Location(0, 0)), Cell::Named('A')).unwrap();
        reduced.add_landmark(Landmark::new('B', Location(0, 1)), Cell::Open).unwrap();

        assert_eq!(
            reduced.add_landmark(Landmark::new('C', Location(0, 1)), Cell::Open),
            Err(GraphError::DuplicateVertex(Location(0, 1))),
        );
        assert!(matches!(reduced.add_edge('A', 'Z', 1), Err(GraphError::InvalidInput(_))));
        assert_eq!(reduced.landmark_count(), 2);

        reduced.add_edge('A', 'B', 7).unwrap();
        assert_eq!(reduced.weight('B', 'A'), Some(7));
    }

    #[test]
    fn queue_ordered_tour() {
        let grid = graph(&CORNERS);
        let mut reduced = LandmarkGraph::from_grid(&grid, &Landmark::discover(&CellGrid::from_rows(&CORNERS).unwrap())).unwrap();

        // B first; C is charged at the B-C weight it was refreshed to
        assert_eq!(reduced.queue_ordered_tour('A', 'A'), Ok(Tour { cost: 24, sequence: vec!['A', 'B', 'C', 'D', 'A'] }));
        // state from the last run is cleared
        assert_eq!(reduced.queue_ordered_tour('A', 'A'), Ok(Tour { cost: 24, sequence: vec!['A', 'B', 'C', 'D', 'A'] }));
        assert_eq!(reduced.queue_ordered_tour('A', 'D'), Ok(Tour { cost: 16, sequence: vec!['A', 'B', 'C', 'D'] }));
    }

    #[test]
    fn cost_ordered_tour() {
        let grid = graph(&CORNERS);
        let mut reduced = LandmarkGraph::from_grid(&grid, &Landmark::discover(&CellGrid::from_rows(&CORNERS).unwrap())).unwrap();

        assert_eq!(reduced.cost_ordered_tour('A', 'A'), Ok(Tour { cost: 16, sequence: vec!['A', 'B', 'D', 'C', 'A'] }));
        assert_eq!(reduced.cost_ordered_tour('D', 'D'), Ok(Tour { cost: 16, sequence: vec!['D', 'B', 'A', 'C', 'D'] }));
    }

    #[test]
    fn queue_refresh_charges_latest_weight() {
        let mut reduced = LandmarkGraph::new();
        for (i, name) in ['S', 'X', 'Y'].into_iter().enumerate() {
            reduced.add_landmark(Landmark::new(name, Location(0, i)), Cell::Named(name)).unwrap();
        }
        reduced.add_edge('S', 'X', 1).unwrap();
        reduced.add_edge('S', 'Y', 10).unwrap();
        reduced.add_edge('X', 'Y', 2).unwrap();

        let queue = reduced.queue_ordered_tour('S', 'S').unwrap();
        assert_eq!(queue, Tour { cost: 13, sequence: vec!['S', 'X', 'Y', 'S'] });
        let cost = reduced.cost_ordered_tour('S', 'S').unwrap();
        assert_eq!(cost, queue);
    }

    #[test]
    fn single_landmark_tour() {
        let grid = graph(&["A "]);
        let mut reduced = LandmarkGraph::from_grid(&grid, &[Landmark::new('A', Location(0, 0))]).unwrap();
        assert_eq!(reduced.queue_ordered_tour('A', 'A'), Ok(Tour { cost: 0, sequence: vec!['A', 'A'] }));
        assert_eq!(reduced.cost_ordered_tour('A', 'A'), Ok(Tour { cost: 0, sequence: vec!['A', 'A'] }));
        assert!(matches!(reduced.cost_ordered_tour('B', 'B'), Err(GraphError::InvalidInput(_))));
    }

    #[test]
    fn tour_dispatches_on_strategy() {
        let grid = graph(&CORNERS);
        let landmarks = Landmark::discover(&CellGrid::from_rows(&CORNERS).unwrap());
        let mut reduced = LandmarkGraph::from_grid(&grid, &landmarks).unwrap();

        assert_eq!(reduced.tour(TourStrategy::QueueOrdered, 'A', 'A'), Ok(Tour { cost: 24, sequence: vec!['A', 'B', 'C', 'D', 'A'] }));
        assert_eq!(reduced.tour(TourStrategy::CostOrdered, 'A', 'A'), Ok(Tour { cost: 16, sequence: vec!['A', 'B', 'D', 'C', 'A'] }));

        for &strategy in TourStrategy::VARIANTS {
            assert_eq!(strategy.to_string().parse::<TourStrategy>(), Ok(strategy));
        }
        assert_eq!("cost-ordered".parse::<TourStrategy>(), Ok(TourStrategy::CostOrdered));
        assert!("greedy".parse::<TourStrategy>().is_err());
    }

    #[test]
    fn landmarks_listed_by_name() {
        let grid = graph(&CORNERS);
        let landmarks = Landmark::discover(&CellGrid::from_rows(&CORNERS).unwrap());
        let reduced = LandmarkGraph::from_grid(&grid, &landmarks).unwrap();

        let mut listed: Vec<Landmark> = reduced.landmarks().collect();
        listed.sort_by_key(|landmark| landmark.name);
        assert_eq!(listed, landmarks);
    }

    #[test]
    fn both_tours() {
        let grid = graph(&CORNERS);
        let landmarks = Landmark::discover(&CellGrid::from_rows(&CORNERS).unwrap());
        let comparison = plan_tours(&grid, &landmarks, 'A').unwrap();

        assert_eq!(comparison.queue_ordered.sequence, vec!['A', 'B', 'C', 'D', 'A']);
        assert_eq!(comparison.cost_ordered.sequence, vec!['A', 'B', 'D', 'C', 'A']);
        assert!(comparison.cost_ordered.cost < comparison.queue_ordered.cost);
    }

    #[test]
    fn reference_grid() {
        let grid: CellGrid = include_str!("../solver/grids/reference.txt").parse().unwrap();
        assert_eq!((grid.dims().0.get(), grid.dims().1.get()), (10, 9));

        let graph = GridBuilder::new(grid.clone()).build().unwrap();
        let landmarks = Landmark::discover(&grid);
        let reduced = LandmarkGraph::from_grid(&graph, &landmarks).unwrap();
        for (a, b, weight) in [('A', 'B', 10), ('A', 'C', 10), ('A', 'D', 18), ('B', 'C', 10), ('B', 'D', 8), ('C', 'D', 10)] {
            assert_eq!(reduced.weight(a, b), Some(weight));
        }

        let comparison = plan_tours(&graph, &landmarks, 'A').unwrap();
        assert_eq!(comparison.queue_ordered, Tour { cost: 48, sequence: vec!['A', 'B', 'C', 'D', 'A'] });
        assert_eq!(comparison.cost_ordered, Tour { cost: 38, sequence: vec!['A', 'B', 'D', 'C', 'A'] });
    }
}
