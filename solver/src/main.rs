use std::fs;
use std::process::ExitCode;

use cairn::{plan_tours, CellGrid, GridBuilder, Landmark, LandmarkGraph, SearchConfig, Tour, TourStrategy};
use itertools::Itertools;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use unordered_pair::UnorderedPair;

const USAGE: &str = "usage: solver <grid-file> [--config <json-file>] [--start <landmark>] [--strategy <queue-ordered|cost-ordered>]";

struct Args {
    grid: String,
    config: Option<String>,
    start: Option<char>,
    strategy: Option<TourStrategy>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let mut grid = None;
    let mut config = None;
    let mut start = None;
    let mut strategy = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(args.next().ok_or("--config needs a file")?),
            "--start" => {
                let name = args.next().ok_or("--start needs a landmark name")?;
                start = Some(name.chars().exactly_one().map_err(|_| format!("{name:?} is not a single landmark name"))?);
            }
            "--strategy" => {
                let name = args.next().ok_or("--strategy needs a tour strategy")?;
                strategy = Some(name.parse::<TourStrategy>().map_err(|_| format!("unknown tour strategy {name:?}"))?);
            }
            _ if grid.is_none() => grid = Some(arg),
            _ => return Err(format!("unexpected argument {arg:?}")),
        }
    }

    Ok(Args { grid: grid.ok_or(USAGE)?, config, start, strategy })
}

fn load_config(path: Option<&str>) -> Result<SearchConfig, String> {
    let Some(path) = path else {
        return Ok(SearchConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    serde_json::from_str(&text).map_err(|e| format!("bad config {path}: {e}"))
}

fn print_tour(label: &str, tour: &Tour) {
    println!("{label}: {} (cost {})", tour.sequence.iter().join(" -> "), tour.cost);
}

fn run(args: Args) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let text = fs::read_to_string(&args.grid).map_err(|e| format!("cannot read {}: {e}", args.grid))?;
    let grid: CellGrid = text.parse().map_err(|e| format!("{e}"))?;
    let graph = GridBuilder::new(grid.clone()).config(config).build().map_err(|e| format!("{e}"))?;
    info!(heuristic = %config.heuristic, neighbor_order = %config.neighbor_order, "loaded {}", args.grid);

    let landmarks = Landmark::discover(&grid);
    let start = match (args.start, landmarks.first()) {
        (Some(start), _) => start,
        (None, Some(first)) => first.name,
        (None, None) => return Err("the grid has no lettered landmarks".to_string()),
    };

    print!("{grid}");
    println!();

    let mut reduced = LandmarkGraph::from_grid(&graph, &landmarks).map_err(|e| format!("{e}"))?;
    let mut pairs: Vec<(UnorderedPair<char>, u32)> = reduced.pairs().collect();
    pairs.sort_by_key(|(UnorderedPair(a, b), _)| (*a.min(b), *a.max(b)));
    for (UnorderedPair(a, b), weight) in pairs {
        println!("{} <-> {}: {weight}", a.min(b), a.max(b));
    }
    println!();

    if let Some(strategy) = args.strategy {
        let tour = reduced.tour(strategy, start, start).map_err(|e| format!("{e}"))?;
        print_tour(&strategy.to_string(), &tour);
        return Ok(());
    }

    let tours = plan_tours(&graph, &landmarks, start).map_err(|e| format!("{e}"))?;
    print_tour("queue-ordered", &tours.queue_ordered);
    print_tour("cost-ordered", &tours.cost_ordered);

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let result = parse_args().and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
