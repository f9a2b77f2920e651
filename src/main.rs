use std::path::PathBuf;

use anyhow::{Context, Result};
use async_std::task;
use clap::Parser;
use nav_conf::load_scenario;
use nav_pathing::{PathError, PathFinder, Point};
use tracing::{info, warn};

const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
const GIT_SHA: &str = env!("GIT_SHA");

#[derive(Parser)]
#[clap(author, version, about)]
struct Args {
    #[clap(short, long, value_parser, help = "Path of a YAML scenario file.")]
    scenario: PathBuf,
    #[clap(long, value_parser, help = "Directory to write a log file to.")]
    log_dir: Option<PathBuf>,
    #[clap(long, help = "Print visibility graph edges.")]
    debug_edges: bool,
    #[clap(
        long,
        requires = "debug_edges",
        help = "Print only edges incident to agents and query endpoints."
    )]
    external_only: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = nav_log::init(args.log_dir.as_deref())?;

    info!(
        "Starting navgraph {{ \"Version\": \"{}\", \"GitSha\": \"{}\" }}",
        CARGO_PKG_VERSION, GIT_SHA
    );

    let path: async_std::path::PathBuf = args.scenario.clone().into();
    let scenario = task::block_on(load_scenario(path.as_path()))
        .with_context(|| format!("Failed to load scenario {}", args.scenario.display()))?;

    let mut finder =
        PathFinder::from_polygons(scenario.obstacles(), scenario.navigation().inflate_margin());
    let external_points = scenario.external_points();
    finder.set_external_points(&external_points);
    // Points inside obstacles are registered at snapped positions.
    let registered = |point: Point| {
        external_points
            .iter()
            .position(|&p| p == point)
            .map_or(point, |index| finder.external_points()[index])
    };
    info!(
        "Visibility graph ready: {} vertices, {} edges",
        finder.vertex_count(),
        finder.edge_count()
    );

    for query in scenario.queries() {
        let from = format_point(query.from());
        let to = format_point(query.to());

        match finder.try_find_path(registered(query.from()), registered(query.to())) {
            Ok(path) => {
                let waypoints: Vec<String> =
                    path.waypoints().iter().map(|&p| format_point(p)).collect();
                println!(
                    "{from} -> {to}: length {:.3} via {}",
                    path.length(),
                    waypoints.join(" ")
                );
            }
            Err(error @ PathError::Unreachable { .. }) => {
                info!("{}", error);
                println!("{from} -> {to}: unreachable");
            }
            Err(error) => warn!("Query skipped: {}", error),
        }
    }

    if args.debug_edges {
        for edge in finder.edges_for_debug(args.external_only) {
            println!("edge {} {}", format_point(edge.a()), format_point(edge.b()));
        }
    }

    Ok(())
}

fn format_point(point: Point) -> String {
    format!("({}, {})", point.x, point.y)
}
