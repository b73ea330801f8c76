use mgpf_rust::config::{Cli, Config};
use mgpf_rust::heuristic::MstHeuristic;
use mgpf_rust::map::Map;
use mgpf_rust::problem::{CornersProblem, SearchProblem};
use mgpf_rust::scenario::Scenario;
use mgpf_rust::solver::a_star_search;
use mgpf_rust::stat::Stats;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, Level};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();
    let cli = Cli::parse();
    let config = Config::new(&cli);
    config.validate()?;

    let mut scenario = Scenario::load_from_file(&config.scenario_path)?;
    if let Some(start) = config.start_override() {
        scenario.start = Some(start);
    }

    let map = Map::from_file(&scenario.map)?;
    let mut rng = StdRng::seed_from_u64(config.seed as u64);
    let start = scenario.start_cell(&map, &mut rng)?;
    let corners = scenario.corner_cells(&map)?;
    info!("start {start:?}, landmarks {corners:?}");

    let problem = CornersProblem::new(&map, start, corners)?;
    let mut heuristic = MstHeuristic::new(&problem)?;

    let mut stats = Stats::default();
    match a_star_search(&problem, |state, p| heuristic.estimate(state, p), &mut stats) {
        Some(solution) => {
            assert_eq!(problem.get_cost_of_actions(&solution.actions), solution.cost);
            stats.print();
            info!("problem expanded {} states", problem.expanded());
            info!("tour: {:?}", solution.actions);
        }
        None => error!("no solution found"),
    }

    Ok(())
}
