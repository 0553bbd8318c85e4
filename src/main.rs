use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use u_tsp::aco::AntColonyConfig;
use u_tsp::exact::ExactConfig;
use u_tsp::instance;
use u_tsp::model::canonical;
use u_tsp::random::rng_from;
use u_tsp::sa::AnnealingConfig;
use u_tsp::solver::{solve, Solution, Strategy};

/// Tours longer than this are printed with an ellipsis.
const PRINT_LIMIT: usize = 15;

#[derive(Parser, Debug)]
#[command(name = "tsm", about = "Traveling salesman solvers", version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve an instance file
    Solve {
        strategy: StrategyArg,

        /// JSON array of [x, y] city coordinates
        file: PathBuf,

        /// RNG seed for the stochastic strategies
        #[arg(long)]
        seed: Option<u64>,

        /// Largest instance the exact strategy accepts
        #[arg(long, default_value_t = 14)]
        max_cities: usize,

        /// Ants per generation
        #[arg(long, default_value_t = 10)]
        colony_size: usize,

        /// Wall-clock limit for the iterative strategies
        #[arg(long)]
        time_limit_ms: Option<u64>,

        /// Use rayon where the strategy supports it (needs the `parallel` feature)
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
    /// Write a random instance to a new file
    Generate {
        count: usize,

        file: PathBuf,

        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    Exact,
    Greedy,
    Anneal,
    Ant,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run(Args::parse())
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Solve {
            strategy,
            file,
            seed,
            max_cities,
            colony_size,
            time_limit_ms,
            parallel,
        } => {
            let strategy = match strategy {
                StrategyArg::Exact => Strategy::Exact(
                    ExactConfig::default()
                        .with_max_cities(max_cities)
                        .with_parallel(parallel),
                ),
                StrategyArg::Greedy => Strategy::Greedy,
                StrategyArg::Anneal => {
                    let mut config = AnnealingConfig::default().with_parallel(parallel);
                    config.seed = seed;
                    config.time_limit_ms = time_limit_ms;
                    Strategy::Annealing(config)
                }
                StrategyArg::Ant => {
                    let mut config = AntColonyConfig::default()
                        .with_colony_size(colony_size)
                        .with_parallel(parallel);
                    config.seed = seed;
                    config.time_limit_ms = time_limit_ms;
                    Strategy::AntColony(config)
                }
            };

            let cities = instance::load_json(&file)
                .with_context(|| format!("failed to read instance '{}'", file.display()))?;
            let solution = solve(&cities, &strategy)
                .with_context(|| format!("{strategy} solver failed on {} cities", cities.len()))?;
            print_solution(cities.len(), &strategy, &solution);
        }
        Command::Generate { count, file, seed } => {
            let cities = instance::generate(count, &mut rng_from(seed))?;
            instance::save_json(&file, &cities)
                .with_context(|| format!("failed to write instance '{}'", file.display()))?;
            println!("wrote {count} cities to '{}'", file.display());
        }
    }
    Ok(())
}

fn print_solution(size: usize, strategy: &Strategy, solution: &Solution) {
    println!("size:     {size}");
    println!("strategy: {strategy}");
    println!("tour:     {}", format_tour(&canonical(&solution.tour)));
    println!("length:   {:.6}", solution.cost);
    println!("stats:    {}", solution.diagnostics);
}

fn format_tour(tour: &[usize]) -> String {
    let shown: Vec<String> = tour.iter().take(PRINT_LIMIT).map(|c| c.to_string()).collect();
    if tour.len() > PRINT_LIMIT {
        format!("[{}, ...]", shown.join(", "))
    } else {
        format!("[{}]", shown.join(", "))
    }
}
