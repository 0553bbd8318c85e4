//! ACO execution loop.

use super::ant::Ant;
use super::config::AntColonyConfig;
use super::pheromone::{Deposits, PheromoneMatrix};
use crate::error::{Result, TspError};
use crate::history::SearchHistory;
use crate::model::DistanceMatrix;
use crate::random::{child_seeds, create_rng, rng_from};
use crate::termination::{is_plateau, StopGuard, Termination};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{debug, info};

/// Statistics recorded at the end of one generation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generation {
    /// Zero-based generation index.
    pub index: usize,

    /// Shortest tour built by this generation's ants.
    pub generation_best_cost: f64,

    /// Mean length over the colony.
    pub mean_cost: f64,

    /// Best tour found so far in the run.
    pub best_tour: Vec<usize>,

    /// Cost of `best_tour`.
    pub best_cost: f64,
}

/// Result of an ant colony run.
#[derive(Debug, Clone)]
pub struct AntColonyResult {
    /// Best tour over all generations.
    pub tour: Vec<usize>,

    /// Cost of `tour`.
    pub cost: f64,

    /// Number of completed generations.
    pub generations: usize,

    /// One record per generation.
    pub history: SearchHistory<Generation>,

    /// Pheromone levels after the last update.
    pub pheromone: PheromoneMatrix,

    /// Why the run stopped.
    pub termination: Termination,
}

/// Executes ant colony optimization on a distance matrix.
pub struct AntColonyRunner;

impl AntColonyRunner {
    /// Runs ACO.
    ///
    /// # Errors
    /// [`TspError::Input`] for fewer than two cities or an invalid config
    /// (e.g. an empty colony), [`TspError::NumericalDegenerate`] if the
    /// selection weights overflow.
    pub fn run(distance: &DistanceMatrix, config: &AntColonyConfig) -> Result<AntColonyResult> {
        Self::run_with_cancel(distance, config, None)
    }

    /// Runs ACO with an optional cancellation token.
    ///
    /// The token is checked after each generation, so at least one
    /// generation always completes and the result holds a valid tour.
    pub fn run_with_cancel(
        distance: &DistanceMatrix,
        config: &AntColonyConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AntColonyResult> {
        config.validate()?;
        let n = distance.len();
        if n < 2 {
            return Err(TspError::input(format!(
                "at least 2 cities are required, got {n}"
            )));
        }

        let guard = StopGuard::new(config.time_limit_ms, cancel);
        let mut rng = rng_from(config.seed);
        let mut pheromone = PheromoneMatrix::new(n, config.initial_pheromone);
        let mut deposits = Deposits::new(n);
        let mut ants: Vec<Ant> = (0..config.colony_size).map(|_| Ant::new(n)).collect();

        let mut best_tour: Vec<usize> = Vec::with_capacity(n);
        let mut best_cost = f64::INFINITY;
        let mut history = SearchHistory::new();
        let mut best_costs: Vec<f64> = Vec::new();

        info!(
            event = "solve_start",
            solver = "ant_colony",
            cities = n,
            colony_size = config.colony_size,
        );

        let termination = loop {
            let seeds = child_seeds(&mut rng, ants.len());
            let lengths = construct_tours(&mut ants, &seeds, distance, &pheromone, config)?;

            // ants are compared in order so ties resolve the same way in
            // parallel and sequential runs
            let mut generation_best_cost = f64::INFINITY;
            deposits.clear();
            for (ant, &length) in ants.iter().zip(&lengths) {
                generation_best_cost = generation_best_cost.min(length);
                if best_tour.is_empty() || length < best_cost {
                    best_cost = length;
                    best_tour.clear();
                    best_tour.extend_from_slice(ant.tour());
                }
                if length > 0.0 {
                    deposits.add_tour(ant.tour(), 1.0 / length);
                }
            }
            pheromone.update(&deposits, config.evaporation, config.intensity);

            let mean_cost = lengths.iter().sum::<f64>() / lengths.len() as f64;
            let index = history.len();
            debug!(
                generation = index,
                generation_best_cost = generation_best_cost,
                mean_cost = mean_cost,
                best_cost = best_cost,
            );
            history.record(Generation {
                index,
                generation_best_cost,
                mean_cost,
                best_tour: best_tour.clone(),
                best_cost,
            });
            best_costs.push(best_cost);

            let generations = history.len();
            if generations > config.plateau_window
                && is_plateau(&best_costs, config.plateau_window, config.tolerance)
            {
                break Termination::Completed;
            }
            if let Some(reason) = guard.check() {
                break reason;
            }
            if generations >= config.max_generations {
                break Termination::IterationLimit;
            }
        };

        info!(
            event = "solve_end",
            solver = "ant_colony",
            generations = history.len(),
            cost = best_cost,
            termination = %termination,
        );

        Ok(AntColonyResult {
            tour: best_tour,
            cost: best_cost,
            generations: history.len(),
            history,
            pheromone,
            termination,
        })
    }
}

/// Lets every ant build one tour against a fixed pheromone snapshot.
///
/// Ant `i` draws from a generator seeded with `seeds[i]`.
fn construct_tours(
    ants: &mut [Ant],
    seeds: &[u64],
    distance: &DistanceMatrix,
    pheromone: &PheromoneMatrix,
    config: &AntColonyConfig,
) -> Result<Vec<f64>> {
    let build = |(ant, &seed): (&mut Ant, &u64)| {
        ant.construct(distance, pheromone, config, &mut create_rng(seed))
    };

    #[cfg(feature = "parallel")]
    let lengths: Result<Vec<f64>> = if config.parallel {
        ants.par_iter_mut().zip(seeds.par_iter()).map(build).collect()
    } else {
        ants.iter_mut().zip(seeds.iter()).map(build).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let lengths: Result<Vec<f64>> = ants.iter_mut().zip(seeds.iter()).map(build).collect();

    lengths
}
