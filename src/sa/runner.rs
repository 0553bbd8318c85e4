//! SA execution loop.

use super::config::AnnealingConfig;
use super::moves::Move;
use crate::error::{Result, TspError};
use crate::history::SearchHistory;
use crate::model::{measure, DistanceMatrix};
use crate::random::{child_seeds, create_rng, random_permutation, rng_from};
use crate::termination::{is_plateau, StopGuard, Termination};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{debug, info};

/// Smallest temperature used when every sampled tour has the same cost.
const MIN_TEMPERATURE: f64 = 1e-12;

/// Statistics recorded at the end of one temperature level.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemperatureLevel {
    /// Temperature the level ran at.
    pub temperature: f64,

    /// Moves proposed at this temperature.
    pub attempts: usize,

    /// Strictly improving moves at this temperature.
    pub successes: usize,

    /// Current tour when the level ended.
    pub tour: Vec<usize>,

    /// Cost of `tour`.
    pub cost: f64,

    /// Best cost seen so far in the run.
    pub best_cost: f64,
}

/// Result of a simulated annealing run.
#[derive(Debug, Clone)]
pub struct AnnealingResult {
    /// Best tour observed during the run.
    pub tour: Vec<usize>,

    /// Cost of `tour`.
    pub cost: f64,

    /// Current (last accepted) tour when the run stopped.
    pub final_tour: Vec<usize>,

    /// Cost of `final_tour`.
    pub final_cost: f64,

    /// Temperature estimated from the random samples.
    pub initial_temperature: f64,

    /// Temperature of the last recorded level.
    pub final_temperature: f64,

    /// Total number of proposed moves.
    pub attempts: usize,

    /// Number of accepted moves (including improvements).
    pub accepted: usize,

    /// Number of improving moves.
    pub improving: usize,

    /// One record per temperature level.
    pub history: SearchHistory<TemperatureLevel>,

    /// Why the run stopped.
    pub termination: Termination,
}

/// Executes simulated annealing on a distance matrix.
pub struct AnnealingRunner;

impl AnnealingRunner {
    /// Runs SA optimization.
    ///
    /// # Errors
    /// [`TspError::Input`] for fewer than two cities or an invalid config.
    pub fn run(distance: &DistanceMatrix, config: &AnnealingConfig) -> Result<AnnealingResult> {
        Self::run_with_cancel(distance, config, None)
    }

    /// Runs SA with an optional cancellation token, checked between
    /// temperature levels.
    pub fn run_with_cancel(
        distance: &DistanceMatrix,
        config: &AnnealingConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealingResult> {
        config.validate()?;
        let n = distance.len();
        if n < 2 {
            return Err(TspError::input(format!(
                "at least 2 cities are required, got {n}"
            )));
        }

        let guard = StopGuard::new(config.time_limit_ms, cancel);
        let mut rng = rng_from(config.seed);

        let (mut current, cost_scale) = sample_cost_scale(distance, config, &mut rng);
        let initial_temperature =
            (config.initial_temperature_factor * cost_scale).max(MIN_TEMPERATURE);
        let mut current_cost = measure(&current, distance);
        let mut best = current.clone();
        let mut best_cost = current_cost;
        let mut candidate = current.clone();

        info!(
            event = "solve_start",
            solver = "annealing",
            cities = n,
            initial_temperature = initial_temperature,
            initial_cost = current_cost,
        );

        let max_attempts = config.attempts_factor * n;
        let max_successes = config.successes_factor * n;
        let mut temperature = initial_temperature;
        let mut history = SearchHistory::new();
        let mut level_costs: Vec<f64> = Vec::new();
        let mut total_attempts = 0usize;
        let mut accepted = 0usize;
        let mut improving = 0usize;

        let termination = loop {
            if let Some(reason) = guard.check() {
                break reason;
            }
            if history.len() >= config.max_levels {
                break Termination::IterationLimit;
            }

            let mut attempts = 0usize;
            let mut successes = 0usize;
            while attempts <= max_attempts && successes <= max_successes {
                candidate.copy_from_slice(&current);
                Move::random(n, &mut rng).apply(&mut candidate);
                let cost = measure(&candidate, distance);
                attempts += 1;

                // Metropolis acceptance criterion
                let accept = if cost < current_cost {
                    successes += 1;
                    true
                } else {
                    let probability = (-(cost - current_cost) / temperature).exp();
                    rng.random_range(0.0..1.0) < probability
                };

                if accept {
                    std::mem::swap(&mut current, &mut candidate);
                    current_cost = cost;
                    accepted += 1;
                    if current_cost < best_cost {
                        best.copy_from_slice(&current);
                        best_cost = current_cost;
                    }
                }
            }
            total_attempts += attempts;
            improving += successes;

            debug!(
                level = history.len(),
                temperature = temperature,
                attempts = attempts,
                successes = successes,
                cost = current_cost,
                best_cost = best_cost,
            );
            history.record(TemperatureLevel {
                temperature,
                attempts,
                successes,
                tour: current.clone(),
                cost: current_cost,
                best_cost,
            });
            level_costs.push(current_cost);

            if history.len() >= config.required_levels()
                && is_plateau(&level_costs, config.plateau_window, config.tolerance)
            {
                break Termination::Completed;
            }

            temperature *= config.cooling_factor;
        };

        let final_temperature = history
            .last()
            .map_or(initial_temperature, |l: &TemperatureLevel| l.temperature);

        info!(
            event = "solve_end",
            solver = "annealing",
            levels = history.len(),
            attempts = total_attempts,
            cost = best_cost,
            final_cost = current_cost,
            termination = %termination,
        );

        Ok(AnnealingResult {
            tour: best,
            cost: best_cost,
            final_tour: current,
            final_cost: current_cost,
            initial_temperature,
            final_temperature,
            attempts: total_attempts,
            accepted,
            improving,
            history,
            termination,
        })
    }
}

/// Draws `sample_factor · n` random tours and returns the last one with
/// the largest absolute cost difference between consecutive draws.
///
/// Each draw has its own seed taken from `rng`, so the parallel and
/// sequential paths see the same tours.
fn sample_cost_scale<R: Rng>(
    distance: &DistanceMatrix,
    config: &AnnealingConfig,
    rng: &mut R,
) -> (Vec<usize>, f64) {
    let n = distance.len();
    let seeds = child_seeds(rng, config.sample_factor * n + 1);
    let sample = |&seed: &u64| measure(&random_permutation(n, &mut create_rng(seed)), distance);

    #[cfg(feature = "parallel")]
    let costs: Vec<f64> = if config.parallel {
        seeds.par_iter().map(sample).collect()
    } else {
        seeds.iter().map(sample).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let costs: Vec<f64> = seeds.iter().map(sample).collect();

    let scale = costs
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(0.0, f64::max);

    // seeds is never empty: sample_factor and n are at least 1
    let last_seed = seeds[seeds.len() - 1];
    let last = random_permutation(n, &mut create_rng(last_seed));
    (last, scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exact::{ExactConfig, ExactRunner};
    use crate::model::{is_permutation, City};

    fn circle(n: usize) -> DistanceMatrix {
        let cities: Vec<City> = (0..n)
            .map(|i| {
                let a = std::f64::consts::TAU * (i as f64) / (n as f64);
                City::new(0.5 + 0.4 * a.cos(), 0.5 + 0.4 * a.sin())
            })
            .collect();
        DistanceMatrix::from_cities(&cities).unwrap()
    }

    fn scattered(n: usize) -> DistanceMatrix {
        let cities: Vec<City> = (0..n)
            .map(|i| {
                let t = i as f64 + 1.0;
                City::new((t * 0.618_034).fract(), (t * 0.414_214).fract())
            })
            .collect();
        DistanceMatrix::from_cities(&cities).unwrap()
    }

    #[test]
    fn test_sa_returns_valid_tour() {
        let m = scattered(20);
        let config = AnnealingConfig::default().with_seed(42);
        let result = AnnealingRunner::run(&m, &config).unwrap();
        assert!(is_permutation(&result.tour, 20));
        assert!(is_permutation(&result.final_tour, 20));
        assert!((result.cost - measure(&result.tour, &m)).abs() < 1e-9);
        assert!(result.cost <= result.final_cost + 1e-12);
        assert!(result.improving > 0);
        assert!(result.accepted >= result.improving);
    }

    #[test]
    fn test_sa_finds_circle() {
        // optimal tour of points on a circle is the polygon perimeter
        let n = 12;
        let m = circle(n);
        let perimeter: f64 = (0..n).map(|i| m.get(i, (i + 1) % n)).sum();
        let config = AnnealingConfig::default().with_seed(7);
        let result = AnnealingRunner::run(&m, &config).unwrap();
        assert!(
            result.cost <= perimeter * 1.05,
            "expected near-perimeter tour, got {} vs {}",
            result.cost,
            perimeter
        );
    }

    #[test]
    fn test_sa_not_better_than_exact() {
        let m = scattered(8);
        let exact = ExactRunner::run(&m, &ExactConfig::default()).unwrap();
        let result = AnnealingRunner::run(&m, &AnnealingConfig::default().with_seed(3)).unwrap();
        assert!(exact.cost <= result.cost + 1e-9);
    }

    #[test]
    fn test_sa_history_best_non_increasing() {
        let m = scattered(15);
        let config = AnnealingConfig::default().with_seed(11);
        let result = AnnealingRunner::run(&m, &config).unwrap();
        assert!(!result.history.is_empty());
        for w in result.history.levels().windows(2) {
            assert!(
                w[1].best_cost <= w[0].best_cost,
                "best cost history should be non-increasing: {} > {}",
                w[1].best_cost,
                w[0].best_cost
            );
            assert!(w[1].temperature < w[0].temperature);
        }
    }

    #[test]
    fn test_sa_converges_after_min_levels() {
        let m = scattered(10);
        let config = AnnealingConfig::default().with_seed(5);
        let result = AnnealingRunner::run(&m, &config).unwrap();
        assert_eq!(result.termination, Termination::Completed);
        assert!(result.history.len() >= 10);
    }

    #[test]
    fn test_sa_level_stopping_rule() {
        let n = 10;
        let m = scattered(n);
        let config = AnnealingConfig::default().with_seed(9);
        let result = AnnealingRunner::run(&m, &config).unwrap();
        for level in &result.history {
            assert!(level.attempts <= 100 * n + 1);
            assert!(level.successes <= 10 * n + 1);
            assert!(level.attempts > 100 * n || level.successes > 10 * n);
        }
    }

    #[test]
    fn test_sa_seed_reproducible() {
        let m = scattered(12);
        let config = AnnealingConfig::default().with_seed(123);
        let a = AnnealingRunner::run(&m, &config).unwrap();
        let b = AnnealingRunner::run(&m, &config).unwrap();
        assert_eq!(a.tour, b.tour);
        assert_eq!(a.cost, b.cost);
        assert_eq!(a.history.len(), b.history.len());
    }

    #[test]
    fn test_sa_parallel_sampling_matches_sequential() {
        let m = scattered(12);
        let config = AnnealingConfig::default().with_seed(8);
        let seq = AnnealingRunner::run(&m, &config.clone().with_parallel(false)).unwrap();
        let par = AnnealingRunner::run(&m, &config.with_parallel(true)).unwrap();
        assert_eq!(seq.initial_temperature, par.initial_temperature);
        assert_eq!(seq.tour, par.tour);
    }

    #[test]
    fn test_sa_level_cap() {
        let m = scattered(10);
        let config = AnnealingConfig::default()
            .with_seed(1)
            .with_min_levels(1000)
            .with_max_levels(4);
        let result = AnnealingRunner::run(&m, &config).unwrap();
        assert_eq!(result.termination, Termination::IterationLimit);
        assert_eq!(result.history.len(), 4);
    }

    #[test]
    fn test_sa_cancellation() {
        let m = scattered(10);
        let cancel = Arc::new(AtomicBool::new(true));
        let config = AnnealingConfig::default().with_seed(2);
        let result = AnnealingRunner::run_with_cancel(&m, &config, Some(cancel)).unwrap();
        assert_eq!(result.termination, Termination::Cancelled);
        assert!(result.history.is_empty());
        assert!(is_permutation(&result.tour, 10));
    }

    #[test]
    fn test_sa_three_cities_all_equal() {
        // every tour over 3 cities has the same length
        let m = scattered(3);
        let result = AnnealingRunner::run(&m, &AnnealingConfig::default().with_seed(4)).unwrap();
        assert!(is_permutation(&result.tour, 3));
        assert_eq!(result.termination, Termination::Completed);
        assert!(result.initial_temperature > 0.0);
    }

    #[test]
    fn test_sa_invalid_config() {
        let m = scattered(5);
        let config = AnnealingConfig::default().with_cooling_factor(2.0);
        assert!(matches!(
            AnnealingRunner::run(&m, &config),
            Err(TspError::Input(_))
        ));
    }
}
