//! Uniform entry point over the four strategies.
//!
//! [`solve`] builds the [`DistanceMatrix`] from a city list, dispatches to
//! the selected runner and wraps its output in a [`Solution`] whose
//! [`Diagnostics`] carry the solver-specific counters and elapsed time.

use crate::aco::{AntColonyConfig, AntColonyRunner};
use crate::error::Result;
use crate::exact::{ExactConfig, ExactRunner};
use crate::greedy::GreedyRunner;
use crate::model::{City, DistanceMatrix};
use crate::sa::{AnnealingConfig, AnnealingRunner};
use crate::termination::Termination;
use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Which solver to run, with its configuration.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Exhaustive enumeration; optimal, refuses large instances.
    Exact(ExactConfig),
    /// Nearest-neighbor construction from city 0.
    Greedy,
    /// Simulated annealing.
    Annealing(AnnealingConfig),
    /// Ant colony optimization.
    AntColony(AntColonyConfig),
}

impl Strategy {
    /// Short name used in logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Exact(_) => "exact",
            Strategy::Greedy => "greedy",
            Strategy::Annealing(_) => "anneal",
            Strategy::AntColony(_) => "ant",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Solver-specific counters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Counters {
    Exact {
        permutations: u64,
    },
    Greedy,
    Annealing {
        levels: usize,
        attempts: usize,
        accepted: usize,
        initial_temperature: f64,
        final_temperature: f64,
    },
    AntColony {
        generations: usize,
    },
}

/// Run statistics attached to every [`Solution`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    pub counters: Counters,
    pub termination: Termination,
    pub elapsed: Duration,
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.counters {
            Counters::Exact { permutations } => write!(f, "permutations: {permutations}")?,
            Counters::Greedy => f.write_str("single construction")?,
            Counters::Annealing {
                levels,
                attempts,
                accepted,
                initial_temperature,
                final_temperature,
            } => write!(
                f,
                "levels: {levels}, attempts: {attempts}, accepted: {accepted}, \
                 temperature: {initial_temperature:.4e} -> {final_temperature:.4e}"
            )?,
            Counters::AntColony { generations } => write!(f, "generations: {generations}")?,
        }
        write!(
            f,
            ", stopped: {}, elapsed: {:.3}s",
            self.termination,
            self.elapsed.as_secs_f64()
        )
    }
}

/// A closed tour with its length and run statistics.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Permutation of `0..n`.
    pub tour: Vec<usize>,
    /// Length including the closing edge.
    pub cost: f64,
    pub diagnostics: Diagnostics,
}

/// Solves the instance given by `cities` with `strategy`.
///
/// # Errors
/// [`TspError::Input`](crate::TspError::Input) for fewer than two cities,
/// non-finite coordinates or distances too large to sum over a tour, plus
/// whatever the selected runner reports.
///
/// # Examples
///
/// ```
/// use u_tsp::model::City;
/// use u_tsp::solver::{solve, Strategy};
///
/// let cities = [
///     City::new(0.0, 0.0),
///     City::new(1.0, 0.0),
///     City::new(1.0, 1.0),
///     City::new(0.0, 1.0),
/// ];
/// let solution = solve(&cities, &Strategy::Greedy).unwrap();
/// assert_eq!(solution.cost, 4.0);
/// ```
pub fn solve(cities: &[City], strategy: &Strategy) -> Result<Solution> {
    solve_with_cancel(cities, strategy, None)
}

/// Like [`solve`], with a cancellation token for the iterative strategies.
pub fn solve_with_cancel(
    cities: &[City],
    strategy: &Strategy,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<Solution> {
    let started = Instant::now();
    let distance = DistanceMatrix::from_cities(cities)?;
    let mut solution = solve_matrix(&distance, strategy, cancel)?;
    solution.diagnostics.elapsed = started.elapsed();
    Ok(solution)
}

/// Runs `strategy` on a prebuilt distance matrix.
pub fn solve_matrix(
    distance: &DistanceMatrix,
    strategy: &Strategy,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<Solution> {
    let started = Instant::now();
    let (tour, cost, counters, termination) = match strategy {
        Strategy::Exact(config) => {
            let r = ExactRunner::run_with_cancel(distance, config, cancel)?;
            let counters = Counters::Exact {
                permutations: r.permutations,
            };
            (r.tour, r.cost, counters, r.termination)
        }
        Strategy::Greedy => {
            let r = GreedyRunner::run(distance)?;
            (r.tour, r.cost, Counters::Greedy, Termination::Completed)
        }
        Strategy::Annealing(config) => {
            let r = AnnealingRunner::run_with_cancel(distance, config, cancel)?;
            let counters = Counters::Annealing {
                levels: r.history.len(),
                attempts: r.attempts,
                accepted: r.accepted,
                initial_temperature: r.initial_temperature,
                final_temperature: r.final_temperature,
            };
            (r.tour, r.cost, counters, r.termination)
        }
        Strategy::AntColony(config) => {
            let r = AntColonyRunner::run_with_cancel(distance, config, cancel)?;
            let counters = Counters::AntColony {
                generations: r.generations,
            };
            (r.tour, r.cost, counters, r.termination)
        }
    };

    Ok(Solution {
        tour,
        cost,
        diagnostics: Diagnostics {
            counters,
            termination,
            elapsed: started.elapsed(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;
    use crate::model::is_permutation;
    use crate::random::create_rng;
    use rand::Rng;

    fn unit_square() -> Vec<City> {
        vec![
            City::new(0.0, 0.0),
            City::new(1.0, 0.0),
            City::new(1.0, 1.0),
            City::new(0.0, 1.0),
        ]
    }

    fn random_cities(n: usize, seed: u64) -> Vec<City> {
        let mut rng = create_rng(seed);
        (0..n)
            .map(|_| City::new(rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
            .collect()
    }

    fn all_strategies() -> Vec<Strategy> {
        vec![
            Strategy::Exact(ExactConfig::default()),
            Strategy::Greedy,
            Strategy::Annealing(AnnealingConfig::default().with_seed(1)),
            Strategy::AntColony(AntColonyConfig::default().with_seed(1)),
        ]
    }

    #[test]
    fn test_unit_square_exact_and_greedy() {
        let cities = unit_square();
        let exact = solve(&cities, &Strategy::Exact(ExactConfig::default())).unwrap();
        let greedy = solve(&cities, &Strategy::Greedy).unwrap();
        assert!((exact.cost - 4.0).abs() < 1e-12);
        assert!((greedy.cost - 4.0).abs() < 1e-12);
        assert_eq!(
            exact.diagnostics.counters,
            Counters::Exact { permutations: 6 }
        );
    }

    #[test]
    fn test_too_few_cities_rejected_by_every_strategy() {
        for strategy in all_strategies() {
            for n in 0..2 {
                let cities = random_cities(n, 1);
                let err = solve(&cities, &strategy).unwrap_err();
                assert!(
                    matches!(err, TspError::Input(_)),
                    "{strategy} with {n} cities"
                );
            }
        }
    }

    #[test]
    fn test_overflowing_coordinates_rejected_by_every_strategy() {
        let cities = [
            City::new(-1e308, 0.0),
            City::new(0.0, 0.0),
            City::new(1e308, 0.0),
        ];
        for strategy in all_strategies() {
            let err = solve(&cities, &strategy).unwrap_err();
            assert!(matches!(err, TspError::Input(_)), "{strategy}");
        }
    }

    #[test]
    fn test_every_strategy_returns_bijection() {
        let cities = random_cities(9, 4);
        for strategy in all_strategies() {
            let s = solve(&cities, &strategy).unwrap();
            assert!(is_permutation(&s.tour, 9), "{strategy}");
            assert!(s.cost.is_finite());
        }
    }

    #[test]
    fn test_exact_bounds_every_strategy() {
        for seed in 0..3 {
            let cities = random_cities(8, seed);
            let exact = solve(&cities, &Strategy::Exact(ExactConfig::default())).unwrap();
            for strategy in all_strategies() {
                let s = solve(&cities, &strategy).unwrap();
                assert!(exact.cost <= s.cost + 1e-9, "{strategy} beat exact");
            }
        }
    }

    #[test]
    fn test_exact_size_limit_through_facade() {
        let cities = random_cities(15, 2);
        let err = solve(&cities, &Strategy::Exact(ExactConfig::default())).unwrap_err();
        assert!(matches!(
            err,
            TspError::SizeLimitExceeded {
                cities: 15,
                limit: 14
            }
        ));
    }

    #[test]
    fn test_diagnostics_display() {
        let s = solve(&unit_square(), &Strategy::Greedy).unwrap();
        let text = s.diagnostics.to_string();
        assert!(text.starts_with("single construction"));
        assert!(text.contains("stopped: completed"));
    }

    #[test]
    fn test_strategy_names() {
        let names: Vec<&str> = all_strategies().iter().map(Strategy::name).collect();
        assert_eq!(names, ["exact", "greedy", "anneal", "ant"]);
    }
}
