//! Exhaustive enumeration.

use super::config::ExactConfig;
use crate::error::{Result, TspError};
use crate::model::{measure, DistanceMatrix};
use crate::termination::Termination;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Permutations evaluated between two cancellation checks.
const CANCEL_CHECK_INTERVAL: u64 = 1 << 16;

/// Result of an exhaustive search.
#[derive(Debug, Clone)]
pub struct ExactResult {
    /// Optimal tour, starting at city 0.
    pub tour: Vec<usize>,

    /// Length of `tour`.
    pub cost: f64,

    /// Number of permutations evaluated.
    pub permutations: u64,

    /// `Completed` unless cancelled mid-enumeration, in which case `tour`
    /// is the best of the permutations seen so far.
    pub termination: Termination,
}

/// Runs the exhaustive search.
pub struct ExactRunner;

impl ExactRunner {
    /// Finds a provably optimal tour.
    ///
    /// # Errors
    /// - [`TspError::Input`] for fewer than two cities or an invalid config
    /// - [`TspError::SizeLimitExceeded`] above `config.max_cities`
    pub fn run(distance: &DistanceMatrix, config: &ExactConfig) -> Result<ExactResult> {
        Self::run_with_cancel(distance, config, None)
    }

    /// Runs the search with an optional cancellation token.
    pub fn run_with_cancel(
        distance: &DistanceMatrix,
        config: &ExactConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<ExactResult> {
        config.validate()?;
        let n = distance.len();
        if n < 2 {
            return Err(TspError::input(format!(
                "at least 2 cities are required, got {n}"
            )));
        }
        if n > config.max_cities {
            return Err(TspError::SizeLimitExceeded {
                cities: n,
                limit: config.max_cities,
            });
        }

        info!(event = "solve_start", solver = "exact", cities = n);

        // One partition per choice of the city visited right after 0.
        // Partitions are enumerated in lexicographic order and reduced in
        // the same order, so the winner matches a sequential scan.
        let seconds: Vec<usize> = (1..n).collect();
        let flag = cancel.as_deref();
        let search = |&second: &usize| search_partition(distance, second, flag);

        #[cfg(feature = "parallel")]
        let partitions: Vec<Partition> = if config.parallel {
            seconds.par_iter().map(search).collect()
        } else {
            seconds.iter().map(search).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let partitions: Vec<Partition> = seconds.iter().map(search).collect();

        let mut permutations = 0u64;
        let mut cancelled = false;
        let mut best: Option<Partition> = None;
        for part in partitions {
            permutations += part.permutations;
            cancelled |= part.cancelled;
            debug!(second = part.tour[1], cost = part.cost, "partition searched");
            if best.as_ref().map_or(true, |b| part.cost < b.cost) {
                best = Some(part);
            }
        }
        let best = best.ok_or_else(|| TspError::input("no cities to enumerate"))?;

        let termination = if cancelled {
            Termination::Cancelled
        } else {
            Termination::Completed
        };

        info!(
            event = "solve_end",
            solver = "exact",
            permutations = permutations,
            cost = best.cost,
            termination = %termination,
        );

        Ok(ExactResult {
            tour: best.tour,
            cost: best.cost,
            permutations,
            termination,
        })
    }
}

/// Best tour within one partition of the search space.
struct Partition {
    tour: Vec<usize>,
    cost: f64,
    permutations: u64,
    cancelled: bool,
}

/// Enumerates all tours `[0, second, ..]` in lexicographic order.
fn search_partition(
    distance: &DistanceMatrix,
    second: usize,
    cancel: Option<&AtomicBool>,
) -> Partition {
    let n = distance.len();
    let mut tour = Vec::with_capacity(n);
    tour.push(0);
    tour.push(second);
    tour.extend((1..n).filter(|&c| c != second));

    let mut best = tour.clone();
    let mut best_cost = measure(&tour, distance);
    let mut permutations = 1u64;
    if cancel.is_some_and(|f| f.load(Ordering::Relaxed)) {
        return Partition {
            tour: best,
            cost: best_cost,
            permutations,
            cancelled: true,
        };
    }

    while next_permutation(&mut tour[2..]) {
        permutations += 1;
        if permutations % CANCEL_CHECK_INTERVAL == 0
            && cancel.is_some_and(|f| f.load(Ordering::Relaxed))
        {
            return Partition {
                tour: best,
                cost: best_cost,
                permutations,
                cancelled: true,
            };
        }
        let cost = measure(&tour, distance);
        if cost < best_cost {
            best_cost = cost;
            best.copy_from_slice(&tour);
        }
    }

    Partition {
        tour: best,
        cost: best_cost,
        permutations,
        cancelled: false,
    }
}

/// Rearranges `xs` into the next lexicographic permutation.
///
/// Returns `false` (leaving `xs` untouched) when `xs` is already the
/// last permutation.
fn next_permutation(xs: &mut [usize]) -> bool {
    if xs.len() < 2 {
        return false;
    }
    let mut i = xs.len() - 1;
    while i > 0 && xs[i - 1] >= xs[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = xs.len() - 1;
    while xs[j] <= xs[i - 1] {
        j -= 1;
    }
    xs.swap(i - 1, j);
    xs[i..].reverse();
    true
}
