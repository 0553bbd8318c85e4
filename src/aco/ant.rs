//! A single ant agent.

use super::config::AntColonyConfig;
use super::pheromone::PheromoneMatrix;
use crate::error::{Result, TspError};
use crate::model::{measure, DistanceMatrix};
use rand::Rng;

/// Builds one tour per generation from a random starting city.
#[derive(Debug, Clone)]
pub(crate) struct Ant {
    tour: Vec<usize>,
    /// Unvisited cities, kept in ascending order.
    unvisited: Vec<usize>,
    /// Cumulative selection weights, reused between steps.
    cumulative: Vec<f64>,
}

impl Ant {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            tour: Vec::with_capacity(n),
            unvisited: Vec::with_capacity(n),
            cumulative: Vec::with_capacity(n),
        }
    }

    /// Places the ant on `start` with every other city unvisited.
    pub(crate) fn reset(&mut self, n: usize, start: usize) {
        self.tour.clear();
        self.tour.push(start);
        self.unvisited.clear();
        self.unvisited.extend((0..n).filter(|&c| c != start));
    }

    pub(crate) fn tour(&self) -> &[usize] {
        &self.tour
    }

    /// Resets the ant to a random city and completes a tour.
    ///
    /// Returns the closed tour length.
    ///
    /// # Errors
    /// [`TspError::NumericalDegenerate`] if the selection weights overflow
    /// despite the distance floor.
    pub(crate) fn construct<R: Rng>(
        &mut self,
        distance: &DistanceMatrix,
        pheromone: &PheromoneMatrix,
        config: &AntColonyConfig,
        rng: &mut R,
    ) -> Result<f64> {
        let n = distance.len();
        self.reset(n, rng.random_range(0..n));

        while !self.unvisited.is_empty() {
            let from = self.tour[self.tour.len() - 1];
            self.cumulative.clear();
            let mut total = 0.0;
            for &to in &self.unvisited {
                let visibility = 1.0 / distance.get(from, to).max(config.min_distance);
                total += pheromone.get(from, to).powf(config.alpha) * visibility.powf(config.beta);
                self.cumulative.push(total);
            }

            if !total.is_finite() {
                return Err(TspError::NumericalDegenerate(format!(
                    "selection weight from city {from} is {total}"
                )));
            }

            let pick = if total > 0.0 {
                // roulette wheel: first city whose cumulative weight exceeds r
                let r = rng.random_range(0.0..total);
                self.cumulative
                    .partition_point(|&c| c <= r)
                    .min(self.unvisited.len() - 1)
            } else {
                // every weight underflowed: fall back to the nearest city
                nearest(distance.row(from), &self.unvisited)
            };

            let city = self.unvisited.remove(pick);
            self.tour.push(city);
        }

        Ok(measure(&self.tour, distance))
    }
}

/// Position in `candidates` of the closest city; lowest index on ties.
fn nearest(row: &[f64], candidates: &[usize]) -> usize {
    let mut best = 0;
    for (pos, &city) in candidates.iter().enumerate() {
        if row[city] < row[candidates[best]] {
            best = pos;
        }
    }
    best
}
