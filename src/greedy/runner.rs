//! Nearest-neighbor tour construction.

use crate::error::{Result, TspError};
use crate::model::DistanceMatrix;
use tracing::info;

/// Result of a greedy construction.
#[derive(Debug, Clone)]
pub struct GreedyResult {
    /// Constructed tour, starting at city 0.
    pub tour: Vec<usize>,

    /// Length of `tour`, including the closing edge back to city 0.
    pub cost: f64,
}

/// Builds one tour by nearest-unvisited-city selection.
pub struct GreedyRunner;

impl GreedyRunner {
    /// Constructs a tour starting from city 0.
    ///
    /// # Complexity
    /// O(n²) time, O(n) space.
    ///
    /// # Errors
    /// [`TspError::Input`] for fewer than two cities.
    pub fn run(distance: &DistanceMatrix) -> Result<GreedyResult> {
        let n = distance.len();
        if n < 2 {
            return Err(TspError::input(format!(
                "at least 2 cities are required, got {n}"
            )));
        }

        let mut visited = vec![false; n];
        let mut tour = Vec::with_capacity(n);
        let mut cost = 0.0;
        let mut current = 0;
        visited[0] = true;
        tour.push(0);

        while tour.len() < n {
            // strict `<` over ascending indices: lowest index wins ties
            let mut next = None;
            let mut nearest = f64::INFINITY;
            for (city, &d) in distance.row(current).iter().enumerate() {
                if !visited[city] && (next.is_none() || d < nearest) {
                    nearest = d;
                    next = Some(city);
                }
            }
            let Some(city) = next else {
                break;
            };
            visited[city] = true;
            tour.push(city);
            cost += nearest;
            current = city;
        }
        cost += distance.get(current, 0);

        info!(event = "solve_end", solver = "greedy", cities = n, cost = cost);

        Ok(GreedyResult { tour, cost })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{is_permutation, measure, City};

    fn matrix(points: &[(f64, f64)]) -> DistanceMatrix {
        let cities: Vec<City> = points.iter().map(|&p| City::from(p)).collect();
        DistanceMatrix::from_cities(&cities).unwrap()
    }

    #[test]
    fn test_unit_square_is_perimeter() {
        let m = matrix(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let result = GreedyRunner::run(&m).unwrap();
        assert_eq!(result.cost, 4.0);
        // 1 and 3 are equidistant from 0; the lower index wins
        assert_eq!(result.tour, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_cost_matches_measure() {
        let m = matrix(&[(0.1, 0.1), (0.9, 0.2), (0.5, 0.9), (0.3, 0.4), (0.7, 0.6)]);
        let result = GreedyRunner::run(&m).unwrap();
        assert!(is_permutation(&result.tour, 5));
        assert!((result.cost - measure(&result.tour, &m)).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let points: Vec<(f64, f64)> = (0..40)
            .map(|i| {
                let t = i as f64;
                ((t * 0.618).fract(), (t * 0.414).fract())
            })
            .collect();
        let m = matrix(&points);
        let a = GreedyRunner::run(&m).unwrap();
        let b = GreedyRunner::run(&m).unwrap();
        assert_eq!(a.tour, b.tour);
        assert_eq!(a.cost.to_bits(), b.cost.to_bits());
    }

    #[test]
    fn test_follows_line() {
        let m = matrix(&[(0.0, 0.0), (0.3, 0.0), (0.1, 0.0), (0.2, 0.0)]);
        let result = GreedyRunner::run(&m).unwrap();
        assert_eq!(result.tour, vec![0, 2, 3, 1]);
    }
}
