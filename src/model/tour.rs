//! Permutation-encoded closed tours.
//!
//! A tour is a slice holding every city index `0..n` exactly once. The
//! closing edge from the last entry back to the first is implicit.

use super::distance::DistanceMatrix;
use crate::error::{Result, TspError};

/// Total length of the closed tour `tour` under `distance`.
///
/// Sums consecutive edges plus the wraparound edge from the last city back
/// to the first. Invariant under rotation and reversal of `tour`.
///
/// # Complexity
/// O(n)
pub fn measure(tour: &[usize], distance: &DistanceMatrix) -> f64 {
    match tour {
        [] | [_] => 0.0,
        [first, .., last] => {
            let open: f64 = tour
                .windows(2)
                .map(|w| distance.get(w[0], w[1]))
                .sum();
            open + distance.get(*last, *first)
        }
    }
}

/// Returns `true` if `tour` is a bijection over `0..n`.
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in tour {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}

/// Checks that `tour` visits each of the `n` cities exactly once.
///
/// # Errors
/// [`TspError::Input`] describing the first violation.
pub fn validate_tour(tour: &[usize], n: usize) -> Result<()> {
    if tour.len() != n {
        return Err(TspError::input(format!(
            "tour has {} entries, expected {n}",
            tour.len()
        )));
    }
    let mut seen = vec![false; n];
    for (pos, &city) in tour.iter().enumerate() {
        if city >= n {
            return Err(TspError::input(format!(
                "tour position {pos} holds city {city}, out of range for {n} cities"
            )));
        }
        if seen[city] {
            return Err(TspError::input(format!(
                "city {city} is visited twice (again at position {pos})"
            )));
        }
        seen[city] = true;
    }
    Ok(())
}

/// Rotates `tour` so that city 0 comes first, then orients it so the
/// second city is smaller than the last.
///
/// Two tours describing the same undirected cycle have the same canonical
/// form, which makes printed solutions comparable across solvers.
pub fn canonical(tour: &[usize]) -> Vec<usize> {
    let mut out = tour.to_vec();
    if let Some(pos) = out.iter().position(|&c| c == 0) {
        out.rotate_left(pos);
    }
    if out.len() > 2 && out[1] > out[out.len() - 1] {
        out[1..].reverse();
    }
    out
}
