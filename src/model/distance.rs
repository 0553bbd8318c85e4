use super::city::City;
use crate::error::{Result, TspError};

/// Symmetric N×N matrix of pairwise distances.
///
/// Stored row-major in a flat buffer. Built once at the start of a solve
/// and read-only afterwards.
///
/// # Invariants
///
/// - `get(i, j) == get(j, i)`
/// - `get(i, i) == 0`
/// - all entries finite and non-negative
/// - at least two cities
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes all pairwise Euclidean distances between `cities`.
    ///
    /// # Errors
    /// [`TspError::Input`] if fewer than two cities are given, any
    /// coordinate is non-finite, or a distance or tour length would
    /// overflow.
    pub fn from_cities(cities: &[City]) -> Result<Self> {
        let n = cities.len();
        if n < 2 {
            return Err(TspError::input(format!(
                "at least 2 cities are required, got {n}"
            )));
        }
        if let Some(i) = cities.iter().position(|c| !c.is_finite()) {
            return Err(TspError::input(format!(
                "city {i} has a non-finite coordinate"
            )));
        }

        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for k in (i + 1)..n {
                let d = cities[i].distance(&cities[k]);
                if !d.is_finite() {
                    return Err(TspError::input(format!(
                        "distance between cities {i} and {k} overflows"
                    )));
                }
                data[i * n + k] = d;
                data[k * n + i] = d;
            }
        }
        check_tour_bound(n, &data)?;
        Ok(Self { n, data })
    }

    /// Builds a matrix from explicit rows.
    ///
    /// # Errors
    /// [`TspError::Input`] if the rows are not square, describe fewer than
    /// two cities, or contain negative, non-finite, asymmetric, or non-zero
    /// diagonal entries.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if n < 2 {
            return Err(TspError::input(format!(
                "at least 2 cities are required, got {n}"
            )));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(TspError::input(format!(
                "distance matrix is not square: row {i} has {} entries, expected {n}",
                row.len()
            )));
        }

        let data: Vec<f64> = rows.into_iter().flatten().collect();
        for i in 0..n {
            if data[i * n + i] != 0.0 {
                return Err(TspError::input(format!("diagonal entry {i} is not zero")));
            }
            for k in 0..n {
                let d = data[i * n + k];
                if !d.is_finite() || d < 0.0 {
                    return Err(TspError::input(format!(
                        "distance ({i}, {k}) = {d} is not a finite non-negative value"
                    )));
                }
                if d != data[k * n + i] {
                    return Err(TspError::input(format!(
                        "distance matrix is not symmetric at ({i}, {k})"
                    )));
                }
            }
        }
        check_tour_bound(n, &data)?;
        Ok(Self { n, data })
    }

    /// Number of cities.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always `false`: a matrix holds at least two cities.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between cities `i` and `k`.
    #[inline]
    pub fn get(&self, i: usize, k: usize) -> f64 {
        self.data[i * self.n + k]
    }

    /// Distances from city `i` to every city.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Length of the closed tour `tour`. See [`super::measure`].
    #[inline]
    pub fn measure(&self, tour: &[usize]) -> f64 {
        super::tour::measure(tour, self)
    }
}

/// Every closed tour is at most `n · max` long; that bound must be finite.
fn check_tour_bound(n: usize, data: &[f64]) -> Result<()> {
    let max = data.iter().copied().fold(0.0, f64::max);
    if !(max * n as f64).is_finite() {
        return Err(TspError::input(format!(
            "largest distance {max} is too large to sum over a tour of {n} cities"
        )));
    }
    Ok(())
}
