//! ACO configuration.

use crate::error::{Result, TspError};

/// Configuration for the ant colony.
///
/// # Examples
///
/// ```
/// use u_tsp::aco::AntColonyConfig;
///
/// let config = AntColonyConfig::default()
///     .with_colony_size(20)
///     .with_beta(5.0)
///     .with_seed(42);
/// assert_eq!(config.colony_size, 20);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AntColonyConfig {
    /// Number of ants constructing a tour each generation.
    pub colony_size: usize,

    /// Hard cap on generations.
    pub max_generations: usize,

    /// Number of most recent best costs compared in the convergence test.
    pub plateau_window: usize,

    /// Converged when `max - min < tolerance · max` over the window.
    pub tolerance: f64,

    /// Pheromone deposit intensity `Q`.
    pub intensity: f64,

    /// Evaporation rate `rho` in [0, 1].
    pub evaporation: f64,

    /// Pheromone exponent `alpha`.
    pub alpha: f64,

    /// Visibility (inverse distance) exponent `beta`.
    pub beta: f64,

    /// Pheromone level on every edge before the first generation.
    pub initial_pheromone: f64,

    /// Floor applied to distances before taking the reciprocal, so that
    /// coincident cities do not produce an infinite visibility.
    pub min_distance: f64,

    /// Optional wall-clock limit, checked between generations.
    pub time_limit_ms: Option<u64>,

    /// Whether ants build their tours in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AntColonyConfig {
    fn default() -> Self {
        Self {
            colony_size: 10,
            max_generations: 100,
            plateau_window: 3,
            tolerance: 1e-5,
            intensity: 10.0,
            evaporation: 0.5,
            alpha: 1.0,
            beta: 10.0,
            initial_pheromone: 0.1,
            min_distance: 1e-9,
            time_limit_ms: None,
            parallel: true,
            seed: None,
        }
    }
}

impl AntColonyConfig {
    pub fn with_colony_size(mut self, n: usize) -> Self {
        self.colony_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_plateau_window(mut self, n: usize) -> Self {
        self.plateau_window = n;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_intensity(mut self, q: f64) -> Self {
        self.intensity = q;
        self
    }

    pub fn with_evaporation(mut self, rho: f64) -> Self {
        self.evaporation = rho;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_initial_pheromone(mut self, level: f64) -> Self {
        self.initial_pheromone = level;
        self
    }

    pub fn with_min_distance(mut self, d: f64) -> Self {
        self.min_distance = d;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.colony_size == 0 {
            return Err(TspError::input("colony_size must be at least 1"));
        }
        if self.max_generations == 0 {
            return Err(TspError::input("max_generations must be at least 1"));
        }
        if self.plateau_window == 0 {
            return Err(TspError::input("plateau_window must be at least 1"));
        }
        if !(self.tolerance >= 0.0) {
            return Err(TspError::input("tolerance must be non-negative"));
        }
        if !(self.intensity > 0.0 && self.intensity.is_finite()) {
            return Err(TspError::input("intensity must be positive and finite"));
        }
        if !(0.0..=1.0).contains(&self.evaporation) {
            return Err(TspError::input(format!(
                "evaporation must be in [0, 1], got {}",
                self.evaporation
            )));
        }
        if !(self.alpha >= 0.0 && self.alpha.is_finite())
            || !(self.beta >= 0.0 && self.beta.is_finite())
        {
            return Err(TspError::input("alpha and beta must be finite and non-negative"));
        }
        if !(self.initial_pheromone > 0.0 && self.initial_pheromone.is_finite()) {
            return Err(TspError::input("initial_pheromone must be positive and finite"));
        }
        if !(self.min_distance > 0.0) {
            return Err(TspError::input("min_distance must be positive"));
        }
        if self.time_limit_ms == Some(0) {
            return Err(TspError::input("time_limit_ms must be positive or None"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AntColonyConfig::default();
        assert_eq!(config.colony_size, 10);
        assert_eq!(config.max_generations, 100);
        assert_eq!(config.plateau_window, 3);
        assert!((config.tolerance - 1e-5).abs() < 1e-15);
        assert!((config.intensity - 10.0).abs() < 1e-12);
        assert!((config.evaporation - 0.5).abs() < 1e-12);
        assert!((config.alpha - 1.0).abs() < 1e-12);
        assert!((config.beta - 10.0).abs() < 1e-12);
        assert!((config.initial_pheromone - 0.1).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_colony() {
        let config = AntColonyConfig::default().with_colony_size(0);
        assert!(matches!(config.validate(), Err(TspError::Input(_))));
    }

    #[test]
    fn test_validate_bad_evaporation() {
        assert!(AntColonyConfig::default()
            .with_evaporation(1.5)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_exponents() {
        assert!(AntColonyConfig::default().with_beta(-1.0).validate().is_err());
        assert!(AntColonyConfig::default()
            .with_alpha(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_min_distance() {
        assert!(AntColonyConfig::default()
            .with_min_distance(0.0)
            .validate()
            .is_err());
    }
}
