//! SA configuration.

use crate::error::{Result, TspError};

/// Configuration for simulated annealing.
///
/// Counts that scale with the instance are given as factors of the city
/// count `n`.
///
/// # Examples
///
/// ```
/// use u_tsp::sa::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_cooling_factor(0.95)
///     .with_max_levels(500)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealingConfig {
    /// Random tours drawn to estimate the cost scale: `sample_factor · n`.
    pub sample_factor: usize,

    /// Initial temperature as a multiple of the largest sampled cost jump.
    pub initial_temperature_factor: f64,

    /// Geometric cooling factor in (0, 1): `T_{k+1} = factor · T_k`.
    pub cooling_factor: f64,

    /// Leave a temperature after more than `attempts_factor · n` proposals.
    pub attempts_factor: usize,

    /// Leave a temperature after more than `successes_factor · n`
    /// improving moves.
    pub successes_factor: usize,

    /// Levels recorded before convergence may be declared.
    pub min_levels: usize,

    /// Number of most recent levels compared in the convergence test.
    pub plateau_window: usize,

    /// Converged when `max - min < tolerance · max` over the window.
    pub tolerance: f64,

    /// Hard cap on temperature levels.
    pub max_levels: usize,

    /// Optional wall-clock limit, checked between temperature levels.
    pub time_limit_ms: Option<u64>,

    /// Whether to evaluate the initial samples in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            sample_factor: 10,
            initial_temperature_factor: 5.0,
            cooling_factor: 0.90,
            attempts_factor: 100,
            successes_factor: 10,
            min_levels: 10,
            plateau_window: 3,
            tolerance: 1e-4,
            max_levels: 10_000,
            time_limit_ms: None,
            parallel: true,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    pub fn with_sample_factor(mut self, factor: usize) -> Self {
        self.sample_factor = factor;
        self
    }

    pub fn with_initial_temperature_factor(mut self, factor: f64) -> Self {
        self.initial_temperature_factor = factor;
        self
    }

    pub fn with_cooling_factor(mut self, factor: f64) -> Self {
        self.cooling_factor = factor;
        self
    }

    pub fn with_attempts_factor(mut self, factor: usize) -> Self {
        self.attempts_factor = factor;
        self
    }

    pub fn with_successes_factor(mut self, factor: usize) -> Self {
        self.successes_factor = factor;
        self
    }

    pub fn with_min_levels(mut self, n: usize) -> Self {
        self.min_levels = n;
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

    pub fn with_max_levels(mut self, n: usize) -> Self {
        self.max_levels = n;
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

    /// Levels required before the convergence test runs.
    pub(crate) fn required_levels(&self) -> usize {
        self.min_levels.max(self.plateau_window)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.sample_factor == 0 {
            return Err(TspError::input("sample_factor must be at least 1"));
        }
        if !(self.initial_temperature_factor > 0.0) {
            return Err(TspError::input(
                "initial_temperature_factor must be positive",
            ));
        }
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(TspError::input(format!(
                "cooling_factor must be in (0, 1), got {}",
                self.cooling_factor
            )));
        }
        if self.attempts_factor == 0 || self.successes_factor == 0 {
            return Err(TspError::input(
                "attempts_factor and successes_factor must be at least 1",
            ));
        }
        if self.plateau_window == 0 {
            return Err(TspError::input("plateau_window must be at least 1"));
        }
        if !(self.tolerance >= 0.0) {
            return Err(TspError::input("tolerance must be non-negative"));
        }
        if self.max_levels == 0 {
            return Err(TspError::input("max_levels must be at least 1"));
        }
        if self.time_limit_ms == Some(0) {
            return Err(TspError::input("time_limit_ms must be positive or None"));
        }
        Ok(())
    }
}
