//! Exact solver configuration.

use crate::error::{Result, TspError};

/// Configuration for the exhaustive solver.
///
/// # Examples
///
/// ```
/// use u_tsp::exact::ExactConfig;
///
/// let config = ExactConfig::default().with_max_cities(10);
/// assert_eq!(config.max_cities, 10);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExactConfig {
    /// Largest instance the solver agrees to enumerate.
    ///
    /// 14 cities take hours of CPU time, 15 take days.
    pub max_cities: usize,

    /// Whether to split the enumeration across threads using rayon.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self {
            max_cities: 14,
            parallel: true,
        }
    }
}

impl ExactConfig {
    pub fn with_max_cities(mut self, n: usize) -> Self {
        self.max_cities = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_cities < 2 {
            return Err(TspError::input("max_cities must be at least 2"));
        }
        Ok(())
    }
}
