//! Error types for the TSP solvers.

use thiserror::Error;

/// Errors raised by the solvers, the distance model, and instance I/O.
///
/// Every solver validates its input before any work starts, so an error
/// never leaves a partially built tour behind.
#[derive(Debug, Error)]
pub enum TspError {
    /// Malformed input: too few cities, non-square or invalid distance
    /// data, an invalid tour, or an invalid configuration value.
    #[error("input error: {0}")]
    Input(String),

    /// The exhaustive solver was asked to enumerate an instance above its
    /// configured tractability threshold.
    #[error("instance with {cities} cities exceeds the exact solver limit of {limit}")]
    SizeLimitExceeded {
        /// Number of cities in the instance.
        cities: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// A reciprocal-distance heuristic produced a non-finite value.
    #[error("numerically degenerate input: {0}")]
    NumericalDegenerate(String),

    /// Instance file could not be read or written.
    #[cfg(feature = "json")]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Instance file is not a valid JSON city list.
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TspError {
    pub(crate) fn input(msg: impl Into<String>) -> Self {
        TspError::Input(msg.into())
    }
}

/// Result type alias for solver operations.
pub type Result<T> = std::result::Result<T, TspError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_limit_message() {
        let err = TspError::SizeLimitExceeded {
            cities: 15,
            limit: 14,
        };
        assert_eq!(
            err.to_string(),
            "instance with 15 cities exceeds the exact solver limit of 14"
        );
    }

    #[test]
    fn test_input_helper() {
        let err = TspError::input("need at least 2 cities");
        assert!(matches!(err, TspError::Input(ref m) if m == "need at least 2 cities"));
    }
}
