//! Stopping conditions shared by the iterative solvers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// The search finished normally: exhaustive enumeration or
    /// construction completed, or a convergence plateau was reached.
    Completed,
    /// The hard cap on temperature levels or generations was reached.
    IterationLimit,
    /// The wall-clock limit elapsed.
    TimeLimit,
    /// The cancellation flag was raised.
    Cancelled,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Termination::Completed => "completed",
            Termination::IterationLimit => "iteration limit",
            Termination::TimeLimit => "time limit",
            Termination::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// External stop signals checked at level or generation boundaries.
pub(crate) struct StopGuard {
    started: Instant,
    time_limit: Option<Duration>,
    cancel: Option<Arc<AtomicBool>>,
}

impl StopGuard {
    pub(crate) fn new(time_limit_ms: Option<u64>, cancel: Option<Arc<AtomicBool>>) -> Self {
        Self {
            started: Instant::now(),
            time_limit: time_limit_ms.map(Duration::from_millis),
            cancel,
        }
    }

    /// Returns the reason to stop, if any. Cancellation wins over the
    /// time limit.
    pub(crate) fn check(&self) -> Option<Termination> {
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(Termination::Cancelled);
            }
        }
        match self.time_limit {
            Some(limit) if self.started.elapsed() >= limit => Some(Termination::TimeLimit),
            _ => None,
        }
    }
}

/// Returns `true` when the spread of the last `window` values is below
/// `tolerance` relative to their maximum.
///
/// Returns `false` while fewer than `window` values are available.
pub(crate) fn is_plateau(values: &[f64], window: usize, tolerance: f64) -> bool {
    if window == 0 || values.len() < window {
        return false;
    }
    let recent = &values[values.len() - window..];
    let max = recent.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = recent.iter().copied().fold(f64::INFINITY, f64::min);
    // all-zero costs (coincident cities) count as converged
    (max - min).abs() < (tolerance * max).abs() || (max == 0.0 && min == 0.0)
}
