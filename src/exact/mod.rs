//! Exhaustive search.
//!
//! Fixes city 0 as the anchor and enumerates every ordering of the other
//! `n - 1` cities, so each distinct cycle is visited up to direction.
//! The `(n - 1)!` search space is guarded by a configured city limit that
//! is checked before enumeration starts.

mod config;
mod runner;

pub use config::ExactConfig;
pub use runner::{ExactResult, ExactRunner};
