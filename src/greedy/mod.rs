//! Greedy nearest-neighbor construction.
//!
//! Starts at city 0 and repeatedly travels to the nearest unvisited city,
//! then closes the tour. Deterministic: ties go to the lowest city index.

mod runner;

pub use runner::{GreedyResult, GreedyRunner};
