//! Traveling salesman solvers over cities in the plane.
//!
//! Four strategies share one geometric model:
//!
//! - **Exact**: exhaustive enumeration of the `(n-1)!` tours through a
//!   fixed start city; optimal, refuses instances above a size threshold.
//! - **Greedy**: nearest-neighbor construction from city 0, O(n²).
//! - **Simulated Annealing (SA)**: segment reversal and relocation moves
//!   under a geometric cooling schedule with a self-calibrated start
//!   temperature.
//! - **Ant Colony Optimization (ACO)**: a colony of ants building tours
//!   from a shared pheromone matrix updated once per generation.
//!
//! [`solver::solve`] runs any of them behind a uniform
//! `cities -> Solution { tour, cost, diagnostics }` contract.
//!
//! # Features
//!
//! - `parallel`: rayon-backed enumeration partitions, SA sampling and ant
//!   construction. Results are identical to the sequential path.
//! - `serde`: serialization of configs, cities and results.
//! - `json`: JSON instance files ([`instance::load_json`], [`instance::save_json`]).
//! - `cli`: the `tsm` binary.

pub mod aco;
pub mod error;
pub mod exact;
pub mod greedy;
pub mod history;
pub mod instance;
pub mod model;
pub mod random;
pub mod sa;
pub mod solver;
pub mod termination;

pub use error::{Result, TspError};
