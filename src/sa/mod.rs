//! Simulated Annealing (SA) for tours.
//!
//! Samples random tours to estimate the cost scale, starts hot, and at
//! each temperature proposes segment reversals and relocations accepted
//! by the Metropolis rule. The temperature is reduced geometrically until
//! the current cost stops changing over a few consecutive levels.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Press et al., *Numerical Recipes*, §10.12 (reverse/transport moves)

mod config;
mod moves;
mod runner;

pub use config::AnnealingConfig;
pub use moves::Move;
pub use runner::{AnnealingResult, AnnealingRunner, TemperatureLevel};
