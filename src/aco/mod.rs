//! Ant Colony Optimization (ACO) for tours.
//!
//! Each generation, every ant builds a complete tour by roulette-wheel
//! selection weighted by `pheromone^alpha · (1/distance)^beta`. Ants read
//! an immutable view of the [`PheromoneMatrix`]; after the whole colony has
//! finished, the matrix evaporates and receives deposits proportional to
//! `1/length` along each ant's edges in a single update step.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod ant;
mod config;
mod pheromone;
mod runner;

pub use config::AntColonyConfig;
pub use pheromone::PheromoneMatrix;
pub use runner::{AntColonyResult, AntColonyRunner, Generation};
