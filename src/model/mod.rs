//! Geometric data model shared by every solver.
//!
//! - [`City`]: an immutable 2D coordinate
//! - [`DistanceMatrix`]: symmetric pairwise Euclidean distances, built once per solve
//! - [`tour`]: permutation-encoded closed tours and their length

mod city;
mod distance;
pub mod tour;

pub use city::City;
pub use distance::DistanceMatrix;
pub use tour::{canonical, is_permutation, measure, validate_tour};
