//! Structure generation: voxel grid, carving, greedy meshing and additive growth.

mod carve;
pub mod generator;
mod grid;
mod grow;
mod mesh;
mod stats;

pub use carve::*;
pub use generator::{generate, generate_report, GenerationCounters, GenerationReport};
pub use grid::*;
pub use grow::*;
pub use mesh::*;
pub use stats::*;
