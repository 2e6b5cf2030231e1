//! # Field Simulation
//!
//! Samples the electric potential and field of a charge configuration over
//! regular grids, ready for colormapping.

pub mod grid;
pub mod params;
pub mod scene;

pub use grid::*;
pub use params::*;
pub use scene::*;
