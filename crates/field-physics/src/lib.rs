//! # Field Physics
//!
//! Point charges, the multipole generator, and direct-superposition
//! evaluation of the electric field and potential in the plane.

pub mod constants;
pub mod field;
pub mod multipole;
pub mod particle;

pub use constants::*;
pub use field::*;
pub use multipole::*;
pub use particle::*;
