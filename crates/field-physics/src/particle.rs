//! Point charges in the plane

use glam::DVec2;

/// A stationary point charge.
///
/// Particles are plain values: once created they are never mutated, only
/// read by the field and potential evaluators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in simulation units
    pub position: DVec2,
    /// Signed charge (in units of elementary charge e)
    pub charge: f64,
}

impl Particle {
    /// Create a particle at `(x, y)` with the given signed charge
    pub fn new(x: f64, y: f64, charge: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            charge,
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// The `(x, y, q)` triple
    pub fn to_tuple(&self) -> (f64, f64, f64) {
        (self.position.x, self.position.y, self.charge)
    }
}

impl From<(f64, f64, f64)> for Particle {
    fn from((x, y, charge): (f64, f64, f64)) -> Self {
        Self::new(x, y, charge)
    }
}

/// Sum of all charges in a configuration
pub fn net_charge(particles: &[Particle]) -> f64 {
    particles.iter().map(|p| p.charge).sum()
}
