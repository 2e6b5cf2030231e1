//! Electric field and potential by direct superposition
//!
//! Both evaluators sum Coulomb contributions over every particle. There is
//! no softening: a sample point that coincides with a charge drops that
//! charge's field contribution, while the potential is left unguarded and
//! comes out non-finite.

use crate::particle::Particle;
use glam::DVec2;

/// Field at one sample point, split into direction and strength
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    /// Unit vector along E, or zero when the field vanishes
    pub direction: DVec2,
    /// |E|
    pub magnitude: f64,
}

impl FieldSample {
    pub const ZERO: Self = Self {
        direction: DVec2::ZERO,
        magnitude: 0.0,
    };

    /// Zero-length samples have no direction and are left out of the quiver
    pub fn is_masked(&self) -> bool {
        self.magnitude == 0.0
    }
}

/// Superposed field vector E = k Σ qᵢ r̂ᵢ / |rᵢ|²
///
/// `rᵢ` points from particle `i` to `point`. A particle at exactly the
/// sample point contributes nothing.
pub fn electric_field_vector(point: DVec2, particles: &[Particle], k: f64) -> DVec2 {
    let field: DVec2 = particles
        .iter()
        .map(|p| {
            let separation = point - p.position;
            let distance_sq = separation.length_squared();
            if distance_sq == 0.0 {
                return DVec2::ZERO;
            }
            let unit = separation / distance_sq.sqrt();
            unit * (p.charge / distance_sq)
        })
        .sum();
    field * k
}

/// Field at `point` as unit direction plus magnitude
pub fn electric_field(point: DVec2, particles: &[Particle], k: f64) -> FieldSample {
    let field = electric_field_vector(point, particles, k);
    let magnitude = field.length();
    if magnitude == 0.0 {
        return FieldSample::ZERO;
    }
    FieldSample {
        direction: field / magnitude,
        magnitude,
    }
}

/// Potential V = k Σ qᵢ / |rᵢ|
///
/// Not guarded against coincident points: sampling exactly on a charge
/// yields ±∞ (or NaN for a zero charge).
pub fn electric_potential(point: DVec2, particles: &[Particle], k: f64) -> f64 {
    let potential: f64 = particles
        .iter()
        .map(|p| p.charge / point.distance(p.position))
        .sum();
    potential * k
}
