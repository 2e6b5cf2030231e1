//! Multipole charge arrangements

use crate::particle::Particle;
use std::f64::consts::TAU;

/// Place `n` charges evenly on a circle of radius `r`, alternating sign.
///
/// Particle `i` sits at angle `θ = 2π·i/n` measured clockwise from the +y
/// axis, i.e. at `(r·sin θ, r·cos θ)`. Even indices carry `+charge`, odd
/// indices `-charge`. `n = 0` yields an empty configuration.
pub fn multipole(n: usize, r: f64, charge: f64) -> Vec<Particle> {
    (0..n)
        .map(|i| {
            let theta = TAU * i as f64 / n as f64;
            let q = if i & 0x1 == 1 { -charge } else { charge };
            Particle::new(r * theta.sin(), r * theta.cos(), q)
        })
        .collect()
}

/// Two equal and opposite charges separated by `separation` along the x axis
///
/// The positive charge sits on the -x side.
pub fn dipole(separation: f64, charge: f64) -> Vec<Particle> {
    let half = separation * 0.5;
    vec![
        Particle::new(-half, 0.0, charge),
        Particle::new(half, 0.0, -charge),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::net_charge;

    #[test]
    fn test_even_multipole_is_neutral() {
        for n in [2, 4, 6, 8, 16] {
            let particles = multipole(n, 2.0, 1.0);
            assert_eq!(particles.len(), n);
            assert!(net_charge(&particles).abs() < 1e-12, "n = {}", n);
        }
    }

    #[test]
    fn test_odd_multipole_leaves_one_charge() {
        let particles = multipole(5, 1.0, 3.0);
        assert!((net_charge(&particles) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_multipole() {
        assert!(multipole(0, 2.0, 1.0).is_empty());
    }

    #[test]
    fn test_signs_alternate() {
        let particles = multipole(8, 2.0, 1.0);
        for pair in particles.windows(2) {
            assert_eq!(pair[0].charge, -pair[1].charge);
        }
        assert_eq!(particles[0].charge, 1.0);
    }

    #[test]
    fn test_positions_on_circle() {
        let particles = multipole(8, 2.0, 1.0);
        for p in &particles {
            assert!((p.position.length() - 2.0).abs() < 1e-12);
        }
        // First charge sits on the +y axis, second an eighth of a turn later at 45°
        assert!(particles[0].x().abs() < 1e-12);
        assert!((particles[0].y() - 2.0).abs() < 1e-12);
        let s = 2.0 * std::f64::consts::FRAC_1_SQRT_2;
        assert!((particles[1].x() - s).abs() < 1e-12);
        assert!((particles[1].y() - s).abs() < 1e-12);
    }

    #[test]
    fn test_dipole() {
        let particles = dipole(2.0, 1.0);
        assert_eq!(particles[0].to_tuple(), (-1.0, 0.0, 1.0));
        assert_eq!(particles[1].to_tuple(), (1.0, 0.0, -1.0));
    }
}
