//! Scene parameters
//!
//! Configuration lives in source: `SceneParams::default()` reproduces the
//! reference figure (eight alternating unit charges on a circle of radius 2
//! inside a 20×20 window).

use field_physics::{multipole, Particle, E_CHARGE, K_COULOMB};

/// Multipole generator inputs
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MultipoleParams {
    /// Number of charges on the circle
    pub count: usize,
    /// Circle radius
    pub radius: f64,
    /// Charge magnitude, sign alternates by index
    pub charge: f64,
}

impl MultipoleParams {
    pub fn particles(&self) -> Vec<Particle> {
        multipole(self.count, self.radius, self.charge)
    }
}

/// Normalization used for the potential heatmap
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PotentialNorm {
    /// Plain symmetric log, centred on zero
    SymLog { lin_thres: f64, lin_scale: f64 },
    /// Symmetric log re-centred so `midpoint` sits in the middle of the colormap
    MidpointLog {
        lin_thres: f64,
        lin_scale: f64,
        midpoint: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneParams {
    // Window
    // (width, height) of the simulation box, centred on the origin
    pub window: (f64, f64),

    // Grids
    // Samples per axis for the quiver plot
    pub field_resolution: usize,
    // Samples per axis for the potential heatmap
    pub potential_resolution: usize,

    // Physics
    pub coulomb_constant: f64,
    pub multipole: MultipoleParams,

    // Coloring
    pub potential_norm: PotentialNorm,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            window: (20.0, 20.0),
            field_resolution: 25,
            potential_resolution: 250,
            coulomb_constant: K_COULOMB,
            multipole: MultipoleParams {
                count: 8,
                radius: 2.0,
                charge: E_CHARGE,
            },
            potential_norm: PotentialNorm::MidpointLog {
                lin_thres: 0.03,
                lin_scale: 1.0,
                midpoint: 0.0,
            },
        }
    }
}
