//! Physical constants in visualization units
//!
//! The plot only shows relative structure, so the Coulomb constant is unity
//! instead of 1/(4πε₀).

/// Coulomb constant k = 1/(4πε₀), scaled for visualization
pub const K_COULOMB: f64 = 1.0;

/// Elementary charge used by the default multipole
pub const E_CHARGE: f64 = 1.0;
