//! Field and potential maps for one charge configuration

use crate::grid::MeshGrid;
use crate::params::{PotentialNorm, SceneParams};
use colormap::{autoscale, LogNorm, MidpointLogNorm, Norm, NormError, SymLogNorm};
use field_physics::{electric_field, electric_potential, net_charge, FieldSample, Particle};

/// Sampled potential (fine grid) and field (coarse grid)
#[derive(Debug, Clone, PartialEq)]
pub struct FieldScene {
    params: SceneParams,
    particles: Vec<Particle>,
    potential_grid: MeshGrid,
    field_grid: MeshGrid,
    potential: Vec<f64>,
    field: Vec<FieldSample>,
}

impl FieldScene {
    /// Evaluate the configured multipole
    pub fn from_params(params: SceneParams) -> Self {
        let particles = params.multipole.particles();
        Self::new(params, particles)
    }

    /// Evaluate an arbitrary charge configuration
    pub fn new(params: SceneParams, particles: Vec<Particle>) -> Self {
        let k = params.coulomb_constant;

        log::info!(
            "Building scene: {} particles, net charge {:.3}",
            particles.len(),
            net_charge(&particles)
        );
        for particle in &particles {
            log::trace!("Charge (x, y, q) = {:?}", particle.to_tuple());
        }

        let potential_grid = MeshGrid::centered(params.window, params.potential_resolution);
        let potential = potential_grid.map(|point| electric_potential(point, &particles, k));
        let singular = potential.iter().filter(|v| !v.is_finite()).count();
        if singular > 0 {
            log::warn!(
                "{} potential samples coincide with a charge and will be masked",
                singular
            );
        }
        log::debug!(
            "Potential map: {}x{} samples",
            potential_grid.nx(),
            potential_grid.ny()
        );

        let field_grid = MeshGrid::centered(params.window, params.field_resolution);
        let field = field_grid.map(|point| electric_field(point, &particles, k));
        log::debug!(
            "Field map: {}x{} samples, {} masked",
            field_grid.nx(),
            field_grid.ny(),
            field.iter().filter(|s| s.is_masked()).count()
        );

        Self {
            params,
            particles,
            potential_grid,
            field_grid,
            potential,
            field,
        }
    }

    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn potential_grid(&self) -> &MeshGrid {
        &self.potential_grid
    }

    pub fn field_grid(&self) -> &MeshGrid {
        &self.field_grid
    }

    /// Row-major potential values, aligned with `potential_grid`
    pub fn potential(&self) -> &[f64] {
        &self.potential
    }

    /// Row-major field samples, aligned with `field_grid`
    pub fn field(&self) -> &[FieldSample] {
        &self.field
    }

    /// Finite min/max of the potential
    pub fn potential_range(&self) -> Result<(f64, f64), NormError> {
        autoscale(self.potential.iter().copied())
    }

    /// Min/max field magnitude over unmasked samples
    pub fn magnitude_range(&self) -> Result<(f64, f64), NormError> {
        autoscale(
            self.field
                .iter()
                .filter(|s| !s.is_masked())
                .map(|s| s.magnitude),
        )
    }

    /// Normalization for the potential heatmap, scaled to the data
    pub fn potential_norm(&self) -> Result<Box<dyn Norm>, NormError> {
        let (vmin, vmax) = self.potential_range()?;
        let norm: Box<dyn Norm> = match self.params.potential_norm {
            PotentialNorm::SymLog {
                lin_thres,
                lin_scale,
            } => Box::new(SymLogNorm::new(lin_thres, lin_scale, vmin, vmax)?),
            PotentialNorm::MidpointLog {
                lin_thres,
                lin_scale,
                midpoint,
            } => Box::new(MidpointLogNorm::new(
                lin_thres, lin_scale, midpoint, vmin, vmax,
            )?),
        };
        log::info!("Potential range [{:.4}, {:.4}]", vmin, vmax);
        Ok(norm)
    }

    /// Log normalization for arrow colors
    pub fn magnitude_norm(&self) -> Result<LogNorm, NormError> {
        let (vmin, vmax) = self.magnitude_range()?;
        log::info!("Field magnitude range [{:.3e}, {:.3e}]", vmin, vmax);
        LogNorm::new(vmin, vmax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MultipoleParams;
    use field_physics::dipole;

    fn small_params() -> SceneParams {
        SceneParams {
            field_resolution: 9,
            potential_resolution: 40,
            ..Default::default()
        }
    }

    #[test]
    fn test_maps_match_grids() {
        let scene = FieldScene::from_params(small_params());
        assert_eq!(scene.particles().len(), 8);
        assert_eq!(scene.potential().len(), 40 * 40);
        assert_eq!(scene.field().len(), 9 * 9);
    }

    #[test]
    fn test_scene_is_deterministic() {
        let a = FieldScene::from_params(small_params());
        let b = FieldScene::from_params(small_params());
        assert_eq!(a, b);
        let bits = |s: &FieldScene| s.potential().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_multipole_potential_is_antisymmetric() {
        // Even multipole: total potential range straddles zero
        let scene = FieldScene::from_params(small_params());
        let (vmin, vmax) = scene.potential_range().unwrap();
        assert!(vmin < 0.0 && vmax > 0.0);
        assert!(scene.potential_norm().is_ok());
    }

    #[test]
    fn test_singular_samples_are_masked() {
        // Charges on grid points of a 5x5 grid over a 4x4 window
        let params = SceneParams {
            window: (4.0, 4.0),
            field_resolution: 5,
            potential_resolution: 5,
            ..Default::default()
        };
        let scene = FieldScene::new(params, dipole(2.0, 1.0));
        let grid = scene.potential_grid();
        let on_charge = grid.idx(1, 2);
        assert_eq!(grid.point(1, 2), scene.particles()[0].position);
        assert!(!scene.potential()[on_charge].is_finite());

        let (vmin, vmax) = scene.potential_range().unwrap();
        assert!(vmin.is_finite() && vmax.is_finite());

        // Origin sits on the bisector and is not masked in the field map
        let centre = scene.field_grid().idx(2, 2);
        assert!(!scene.field()[centre].is_masked());
        let norm = scene.magnitude_norm().unwrap();
        assert!(norm.normalize(scene.field()[centre].magnitude).is_some());
    }

    #[test]
    fn test_empty_configuration_has_no_ranges() {
        let params = SceneParams {
            multipole: MultipoleParams {
                count: 0,
                radius: 1.0,
                charge: 1.0,
            },
            ..small_params()
        };
        let scene = FieldScene::from_params(params);
        assert!(scene.field().iter().all(|s| s.is_masked()));
        assert_eq!(scene.magnitude_range(), Err(NormError::EmptyData));
        // Zero everywhere: a flat range
        assert_eq!(scene.potential_range(), Ok((0.0, 0.0)));
    }
}
