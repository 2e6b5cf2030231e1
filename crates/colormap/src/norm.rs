//! Normalizations: map data values onto `[0, 1]` ahead of colormapping
//!
//! `None` marks a masked value (non-finite input, or outside the domain of a
//! log scale). Finite results may fall outside `[0, 1]`; the colormap paints
//! those with its under/over colors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormError {
    #[error("invalid range: vmin ({vmin}) must not exceed vmax ({vmax})")]
    InvertedRange { vmin: f64, vmax: f64 },

    #[error("range bounds must be finite (vmin = {vmin}, vmax = {vmax})")]
    NonFiniteRange { vmin: f64, vmax: f64 },

    #[error("log scale needs a positive vmin, got {0}")]
    NonPositiveLogRange(f64),

    #[error("linear threshold must be positive, got {0}")]
    InvalidThreshold(f64),

    #[error("linear scale must be non-negative, got {0}")]
    InvalidLinearScale(f64),

    #[error("log base must be greater than 1, got {0}")]
    InvalidBase(f64),

    #[error("midpoint {midpoint} lies outside the linear band (-{lin_thres}, {lin_thres})")]
    MidpointOutsideBand { midpoint: f64, lin_thres: f64 },

    #[error("no finite values to scale")]
    EmptyData,
}

/// Maps a data value onto the unit interval
pub trait Norm {
    fn normalize(&self, value: f64) -> Option<f64>;

    /// `(vmin, vmax)`
    fn range(&self) -> (f64, f64);
}

/// Finite `(min, max)` of a data set
pub fn autoscale<I>(values: I) -> Result<(f64, f64), NormError>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or(NormError::EmptyData)
}

fn check_range(vmin: f64, vmax: f64) -> Result<(), NormError> {
    if !vmin.is_finite() || !vmax.is_finite() {
        return Err(NormError::NonFiniteRange { vmin, vmax });
    }
    if vmin > vmax {
        return Err(NormError::InvertedRange { vmin, vmax });
    }
    Ok(())
}

/// Linear `vmin → 0`, `vmax → 1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    vmin: f64,
    vmax: f64,
}

impl Normalize {
    pub fn new(vmin: f64, vmax: f64) -> Result<Self, NormError> {
        check_range(vmin, vmax)?;
        Ok(Self { vmin, vmax })
    }
}

impl Norm for Normalize {
    fn normalize(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        if self.vmin == self.vmax {
            return Some(0.0);
        }
        Some((value - self.vmin) / (self.vmax - self.vmin))
    }

    fn range(&self) -> (f64, f64) {
        (self.vmin, self.vmax)
    }
}

/// Logarithmic (base 10) scale over a strictly positive range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNorm {
    vmin: f64,
    vmax: f64,
}

impl LogNorm {
    pub fn new(vmin: f64, vmax: f64) -> Result<Self, NormError> {
        check_range(vmin, vmax)?;
        if vmin <= 0.0 {
            return Err(NormError::NonPositiveLogRange(vmin));
        }
        Ok(Self { vmin, vmax })
    }
}

impl Norm for LogNorm {
    fn normalize(&self, value: f64) -> Option<f64> {
        if !value.is_finite() || value <= 0.0 {
            return None;
        }
        if self.vmin == self.vmax {
            return Some(0.0);
        }
        let lo = self.vmin.log10();
        let hi = self.vmax.log10();
        Some((value.log10() - lo) / (hi - lo))
    }

    fn range(&self) -> (f64, f64) {
        (self.vmin, self.vmax)
    }
}

/// Symmetric log scale: linear inside `[-linthresh, linthresh]`,
/// logarithmic beyond.
///
/// `linscale` sets how many decades the linear band is stretched over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymLogNorm {
    linthresh: f64,
    linscale: f64,
    vmin: f64,
    vmax: f64,
    base: f64,
}

impl SymLogNorm {
    pub fn new(linthresh: f64, linscale: f64, vmin: f64, vmax: f64) -> Result<Self, NormError> {
        Self::with_base(linthresh, linscale, vmin, vmax, 10.0)
    }

    pub fn with_base(
        linthresh: f64,
        linscale: f64,
        vmin: f64,
        vmax: f64,
        base: f64,
    ) -> Result<Self, NormError> {
        check_range(vmin, vmax)?;
        if !(linthresh > 0.0 && linthresh.is_finite()) {
            return Err(NormError::InvalidThreshold(linthresh));
        }
        if !(linscale >= 0.0 && linscale.is_finite()) {
            return Err(NormError::InvalidLinearScale(linscale));
        }
        if !(base > 1.0 && base.is_finite()) {
            return Err(NormError::InvalidBase(base));
        }
        Ok(Self {
            linthresh,
            linscale,
            vmin,
            vmax,
            base,
        })
    }

    /// Forward transform into the (unnormalized) symlog space
    pub fn transform(&self, value: f64) -> f64 {
        let scale = self.linscale / (1.0 - self.base.recip());
        let magnitude = value.abs();
        if magnitude <= self.linthresh {
            value * scale
        } else {
            let decades = (magnitude / self.linthresh).ln() / self.base.ln();
            value.signum() * self.linthresh * (scale + decades)
        }
    }
}

impl Norm for SymLogNorm {
    fn normalize(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        if self.vmin == self.vmax {
            return Some(0.0);
        }
        let lo = self.transform(self.vmin);
        let hi = self.transform(self.vmax);
        Some((self.transform(value) - lo) / (hi - lo))
    }

    fn range(&self) -> (f64, f64) {
        (self.vmin, self.vmax)
    }
}

/// Symmetric log scale whose colormap centre sits on an arbitrary midpoint.
///
/// Inside the linear band `[-lin_thres, lin_thres]` values are interpolated
/// piecewise-linearly through `(-lin_thres, 0.5 - p)`, `(midpoint, 0.5)` and
/// `(lin_thres, 0.5 + p)`, where `p = lin_scale / (lin_scale + 1) / 2` is the
/// share of each half of the colormap given to the band. Beyond the band the
/// symlog transform takes over, rescaled so it meets the band edge and
/// reaches 0 at `vmin` and 1 at `vmax`. A range lying wholly beyond one
/// band edge is stretched from `vmin` to `vmax` over the full `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MidpointLogNorm {
    symlog: SymLogNorm,
    midpoint: f64,
    linear_proportion: f64,
}

impl MidpointLogNorm {
    pub fn new(
        lin_thres: f64,
        lin_scale: f64,
        midpoint: f64,
        vmin: f64,
        vmax: f64,
    ) -> Result<Self, NormError> {
        let symlog = SymLogNorm::new(lin_thres, lin_scale, vmin, vmax)?;
        if !(midpoint > -lin_thres && midpoint < lin_thres) {
            return Err(NormError::MidpointOutsideBand {
                midpoint,
                lin_thres,
            });
        }
        Ok(Self {
            symlog,
            midpoint,
            linear_proportion: (lin_scale / (lin_scale + 1.0)) * 0.5,
        })
    }

    /// Fraction of each half of the colormap spent on the linear band
    pub fn linear_proportion(&self) -> f64 {
        self.linear_proportion
    }

    fn linear(&self, value: f64) -> f64 {
        let t = self.symlog.linthresh;
        let p = self.linear_proportion;
        if value < self.midpoint {
            let low = 0.5 - p;
            low + p * (value + t) / (self.midpoint + t)
        } else {
            0.5 + p * (value - self.midpoint) / (t - self.midpoint)
        }
    }

    /// Outside the band each side runs from its anchor to the range end.
    /// The anchor is the band edge, or `vmin`/`vmax` itself when the whole
    /// range sits beyond that edge; the anchor then maps to 0/1.
    fn logarithmic(&self, value: f64) -> f64 {
        let t = self.symlog.linthresh;
        let p = self.linear_proportion;
        let (vmin, vmax) = self.symlog.range();
        let tv = self.symlog.transform(value);
        if value > 0.0 {
            let (anchor, low) = if vmin > t { (vmin, 0.0) } else { (t, 0.5 + p) };
            let start = self.symlog.transform(anchor);
            let span = self.symlog.transform(vmax) - start;
            if span <= 0.0 {
                return if value > vmax { 1.0 } else { low };
            }
            low + (1.0 - low) * (tv - start) / span
        } else {
            let (anchor, high) = if vmax < -t { (vmax, 1.0) } else { (-t, 0.5 - p) };
            let end = self.symlog.transform(anchor);
            let span = end - self.symlog.transform(vmin);
            if span <= 0.0 {
                return if value < vmin { 0.0 } else { high };
            }
            high - high * (end - tv) / span
        }
    }
}

impl Norm for MidpointLogNorm {
    fn normalize(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        if value.abs() <= self.symlog.linthresh {
            Some(self.linear(value))
        } else {
            Some(self.logarithmic(value))
        }
    }

    fn range(&self) -> (f64, f64) {
        self.symlog.range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.map_or(false, |a| (a - b).abs() < EPS)
    }

    #[test]
    fn test_linear_normalize() {
        let norm = Normalize::new(-2.0, 6.0).unwrap();
        assert!(close(norm.normalize(-2.0), 0.0));
        assert!(close(norm.normalize(2.0), 0.5));
        assert!(close(norm.normalize(10.0), 1.5));
        assert_eq!(norm.normalize(f64::NAN), None);

        let flat = Normalize::new(3.0, 3.0).unwrap();
        assert_eq!(flat.normalize(3.0), Some(0.0));
        assert!(Normalize::new(1.0, 0.0).is_err());
    }

    #[test]
    fn test_log_norm() {
        let norm = LogNorm::new(0.01, 100.0).unwrap();
        assert!(close(norm.normalize(0.01), 0.0));
        assert!(close(norm.normalize(1.0), 0.5));
        assert!(close(norm.normalize(100.0), 1.0));
        assert_eq!(norm.normalize(0.0), None);
        assert_eq!(norm.normalize(-1.0), None);

        assert_eq!(LogNorm::new(0.0, 1.0), Err(NormError::NonPositiveLogRange(0.0)));
    }

    #[test]
    fn test_symlog_reference_values() {
        let norm = SymLogNorm::new(0.03, 1.0, -1.0, 1.0).unwrap();
        assert!(close(norm.normalize(0.0), 0.5));
        assert!(close(norm.normalize(-1.0), 0.0));
        assert!(close(norm.normalize(1.0), 1.0));
        assert!((norm.normalize(0.03).unwrap() - 0.710_917_879_659_819).abs() < 1e-12);
        assert!((norm.normalize(0.1).unwrap() - 0.810_173_908_306_163).abs() < 1e-12);
        assert!((norm.normalize(-0.5).unwrap() - 0.057_143_347_559_506).abs() < 1e-12);
        assert!((norm.normalize(0.01).unwrap() - 0.570_305_959_886_606).abs() < 1e-12);
    }

    #[test]
    fn test_symlog_asymmetric_range() {
        let norm = SymLogNorm::new(0.03, 1.0, -0.2, 2.0).unwrap();
        assert!((norm.normalize(0.0).unwrap() - 0.397_331_432_518_313).abs() < 1e-12);
        assert!((norm.normalize(0.5).unwrap() - 0.876_374_726_304_643).abs() < 1e-12);
    }

    #[test]
    fn test_symlog_rejects_bad_parameters() {
        assert_eq!(
            SymLogNorm::new(0.0, 1.0, -1.0, 1.0),
            Err(NormError::InvalidThreshold(0.0))
        );
        assert_eq!(
            SymLogNorm::new(0.1, -1.0, -1.0, 1.0),
            Err(NormError::InvalidLinearScale(-1.0))
        );
        assert_eq!(
            SymLogNorm::with_base(0.1, 1.0, -1.0, 1.0, 1.0),
            Err(NormError::InvalidBase(1.0))
        );
        assert!(SymLogNorm::new(0.1, 1.0, f64::NEG_INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_midpoint_maps_to_half() {
        for midpoint in [0.0, 0.01, -0.02, 0.029] {
            let norm = MidpointLogNorm::new(0.03, 1.0, midpoint, -5.0, 3.0).unwrap();
            assert_eq!(norm.normalize(midpoint), Some(0.5), "midpoint {}", midpoint);
        }
    }

    #[test]
    fn test_midpoint_linear_band_edges() {
        let norm = MidpointLogNorm::new(0.03, 1.0, 0.01, -1.0, 1.0).unwrap();
        assert_eq!(norm.linear_proportion(), 0.25);
        assert!(close(norm.normalize(-0.03), 0.25));
        assert!(close(norm.normalize(0.03), 0.75));
        assert!(close(norm.normalize(-1.0), 0.0));
        assert!(close(norm.normalize(1.0), 1.0));
        // Halfway between -lin_thres and the midpoint
        assert!(close(norm.normalize(-0.01), 0.375));
    }

    #[test]
    fn test_midpoint_is_monotonic_on_each_side() {
        let norm = MidpointLogNorm::new(0.03, 1.0, 0.005, -4.0, 9.0).unwrap();
        let samples: Vec<f64> = (0..=2000).map(|i| -4.0 + 13.0 * i as f64 / 2000.0).collect();
        let mapped: Vec<f64> = samples.iter().map(|&v| norm.normalize(v).unwrap()).collect();
        for (pair, values) in mapped.windows(2).zip(samples.windows(2)) {
            assert!(pair[1] >= pair[0], "not monotonic between {:?}", values);
        }
        for (&v, &m) in samples.iter().zip(&mapped) {
            if v < 0.005 {
                assert!(m < 0.5);
            } else {
                assert!(m >= 0.5);
            }
        }
    }

    #[test]
    fn test_midpoint_continuous_at_threshold() {
        let norm = MidpointLogNorm::new(0.03, 1.0, 0.0, -2.0, 2.0).unwrap();
        let h = 1e-9;
        for edge in [-0.03, 0.03] {
            let inside = norm.normalize(edge * (1.0 - h)).unwrap();
            let outside = norm.normalize(edge * (1.0 + h)).unwrap();
            assert!((inside - outside).abs() < 1e-6, "jump at {}", edge);
        }
    }

    #[test]
    fn test_midpoint_one_sided_range_spans_unit_interval() {
        // Potentials of a lone positive charge never enter the band
        let above = MidpointLogNorm::new(0.03, 1.0, 0.0, 0.5, 5.0).unwrap();
        assert!(close(above.normalize(0.5), 0.0));
        assert!(close(above.normalize(5.0), 1.0));
        let mid = above.normalize(1.5).unwrap();
        assert!(mid > 0.0 && mid < 1.0);
        assert!(above.normalize(0.1).unwrap() < 0.0);

        let below = MidpointLogNorm::new(0.03, 1.0, 0.0, -5.0, -0.5).unwrap();
        assert!(close(below.normalize(-5.0), 0.0));
        assert!(close(below.normalize(-0.5), 1.0));
        assert!(below.normalize(-0.1).unwrap() > 1.0);

        let flat = MidpointLogNorm::new(0.03, 1.0, 0.0, 2.0, 2.0).unwrap();
        assert_eq!(flat.normalize(2.0), Some(0.0));
    }

    #[test]
    fn test_midpoint_range_inside_band_clips_outer_values() {
        // vmax below the upper band edge: larger values land in "over"
        let norm = MidpointLogNorm::new(0.03, 1.0, 0.0, -1.0, 0.01).unwrap();
        assert_eq!(norm.normalize(0.5), Some(1.0));
        assert!(close(norm.normalize(-1.0), 0.0));

        // vmin above the lower band edge: smaller values land in "under"
        let norm = MidpointLogNorm::new(0.03, 1.0, 0.0, -0.01, 1.0).unwrap();
        assert_eq!(norm.normalize(-0.5), Some(0.0));
        assert!(close(norm.normalize(1.0), 1.0));
    }

    #[test]
    fn test_midpoint_outside_band_is_rejected() {
        assert_eq!(
            MidpointLogNorm::new(0.03, 1.0, 0.5, -1.0, 1.0),
            Err(NormError::MidpointOutsideBand {
                midpoint: 0.5,
                lin_thres: 0.03
            })
        );
        assert!(MidpointLogNorm::new(0.03, 1.0, 0.03, -1.0, 1.0).is_err());
    }

    #[test]
    fn test_midpoint_masks_non_finite() {
        let norm = MidpointLogNorm::new(0.03, 1.0, 0.0, -1.0, 1.0).unwrap();
        assert_eq!(norm.normalize(f64::INFINITY), None);
        assert_eq!(norm.normalize(f64::NAN), None);
    }

    #[test]
    fn test_autoscale_skips_non_finite() {
        let values = [3.0, f64::INFINITY, -2.0, f64::NAN, 0.5];
        assert_eq!(autoscale(values), Ok((-2.0, 3.0)));
        assert_eq!(autoscale([f64::NAN]), Err(NormError::EmptyData));
    }
}
