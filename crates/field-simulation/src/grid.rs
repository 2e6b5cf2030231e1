//! Regular sampling grids

use glam::DVec2;

/// `n` evenly spaced samples over `[start, stop]`, endpoints included.
///
/// A single sample is `start`; zero samples is empty.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            values[n - 1] = stop;
            values
        }
    }
}

/// Cartesian product of x and y sample positions.
///
/// Row `j` holds the points with y = `ys[j]`; column `i` those with
/// x = `xs[i]`. Flat storage is row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGrid {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl MeshGrid {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        Self { xs, ys }
    }

    /// A `resolution × resolution` grid spanning a window centred on the origin
    pub fn centered(window: (f64, f64), resolution: usize) -> Self {
        let (w, h) = window;
        Self::new(
            linspace(-w / 2.0, w / 2.0, resolution),
            linspace(-h / 2.0, h / 2.0, resolution),
        )
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Columns
    pub fn nx(&self) -> usize {
        self.xs.len()
    }

    /// Rows
    pub fn ny(&self) -> usize {
        self.ys.len()
    }

    pub fn len(&self) -> usize {
        self.nx() * self.ny()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        j * self.nx() + i
    }

    #[inline]
    pub fn point(&self, i: usize, j: usize) -> DVec2 {
        DVec2::new(self.xs[i], self.ys[j])
    }

    /// Spacing between neighbouring columns and rows (zero along a
    /// degenerate axis)
    pub fn spacing(&self) -> DVec2 {
        let step = |v: &[f64]| if v.len() > 1 { v[1] - v[0] } else { 0.0 };
        DVec2::new(step(&self.xs), step(&self.ys))
    }

    /// All sample points in row-major order
    pub fn points(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.ys
            .iter()
            .flat_map(move |&y| self.xs.iter().map(move |&x| DVec2::new(x, y)))
    }

    /// Evaluate `f` at every point, row-major
    pub fn map<T>(&self, f: impl FnMut(DVec2) -> T) -> Vec<T> {
        self.points().map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(-10.0, 10.0, 5), vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
        assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());

        let values = linspace(-10.0, 10.0, 250);
        assert_eq!(values.len(), 250);
        assert_eq!(values[0], -10.0);
        assert_eq!(values[249], 10.0);
    }

    #[test]
    fn test_meshgrid_layout() {
        let grid = MeshGrid::new(vec![0.0, 1.0, 2.0], vec![10.0, 20.0]);
        assert_eq!(grid.nx(), 3);
        assert_eq!(grid.ny(), 2);
        assert_eq!(grid.len(), 6);

        let points: Vec<DVec2> = grid.points().collect();
        assert_eq!(points[0], DVec2::new(0.0, 10.0));
        assert_eq!(points[2], DVec2::new(2.0, 10.0));
        assert_eq!(points[3], DVec2::new(0.0, 20.0));
        assert_eq!(points[grid.idx(1, 1)], grid.point(1, 1));
    }

    #[test]
    fn test_centered_grid() {
        let grid = MeshGrid::centered((20.0, 10.0), 25);
        assert_eq!(grid.xs()[0], -10.0);
        assert_eq!(grid.xs()[24], 10.0);
        assert_eq!(grid.ys()[0], -5.0);
        assert_eq!(grid.ys()[24], 5.0);
        // Odd resolution puts a sample on the origin
        assert_eq!(grid.point(12, 12), DVec2::ZERO);
        assert!((grid.spacing().x - 20.0 / 24.0).abs() < 1e-12);
    }
}
