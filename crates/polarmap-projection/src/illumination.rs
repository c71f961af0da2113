//! Day/night mask over the projection disk.
//!
//! A point is lit when its great-circle distance from the sub-solar point is
//! below 90°. The mask samples that test on a regular (angle × radius) grid;
//! cells are independent of each other.

use std::f64::consts::TAU;

use crate::geo::{GeoPoint, ProjectedPoint, angular_separation};
use crate::transform::{MapCenter, PolarProjection, unproject_pole_centered};

/// Arc distance from the sub-solar point at which night begins.
pub const TERMINATOR_DEG: f64 = 90.0;

/// Returns `true` if `point` lies in the hemisphere facing the sun.
pub fn is_illuminated(point: GeoPoint, sun: GeoPoint) -> bool {
    angular_separation(point, sun) < TERMINATOR_DEG
}

/// Sampling grid over the projection disk.
///
/// Angles are spaced evenly over `[0, 2π]` and radii over `[0, 180]`, both
/// endpoints included, so the first and last angle columns coincide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolarGrid {
    pub theta_samples: usize,
    pub radius_samples: usize,
}

impl Default for PolarGrid {
    fn default() -> Self {
        Self {
            theta_samples: 360,
            radius_samples: 180,
        }
    }
}

impl PolarGrid {
    pub fn new(theta_samples: usize, radius_samples: usize) -> Self {
        Self {
            theta_samples,
            radius_samples,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.theta_samples * self.radius_samples
    }

    /// Angle of column `i` in radians.
    pub fn theta(&self, i: usize) -> f64 {
        linspace(0.0, TAU, self.theta_samples, i)
    }

    /// Radius of row `j` in degrees.
    pub fn radius(&self, j: usize) -> f64 {
        linspace(0.0, 180.0, self.radius_samples, j)
    }

    pub fn point(&self, i: usize, j: usize) -> ProjectedPoint {
        ProjectedPoint::new(self.radius(j), self.theta(i))
    }

    /// Nearest grid indices for a projected point, or `None` if the grid is
    /// empty or the point is off the disk.
    pub fn nearest(&self, p: ProjectedPoint) -> Option<(usize, usize)> {
        if self.theta_samples == 0 || self.radius_samples == 0 {
            return None;
        }
        if !(0.0..=180.0).contains(&p.radius) || !p.angle.is_finite() {
            return None;
        }
        let i = nearest_index(p.angle.rem_euclid(TAU), TAU, self.theta_samples);
        let j = nearest_index(p.radius, 180.0, self.radius_samples);
        Some((i, j))
    }
}

fn linspace(start: f64, end: f64, n: usize, i: usize) -> f64 {
    if n <= 1 {
        return start;
    }
    start + (end - start) * i as f64 / (n - 1) as f64
}

fn nearest_index(value: f64, span: f64, n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let idx = (value / span * (n - 1) as f64).round() as usize;
    idx.min(n - 1)
}

/// Boolean lit/unlit field over a [`PolarGrid`], stored row-major by radius.
#[derive(Clone, Debug, PartialEq)]
pub struct IlluminationMask {
    grid: PolarGrid,
    cells: Vec<bool>,
}

impl IlluminationMask {
    /// Build the mask for a pole-centered plot: each cell maps back to
    /// `lat = 90 - r`, `lon = degrees(angle)`.
    pub fn compute(sun: GeoPoint, grid: PolarGrid) -> Self {
        Self::from_fn(grid, |p| is_illuminated(unproject_pole_centered(p), sun))
    }

    /// Build the mask for a plot centered anywhere. Identical to
    /// [`IlluminationMask::compute`] when the center is `(90, 0)`.
    pub fn compute_centered(sun: GeoPoint, grid: PolarGrid, center: MapCenter) -> Self {
        let projection = PolarProjection::new(center);
        Self::from_fn(grid, |p| is_illuminated(projection.unproject(p), sun))
    }

    fn from_fn(grid: PolarGrid, lit: impl Fn(ProjectedPoint) -> bool) -> Self {
        let mut cells = Vec::with_capacity(grid.cell_count());
        for j in 0..grid.radius_samples {
            for i in 0..grid.theta_samples {
                cells.push(lit(grid.point(i, j)));
            }
        }
        Self { grid, cells }
    }

    pub fn grid(&self) -> PolarGrid {
        self.grid
    }

    /// Lit state of the cell at angle column `i`, radius row `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<bool> {
        if i >= self.grid.theta_samples || j >= self.grid.radius_samples {
            return None;
        }
        self.cells.get(j * self.grid.theta_samples + i).copied()
    }

    /// Lit state of the cell nearest to `p`.
    pub fn sample(&self, p: ProjectedPoint) -> Option<bool> {
        let (i, j) = self.grid.nearest(p)?;
        self.get(i, j)
    }

    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|&&lit| lit).count()
    }
}
