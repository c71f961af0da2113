//! Re-projection of geographic points onto a polar plot whose pole sits at an
//! arbitrary map center.
//!
//! The point is lifted to a unit vector, the frame is rotated so the center
//! becomes the new north pole (about z by `-center_lon`, then about y by
//! `center_lat - 90°`), and the rotated latitude/longitude become radius and
//! bearing:
//!
//! ```text
//! radius = 90 - lat'
//! angle  = radians(lon' mod 360)
//! ```

use glam::DMat3;
use serde::{Deserialize, Serialize};

use crate::geo::{GeoPoint, ProjectedPoint, normalize_degrees};

/// The pole of the polar projection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapCenter(pub GeoPoint);

impl MapCenter {
    /// Pole-centered map, the common case.
    pub const NORTH_POLE: Self = Self(GeoPoint::NORTH_POLE);

    pub const fn new(lat: f64, lon: f64) -> Self {
        Self(GeoPoint::new(lat, lon))
    }

    pub fn point(self) -> GeoPoint {
        self.0
    }

    /// True when the rotation degenerates to a pure longitude offset.
    pub fn is_north_pole(self) -> bool {
        self.0.lat == 90.0
    }
}

impl Default for MapCenter {
    fn default() -> Self {
        Self::NORTH_POLE
    }
}

/// A polar projection around a fixed center, with its rotation precomputed.
#[derive(Clone, Copy, Debug)]
pub struct PolarProjection {
    center: MapCenter,
    rotation: DMat3,
}

impl PolarProjection {
    pub fn new(center: MapCenter) -> Self {
        let c = center.point();
        let rotation = DMat3::from_rotation_y((c.lat - 90.0).to_radians())
            * DMat3::from_rotation_z(-c.lon.to_radians());
        Self { center, rotation }
    }

    pub fn center(&self) -> MapCenter {
        self.center
    }

    /// Project a geographic point onto the plot.
    pub fn project(&self, point: GeoPoint) -> ProjectedPoint {
        if self.center.is_north_pole() {
            // Identity tilt: only the longitude offset remains.
            let lon = point.lon - self.center.point().lon;
            return ProjectedPoint::new(90.0 - point.lat, normalize_degrees(lon).to_radians());
        }
        let rotated = GeoPoint::from_unit_vector(self.rotation * point.to_unit_vector());
        ProjectedPoint::new(
            90.0 - rotated.lat,
            normalize_degrees(rotated.lon).to_radians(),
        )
    }

    /// Map a plot position back to the geographic point it came from.
    ///
    /// The antipode of the center (radius 180) is reported with whatever
    /// longitude the bearing implies; every bearing lands on the same point.
    pub fn unproject(&self, projected: ProjectedPoint) -> GeoPoint {
        let local = unproject_pole_centered(projected);
        let c = self.center.point();
        if self.center.is_north_pole() {
            return GeoPoint::new(local.lat, local.lon + c.lon);
        }
        // Rotation matrices are orthonormal: the inverse is the transpose.
        GeoPoint::from_unit_vector(self.rotation.transpose() * local.to_unit_vector())
    }
}

/// Project `point` onto a polar plot centered at `center`.
pub fn project(point: GeoPoint, center: MapCenter) -> ProjectedPoint {
    PolarProjection::new(center).project(point)
}

/// Map a plot position back to geographic coordinates for a plot centered at
/// `center`.
pub fn unproject(projected: ProjectedPoint, center: MapCenter) -> GeoPoint {
    PolarProjection::new(center).unproject(projected)
}

/// Inverse of the pole-centered projection: `lat = 90 - r`,
/// `lon = degrees(angle)`.
pub fn unproject_pole_centered(projected: ProjectedPoint) -> GeoPoint {
    GeoPoint::new(90.0 - projected.radius, projected.angle.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    const EPS: f64 = 1e-9;

    /// The full rotation path, never taking the pole shortcut.
    fn project_general(point: GeoPoint, center: MapCenter) -> ProjectedPoint {
        let p = PolarProjection::new(center);
        let rotated = GeoPoint::from_unit_vector(p.rotation * point.to_unit_vector());
        ProjectedPoint::new(
            90.0 - rotated.lat,
            normalize_degrees(rotated.lon).to_radians(),
        )
    }

    fn angle_diff(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(TAU);
        d.min(TAU - d)
    }

    fn sample_points() -> Vec<GeoPoint> {
        let mut pts = Vec::new();
        for lat in (-80..=80).step_by(20) {
            for lon in (-180..180).step_by(35) {
                pts.push(GeoPoint::new(lat as f64 + 0.5, lon as f64 + 0.25));
            }
        }
        pts
    }

    fn sample_centers() -> Vec<MapCenter> {
        vec![
            MapCenter::NORTH_POLE,
            MapCenter::new(-90.0, 0.0),
            MapCenter::new(0.0, 0.0),
            MapCenter::new(55.75, 37.62),
            MapCenter::new(-33.9, 151.2),
            MapCenter::new(10.0, -170.0),
        ]
    }

    #[test]
    fn test_pole_centered_identity() {
        for p in sample_points() {
            let pp = project(p, MapCenter::NORTH_POLE);
            assert!((pp.radius - (90.0 - p.lat)).abs() < EPS);
            let expected = p.lon.rem_euclid(360.0).to_radians();
            assert!(angle_diff(pp.angle, expected) < EPS, "{p:?}");
        }
    }

    #[test]
    fn test_pole_shortcut_matches_general_formula() {
        for center in [MapCenter::NORTH_POLE, MapCenter::new(90.0, 47.0)] {
            for p in sample_points() {
                let fast = project(p, center);
                let slow = project_general(p, center);
                assert!((fast.radius - slow.radius).abs() < 1e-9, "{p:?}");
                assert!(angle_diff(fast.angle, slow.angle) < 1e-9, "{p:?}");
            }
        }
    }

    #[test]
    fn test_center_maps_to_origin() {
        for center in sample_centers() {
            let pp = project(center.point(), center);
            assert!(pp.radius.abs() < 1e-9, "{center:?} -> {pp:?}");
        }
    }

    #[test]
    fn test_center_antipode_maps_to_rim() {
        for center in sample_centers() {
            let pp = project(center.point().antipode(), center);
            assert!((pp.radius - 180.0).abs() < 1e-9, "{center:?} -> {pp:?}");
        }
    }

    #[test]
    fn test_points_near_center_stay_distinct() {
        for center in sample_centers() {
            let c = center.point();
            for offset in [1e-7, 1e-6, 1e-4] {
                let lat = if c.lat > 0.0 { c.lat - offset } else { c.lat + offset };
                let pp = project(GeoPoint::new(lat, c.lon), center);
                assert!(
                    (pp.radius - offset).abs() < offset * 1e-3,
                    "{center:?} offset {offset}: {pp:?}"
                );
            }
        }
    }

    #[test]
    fn test_antipodal_radii_sum_to_180() {
        for center in sample_centers() {
            for p in sample_points() {
                let a = project(p, center);
                let b = project(p.antipode(), center);
                assert!(
                    (a.radius + b.radius - 180.0).abs() < 1e-9,
                    "{p:?} around {center:?}: {} + {}",
                    a.radius,
                    b.radius
                );
            }
        }
    }

    #[test]
    fn test_radius_is_angular_distance_from_center() {
        for center in sample_centers() {
            for p in sample_points() {
                let r = project(p, center).radius;
                let d = crate::angular_separation(p, center.point());
                assert!((r - d).abs() < 1e-6, "{p:?} around {center:?}");
            }
        }
    }

    #[test]
    fn test_angle_in_range() {
        for center in sample_centers() {
            for p in sample_points() {
                let a = project(p, center).angle;
                assert!((0.0..TAU).contains(&a), "angle {a} out of range");
            }
        }
        // A longitude a hair below zero must not wrap to exactly 2π.
        let pp = project(GeoPoint::new(10.0, -1e-15), MapCenter::NORTH_POLE);
        assert!(pp.angle < TAU);
    }

    #[test]
    fn test_pole_centered_round_trip() {
        for r in [0.5, 30.0, 90.0, 150.0, 179.5] {
            for deg in [0.0, 45.0, 179.0, 270.5, 359.0] {
                let original = ProjectedPoint::new(r, f64::to_radians(deg));
                let geo = unproject_pole_centered(original);
                let back = project(geo, MapCenter::NORTH_POLE);
                assert!((back.radius - original.radius).abs() < EPS);
                assert!(angle_diff(back.angle, original.angle) < EPS);
            }
        }
    }

    #[test]
    fn test_general_round_trip() {
        for center in sample_centers() {
            let projection = PolarProjection::new(center);
            for p in sample_points() {
                let back = projection.unproject(projection.project(p));
                assert!((back.lat - p.lat).abs() < 1e-6, "{p:?} around {center:?}");
                assert!(
                    angle_diff(back.lon.to_radians(), p.lon.to_radians()) < 1e-6,
                    "{p:?} around {center:?}"
                );
            }
        }
    }

    #[test]
    fn test_equator_center_bearing() {
        // From (0, 0), the north pole is 90° away.
        let pp = project(GeoPoint::NORTH_POLE, MapCenter::new(0.0, 0.0));
        assert!((pp.radius - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_latitude_does_not_panic() {
        let pp = project(GeoPoint::new(120.0, 10.0), MapCenter::new(20.0, 30.0));
        assert!(pp.radius.is_finite());
        let nan = project(GeoPoint::new(f64::NAN, 10.0), MapCenter::new(20.0, 30.0));
        assert!(nan.radius.is_nan());
        let nan_pole = project(GeoPoint::new(f64::NAN, 10.0), MapCenter::NORTH_POLE);
        assert!(nan_pole.radius.is_nan());
    }
}
