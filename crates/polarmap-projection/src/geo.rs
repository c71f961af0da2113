//! Geographic and projected point types, plus the angle helpers shared by
//! the transform and the illumination model.

use serde::{Deserialize, Serialize};

/// A point on the sphere in degrees.
///
/// Latitude is expected in `[-90, 90]` but is never validated: out-of-range
/// values flow through the math and produce finite garbage or NaN, never a
/// panic. Longitude may be any real number.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lon: f64,
}

impl GeoPoint {
    /// The geographic north pole.
    pub const NORTH_POLE: Self = Self::new(90.0, 0.0);

    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// The diametrically opposite point.
    pub fn antipode(self) -> Self {
        Self::new(-self.lat, self.lon + 180.0)
    }

    /// Unit vector with x toward (0°, 0°), y toward (0°, 90°E) and z toward
    /// the north pole.
    pub fn to_unit_vector(self) -> glam::DVec3 {
        let (sin_lat, cos_lat) = self.lat.to_radians().sin_cos();
        let (sin_lon, cos_lon) = self.lon.to_radians().sin_cos();
        glam::DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
    }

    /// Inverse of [`GeoPoint::to_unit_vector`]. Latitude comes from `atan2`
    /// so it stays exact near the poles, where `asin` flattens out.
    pub fn from_unit_vector(v: glam::DVec3) -> Self {
        let lat = v.z.atan2(v.x.hypot(v.y)).to_degrees();
        let lon = v.y.atan2(v.x).to_degrees();
        Self::new(lat, lon)
    }
}

/// A point on the polar plot.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ProjectedPoint {
    /// Angular distance from the map center in degrees, `[0, 180]`.
    pub radius: f64,
    /// Bearing from the map center in radians, `[0, 2π)`.
    pub angle: f64,
}

impl ProjectedPoint {
    pub const fn new(radius: f64, angle: f64) -> Self {
        Self { radius, angle }
    }

    /// Cartesian position on a unit-radius disk (radius 180° maps to 1.0).
    ///
    /// Uses screen axes with `y` pointing down: angle zero points straight
    /// down and angles grow counter-clockwise as seen on screen.
    pub fn to_disk(self) -> glam::DVec2 {
        let rho = self.radius / 180.0;
        let (sin_a, cos_a) = self.angle.sin_cos();
        glam::DVec2::new(rho * sin_a, rho * cos_a)
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
///
/// Uses the Euclidean remainder, then folds the single value that rounding
/// can produce at the top of the range (`-1e-17 mod 360 == 360.0`) back to 0.
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Wrap a longitude in degrees into `(-180, 180]`.
pub fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = normalize_degrees(lon);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Great-circle distance between two points in degrees, by the spherical law
/// of cosines.
///
/// The `acos` argument is clamped to `[-1, 1]` so the sub-solar point itself
/// and its antipode give exactly 0° and 180° instead of NaN.
pub fn angular_separation(a: GeoPoint, b: GeoPoint) -> f64 {
    let (sin_a, cos_a) = a.lat.to_radians().sin_cos();
    let (sin_b, cos_b) = b.lat.to_radians().sin_cos();
    let dlon = (a.lon - b.lon).to_radians();
    let cos_sep = sin_a * sin_b + cos_a * cos_b * dlon.cos();
    cos_sep.clamp(-1.0, 1.0).acos().to_degrees()
}
