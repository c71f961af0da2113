//! Ecliptic → equatorial conversion and the step from right ascension to a
//! ground longitude.

use polarmap_projection::{GeoPoint, normalize_degrees, normalize_longitude};

use crate::time::days_since_j2000;

/// Geocentric equatorial direction of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    /// Right ascension in degrees, `[0, 360)`.
    pub ra_deg: f64,
    /// Declination in degrees, `[-90, 90]`.
    pub dec_deg: f64,
}

/// Mean obliquity of the ecliptic in degrees (low-precision linear fit).
pub fn mean_obliquity_deg(jd: f64) -> f64 {
    23.439 - 0.000_000_4 * days_since_j2000(jd)
}

/// Rotate ecliptic longitude/latitude into right ascension/declination.
pub fn ecliptic_to_equatorial(lon_deg: f64, lat_deg: f64, obliquity_deg: f64) -> Equatorial {
    let (sin_l, cos_l) = lon_deg.to_radians().sin_cos();
    let (sin_b, cos_b) = lat_deg.to_radians().sin_cos();
    let (sin_e, cos_e) = obliquity_deg.to_radians().sin_cos();

    let x = cos_b * cos_l;
    let y = cos_e * cos_b * sin_l - sin_e * sin_b;
    let z = sin_e * cos_b * sin_l + cos_e * sin_b;

    Equatorial {
        ra_deg: normalize_degrees(y.atan2(x).to_degrees()),
        dec_deg: z.clamp(-1.0, 1.0).asin().to_degrees(),
    }
}

/// The ground point directly beneath a body.
///
/// Latitude is the declination. Longitude is the Greenwich hour angle with
/// its sign flipped, `RA − GMST`, wrapped to `(-180, 180]`.
pub fn sub_point(eq: Equatorial, gmst_deg: f64) -> GeoPoint {
    GeoPoint::new(eq.dec_deg, normalize_longitude(eq.ra_deg - gmst_deg))
}
