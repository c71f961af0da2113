//! Low-precision solar position (Astronomical Almanac), good to about 0.01°
//! between 1950 and 2050.

use polarmap_projection::normalize_degrees;

use crate::equatorial::{Equatorial, ecliptic_to_equatorial, mean_obliquity_deg};
use crate::time::days_since_j2000;

/// Geometric ecliptic longitude of the Sun in degrees, `[0, 360)`.
pub fn ecliptic_longitude_deg(jd: f64) -> f64 {
    let n = days_since_j2000(jd);
    let mean_longitude = 280.460 + 0.985_647_4 * n;
    let g = (357.528 + 0.985_600_3 * n).to_radians();
    normalize_degrees(mean_longitude + 1.915 * g.sin() + 0.020 * (2.0 * g).sin())
}

/// Right ascension and declination of the Sun.
pub fn sun_equatorial(jd: f64) -> Equatorial {
    ecliptic_to_equatorial(ecliptic_longitude_deg(jd), 0.0, mean_obliquity_deg(jd))
}
