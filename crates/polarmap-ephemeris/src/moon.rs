//! Low-precision lunar position (Astronomical Almanac series), good to about
//! 0.3° in longitude and 0.2° in latitude.

use polarmap_projection::normalize_degrees;

use crate::equatorial::{Equatorial, ecliptic_to_equatorial, mean_obliquity_deg};
use crate::time::centuries_since_j2000;

/// `(amplitude°, phase°, rate°/century)` periodic terms of ecliptic longitude.
const LONGITUDE_TERMS: [(f64, f64, f64); 6] = [
    (6.29, 135.0, 477_198.87),
    (-1.27, 259.3, -413_335.36),
    (0.66, 235.7, 890_534.22),
    (0.21, 269.9, 954_397.74),
    (-0.19, 357.5, 35_999.05),
    (-0.11, 186.5, 966_404.03),
];

const LATITUDE_TERMS: [(f64, f64, f64); 4] = [
    (5.13, 93.3, 483_202.02),
    (0.28, 228.2, 960_400.89),
    (-0.28, 318.3, 6_003.15),
    (-0.17, 217.6, -407_332.21),
];

fn periodic(terms: &[(f64, f64, f64)], t: f64) -> f64 {
    terms
        .iter()
        .map(|&(amp, phase, rate)| amp * (phase + rate * t).to_radians().sin())
        .sum()
}

/// Geocentric ecliptic `(longitude, latitude)` of the Moon in degrees.
pub fn ecliptic_position_deg(jd: f64) -> (f64, f64) {
    let t = centuries_since_j2000(jd);
    let lon = 218.32 + 481_267.881 * t + periodic(&LONGITUDE_TERMS, t);
    let lat = periodic(&LATITUDE_TERMS, t);
    (normalize_degrees(lon), lat)
}

/// Right ascension and declination of the Moon.
pub fn moon_equatorial(jd: f64) -> Equatorial {
    let (lon, lat) = ecliptic_position_deg(jd);
    ecliptic_to_equatorial(lon, lat, mean_obliquity_deg(jd))
}
