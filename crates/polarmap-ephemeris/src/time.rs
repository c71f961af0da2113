//! Julian dates and Greenwich Mean Sidereal Time.
//!
//! UT1 is taken equal to UTC. The difference stays under a second, which
//! moves a sub-point by less than 0.005° of longitude.

use chrono::{DateTime, Utc};

use polarmap_projection::normalize_degrees;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Date of a UTC instant.
pub fn julian_date(t: DateTime<Utc>) -> f64 {
    let seconds = t.timestamp() as f64 + f64::from(t.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// Days elapsed since J2000.0.
pub fn days_since_j2000(jd: f64) -> f64 {
    jd - J2000_JD
}

/// Julian centuries elapsed since J2000.0.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    days_since_j2000(jd) / DAYS_PER_CENTURY
}

/// Greenwich Mean Sidereal Time in degrees, `[0, 360)`.
///
/// IAU 1982 expression:
/// `280.46061837 + 360.98564736629·d + 0.000387933·T² − T³/38710000`.
pub fn gmst_deg(jd: f64) -> f64 {
    let d = days_since_j2000(jd);
    let t = centuries_since_j2000(jd);
    let gmst = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_degrees(gmst)
}
