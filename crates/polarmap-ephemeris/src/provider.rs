//! The narrow interface the map needs from an ephemeris: where on the ground
//! are the Sun and the Moon overhead at a given instant.

use chrono::{DateTime, Utc};

use polarmap_projection::GeoPoint;

use crate::equatorial::sub_point;
use crate::moon::moon_equatorial;
use crate::sun::sun_equatorial;
use crate::time::{gmst_deg, julian_date};

/// Source of sub-solar and sub-lunar points.
///
/// Latitude is the body's declination. Longitude 0 means the body is over the
/// Greenwich meridian at `t`.
pub trait CelestialProvider {
    fn sub_solar(&self, t: DateTime<Utc>) -> GeoPoint;
    fn sub_lunar(&self, t: DateTime<Utc>) -> GeoPoint;
}

/// Built-in analytic ephemeris: Almanac low-precision Sun and Moon with the
/// right ascension referred to Greenwich through mean sidereal time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowPrecisionEphemeris;

impl CelestialProvider for LowPrecisionEphemeris {
    fn sub_solar(&self, t: DateTime<Utc>) -> GeoPoint {
        let jd = julian_date(t);
        sub_point(sun_equatorial(jd), gmst_deg(jd))
    }

    fn sub_lunar(&self, t: DateTime<Utc>) -> GeoPoint {
        let jd = julian_date(t);
        sub_point(moon_equatorial(jd), gmst_deg(jd))
    }
}

/// Provider that always reports the same points, whatever the time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPositions {
    pub sun: GeoPoint,
    pub moon: GeoPoint,
}

impl CelestialProvider for FixedPositions {
    fn sub_solar(&self, _t: DateTime<Utc>) -> GeoPoint {
        self.sun
    }

    fn sub_lunar(&self, _t: DateTime<Utc>) -> GeoPoint {
        self.moon
    }
}

impl<P: CelestialProvider + ?Sized> CelestialProvider for &P {
    fn sub_solar(&self, t: DateTime<Utc>) -> GeoPoint {
        (**self).sub_solar(t)
    }

    fn sub_lunar(&self, t: DateTime<Utc>) -> GeoPoint {
        (**self).sub_lunar(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use polarmap_projection::angular_separation;

    #[test]
    fn test_subsolar_at_equinox_noon_is_near_origin() {
        let t = Utc.with_ymd_and_hms(2025, 9, 22, 12, 0, 0).unwrap();
        let sun = LowPrecisionEphemeris.sub_solar(t);
        // Equation of time in late September is about +7 min, i.e. ~1.8° west.
        assert!(sun.lat.abs() < 0.5, "lat {}", sun.lat);
        assert!((sun.lon + 1.8).abs() < 0.5, "lon {}", sun.lon);
    }

    #[test]
    fn test_subsolar_longitude_tracks_utc_hour() {
        let noon = Utc.with_ymd_and_hms(2024, 4, 15, 12, 0, 0).unwrap();
        let six = Utc.with_ymd_and_hms(2024, 4, 15, 18, 0, 0).unwrap();
        let a = LowPrecisionEphemeris.sub_solar(noon);
        let b = LowPrecisionEphemeris.sub_solar(six);
        // Six hours later the sun is ~90° further west.
        let shift = polarmap_projection::normalize_degrees(a.lon - b.lon);
        assert!((shift - 90.0).abs() < 0.2, "shift {shift}");
    }

    #[test]
    fn test_subsolar_at_june_solstice() {
        let t = Utc.with_ymd_and_hms(2024, 6, 20, 20, 51, 0).unwrap();
        let sun = LowPrecisionEphemeris.sub_solar(t);
        assert!((sun.lat - 23.44).abs() < 0.05, "lat {}", sun.lat);
        assert!((-180.0..=180.0).contains(&sun.lon));
    }

    #[test]
    fn test_sublunar_opposite_subsolar_at_full_moon() {
        let t = Utc.with_ymd_and_hms(2024, 1, 25, 17, 54, 0).unwrap();
        let sun = LowPrecisionEphemeris.sub_solar(t);
        let moon = LowPrecisionEphemeris.sub_lunar(t);
        let sep = angular_separation(sun, moon);
        assert!(sep > 170.0, "separation {sep}");
    }

    #[test]
    fn test_sublunar_near_subsolar_at_new_moon() {
        let t = Utc.with_ymd_and_hms(2024, 1, 11, 11, 57, 0).unwrap();
        let sun = LowPrecisionEphemeris.sub_solar(t);
        let moon = LowPrecisionEphemeris.sub_lunar(t);
        let sep = angular_separation(sun, moon);
        assert!(sep < 10.0, "separation {sep}");
    }

    #[test]
    fn test_fixed_positions_ignore_time() {
        let fixed = FixedPositions {
            sun: GeoPoint::new(1.0, 2.0),
            moon: GeoPoint::new(-3.0, 4.0),
        };
        let t1 = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(fixed.sub_solar(t1), fixed.sub_solar(t2));
        assert_eq!(fixed.sub_lunar(t1), GeoPoint::new(-3.0, 4.0));
        let by_ref: &dyn CelestialProvider = &fixed;
        assert_eq!(by_ref.sub_solar(t1), GeoPoint::new(1.0, 2.0));
    }
}
