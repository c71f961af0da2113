//! Polar re-projection of the sphere around an arbitrary center, and the
//! day/night illumination mask drawn on top of it.
//!
//! The projection places the chosen map center at the origin of a polar plot.
//! Radius is the angular distance from the center in degrees (0 at the
//! center, 180 at its antipode) and the polar angle is the bearing.
//!
//! ```rust
//! use polarmap_projection::{GeoPoint, MapCenter, project};
//!
//! let p = project(GeoPoint::new(60.0, 30.0), MapCenter::NORTH_POLE);
//! assert!((p.radius - 30.0).abs() < 1e-9);
//! ```

mod geo;
pub mod illumination;
pub mod transform;

pub use geo::{
    GeoPoint, ProjectedPoint, angular_separation, normalize_degrees, normalize_longitude,
};
pub use illumination::{IlluminationMask, PolarGrid, TERMINATOR_DEG, is_illuminated};
pub use transform::{
    MapCenter, PolarProjection, project, unproject, unproject_pole_centered,
};
