//! Where the Sun and the Moon stand overhead.
//!
//! A small analytic ephemeris behind the [`CelestialProvider`] trait. The map
//! code only ever asks for sub-solar and sub-lunar ground points, so any other
//! source can be plugged in by implementing the trait.

pub mod equatorial;
pub mod moon;
mod provider;
pub mod sun;
pub mod time;

pub use equatorial::{Equatorial, sub_point};
pub use provider::{CelestialProvider, FixedPositions, LowPrecisionEphemeris};
