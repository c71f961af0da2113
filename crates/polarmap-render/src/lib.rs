//! Software rendering of polar maps.
//!
//! A [`Scene`] gathers what to draw at one instant: Sun and Moon markers
//! from a [`CelestialProvider`](polarmap_ephemeris::CelestialProvider),
//! configured objects, data [`Layers`] and the daylight source.
//! [`MapRenderer`] draws it into an RGBA image with the disk centered on the
//! configured map center. [`Animator`] repeats that over a time range and
//! writes a looping GIF.

mod animation;
mod canvas;
mod error;
mod map;
mod object;
mod output;
mod scene;
mod style;

pub use animation::{Animator, write_gif};
pub use canvas::{Canvas, DashPattern};
pub use error::RenderError;
pub use map::{DISK_FILL, MapRenderer, RenderSettings};
pub use object::{DEFAULT_MARKER_SIZE, MapObject};
pub use output::save_image;
pub use scene::{Layers, Scene};
pub use style::{MarkerShape, Palette, rgb};
