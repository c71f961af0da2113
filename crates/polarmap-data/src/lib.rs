//! Coastline and city layers for the polar map.
//!
//! Both loaders are plain parsers with no coordinate logic. A missing or
//! unreadable file is not fatal to a render: the `load_optional_*` helpers
//! log the failure and hand back `None` so the map is drawn without that
//! layer.

mod cities;
mod coastline;
mod error;

use std::path::Path;

pub use cities::{City, load_cities, parse_cities};
pub use coastline::{Polyline, load_coastlines, parse_coastlines};
pub use error::DataError;

/// Load coastlines, or log a warning and return `None` if that fails.
pub fn load_optional_coastlines(path: &Path) -> Option<Vec<Polyline>> {
    load_coastlines(path)
        .inspect_err(|e| tracing::warn!("coastline layer unavailable: {e}"))
        .ok()
}

/// Load cities, or log a warning and return `None` if that fails.
pub fn load_optional_cities(path: &Path) -> Option<Vec<City>> {
    load_cities(path)
        .inspect_err(|e| tracing::warn!("city layer unavailable: {e}"))
        .ok()
}
