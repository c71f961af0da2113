//! Labelled markers placed on the map.

use image::Rgba;
use polarmap_config::ObjectConfig;
use polarmap_projection::GeoPoint;

use crate::style::{MarkerShape, rgb};

/// Default marker half-extent in pixels at 100 dpi.
pub const DEFAULT_MARKER_SIZE: f64 = 5.0;

/// A point of interest with display attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct MapObject {
    pub point: GeoPoint,
    pub marker: MarkerShape,
    pub color: Rgba<u8>,
    /// Half-extent in pixels at 100 dpi; the renderer scales it.
    pub size: f64,
    /// Legend entry; `None` keeps the object out of the legend.
    pub label: Option<String>,
}

impl MapObject {
    pub fn new(point: GeoPoint, marker: MarkerShape, color: Rgba<u8>) -> Self {
        Self {
            point,
            marker,
            color,
            size: DEFAULT_MARKER_SIZE,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.label = (!label.is_empty()).then_some(label);
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }
}

impl From<&ObjectConfig> for MapObject {
    fn from(config: &ObjectConfig) -> Self {
        let marker = config.marker.parse().unwrap_or_else(|e| {
            tracing::warn!("object `{}`: {e}, drawing a circle", config.label);
            MarkerShape::Circle
        });
        let (r, g, b) = config.color;
        MapObject::new(GeoPoint::new(config.lat, config.lon), marker, rgb(r, g, b))
            .with_label(config.label.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_object_config() {
        let config = ObjectConfig {
            label: "Observatory".to_string(),
            lat: -24.6,
            lon: -70.4,
            marker: "^".to_string(),
            color: (10, 20, 30),
        };
        let object = MapObject::from(&config);
        assert_eq!(object.point, GeoPoint::new(-24.6, -70.4));
        assert_eq!(object.marker, MarkerShape::Triangle);
        assert_eq!(object.color, Rgba([10, 20, 30, 255]));
        assert_eq!(object.label.as_deref(), Some("Observatory"));
    }

    #[test]
    fn test_unknown_marker_falls_back_to_circle() {
        let config = ObjectConfig {
            marker: "hexagon".to_string(),
            ..ObjectConfig::default()
        };
        assert_eq!(MapObject::from(&config).marker, MarkerShape::Circle);
    }

    #[test]
    fn test_empty_label_is_unlabelled() {
        let object = MapObject::new(GeoPoint::NORTH_POLE, MarkerShape::Star, rgb(1, 2, 3))
            .with_label("");
        assert!(object.label.is_none());
    }
}
