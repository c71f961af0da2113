//! What goes on a single map: data layers, markers and the daylight source.

use chrono::{DateTime, Utc};
use polarmap_config::Config;
use polarmap_data::{City, Polyline, load_optional_cities, load_optional_coastlines};
use polarmap_ephemeris::CelestialProvider;
use polarmap_projection::GeoPoint;

use crate::object::MapObject;
use crate::style::{MarkerShape, Palette};

/// Static data layers, loaded once and shared by every frame.
#[derive(Clone, Debug, Default)]
pub struct Layers {
    pub coastlines: Option<Vec<Polyline>>,
    pub cities: Option<Vec<City>>,
}

impl Layers {
    /// Load the layers enabled in `config`. Unreadable files leave their
    /// layer empty.
    pub fn load(config: &Config) -> Self {
        let coastlines = if config.layers.coastlines {
            load_optional_coastlines(&config.data.coastline_file)
        } else {
            None
        };
        let cities = if config.layers.cities {
            load_optional_cities(&config.data.cities_file)
        } else {
            None
        };
        tracing::debug!(
            coastlines = coastlines.as_ref().map_or(0, Vec::len),
            cities = cities.as_ref().map_or(0, Vec::len),
            "Layers loaded"
        );
        Self { coastlines, cities }
    }
}

/// Everything needed to draw the map for one instant.
#[derive(Clone, Debug)]
pub struct Scene<'a> {
    pub time: DateTime<Utc>,
    pub objects: Vec<MapObject>,
    /// Sub-solar point to shade from, if daylight is on.
    pub daylight: Option<GeoPoint>,
    pub layers: &'a Layers,
}

impl<'a> Scene<'a> {
    /// Assemble the scene at `t`: Sun and Moon markers from `provider`
    /// (when enabled), then the configured objects.
    pub fn build<P: CelestialProvider>(
        config: &Config,
        t: DateTime<Utc>,
        provider: &P,
        layers: &'a Layers,
    ) -> Self {
        let palette = Palette::default();
        let sun = provider.sub_solar(t);
        let moon = provider.sub_lunar(t);
        tracing::debug!(%t, ?sun, ?moon, "Scene positions");

        let mut objects = Vec::with_capacity(config.objects.len() + 2);
        if config.layers.sun {
            objects.push(
                MapObject::new(sun, MarkerShape::Circle, palette.sun)
                    .with_size(8.0)
                    .with_label("Sun"),
            );
        }
        if config.layers.moon {
            objects.push(
                MapObject::new(moon, MarkerShape::Circle, palette.moon)
                    .with_size(6.0)
                    .with_label("Moon"),
            );
        }
        objects.extend(config.objects.iter().map(MapObject::from));

        Self {
            time: t,
            objects,
            daylight: config.layers.daylight.then_some(sun),
            layers,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use polarmap_config::ObjectConfig;
    use polarmap_ephemeris::FixedPositions;

    use super::*;

    fn provider() -> FixedPositions {
        FixedPositions {
            sun: GeoPoint::new(10.0, 20.0),
            moon: GeoPoint::new(-5.0, 100.0),
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_scene_has_sun_and_moon() {
        let layers = Layers::default();
        let scene = Scene::build(&Config::default(), noon(), &provider(), &layers);
        assert_eq!(scene.objects.len(), 2);
        assert_eq!(scene.objects[0].point, GeoPoint::new(10.0, 20.0));
        assert_eq!(scene.objects[0].label.as_deref(), Some("Sun"));
        assert_eq!(scene.objects[1].point, GeoPoint::new(-5.0, 100.0));
        assert!(scene.daylight.is_none());
    }

    #[test]
    fn test_daylight_uses_sub_solar_point() {
        let mut config = Config::default();
        config.layers.daylight = true;
        config.layers.moon = false;
        let layers = Layers::default();
        let scene = Scene::build(&config, noon(), &provider(), &layers);
        assert_eq!(scene.daylight, Some(GeoPoint::new(10.0, 20.0)));
        assert_eq!(scene.objects.len(), 1);
    }

    #[test]
    fn test_configured_objects_follow_bodies() {
        let mut config = Config::default();
        config.layers.sun = false;
        config.objects.push(ObjectConfig {
            label: "Base".to_string(),
            lat: 1.0,
            lon: 2.0,
            ..ObjectConfig::default()
        });
        let layers = Layers::default();
        let scene = Scene::build(&config, noon(), &provider(), &layers);
        let labels: Vec<_> = scene.objects.iter().filter_map(|o| o.label.as_deref()).collect();
        assert_eq!(labels, ["Moon", "Base"]);
    }

    #[test]
    fn test_missing_layer_files_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.layers.cities = true;
        config.data.coastline_file = dir.path().join("nope.txt");
        config.data.cities_file = dir.path().join("nope.csv");
        let layers = Layers::load(&config);
        assert!(layers.coastlines.is_none());
        assert!(layers.cities.is_none());
    }

    #[test]
    fn test_disabled_layers_are_not_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coast.txt");
        std::fs::write(&path, "0,0\n10,10\n").unwrap();
        let mut config = Config::default();
        config.data.coastline_file = path;
        config.layers.coastlines = false;
        assert!(Layers::load(&config).coastlines.is_none());
        config.layers.coastlines = true;
        assert_eq!(Layers::load(&config).coastlines.map(|c| c.len()), Some(1));
    }
}
