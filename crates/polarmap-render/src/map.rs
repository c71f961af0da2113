//! Draws one polar map frame onto a raster canvas.

use std::f64::consts::TAU;

use glam::DVec2;
use image::{Rgba, RgbaImage};
use polarmap_config::Config;
use polarmap_projection::{
    GeoPoint, IlluminationMask, MapCenter, PolarGrid, PolarProjection, ProjectedPoint,
};

use crate::canvas::{Canvas, DashPattern, text_size};
use crate::object::MapObject;
use crate::scene::Scene;
use crate::style::Palette;

/// Fraction of the half-canvas the disk rim reaches.
pub const DISK_FILL: f64 = 0.92;

/// Graticule sampling step in degrees.
const GRATICULE_STEP_DEG: f64 = 1.0;

/// Pixel jumps longer than this fraction of the disk radius break a polyline.
const MAX_JUMP: f64 = 0.5;

/// Finest graticule spacing in degrees; smaller configured steps are raised
/// to this.
pub const MIN_GRID_STEP_DEG: f64 = 0.1;

/// Everything about the picture that does not change between frames.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
    pub title: String,
    pub lon_step: f64,
    pub lat_step: f64,
    pub special_latitudes: Vec<f64>,
    pub illumination_grid: PolarGrid,
    pub palette: Palette,
}

impl RenderSettings {
    pub fn from_config(config: &Config) -> Self {
        let (width, height) = config.figure.pixel_size();
        Self {
            width,
            height,
            dpi: config.figure.dpi,
            title: config.map.title.clone(),
            lon_step: config.grid.lon_step,
            lat_step: config.grid.lat_step,
            special_latitudes: config.grid.special_latitudes.clone(),
            illumination_grid: PolarGrid::new(
                config.illumination.theta_samples,
                config.illumination.radius_samples,
            ),
            palette: Palette::default(),
        }
    }

    /// Multiplier from nominal 100 dpi pixel sizes to output pixels.
    fn scale(&self) -> f64 {
        (f64::from(self.dpi) / 100.0).max(0.1)
    }
}

/// Renders scenes for a fixed center and canvas geometry.
pub struct MapRenderer {
    settings: RenderSettings,
    projection: PolarProjection,
    origin: DVec2,
    disk_radius: f64,
}

impl MapRenderer {
    pub fn new(settings: RenderSettings, center: MapCenter) -> Self {
        let origin = DVec2::new(f64::from(settings.width), f64::from(settings.height)) / 2.0;
        let disk_radius = origin.min_element() * DISK_FILL;
        Self {
            settings,
            projection: PolarProjection::new(center),
            origin,
            disk_radius,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            RenderSettings::from_config(config),
            MapCenter::new(config.map.center_lat, config.map.center_lon),
        )
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn center(&self) -> MapCenter {
        self.projection.center()
    }

    /// Pixel position of a geographic point.
    pub fn to_pixel(&self, point: GeoPoint) -> DVec2 {
        self.origin + self.projection.project(point).to_disk() * self.disk_radius
    }

    /// Projected coordinates under a pixel center, or `None` outside the disk.
    pub fn pixel_to_projected(&self, x: u32, y: u32) -> Option<ProjectedPoint> {
        let offset = DVec2::new(f64::from(x) + 0.5, f64::from(y) + 0.5) - self.origin;
        let rho = offset.length() / self.disk_radius;
        if rho > 1.0 {
            return None;
        }
        Some(ProjectedPoint::new(
            rho * 180.0,
            offset.x.atan2(offset.y).rem_euclid(TAU),
        ))
    }

    /// Render one frame.
    pub fn render(&self, scene: &Scene<'_>) -> RgbaImage {
        let s = &self.settings;
        let scale = s.scale();
        tracing::info!(title = %s.title, time = %scene.time, "Rendering map");

        let mut canvas = Canvas::new(s.width, s.height, s.palette.background);
        canvas.fill_circle(self.origin, self.disk_radius, s.palette.disk);

        if let Some(sun) = scene.daylight {
            self.draw_daylight(&mut canvas, sun);
        }
        canvas.stroke_circle(self.origin, self.disk_radius, s.palette.rim, 1.2 * scale);

        self.draw_graticule(&mut canvas, scale);

        if let Some(coastlines) = &scene.layers.coastlines {
            for polyline in coastlines {
                self.draw_polyline(&mut canvas, polyline, s.palette.coastline, 0.6 * scale, None);
            }
        }
        if let Some(cities) = &scene.layers.cities {
            for city in cities {
                canvas.fill_circle(self.to_pixel(city.point), 1.2 * scale, s.palette.city);
            }
        }
        for object in &scene.objects {
            canvas.marker(
                object.marker,
                self.to_pixel(object.point),
                object.size * scale,
                object.color,
            );
        }
        self.draw_legend(&mut canvas, &scene.objects, scale);
        self.draw_title(&mut canvas, scale);

        canvas.into_image()
    }

    fn draw_daylight(&self, canvas: &mut Canvas, sun: GeoPoint) {
        let mask =
            IlluminationMask::compute_centered(sun, self.settings.illumination_grid, self.center());
        tracing::debug!(lit = mask.lit_count(), cells = mask.grid().cell_count(), "Daylight mask");
        let color = self.settings.palette.daylight;
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                let lit = self
                    .pixel_to_projected(x, y)
                    .and_then(|p| mask.sample(p))
                    .unwrap_or(false);
                if lit {
                    canvas.blend(i64::from(x), i64::from(y), color, 1.0);
                }
            }
        }
    }

    fn draw_graticule(&self, canvas: &mut Canvas, scale: f64) {
        let s = &self.settings;
        let width = 0.5 * scale;

        for lon in steps(0.0, 360.0, s.lon_step) {
            let meridian: Vec<_> = samples(-90.0, 90.0)
                .map(|lat| GeoPoint::new(lat, lon))
                .collect();
            self.draw_polyline(canvas, &meridian, s.palette.graticule, width, None);
        }
        for lat in steps(-90.0, 90.0, s.lat_step).filter(|lat| lat.abs() < 90.0) {
            self.draw_polyline(canvas, &parallel(lat), s.palette.graticule, width, None);
        }
        for &lat in &s.special_latitudes {
            let mut dash = DashPattern::new(6.0 * scale, 4.0 * scale);
            self.draw_polyline(
                canvas,
                &parallel(lat),
                s.palette.special_latitude,
                0.9 * scale,
                Some(&mut dash),
            );
        }
    }

    fn draw_polyline(
        &self,
        canvas: &mut Canvas,
        points: &[GeoPoint],
        color: Rgba<u8>,
        width: f64,
        mut dash: Option<&mut DashPattern>,
    ) {
        for run in self.pixel_runs(points) {
            for pair in run.windows(2) {
                match dash.as_deref_mut() {
                    Some(dash) => canvas.dashed_line(pair[0], pair[1], color, width, dash),
                    None => canvas.line(pair[0], pair[1], color, width),
                }
            }
        }
    }

    /// Project a polyline to pixels, splitting it wherever a point is not
    /// finite or consecutive points jump across the far side of the disk.
    pub fn pixel_runs(&self, points: &[GeoPoint]) -> Vec<Vec<DVec2>> {
        let max_jump = MAX_JUMP * self.disk_radius;
        let mut runs = Vec::new();
        let mut current: Vec<DVec2> = Vec::new();
        for &point in points {
            let px = self.to_pixel(point);
            let joins = current
                .last()
                .is_some_and(|last| px.is_finite() && last.distance(px) <= max_jump);
            if !joins && current.len() > 1 {
                runs.push(std::mem::take(&mut current));
            } else if !joins {
                current.clear();
            }
            if px.is_finite() {
                current.push(px);
            }
        }
        if current.len() > 1 {
            runs.push(current);
        }
        runs
    }

    /// Title centered in the band above the disk.
    fn draw_title(&self, canvas: &mut Canvas, scale: f64) {
        let title = self.settings.title.trim();
        if title.is_empty() {
            return;
        }
        let size = title_dot_size(scale);
        let extent = text_size(title, size);
        let band = self.origin.y - self.disk_radius;
        let top_left = DVec2::new(
            (f64::from(canvas.width()) - extent.x) / 2.0,
            ((band - extent.y) / 2.0).max(0.0),
        );
        canvas.text(top_left, title, size, self.settings.palette.text);
    }

    fn draw_legend(&self, canvas: &mut Canvas, objects: &[MapObject], scale: f64) {
        let entries: Vec<_> = objects
            .iter()
            .filter_map(|o| o.label.as_deref().map(|label| (label, o)))
            .collect();
        if entries.is_empty() {
            return;
        }

        let pad = 8.0 * scale;
        let row = 14.0 * scale;
        let swatch = 12.0 * scale;
        let dots = label_dot_size(scale);
        let label_width = entries
            .iter()
            .map(|(label, _)| text_size(label, dots).x)
            .fold(0.0, f64::max);
        let box_size = DVec2::new(
            pad + swatch + pad / 2.0 + label_width + pad,
            row * entries.len() as f64 + pad,
        );
        let top_left = DVec2::new(f64::from(canvas.width()) - pad - box_size.x, pad);
        let corners = [
            top_left,
            top_left + DVec2::new(box_size.x, 0.0),
            top_left + box_size,
            top_left + DVec2::new(0.0, box_size.y),
        ];
        for i in 0..corners.len() {
            canvas.line(
                corners[i],
                corners[(i + 1) % corners.len()],
                self.settings.palette.legend_frame,
                scale,
            );
        }

        for (index, (label, object)) in entries.iter().enumerate() {
            tracing::debug!(label, marker = ?object.marker, "Legend entry");
            let row_center = top_left.y + pad / 2.0 + row * (index as f64 + 0.5);
            let at = DVec2::new(top_left.x + pad + swatch / 2.0, row_center);
            canvas.marker(object.marker, at, 4.0 * scale, object.color);
            let text_at = DVec2::new(
                top_left.x + pad + swatch + pad / 2.0,
                row_center - text_size(label, dots).y / 2.0,
            );
            canvas.text(text_at, label, dots, self.settings.palette.text);
        }
    }
}

fn title_dot_size(scale: f64) -> u32 {
    (2.0 * scale).round().max(1.0) as u32
}

fn label_dot_size(scale: f64) -> u32 {
    scale.round().max(1.0) as u32
}

/// `start, start + step, ...` below `end`; empty for non-positive steps.
/// Steps finer than [`MIN_GRID_STEP_DEG`] are raised to it.
fn steps(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let step = if step > 0.0 { step.max(MIN_GRID_STEP_DEG) } else { step };
    let count = if step > 0.0 && step.is_finite() {
        ((end - start) / step).ceil().max(0.0) as usize
    } else {
        0
    };
    (0..count).map(move |k| start + step * k as f64)
}

/// Inclusive samples from `start` to `end` at the graticule step.
fn samples(start: f64, end: f64) -> impl Iterator<Item = f64> {
    let count = ((end - start) / GRATICULE_STEP_DEG).round() as usize;
    (0..=count).map(move |k| start + GRATICULE_STEP_DEG * k as f64)
}

fn parallel(lat: f64) -> Vec<GeoPoint> {
    samples(-180.0, 180.0).map(|lon| GeoPoint::new(lat, lon)).collect()
}
