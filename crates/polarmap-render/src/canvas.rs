//! Minimal software rasterizer over an RGBA image: anti-aliased strokes,
//! discs, filled polygons, marker glyphs and 8×8 bitmap text, all
//! alpha-blended.

use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use glam::DVec2;
use image::{Rgba, RgbaImage};

use crate::style::MarkerShape;

/// Dash pattern state carried along a polyline so dashes continue across
/// segment joints.
#[derive(Clone, Copy, Debug)]
pub struct DashPattern {
    pub on: f64,
    pub off: f64,
    phase: f64,
}

impl DashPattern {
    pub fn new(on: f64, off: f64) -> Self {
        Self { on, off, phase: 0.0 }
    }

    fn period(&self) -> f64 {
        self.on + self.off
    }
}

pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, fill: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, fill),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Source-over blend of `color` at `(x, y)`, scaled by `coverage`.
    /// Out-of-bounds coordinates are ignored.
    pub fn blend(&mut self, x: i64, y: i64, color: Rgba<u8>, coverage: f64) {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return;
        }
        let alpha = (f64::from(color[3]) / 255.0) * coverage.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        for c in 0..3 {
            let blended = f64::from(color[c]) * alpha + f64::from(dst[c]) * (1.0 - alpha);
            dst[c] = blended.round().clamp(0.0, 255.0) as u8;
        }
        let out_alpha = alpha + f64::from(dst[3]) / 255.0 * (1.0 - alpha);
        dst[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    /// Anti-aliased stroke of the given width between two points.
    pub fn line(&mut self, a: DVec2, b: DVec2, color: Rgba<u8>, width: f64) {
        if !(a.is_finite() && b.is_finite()) {
            return;
        }
        let half = width.max(0.5) / 2.0;
        let pad = half + 1.0;
        let min = a.min(b) - DVec2::splat(pad);
        let max = a.max(b) + DVec2::splat(pad);
        let (x0, y0, x1, y1) = match self.clip_box(min, max) {
            Some(bounds) => bounds,
            None => return,
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let coverage = half + 0.5 - distance_to_segment(p, a, b);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage.min(1.0));
                }
            }
        }
    }

    /// Dashed stroke; `dash` keeps its phase between calls.
    pub fn dashed_line(
        &mut self,
        a: DVec2,
        b: DVec2,
        color: Rgba<u8>,
        width: f64,
        dash: &mut DashPattern,
    ) {
        let length = a.distance(b);
        if !length.is_finite() || length == 0.0 || dash.period() <= 0.0 {
            return;
        }
        let dir = (b - a) / length;
        let mut t = 0.0;
        while t < length {
            let in_on = dash.phase < dash.on;
            let remaining = if in_on {
                dash.on - dash.phase
            } else {
                dash.period() - dash.phase
            };
            let step = remaining.min(length - t);
            if in_on {
                self.line(a + dir * t, a + dir * (t + step), color, width);
            }
            t += step;
            dash.phase = (dash.phase + step) % dash.period();
        }
    }

    /// Anti-aliased filled disc.
    pub fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba<u8>) {
        if !center.is_finite() {
            return;
        }
        let pad = DVec2::splat(radius + 1.0);
        let (x0, y0, x1, y1) = match self.clip_box(center - pad, center + pad) {
            Some(bounds) => bounds,
            None => return,
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let coverage = radius + 0.5 - p.distance(center);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage.min(1.0));
                }
            }
        }
    }

    /// Circle outline.
    pub fn stroke_circle(&mut self, center: DVec2, radius: f64, color: Rgba<u8>, width: f64) {
        let segments = ((radius * 0.5).ceil() as usize).clamp(32, 2048);
        let point = |i: usize| {
            let t = i as f64 / segments as f64 * std::f64::consts::TAU;
            center + DVec2::new(t.cos(), t.sin()) * radius
        };
        for i in 0..segments {
            self.line(point(i), point(i + 1), color, width);
        }
    }

    /// Even-odd filled polygon, sampled at pixel centers.
    pub fn fill_polygon(&mut self, points: &[DVec2], color: Rgba<u8>) {
        if points.len() < 3 || points.iter().any(|p| !p.is_finite()) {
            return;
        }
        let min = points.iter().fold(DVec2::splat(f64::INFINITY), |m, p| m.min(*p));
        let max = points
            .iter()
            .fold(DVec2::splat(f64::NEG_INFINITY), |m, p| m.max(*p));
        let (x0, y0, x1, y1) = match self.clip_box(min, max) {
            Some(bounds) => bounds,
            None => return,
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                if contains(points, DVec2::new(x as f64 + 0.5, y as f64 + 0.5)) {
                    self.blend(x, y, color, 1.0);
                }
            }
        }
    }

    /// Draw a marker glyph of the given size (half-extent in pixels).
    pub fn marker(&mut self, shape: MarkerShape, center: DVec2, size: f64, color: Rgba<u8>) {
        let stroke = (size / 3.0).max(1.0);
        match shape {
            MarkerShape::Circle => self.fill_circle(center, size, color),
            MarkerShape::Square => {
                let s = size * 0.9;
                self.fill_polygon(
                    &[
                        center + DVec2::new(-s, -s),
                        center + DVec2::new(s, -s),
                        center + DVec2::new(s, s),
                        center + DVec2::new(-s, s),
                    ],
                    color,
                );
            }
            MarkerShape::Triangle => {
                self.fill_polygon(&regular_polygon(center, size * 1.15, 3, 0.0), color)
            }
            MarkerShape::Diamond => {
                self.fill_polygon(&regular_polygon(center, size * 1.1, 4, 0.0), color)
            }
            MarkerShape::Plus => {
                self.line(
                    center - DVec2::new(size, 0.0),
                    center + DVec2::new(size, 0.0),
                    color,
                    stroke,
                );
                self.line(
                    center - DVec2::new(0.0, size),
                    center + DVec2::new(0.0, size),
                    color,
                    stroke,
                );
            }
            MarkerShape::Cross => {
                let d = size * std::f64::consts::FRAC_1_SQRT_2;
                self.line(center - DVec2::splat(d), center + DVec2::splat(d), color, stroke);
                self.line(
                    center + DVec2::new(-d, d),
                    center + DVec2::new(d, -d),
                    color,
                    stroke,
                );
            }
            MarkerShape::Star => self.fill_polygon(&star(center, size * 1.3, size * 0.55), color),
        }
    }

    /// Draw `text` with its top-left corner at `top_left`, each font dot
    /// `size` pixels square.
    pub fn text(&mut self, top_left: DVec2, text: &str, size: u32, color: Rgba<u8>) {
        if !top_left.is_finite() {
            return;
        }
        let size = i64::from(size.max(1));
        let x0 = top_left.x.round() as i64;
        let y0 = top_left.y.round() as i64;
        for (n, c) in text.chars().enumerate() {
            let cell_x = x0 + n as i64 * GLYPH_DOTS * size;
            for (row, bits) in glyph(c).iter().enumerate() {
                for col in 0..GLYPH_DOTS {
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    let px = cell_x + col * size;
                    let py = y0 + row as i64 * size;
                    for y in py..py + size {
                        for x in px..px + size {
                            self.blend(x, y, color, 1.0);
                        }
                    }
                }
            }
        }
    }

    /// Clip a float bounding box to integer pixel bounds, or `None` if it
    /// misses the canvas.
    fn clip_box(&self, min: DVec2, max: DVec2) -> Option<(i64, i64, i64, i64)> {
        let x0 = (min.x.floor() as i64).max(0);
        let y0 = (min.y.floor() as i64).max(0);
        let x1 = (max.x.ceil() as i64).min(i64::from(self.width()) - 1);
        let y1 = (max.y.ceil() as i64).min(i64::from(self.height()) - 1);
        (x0 <= x1 && y0 <= y1).then_some((x0, y0, x1, y1))
    }
}

/// Dots per glyph side in the bitmap font.
const GLYPH_DOTS: i64 = 8;

/// Pixel extent of `text` drawn by [`Canvas::text`] at `size`.
pub fn text_size(text: &str, size: u32) -> DVec2 {
    let dots = (GLYPH_DOTS * i64::from(size.max(1))) as f64;
    DVec2::new(text.chars().count() as f64 * dots, dots)
}

/// Rows of the glyph for `c`, least significant bit leftmost. Characters the
/// font lacks draw as `?`.
fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn contains(points: &[DVec2], p: DVec2) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Vertices of a regular polygon with one vertex pointing up (screen -y).
fn regular_polygon(center: DVec2, radius: f64, sides: usize, rotation: f64) -> Vec<DVec2> {
    (0..sides)
        .map(|i| {
            let t = rotation + i as f64 / sides as f64 * std::f64::consts::TAU;
            center + DVec2::new(t.sin(), -t.cos()) * radius
        })
        .collect()
}

fn star(center: DVec2, outer: f64, inner: f64) -> Vec<DVec2> {
    (0..10)
        .map(|i| {
            let t = i as f64 / 10.0 * std::f64::consts::TAU;
            let r = if i % 2 == 0 { outer } else { inner };
            center + DVec2::new(t.sin(), -t.cos()) * r
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_blend_half_coverage() {
        let mut canvas = Canvas::new(2, 2, BLACK);
        canvas.blend(0, 0, WHITE, 0.5);
        let px = canvas.image().get_pixel(0, 0);
        assert!((127..=128).contains(&px[0]), "got {:?}", px);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_blend_out_of_bounds_ignored() {
        let mut canvas = Canvas::new(2, 2, BLACK);
        canvas.blend(-1, 0, WHITE, 1.0);
        canvas.blend(0, 5, WHITE, 1.0);
        assert!(canvas.image().pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_horizontal_line_covers_row() {
        let mut canvas = Canvas::new(20, 10, BLACK);
        canvas.line(DVec2::new(2.0, 5.5), DVec2::new(18.0, 5.5), WHITE, 1.0);
        for x in 3..17 {
            assert_eq!(canvas.image().get_pixel(x, 5)[0], 255, "x = {x}");
        }
        assert_eq!(*canvas.image().get_pixel(10, 1), BLACK);
    }

    #[test]
    fn test_line_with_nan_is_skipped() {
        let mut canvas = Canvas::new(10, 10, BLACK);
        canvas.line(DVec2::new(f64::NAN, 1.0), DVec2::new(5.0, 5.0), WHITE, 1.0);
        assert!(canvas.image().pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_dashed_line_has_gaps() {
        let mut canvas = Canvas::new(40, 5, BLACK);
        let mut dash = DashPattern::new(4.0, 4.0);
        canvas.dashed_line(DVec2::new(0.0, 2.5), DVec2::new(40.0, 2.5), WHITE, 1.0, &mut dash);
        let lit = (0..40)
            .filter(|&x| canvas.image().get_pixel(x, 2)[0] > 200)
            .count();
        assert!(lit > 10 && lit < 30, "lit pixels {lit}");
    }

    #[test]
    fn test_fill_circle_center_and_outside() {
        let mut canvas = Canvas::new(21, 21, BLACK);
        canvas.fill_circle(DVec2::new(10.5, 10.5), 4.0, WHITE);
        assert_eq!(*canvas.image().get_pixel(10, 10), WHITE);
        assert_eq!(*canvas.image().get_pixel(1, 1), BLACK);
    }

    #[test]
    fn test_every_marker_draws_something() {
        for shape in [
            MarkerShape::Circle,
            MarkerShape::Square,
            MarkerShape::Triangle,
            MarkerShape::Diamond,
            MarkerShape::Plus,
            MarkerShape::Cross,
            MarkerShape::Star,
        ] {
            let mut canvas = Canvas::new(30, 30, BLACK);
            canvas.marker(shape, DVec2::new(15.0, 15.0), 6.0, WHITE);
            let lit = canvas.image().pixels().filter(|p| p[0] > 0).count();
            assert!(lit > 5, "{shape:?} drew {lit} pixels");
        }
    }

    #[test]
    fn test_text_draws_glyph_dots() {
        let mut canvas = Canvas::new(40, 20, BLACK);
        canvas.text(DVec2::new(2.0, 2.0), "H", 2, WHITE);
        // `H` has both vertical strokes lit on its middle row.
        let lit = canvas.image().pixels().filter(|p| **p == WHITE).count();
        assert!(lit > 20, "lit {lit}");
        assert_eq!(*canvas.image().get_pixel(30, 10), BLACK);
    }

    #[test]
    fn test_blank_text_draws_nothing() {
        let mut canvas = Canvas::new(40, 20, BLACK);
        canvas.text(DVec2::new(0.0, 0.0), "   ", 3, WHITE);
        assert!(canvas.image().pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_text_size() {
        assert_eq!(text_size("abc", 2), DVec2::new(48.0, 16.0));
        assert_eq!(text_size("", 1), DVec2::new(0.0, 8.0));
    }

    #[test]
    fn test_unknown_character_falls_back() {
        assert_ne!(glyph('\u{2603}'), [0; 8]);
        assert_eq!(glyph(' '), [0; 8]);
    }

    #[test]
    fn test_point_in_polygon() {
        let square = [
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(4.0, 4.0),
            DVec2::new(0.0, 4.0),
        ];
        assert!(contains(&square, DVec2::new(2.0, 2.0)));
        assert!(!contains(&square, DVec2::new(5.0, 2.0)));
    }
}
