//! Frame sequences over a time range, written as a looping GIF.

use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use polarmap_config::Config;
use polarmap_ephemeris::CelestialProvider;

use crate::error::RenderError;
use crate::map::MapRenderer;
use crate::output::create_file;
use crate::scene::{Layers, Scene};

/// NeuQuant speed for GIF palette quantization (1 slowest, 30 fastest).
const GIF_SPEED: i32 = 10;

/// Renders one map per instant and assembles them into an animation.
pub struct Animator<'a, P> {
    config: &'a Config,
    renderer: MapRenderer,
    provider: P,
    layers: &'a Layers,
}

impl<'a, P: CelestialProvider> Animator<'a, P> {
    pub fn new(config: &'a Config, provider: P, layers: &'a Layers) -> Self {
        Self {
            config,
            renderer: MapRenderer::from_config(config),
            provider,
            layers,
        }
    }

    /// `n` instants `start + i·(end - start)/n` for `i in 0..n`; `end` itself
    /// is not included.
    pub fn frame_times(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        n: usize,
    ) -> Result<Vec<DateTime<Utc>>, RenderError> {
        if n == 0 {
            return Err(RenderError::InvalidFrameCount(n));
        }
        let span_ms = i128::from((end - start).num_milliseconds());
        Ok((0..n)
            .map(|i| {
                let offset = span_ms * i as i128 / n as i128;
                start + TimeDelta::milliseconds(offset as i64)
            })
            .collect())
    }

    pub fn render_frame(&self, t: DateTime<Utc>) -> RgbaImage {
        let scene = Scene::build(self.config, t, &self.provider, self.layers);
        self.renderer.render(&scene)
    }

    /// Render `n` frames between `start` and `end` and write them to `path`.
    pub fn run(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        n: usize,
        path: &Path,
    ) -> Result<(), RenderError> {
        let times = Self::frame_times(start, end, n)?;
        ensure_gif_path(path)?;
        let frames = times.iter().enumerate().map(|(index, &t)| {
            tracing::debug!(frame = index + 1, of = n, %t, "Rendering frame");
            self.render_frame(t)
        });
        write_gif(frames, self.config.output.frame_interval_ms, path)?;
        tracing::info!(path = %path.display(), frames = n, "Saved animation");
        Ok(())
    }
}

/// Write frames as an infinitely looping GIF with a fixed delay.
///
/// Frames are pulled from `frames` one at a time while encoding, so only the
/// frame being encoded is held in memory.
pub fn write_gif(
    frames: impl IntoIterator<Item = RgbaImage>,
    interval_ms: u32,
    path: &Path,
) -> Result<(), RenderError> {
    ensure_gif_path(path)?;
    let mut frames = frames.into_iter().peekable();
    if frames.peek().is_none() {
        return Err(RenderError::InvalidFrameCount(0));
    }
    let writer = BufWriter::new(create_file(path)?);
    let mut encoder = GifEncoder::new_with_speed(writer, GIF_SPEED);
    encoder.set_repeat(Repeat::Infinite)?;
    let delay = Delay::from_numer_denom_ms(interval_ms, 1);
    encoder.encode_frames(frames.map(|image| Frame::from_parts(image, 0, 0, delay)))?;
    Ok(())
}

fn ensure_gif_path(path: &Path) -> Result<(), RenderError> {
    let is_gif = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));
    if is_gif {
        Ok(())
    } else {
        Err(RenderError::NotGif(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use image::AnimationDecoder;
    use image::codecs::gif::GifDecoder;
    use polarmap_ephemeris::FixedPositions;
    use polarmap_projection::GeoPoint;

    use super::*;

    type Anim<'a> = Animator<'a, FixedPositions>;

    fn day() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_frame_times_exclude_end() {
        let (start, end) = day();
        let times = Anim::frame_times(start, end, 4).unwrap();
        assert_eq!(times.len(), 4);
        assert_eq!(times[0], start);
        assert_eq!(times[1], start + TimeDelta::hours(6));
        assert_eq!(times[3], start + TimeDelta::hours(18));
    }

    #[test]
    fn test_single_frame_is_start() {
        let (start, end) = day();
        assert_eq!(Anim::frame_times(start, end, 1).unwrap(), vec![start]);
    }

    #[test]
    fn test_zero_frames_rejected() {
        let (start, end) = day();
        let err = Anim::frame_times(start, end, 0).unwrap_err();
        assert!(matches!(err, RenderError::InvalidFrameCount(0)));
    }

    #[test]
    fn test_write_gif_pulls_frames_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lazy.gif");
        let produced = std::cell::Cell::new(0);
        let frames = (0..3u8).map(|i| {
            produced.set(produced.get() + 1);
            RgbaImage::from_pixel(4, 4, image::Rgba([i * 80, 0, 0, 255]))
        });
        write_gif(frames, 50, &path).unwrap();
        assert_eq!(produced.get(), 3);
        assert!(std::fs::read(&path).unwrap().starts_with(b"GIF89a"));
    }

    #[test]
    fn test_write_gif_rejects_empty_without_creating_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.gif");
        let err = write_gif(std::iter::empty::<RgbaImage>(), 50, &path).unwrap_err();
        assert!(matches!(err, RenderError::InvalidFrameCount(0)));
        assert!(!path.exists());
    }

    #[test]
    fn test_non_gif_animation_path_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim.png");
        let config = Config::default();
        let layers = Layers::default();
        let provider = FixedPositions {
            sun: GeoPoint::new(0.0, 0.0),
            moon: GeoPoint::new(0.0, 0.0),
        };
        let (start, end) = day();
        let err = Animator::new(&config, provider, &layers)
            .run(start, end, 2, &path)
            .unwrap_err();
        assert!(matches!(err, RenderError::NotGif(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_run_writes_looping_gif() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim/out.gif");
        let mut config = Config::default();
        config.figure.width_in = 1.0;
        config.figure.height_in = 1.0;
        config.figure.dpi = 40;
        config.layers.coastlines = false;
        let provider = FixedPositions {
            sun: GeoPoint::new(0.0, 0.0),
            moon: GeoPoint::new(10.0, 90.0),
        };
        let layers = Layers::default();
        let (start, end) = day();

        Animator::new(&config, provider, &layers)
            .run(start, end, 3, &path)
            .unwrap();

        let file = std::io::BufReader::new(std::fs::File::open(&path).unwrap());
        let frames = GifDecoder::new(file)
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].buffer().dimensions(), (40, 40));
    }
}
