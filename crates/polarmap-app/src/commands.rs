//! Subcommand implementations.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use polarmap_config::{CONFIG_FILE_NAME, Config, ConfigError};
use polarmap_ephemeris::CelestialProvider;
use polarmap_projection::GeoPoint;
use polarmap_render::{Animator, Layers, MapRenderer, RenderError, Scene, save_image};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode positions: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render a single map at `t` to `config.output.file`.
pub fn render<P: CelestialProvider>(
    config: &Config,
    provider: &P,
    t: DateTime<Utc>,
) -> Result<(), AppError> {
    let layers = Layers::load(config);
    let scene = Scene::build(config, t, provider, &layers);
    let image = MapRenderer::from_config(config).render(&scene);
    save_image(&image, &config.output.file)?;
    Ok(())
}

/// Render `frames` maps from `start` towards `end` into
/// `config.output.animation_file`.
pub fn animate<P: CelestialProvider>(
    config: &Config,
    provider: P,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    frames: usize,
) -> Result<(), AppError> {
    let layers = Layers::load(config);
    Animator::new(config, provider, &layers).run(
        start,
        end,
        frames,
        &config.output.animation_file,
    )?;
    Ok(())
}

/// Sub-solar and sub-lunar points at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Positions {
    pub time: String,
    pub sub_solar: GeoPoint,
    pub sub_lunar: GeoPoint,
}

impl Positions {
    pub fn at<P: CelestialProvider>(provider: &P, t: DateTime<Utc>) -> Self {
        Self {
            time: t.to_rfc3339(),
            sub_solar: provider.sub_solar(t),
            sub_lunar: provider.sub_lunar(t),
        }
    }

    pub fn write_text(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "time:      {}", self.time)?;
        writeln!(out, "sub-solar: {}", format_point(self.sub_solar))?;
        writeln!(out, "sub-lunar: {}", format_point(self.sub_lunar))
    }

    pub fn write_json(&self, out: &mut impl Write) -> Result<(), AppError> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

fn format_point(p: GeoPoint) -> String {
    let ns = if p.lat < 0.0 { 'S' } else { 'N' };
    let ew = if p.lon < 0.0 { 'W' } else { 'E' };
    format!("{:7.3}°{ns} {:8.3}°{ew}", p.lat.abs(), p.lon.abs())
}

/// Write `config` to `config_dir`.
pub fn init_config(config: &Config, config_dir: &Path) -> Result<(), AppError> {
    config.save(config_dir)?;
    tracing::info!(
        path = %config_dir.join(CONFIG_FILE_NAME).display(),
        "Wrote configuration"
    );
    Ok(())
}
