//! Rendering error types.

use std::path::PathBuf;

/// Errors that can occur while producing or writing map images.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Image encoding failed.
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// Creating or writing the output file failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An animation needs at least one frame.
    #[error("invalid frame count: {0}")]
    InvalidFrameCount(usize),

    /// Animations are only written as GIF.
    #[error("animation output must be a .gif file: {}", .0.display())]
    NotGif(PathBuf),
}
