//! Writing rendered images to disk.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::RenderError;

/// Save a frame, picking the format from the file extension. JPEG output is
/// flattened to RGB. Missing parent directories are created.
pub fn save_image(image: &RgbaImage, path: &Path) -> Result<(), RenderError> {
    let format = ImageFormat::from_path(path)?;
    let mut writer = BufWriter::new(create_file(path)?);
    match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(image.clone())
            .into_rgb8()
            .write_to(&mut writer, format)?,
        _ => image.write_to(&mut writer, format)?,
    }
    tracing::info!(path = %path.display(), ?format, "Saved map");
    Ok(())
}

/// Create `path` for writing, along with any missing parent directories.
pub(crate) fn create_file(path: &Path) -> Result<File, RenderError> {
    let write_error = |source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    File::create(path).map_err(write_error)
}
