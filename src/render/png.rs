use image::{ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::error::{PunchError, Result};
use crate::util::with_png_extension;

pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    if image.width() == 0 || image.height() == 0 {
        return Err(PunchError::EmptyImage);
    }
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Writes `image` as PNG, adding a `.png` extension when `path` has none.
/// Returns the path actually written.
pub fn save_png(image: &RgbImage, path: &Path) -> Result<PathBuf> {
    let path = with_png_extension(path);
    let bytes = encode_png(image)?;
    std::fs::write(&path, &bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote png");
    Ok(path)
}
