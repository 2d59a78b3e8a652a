use crate::render::BYTES_PER_PIXEL;
use anyhow::Context;
use image::{ImageFormat, RgbImage};
use log::debug;
use std::path::Path;

/// Drops alpha and swaps BGRA into RGB.
pub fn bgra_to_rgb(buffer: &[u8]) -> Vec<u8> {
    buffer
        .chunks_exact(BYTES_PER_PIXEL)
        .flat_map(|pixel| [pixel[2], pixel[1], pixel[0]])
        .collect()
}

pub fn save_bgra_png(path: &Path, buffer: &[u8], width: u32, height: u32) -> anyhow::Result<()> {
    let image = RgbImage::from_raw(width, height, bgra_to_rgb(buffer))
        .context("pixel buffer does not match the image size")?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!("Wrote {}x{} image to {}", width, height, path.display());

    Ok(())
}
