//! Frame-to-video assembly.
//!
//! Reads a list of images in order, optionally downsamples them, and
//! writes them as frames of an animated GIF at a fixed frame rate.

use crate::preview;
use anyhow::{Context, Result, bail, ensure};
use image::{
    Delay, Frame, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
    imageops::{self, FilterType},
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Frames per second of assembled videos.
pub const FPS: u32 = 20;

/// Returns every file in `dir` whose name ends with `extension`, sorted by name.
pub fn paths_from_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(extension));
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Size of a frame once divided by `factor`, never below one pixel.
fn scaled_size(width: u32, height: u32, factor: f64) -> (u32, u32) {
    let scale = |v: u32| ((v as f64 / factor).round() as u32).max(1);
    (scale(width), scale(height))
}

/// Builds an animated GIF from `paths` into `output`.
///
/// Every image is shrunk by `factor` (1 keeps the original size). The
/// first frame fixes the video size; later frames of another size are
/// resized to it. With `show`, the frames are played back in a preview
/// window once the file is written.
pub fn assemble(paths: &[PathBuf], output: &Path, factor: f64, show: bool) -> Result<()> {
    ensure!(factor > 0.0, "resize factor must be positive, got {factor}");
    if paths.is_empty() {
        bail!("no frames to assemble");
    }

    // The encoder writes the GIF trailer when dropped, before the file write.
    let mut bytes = Vec::new();
    let mut shown = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder.set_repeat(Repeat::Infinite)?;

        let mut size = None;
        for path in paths {
            info!("Reading {}", path.display());
            let frame = read_frame(path, factor, &mut size)?;
            if show {
                shown.push(frame.clone());
            }
            let delay = Delay::from_numer_denom_ms(1000, FPS);
            encoder
                .encode_frame(Frame::from_parts(frame, 0, 0, delay))
                .with_context(|| format!("encoding {}", path.display()))?;
        }
    }
    fs::write(output, &bytes).with_context(|| format!("writing {}", output.display()))?;
    info!("Done {}", output.display());

    if show {
        preview::run(shown)?;
    }
    Ok(())
}

fn read_frame(path: &Path, factor: f64, size: &mut Option<(u32, u32)>) -> Result<RgbaImage> {
    let image = image::open(path)
        .with_context(|| format!("reading {}", path.display()))?
        .into_rgba8();
    let (w, h) = *size.get_or_insert_with(|| scaled_size(image.width(), image.height(), factor));
    if image.dimensions() == (w, h) {
        return Ok(image);
    }
    debug!(from = ?image.dimensions(), to = ?(w, h), "resizing frame");
    Ok(imageops::resize(&image, w, h, FilterType::Triangle))
}
