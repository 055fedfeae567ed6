//! Image rendering backend.
//!
//! Projects [`PlotData`] with an [`OrbitCamera`] and strokes every line
//! into an RGBA image with alpha blending, on a white background.

use crate::camera::OrbitCamera;
use anyhow::{Context, Result, bail};
use glam::Vec2;
use image::{Rgba, RgbaImage};
use std::f64::consts::{FRAC_PI_3, FRAC_PI_6};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walk_core::{WalkingSystem, interp::linear_interp, plot::PlotData};

pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Default view direction, slightly above and to the side of the cloud.
pub const DEFAULT_YAW: f64 = -FRAC_PI_3;
pub const DEFAULT_PITCH: f64 = FRAC_PI_6;

const RING_WIDTH: u32 = 1;
const CURVE_WIDTH: u32 = 2;
const MARGIN: f32 = 0.9;

/// Camera looking at the whole plot from the default direction.
pub fn fitted_camera(plot: &PlotData, size: (u32, u32)) -> OrbitCamera {
    let mut camera = OrbitCamera {
        yaw: DEFAULT_YAW,
        pitch: DEFAULT_PITCH,
        ..OrbitCamera::default()
    };
    if let Some(bounds) = plot.bounds() {
        camera.fit(bounds, Vec2::new(size.0 as f32, size.1 as f32), MARGIN);
    }
    camera
}

/// Rasterizes `plot` seen through `camera` into a `size` image.
pub fn render(plot: &PlotData, camera: &OrbitCamera, size: (u32, u32)) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(size.0, size.1, BACKGROUND);
    let center = Vec2::new(size.0 as f32, size.1 as f32) * 0.5;

    for ring in &plot.rings {
        let pts = camera.project_all(&ring.points, center);
        stroke_polyline(&mut image, &pts, ring.color, RING_WIDTH);
    }
    for curve in &plot.curves {
        let pts = camera.project_all(&curve.points, center);
        stroke_polyline(&mut image, &pts, curve.color, CURVE_WIDTH);
    }
    image
}

/// Renders the first `limit` iterations of `system` to an image file.
///
/// The format follows the extension of `path`.
pub fn save_plot(
    system: &WalkingSystem,
    limit: Option<usize>,
    path: &Path,
    size: (u32, u32),
) -> Result<()> {
    let plot = PlotData::prepare(system, limit)?;
    let camera = fitted_camera(&plot, size);
    render(&plot, &camera, size)
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), rings = plot.rings.len(), "plot written");
    Ok(())
}

/// Writes one frame per iteration into `dir` (`0000.png`, `0001.png`, ...).
///
/// Frame `t` shows the first `t + 1` iterations. Over the run the camera
/// turns by 40 degrees, rises by 5 degrees, and the view extent grows by
/// half so the cloud stays in frame. `dir` must not exist yet.
pub fn render_frames(
    system: &WalkingSystem,
    dir: &Path,
    size: (u32, u32),
) -> Result<Vec<PathBuf>> {
    if dir.exists() {
        bail!("{} already exists", dir.display());
    }
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let n = system.iterations();
    let full = PlotData::prepare(system, None)?;
    let Some((lo, hi)) = full.bounds() else {
        return Ok(Vec::new());
    };
    let mut camera = fitted_camera(&full, size);
    let radius = (hi - lo).length() * 0.5;
    let viewport = Vec2::new(size.0 as f32, size.1 as f32);

    let mut paths = Vec::with_capacity(n);
    for t in 0..n {
        let progress = t as f64;
        let end = n as f64;
        camera.yaw = DEFAULT_YAW + linear_interp(progress, 0.0, end, 0.0, 40.0).to_radians();
        camera.pitch = DEFAULT_PITCH + linear_interp(progress, 0.0, end, 0.0, 5.0).to_radians();
        camera.set_extent(radius * linear_interp(progress, 0.0, end, 1.0, 1.5), viewport);

        let plot = PlotData::prepare(system, Some(t + 1))?;
        let path = dir.join(format!("{t:04}.png"));
        debug!(path = %path.display(), "saving frame");
        render(&plot, &camera, size)
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        paths.push(path);
    }
    info!(dir = %dir.display(), frames = paths.len(), "frames written");
    Ok(paths)
}

fn stroke_polyline(image: &mut RgbaImage, points: &[Vec2], color: [f64; 4], width: u32) {
    for seg in points.windows(2) {
        stroke_segment(image, seg[0], seg[1], color, width);
    }
    if let Some(&last) = points.last() {
        stamp(image, last, color, width);
    }
}

/// Draws `a..b`, excluding `b` so joined segments do not blend twice.
fn stroke_segment(image: &mut RgbaImage, a: Vec2, b: Vec2, color: [f64; 4], width: u32) {
    let d = b - a;
    let steps = d.abs().max_element().ceil().max(1.0) as u32;
    for i in 0..steps {
        stamp(image, a + d * (i as f32 / steps as f32), color, width);
    }
}

fn stamp(image: &mut RgbaImage, p: Vec2, color: [f64; 4], width: u32) {
    let x0 = p.x.round() as i64;
    let y0 = p.y.round() as i64;
    for dy in 0..width as i64 {
        for dx in 0..width as i64 {
            blend(image, x0 + dx, y0 + dy, color);
        }
    }
}

fn blend(image: &mut RgbaImage, x: i64, y: i64, color: [f64; 4]) {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return;
    }
    let alpha = color[3];
    let px = image.get_pixel_mut(x as u32, y as u32);
    for c in 0..3 {
        let dst = px.0[c] as f64;
        px.0[c] = (color[c] * 255.0 * alpha + dst * (1.0 - alpha)).round() as u8;
    }
    px.0[3] = 255;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use walk_core::config::RandomConfig;

    fn system(iterations: usize) -> WalkingSystem {
        let cfg = RandomConfig {
            walkers: 4,
            iterations,
            ..RandomConfig::default()
        };
        let mut system = WalkingSystem::random(&cfg, &mut StdRng::seed_from_u64(9));
        system.compute_vectrices();
        system
    }

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("walkers_raster_{}_{}", name, std::process::id()))
    }

    #[test]
    fn blend_mixes_with_background() {
        let mut image = RgbaImage::from_pixel(2, 2, BACKGROUND);
        blend(&mut image, 0, 0, [0.0, 0.0, 0.0, 0.8]);
        assert_eq!(image.get_pixel(0, 0), &Rgba([51, 51, 51, 255]));

        // Outside the image is ignored.
        blend(&mut image, -1, 5, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(image.get_pixel(1, 1), &BACKGROUND);
    }

    #[test]
    fn segment_covers_both_axes() {
        let mut image = RgbaImage::from_pixel(10, 10, BACKGROUND);
        stroke_polyline(
            &mut image,
            &[Vec2::new(1.0, 1.0), Vec2::new(8.0, 1.0), Vec2::new(8.0, 8.0)],
            [1.0, 0.0, 0.0, 1.0],
            1,
        );
        let red = Rgba([255, 0, 0, 255]);
        for x in 1..=8 {
            assert_eq!(image.get_pixel(x, 1), &red);
        }
        for y in 1..=8 {
            assert_eq!(image.get_pixel(8, y), &red);
        }
        assert_eq!(image.get_pixel(1, 8), &BACKGROUND);
    }

    #[test]
    fn render_paints_lines_inside_the_frame() {
        let system = system(20);
        let plot = PlotData::prepare(&system, None).unwrap();
        let camera = fitted_camera(&plot, (320, 240));
        let image = render(&plot, &camera, (320, 240));

        let painted = image.pixels().filter(|&&p| p != BACKGROUND).count();
        assert!(painted > 100, "only {painted} pixels painted");
    }

    #[test]
    fn save_plot_rejects_limit_past_iterations() {
        let system = system(5);
        let path = temp_dir("limit").with_extension("png");
        let err = save_plot(&system, Some(6), &path, (64, 64)).unwrap_err();
        assert!(err.to_string().contains("5 iterations"));
        assert!(!path.exists());
    }

    #[test]
    fn render_frames_writes_one_file_per_iteration() {
        let system = system(6);
        let dir = temp_dir("frames");
        let _ = std::fs::remove_dir_all(&dir);

        let paths = render_frames(&system, &dir, (64, 48)).unwrap();
        assert_eq!(paths.len(), 6);
        assert_eq!(paths[0].file_name().unwrap(), "0000.png");
        assert!(paths.iter().all(|p| p.is_file()));

        // A second run refuses to overwrite.
        assert!(render_frames(&system, &dir, (64, 48)).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
