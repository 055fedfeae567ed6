//! Playback window for assembled frames.

use crate::assemble::FPS;
use anyhow::{Result, anyhow};
use image::RgbaImage;

/// Loops over `frames` at [`FPS`] until the window is closed or `Q` /
/// `Escape` is pressed.
struct Preview {
    frames: Vec<RgbaImage>,
    shown: Option<usize>,
    texture: Option<egui::TextureHandle>,
}

impl Preview {
    fn frame_at(&self, time: f64) -> usize {
        (time * FPS as f64) as usize % self.frames.len()
    }
}

impl eframe::App for Preview {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Q) || i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        let index = self.frame_at(ctx.input(|i| i.time));
        if self.shown != Some(index) {
            let frame = &self.frames[index];
            let size = [frame.width() as usize, frame.height() as usize];
            let image = egui::ColorImage::from_rgba_unmultiplied(size, frame.as_raw());
            self.texture = Some(ctx.load_texture("frame", image, egui::TextureOptions::LINEAR));
            self.shown = Some(index);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(texture) = &self.texture {
                ui.add(egui::Image::from_texture(texture).shrink_to_fit());
            }
        });
        ctx.request_repaint_after(std::time::Duration::from_secs_f64(1.0 / FPS as f64));
    }
}

pub fn run(frames: Vec<RgbaImage>) -> Result<()> {
    if frames.is_empty() {
        return Ok(());
    }
    let preview = Preview {
        frames,
        shown: None,
        texture: None,
    };
    eframe::run_native(
        "video",
        eframe::NativeOptions::default(),
        Box::new(|_cc| Ok(Box::new(preview))),
    )
    .map_err(|e| anyhow!("preview failed: {e}"))
}
