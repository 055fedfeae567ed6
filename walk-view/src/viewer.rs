//! Interactive 3-D walker viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a [`WalkingSystem`] with its
//! computed vectrices and implements [`eframe::App`] to draw the rings and
//! curves through an [`OrbitCamera`].

use crate::camera::OrbitCamera;
use crate::raster::{DEFAULT_PITCH, DEFAULT_YAW};
use anyhow::{Result, anyhow};
use eframe::App;
use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};
use walk_core::{
    WalkingSystem,
    config::{RandomConfig, UpdatePolicy},
    plot::PlotData,
};

const RING_STROKE: f32 = 1.0;
const CURVE_STROKE: f32 = 2.0;

/// Main application state for the interactive viewer.
///
/// ### Fields
/// - `system` - The walking system, with vectrices computed.
/// - `plot` - Lines for the first `limit` iterations, rebuilt when `limit` changes.
/// - `cfg` - Settings used by "Regenerate".
/// - `policy` - Update policy applied to regenerated and replayed systems.
/// - `camera` - Orbit camera; `needs_fit` recenters it on the next frame.
pub struct Viewer {
    system: WalkingSystem,
    plot: PlotData,
    limit: usize,

    cfg: RandomConfig,
    policy: UpdatePolicy,
    rng: StdRng,

    camera: OrbitCamera,
    needs_fit: bool,
    auto_rotate: bool,
}

impl Viewer {
    /// Creates a viewer showing the first `limit` iterations of `system`.
    ///
    /// Vectrices are computed if the system has none yet.
    ///
    /// ### Errors
    /// [`walk_core::WalkError::OutOfRange`] if `limit` exceeds the system's iterations.
    pub fn new(mut system: WalkingSystem, limit: Option<usize>) -> walk_core::Result<Self> {
        if system.vectrices().is_none() {
            system.compute_vectrices();
        }
        let plot = PlotData::prepare(&system, limit)?;
        let limit = limit.unwrap_or(system.iterations());
        let policy = system.policy();

        Ok(Self {
            system,
            plot,
            limit,
            cfg: RandomConfig::default(),
            policy,
            rng: StdRng::from_os_rng(),
            camera: OrbitCamera {
                yaw: DEFAULT_YAW,
                pitch: DEFAULT_PITCH,
                ..OrbitCamera::default()
            },
            needs_fit: true,
            auto_rotate: false,
        })
    }

    /// Replaces the system with a fresh random one drawn from `cfg`.
    fn regenerate(&mut self) {
        self.system = WalkingSystem::random(&self.cfg, &mut self.rng).with_policy(self.policy);
        self.system.compute_vectrices();
        self.limit = self.system.iterations();
        self.refresh_plot();
        self.needs_fit = true;
    }

    /// Moves the walkers back to their start and runs the system again,
    /// with the current update policy.
    fn replay(&mut self) {
        self.system = self.system.clone().with_policy(self.policy);
        self.system.reset();
        self.system.compute_vectrices();
        self.refresh_plot();
    }

    fn set_limit(&mut self, limit: usize) {
        self.limit = limit.min(self.system.iterations());
        self.refresh_plot();
    }

    fn refresh_plot(&mut self) {
        match PlotData::prepare(&self.system, Some(self.limit)) {
            Ok(plot) => self.plot = plot,
            Err(err) => tracing::warn!(%err, "cannot prepare plot"),
        }
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `f64` [`egui::DragValue`].
    fn labeled_drag_f64(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f64,
        range: std::ops::RangeInclusive<f64>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel (regenerate, replay, iteration limit, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Regenerate").clicked() {
                    self.regenerate();
                }
                if ui.button("Replay").clicked() {
                    self.replay();
                }
                if ui.button("Fit").clicked() {
                    self.needs_fit = true;
                }
                ui.checkbox(&mut self.auto_rotate, "Rotate");

                ui.separator();
                let mut limit = self.limit;
                let slider = egui::Slider::new(&mut limit, 0..=self.system.iterations())
                    .text("Iterations");
                if ui.add(slider).changed() {
                    self.set_limit(limit);
                }

                ui.separator();
                ui.add(
                    egui::Slider::new(&mut self.camera.zoom, 0.01..=50.0)
                        .logarithmic(true)
                        .text("Zoom"),
                );
            });
        });
    }

    /// Builds the bottom status bar (walkers, relations, iterations).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("shown = {} / {}", self.limit, self.system.iterations()));
                ui.separator();
                ui.label(format!("relations = {}", self.system.relations().pair_count()));
                ui.label(format!("walkers = {}", self.system.walkers().len()));
                ui.label(format!("policy = {:?}", self.system.policy()));
            });
        });
    }

    /// Builds the right-hand panel for random generation and update policy.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Generation");

                ui.separator();
                Self::labeled_drag_usize(ui, "walkers:", &mut self.cfg.walkers, 1..=64, 1.0);
                Self::labeled_drag_usize(
                    ui,
                    "iterations:",
                    &mut self.cfg.iterations,
                    1..=2000,
                    1.0,
                );
                ui.horizontal(|ui| {
                    ui.label("coord_range:");
                    ui.add(egui::DragValue::new(&mut self.cfg.coord_range).range(1..=10_000));
                });

                ui.separator();
                ui.label("Relations: (u - bias) / scale");
                Self::labeled_drag_f64(ui, "bias:", &mut self.cfg.relation_bias, -1.0..=2.0, 0.01);
                Self::labeled_drag_f64(
                    ui,
                    "scale:",
                    &mut self.cfg.relation_scale,
                    0.5..=200.0,
                    0.1,
                );

                ui.separator();
                ui.label("Update policy");
                let before = self.policy;
                ui.selectable_value(&mut self.policy, UpdatePolicy::Simultaneous, "Simultaneous");
                ui.selectable_value(&mut self.policy, UpdatePolicy::Sequential, "Sequential");
                if self.policy != before {
                    self.replay();
                }

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = RandomConfig::default();
                }
            });
    }

    /// Builds the central panel where rings and curves are drawn.
    ///
    /// Dragging with the primary button orbits, with the secondary button
    /// pans, and scrolling zooms.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, egui::Color32::WHITE);

            if self.needs_fit {
                if let Some(bounds) = self.plot.bounds() {
                    self.camera.fit(bounds, Vec2::new(rect.width(), rect.height()), 0.9);
                }
                self.needs_fit = false;
            }

            if response.dragged_by(egui::PointerButton::Primary) {
                let delta = response.drag_delta();
                self.camera.orbit(-delta.x as f64 * 0.01, delta.y as f64 * 0.01);
            }
            if response.dragged_by(egui::PointerButton::Secondary) {
                let delta = response.drag_delta();
                self.camera.pan += Vec2::new(delta.x, delta.y);
            }

            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 && response.hovered() {
                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.camera.zoom = (self.camera.zoom * factor).clamp(0.01, 50.0);
            }

            let center = Vec2::new(rect.center().x, rect.center().y);
            for (line, width) in self
                .plot
                .rings
                .iter()
                .map(|l| (l, RING_STROKE))
                .chain(self.plot.curves.iter().map(|l| (l, CURVE_STROKE)))
            {
                let points = self
                    .camera
                    .project_all(&line.points, center)
                    .into_iter()
                    .map(|p| egui::pos2(p.x, p.y))
                    .collect();
                let stroke = egui::Stroke::new(width, to_color32(line.color));
                painter.add(egui::Shape::line(points, stroke));
            }

            if self.auto_rotate {
                self.camera.orbit(0.005, 0.0);
                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

/// Converts a `[0, 1]` RGBA color to egui's 8-bit color.
fn to_color32(color: [f64; 4]) -> egui::Color32 {
    let [r, g, b, a] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Opens the viewer window and blocks until it is closed.
pub fn run(system: WalkingSystem, limit: Option<usize>) -> Result<()> {
    let viewer = Viewer::new(system, limit)?;
    let options = eframe::NativeOptions::default();

    eframe::run_native("Walkers", options, Box::new(|_cc| Ok(Box::new(viewer))))
        .map_err(|e| anyhow!("viewer failed: {e}"))
}
