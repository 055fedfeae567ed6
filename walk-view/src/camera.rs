//! Orthographic orbit camera shared by both rendering backends.

use glam::{DMat3, DVec3, Vec2};
use std::f64::consts::FRAC_PI_2;

/// Looks at `target` from a direction given by `yaw` (around the vertical
/// z axis) and `pitch` (elevation), with an orthographic projection.
///
/// With `yaw = pitch = 0` the camera looks along `+y`: world `x` points
/// right on screen and world `z` points up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: DVec3,
    /// Radians.
    pub yaw: f64,
    /// Radians, kept within `[-PI/2, PI/2]`.
    pub pitch: f64,
    /// Pixels per world unit.
    pub zoom: f32,
    /// Screen-space pan offset in pixels.
    pub pan: Vec2,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: DVec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl OrbitCamera {
    /// Centers on the box `(lo, hi)` and zooms so a sphere around it fills
    /// `margin` of the smaller viewport side.
    pub fn fit(&mut self, (lo, hi): (DVec3, DVec3), viewport: Vec2, margin: f32) {
        self.target = (lo + hi) * 0.5;
        let radius = ((hi - lo).length() * 0.5).max(1e-6) as f32;
        self.zoom = viewport.min_element() * 0.5 * margin / radius;
        self.pan = Vec2::ZERO;
    }

    /// Zooms so that a cube of half size `half_extent` around the target
    /// fills the smaller viewport side.
    pub fn set_extent(&mut self, half_extent: f64, viewport: Vec2) {
        self.zoom = viewport.min_element() * 0.5 / half_extent.max(1e-6) as f32;
    }

    pub fn orbit(&mut self, d_yaw: f64, d_pitch: f64) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Rotation from world space into view space (x right, y depth, z up).
    fn view(&self) -> DMat3 {
        DMat3::from_rotation_x(-self.pitch) * DMat3::from_rotation_z(-self.yaw)
    }

    /// Projects a world-space point to screen space around `center`.
    ///
    /// Screen y grows downward, as in egui and image coordinates.
    pub fn project(&self, p: DVec3, center: Vec2) -> Vec2 {
        Self::to_screen(self.view() * (p - self.target), self.zoom, self.pan, center)
    }

    /// Projects every point of a polyline.
    pub fn project_all(&self, points: &[DVec3], center: Vec2) -> Vec<Vec2> {
        let view = self.view();
        points
            .iter()
            .map(|&p| Self::to_screen(view * (p - self.target), self.zoom, self.pan, center))
            .collect()
    }

    #[inline]
    fn to_screen(v: DVec3, zoom: f32, pan: Vec2, center: Vec2) -> Vec2 {
        Vec2::new(
            center.x + v.x as f32 * zoom + pan.x,
            center.y - v.z as f32 * zoom + pan.y,
        )
    }
}
