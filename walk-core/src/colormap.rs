//! Two-color linear colormaps.

use crate::interp::{clamp, linear_interp};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// 8-bit RGB color.
pub type Rgb = [u8; 3];

/// Maps a scalar to a color by interpolating each channel between two
/// endpoint colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMap {
    pub start: Rgb,
    pub end: Rgb,
}

pub const BLACK: ColorMap = ColorMap::new([0, 0, 0], [0, 0, 0]);
pub const WHITE_TO_BLACK: ColorMap = ColorMap::new([0, 0, 0], [255, 255, 255]);
pub const BLUE_TO_RED: ColorMap = ColorMap::new([0, 0, 255], [255, 0, 0]);
pub const CYAN_TO_RED: ColorMap = ColorMap::new([0, 255, 255], [255, 0, 0]);
pub const BLACK_TO_RED: ColorMap = ColorMap::new([0, 0, 0], [255, 0, 0]);
pub const RED_TO_BLACK: ColorMap = ColorMap::new([255, 0, 0], [0, 0, 0]);
pub const BLUE_TO_BLACK: ColorMap = ColorMap::new([0, 190, 255], [0, 0, 0]);
pub const ORANGE_TO_BLACK: ColorMap = ColorMap::new([255, 145, 0], [0, 0, 0]);

impl Default for ColorMap {
    fn default() -> Self {
        BLACK
    }
}

impl ColorMap {
    pub const fn new(start: Rgb, end: Rgb) -> Self {
        Self { start, end }
    }

    /// Builds a colormap between two random colors.
    ///
    /// Each endpoint has two random channels and one zero channel, in a
    /// shuffled order, which keeps the colors saturated.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::new(random_color(rng), random_color(rng))
    }

    /// Maps `x` to a color.
    ///
    /// `x == start` gives the start color and `x == end` the end color,
    /// both scaled so that 255 becomes `max_out` (255 for 8-bit output,
    /// 1 for float output). Channels are clamped to `[0, max_out]`, so
    /// out-of-range inputs saturate instead of failing.
    ///
    /// `start` and `end` must differ.
    pub fn map(&self, x: f64, start: f64, end: f64, max_out: f64) -> [f64; 3] {
        std::array::from_fn(|i| {
            let channel = linear_interp(x, start, end, self.start[i] as f64, self.end[i] as f64);
            clamp(channel / 255.0 * max_out, 0.0, max_out)
        })
    }

    /// Same as [`ColorMap::map`] with 8-bit output, rounded to the nearest integer.
    pub fn map_u8(&self, x: f64, start: f64, end: f64) -> Rgb {
        self.map(x, start, end, 255.0).map(|c| c.round() as u8)
    }
}

fn random_color(rng: &mut impl Rng) -> Rgb {
    let mut color = [rng.random::<u8>(), rng.random::<u8>(), 0];
    color.shuffle(rng);
    color
}
