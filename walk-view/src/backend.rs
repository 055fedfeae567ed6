//! Selection between the two rendering backends.

use crate::{raster, viewer};
use anyhow::Result;
use std::{fmt, path::PathBuf, str::FromStr};
use walk_core::{WalkError, WalkingSystem};

/// Where a plot goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backend {
    /// Interactive egui window with an orbit camera.
    #[default]
    Interactive,
    /// Rasterized image file.
    Image,
}

/// Settings only the image backend uses.
#[derive(Clone, Debug)]
pub struct ImageOptions {
    pub output: PathBuf,
    pub size: (u32, u32),
}

impl Backend {
    /// Plots the first `limit` iterations of `system`, computing its
    /// vectrices first when needed.
    pub fn plot(
        self,
        mut system: WalkingSystem,
        limit: Option<usize>,
        image: &ImageOptions,
    ) -> Result<()> {
        if system.vectrices().is_none() {
            system.compute_vectrices();
        }
        match self {
            Backend::Interactive => viewer::run(system, limit),
            Backend::Image => raster::save_plot(&system, limit, &image.output, image.size),
        }
    }
}

impl FromStr for Backend {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "interactive" | "egui" => Ok(Backend::Interactive),
            "image" | "png" => Ok(Backend::Image),
            _ => Err(WalkError::UnknownBackend(s.to_string())),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Backend::Interactive => "interactive",
            Backend::Image => "image",
        })
    }
}
