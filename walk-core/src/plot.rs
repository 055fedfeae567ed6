//! Backend-independent plot preparation.
//!
//! [`PlotData`] holds everything a renderer needs: the 3-D polylines to
//! stroke and their RGBA colors (channels in `[0, 1]`). Renderers only
//! project and rasterize.

use crate::{
    error::{Result, WalkError},
    system::WalkingSystem,
    vectorize::points,
};
use glam::DVec3;

/// Opacity of ring polylines.
pub const RING_ALPHA: f64 = 0.4;

/// Neutral color of walker curves.
pub const CURVE_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 0.8];

/// A 3-D polyline with a color.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotLine {
    pub points: Vec<DVec3>,
    pub color: [f64; 4],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlotData {
    pub rings: Vec<PlotLine>,
    pub curves: Vec<PlotLine>,
}

impl PlotData {
    /// Collects the lines for the first `limit` iterations of `system`
    /// (all of them when `limit` is `None`).
    ///
    /// Ring `i` is colored with `cmap.map(i, 0, total_rings / 2, 1)`, so the
    /// colormap reaches its end color halfway through the run and
    /// saturates afterwards.
    ///
    /// ### Errors
    /// - [`WalkError::OutOfRange`] if `limit` exceeds the system's iterations.
    /// - [`WalkError::MissingData`] if vectrices were not computed.
    pub fn prepare(system: &WalkingSystem, limit: Option<usize>) -> Result<Self> {
        let limit = match limit {
            Some(n) if n > system.iterations() => {
                return Err(WalkError::OutOfRange {
                    requested: n,
                    available: system.iterations(),
                });
            }
            Some(n) => n,
            None => system.iterations(),
        };

        let all_rings = system.rings()?;
        let cmap = system.cmap();
        let half = all_rings.len() as f64 / 2.0;

        let rings = all_rings
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, ring)| {
                let [r, g, b] = cmap.map(i as f64, 0.0, half, 1.0);
                PlotLine {
                    points: points(ring).collect(),
                    color: [r, g, b, RING_ALPHA],
                }
            })
            .collect();

        let curves = system
            .curves()?
            .iter()
            .map(|curve| PlotLine {
                points: points(curve).take(limit).collect(),
                color: CURVE_COLOR,
            })
            .collect();

        Ok(Self { rings, curves })
    }

    /// Axis-aligned bounds `(min, max)` of every point, or `None` when empty.
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        self.lines()
            .flat_map(|line| line.points.iter().copied())
            .fold(None, |acc, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })
    }

    /// Rings first, then curves: the order they should be painted in.
    pub fn lines(&self) -> impl Iterator<Item = &PlotLine> {
        self.rings.iter().chain(&self.curves)
    }
}
