//! Turns a sequence of states into drawable curves and rings.

use crate::types::{AxisSeries, Curve, Ring, State};
use glam::DVec3;

/// Per-walker curves and per-iteration rings of one simulation run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectories {
    /// `curves[w][axis][t]`: coordinate of walker `w` at iteration `t`.
    pub curves: Vec<Curve>,
    /// `rings[t][axis][w]`: coordinate of walker `w` at iteration `t`,
    /// with walker 0 repeated at the end of each axis.
    pub rings: Vec<Ring>,
}

impl Trajectories {
    /// Number of recorded iterations.
    pub fn iterations(&self) -> usize {
        self.rings.len()
    }
}

/// Builds curves and rings from `states`, consuming it once.
///
/// Every state must hold `walker_count` positions. A system without
/// walkers produces empty rings, since there is no first walker to close
/// them with.
pub fn vectorize(states: impl IntoIterator<Item = State>, walker_count: usize) -> Trajectories {
    let mut curves: Vec<Curve> = vec![Curve::default(); walker_count];
    let mut rings: Vec<Ring> = Vec::new();

    for state in states {
        debug_assert_eq!(state.len(), walker_count);

        let mut ring: Ring = std::array::from_fn(|_| Vec::with_capacity(walker_count + 1));
        for (curve, pos) in curves.iter_mut().zip(&state) {
            for (axis, coord) in pos.to_array().into_iter().enumerate() {
                curve[axis].push(coord);
                ring[axis].push(coord);
            }
        }

        // Close the polygon.
        for axis in &mut ring {
            if let Some(&first) = axis.first() {
                axis.push(first);
            }
        }
        rings.push(ring);
    }

    Trajectories { curves, rings }
}

/// Zips the three axis sequences back into points.
pub fn points(series: &AxisSeries) -> impl Iterator<Item = DVec3> + '_ {
    let [x, y, z] = series;
    x.iter()
        .zip(y)
        .zip(z)
        .map(|((&x, &y), &z)| DVec3::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> Vec<State> {
        vec![
            vec![
                DVec3::new(0.0, 1.0, 2.0),
                DVec3::new(10.0, 11.0, 12.0),
                DVec3::new(20.0, 21.0, 22.0),
            ],
            vec![
                DVec3::new(3.0, 4.0, 5.0),
                DVec3::new(13.0, 14.0, 15.0),
                DVec3::new(23.0, 24.0, 25.0),
            ],
        ]
    }

    #[test]
    fn curves_follow_each_walker_over_time() {
        let t = vectorize(states(), 3);

        assert_eq!(t.curves.len(), 3);
        assert_eq!(t.curves[1], [vec![10.0, 13.0], vec![11.0, 14.0], vec![12.0, 15.0]]);
        for curve in &t.curves {
            for axis in curve {
                assert_eq!(axis.len(), 2);
            }
        }
    }

    #[test]
    fn rings_are_closed_snapshots() {
        let t = vectorize(states(), 3);

        assert_eq!(t.iterations(), 2);
        assert_eq!(t.rings[1][0], vec![3.0, 13.0, 23.0, 3.0]);
        for ring in &t.rings {
            for axis in ring {
                assert_eq!(axis.len(), 4);
                assert_eq!(axis.first(), axis.last());
            }
        }
    }

    #[test]
    fn points_rebuild_positions() {
        let t = vectorize(states(), 3);
        let pts: Vec<DVec3> = points(&t.curves[2]).collect();
        assert_eq!(pts, vec![DVec3::new(20.0, 21.0, 22.0), DVec3::new(23.0, 24.0, 25.0)]);
    }

    #[test]
    fn empty_system_gives_empty_rings() {
        let t = vectorize(vec![Vec::new(), Vec::new()], 0);
        assert!(t.curves.is_empty());
        assert_eq!(t.rings.len(), 2);
        assert!(t.rings[0].iter().all(Vec::is_empty));
    }
}
