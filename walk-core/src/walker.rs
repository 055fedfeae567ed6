use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point that walks toward (or away from) the walkers it relates to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Walker {
    start_position: DVec3,
    pub position: DVec3,
}

impl Walker {
    pub fn new(position: DVec3) -> Self {
        Self {
            start_position: position,
            position,
        }
    }

    /// Position the walker was created at. Never changes.
    pub fn start_position(&self) -> DVec3 {
        self.start_position
    }

    pub fn distance_from(&self, other: &Walker) -> f64 {
        self.position.distance(other.position)
    }

    /// Moves the walker back to its start position.
    pub fn reset(&mut self) {
        self.position = self.start_position;
    }
}

impl From<[f64; 3]> for Walker {
    fn from(position: [f64; 3]) -> Self {
        Self::new(DVec3::from_array(position))
    }
}

impl fmt::Display for Walker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.position;
        write!(f, "Walker at ({}, {}, {})", p.x, p.y, p.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_returns_to_start_position() {
        let mut w = Walker::from([1.0, 2.0, 3.0]);
        w.position = DVec3::new(9.0, 9.0, 9.0);
        assert_eq!(w.start_position(), DVec3::new(1.0, 2.0, 3.0));

        w.reset();
        assert_eq!(w.position, DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn distance_uses_current_positions() {
        let a = Walker::from([0.0, 0.0, 0.0]);
        let mut b = Walker::from([100.0, 0.0, 0.0]);
        b.position = DVec3::new(3.0, 4.0, 0.0);
        assert_eq!(a.distance_from(&b), 5.0);
    }

    #[test]
    fn display_shows_position() {
        let w = Walker::from([1.0, -2.5, 0.0]);
        assert_eq!(w.to_string(), "Walker at (1, -2.5, 0)");
    }
}
