use serde::{Deserialize, Serialize};

/// Order in which walkers read each other's positions during one iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdatePolicy {
    /// Every walker reads the positions from the start of the iteration,
    /// and all new positions are applied together.
    #[default]
    Simultaneous,
    /// Walkers are updated in place, in id order: walker `i` already sees
    /// the new positions of walkers `0..i`.
    Sequential,
}

/// Parameters for [`crate::system::WalkingSystem::random`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    pub walkers: usize,
    pub iterations: usize,
    /// Start coordinates are integers drawn in `[-coord_range, coord_range]`.
    pub coord_range: u32,
    /// Coefficients are `(u - relation_bias) / relation_scale` with `u` in `[0, 1)`.
    pub relation_bias: f64,
    pub relation_scale: f64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            walkers: 8,
            iterations: 80,
            coord_range: 170,
            relation_bias: 0.3,
            relation_scale: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: RandomConfig = serde_json::from_str(r#"{"walkers": 3}"#).unwrap();
        assert_eq!(cfg.walkers, 3);
        assert_eq!(cfg.coord_range, RandomConfig::default().coord_range);
    }

    #[test]
    fn negative_coord_range_is_rejected() {
        assert!(serde_json::from_str::<RandomConfig>(r#"{"coord_range": -5}"#).is_err());
    }
}
