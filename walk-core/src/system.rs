//! The walking system: walkers, their relations, and the step function.
//!
//! A typical run looks like:
//! 1. Build a [`WalkingSystem`] from walkers and a [`RelationGraph`]
//!    (or draw one with [`WalkingSystem::random`]).
//! 2. Call [`WalkingSystem::compute_vectrices`], which drives
//!    [`WalkingSystem::states`] to the end and records curves and rings.
//! 3. Hand the system to [`crate::plot::PlotData::prepare`] for drawing.

use crate::{
    colormap::ColorMap,
    config::{RandomConfig, UpdatePolicy},
    error::{Result, WalkError},
    relations::RelationGraph,
    types::{Curve, Ring, State},
    vectorize::{Trajectories, vectorize},
    walker::Walker,
};
use glam::DVec3;
use rand::Rng;
use std::fmt;
use std::iter::FusedIterator;
use tracing::debug;

/// A set of walkers walking toward or away from each other.
///
/// The essential state (walkers, relations, iteration count, colormap and
/// update policy) is what [`crate::persist::SystemRecord`] saves. Curves and
/// rings computed by [`WalkingSystem::compute_vectrices`] are kept apart as
/// derived data and are never saved.
#[derive(Clone, Debug)]
pub struct WalkingSystem {
    walkers: Vec<Walker>,
    relations: RelationGraph,
    iterations: usize,
    cmap: ColorMap,
    policy: UpdatePolicy,

    vectrices: Option<Trajectories>,
}

impl WalkingSystem {
    /// Creates a new system.
    ///
    /// ### Parameters
    /// - `walkers` - Walkers, in id order.
    /// - `relations` - Relation graph over exactly `walkers.len()` walkers.
    /// - `iterations` - Number of states [`WalkingSystem::states`] yields.
    /// - `cmap` - Colormap used to color rings when plotting.
    ///
    /// ### Errors
    /// [`WalkError::GraphSizeMismatch`] if the graph and walker counts differ.
    pub fn new(
        walkers: Vec<Walker>,
        relations: RelationGraph,
        iterations: usize,
        cmap: ColorMap,
    ) -> Result<Self> {
        if relations.len() != walkers.len() {
            return Err(WalkError::GraphSizeMismatch {
                graph: relations.len(),
                walkers: walkers.len(),
            });
        }
        Ok(Self {
            walkers,
            relations,
            iterations,
            cmap,
            policy: UpdatePolicy::default(),
            vectrices: None,
        })
    }

    /// Draws a random system: walkers on integer coordinates, every ordered
    /// pair related, and a random colormap.
    pub fn random(cfg: &RandomConfig, rng: &mut impl Rng) -> Self {
        let range = i64::from(cfg.coord_range);
        let walkers = (0..cfg.walkers)
            .map(|_| {
                Walker::new(DVec3::new(
                    rng.random_range(-range..=range) as f64,
                    rng.random_range(-range..=range) as f64,
                    rng.random_range(-range..=range) as f64,
                ))
            })
            .collect();
        let relations = RelationGraph::complete(cfg.walkers, |_, _| {
            (rng.random::<f64>() - cfg.relation_bias) / cfg.relation_scale
        });
        let cmap = ColorMap::random(rng);

        Self {
            walkers,
            relations,
            iterations: cfg.iterations,
            cmap,
            policy: UpdatePolicy::default(),
            vectrices: None,
        }
    }

    /// Sets the update policy used by [`WalkingSystem::next_state`].
    pub fn with_policy(mut self, policy: UpdatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn walkers(&self) -> &[Walker] {
        &self.walkers
    }

    pub fn relations(&self) -> &RelationGraph {
        &self.relations
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn cmap(&self) -> ColorMap {
        self.cmap
    }

    pub fn policy(&self) -> UpdatePolicy {
        self.policy
    }

    /// Positions of every walker, in id order.
    pub fn current_state(&self) -> State {
        self.walkers.iter().map(|w| w.position).collect()
    }

    /// Advances every walker by one iteration and returns the new state.
    ///
    /// For each relation `a -> b` with coefficient `c`, walker `a` moves by
    /// `(pos[b] - pos[a]) * c`. Which positions are read depends on the
    /// [`UpdatePolicy`]. There is no upper bound on the number of calls:
    /// `iterations` only limits [`WalkingSystem::states`].
    pub fn next_state(&mut self) -> State {
        match self.policy {
            UpdatePolicy::Simultaneous => {
                let current = self.current_state();
                for (a, walker) in self.walkers.iter_mut().enumerate() {
                    let mut pos = current[a];
                    for (b, coeff) in self.relations.relations_of(a) {
                        pos += (current[b] - current[a]) * coeff;
                    }
                    walker.position = pos;
                }
            }
            UpdatePolicy::Sequential => {
                for a in 0..self.walkers.len() {
                    let mut pos = self.walkers[a].position;
                    for (b, coeff) in self.relations.relations_of(a) {
                        pos += (self.walkers[b].position - pos) * coeff;
                    }
                    self.walkers[a].position = pos;
                }
            }
        }
        self.current_state()
    }

    /// Returns a single-pass iterator over the next `iterations` states.
    ///
    /// Each item is the current state, after which the system advances by
    /// one step. Consuming it moves the walkers, so a second call continues
    /// from where the first one stopped; call [`WalkingSystem::reset`] in
    /// between to replay the same sequence.
    pub fn states(&mut self) -> States<'_> {
        States {
            remaining: self.iterations,
            system: self,
        }
    }

    /// Moves every walker back to its start position.
    pub fn reset(&mut self) {
        for walker in &mut self.walkers {
            walker.reset();
        }
    }

    /// Runs the simulation through [`WalkingSystem::states`] and stores the
    /// resulting curves and rings.
    ///
    /// This advances the system by `iterations` steps.
    pub fn compute_vectrices(&mut self) -> &Trajectories {
        let walker_count = self.walkers.len();
        let trajectories = vectorize(self.states(), walker_count);
        debug!(
            walkers = walker_count,
            rings = trajectories.rings.len(),
            "computed vectrices"
        );
        self.vectrices.insert(trajectories)
    }

    /// Computed curves and rings, if [`WalkingSystem::compute_vectrices`]
    /// was called.
    pub fn vectrices(&self) -> Option<&Trajectories> {
        self.vectrices.as_ref()
    }

    /// One curve per walker.
    ///
    /// ### Errors
    /// [`WalkError::MissingData`] before [`WalkingSystem::compute_vectrices`].
    pub fn curves(&self) -> Result<&[Curve]> {
        self.vectrices
            .as_ref()
            .map(|v| v.curves.as_slice())
            .ok_or(WalkError::MissingData("curves"))
    }

    /// One ring per iteration.
    ///
    /// ### Errors
    /// [`WalkError::MissingData`] before [`WalkingSystem::compute_vectrices`].
    pub fn rings(&self) -> Result<&[Ring]> {
        self.vectrices
            .as_ref()
            .map(|v| v.rings.as_slice())
            .ok_or(WalkError::MissingData("rings"))
    }

    pub(crate) fn from_parts(
        walkers: Vec<Walker>,
        relations: RelationGraph,
        iterations: usize,
        cmap: ColorMap,
        policy: UpdatePolicy,
    ) -> Result<Self> {
        relations.validate()?;
        Ok(Self::new(walkers, relations, iterations, cmap)?.with_policy(policy))
    }
}

impl fmt::Display for WalkingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Walking system: [")?;
        for (i, walker) in self.walkers.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{walker}")?;
        }
        write!(f, "]")
    }
}

/// Iterator returned by [`WalkingSystem::states`].
///
/// Holds the system mutably for its whole lifetime; each call to `next`
/// steps the simulation.
#[derive(Debug)]
pub struct States<'a> {
    system: &'a mut WalkingSystem,
    remaining: usize,
}

impl Iterator for States<'_> {
    type Item = State;

    fn next(&mut self) -> Option<State> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let state = self.system.current_state();
        self.system.next_state();
        Some(state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for States<'_> {}

impl FusedIterator for States<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::BLACK;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pair(coeff: f64, iterations: usize) -> WalkingSystem {
        let walkers = vec![Walker::from([0.0, 0.0, 0.0]), Walker::from([10.0, 0.0, 0.0])];
        let mut relations = RelationGraph::new(2);
        relations.set_symmetric(0, 1, coeff).unwrap();
        WalkingSystem::new(walkers, relations, iterations, BLACK).unwrap()
    }

    fn distance(system: &WalkingSystem) -> f64 {
        system.walkers()[0].distance_from(&system.walkers()[1])
    }

    #[test]
    fn new_rejects_graph_of_wrong_size() {
        let walkers = vec![Walker::from([0.0, 0.0, 0.0])];
        let err = WalkingSystem::new(walkers, RelationGraph::new(3), 10, BLACK).unwrap_err();
        assert!(matches!(
            err,
            WalkError::GraphSizeMismatch {
                graph: 3,
                walkers: 1
            }
        ));
    }

    #[test]
    fn zero_relations_never_move_walkers() {
        let walkers = vec![
            Walker::from([1.0, 2.0, 3.0]),
            Walker::from([-4.0, 5.0, 6.0]),
            Walker::from([7.0, -8.0, 9.0]),
        ];
        let relations = RelationGraph::complete(3, |_, _| 0.0);
        let mut system = WalkingSystem::new(walkers, relations, 5, BLACK).unwrap();
        let initial = system.current_state();

        for _ in 0..50 {
            assert_eq!(system.next_state(), initial);
        }
    }

    #[test]
    fn simultaneous_step_meets_in_the_middle() {
        let mut system = pair(0.5, 1);
        let state = system.next_state();
        assert_eq!(state, vec![DVec3::new(5.0, 0.0, 0.0), DVec3::new(5.0, 0.0, 0.0)]);
    }

    #[test]
    fn sequential_step_sees_already_moved_walkers() {
        let mut system = pair(0.5, 1).with_policy(UpdatePolicy::Sequential);
        let state = system.next_state();
        // Walker 0 moves to 5 first, then walker 1 moves halfway toward 5.
        assert_eq!(state, vec![DVec3::new(5.0, 0.0, 0.0), DVec3::new(7.5, 0.0, 0.0)]);
    }

    #[test]
    fn attraction_converges_monotonically() {
        for coeff in [0.05, 0.1, 0.3, 0.45] {
            let mut system = pair(coeff, 0);
            let mut last = distance(&system);
            for _ in 0..10 {
                system.next_state();
                let d = distance(&system);
                assert!(d < last, "coeff {coeff}: {d} >= {last}");
                last = d;
            }
            // Each step shrinks the gap by a factor of (1 - 2 * coeff).
            let expected = 10.0 * (1.0 - 2.0 * coeff).powi(10);
            assert!((last - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn repulsion_diverges_monotonically() {
        for coeff in [-0.05, -0.2, -0.5, -0.9] {
            let mut system = pair(coeff, 0);
            let mut last = distance(&system);
            for _ in 0..20 {
                system.next_state();
                let d = distance(&system);
                assert!(d > last, "coeff {coeff}: {d} <= {last}");
                last = d;
            }
        }
    }

    #[test]
    fn asymmetric_relation_only_moves_the_source() {
        let walkers = vec![Walker::from([0.0, 0.0, 0.0]), Walker::from([0.0, 8.0, 0.0])];
        let mut relations = RelationGraph::new(2);
        relations.set(0, 1, 0.25).unwrap();
        let mut system = WalkingSystem::new(walkers, relations, 1, BLACK).unwrap();

        let state = system.next_state();
        assert_eq!(state, vec![DVec3::new(0.0, 2.0, 0.0), DVec3::new(0.0, 8.0, 0.0)]);
    }

    #[test]
    fn states_yields_iterations_starting_from_initial_positions() {
        let mut system = pair(0.25, 6);
        let initial = system.current_state();

        let states: Vec<State> = system.states().collect();
        assert_eq!(states.len(), 6);
        assert_eq!(states[0], initial);
        // The system ends one step past the last yielded state.
        assert_ne!(system.current_state(), states[5]);
    }

    #[test]
    fn states_is_single_pass_until_reset() {
        let mut system = pair(0.25, 3);
        let first: Vec<State> = system.states().collect();
        let second: Vec<State> = system.states().collect();
        assert_ne!(first, second);

        system.reset();
        let replay: Vec<State> = system.states().collect();
        assert_eq!(first, replay);
    }

    #[test]
    fn states_reports_exact_length() {
        let mut system = pair(0.1, 4);
        let mut states = system.states();
        assert_eq!(states.len(), 4);
        states.next();
        assert_eq!(states.len(), 3);
    }

    #[test]
    fn curves_and_rings_require_computation() {
        let mut system = pair(0.1, 4);
        assert!(matches!(system.curves(), Err(WalkError::MissingData("curves"))));
        assert!(matches!(system.rings(), Err(WalkError::MissingData("rings"))));

        system.compute_vectrices();
        assert_eq!(system.curves().unwrap().len(), 2);
        assert_eq!(system.rings().unwrap().len(), 4);
    }

    #[test]
    fn compute_vectrices_records_each_step_once() {
        let mut system = pair(0.1, 4);
        let mut reference = system.clone();
        let first = reference.current_state();
        let second = reference.next_state();

        system.compute_vectrices();

        let rings = system.rings().unwrap();
        assert_eq!(rings[0][0], vec![first[0].x, first[1].x, first[0].x]);
        assert_eq!(rings[1][0], vec![second[0].x, second[1].x, second[0].x]);
        assert_eq!(rings[1][1], vec![0.0, 0.0, 0.0]);

        let curves = system.curves().unwrap();
        assert_eq!(curves[1][0][..2], [first[1].x, second[1].x]);

        // The run advanced the system exactly `iterations` steps.
        for _ in 1..4 {
            reference.next_state();
        }
        assert_eq!(system.current_state(), reference.current_state());
    }

    #[test]
    fn random_system_follows_config() {
        let cfg = RandomConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let system = WalkingSystem::random(&cfg, &mut rng);

        assert_eq!(system.walkers().len(), cfg.walkers);
        assert_eq!(system.iterations(), cfg.iterations);
        assert_eq!(system.relations().pair_count(), cfg.walkers * (cfg.walkers - 1));

        let range = cfg.coord_range as f64;
        for w in system.walkers() {
            let p = w.position;
            assert!(p.abs().max_element() <= range);
            assert_eq!(p, p.round());
        }

        let lo = -cfg.relation_bias / cfg.relation_scale;
        let hi = (1.0 - cfg.relation_bias) / cfg.relation_scale;
        for a in 0..cfg.walkers {
            for (_, c) in system.relations().relations_of(a) {
                assert!(c >= lo && c < hi);
            }
        }
    }

    #[test]
    fn zero_coord_range_puts_walkers_at_origin() {
        let cfg = RandomConfig {
            walkers: 3,
            coord_range: 0,
            ..RandomConfig::default()
        };
        let system = WalkingSystem::random(&cfg, &mut StdRng::seed_from_u64(5));
        assert!(system.walkers().iter().all(|w| w.position == DVec3::ZERO));
    }

    #[test]
    fn display_lists_walkers() {
        let system = pair(0.1, 1);
        assert_eq!(
            system.to_string(),
            "Walking system: [Walker at (0, 0, 0), Walker at (10, 0, 0)]"
        );
    }
}
