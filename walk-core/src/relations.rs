//! Weighted, directed relation graph between walkers.

use crate::error::{Result, WalkError};
use crate::types::WalkerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse adjacency of relation coefficients.
///
/// Row `a` holds every walker `b` that `a` is related to, with the
/// coefficient `a -> b`. A positive coefficient pulls `a` toward `b`, a
/// negative one pushes it away. Missing pairs behave like a coefficient of
/// `0`. The graph is directed: `a -> b` and `b -> a` are independent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationGraph {
    rows: Vec<BTreeMap<WalkerId, f64>>,
}

impl RelationGraph {
    /// Creates an empty graph over `len` walkers.
    pub fn new(len: usize) -> Self {
        Self {
            rows: vec![BTreeMap::new(); len],
        }
    }

    /// Creates a graph where every ordered pair of distinct walkers is
    /// related with the coefficient returned by `coeff(a, b)`.
    pub fn complete(len: usize, mut coeff: impl FnMut(WalkerId, WalkerId) -> f64) -> Self {
        let rows = (0..len)
            .map(|a| {
                (0..len)
                    .filter(|&b| b != a)
                    .map(|b| (b, coeff(a, b)))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Number of walkers the graph is defined over.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of stored (ordered) pairs.
    pub fn pair_count(&self) -> usize {
        self.rows.iter().map(BTreeMap::len).sum()
    }

    /// Sets the coefficient `a -> b`, replacing any previous value.
    ///
    /// ### Errors
    /// - [`WalkError::SelfRelation`] if `a == b`.
    /// - [`WalkError::UnknownWalker`] if either id is out of range.
    pub fn set(&mut self, a: WalkerId, b: WalkerId, coeff: f64) -> Result<()> {
        self.check(a)?;
        self.check(b)?;
        if a == b {
            return Err(WalkError::SelfRelation(a));
        }
        self.rows[a].insert(b, coeff);
        Ok(())
    }

    /// Sets `a -> b` and `b -> a` to the same coefficient.
    pub fn set_symmetric(&mut self, a: WalkerId, b: WalkerId, coeff: f64) -> Result<()> {
        self.set(a, b, coeff)?;
        self.set(b, a, coeff)
    }

    /// Coefficient `a -> b`, or `0.0` if the pair is not related.
    pub fn get(&self, a: WalkerId, b: WalkerId) -> f64 {
        self.rows
            .get(a)
            .and_then(|row| row.get(&b))
            .copied()
            .unwrap_or(0.0)
    }

    /// Iterates over `(b, coeff)` for every relation `a -> b`, by increasing `b`.
    ///
    /// ### Panics
    /// Panics if `a` is out of range.
    pub fn relations_of(&self, a: WalkerId) -> impl Iterator<Item = (WalkerId, f64)> + '_ {
        self.rows[a].iter().map(|(&b, &c)| (b, c))
    }

    /// Checks that every stored pair references a known walker and that no
    /// walker relates to itself. Used on deserialized graphs.
    pub(crate) fn validate(&self) -> Result<()> {
        for (a, row) in self.rows.iter().enumerate() {
            for &b in row.keys() {
                self.check(b)?;
                if a == b {
                    return Err(WalkError::SelfRelation(a));
                }
            }
        }
        Ok(())
    }

    fn check(&self, id: WalkerId) -> Result<()> {
        if id < self.rows.len() {
            Ok(())
        } else {
            Err(WalkError::UnknownWalker {
                id,
                len: self.rows.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_pairs_default_to_zero() {
        let mut g = RelationGraph::new(3);
        g.set(0, 1, 0.25).unwrap();

        assert_eq!(g.get(0, 1), 0.25);
        assert_eq!(g.get(1, 0), 0.0);
        assert_eq!(g.get(2, 0), 0.0);
        assert_eq!(g.get(7, 0), 0.0);
        assert_eq!(g.pair_count(), 1);
    }

    #[test]
    fn set_rejects_self_and_unknown_walkers() {
        let mut g = RelationGraph::new(2);
        assert!(matches!(g.set(1, 1, 0.5), Err(WalkError::SelfRelation(1))));
        assert!(matches!(
            g.set(0, 2, 0.5),
            Err(WalkError::UnknownWalker { id: 2, len: 2 })
        ));
        assert_eq!(g.pair_count(), 0);
    }

    #[test]
    fn complete_graph_skips_diagonal() {
        let g = RelationGraph::complete(4, |a, b| (a * 10 + b) as f64);
        assert_eq!(g.pair_count(), 12);
        assert_eq!(g.get(2, 3), 23.0);
        assert_eq!(g.get(2, 2), 0.0);

        let targets: Vec<WalkerId> = g.relations_of(1).map(|(b, _)| b).collect();
        assert_eq!(targets, vec![0, 2, 3]);
    }

    #[test]
    fn explicit_zero_is_kept_as_a_pair() {
        let mut g = RelationGraph::new(2);
        g.set_symmetric(0, 1, 0.0).unwrap();
        assert_eq!(g.pair_count(), 2);
        assert_eq!(g.relations_of(0).collect::<Vec<_>>(), vec![(1, 0.0)]);
    }
}
