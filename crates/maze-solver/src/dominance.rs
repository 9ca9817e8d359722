//! Score-dominance pruning for the frontier search.
//!
//! The cache remembers the best score ever seen for a canonical search
//! state. Candidates reaching a state strictly worse than that are dropped,
//! and each iteration's frontier can be collapsed to its cheapest members
//! per state.

use std::collections::{HashMap, HashSet};

use crate::geometry::{Coordinate, Vector};
use crate::path::{Path, Score};

/// Canonical state used for dominance comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Direction is irrelevant when turning costs nothing extra
    Position(Coordinate),
    /// Facing matters for the cost of the next move
    Oriented(Coordinate, Vector),
}

/// Best score per [`CacheKey`], scoped to a single solve
#[derive(Debug, Clone, Default)]
pub struct DominanceCache {
    oriented: bool,
    best: HashMap<CacheKey, Score>,
}

impl DominanceCache {
    /// Create an empty cache. Keys include the direction when `oriented`.
    pub fn new(oriented: bool) -> Self {
        Self {
            oriented,
            best: HashMap::new(),
        }
    }

    /// Cache for a cost model: direction only matters when a turn costs
    /// more (or less) than a plain move.
    pub fn for_costs(move_cost: Score, move_and_turn_cost: Score) -> Self {
        Self::new(move_cost != move_and_turn_cost)
    }

    pub fn key(&self, path: &Path) -> CacheKey {
        if self.oriented {
            CacheKey::Oriented(path.position, path.direction)
        } else {
            CacheKey::Position(path.position)
        }
    }

    /// Best score recorded so far for `key`
    pub fn best(&self, key: &CacheKey) -> Option<Score> {
        self.best.get(key).copied()
    }

    /// Record a candidate. Only ever lowers the stored value.
    pub fn offer(&mut self, path: &Path) {
        let key = self.key(path);
        self.best
            .entry(key)
            .and_modify(|best| *best = (*best).min(path.score))
            .or_insert(path.score);
    }

    /// Check whether an offered candidate is still among the best for its key.
    ///
    /// # Panics
    ///
    /// Panics if the candidate was never offered or beats the recorded
    /// best, which means the pruning invariant is broken.
    pub fn admits(&self, path: &Path) -> bool {
        let key = self.key(path);
        match self.best.get(&key) {
            Some(&best) if path.score == best => true,
            Some(&best) if path.score > best => false,
            recorded => panic!(
                "dominance cache out of sync for {:?}: recorded {:?}, candidate scored {}",
                key, recorded, path.score
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// Collapse a frontier per key to the members tied at the minimum score
    /// observed within it. With `keep_ties` unset, only the first of those
    /// survives. Relative order is preserved.
    pub fn collapse(&self, frontier: Vec<Path>, keep_ties: bool) -> Vec<Path> {
        let mut minima: HashMap<CacheKey, Score> = HashMap::new();
        for path in &frontier {
            minima
                .entry(self.key(path))
                .and_modify(|min| *min = (*min).min(path.score))
                .or_insert(path.score);
        }

        let mut taken: HashSet<CacheKey> = HashSet::new();
        frontier
            .into_iter()
            .filter(|path| {
                let key = self.key(path);
                minima.get(&key) == Some(&path.score) && (keep_ties || taken.insert(key))
            })
            .collect()
    }
}
