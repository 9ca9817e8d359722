//! Immutable search state: one route through the grid and its cost history.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{Coordinate, Vector};

/// Cumulative movement cost
pub type Score = u64;

/// A single visited cell together with the cost at which it was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub row: i32,
    pub column: i32,
    pub cost: Score,
}

/// A candidate route. Every extension derives a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub position: Coordinate,
    pub direction: Vector,
    /// Cost at which each coordinate was reached along this path
    pub visited: HashMap<Coordinate, Score>,
    /// Cumulative cost, equal to `visited[position]`
    pub score: Score,
    /// Visited coordinates in walking order, start first
    pub trail: Vec<Coordinate>,
}

impl Path {
    /// A fresh path standing on `start` with nothing spent yet
    pub fn start(start: Coordinate, direction: Vector) -> Self {
        Self {
            position: start,
            direction,
            visited: HashMap::from([(start, 0)]),
            score: 0,
            trail: vec![start],
        }
    }

    /// Derive the path that steps once in `direction` for `cost`.
    ///
    /// Returns `None` if the score would overflow. Does not check the
    /// target; callers filter obstacles and self-intersection before
    /// extending.
    pub fn advance(&self, direction: Vector, cost: Score) -> Option<Path> {
        let position = self.position.plus(direction);
        let score = self.score.checked_add(cost)?;

        let mut visited = self.visited.clone();
        visited.insert(position, score);

        let mut trail = Vec::with_capacity(self.trail.len() + 1);
        trail.extend_from_slice(&self.trail);
        trail.push(position);

        Some(Path {
            position,
            direction,
            visited,
            score,
            trail,
        })
    }

    pub fn visits(&self, coordinate: Coordinate) -> bool {
        self.visited.contains_key(&coordinate)
    }

    /// Cost at which this path reached `coordinate`, if it did
    pub fn cost_at(&self, coordinate: Coordinate) -> Option<Score> {
        self.visited.get(&coordinate).copied()
    }

    /// Check if this path passed `coordinate` at exactly `cost`
    pub fn reaches_at(&self, coordinate: Coordinate, cost: Score) -> bool {
        self.cost_at(coordinate) == Some(cost)
    }

    /// The coordinate the path started from
    pub fn origin(&self) -> Coordinate {
        self.trail.first().copied().unwrap_or(self.position)
    }

    /// Number of moves made so far
    pub fn len(&self) -> usize {
        self.trail.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visited coordinates in the order they were walked
    pub fn ordered_coordinates(&self) -> Vec<Coordinate> {
        self.trail.clone()
    }

    /// Visited cells in walking order with the cost at each, start first
    pub fn steps(&self) -> Vec<Step> {
        self.trail
            .iter()
            .map(|&coordinate| Step {
                row: coordinate.row,
                column: coordinate.column,
                cost: self.visited.get(&coordinate).copied().unwrap_or_default(),
            })
            .collect()
    }
}
