//! Immutable rectangular grid model.
//!
//! A [`Topology`] describes the bounds of a field, the cells blocked by
//! obstacles and optional tagged points of interest. Mutation-shaped
//! operations return new values; the blocked set is shared between derived
//! topologies until one of them diverges.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::geometry::Coordinate;

/// Classification of a single coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileState {
    /// Outside of `[0, rows) x [0, columns)`
    Outside,
    /// Occupied by an obstacle
    Blocked,
    /// Tagged with a point of interest (and not blocked)
    PointOfInterest,
    /// Nothing here
    Free,
}

/// A rectangular field with obstacles and points of interest of type `T`
#[derive(Debug)]
pub struct Topology<T = ()> {
    rows: usize,
    columns: usize,
    blocked: Arc<HashSet<Coordinate>>,
    points_of_interest: Arc<HashMap<Coordinate, T>>,
}

// Manual impl: cloning only bumps the shared sets, so `T` needs no `Clone`.
impl<T> Clone for Topology<T> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows,
            columns: self.columns,
            blocked: Arc::clone(&self.blocked),
            points_of_interest: Arc::clone(&self.points_of_interest),
        }
    }
}

impl<T> Topology<T> {
    /// Create a topology without points of interest
    pub fn new(rows: usize, columns: usize, blocked: impl IntoIterator<Item = Coordinate>) -> Self {
        Self {
            rows,
            columns,
            blocked: Arc::new(blocked.into_iter().collect()),
            points_of_interest: Arc::new(HashMap::new()),
        }
    }

    /// Replace the points of interest
    pub fn with_points_of_interest(
        self,
        points_of_interest: impl IntoIterator<Item = (Coordinate, T)>,
    ) -> Self {
        Self {
            points_of_interest: Arc::new(points_of_interest.into_iter().collect()),
            ..self
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Check if a coordinate lies within the bounds
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.row >= 0
            && coordinate.column >= 0
            && (coordinate.row as usize) < self.rows
            && (coordinate.column as usize) < self.columns
    }

    /// Classify a coordinate. Blocked takes precedence over point of interest.
    pub fn state(&self, coordinate: Coordinate) -> TileState {
        if !self.contains(coordinate) {
            TileState::Outside
        } else if self.blocked.contains(&coordinate) {
            TileState::Blocked
        } else if self.points_of_interest.contains_key(&coordinate) {
            TileState::PointOfInterest
        } else {
            TileState::Free
        }
    }

    pub fn is_blocked(&self, coordinate: Coordinate) -> bool {
        self.state(coordinate) == TileState::Blocked
    }

    pub fn is_free(&self, coordinate: Coordinate) -> bool {
        self.state(coordinate) == TileState::Free
    }

    /// The point of interest at a coordinate, unless it is blocked or outside
    pub fn point_of_interest(&self, coordinate: Coordinate) -> Option<&T> {
        match self.state(coordinate) {
            TileState::PointOfInterest => self.points_of_interest.get(&coordinate),
            _ => None,
        }
    }

    /// Derive a topology with one more obstacle. `self` is left untouched.
    pub fn with_additional_blocked(&self, coordinate: Coordinate) -> Self {
        let mut derived = self.clone();
        Arc::make_mut(&mut derived.blocked).insert(coordinate);
        derived
    }

    /// All obstacles, in no particular order
    pub fn blocked(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.blocked.iter().copied()
    }

    /// All in-bounds coordinates, row-major
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |column| Coordinate::new(row as i32, column as i32))
        })
    }
}
