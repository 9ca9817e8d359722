//! Discrete 2D geometry: grid coordinates and displacement vectors.
//!
//! Rows grow downwards and columns grow to the right, so `UP` is `(-1, 0)`
//! and `RIGHT` is `(0, 1)`.

use std::collections::HashSet;
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

/// A cell on the grid, addressed by row and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: i32,
    pub column: i32,
}

impl Coordinate {
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// The coordinate one `vector` away from this one
    pub fn plus(self, vector: Vector) -> Coordinate {
        Coordinate::new(self.row + vector.row, self.column + vector.column)
    }

    /// The coordinate one `vector` behind this one
    pub fn minus(self, vector: Vector) -> Coordinate {
        Coordinate::new(self.row - vector.row, self.column - vector.column)
    }

    /// Neighbouring coordinates in the given directions, in order
    pub fn neighbours<'a>(
        self,
        directions: &'a [Vector],
    ) -> impl Iterator<Item = Coordinate> + 'a {
        directions.iter().map(move |&direction| self.plus(direction))
    }

    /// Check if any neighbour in the given directions is part of `coordinates`
    pub fn is_next_to_any_of(self, coordinates: &HashSet<Coordinate>, directions: &[Vector]) -> bool {
        self.neighbours(directions)
            .any(|neighbour| coordinates.contains(&neighbour))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl Add<Vector> for Coordinate {
    type Output = Coordinate;

    fn add(self, vector: Vector) -> Coordinate {
        self.plus(vector)
    }
}

impl AddAssign<Vector> for Coordinate {
    fn add_assign(&mut self, vector: Vector) {
        *self = self.plus(vector);
    }
}

impl Sub<Vector> for Coordinate {
    type Output = Coordinate;

    fn sub(self, vector: Vector) -> Coordinate {
        self.minus(vector)
    }
}

/// A displacement between two cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Vector {
    pub row: i32,
    pub column: i32,
}

impl Vector {
    pub const UP: Vector = Vector::new(-1, 0);
    pub const DOWN: Vector = Vector::new(1, 0);
    pub const LEFT: Vector = Vector::new(0, -1);
    pub const RIGHT: Vector = Vector::new(0, 1);

    pub const UP_LEFT: Vector = Vector::new(-1, -1);
    pub const UP_RIGHT: Vector = Vector::new(-1, 1);
    pub const DOWN_LEFT: Vector = Vector::new(1, -1);
    pub const DOWN_RIGHT: Vector = Vector::new(1, 1);

    /// The four unit vectors, in clockwise order starting at `UP`
    pub const CARDINALS: [Vector; 4] = [Vector::UP, Vector::RIGHT, Vector::DOWN, Vector::LEFT];

    /// All eight unit vectors, in clockwise order starting at `UP`
    pub const DIRECTIONS: [Vector; 8] = [
        Vector::UP,
        Vector::UP_RIGHT,
        Vector::RIGHT,
        Vector::DOWN_RIGHT,
        Vector::DOWN,
        Vector::DOWN_LEFT,
        Vector::LEFT,
        Vector::UP_LEFT,
    ];

    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Displacement leading from `from` to `to`
    pub fn between(from: Coordinate, to: Coordinate) -> Vector {
        Vector::new(to.row - from.row, to.column - from.column)
    }

    /// Rotate by 90 degrees clockwise (UP -> RIGHT -> DOWN -> LEFT -> UP).
    ///
    /// Only defined for cardinal vectors; debug builds assert it.
    pub fn turn_clockwise(self) -> Vector {
        debug_assert!(self.is_cardinal(), "cannot turn non-cardinal vector {}", self);
        Vector::new(self.column, -self.row)
    }

    /// Rotate by 90 degrees counter-clockwise (UP -> LEFT -> DOWN -> RIGHT -> UP).
    ///
    /// Only defined for cardinal vectors; debug builds assert it.
    pub fn turn_counter_clockwise(self) -> Vector {
        debug_assert!(self.is_cardinal(), "cannot turn non-cardinal vector {}", self);
        Vector::new(-self.column, self.row)
    }

    pub fn is_cardinal(self) -> bool {
        Vector::CARDINALS.contains(&self)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            v if *v == Vector::UP => "up",
            v if *v == Vector::DOWN => "down",
            v if *v == Vector::LEFT => "left",
            v if *v == Vector::RIGHT => "right",
            v if *v == Vector::UP_LEFT => "up-left",
            v if *v == Vector::UP_RIGHT => "up-right",
            v if *v == Vector::DOWN_LEFT => "down-left",
            v if *v == Vector::DOWN_RIGHT => "down-right",
            _ => return write!(f, "<{}, {}>", self.row, self.column),
        };
        f.write_str(name)
    }
}
