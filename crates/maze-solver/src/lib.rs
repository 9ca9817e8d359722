//! Grid maze solver with a two-tier movement cost model.
//!
//! This crate provides an immutable grid model ([`Topology`]) and a
//! level-synchronous frontier search ([`Maze`]) that finds minimum-cost
//! routes where moving straight and turning-then-moving cost different
//! amounts. It can report one optimal route, every tied optimal route, or
//! every route at all.

pub mod analysis;
pub mod config;
pub mod dominance;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod maze;
pub mod path;
pub mod topology;

// Re-export main types
pub use analysis::{blocking_obstacles, first_blocking_drop, solve_many, tiles_on_paths};
pub use config::MazeConfig;
pub use dominance::{CacheKey, DominanceCache};
pub use error::{MazeError, Result};
pub use geometry::{Coordinate, Vector};
pub use maze::{Maze, SolutionMode, SolveReport, INITIAL_DIRECTION};
pub use path::{Path, Score, Step};
pub use topology::{TileState, Topology};
