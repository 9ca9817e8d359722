//! Serializable maze description.
//!
//! Matches the JSON accepted by the CLI:
//!
//! ```json
//! {
//!   "rows": 3, "columns": 5,
//!   "blocked": [{ "row": 1, "column": 2 }],
//!   "start": { "row": 1, "column": 0 },
//!   "end": { "row": 1, "column": 4 },
//!   "moveCost": 1, "moveAndTurnCost": 1001
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::Coordinate;
use crate::maze::Maze;
use crate::path::Score;
use crate::topology::Topology;

/// Everything needed to build a [`Maze`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeConfig {
    pub rows: usize,
    pub columns: usize,
    #[serde(default)]
    pub blocked: Vec<Coordinate>,
    pub start: Coordinate,
    pub end: Coordinate,
    pub move_cost: Score,
    pub move_and_turn_cost: Score,
}

impl MazeConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the maze, rejecting non-positive costs
    pub fn to_maze(&self) -> Result<Maze> {
        Maze::check_costs(self.move_cost, self.move_and_turn_cost)?;

        Ok(Maze::new(
            Topology::new(self.rows, self.columns, self.blocked.iter().copied()),
            self.start,
            self.end,
            self.move_cost,
            self.move_and_turn_cost,
        ))
    }
}

impl From<&Maze> for MazeConfig {
    fn from(maze: &Maze) -> Self {
        let mut blocked: Vec<Coordinate> = maze.map.blocked().collect();
        blocked.sort();

        Self {
            rows: maze.map.rows(),
            columns: maze.map.columns(),
            blocked,
            start: maze.start,
            end: maze.end,
            move_cost: maze.move_cost,
            move_and_turn_cost: maze.move_and_turn_cost,
        }
    }
}
