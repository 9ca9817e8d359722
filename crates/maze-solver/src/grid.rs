//! ASCII grid parsing.
//!
//! Each non-blank line is a row. `#` marks a wall, `S` the start and `E`
//! the end; any other character is free floor.

use crate::error::{MazeError, Result};
use crate::geometry::Coordinate;
use crate::maze::Maze;
use crate::path::Score;
use crate::topology::Topology;

pub const WALL: char = '#';
pub const START: char = 'S';
pub const END: char = 'E';

fn rows(text: &str) -> Vec<&str> {
    text.lines().filter(|line| !line.trim().is_empty()).collect()
}

/// Every occurrence of `marker`, row-major
pub fn find_coordinates(lines: &[&str], marker: char) -> Vec<Coordinate> {
    lines
        .iter()
        .enumerate()
        .flat_map(|(row, line)| {
            line.chars()
                .enumerate()
                .filter(move |&(_, c)| c == marker)
                .map(move |(column, _)| Coordinate::new(row as i32, column as i32))
        })
        .collect()
}

/// Topology sized by the non-blank lines, blocked wherever `blocked_marker`
/// appears. Short lines are padded with free cells.
pub fn parse_topology(text: &str, blocked_marker: char) -> Topology {
    let lines = rows(text);
    let columns = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    Topology::new(lines.len(), columns, find_coordinates(&lines, blocked_marker))
}

fn single(lines: &[&str], marker: char) -> Result<Coordinate> {
    match find_coordinates(lines, marker).as_slice() {
        [coordinate] => Ok(*coordinate),
        [] => Err(MazeError::Grid(format!("no '{}' marker found", marker))),
        found => Err(MazeError::Grid(format!(
            "expected one '{}' marker, found {}",
            marker,
            found.len()
        ))),
    }
}

/// Build a maze from an ASCII grid with exactly one start and one end
pub fn parse_maze(text: &str, move_cost: Score, move_and_turn_cost: Score) -> Result<Maze> {
    Maze::check_costs(move_cost, move_and_turn_cost)?;

    let lines = rows(text);
    let start = single(&lines, START)?;
    let end = single(&lines, END)?;

    Ok(Maze::new(
        parse_topology(text, WALL),
        start,
        end,
        move_cost,
        move_and_turn_cost,
    ))
}
