//! Aggregate analyses built from many independent solves.
//!
//! Each solve owns its own dominance cache and only reads its topology, so
//! solves fan out over rayon's pool freely. Results are joined by
//! `collect` and folded afterwards on the calling thread.

use std::collections::HashSet;

use log::debug;
use rayon::prelude::*;

use crate::geometry::Coordinate;
use crate::maze::{Maze, SolutionMode};
use crate::path::Path;

/// Solve every maze independently, results in input order
pub fn solve_many(mazes: &[Maze], mode: SolutionMode) -> Vec<Vec<Path>> {
    mazes.par_iter().map(|maze| maze.solve(mode)).collect()
}

/// Candidates that, placed as a single extra obstacle, disconnect the end
/// from the start. Start, end and non-free cells are never candidates.
pub fn blocking_obstacles(maze: &Maze, candidates: &[Coordinate]) -> Vec<Coordinate> {
    let blocking: Vec<Coordinate> = candidates
        .par_iter()
        .copied()
        .filter(|&candidate| {
            candidate != maze.start && candidate != maze.end && maze.map.is_free(candidate)
        })
        .filter(|&candidate| {
            maze.with_map(maze.map.with_additional_blocked(candidate))
                .solve(SolutionMode::FirstBest)
                .is_empty()
        })
        .collect();

    debug!(
        "{} of {} candidate obstacles disconnect {} from {}",
        blocking.len(),
        candidates.len(),
        maze.start,
        maze.end
    );
    blocking
}

/// Drop obstacles one at a time and return the index of the first drop
/// after which the end can no longer be reached.
///
/// Only drops landing on the current best path trigger a new solve.
/// Returns `None` if the end is unreachable before any drop, or stays
/// reachable after all of them.
pub fn first_blocking_drop(maze: &Maze, drops: &[Coordinate]) -> Option<usize> {
    let mut best = maze.solve(SolutionMode::FirstBest).into_iter().next()?;
    let mut map = maze.map.clone();
    let mut solves = 1;

    for (index, &obstacle) in drops.iter().enumerate() {
        map = map.with_additional_blocked(obstacle);
        if !best.visits(obstacle) {
            continue;
        }

        solves += 1;
        match maze.with_map(map.clone()).solve(SolutionMode::FirstBest).into_iter().next() {
            Some(path) => best = path,
            None => {
                debug!("drop #{} at {} cuts the maze after {} solves", index, obstacle, solves);
                return Some(index);
            }
        }
    }

    None
}

/// Distinct coordinates covered by at least one of the paths
pub fn tiles_on_paths(paths: &[Path]) -> HashSet<Coordinate> {
    paths
        .iter()
        .flat_map(|path| path.visited.keys().copied())
        .collect()
}
