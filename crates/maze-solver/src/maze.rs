//! Level-synchronous frontier search for minimum-cost routes.
//!
//! Every iteration extends all frontier members by one step (straight, or
//! turn by 90 degrees and step), so paths in one frontier always have the
//! same number of moves. Costs come in two tiers: a plain move and a
//! move preceded by a turn. A per-solve [`DominanceCache`] prunes candidates
//! that reach a state more expensively than some other candidate already did.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::dominance::DominanceCache;
use crate::error::{MazeError, Result};
use crate::geometry::{Coordinate, Vector};
use crate::path::{Path, Score};
use crate::topology::{TileState, Topology};

/// Facing of every path when the search starts
pub const INITIAL_DIRECTION: Vector = Vector::RIGHT;

/// Which solutions a solve collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SolutionMode {
    /// One path with the minimum score
    FirstBest,
    /// Every distinct path with the minimum score
    AllBest,
    /// Every non-self-intersecting path reaching the end
    All,
}

impl SolutionMode {
    fn wants_best(self) -> bool {
        matches!(self, SolutionMode::FirstBest | SolutionMode::AllBest)
    }
}

/// Outcome of a solve including search statistics
#[derive(Debug, Clone, Default)]
pub struct SolveReport {
    /// Collected solutions in harvest order
    pub paths: Vec<Path>,
    /// Number of frontier iterations
    pub iterations: usize,
    /// Successors that passed the tile and self-intersection checks
    pub candidates_generated: usize,
    /// Successors dropped by dominance, bound or frontier collapse
    pub candidates_pruned: usize,
}

impl SolveReport {
    /// Score shared by the best solutions, if any were found
    pub fn best_score(&self) -> Option<Score> {
        self.paths.iter().map(|path| path.score).min()
    }
}

/// A maze over an obstacle field with a two-tier cost model
#[derive(Debug, Clone)]
pub struct Maze {
    pub map: Topology,
    pub start: Coordinate,
    pub end: Coordinate,
    /// Cost of advancing one cell while keeping the direction
    pub move_cost: Score,
    /// Cost of rotating by 90 degrees and then advancing one cell
    pub move_and_turn_cost: Score,
}

impl Maze {
    pub fn new(
        map: Topology,
        start: Coordinate,
        end: Coordinate,
        move_cost: Score,
        move_and_turn_cost: Score,
    ) -> Self {
        Self {
            map,
            start,
            end,
            move_cost,
            move_and_turn_cost,
        }
    }

    /// Reject cost models a loaded maze may not use. Both costs must be
    /// positive.
    pub fn check_costs(move_cost: Score, move_and_turn_cost: Score) -> Result<()> {
        if move_cost == 0 {
            return Err(MazeError::Cost("move cost must be positive".to_string()));
        }
        if move_and_turn_cost == 0 {
            return Err(MazeError::Cost(
                "move-and-turn cost must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Same endpoints and costs over a different field
    pub fn with_map(&self, map: Topology) -> Self {
        Self {
            map,
            ..self.clone()
        }
    }

    /// Find solutions for the given mode
    pub fn solve(&self, mode: SolutionMode) -> Vec<Path> {
        self.solve_detailed(mode).paths
    }

    /// Find solutions for the given mode and report search statistics
    pub fn solve_detailed(&self, mode: SolutionMode) -> SolveReport {
        let mut report = SolveReport::default();

        if !self.is_valid_endpoint(self.start) || !self.is_valid_endpoint(self.end) {
            debug!(
                "no search: start {} or end {} is outside or blocked",
                self.start, self.end
            );
            return report;
        }

        let mut cache = DominanceCache::for_costs(self.move_cost, self.move_and_turn_cost);
        let mut frontier = vec![Path::start(self.start, INITIAL_DIRECTION)];

        while !frontier.is_empty() {
            report.iterations += 1;
            trace!(
                "iteration {}: {} paths in frontier, {} solutions",
                report.iterations,
                frontier.len(),
                report.paths.len()
            );

            let mut candidates = Vec::new();
            for path in frontier {
                // Harvest
                if path.position == self.end {
                    harvest(&mut report.paths, path, mode);
                    continue;
                }

                // Expand by one step
                for successor in self.expand(&path) {
                    cache.offer(&successor);
                    candidates.push(successor);
                }
            }
            report.candidates_generated += candidates.len();
            let generated = candidates.len();

            // Prune, then collapse ties per state
            frontier = match mode {
                SolutionMode::All => candidates,
                SolutionMode::FirstBest | SolutionMode::AllBest => {
                    let bound = report.paths.first().map(|best| best.score);
                    candidates.retain(|candidate| {
                        cache.admits(candidate) && bound.map_or(true, |b| candidate.score <= b)
                    });
                    cache.collapse(candidates, mode == SolutionMode::AllBest)
                }
            };
            report.candidates_pruned += generated - frontier.len();
        }

        debug!(
            "solved {} -> {} ({:?}): {} solutions, best score {:?}, {} iterations, {} generated, {} pruned, {} cached states",
            self.start,
            self.end,
            mode,
            report.paths.len(),
            report.best_score(),
            report.iterations,
            report.candidates_generated,
            report.candidates_pruned,
            cache.len()
        );
        report
    }

    fn is_valid_endpoint(&self, coordinate: Coordinate) -> bool {
        !matches!(
            self.map.state(coordinate),
            TileState::Outside | TileState::Blocked
        )
    }

    /// Straight on, then the two 90 degree turns
    fn expand(&self, path: &Path) -> SmallVec<[Path; 3]> {
        [
            (path.direction, self.move_cost),
            (path.direction.turn_clockwise(), self.move_and_turn_cost),
            (path.direction.turn_counter_clockwise(), self.move_and_turn_cost),
        ]
        .into_iter()
        .filter_map(|(direction, cost)| self.explore(path, direction, cost))
        .collect()
    }

    fn explore(&self, path: &Path, direction: Vector, cost: Score) -> Option<Path> {
        let target = path.position.plus(direction);
        if path.visits(target) || self.map.state(target) != TileState::Free {
            return None;
        }
        path.advance(direction, cost)
    }
}

/// Add a finished path to the solutions according to the mode
fn harvest(solutions: &mut Vec<Path>, path: Path, mode: SolutionMode) {
    if !mode.wants_best() {
        solutions.push(path);
        return;
    }

    match solutions.first().map(|best| best.score) {
        Some(best) if path.score > best => {}
        Some(best) if path.score == best => {
            if mode == SolutionMode::AllBest {
                solutions.push(path);
            }
        }
        _ => {
            solutions.clear();
            solutions.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const MOVE: Score = 1;
    const MOVE_AND_TURN: Score = 1001;

    fn coord(row: i32, column: i32) -> Coordinate {
        Coordinate::new(row, column)
    }

    fn create_corridor() -> Maze {
        Maze::new(Topology::new(1, 5, []), coord(0, 0), coord(0, 4), MOVE, MOVE_AND_TURN)
    }

    /// 3x5 field with the middle of the centre row walled off: one route
    /// above, one below, mirror images of each other.
    fn create_twin_routes() -> Maze {
        Maze::new(
            Topology::new(3, 5, [coord(1, 1), coord(1, 2), coord(1, 3)]),
            coord(1, 0),
            coord(1, 4),
            MOVE,
            MOVE_AND_TURN,
        )
    }

    fn assert_no_self_intersection(path: &Path) {
        let walked = path.ordered_coordinates();
        assert_eq!(walked.len(), path.visited.len());
        for pair in walked.windows(2) {
            let step = Vector::between(pair[0], pair[1]);
            assert!(step.is_cardinal(), "non-adjacent step {:?}", pair);
        }
    }

    #[test]
    fn test_straight_corridor() {
        let maze = create_corridor();
        let paths = maze.solve(SolutionMode::FirstBest);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].score, 4);
        assert_eq!(paths[0].position, coord(0, 4));
        assert_eq!(paths[0].visited.len(), 5);
    }

    #[test]
    fn test_forced_turn() {
        // . . .
        // # # .
        // # # E
        let maze = Maze::new(
            Topology::new(3, 3, [coord(1, 0), coord(1, 1), coord(2, 0), coord(2, 1)]),
            coord(0, 0),
            coord(2, 2),
            MOVE,
            MOVE_AND_TURN,
        );

        let paths = maze.solve(SolutionMode::FirstBest);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].score, 3 * MOVE + MOVE_AND_TURN);
        assert!(paths[0].reaches_at(coord(1, 2), 2 + MOVE_AND_TURN));
    }

    #[test]
    fn test_two_equal_routes() {
        let maze = create_twin_routes();

        let all_best = maze.solve(SolutionMode::AllBest);
        assert_eq!(all_best.len(), 2);
        assert_eq!(all_best[0].score, 3 * MOVE_AND_TURN + 3 * MOVE);
        assert_eq!(all_best[0].score, all_best[1].score);
        assert_ne!(all_best[0].visited, all_best[1].visited);

        let first_best = maze.solve(SolutionMode::FirstBest);
        assert_eq!(first_best.len(), 1);
        assert!(all_best.contains(&first_best[0]));
    }

    #[test]
    fn test_two_equal_routes_with_uniform_costs() {
        // S . .
        // . # .
        // . . E
        let maze = Maze::new(Topology::new(3, 3, [coord(1, 1)]), coord(0, 0), coord(2, 2), 1, 1);

        let all_best = maze.solve(SolutionMode::AllBest);
        assert_eq!(all_best.len(), 2);
        assert!(all_best.iter().all(|p| p.score == 4));
        assert_eq!(maze.solve(SolutionMode::FirstBest).len(), 1);
    }

    #[test]
    fn test_start_equals_end() {
        let maze = Maze::new(Topology::new(2, 2, []), coord(1, 1), coord(1, 1), MOVE, MOVE_AND_TURN);

        for mode in [SolutionMode::FirstBest, SolutionMode::AllBest, SolutionMode::All] {
            let paths = maze.solve(mode);
            assert_eq!(paths.len(), 1);
            assert_eq!(paths[0].score, 0);
            assert_eq!(paths[0].visited, HashMap::from([(coord(1, 1), 0)]));
        }
    }

    #[test]
    fn test_enclosed_end_is_unreachable() {
        // end at (2, 2) walled in on all four sides
        let maze = Maze::new(
            Topology::new(5, 5, [coord(1, 2), coord(3, 2), coord(2, 1), coord(2, 3)]),
            coord(0, 0),
            coord(2, 2),
            MOVE,
            MOVE_AND_TURN,
        );

        for mode in [SolutionMode::FirstBest, SolutionMode::AllBest, SolutionMode::All] {
            assert!(maze.solve(mode).is_empty(), "{:?}", mode);
        }
    }

    #[test]
    fn test_invalid_endpoints_yield_nothing() {
        let map = Topology::new(3, 3, [coord(1, 1)]);

        let blocked_end = Maze::new(map.clone(), coord(0, 0), coord(1, 1), 1, 1);
        let blocked_start = Maze::new(map.clone(), coord(1, 1), coord(0, 0), 1, 1);
        let outside = Maze::new(map, coord(0, 0), coord(5, 0), 1, 1);

        assert!(blocked_end.solve(SolutionMode::AllBest).is_empty());
        assert!(blocked_start.solve(SolutionMode::AllBest).is_empty());
        assert!(outside.solve(SolutionMode::All).is_empty());
    }

    #[test]
    fn test_zero_size_topology() {
        let maze = Maze::new(Topology::new(0, 0, []), coord(0, 0), coord(0, 0), 1, 1);
        let report = maze.solve_detailed(SolutionMode::FirstBest);

        assert!(report.paths.is_empty());
        assert_eq!(report.iterations, 0);
    }

    #[test]
    fn test_cannot_reverse_at_start() {
        // facing right at the start, going left requires a detour that
        // does not exist in a single row
        let maze = Maze::new(Topology::new(1, 3, []), coord(0, 2), coord(0, 0), 1, 1);

        assert!(maze.solve(SolutionMode::FirstBest).is_empty());
    }

    #[test]
    fn test_turn_cost_prefers_fewer_turns() {
        // Open 3x3 field. Both L-shaped routes are four moves, but the one
        // going right first needs a single turn.
        let maze = Maze::new(Topology::new(3, 3, []), coord(0, 0), coord(2, 2), MOVE, MOVE_AND_TURN);

        let paths = maze.solve(SolutionMode::AllBest);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].score, 3 * MOVE + MOVE_AND_TURN);
        assert!(paths[0].visits(coord(0, 2)));
    }

    #[test]
    fn test_all_mode_enumerates_every_route() {
        // S . .
        // . . E
        let maze = Maze::new(Topology::new(2, 3, []), coord(0, 0), coord(1, 2), 1, 1);
        let paths = maze.solve(SolutionMode::All);

        // right-right-down, right-down-right, down-right-right and
        // down-right-up-right-down
        assert_eq!(paths.len(), 4);
        assert_eq!(paths.iter().filter(|p| p.score == 5).count(), 1);
        for path in &paths {
            assert_no_self_intersection(path);
            assert_eq!(path.position, coord(1, 2));
        }

        let best = maze.solve(SolutionMode::AllBest);
        assert_eq!(best.len(), 3);
    }

    #[test]
    fn test_all_mode_includes_detours() {
        // 3x3 open field, uniform costs: shortest routes are 4 moves, but
        // longer winding ones exist too
        let maze = Maze::new(Topology::new(3, 3, []), coord(0, 0), coord(2, 2), 1, 1);

        let all = maze.solve(SolutionMode::All);
        let best = maze.solve(SolutionMode::AllBest);

        assert_eq!(best.len(), 6);
        assert!(all.len() > best.len());
        assert!(all.iter().any(|p| p.score > 4));
        for path in &all {
            assert_no_self_intersection(path);
        }
    }

    #[test]
    fn test_no_self_intersection_in_results() {
        let maze = create_twin_routes();
        for mode in [SolutionMode::FirstBest, SolutionMode::AllBest, SolutionMode::All] {
            for path in maze.solve(mode) {
                assert_no_self_intersection(&path);
            }
        }
    }

    #[test]
    fn test_solve_is_deterministic() {
        let maze = create_twin_routes();
        for mode in [SolutionMode::FirstBest, SolutionMode::AllBest, SolutionMode::All] {
            let first: Vec<_> = maze.solve(mode).iter().map(|p| (p.score, p.steps())).collect();
            let second: Vec<_> = maze.solve(mode).iter().map(|p| (p.score, p.steps())).collect();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_with_map_resolves_on_derived_topology() {
        let maze = create_corridor();
        let blocked = maze.with_map(maze.map.with_additional_blocked(coord(0, 2)));

        assert!(blocked.solve(SolutionMode::FirstBest).is_empty());
        assert_eq!(maze.solve(SolutionMode::FirstBest)[0].score, 4);
    }

    #[test]
    fn test_report_statistics() {
        let report = create_twin_routes().solve_detailed(SolutionMode::AllBest);

        assert_eq!(report.best_score(), Some(3 * MOVE_AND_TURN + 3 * MOVE));
        assert!(report.iterations >= 7);
        assert!(report.candidates_generated >= 12);
        assert!(report.candidates_pruned <= report.candidates_generated);
    }

    #[test]
    fn test_overflowing_costs_drop_candidates() {
        // S .
        // . E
        // every route needs one turn after a first move
        let unaffordable = Maze::new(Topology::new(2, 2, []), coord(0, 0), coord(1, 1), 1, Score::MAX);
        for mode in [SolutionMode::FirstBest, SolutionMode::AllBest, SolutionMode::All] {
            assert!(unaffordable.solve(mode).is_empty());
        }

        // right then down lands exactly on the maximum, down then right overflows
        let tight = Maze::new(Topology::new(2, 2, []), coord(0, 0), coord(1, 1), 1, Score::MAX - 1);
        let paths = tight.solve(SolutionMode::All);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].score, Score::MAX);
        assert_eq!(paths[0].ordered_coordinates(), vec![coord(0, 0), coord(0, 1), coord(1, 1)]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Depth-first enumeration of every route with the same move rules
        fn enumerate_scores(maze: &Maze) -> Vec<Score> {
            let mut scores = Vec::new();
            if !maze.is_valid_endpoint(maze.start) || !maze.is_valid_endpoint(maze.end) {
                return scores;
            }

            let mut stack = vec![Path::start(maze.start, INITIAL_DIRECTION)];
            while let Some(path) = stack.pop() {
                if path.position == maze.end {
                    scores.push(path.score);
                    continue;
                }
                stack.extend(maze.expand(&path));
            }
            scores
        }

        /// Small random field with the given cost model
        fn random_maze(
            costs: impl Strategy<Value = (Score, Score)>,
        ) -> impl Strategy<Value = Maze> {
            (1usize..=4, 1usize..=4, costs).prop_flat_map(|(rows, columns, (move_cost, turn_cost))| {
                let cells = rows * columns;
                (
                    proptest::collection::vec(proptest::bool::weighted(0.25), cells),
                    0..cells,
                    0..cells,
                )
                    .prop_map(move |(walls, start, end)| {
                        let at = |i: usize| coord((i / columns) as i32, (i % columns) as i32);
                        let blocked: Vec<Coordinate> = walls
                            .iter()
                            .enumerate()
                            .filter(|(_, wall)| **wall)
                            .map(|(i, _)| at(i))
                            .collect();
                        Maze::new(
                            Topology::new(rows, columns, blocked),
                            at(start),
                            at(end),
                            move_cost,
                            turn_cost,
                        )
                    })
            })
        }

        fn uniform_cost_maze() -> impl Strategy<Value = Maze> {
            random_maze((1u64..=3).prop_map(|cost| (cost, cost)))
        }

        /// Turning always costs strictly more than going straight
        fn turn_penalty_maze() -> impl Strategy<Value = Maze> {
            random_maze(
                (1u64..=3, 1u64..=5).prop_map(|(cost, penalty)| (cost, cost + penalty)),
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(96))]

            #[test]
            fn prop_first_best_is_optimal(maze in uniform_cost_maze()) {
                let reference = enumerate_scores(&maze).into_iter().min();
                let found = maze.solve(SolutionMode::FirstBest);

                prop_assert!(found.len() <= 1);
                prop_assert_eq!(found.first().map(|p| p.score), reference);
            }

            #[test]
            fn prop_all_best_finds_every_tie(maze in uniform_cost_maze()) {
                let scores = enumerate_scores(&maze);
                let best = scores.iter().min().copied();
                let expected = scores.iter().filter(|&&s| Some(s) == best).count();
                let found = maze.solve(SolutionMode::AllBest);

                prop_assert_eq!(found.len(), expected);
                prop_assert!(found.iter().all(|p| Some(p.score) == best));
            }

            #[test]
            fn prop_first_best_is_optimal_with_turn_penalty(maze in turn_penalty_maze()) {
                let reference = enumerate_scores(&maze).into_iter().min();
                let found = maze.solve(SolutionMode::FirstBest);

                prop_assert!(found.len() <= 1);
                prop_assert_eq!(found.first().map(|p| p.score), reference);
            }

            #[test]
            fn prop_all_best_finds_every_tie_with_turn_penalty(maze in turn_penalty_maze()) {
                let scores = enumerate_scores(&maze);
                let best = scores.iter().min().copied();
                let expected = scores.iter().filter(|&&s| Some(s) == best).count();
                let found = maze.solve(SolutionMode::AllBest);

                prop_assert_eq!(found.len(), expected);
                prop_assert!(found.iter().all(|p| Some(p.score) == best));
            }

            #[test]
            fn prop_all_is_exhaustive(maze in uniform_cost_maze()) {
                let expected = enumerate_scores(&maze).len();
                let found = maze.solve(SolutionMode::All);

                prop_assert_eq!(found.len(), expected);
                for path in &found {
                    prop_assert_eq!(path.position, maze.end);
                    prop_assert_eq!(path.cost_at(path.position), Some(path.score));
                }
            }
        }
    }
}
