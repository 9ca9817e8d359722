//! CLI entry point for the maze solver.
//!
//! Usage:
//!   maze-solver solve <maze.json> [options]
//!   maze-solver solve --stdin --format grid [options]
//!
//! Options:
//!   --format <json|grid>        Input format (default: json)
//!   --mode <mode>               first-best, all-best or all (default: all-best)
//!   --move-cost <n>             Override the cost of a straight move
//!   --move-and-turn-cost <n>    Override the cost of a turn and move

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};
use serde::Serialize;

use maze_solver::{
    grid, tiles_on_paths, Maze, MazeConfig, MazeError, Path, Score, SolutionMode, SolveReport,
    Step,
};

/// Costs used for grid input when none are given
const DEFAULT_MOVE_COST: Score = 1;
const DEFAULT_MOVE_AND_TURN_COST: Score = 1001;

#[derive(Parser)]
#[command(name = "maze-solver")]
#[command(about = "Minimum-cost routes through grid mazes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    /// MazeConfig JSON
    Json,
    /// ASCII grid with '#' walls, 'S' start and 'E' end
    Grid,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a maze and print the routes as JSON
    Solve {
        /// Path to maze file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read maze from stdin instead of file
        #[arg(long)]
        stdin: bool,

        /// Input format
        #[arg(long, value_enum, default_value = "json")]
        format: InputFormat,

        /// Which solutions to collect
        #[arg(long, value_enum, default_value = "all-best")]
        mode: SolutionMode,

        /// Cost of advancing one cell straight ahead
        #[arg(long)]
        move_cost: Option<Score>,

        /// Cost of turning 90 degrees and advancing one cell
        #[arg(long)]
        move_and_turn_cost: Option<Score>,
    },
}

/// Output format for a solve
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solved: bool,
    mode: SolutionMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    best_score: Option<Score>,
    path_count: usize,
    tiles_on_paths: usize,
    iterations: usize,
    candidates_generated: usize,
    candidates_pruned: usize,
    paths: Vec<PathOutput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PathOutput {
    score: Score,
    steps: Vec<Step>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether at least one route was found
fn run(command: Commands) -> Result<bool, MazeError> {
    match command {
        Commands::Solve {
            file,
            stdin,
            format,
            mode,
            move_cost,
            move_and_turn_cost,
        } => {
            let content = if stdin {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                buffer
            } else if let Some(path) = file {
                fs::read_to_string(&path)?
            } else {
                return Err(MazeError::Grid(
                    "must provide either a file path or --stdin".to_string(),
                ));
            };

            let maze = load_maze(&content, format, move_cost, move_and_turn_cost)?;
            info!(
                "solving {}x{} maze from {} to {} ({:?})",
                maze.map.rows(),
                maze.map.columns(),
                maze.start,
                maze.end,
                mode
            );

            let report = maze.solve_detailed(mode);
            let output = format_report(mode, &report);
            println!("{}", serde_json::to_string_pretty(&output)?);

            Ok(output.solved)
        }
    }
}

fn load_maze(
    content: &str,
    format: InputFormat,
    move_cost: Option<Score>,
    move_and_turn_cost: Option<Score>,
) -> Result<Maze, MazeError> {
    match format {
        InputFormat::Json => {
            let mut config = MazeConfig::from_json(content)?;
            if let Some(cost) = move_cost {
                config.move_cost = cost;
            }
            if let Some(cost) = move_and_turn_cost {
                config.move_and_turn_cost = cost;
            }
            config.to_maze()
        }
        InputFormat::Grid => grid::parse_maze(
            content,
            move_cost.unwrap_or(DEFAULT_MOVE_COST),
            move_and_turn_cost.unwrap_or(DEFAULT_MOVE_AND_TURN_COST),
        ),
    }
}

fn format_report(mode: SolutionMode, report: &SolveReport) -> SolveOutput {
    SolveOutput {
        solved: !report.paths.is_empty(),
        mode,
        best_score: report.best_score(),
        path_count: report.paths.len(),
        tiles_on_paths: tiles_on_paths(&report.paths).len(),
        iterations: report.iterations,
        candidates_generated: report.candidates_generated,
        candidates_pruned: report.candidates_pruned,
        paths: report.paths.iter().map(format_path).collect(),
    }
}

fn format_path(path: &Path) -> PathOutput {
    PathOutput {
        score: path.score,
        steps: path.steps(),
    }
}
