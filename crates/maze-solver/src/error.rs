//! Error types for loading maze descriptions

use thiserror::Error;

/// Failure while reading or parsing a maze
#[derive(Error, Debug)]
pub enum MazeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid maze JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid maze grid: {0}")]
    Grid(String),

    #[error("invalid cost: {0}")]
    Cost(String),
}

pub type Result<T> = std::result::Result<T, MazeError>;
