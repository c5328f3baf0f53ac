use thiserror::Error;

#[derive(Error, Debug)]
pub enum MazeError {
    #[error("exit node {node} is not a valid boundary node distinct from the entrance")]
    InvalidExit { node: usize },

    #[error("exit position ({row}, {col}) lies outside the {rows}x{cols} grid")]
    ExitOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("invalid maze graph: {0}")]
    InvalidGraph(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MazeError>;
