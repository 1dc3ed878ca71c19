// error.rs - Error type shared by the grid, the stepper and the drivers

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid grid dimension {height}x{width}: both must be positive")]
    InvalidDimension { height: usize, width: usize },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("cell task failed: {0}")]
    CellTask(#[from] tokio::task::JoinError),

    #[error("step did not complete within {0:?}")]
    Timeout(Duration),

    #[error("could not build runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
