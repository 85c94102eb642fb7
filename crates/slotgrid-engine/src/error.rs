//! Error types for slotgrid-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectError {
    #[error("Invalid grid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown selection scheme: {0}")]
    UnknownScheme(String),

    #[error("Slot not found in grid: {0}")]
    SlotNotFound(String),
}

pub type Result<T> = std::result::Result<T, SelectError>;
