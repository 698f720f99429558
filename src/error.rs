//! Error types for the grimoire

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrimoireError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid script format: {0}")]
    InvalidScriptFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl GrimoireError {
    /// Seat index outside the roster
    pub fn seat_not_found(seat: usize) -> Self {
        GrimoireError::NotFound(format!("no player at seat {seat}"))
    }
}

pub type Result<T> = std::result::Result<T, GrimoireError>;
