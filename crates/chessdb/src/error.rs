//! Error types for the service layer.

use chessdb_core::{CoreError, GameId};
use chessdb_store::StoreError;
use thiserror::Error;

/// Errors that can occur during service operations.
#[derive(Debug, Error)]
pub enum ChessDbError {
    /// Storage error, including `NoSavedGame`.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// An incoming board did not decode.
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] CoreError),
}

impl ChessDbError {
    /// The missing game's id, when that is what went wrong.
    pub fn no_saved_game(&self) -> Option<GameId> {
        match self {
            ChessDbError::Store(StoreError::NoSavedGame(id)) => Some(*id),
            _ => None,
        }
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ChessDbError>;
