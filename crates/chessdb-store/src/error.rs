//! Error types for the store module.

use chessdb_core::GameId;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No game row exists for the identifier.
    #[error("no saved game with id {0}")]
    NoSavedGame(GameId),

    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored color, piece name or square did not decode.
    #[error("malformed record in game {game_id}: {reason}")]
    MalformedRecord { game_id: GameId, reason: String },

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking worker running a SQLite call failed.
    #[error("blocking task failed: {0}")]
    Blocking(String),

    /// A thread panicked while holding the store's lock.
    #[error("{0} lock poisoned")]
    Poisoned(&'static str),
}

impl StoreError {
    /// True when the game simply does not exist.
    pub fn is_no_saved_game(&self) -> bool {
        matches!(self, StoreError::NoSavedGame(_))
    }

    /// True for faults of the storage backend itself.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            StoreError::Database(_)
                | StoreError::Io(_)
                | StoreError::Blocking(_)
                | StoreError::Poisoned(_)
        )
    }

    pub(crate) fn malformed(game_id: GameId, reason: impl ToString) -> Self {
        StoreError::MalformedRecord {
            game_id,
            reason: reason.to_string(),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
