//! GameStore trait: the abstract interface for game persistence.
//!
//! Implementations include SQLite (primary) and in-memory (for tests).
//! Neither interprets the board; they only store and return it.

use async_trait::async_trait;
use chessdb_core::{BoardSnapshot, Color, GameId, GameSession};

use crate::error::{Result, StoreError};

/// The GameStore trait: async interface for game persistence.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, `spawn_blocking` is used internally to avoid blocking the
/// runtime.
///
/// # Semantics
///
/// - **Identifiers** are assigned by the store and never reused.
/// - **Unknown ids**: `load`, `update_board`, `update_turn` and `update_game`
///   fail with [`StoreError::NoSavedGame`]; `delete_game` is a no-op that
///   reports `false`.
/// - **Atomicity**: every method is a single unit of work. A concurrent
///   reader sees either the old board or the new one, never a partial one.
/// - **Concurrent writers** to the same id: the last commit wins.
#[async_trait]
pub trait GameStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Save a new game and return its freshly assigned identifier.
    async fn create(&self, turn: Color, board: &BoardSnapshot) -> Result<GameId>;

    /// Load a saved game.
    ///
    /// A game saved with an empty board loads with an empty board; only a
    /// missing game row yields `NoSavedGame`.
    async fn load(&self, id: GameId) -> Result<GameSession>;

    /// Remove a game and all of its pieces.
    ///
    /// Returns whether a game was removed. Unknown ids are ignored.
    async fn delete_game(&self, id: GameId) -> Result<bool>;

    // ─────────────────────────────────────────────────────────────────────────
    // Updates
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the whole board, leaving the turn as it is.
    async fn update_board(&self, id: GameId, board: &BoardSnapshot) -> Result<()>;

    /// Overwrite whose turn it is.
    async fn update_turn(&self, id: GameId, turn: Color) -> Result<()>;

    /// Replace board and turn together, as one unit of work.
    async fn update_game(&self, id: GameId, board: &BoardSnapshot, turn: Color) -> Result<()>;

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether a game row exists for the identifier.
    async fn exists(&self, id: GameId) -> Result<bool>;

    /// Every saved game's identifier, ascending.
    async fn list_game_ids(&self) -> Result<Vec<GameId>>;
}

/// Extension trait for common store patterns.
pub trait GameStoreExt: GameStore {
    /// Load a game, mapping `NoSavedGame` to `None`.
    fn try_load(
        &self,
        id: GameId,
    ) -> impl std::future::Future<Output = Result<Option<GameSession>>> + Send;
}

impl<S: GameStore + ?Sized> GameStoreExt for S {
    async fn try_load(&self, id: GameId) -> Result<Option<GameSession>> {
        match self.load(id).await {
            Ok(session) => Ok(Some(session)),
            Err(StoreError::NoSavedGame(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
