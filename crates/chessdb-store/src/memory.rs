//! In-memory implementation of the GameStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use chessdb_core::{BoardSnapshot, Color, GameId, GameSession};

use crate::error::{Result, StoreError};
use crate::traits::GameStore;

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Last identifier handed out. Like `AUTOINCREMENT`, never reused.
    last_id: i64,

    /// Saved games by identifier.
    games: BTreeMap<GameId, StoredGame>,
}

struct StoredGame {
    turn: Color,
    board: BoardSnapshot,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                last_id: 0,
                games: BTreeMap::new(),
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Poisoned("memory store"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Poisoned("memory store"))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStoreInner {
    fn game_mut(&mut self, id: GameId) -> Result<&mut StoredGame> {
        self.games.get_mut(&id).ok_or(StoreError::NoSavedGame(id))
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn create(&self, turn: Color, board: &BoardSnapshot) -> Result<GameId> {
        let mut inner = self.write()?;

        inner.last_id += 1;
        let id = GameId(inner.last_id);
        inner.games.insert(
            id,
            StoredGame {
                turn,
                board: board.clone(),
            },
        );

        debug!(game_id = %id, %turn, pieces = board.len(), "created game");
        Ok(id)
    }

    async fn load(&self, id: GameId) -> Result<GameSession> {
        let inner = self.read()?;

        let game = inner.games.get(&id).ok_or(StoreError::NoSavedGame(id))?;

        debug!(game_id = %id, turn = %game.turn, pieces = game.board.len(), "loaded game");
        Ok(GameSession {
            id,
            turn: game.turn,
            board: game.board.clone(),
        })
    }

    async fn delete_game(&self, id: GameId) -> Result<bool> {
        let mut inner = self.write()?;
        match inner.games.remove(&id) {
            Some(game) => {
                debug!(game_id = %id, pieces = game.board.len(), "deleted game");
                Ok(true)
            }
            None => {
                debug!(game_id = %id, "delete of unknown game ignored");
                Ok(false)
            }
        }
    }

    async fn update_board(&self, id: GameId, board: &BoardSnapshot) -> Result<()> {
        let mut inner = self.write()?;
        inner.game_mut(id)?.board = board.clone();

        debug!(game_id = %id, pieces = board.len(), "replaced board");
        Ok(())
    }

    async fn update_turn(&self, id: GameId, turn: Color) -> Result<()> {
        let mut inner = self.write()?;
        inner.game_mut(id)?.turn = turn;

        debug!(game_id = %id, %turn, "updated turn");
        Ok(())
    }

    async fn update_game(&self, id: GameId, board: &BoardSnapshot, turn: Color) -> Result<()> {
        let mut inner = self.write()?;
        let game = inner.game_mut(id)?;
        game.board = board.clone();
        game.turn = turn;

        debug!(game_id = %id, %turn, pieces = board.len(), "updated game");
        Ok(())
    }

    async fn exists(&self, id: GameId) -> Result<bool> {
        let inner = self.read()?;
        Ok(inner.games.contains_key(&id))
    }

    async fn list_game_ids(&self) -> Result<Vec<GameId>> {
        let inner = self.read()?;
        Ok(inner.games.keys().copied().collect())
    }
}
