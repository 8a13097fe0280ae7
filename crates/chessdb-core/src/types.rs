//! Identifier and session types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::BoardSnapshot;
use crate::piece::Color;

/// Identifier of a saved game.
///
/// Assigned by the backing store when the game is first saved, never by
/// the caller, and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub i64);

impl GameId {
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for GameId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A saved game as the store hands it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub id: GameId,
    /// Whose move is next.
    pub turn: Color,
    pub board: BoardSnapshot,
}
