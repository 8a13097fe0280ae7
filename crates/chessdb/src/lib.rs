//! # chessdb
//!
//! The unified API for saving and resuming chess games.
//!
//! ## Overview
//!
//! chessdb sits between a chess rules engine and a web layer:
//!
//! - **Rules engine** → chessdb: the engine exposes its current board, turn,
//!   score and game-over flag through the [`GameState`] trait
//! - **chessdb** → storage: [`GameService`] persists that state through a
//!   [`GameStore`](store::GameStore)
//! - **chessdb** → web layer: every operation answers with a serde response
//!   DTO ready to be serialized
//!
//! chessdb never decides what a legal move is. It stores what it is given.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::collections::BTreeMap;
//! use chessdb::{BoardSnapshot, Color, GameService, GameState, ServiceConfig};
//! use chessdb::store::SqliteStore;
//!
//! struct Engine {
//!     board: BoardSnapshot,
//!     turn: Color,
//! }
//!
//! impl GameState for Engine {
//!     fn board(&self) -> BoardSnapshot {
//!         self.board.clone()
//!     }
//!     fn current_turn(&self) -> Color {
//!         self.turn
//!     }
//!     fn colors_score(&self) -> BTreeMap<Color, f64> {
//!         BTreeMap::new()
//!     }
//!     fn is_game_over(&self) -> bool {
//!         false
//!     }
//! }
//!
//! async fn example() {
//!     let store = SqliteStore::open("games.db").unwrap();
//!     let service = GameService::new(store, ServiceConfig::default());
//!
//!     let engine = Engine { board: BoardSnapshot::new(), turn: Color::White };
//!     let started = service.start_game(&engine).await.unwrap();
//!
//!     let resumed = service.resume_game(started.game_id).await.unwrap();
//!     assert_eq!(resumed.current_turn_color, Color::White);
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `chessdb::core` - Domain types and DTOs
//! - `chessdb::store` - Storage abstraction and SQLite

pub mod error;
pub mod service;

// Re-export component crates
pub use chessdb_core as core;
pub use chessdb_store as store;

// Re-export main types for convenience
pub use error::{ChessDbError, Result};
pub use service::{GameService, GameState, ServiceConfig};

// Re-export commonly used core types
pub use chessdb_core::{
    BoardDto, BoardSnapshot, Color, GameId, GameListResponse, GameSession, NewGameResponse, Piece,
    PieceDto, PieceKind, Position, RunningGameResponse,
};
