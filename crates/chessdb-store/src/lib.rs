//! # chessdb Store
//!
//! Durable storage for chess game sessions. Provides a trait-based interface
//! with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! A saved game is one row in `game` (its turn) plus one row per occupied
//! square in `piece`. The [`GameStore`] trait hides that layout; callers
//! deal in [`GameSession`](chessdb_core::GameSession) and
//! [`BoardSnapshot`](chessdb_core::BoardSnapshot) values.
//!
//! ## Key Types
//!
//! - [`GameStore`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`SqliteConfig`] - Connection tuning for [`SqliteStore`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chessdb_core::{BoardSnapshot, Color, Piece, PieceKind};
//! use chessdb_store::{GameStore, SqliteStore};
//!
//! async fn example() {
//!     let store = SqliteStore::open("games.db").unwrap();
//!
//!     let board = BoardSnapshot::new()
//!         .with("e1".parse().unwrap(), Piece::white(PieceKind::King))
//!         .with("e8".parse().unwrap(), Piece::black(PieceKind::King));
//!
//!     let id = store.create(Color::White, &board).await.unwrap();
//!     let session = store.load(id).await.unwrap();
//!     assert_eq!(session.board, board);
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Store-assigned ids**: identifiers come from SQLite `AUTOINCREMENT`
//! - **Atomic writes**: create, board replacement and delete each run in one transaction
//! - **Existence vs. emptiness**: a game with no pieces loads as an empty board,
//!   an unknown id fails with [`StoreError::NoSavedGame`]
//! - **Idempotent delete**: deleting an unknown id is a no-op

pub mod config;
pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use config::{JournalMode, SqliteConfig};
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{GameStore, GameStoreExt};
