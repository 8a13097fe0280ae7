//! # chessdb Core
//!
//! Pure domain types for persisted chess games: colors, pieces, squares,
//! board snapshots, sessions, and the response DTOs the web layer serializes.
//!
//! This crate contains no I/O and no storage. It knows nothing about chess
//! rules either; a board here is just a set of (square, piece) facts.
//!
//! ## Key Types
//!
//! - [`GameId`] - Store-assigned identifier of a saved game
//! - [`Color`] - Whose turn it is, and which side a piece belongs to
//! - [`Piece`] - A (kind, color) pair
//! - [`Position`] - Algebraic square key (`"a1"`..`"h8"`)
//! - [`BoardSnapshot`] - Occupied squares of one game at one instant
//! - [`GameSession`] - Identifier, turn and board of a saved game
//!
//! ## Text Encoding
//!
//! Colors and piece kinds are stored and serialized by name (`"WHITE"`,
//! `"QUEEN"`); squares by their algebraic key. See [`piece`] and [`board`].

pub mod board;
pub mod dto;
pub mod error;
pub mod piece;
pub mod types;

pub use board::{BoardSnapshot, Position};
pub use dto::{BoardDto, GameListResponse, NewGameResponse, PieceDto, RunningGameResponse};
pub use error::CoreError;
pub use piece::{Color, Piece, PieceKind};
pub use types::{GameId, GameSession};
