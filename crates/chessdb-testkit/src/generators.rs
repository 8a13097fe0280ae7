//! Proptest generators for property-based testing.

use proptest::prelude::*;

use chessdb_core::{BoardSnapshot, Color, Piece, PieceKind, Position};

/// Generate a Color.
pub fn color() -> impl Strategy<Value = Color> {
    prop_oneof![Just(Color::White), Just(Color::Black)]
}

/// Generate a PieceKind.
pub fn piece_kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

/// Generate a Piece.
pub fn piece() -> impl Strategy<Value = Piece> {
    (piece_kind(), color()).prop_map(|(kind, color)| Piece::new(kind, color))
}

/// Generate a square anywhere on the board.
pub fn position() -> impl Strategy<Value = Position> {
    (0u8..8, 0u8..8).prop_map(|(file, rank)| {
        Position::new(file, rank).expect("file and rank are generated in range")
    })
}

/// Generate a board with at most `max_pieces` occupied squares.
///
/// Includes the empty board.
pub fn board(max_pieces: usize) -> impl Strategy<Value = BoardSnapshot> {
    prop::collection::btree_map(position(), piece(), 0..=max_pieces.min(64))
        .prop_map(|squares| squares.into_iter().collect())
}
