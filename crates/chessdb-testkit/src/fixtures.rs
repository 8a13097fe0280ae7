//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use chessdb_core::{BoardSnapshot, Color, GameId, Piece, PieceKind, Position};
use chessdb_store::{GameStore, MemoryStore, Result};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

fn square(file: u8, rank: u8) -> Position {
    Position::new(file, rank).expect("fixture squares are on the board")
}

/// The standard opening position, 32 pieces.
pub fn standard_board() -> BoardSnapshot {
    let mut board = BoardSnapshot::new();
    for (file, kind) in (0u8..).zip(BACK_RANK) {
        board.place(square(file, 0), Piece::white(kind));
        board.place(square(file, 1), Piece::white(PieceKind::Pawn));
        board.place(square(file, 6), Piece::black(PieceKind::Pawn));
        board.place(square(file, 7), Piece::black(kind));
    }
    board
}

/// Just the two kings on e1 and e8.
pub fn kings_only() -> BoardSnapshot {
    BoardSnapshot::new()
        .with(square(4, 0), Piece::white(PieceKind::King))
        .with(square(4, 7), Piece::black(PieceKind::King))
}

/// A test fixture with a memory store.
pub struct TestFixture {
    pub store: MemoryStore,
}

impl TestFixture {
    /// Create a new fixture with an empty store.
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }

    /// Save the opening position with white to move.
    pub async fn new_standard_game(&self) -> Result<GameId> {
        self.store.create(Color::White, &standard_board()).await
    }

    /// Save `count` kings-only games, returning their ids in creation order.
    pub async fn seed_games(&self, count: usize) -> Result<Vec<GameId>> {
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            ids.push(self.store.create(Color::White, &kings_only()).await?);
        }
        Ok(ids)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
