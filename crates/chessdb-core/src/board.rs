//! Squares and board snapshots.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::piece::Piece;

/// An algebraic square key, `a1` through `h8`.
///
/// Ordered rank-major: `a1 < b1 < ... < h1 < a2 < ... < h8`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    // Field order drives the derived `Ord`.
    rank: u8,
    file: u8,
}

impl Position {
    /// Build from zero-based file (0 = `a`) and rank (0 = `1`).
    ///
    /// Returns `None` when either index is off the board.
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { rank, file })
        } else {
            None
        }
    }

    /// Zero-based file index.
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Zero-based rank index.
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// All 64 squares, rank-major.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Position { rank, file }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self)
    }
}

impl FromStr for Position {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidPosition(s.to_string());
        let &[file, rank] = s.as_bytes() else {
            return Err(invalid());
        };
        let file = file.to_ascii_lowercase();
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(invalid());
        }
        Position::new(file - b'a', rank - b'1').ok_or_else(invalid)
    }
}

/// The occupied squares of one game at one instant.
///
/// Empty squares are simply absent. A square holds at most one piece;
/// placing onto an occupied square replaces what was there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    squares: BTreeMap<Position, Piece>,
}

impl BoardSnapshot {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a piece, returning whatever occupied the square before.
    pub fn place(&mut self, position: Position, piece: Piece) -> Option<Piece> {
        self.squares.insert(position, piece)
    }

    /// Builder-style [`place`](Self::place).
    pub fn with(mut self, position: Position, piece: Piece) -> Self {
        self.place(position, piece);
        self
    }

    /// Clear a square.
    pub fn remove(&mut self, position: &Position) -> Option<Piece> {
        self.squares.remove(position)
    }

    pub fn get(&self, position: &Position) -> Option<&Piece> {
        self.squares.get(position)
    }

    /// Number of occupied squares.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Occupied squares in rank-major order.
    pub fn iter(&self) -> btree_map::Iter<'_, Position, Piece> {
        self.squares.iter()
    }
}

impl FromIterator<(Position, Piece)> for BoardSnapshot {
    fn from_iter<I: IntoIterator<Item = (Position, Piece)>>(iter: I) -> Self {
        Self {
            squares: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for BoardSnapshot {
    type Item = (Position, Piece);
    type IntoIter = btree_map::IntoIter<Position, Piece>;

    fn into_iter(self) -> Self::IntoIter {
        self.squares.into_iter()
    }
}

impl<'a> IntoIterator for &'a BoardSnapshot {
    type Item = (&'a Position, &'a Piece);
    type IntoIter = btree_map::Iter<'a, Position, Piece>;

    fn into_iter(self) -> Self::IntoIter {
        self.squares.iter()
    }
}
