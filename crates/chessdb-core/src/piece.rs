//! Colors, piece kinds and pieces.
//!
//! Both enums are closed sets. Their text form is the uppercase variant
//! name, which is what the store writes into the `turn`, `name` and `color`
//! columns and what the DTOs carry over the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors, white first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// The stored name: `"WHITE"` or `"BLACK"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Color::White => "WHITE",
            Color::Black => "BLACK",
        }
    }

    /// The other side.
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("WHITE") {
            Ok(Color::White)
        } else if s.eq_ignore_ascii_case("BLACK") {
            Ok(Color::Black)
        } else {
            Err(CoreError::UnknownColor(s.to_string()))
        }
    }
}

/// The kind of a chess piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Every kind, in declaration order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// The stored name, e.g. `"KNIGHT"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            PieceKind::Pawn => "PAWN",
            PieceKind::Rook => "ROOK",
            PieceKind::Knight => "KNIGHT",
            PieceKind::Bishop => "BISHOP",
            PieceKind::Queen => "QUEEN",
            PieceKind::King => "KING",
        }
    }

    /// Lowercase FEN letter.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PieceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownPieceKind(s.to_string()))
    }
}

/// A piece placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    pub const fn white(kind: PieceKind) -> Self {
        Self::new(kind, Color::White)
    }

    pub const fn black(kind: PieceKind) -> Self {
        Self::new(kind, Color::Black)
    }

    /// Decode from the stored `(name, color)` column pair.
    pub fn parse(name: &str, color: &str) -> Result<Self, CoreError> {
        Ok(Self::new(name.parse()?, color.parse()?))
    }
}

/// FEN letter: uppercase for white, lowercase for black.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.kind.letter();
        match self.color {
            Color::White => write!(f, "{}", letter.to_ascii_uppercase()),
            Color::Black => write!(f, "{}", letter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_names() {
        assert_eq!(Color::White.to_string(), "WHITE");
        assert_eq!("black".parse::<Color>().unwrap(), Color::Black);
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(
            "GREEN".parse::<Color>(),
            Err(CoreError::UnknownColor("GREEN".to_string()))
        );
    }

    #[test]
    fn test_piece_kind_names() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.as_str().parse::<PieceKind>().unwrap(), kind);
        }
        assert_eq!("Queen".parse::<PieceKind>().unwrap(), PieceKind::Queen);
        assert!("AMAZON".parse::<PieceKind>().is_err());
    }

    #[test]
    fn test_piece_parse_and_display() {
        let piece = Piece::parse("KNIGHT", "WHITE").unwrap();
        assert_eq!(piece, Piece::white(PieceKind::Knight));
        assert_eq!(piece.to_string(), "N");
        assert_eq!(Piece::black(PieceKind::King).to_string(), "k");

        assert!(matches!(
            Piece::parse("KING", "PURPLE"),
            Err(CoreError::UnknownColor(_))
        ));
    }

    #[test]
    fn test_color_serde() {
        let json = serde_json::to_string(&Color::Black).unwrap();
        assert_eq!(json, "\"BLACK\"");
        let color: Color = serde_json::from_str("\"WHITE\"").unwrap();
        assert_eq!(color, Color::White);
    }
}
