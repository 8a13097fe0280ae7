//! Response DTOs handed to the web layer.
//!
//! Field names are camelCase on the wire. Boards travel as a JSON object
//! keyed by square (`{"e1": {"name": "KING", "color": "WHITE"}}`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::board::{BoardSnapshot, Position};
use crate::error::CoreError;
use crate::piece::{Color, Piece};
use crate::types::{GameId, GameSession};

/// A piece as it appears on the wire.
///
/// Fields stay textual so that a malformed incoming board still
/// deserializes and can be rejected with a precise [`CoreError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceDto {
    pub name: String,
    pub color: String,
}

impl From<Piece> for PieceDto {
    fn from(piece: Piece) -> Self {
        Self {
            name: piece.kind.as_str().to_string(),
            color: piece.color.as_str().to_string(),
        }
    }
}

impl TryFrom<&PieceDto> for Piece {
    type Error = CoreError;

    fn try_from(dto: &PieceDto) -> Result<Self, Self::Error> {
        Piece::parse(&dto.name, &dto.color)
    }
}

/// A board as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardDto(pub BTreeMap<String, PieceDto>);

impl From<&BoardSnapshot> for BoardDto {
    fn from(board: &BoardSnapshot) -> Self {
        Self(
            board
                .iter()
                .map(|(position, piece)| (position.to_string(), PieceDto::from(*piece)))
                .collect(),
        )
    }
}

impl TryFrom<&BoardDto> for BoardSnapshot {
    type Error = CoreError;

    /// Fails on the first unparseable square or piece.
    ///
    /// Keys that name the same square in different case (`"e1"`, `"E1"`)
    /// collapse to one entry; the later key in map order wins.
    fn try_from(dto: &BoardDto) -> Result<Self, Self::Error> {
        dto.0
            .iter()
            .map(|(key, piece)| -> Result<(Position, Piece), CoreError> {
                Ok((key.parse()?, Piece::try_from(piece)?))
            })
            .collect()
    }
}

/// Response to starting a new game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGameResponse {
    pub game_id: GameId,
    pub chess_board: BoardDto,
    pub current_turn_color: Color,
    /// Material score per side, as computed by the rules engine.
    pub colors_score: BTreeMap<Color, f64>,
}

impl NewGameResponse {
    pub fn new(
        game_id: GameId,
        board: &BoardSnapshot,
        current_turn_color: Color,
        colors_score: BTreeMap<Color, f64>,
    ) -> Self {
        Self {
            game_id,
            chess_board: BoardDto::from(board),
            current_turn_color,
            colors_score,
        }
    }
}

/// Response carrying the state of a game in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningGameResponse {
    pub chess_board: BoardDto,
    pub current_turn_color: Color,
    pub is_game_over: bool,
}

impl RunningGameResponse {
    pub fn new(board: &BoardSnapshot, current_turn_color: Color, is_game_over: bool) -> Self {
        Self {
            chess_board: BoardDto::from(board),
            current_turn_color,
            is_game_over,
        }
    }
}

/// A resumed game is by definition still running.
impl From<&GameSession> for RunningGameResponse {
    fn from(session: &GameSession) -> Self {
        Self::new(&session.board, session.turn, false)
    }
}

/// Identifiers of every saved game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameListResponse {
    pub game_ids: Vec<GameId>,
}
