//! Error types for chessdb core.

use thiserror::Error;

/// Errors raised when text does not decode into a domain value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("unknown color: {0:?}")]
    UnknownColor(String),

    #[error("unknown piece kind: {0:?}")]
    UnknownPieceKind(String),

    #[error("invalid position: {0:?}")]
    InvalidPosition(String),
}
