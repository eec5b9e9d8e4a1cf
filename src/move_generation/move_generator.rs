use thiserror::Error;

use crate::game_state::chess_types::{Move, PositionRef, Square};

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveGenerationError {
    #[error("blocked move from {from} to {to} cannot be executed")]
    BlockedMove { from: Square, to: Square },
    #[error("no {expected} on from-square {from}")]
    PieceMismatch { from: Square, expected: String },
    #[error("invalid game state: {0}")]
    InvalidState(String),
}

/// A legal move together with the position it produces.
#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub mv: Move,
    pub result: PositionRef,
}

pub trait MoveGenerator: Send + Sync {
    /// Every executable move for the side to move, in a stable order:
    /// pawns, knights, bishops, rooks, queens, king, ascending origin square.
    fn generate_legal_moves(&self, position: &PositionRef) -> MoveGenResult<Vec<GeneratedMove>>;

    /// Every move of the piece on `square`, including `Blocked` ones.
    /// Empty when the square holds no piece of the side to move.
    fn piece_moves(&self, position: &PositionRef, square: Square) -> MoveGenResult<Vec<Move>>;
}
