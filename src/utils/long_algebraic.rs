//! Coordinate move notation (`e2e4`, `e7e8q`) for terminal input and logs.

use thiserror::Error;

use crate::game_state::chess_types::*;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic, AlgebraicError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("invalid long algebraic move: {0}")]
    InvalidLength(String),
    #[error(transparent)]
    Square(#[from] AlgebraicError),
    #[error("invalid promotion piece character: {0}")]
    InvalidPromotion(char),
}

/// A move as typed by a player: origin, destination and an optional
/// promotion choice. Legality is decided by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInput {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PromotionPiece>,
}

pub fn parse_long_algebraic(text: &str) -> Result<MoveInput, NotationError> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(NotationError::InvalidLength(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        Some(ch) => Some(
            PromotionPiece::from_name(&ch.to_string()).ok_or(NotationError::InvalidPromotion(ch))?,
        ),
        None => None,
    };

    Ok(MoveInput {
        from,
        to,
        promotion,
    })
}

pub fn move_to_long_algebraic(mv: &Move) -> Result<String, NotationError> {
    let mut out = square_to_algebraic(mv.from())?;
    out.push_str(&square_to_algebraic(mv.to)?);
    if let Some(piece) = mv.kind.promotion() {
        out.push(piece.suffix());
    }
    Ok(out)
}
