//! Square conversions for algebraic coordinates such as `e4`.

use thiserror::Error;

use crate::game_state::chess_types::Square;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgebraicError {
    #[error("invalid algebraic square: {0}")]
    InvalidSquare(String),
    #[error("square index out of bounds: {0}")]
    OutOfBounds(Square),
}

/// Convert algebraic notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, AlgebraicError> {
    let bytes = square.as_bytes();
    let invalid = || AlgebraicError::InvalidSquare(square.to_owned());
    if bytes.len() != 2 {
        return Err(invalid());
    }

    let (file, rank) = (bytes[0].to_ascii_lowercase(), bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(invalid());
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, AlgebraicError> {
    if square > 63 {
        return Err(AlgebraicError::OutOfBounds(square));
    }

    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + square / 8);
    Ok(format!("{file_char}{rank_char}"))
}
