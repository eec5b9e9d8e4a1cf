//! FEN-to-Board parser.
//!
//! Builds a fully-populated board from a Forsyth-Edwards Notation string,
//! including piece bitboards, rights, clocks, and occupancies. Shareable
//! links may drop the two clock fields; they default to `0 1`.

use thiserror::Error;

use crate::game_state::{board::Board, chess_types::*};
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("missing {0} in FEN")]
    MissingField(&'static str),
    #[error("FEN has extra trailing fields")]
    TrailingFields,
    #[error("board layout must contain 8 ranks, found {0}")]
    RankCount(usize),
    #[error("board rank {rank} does not sum to 8 files")]
    RankWidth { rank: usize },
    #[error("invalid piece character '{0}' in board layout")]
    InvalidPiece(char),
    #[error("invalid side-to-move field: {0}")]
    InvalidSide(String),
    #[error("invalid castling rights character: {0}")]
    InvalidCastling(char),
    #[error("invalid en-passant square: {0}")]
    InvalidEnPassant(String),
    #[error("invalid {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("each side needs exactly one king")]
    KingCount,
}

pub type FenResult<T> = Result<T, FenError>;

pub fn parse_fen(fen: &str) -> FenResult<Board> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::MissingField("board layout"))?;
    let side_part = parts.next().ok_or(FenError::MissingField("side to move"))?;
    let castling_part = parts.next().ok_or(FenError::MissingField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(FenError::MissingField("en-passant square"))?;
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(FenError::TrailingFields);
    }

    let mut board = Board::new_empty();

    parse_board(board_part, &mut board)?;
    board.side_to_move = parse_side_to_move(side_part)?;
    board.castling_rights = parse_castling_rights(castling_part)?;
    board.en_passant_square = parse_en_passant_square(en_passant_part)?;
    board.halfmove_clock = parse_number("halfmove clock", halfmove_part)?;
    board.fullmove_number = parse_number("fullmove number", fullmove_part)?;
    board.recalc_occupancy();

    for color in [Color::Light, Color::Dark] {
        if board.bitboard(color, PieceKind::King).count_ones() != 1 {
            return Err(FenError::KingCount);
        }
    }

    Ok(board)
}

fn parse_board(board_part: &str, board: &mut Board) -> FenResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::InvalidPiece(ch));
                }
                file += empty_count as usize;
                continue;
            }

            let (color, piece) = piece_from_fen_char(ch).ok_or(FenError::InvalidPiece(ch))?;
            if file >= 8 {
                return Err(FenError::RankWidth { rank: board_rank + 1 });
            }

            board.put_piece(color, piece, (board_rank * 8 + file) as Square);
            file += 1;
        }

        if file != 8 {
            return Err(FenError::RankWidth { rank: board_rank + 1 });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> FenResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(FenError::InvalidSide(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> FenResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        rights |= match ch {
            'K' => CASTLE_LIGHT_KINGSIDE,
            'Q' => CASTLE_LIGHT_QUEENSIDE,
            'k' => CASTLE_DARK_KINGSIDE,
            'q' => CASTLE_DARK_QUEENSIDE,
            _ => return Err(FenError::InvalidCastling(ch)),
        };
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> FenResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(|_| FenError::InvalidEnPassant(en_passant_part.to_owned()))
}

fn parse_number(field: &'static str, value: &str) -> FenResult<u16> {
    value.parse::<u16>().map_err(|_| FenError::InvalidNumber {
        field,
        value: value.to_owned(),
    })
}

pub(crate) fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let piece = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, piece))
}
