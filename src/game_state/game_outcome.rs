//! Classifies a position after every executed move.

use std::fmt;

use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVES;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::{has_legal_move, is_check};

/// Why a game ended without a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaleReason {
    NoLegalMoves,
    InsufficientMaterial,
    FiftyMoveRule,
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StaleReason::NoLegalMoves => "No legal moves.",
            StaleReason::InsufficientMaterial => "Insufficient material.",
            StaleReason::FiftyMoveRule => "Fifty moves without a capture or pawn move.",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    Ongoing,
    Check,
    Checkmate,
    Stalemate(StaleReason),
}

impl GameOutcome {
    #[inline]
    pub const fn is_game_over(self) -> bool {
        matches!(self, GameOutcome::Checkmate | GameOutcome::Stalemate(_))
    }
}

/// The evaluator's view of one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub outcome: GameOutcome,
    /// Side to move in the evaluated position.
    pub turn: Color,
    pub turn_num: u16,
}

impl GameReport {
    /// The announcement shown to the players, if the position warrants one.
    pub fn describe(&self) -> Option<String> {
        // The side that just moved is the opposite of `turn`.
        let mover = self.turn.opposite().name();
        match self.outcome {
            GameOutcome::Checkmate => Some(format!(
                "{mover} won by checkmate in {} turns.",
                self.turn_num
            )),
            GameOutcome::Stalemate(reason) => Some(format!(
                "{reason} {mover} has entered stalemate in {} turns.",
                self.turn_num
            )),
            GameOutcome::Check => Some(format!("{} is in check.", self.turn.name())),
            GameOutcome::Ongoing => None,
        }
    }
}

/// Derives the outcome of `position`. Checkmate outranks every stalemate
/// reason, which in turn outranks a plain check.
pub fn evaluate(position: &Position) -> GameReport {
    let board = position.board();
    let is_check = is_check(board);
    let can_move = has_legal_move(board);
    let is_checkmate = is_check && !can_move;

    let stale_reason = if is_checkmate {
        None
    } else if !can_move {
        Some(StaleReason::NoLegalMoves)
    } else if is_insufficient_material(board) {
        Some(StaleReason::InsufficientMaterial)
    } else if board.halfmove_clock >= FIFTY_MOVE_HALFMOVES {
        Some(StaleReason::FiftyMoveRule)
    } else {
        None
    };

    let outcome = match (is_checkmate, stale_reason, is_check) {
        (true, _, _) => GameOutcome::Checkmate,
        (false, Some(reason), _) => GameOutcome::Stalemate(reason),
        (false, None, true) => GameOutcome::Check,
        (false, None, false) => GameOutcome::Ongoing,
    };

    GameReport {
        is_check,
        is_checkmate,
        is_stalemate: stale_reason.is_some(),
        outcome,
        turn: position.turn(),
        turn_num: position.turn_num(),
    }
}

/// Bare kings, or a lone bishop or knight against a bare king.
pub fn is_insufficient_material(board: &Board) -> bool {
    let heavy_or_pawn = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen]
        .iter()
        .any(|&piece| {
            board.bitboard(Color::Light, piece) | board.bitboard(Color::Dark, piece) != 0
        });
    if heavy_or_pawn {
        return false;
    }

    let minors = [Color::Light, Color::Dark]
        .iter()
        .map(|&color| {
            (board.bitboard(color, PieceKind::Knight) | board.bitboard(color, PieceKind::Bishop))
                .count_ones()
        })
        .sum::<u32>();
    minors <= 1
}
