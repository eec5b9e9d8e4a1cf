//! Full legal move generation pipeline.
//!
//! Generates pseudo-legal moves piece by piece, applies each candidate and
//! drops (or, for the per-piece view, marks `Blocked`) any move that leaves
//! the mover's own king attacked.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move_to_board;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::move_generation::pseudo_moves::generate_piece_pseudo_moves;

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, position: &PositionRef) -> MoveGenResult<Vec<GeneratedMove>> {
        let board = position.board();
        let pseudo = all_pseudo_moves(board);
        let mut legal = Vec::with_capacity(pseudo.len());

        for mv in pseudo {
            let next = apply_move_to_board(board, &mv)?;
            if is_king_in_check(&next, mv.piece.color) {
                continue;
            }
            legal.push(GeneratedMove {
                mv,
                result: Position::successor(next, position),
            });
        }

        Ok(legal)
    }

    fn piece_moves(&self, position: &PositionRef, square: Square) -> MoveGenResult<Vec<Move>> {
        let board = position.board();
        let mut pseudo = Vec::new();
        generate_piece_pseudo_moves(board, square, &mut pseudo);

        pseudo
            .into_iter()
            .map(|mv| {
                let next = apply_move_to_board(board, &mv)?;
                Ok(if is_king_in_check(&next, mv.piece.color) {
                    Move {
                        kind: MoveKind::Blocked,
                        ..mv
                    }
                } else {
                    mv
                })
            })
            .collect()
    }
}

fn all_pseudo_moves(board: &Board) -> Vec<Move> {
    let side = board.side_to_move;
    let mut pseudo = Vec::with_capacity(64);

    for piece in PieceKind::ALL {
        let mut bb = board.bitboard(side, piece);
        while bb != 0 {
            generate_piece_pseudo_moves(board, bb.trailing_zeros() as Square, &mut pseudo);
            bb &= bb - 1;
        }
    }

    pseudo
}

/// True when the side to move has at least one legal move. Stops at the
/// first one found.
pub fn has_legal_move(board: &Board) -> bool {
    all_pseudo_moves(board).iter().any(|mv| {
        apply_move_to_board(board, mv)
            .map(|next| !is_king_in_check(&next, mv.piece.color))
            .unwrap_or(false)
    })
}

#[inline]
pub fn is_check(board: &Board) -> bool {
    is_king_in_check(board, board.side_to_move)
}

pub fn is_checkmate(board: &Board) -> bool {
    is_check(board) && !has_legal_move(board)
}

/// No legal move while not in check.
pub fn is_stalemate(board: &Board) -> bool {
    !is_check(board) && !has_legal_move(board)
}
