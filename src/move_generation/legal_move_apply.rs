use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};

/// Executes `mv` against `position`, producing the successor position. The
/// source position is left untouched and becomes the successor's `prev`.
pub fn apply_move(position: &PositionRef, mv: &Move) -> MoveGenResult<PositionRef> {
    let next = apply_move_to_board(position.board(), mv)?;
    Ok(Position::successor(next, position))
}

pub fn apply_move_to_board(board: &Board, mv: &Move) -> MoveGenResult<Board> {
    let from = mv.piece.square;
    let to = mv.to;
    let moving_color = mv.piece.color;

    if !mv.kind.is_executable() {
        return Err(MoveGenerationError::BlockedMove { from, to });
    }
    if moving_color != board.side_to_move
        || board.piece_of_color_on(moving_color, from) != Some(mv.piece.kind)
    {
        return Err(MoveGenerationError::PieceMismatch {
            from,
            expected: format!("{:?} {:?}", moving_color, mv.piece.kind),
        });
    }

    let mut next = board.clone();
    next.clear_square(from);

    if mv.kind == MoveKind::EnPassant {
        let capture_sq = match moving_color {
            Color::Light => to.checked_sub(8),
            Color::Dark => to.checked_add(8),
        }
        .ok_or_else(|| MoveGenerationError::InvalidState(format!("bad en-passant target {to}")))?;
        next.clear_square(capture_sq);
    }

    // Captured pieces on the destination are simply overwritten.
    next.clear_square(to);
    let placed = mv
        .kind
        .promotion()
        .map(PromotionPiece::piece_kind)
        .unwrap_or(mv.piece.kind);
    next.put_piece(moving_color, placed, to);

    if mv.is_castling() {
        let (rook_from, rook_to) = if to > from {
            (from + 3, from + 1)
        } else {
            (from - 4, from - 1)
        };
        next.clear_square(rook_from);
        next.put_piece(moving_color, PieceKind::Rook, rook_to);
    }

    update_castling_rights(&mut next, mv);

    next.en_passant_square = if mv.is_double_pawn_push() {
        Some((from + to) / 2)
    } else {
        None
    };

    if mv.piece.kind == PieceKind::Pawn || mv.kind.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Dark {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = moving_color.opposite();
    next.recalc_occupancy();

    Ok(next)
}

fn update_castling_rights(board: &mut Board, mv: &Move) {
    if mv.piece.kind == PieceKind::King {
        board.castling_rights &= match mv.piece.color {
            Color::Light => !(CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE),
            Color::Dark => !(CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE),
        };
    }

    // Moving a rook off, or capturing a rook on, a corner clears that right.
    for square in [mv.piece.square, mv.to] {
        board.castling_rights &= match square {
            0 => !CASTLE_LIGHT_QUEENSIDE,
            7 => !CASTLE_LIGHT_KINGSIDE,
            56 => !CASTLE_DARK_QUEENSIDE,
            63 => !CASTLE_DARK_KINGSIDE,
            _ => !0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_move, apply_move_to_board};
    use crate::game_state::chess_types::*;
    use crate::move_generation::move_generator::MoveGenerationError;

    fn pawn(color: Color, square: Square) -> PieceRef {
        PieceRef {
            color,
            kind: PieceKind::Pawn,
            square,
        }
    }

    #[test]
    fn double_push_sets_en_passant_and_keeps_source_intact() {
        let start = Position::new_game().expect("start position");
        let mv = Move {
            piece: pawn(Color::Light, 12),
            to: 28,
            kind: MoveKind::Ordinary,
        };
        let next = apply_move(&start, &mv).expect("e2e4 should apply");

        assert_eq!(next.board().en_passant_square, Some(20));
        assert_eq!(next.turn(), Color::Dark);
        assert_eq!(
            next.fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert!(std::sync::Arc::ptr_eq(next.prev().expect("prev link"), &start));
        assert_eq!(start.fen(), crate::game_state::chess_rules::STARTING_POSITION_FEN);
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("FEN");
        let mv = Move {
            piece: pawn(Color::Light, 36),
            to: 43,
            kind: MoveKind::EnPassant,
        };
        let next = apply_move_to_board(&board, &mv).expect("exd6 should apply");
        assert_eq!(next.piece_on(35), None);
        assert_eq!(next.piece_on(43), Some((Color::Light, PieceKind::Pawn)));
    }

    #[test]
    fn castling_moves_the_rook_and_clears_rights() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN");
        let mv = Move {
            piece: PieceRef {
                color: Color::Light,
                kind: PieceKind::King,
                square: 4,
            },
            to: 2,
            kind: MoveKind::Ordinary,
        };
        let next = apply_move_to_board(&board, &mv).expect("O-O-O should apply");
        assert_eq!(next.piece_on(3), Some((Color::Light, PieceKind::Rook)));
        assert_eq!(next.piece_on(0), None);
        assert_eq!(next.castling_rights, CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE);
    }

    #[test]
    fn promotion_places_the_chosen_piece() {
        let board = Board::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("FEN");
        let mv = Move {
            piece: pawn(Color::Light, 49),
            to: 57,
            kind: MoveKind::Promotion {
                piece: PromotionPiece::Knight,
                captured: None,
            },
        };
        let next = apply_move_to_board(&board, &mv).expect("b8=N should apply");
        assert_eq!(next.piece_on(57), Some((Color::Light, PieceKind::Knight)));
    }

    #[test]
    fn blocked_and_mismatched_moves_are_rejected() {
        let board = Board::new_game().expect("start");
        let blocked = Move {
            piece: pawn(Color::Light, 12),
            to: 20,
            kind: MoveKind::Blocked,
        };
        assert_eq!(
            apply_move_to_board(&board, &blocked),
            Err(MoveGenerationError::BlockedMove { from: 12, to: 20 })
        );

        let wrong_side = Move {
            piece: pawn(Color::Dark, 52),
            to: 44,
            kind: MoveKind::Ordinary,
        };
        assert!(matches!(
            apply_move_to_board(&board, &wrong_side),
            Err(MoveGenerationError::PieceMismatch { .. })
        ));
    }
}
