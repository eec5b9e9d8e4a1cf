//! Pseudo-legal move generation for a single piece.
//!
//! Moves produced here obey piece geometry, occupancy, castling rights and
//! the en-passant target, but may still leave the mover's king attacked.
//! The legal generator filters (or marks `Blocked`) those afterwards.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::attack_tables::{pawn_attacks, piece_attacks};

/// Appends the pseudo-legal moves of the side-to-move piece on `from`.
pub fn generate_piece_pseudo_moves(board: &Board, from: Square, out: &mut Vec<Move>) {
    let side = board.side_to_move;
    let Some(kind) = board.piece_of_color_on(side, from) else {
        return;
    };
    let piece = PieceRef {
        color: side,
        kind,
        square: from,
    };

    match kind {
        PieceKind::Pawn => generate_pawn_moves(board, piece, out),
        PieceKind::King => {
            generate_stepping_moves(board, piece, out);
            generate_castling_moves(board, piece, out);
        }
        _ => generate_stepping_moves(board, piece, out),
    }
}

/// Knight, bishop, rook, queen and plain king moves.
fn generate_stepping_moves(board: &Board, piece: PieceRef, out: &mut Vec<Move>) {
    let own_occ = board.occupancy_by_color[piece.color.index()];
    let enemy = piece.color.opposite();

    let mut targets =
        piece_attacks(piece.kind, piece.color, piece.square, board.occupancy_all) & !own_occ;
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        let kind = match board.piece_of_color_on(enemy, to) {
            Some(captured) => MoveKind::Capture(captured),
            None => MoveKind::Ordinary,
        };
        out.push(Move { piece, to, kind });
        targets &= targets - 1;
    }
}

fn generate_pawn_moves(board: &Board, piece: PieceRef, out: &mut Vec<Move>) {
    let from = piece.square;
    let (forward, start_rank, promotion_rank): (i16, u8, u8) = match piece.color {
        Color::Light => (8, 1, 7),
        Color::Dark => (-8, 6, 0),
    };
    let empty = !board.occupancy_all;

    let one_step = i16::from(from) + forward;
    if (0..64).contains(&one_step) && empty & (1u64 << one_step) != 0 {
        let to = one_step as Square;
        if to / 8 == promotion_rank {
            push_promotions(piece, to, None, out);
        } else {
            out.push(Move {
                piece,
                to,
                kind: MoveKind::Ordinary,
            });

            let two_step = one_step + forward;
            if from / 8 == start_rank && empty & (1u64 << two_step) != 0 {
                out.push(Move {
                    piece,
                    to: two_step as Square,
                    kind: MoveKind::Ordinary,
                });
            }
        }
    }

    let enemy = piece.color.opposite();
    let mut attacks = pawn_attacks(piece.color, from);
    while attacks != 0 {
        let to = attacks.trailing_zeros() as Square;
        if let Some(captured) = board.piece_of_color_on(enemy, to) {
            if to / 8 == promotion_rank {
                push_promotions(piece, to, Some(captured), out);
            } else {
                out.push(Move {
                    piece,
                    to,
                    kind: MoveKind::Capture(captured),
                });
            }
        } else if board.en_passant_square == Some(to) {
            out.push(Move {
                piece,
                to,
                kind: MoveKind::EnPassant,
            });
        }
        attacks &= attacks - 1;
    }
}

fn push_promotions(piece: PieceRef, to: Square, captured: Option<PieceKind>, out: &mut Vec<Move>) {
    for promotion in PromotionPiece::ALL {
        out.push(Move {
            piece,
            to,
            kind: MoveKind::Promotion {
                piece: promotion,
                captured,
            },
        });
    }
}

fn generate_castling_moves(board: &Board, king: PieceRef, out: &mut Vec<Move>) {
    let enemy = king.color.opposite();
    let (home, kingside, queenside) = match king.color {
        Color::Light => (4u8, CASTLE_LIGHT_KINGSIDE, CASTLE_LIGHT_QUEENSIDE),
        Color::Dark => (60u8, CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE),
    };

    if king.square != home || board.castling_rights & (kingside | queenside) == 0 {
        return;
    }

    // Cannot castle out of check.
    if is_square_attacked(board, home, enemy) {
        return;
    }

    let rook = board.bitboard(king.color, PieceKind::Rook);
    let free = |squares: &[Square]| squares.iter().all(|sq| board.occupancy_all & (1u64 << *sq) == 0);
    let safe = |squares: &[Square]| squares.iter().all(|sq| !is_square_attacked(board, *sq, enemy));

    if board.castling_rights & kingside != 0
        && rook & (1u64 << (home + 3)) != 0
        && free(&[home + 1, home + 2])
        && safe(&[home + 1, home + 2])
    {
        out.push(Move {
            piece: king,
            to: home + 2,
            kind: MoveKind::Ordinary,
        });
    }

    if board.castling_rights & queenside != 0
        && rook & (1u64 << (home - 4)) != 0
        && free(&[home - 1, home - 2, home - 3])
        && safe(&[home - 1, home - 2])
    {
        out.push(Move {
            piece: king,
            to: home - 2,
            kind: MoveKind::Ordinary,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::generate_piece_pseudo_moves;
    use crate::game_state::chess_types::*;

    fn moves_from(fen: &str, from: Square) -> Vec<Move> {
        let board = Board::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_piece_pseudo_moves(&board, from, &mut out);
        out
    }

    #[test]
    fn starting_pawn_has_single_and_double_push() {
        let moves = moves_from(crate::game_state::chess_rules::STARTING_POSITION_FEN, 12);
        let targets: Vec<Square> = moves.iter().map(|m| m.to).collect();
        assert_eq!(targets, vec![20, 28]);
    }

    #[test]
    fn pawn_on_seventh_rank_offers_four_promotions() {
        let moves = moves_from("3rk3/2P5/8/8/8/8/8/4K3 w - - 0 1", 50);
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|m| m.kind.promotion().is_some()));
        assert_eq!(moves.iter().filter(|m| m.kind.is_capture()).count(), 4);
    }

    #[test]
    fn en_passant_target_is_offered() {
        let moves = moves_from(
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
            36,
        );
        assert!(moves
            .iter()
            .any(|m| m.to == 43 && m.kind == MoveKind::EnPassant));
    }

    #[test]
    fn castling_requires_empty_and_safe_path() {
        let both = moves_from("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", 4);
        assert!(both.iter().any(|m| m.to == 6));
        assert!(both.iter().any(|m| m.to == 2));

        // Dark rook on f8 covers f1.
        let attacked = moves_from("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1", 4);
        assert!(!attacked.iter().any(|m| m.to == 6));
        assert!(attacked.iter().any(|m| m.to == 2));
    }

    #[test]
    fn squares_without_own_piece_produce_nothing() {
        let start = crate::game_state::chess_rules::STARTING_POSITION_FEN;
        assert!(moves_from(start, 27).is_empty());
        assert!(moves_from(start, 52).is_empty());
    }
}
