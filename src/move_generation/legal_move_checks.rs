use crate::game_state::chess_types::*;
use crate::moves::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    let kings = board.bitboard(color, PieceKind::King);
    if kings == 0 {
        None
    } else {
        Some(kings.trailing_zeros() as Square)
    }
}

#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let them = |piece| board.bitboard(attacker_color, piece);

    // A pawn of the attacking color reaches `square` exactly when a pawn of
    // the defending color on `square` would attack the pawn.
    if pawn_attacks(attacker_color.opposite(), square) & them(PieceKind::Pawn) != 0 {
        return true;
    }
    if knight_attacks(square) & them(PieceKind::Knight) != 0 {
        return true;
    }
    if king_attacks(square) & them(PieceKind::King) != 0 {
        return true;
    }

    let diagonal = them(PieceKind::Bishop) | them(PieceKind::Queen);
    if bishop_attacks(square, board.occupancy_all) & diagonal != 0 {
        return true;
    }

    let straight = them(PieceKind::Rook) | them(PieceKind::Queen);
    rook_attacks(square, board.occupancy_all) & straight != 0
}
