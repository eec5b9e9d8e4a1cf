//! Static position evaluation.
//!
//! Every score here is from Light's fixed perspective (positive favours
//! Light). Search multiplies by the mover's `value_mult` before comparing.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::{has_legal_move, is_check};
use crate::moves::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
};

/// Magnitude of a checkmate score before the ply discount.
pub const MATE_VALUE: f64 = 1_000_000.0;

pub trait BoardScorer: Send + Sync {
    /// Score of a board with legal moves remaining, Light minus Dark.
    fn score(&self, board: &Board) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    #[inline]
    fn material_balance_light_minus_dark(board: &Board) -> i32 {
        PieceKind::ALL
            .iter()
            .map(|&piece| {
                let light = board.bitboard(Color::Light, piece).count_ones() as i32;
                let dark = board.bitboard(Color::Dark, piece).count_ones() as i32;
                (light - dark) * Self::piece_value(piece)
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board) -> f64 {
        f64::from(Self::material_balance_light_minus_dark(board))
    }
}

/// Material plus piece-square placement plus mobility.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalScorer;

impl PositionalScorer {
    const MOBILITY_WEIGHT: i32 = 2;

    fn positional_term(board: &Board) -> i32 {
        let mut score = 0i32;
        for color in [Color::Light, Color::Dark] {
            let sign = color.value_mult() as i32;
            for piece in PieceKind::ALL {
                let mut bb = board.bitboard(color, piece);
                while bb != 0 {
                    let sq = bb.trailing_zeros() as Square;
                    score += sign * piece_square_bonus(piece, color, sq);
                    bb &= bb - 1;
                }
            }
        }
        score
    }

    fn mobility_term(board: &Board) -> i32 {
        let light = mobility_for_color(board, Color::Light);
        let dark = mobility_for_color(board, Color::Dark);
        (light - dark) * Self::MOBILITY_WEIGHT
    }
}

impl BoardScorer for PositionalScorer {
    fn score(&self, board: &Board) -> f64 {
        let material = MaterialScorer::material_balance_light_minus_dark(board);
        f64::from(material + Self::positional_term(board) + Self::mobility_term(board))
    }
}

/// Evaluates `position` with the material-only (`full == false`) or the
/// positional (`full == true`) scorer.
///
/// A side to move with no legal moves is scored before the scorer runs:
/// checkmate is worth `MATE_VALUE - ply` to the winner, so earlier mates
/// dominate later ones, and stalemate is a dead draw at zero.
pub fn static_value(position: &Position, full: bool) -> f64 {
    let board = position.board();
    if !has_legal_move(board) {
        if !is_check(board) {
            return 0.0;
        }
        let mate = MATE_VALUE - f64::from(position.ply());
        // The side to move is the one mated.
        return -board.side_to_move.value_mult() * mate;
    }

    if full {
        PositionalScorer.score(board)
    } else {
        MaterialScorer.score(board)
    }
}

fn mobility_for_color(board: &Board, color: Color) -> i32 {
    let occ = board.occupancy_all;
    let own_occ = board.occupancy_by_color[color.index()];
    let mut m = 0i32;

    for piece in PieceKind::ALL {
        let mut bb = board.bitboard(color, piece);
        while bb != 0 {
            let sq = bb.trailing_zeros() as Square;
            let reach = match piece {
                PieceKind::Pawn => pawn_attacks(color, sq),
                PieceKind::Knight => knight_attacks(sq),
                PieceKind::Bishop => bishop_attacks(sq, occ),
                PieceKind::Rook => rook_attacks(sq, occ),
                PieceKind::Queen => queen_attacks(sq, occ),
                PieceKind::King => king_attacks(sq),
            };
            m += (reach & !own_occ).count_ones() as i32;
            bb &= bb - 1;
        }
    }

    m
}

fn piece_square_bonus(piece: PieceKind, color: Color, sq: Square) -> i32 {
    let rank = (sq / 8) as i32;
    let file = (sq % 8) as i32;
    let r = match color {
        Color::Light => rank,
        Color::Dark => 7 - rank,
    };
    let dist_center = (file - 3).abs() + (r - 3).abs();
    let center_bonus = 4 - dist_center;

    match piece {
        PieceKind::Pawn => r * 8 - (file - 3).abs() * 2,
        PieceKind::Knight => center_bonus * 6,
        PieceKind::Bishop => center_bonus * 4 + r,
        PieceKind::Rook => r * 2,
        PieceKind::Queen => center_bonus * 2,
        PieceKind::King => {
            // Back-rank king prefers the wings.
            if r <= 1 {
                8 - (file - 4).abs() * 2
            } else {
                -center_bonus * 4
            }
        }
    }
}
