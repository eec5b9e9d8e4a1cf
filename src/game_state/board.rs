//! Bitboard piece placement and state flags for a single position.
//!
//! `Board` is a plain value: applying a move clones it into a new `Board`
//! rather than editing it, which keeps every `Position` immutable.

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::{parse_fen, FenResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl Board {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn new_game() -> FenResult<Self> {
        parse_fen(STARTING_POSITION_FEN)
    }

    #[inline]
    pub fn from_fen(fen: &str) -> FenResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn bitboard(&self, color: Color, piece: PieceKind) -> u64 {
        self.pieces[color.index()][piece.index()]
    }

    pub fn piece_on(&self, square: Square) -> Option<(Color, PieceKind)> {
        let mask = 1u64 << square;
        if self.occupancy_all & mask == 0 {
            return None;
        }
        for color in [Color::Light, Color::Dark] {
            for piece in PieceKind::ALL {
                if self.bitboard(color, piece) & mask != 0 {
                    return Some((color, piece));
                }
            }
        }
        None
    }

    #[inline]
    pub fn piece_of_color_on(&self, color: Color, square: Square) -> Option<PieceKind> {
        let mask = 1u64 << square;
        PieceKind::ALL
            .into_iter()
            .find(|piece| self.bitboard(color, *piece) & mask != 0)
    }

    pub fn put_piece(&mut self, color: Color, piece: PieceKind, square: Square) {
        self.pieces[color.index()][piece.index()] |= 1u64 << square;
    }

    pub fn clear_square(&mut self, square: Square) {
        let mask = !(1u64 << square);
        for color in self.pieces.iter_mut() {
            for bb in color.iter_mut() {
                *bb &= mask;
            }
        }
    }

    pub fn recalc_occupancy(&mut self) {
        for color in [Color::Light, Color::Dark] {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[0] | self.occupancy_by_color[1];
    }

    /// Half-moves since the nominal start of the game implied by the
    /// full-move number and side to move.
    pub fn ply(&self) -> u32 {
        let full = u32::from(self.fullmove_number.max(1)) - 1;
        full * 2 + u32::from(self.side_to_move == Color::Dark)
    }
}
