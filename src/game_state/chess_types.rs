//! Shared chess vocabulary types.
//!
//! Colors, piece kinds, squares and the move model used by every other
//! subsystem. Squares use `0 == a1`, `7 == h1`, `63 == h8`.

pub use crate::game_state::board::Board;
pub use crate::game_state::position::{Position, PositionRef};

/// Side to move. `Light` is the first color and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// +1 for Light, -1 for Dark. Reorients Light-perspective values.
    #[inline]
    pub const fn value_mult(self) -> f64 {
        match self {
            Color::Light => 1.0,
            Color::Dark => -1.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Light => "White",
            Color::Dark => "Black",
        }
    }

    /// Single-letter code used by FEN and shareable links.
    pub const fn code(self) -> char {
        match self {
            Color::Light => 'w',
            Color::Dark => 'b',
        }
    }
}

/// Piece kind (color is represented separately for cache-friendly layouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }
}

/// Pieces a pawn may promote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionPiece {
    Rook,
    Bishop,
    Knight,
    Queen,
}

impl PromotionPiece {
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Rook,
        PromotionPiece::Bishop,
        PromotionPiece::Knight,
        PromotionPiece::Queen,
    ];

    #[inline]
    pub const fn piece_kind(self) -> PieceKind {
        match self {
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Knight => PieceKind::Knight,
            PromotionPiece::Queen => PieceKind::Queen,
        }
    }

    /// Parses the names offered by the promotion prompt ("rook", "bishop",
    /// "knight", "queen") as well as the long algebraic suffix letters.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rook" | "r" => Some(PromotionPiece::Rook),
            "bishop" | "b" => Some(PromotionPiece::Bishop),
            "knight" | "n" => Some(PromotionPiece::Knight),
            "queen" | "q" => Some(PromotionPiece::Queen),
            _ => None,
        }
    }

    pub const fn suffix(self) -> char {
        match self {
            PromotionPiece::Rook => 'r',
            PromotionPiece::Bishop => 'b',
            PromotionPiece::Knight => 'n',
            PromotionPiece::Queen => 'q',
        }
    }
}

pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;
pub type CastlingRights = u8;

/// Board square index (`0..=63`).
pub type Square = u8;

/// The piece a move belongs to, with its origin square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRef {
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
}

/// Legality class of a move. `Blocked` marks a move the piece could make
/// geometrically but which would leave its own king attacked; it is shown
/// to the player and never executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Ordinary,
    Blocked,
    Capture(PieceKind),
    EnPassant,
    Promotion {
        piece: PromotionPiece,
        captured: Option<PieceKind>,
    },
}

impl MoveKind {
    #[inline]
    pub const fn is_executable(self) -> bool {
        !matches!(self, MoveKind::Blocked)
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            MoveKind::Capture(_)
                | MoveKind::EnPassant
                | MoveKind::Promotion {
                    captured: Some(_),
                    ..
                }
        )
    }

    #[inline]
    pub const fn promotion(self) -> Option<PromotionPiece> {
        match self {
            MoveKind::Promotion { piece, .. } => Some(piece),
            _ => None,
        }
    }
}

/// A proposed transition out of one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece: PieceRef,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    #[inline]
    pub const fn from(&self) -> Square {
        self.piece.square
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        matches!(self.piece.kind, PieceKind::King) && self.piece.square.abs_diff(self.to) == 2
    }

    #[inline]
    pub const fn is_double_pawn_push(&self) -> bool {
        matches!(self.piece.kind, PieceKind::Pawn) && self.piece.square.abs_diff(self.to) == 16
    }
}
