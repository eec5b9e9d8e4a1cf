//! Immutable position snapshots linked into a history chain.

use std::sync::Arc;

use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::utils::fen_parser::FenResult;

/// Shared handle to a position. Positions are never mutated after
/// construction, so handles are cloned freely across history and search.
pub type PositionRef = Arc<Position>;

#[derive(Debug)]
pub struct Position {
    board: Board,
    prev: Option<PositionRef>,
}

impl Position {
    /// A root position with no predecessor.
    pub fn root(board: Board) -> PositionRef {
        Arc::new(Self { board, prev: None })
    }

    /// A position reached from `prev` by one executed move.
    pub fn successor(board: Board, prev: &PositionRef) -> PositionRef {
        Arc::new(Self {
            board,
            prev: Some(Arc::clone(prev)),
        })
    }

    pub fn new_game() -> FenResult<PositionRef> {
        Ok(Self::root(Board::new_game()?))
    }

    pub fn from_fen(fen: &str) -> FenResult<PositionRef> {
        Ok(Self::root(Board::from_fen(fen)?))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn prev(&self) -> Option<&PositionRef> {
        self.prev.as_ref()
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.board.side_to_move
    }

    #[inline]
    pub fn turn_num(&self) -> u16 {
        self.board.fullmove_number
    }

    #[inline]
    pub fn ply(&self) -> u32 {
        self.board.ply()
    }

    #[inline]
    pub fn fen(&self) -> String {
        self.board.fen()
    }
}

/// Positions compare by board contents; the history link is ignored.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
    }
}

impl Eq for Position {}
