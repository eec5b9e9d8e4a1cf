//! Undo/redo cursor over the position chain.
//!
//! Backward steps follow each position's `prev` link; forward steps come
//! from a redo stack of positions undone since the last recorded move.

use std::sync::Arc;

use thiserror::Error;

use crate::game_state::chess_types::PositionRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}

pub type HistoryResult<T> = Result<T, HistoryError>;

#[derive(Debug, Clone)]
pub struct GameHistory {
    current: PositionRef,
    redo_stack: Vec<PositionRef>,
}

impl GameHistory {
    pub fn new(start: PositionRef) -> Self {
        Self {
            current: start,
            redo_stack: Vec::new(),
        }
    }

    #[inline]
    pub fn current(&self) -> &PositionRef {
        &self.current
    }

    /// Makes `position` current. Any undone positions are discarded since
    /// the timeline has forked.
    pub fn record(&mut self, position: PositionRef) {
        self.current = position;
        self.redo_stack.clear();
    }

    pub fn undo(&mut self) -> HistoryResult<&PositionRef> {
        let prev = self
            .current
            .prev()
            .map(Arc::clone)
            .ok_or(HistoryError::NothingToUndo)?;
        let undone = std::mem::replace(&mut self.current, prev);
        self.redo_stack.push(undone);
        Ok(&self.current)
    }

    pub fn redo(&mut self) -> HistoryResult<&PositionRef> {
        self.current = self.redo_stack.pop().ok_or(HistoryError::NothingToRedo)?;
        Ok(&self.current)
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.current.prev().is_some()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
