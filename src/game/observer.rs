//! Host-facing notifications and link persistence.
//!
//! The orchestrator reports everything it does through `GameObserver`; the
//! host only ever calls back through the orchestrator's human entry points.

use crate::game_state::chess_types::*;
use crate::game_state::game_outcome::GameReport;
use crate::search::difficulty::Difficulty;
use crate::utils::game_link::GameLink;

pub trait GameObserver {
    fn move_executed(&mut self, _mv: &Move, _position: &Position, _animate: bool) {}
    fn highlights(&mut self, _from: Square, _moves: &[Move]) {}
    fn highlights_cleared(&mut self) {}
    fn outcome(&mut self, _report: &GameReport) {}
    fn thinking_started(&mut self, _side: Color, _difficulty: Difficulty) {}
    fn thinking_finished(&mut self) {}
    fn history_changed(&mut self, _can_undo: bool, _can_redo: bool) {}
}

/// Receives the shareable link after every change of position.
pub trait LinkStore {
    fn store(&mut self, link: &GameLink);
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    MoveExecuted { mv: Move, fen: String, animate: bool },
    Highlights { from: Square, moves: Vec<Move> },
    HighlightsCleared,
    Outcome(GameReport),
    ThinkingStarted(Color, Difficulty),
    ThinkingFinished,
    HistoryChanged { can_undo: bool, can_redo: bool },
}

/// Keeps every notification in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub events: Vec<GameEvent>,
}

impl RecordingObserver {
    pub fn executed_moves(&self) -> Vec<Move> {
        self.events
            .iter()
            .filter_map(|event| match event {
                GameEvent::MoveExecuted { mv, .. } => Some(*mv),
                _ => None,
            })
            .collect()
    }
}

impl GameObserver for RecordingObserver {
    fn move_executed(&mut self, mv: &Move, position: &Position, animate: bool) {
        self.events.push(GameEvent::MoveExecuted {
            mv: *mv,
            fen: position.fen(),
            animate,
        });
    }

    fn highlights(&mut self, from: Square, moves: &[Move]) {
        self.events.push(GameEvent::Highlights {
            from,
            moves: moves.to_vec(),
        });
    }

    fn highlights_cleared(&mut self) {
        self.events.push(GameEvent::HighlightsCleared);
    }

    fn outcome(&mut self, report: &GameReport) {
        self.events.push(GameEvent::Outcome(report.clone()));
    }

    fn thinking_started(&mut self, side: Color, difficulty: Difficulty) {
        self.events.push(GameEvent::ThinkingStarted(side, difficulty));
    }

    fn thinking_finished(&mut self) {
        self.events.push(GameEvent::ThinkingFinished);
    }

    fn history_changed(&mut self, can_undo: bool, can_redo: bool) {
        self.events
            .push(GameEvent::HistoryChanged { can_undo, can_redo });
    }
}

/// Link history kept in memory, newest last, like a browser's history
/// stack.
#[derive(Debug, Clone, Default)]
pub struct MemoryLinkStore {
    pub links: Vec<String>,
}

impl MemoryLinkStore {
    pub fn latest(&self) -> Option<&str> {
        self.links.last().map(String::as_str)
    }
}

impl LinkStore for MemoryLinkStore {
    fn store(&mut self, link: &GameLink) {
        self.links.push(link.to_query_string());
    }
}
