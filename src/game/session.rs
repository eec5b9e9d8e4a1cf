//! The live game: history cursor, mode and the derived game-over state.

use crate::game::game_mode::GameMode;
use crate::game_state::chess_types::*;
use crate::game_state::game_outcome::{evaluate, GameReport};
use crate::game_state::history::GameHistory;
use crate::search::difficulty::Difficulty;
use crate::utils::game_link::{GameLink, LinkResult};

#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) history: GameHistory,
    mode: GameMode,
    play_as: Color,
    piece_set: Option<String>,
    game_over: bool,
    report: GameReport,
}

impl GameSession {
    pub fn new(start: PositionRef, mode: GameMode, play_as: Color) -> Self {
        let report = evaluate(&start);
        Self {
            history: GameHistory::new(start),
            mode,
            play_as,
            piece_set: None,
            game_over: report.outcome.is_game_over(),
            report,
        }
    }

    /// Resumes the game a shareable link describes.
    pub fn from_link(link: &GameLink) -> LinkResult<Self> {
        let mut session = Self::new(link.position()?, GameMode::from_param(link.game), link.play_as);
        session.piece_set = link.piece_set.clone();
        Ok(session)
    }

    pub fn with_piece_set(mut self, piece_set: impl Into<String>) -> Self {
        self.piece_set = Some(piece_set.into());
        self
    }

    #[inline]
    pub fn current(&self) -> &PositionRef {
        self.history.current()
    }

    #[inline]
    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn play_as(&self) -> Color {
        self.play_as
    }

    pub fn piece_set(&self) -> Option<&str> {
        self.piece_set.as_deref()
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn report(&self) -> &GameReport {
        &self.report
    }

    /// Tier that plays the side to move, if the computer has it.
    pub fn computer_to_move(&self) -> Option<Difficulty> {
        self.mode.computer_for(self.current().turn(), self.play_as)
    }

    /// Human input is taken only while the game runs and a human has the
    /// move.
    pub fn accepts_human_input(&self) -> bool {
        !self.game_over && self.computer_to_move().is_none()
    }

    /// Re-evaluates the current position and updates the game-over flag.
    pub(crate) fn refresh(&mut self) -> &GameReport {
        self.report = evaluate(self.current());
        self.game_over = self.report.outcome.is_game_over();
        &self.report
    }

    /// Link describing the current position and options.
    pub fn link(&self) -> GameLink {
        GameLink {
            fen: Some(self.current().fen()),
            game: self.mode.to_param(),
            play_as: self.play_as,
            piece_set: self.piece_set.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GameSession;
    use crate::game::game_mode::GameMode;
    use crate::game_state::chess_types::*;
    use crate::search::difficulty::Difficulty;
    use crate::utils::game_link::GameLink;

    #[test]
    fn link_restores_mode_and_turn() {
        let link = GameLink::parse(
            "fen=rnbqkbnr%2Fpppppppp%2F8%2F8%2F4P3%2F8%2FPPPP1PPP%2FRNBQKBNR+b+KQkq+e3+0+1&game=2&play_as=w&piece_set=alpha",
        )
        .expect("link should parse");
        let session = GameSession::from_link(&link).expect("session");

        assert_eq!(session.mode(), GameMode::VersusComputer(Difficulty::Greedy));
        assert_eq!(session.current().turn(), Color::Dark);
        assert_eq!(session.computer_to_move(), Some(Difficulty::Greedy));
        assert!(!session.accepts_human_input());
        assert_eq!(session.piece_set(), Some("alpha"));
        assert_eq!(session.link(), link);
    }

    #[test]
    fn finished_games_refuse_input() {
        let mate = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN");
        let session = GameSession::new(mate, GameMode::PlayerVsPlayer, Color::Light);
        assert!(session.is_game_over());
        assert!(!session.accepts_human_input());
    }
}
