//! Sequences human input and computer turns over a `GameSession`.
//!
//! Every executed move follows the same path: record it in history, notify
//! the observer, persist the shareable link, re-evaluate the game state.
//! Only then is the next turn decided.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::game::observer::{GameObserver, LinkStore};
use crate::game::session::GameSession;
use crate::game_state::chess_types::*;
use crate::game_state::history::HistoryError;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::{MoveGenerationError, MoveGenerator};
use crate::search::ai_search::SearchEngine;
use crate::utils::game_link::LinkError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    MoveGeneration(#[from] MoveGenerationError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error("no host to attach the game to: {0}")]
    MissingHost(String),
}

pub type GameResult<T> = Result<T, GameError>;

#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    /// Pause between a human move and the computer's reply.
    pub ai_delay: Duration,
    /// Stop a computer-vs-computer game after this many plies.
    pub max_plies: Option<u32>,
}

/// What became of a human move submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanMoveOutcome {
    /// The move was played. `reply` is the computer's answer, if it moved.
    Executed { mv: Move, reply: Option<Move> },
    /// The destination is a promotion square; ask which piece and resubmit.
    PromotionRequired,
    /// Not a legal destination for the selected piece, or not the human's
    /// turn. Nothing changed.
    Ignored,
}

pub struct TurnOrchestrator<O, L, R: Rng = StdRng> {
    session: GameSession,
    engine: SearchEngine<R>,
    move_generator: LegalMoveGenerator,
    observer: O,
    links: L,
    config: OrchestratorConfig,
}

impl<O: GameObserver, L: LinkStore, R: Rng> TurnOrchestrator<O, L, R> {
    pub fn new(session: GameSession, engine: SearchEngine<R>, observer: O, links: L) -> Self {
        Self {
            session,
            engine,
            move_generator: LegalMoveGenerator,
            observer,
            links,
            config: OrchestratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn links(&self) -> &L {
        &self.links
    }

    /// Evaluates the loaded position and, if the computer has the move,
    /// lets it play. A computer-vs-computer game runs to its end here.
    pub async fn start(&mut self) -> GameResult<()> {
        self.refresh_state();
        if self.session.is_game_over() {
            return Ok(());
        }

        if self.session.mode().is_computer_vs_computer() {
            self.run_computer_vs_computer().await?;
        } else if self.session.computer_to_move().is_some() {
            self.play_computer_turn().await?;
        }
        Ok(())
    }

    /// Every move of the piece on `square`, blocked ones included, for the
    /// host to highlight. Empty, with highlights cleared, when input is not
    /// accepted or the square holds no piece of the side to move.
    pub fn select_piece(&mut self, square: Square) -> GameResult<Vec<Move>> {
        if !self.session.accepts_human_input() {
            self.observer.highlights_cleared();
            return Ok(Vec::new());
        }

        let moves = self
            .move_generator
            .piece_moves(self.session.current(), square)?;
        self.observer.highlights_cleared();
        if !moves.is_empty() {
            self.observer.highlights(square, &moves);
        }
        Ok(moves)
    }

    /// Plays the human move `from` to `to`, then the computer's reply when
    /// it is due.
    pub async fn submit_human_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PromotionPiece>,
    ) -> GameResult<HumanMoveOutcome> {
        if !self.session.accepts_human_input() {
            debug!(from, to, "human input while not accepted");
            self.observer.highlights_cleared();
            return Ok(HumanMoveOutcome::Ignored);
        }

        let candidates: Vec<Move> = self
            .move_generator
            .piece_moves(self.session.current(), from)?
            .into_iter()
            .filter(|m| m.to == to && m.kind.is_executable())
            .collect();

        let promotion_tile = candidates.iter().any(|m| m.kind.promotion().is_some());
        if promotion_tile && promotion.is_none() {
            return Ok(HumanMoveOutcome::PromotionRequired);
        }

        let Some(mv) = candidates
            .into_iter()
            .find(|m| !promotion_tile || m.kind.promotion() == promotion)
        else {
            debug!(from, to, "not a legal destination, clearing selection");
            self.observer.highlights_cleared();
            return Ok(HumanMoveOutcome::Ignored);
        };

        let result = apply_move(self.session.current(), &mv)?;
        self.commit(mv, result, true);

        let mut reply = None;
        if !self.session.is_game_over() && self.session.computer_to_move().is_some() {
            tokio::time::sleep(self.config.ai_delay).await;
            reply = self.play_computer_turn().await?;
        }
        Ok(HumanMoveOutcome::Executed { mv, reply })
    }

    /// Lets the computer play the side to move. `None` when the game is
    /// over, a human has the move, or the position has no legal move.
    pub async fn play_computer_turn(&mut self) -> GameResult<Option<Move>> {
        if self.session.is_game_over() {
            return Ok(None);
        }
        let Some(difficulty) = self.session.computer_to_move() else {
            return Ok(None);
        };

        let position = Arc::clone(self.session.current());
        self.observer.thinking_started(position.turn(), difficulty);
        let picked = self.engine.select_move(&position, difficulty, None).await;
        self.observer.thinking_finished();

        match picked? {
            Some(generated) => {
                let mv = generated.mv;
                self.commit(mv, generated.result, true);
                Ok(Some(mv))
            }
            None => {
                debug!(fen = %position.fen(), "computer has no move to execute");
                Ok(None)
            }
        }
    }

    /// Alternates computer turns until the game ends or the configured ply
    /// cap is reached. Returns the number of plies played.
    pub async fn run_computer_vs_computer(&mut self) -> GameResult<u32> {
        let mut plies = 0u32;
        loop {
            if self.session.is_game_over() {
                break;
            }
            if self.config.max_plies.is_some_and(|cap| plies >= cap) {
                debug!(plies, "ply cap reached");
                break;
            }
            if self.play_computer_turn().await?.is_none() {
                break;
            }
            plies += 1;
        }
        Ok(plies)
    }

    pub fn undo(&mut self) -> GameResult<()> {
        self.session.history.undo()?;
        self.after_history_move();
        Ok(())
    }

    pub fn redo(&mut self) -> GameResult<()> {
        self.session.history.redo()?;
        self.after_history_move();
        Ok(())
    }

    fn after_history_move(&mut self) {
        self.observer.highlights_cleared();
        self.refresh_state();
        self.persist();
    }

    fn commit(&mut self, mv: Move, result: PositionRef, animate: bool) {
        debug!(from = mv.from(), to = mv.to, side = mv.piece.color.name(), "executing move");
        self.session.history.record(result);
        self.observer
            .move_executed(&mv, self.session.current(), animate);
        self.persist();
        self.refresh_state();
    }

    fn persist(&mut self) {
        self.links.store(&self.session.link());
    }

    fn refresh_state(&mut self) {
        let report = self.session.refresh().clone();
        if let Some(message) = report.describe() {
            if report.outcome.is_game_over() {
                info!(%message, "game over");
            } else {
                debug!(%message);
            }
        }
        self.observer.outcome(&report);
        let history = self.session.history();
        self.observer
            .history_changed(history.can_undo(), history.can_redo());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{HumanMoveOutcome, OrchestratorConfig, TurnOrchestrator};
    use crate::game::game_mode::GameMode;
    use crate::game::observer::{GameEvent, MemoryLinkStore, RecordingObserver};
    use crate::game::session::GameSession;
    use crate::game_state::chess_types::*;
    use crate::game_state::game_outcome::GameOutcome;
    use crate::search::ai_search::{SearchConfig, SearchEngine};
    use crate::search::difficulty::Difficulty;
    use crate::utils::game_link::GameLink;

    type TestOrchestrator = TurnOrchestrator<RecordingObserver, MemoryLinkStore>;

    fn orchestrator(fen: &str, mode: GameMode, play_as: Color) -> TestOrchestrator {
        let position = Position::from_fen(fen).expect("FEN should parse");
        let engine = SearchEngine::seeded(17).with_config(SearchConfig {
            yield_delay: Duration::ZERO,
            ..SearchConfig::default()
        });
        TurnOrchestrator::new(
            GameSession::new(position, mode, play_as),
            engine,
            RecordingObserver::default(),
            MemoryLinkStore::default(),
        )
    }

    fn start_fen() -> &'static str {
        crate::game_state::chess_rules::STARTING_POSITION_FEN
    }

    #[tokio::test]
    async fn human_move_is_recorded_persisted_and_answered() {
        let mut game = orchestrator(start_fen(), GameMode::VersusComputer(Difficulty::Greedy), Color::Light);
        game.start().await.expect("start");
        assert!(game.observer().executed_moves().is_empty());

        let highlights = game.select_piece(12).expect("select e2");
        assert_eq!(highlights.len(), 2);

        let outcome = game.submit_human_move(12, 28, None).await.expect("e2e4");
        let HumanMoveOutcome::Executed { mv, reply } = outcome else {
            panic!("e2e4 should execute, got {outcome:?}");
        };
        assert_eq!((mv.from(), mv.to), (12, 28));
        let reply = reply.expect("the computer should answer");
        assert_eq!(reply.piece.color, Color::Dark);

        assert_eq!(game.observer().executed_moves(), vec![mv, reply]);
        assert_eq!(game.session().current().turn(), Color::Light);
        assert_eq!(game.links().links.len(), 2);

        let latest = GameLink::parse(game.links().latest().expect("a stored link"))
            .expect("stored link should parse");
        assert_eq!(latest.fen.as_deref(), Some(game.session().current().fen().as_str()));
        assert_eq!(latest.game, 2);
    }

    #[tokio::test]
    async fn invalid_destinations_and_wrong_turns_are_ignored() {
        let mut game = orchestrator(start_fen(), GameMode::PlayerVsPlayer, Color::Light);
        let before = game.session().current().fen();

        assert_eq!(
            game.submit_human_move(12, 36, None).await.expect("submit"),
            HumanMoveOutcome::Ignored
        );
        // A dark piece while Light is to move.
        assert_eq!(
            game.submit_human_move(52, 36, None).await.expect("submit"),
            HumanMoveOutcome::Ignored
        );
        assert_eq!(game.session().current().fen(), before);
        assert!(game
            .observer()
            .events
            .iter()
            .any(|e| *e == GameEvent::HighlightsCleared));

        let mut versus = orchestrator(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            GameMode::VersusComputer(Difficulty::Random),
            Color::Light,
        );
        assert!(versus.select_piece(52).expect("select").is_empty());
    }

    #[tokio::test]
    async fn pinned_piece_moves_are_shown_but_never_played() {
        let mut game = orchestrator("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1", GameMode::PlayerVsPlayer, Color::Light);
        let highlights = game.select_piece(12).expect("select");
        assert!(!highlights.is_empty());
        assert!(highlights.iter().all(|m| m.kind == MoveKind::Blocked));

        let outcome = game.submit_human_move(12, 21, None).await.expect("submit");
        assert_eq!(outcome, HumanMoveOutcome::Ignored);
    }

    #[tokio::test]
    async fn promotion_needs_a_matching_piece() {
        let mut game = orchestrator("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1", GameMode::PlayerVsPlayer, Color::Light);
        assert_eq!(
            game.submit_human_move(49, 57, None).await.expect("submit"),
            HumanMoveOutcome::PromotionRequired
        );

        let outcome = game
            .submit_human_move(49, 57, PromotionPiece::from_name("knight"))
            .await
            .expect("submit");
        assert!(matches!(outcome, HumanMoveOutcome::Executed { .. }));
        assert_eq!(
            game.session().current().board().piece_on(57),
            Some((Color::Light, PieceKind::Knight))
        );
    }

    #[tokio::test]
    async fn computer_opens_when_it_has_the_first_move() {
        let mut game = orchestrator(start_fen(), GameMode::VersusComputer(Difficulty::Random), Color::Dark);
        game.start().await.expect("start");
        let moves = game.observer().executed_moves();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].piece.color, Color::Light);
        assert!(game.session().accepts_human_input());
    }

    #[tokio::test]
    async fn mating_move_ends_the_game() {
        let mut game = orchestrator(
            "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1",
            GameMode::PlayerVsPlayer,
            Color::Light,
        );
        let outcome = game.submit_human_move(0, 56, None).await.expect("Ra8#");
        assert!(matches!(outcome, HumanMoveOutcome::Executed { reply: None, .. }));
        assert!(game.session().is_game_over());
        assert_eq!(game.session().report().outcome, GameOutcome::Checkmate);
        assert_eq!(
            game.session().report().describe().as_deref(),
            Some("White won by checkmate in 1 turns.")
        );

        // Further input is refused.
        assert!(game.select_piece(62).expect("select").is_empty());
        assert_eq!(
            game.submit_human_move(53, 45, None).await.expect("submit"),
            HumanMoveOutcome::Ignored
        );
    }

    #[tokio::test]
    async fn undo_and_redo_move_the_cursor_and_reopen_the_game() {
        let mut game = orchestrator(
            "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1",
            GameMode::PlayerVsPlayer,
            Color::Light,
        );
        game.submit_human_move(0, 56, None).await.expect("Ra8#");
        assert!(game.session().is_game_over());

        game.undo().expect("undo");
        assert!(!game.session().is_game_over());
        assert_eq!(game.session().current().board().piece_on(0), Some((Color::Light, PieceKind::Rook)));
        assert!(game.undo().is_err());

        game.redo().expect("redo");
        assert!(game.session().is_game_over());
        assert!(game.redo().is_err());
        assert_eq!(
            game.observer().events.last(),
            Some(&GameEvent::HistoryChanged {
                can_undo: true,
                can_redo: false
            })
        );
    }

    #[tokio::test]
    async fn computer_vs_computer_runs_until_the_cap() {
        let link = GameLink::parse("game=5").expect("link");
        let session = GameSession::from_link(&link).expect("session");
        let engine = SearchEngine::seeded(99).with_config(SearchConfig {
            yield_delay: Duration::ZERO,
            ..SearchConfig::default()
        });
        let mut game = TurnOrchestrator::new(
            session,
            engine,
            RecordingObserver::default(),
            MemoryLinkStore::default(),
        )
        .with_config(OrchestratorConfig {
            ai_delay: Duration::ZERO,
            max_plies: Some(4),
        });

        game.start().await.expect("start");
        let moves = game.observer().executed_moves();
        assert_eq!(moves.len(), 4);
        let sides: Vec<Color> = moves.iter().map(|m| m.piece.color).collect();
        assert_eq!(sides, vec![Color::Light, Color::Dark, Color::Light, Color::Dark]);
        assert!(game.observer().events.contains(&GameEvent::ThinkingStarted(
            Color::Dark,
            Difficulty::Pooled
        )));
        assert!(!game.session().accepts_human_input());
    }

    #[tokio::test]
    async fn computer_vs_computer_stops_at_game_end() {
        let position = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").expect("FEN");
        let session = GameSession::new(position, GameMode::from_param(5), Color::Light);
        let engine = SearchEngine::seeded(5).with_config(SearchConfig {
            yield_delay: Duration::ZERO,
            ..SearchConfig::default()
        });
        let mut game = TurnOrchestrator::new(
            session,
            engine,
            RecordingObserver::default(),
            MemoryLinkStore::default(),
        );

        let plies = game.run_computer_vs_computer().await.expect("run");
        assert_eq!(plies, 1);
        assert_eq!(game.session().report().outcome, GameOutcome::Checkmate);
    }
}
