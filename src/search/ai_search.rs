//! Computer move selection.
//!
//! `select_move` is the asynchronous entry point: it yields once to the
//! scheduler and then runs the synchronous, recursive `search`. Recursive
//! sub-searches call `search` directly and never yield on their own.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::engines::{engine_greedy, engine_minimax, engine_pooled, engine_random};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::search::difficulty::Difficulty;

/// Depth a tiered search starts at when the caller does not give one.
pub const BASE_DEPTH: u8 = 1;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Pause taken before each outermost search so pending host work runs.
    pub yield_delay: Duration,
    /// Tier 5 candidates re-searched at the base depth.
    pub root_pool_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            yield_delay: Duration::from_millis(5),
            root_pool_size: 16,
        }
    }
}

/// A ranked tier-5 candidate. Lives only for the duration of one search
/// call.
#[derive(Debug, Clone)]
pub struct SearchCandidate {
    pub mv: GeneratedMove,
    pub value: f64,
    /// The opponent's expected reply, when one was searched for.
    pub following: Option<GeneratedMove>,
}

impl SearchCandidate {
    /// Position the candidate leads to after the chained reply, if any.
    pub fn result(&self) -> &PositionRef {
        self.following
            .as_ref()
            .map(|reply| &reply.result)
            .unwrap_or(&self.mv.result)
    }
}

/// Everything a tier needs to know about the node being searched.
pub(crate) struct SearchNode<'a> {
    pub position: &'a PositionRef,
    pub moves: Vec<GeneratedMove>,
    pub value_mult: f64,
    pub depth: u8,
}

pub struct SearchEngine<R: Rng = StdRng> {
    move_generator: LegalMoveGenerator,
    rng: R,
    config: SearchConfig,
}

impl SearchEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for SearchEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SearchEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub(crate) fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Picks the move the computer plays from `position`. `None` means the
    /// position is terminal and nothing should be executed.
    pub async fn select_move(
        &mut self,
        position: &PositionRef,
        difficulty: Difficulty,
        depth: Option<u8>,
    ) -> MoveGenResult<Option<GeneratedMove>> {
        tokio::time::sleep(self.config.yield_delay).await;
        self.search(position, difficulty, depth)
    }

    /// Synchronous search behind `select_move`. Deterministic for a given
    /// random source.
    pub fn search(
        &mut self,
        position: &PositionRef,
        difficulty: Difficulty,
        depth: Option<u8>,
    ) -> MoveGenResult<Option<GeneratedMove>> {
        let moves = self.move_generator.generate_legal_moves(position)?;
        if moves.is_empty() {
            debug!(fen = %position.fen(), "no legal moves, nothing to select");
            return Ok(None);
        }

        let node = SearchNode {
            position,
            moves,
            value_mult: position.turn().value_mult(),
            depth: depth.unwrap_or(BASE_DEPTH),
        };

        let picked = match difficulty {
            Difficulty::Random => engine_random::choose(self, node),
            Difficulty::Greedy => engine_greedy::choose(node),
            Difficulty::MinimaxMaterial => engine_minimax::choose(self, node, difficulty, false)?,
            Difficulty::MinimaxPositional => engine_minimax::choose(self, node, difficulty, true)?,
            Difficulty::Pooled => engine_pooled::choose(self, node)?,
        };

        Ok(picked)
    }

    pub(crate) fn log_choice(&self, difficulty: Difficulty, position: &Position, value: f64, mv: &Move) {
        info!(
            %difficulty,
            turn = position.turn_num(),
            side = position.turn().name(),
            value,
            from = mv.from(),
            to = mv.to,
            "best move selected"
        );
    }
}

/// Random source whose every `random::<f64>()` is the same value.
#[cfg(test)]
pub(crate) struct FixedDraw(u64);

#[cfg(test)]
impl FixedDraw {
    /// `draw` must lie in `[0, 1)`. Uniform floats keep the top 53 bits
    /// of `next_u64`.
    pub(crate) fn new(draw: f64) -> Self {
        let mantissa = (draw * (1u64 << 53) as f64) as u64;
        Self(mantissa << 11)
    }
}

#[cfg(test)]
impl rand::RngCore for FixedDraw {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for (byte, src) in dst.iter_mut().zip(self.0.to_be_bytes().into_iter().cycle()) {
            *byte = src;
        }
    }
}
