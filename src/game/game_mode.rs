//! Who plays which side, as encoded by the `game` link parameter.

use crate::game_state::chess_types::Color;
use crate::search::difficulty::Difficulty;

/// Who plays each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    PlayerVsPlayer,
    /// A human against the computer at a fixed tier.
    VersusComputer(Difficulty),
    ComputerVsComputer { light: Difficulty, dark: Difficulty },
}

impl GameMode {
    /// Interprets the shareable `game` value: `0` two humans, `1..=4` a
    /// human against that tier, `5` tier 4 (Light) against tier 5 (Dark).
    /// Anything else is a two-human game.
    pub fn from_param(game: i64) -> Self {
        match game {
            1..=4 => GameMode::VersusComputer(Difficulty::from_level(game)),
            5 => GameMode::ComputerVsComputer {
                light: Difficulty::MinimaxPositional,
                dark: Difficulty::Pooled,
            },
            _ => GameMode::PlayerVsPlayer,
        }
    }

    /// The `game` value written back into links. A human game against
    /// tier 5 has no value of its own and is written as `5`.
    pub fn to_param(self) -> i64 {
        match self {
            GameMode::PlayerVsPlayer => 0,
            GameMode::VersusComputer(difficulty) => i64::from(difficulty.level()),
            GameMode::ComputerVsComputer { .. } => 5,
        }
    }

    /// The tier that moves for `turn`, or `None` when a human does.
    pub fn computer_for(self, turn: Color, human: Color) -> Option<Difficulty> {
        match self {
            GameMode::PlayerVsPlayer => None,
            GameMode::VersusComputer(difficulty) => (turn != human).then_some(difficulty),
            GameMode::ComputerVsComputer { light, dark } => Some(match turn {
                Color::Light => light,
                Color::Dark => dark,
            }),
        }
    }

    pub fn is_computer_vs_computer(self) -> bool {
        matches!(self, GameMode::ComputerVsComputer { .. })
    }
}
