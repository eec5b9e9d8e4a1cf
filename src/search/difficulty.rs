//! Difficulty tiers of the computer opponent.

use std::fmt;

/// Computer opponent strength. Each tier picks a different search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Tier 1: uniformly random legal move.
    Random,
    /// Tier 2: best material after one ply, first maximum wins.
    Greedy,
    /// Tier 3: one reply of lookahead, material only.
    MinimaxMaterial,
    /// Tier 4: one reply of lookahead, full positional evaluation.
    MinimaxPositional,
    /// Tier 5: reply-chained ranking with a pooled deeper re-search.
    Pooled,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Random,
        Difficulty::Greedy,
        Difficulty::MinimaxMaterial,
        Difficulty::MinimaxPositional,
        Difficulty::Pooled,
    ];

    /// Maps the integer tiers 1 to 5. Anything unrecognised plays randomly.
    pub fn from_level(level: i64) -> Self {
        match level {
            2 => Difficulty::Greedy,
            3 => Difficulty::MinimaxMaterial,
            4 => Difficulty::MinimaxPositional,
            5 => Difficulty::Pooled,
            _ => Difficulty::Random,
        }
    }

    pub const fn level(self) -> u8 {
        match self {
            Difficulty::Random => 1,
            Difficulty::Greedy => 2,
            Difficulty::MinimaxMaterial => 3,
            Difficulty::MinimaxPositional => 4,
            Difficulty::Pooled => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Random => "beginner",
            Difficulty::Greedy => "easy",
            Difficulty::MinimaxMaterial => "normal",
            Difficulty::MinimaxPositional => "hard",
            Difficulty::Pooled => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AI {} ({})", self.level(), self.label())
    }
}
