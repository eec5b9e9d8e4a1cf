//! Crate root module declarations for the turnwise chess game.
//!
//! Exposes the rules engine (game state, move generation, evaluation), the
//! tiered search engine and the turn orchestration layer so the terminal
//! front-end, tests and benches share stable module paths.

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_outcome;
    pub mod history;
    pub mod position;
}

pub mod moves {
    pub mod attack_tables;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod move_generator;
    pub mod perft;
    pub mod pseudo_moves;
}

pub mod search {
    pub mod ai_search;
    pub mod board_scoring;
    pub mod difficulty;
}

pub mod engines {
    pub mod engine_greedy;
    pub mod engine_minimax;
    pub mod engine_pooled;
    pub mod engine_random;
}

pub mod game {
    pub mod game_mode;
    pub mod observer;
    pub mod session;
    pub mod turn_orchestrator;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod game_link;
    pub mod long_algebraic;
    pub mod render_game_state;
    pub mod save_file;
}
