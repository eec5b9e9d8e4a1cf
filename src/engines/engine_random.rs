//! Tier 1: uniformly random legal move.
//!
//! Also the fallback the pooled tier drops to when its ranking produces no
//! best candidate.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::move_generation::move_generator::GeneratedMove;
use crate::search::ai_search::{SearchEngine, SearchNode};

pub(crate) fn choose<R: Rng>(engine: &mut SearchEngine<R>, node: SearchNode<'_>) -> Option<GeneratedMove> {
    random_move(engine.rng(), &node.moves)
}

/// Uniform pick from `moves`; `None` only when the slice is empty.
pub fn random_move<R: Rng + ?Sized>(rng: &mut R, moves: &[GeneratedMove]) -> Option<GeneratedMove> {
    moves.choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::random_move;
    use crate::game_state::chess_types::Position;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::move_generation::move_generator::MoveGenerator;

    #[test]
    fn empty_move_list_gives_nothing() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(random_move(&mut rng, &[]).is_none());
    }

    #[test]
    fn picks_from_the_given_moves() {
        let mut rng = StdRng::seed_from_u64(5);
        let start = Position::new_game().expect("start");
        let moves = LegalMoveGenerator
            .generate_legal_moves(&start)
            .expect("legal moves");
        let picked = random_move(&mut rng, &moves).expect("start has moves");
        assert!(moves.iter().any(|m| m.mv == picked.mv));
    }
}
