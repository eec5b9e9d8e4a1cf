//! Tier 2: one-ply material greed.
//!
//! Only a strictly better value replaces the current best, so among equal
//! values the first move in generation order wins and no randomness is
//! involved.

use crate::move_generation::move_generator::GeneratedMove;
use crate::search::ai_search::SearchNode;
use crate::search::board_scoring::static_value;

pub(crate) fn choose(node: SearchNode<'_>) -> Option<GeneratedMove> {
    let mut best = None;
    let mut max = f64::NEG_INFINITY;

    for mv in node.moves {
        let value = static_value(&mv.result, false) * node.value_mult;
        if value > max {
            max = value;
            best = Some(mv);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_types::*;
    use crate::search::ai_search::SearchEngine;
    use crate::search::difficulty::Difficulty;

    #[test]
    fn takes_the_most_valuable_piece() {
        // Light queen on d4 can take the rook on d8 or the knight on g7.
        let position =
            Position::from_fen("3r2k1/6n1/8/8/3Q4/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let picked = SearchEngine::seeded(9)
            .search(&position, Difficulty::Greedy, None)
            .expect("search should succeed")
            .expect("a move should be selected");
        assert_eq!(picked.mv.kind, MoveKind::Capture(PieceKind::Rook));
        assert_eq!(picked.mv.to, 59);
    }

    #[test]
    fn dark_maximises_its_own_material() {
        let position =
            Position::from_fen("4k3/8/8/3q4/8/8/3R2N1/4K3 b - - 0 1").expect("FEN should parse");
        let picked = SearchEngine::seeded(9)
            .search(&position, Difficulty::Greedy, None)
            .expect("search should succeed")
            .expect("a move should be selected");
        assert_eq!(picked.mv.kind, MoveKind::Capture(PieceKind::Rook));
    }

    #[test]
    fn first_of_equal_moves_wins() {
        // No captures: every move keeps material level, so the first
        // generated move is chosen.
        let start = Position::new_game().expect("start");
        let picked = SearchEngine::seeded(11)
            .search(&start, Difficulty::Greedy, None)
            .expect("search should succeed")
            .expect("a move should be selected");
        assert_eq!((picked.mv.from(), picked.mv.to), (8, 16));
    }
}
