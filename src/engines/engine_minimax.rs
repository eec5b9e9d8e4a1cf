//! Tiers 3 and 4: one reply of lookahead.
//!
//! Every candidate is answered by the opponent's own choice at one lower
//! depth (same tier), and the position after that reply is what gets
//! scored. Tier 3 scores material only, tier 4 the full positional value.
//! Exact ties are re-decided per candidate with probability `2 / N`.

use rand::Rng;
use tracing::warn;

use crate::engines::engine_random::random_move;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult};
use crate::search::ai_search::{SearchEngine, SearchNode, BASE_DEPTH};
use crate::search::board_scoring::static_value;
use crate::search::difficulty::Difficulty;

pub(crate) fn choose<R: Rng>(
    engine: &mut SearchEngine<R>,
    node: SearchNode<'_>,
    difficulty: Difficulty,
    full: bool,
) -> MoveGenResult<Option<GeneratedMove>> {
    let accept_tie = 2.0 / node.moves.len() as f64;
    let mut best: Option<usize> = None;
    let mut max = f64::NEG_INFINITY;

    for (idx, candidate) in node.moves.iter().enumerate() {
        let mut result = &candidate.result;
        let reply = if node.depth > 0 {
            engine.search(result, difficulty, Some(node.depth - 1))?
        } else {
            None
        };
        if let Some(reply) = &reply {
            result = &reply.result;
        }

        let value = static_value(result, full) * node.value_mult;
        if value > max || (value == max && engine.rng().random::<f64>() <= accept_tie) {
            max = value;
            best = Some(idx);
        }
    }

    let Some(idx) = best else {
        warn!(%difficulty, "no best move, returning random");
        return Ok(random_move(engine.rng(), &node.moves));
    };

    let picked = node.moves[idx].clone();
    if node.depth == BASE_DEPTH {
        engine.log_choice(difficulty, node.position, max, &picked.mv);
    }
    Ok(Some(picked))
}
