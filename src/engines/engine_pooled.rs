//! Tier 5: pooled lookahead.
//!
//! Every root move is chained to the opponent's immediate reply and ranked
//! by the full positional value. Only the top of that ranking (the pool) is
//! searched one ply deeper; the deeper result replaces the ranking value.
//! Exact ties are accepted with probability 0.2.

use rand::Rng;
use tracing::warn;

use crate::engines::engine_random::random_move;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult};
use crate::search::ai_search::{SearchCandidate, SearchEngine, SearchNode, BASE_DEPTH};
use crate::search::board_scoring::static_value;
use crate::search::difficulty::Difficulty;

const TIE_ACCEPTANCE: f64 = 0.2;

pub(crate) fn choose<R: Rng>(
    engine: &mut SearchEngine<R>,
    node: SearchNode<'_>,
) -> MoveGenResult<Option<GeneratedMove>> {
    let mut ranked = rank_candidates(engine, &node)?;
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value));

    let pool_size = pool_size(node.depth, ranked.len(), engine.config().root_pool_size);
    let mut best: Option<usize> = None;
    let mut max = f64::NEG_INFINITY;

    for (idx, candidate) in ranked.iter().take(pool_size).enumerate() {
        let mut value = candidate.value;
        if node.depth > 0 {
            let deeper = engine.search(candidate.result(), Difficulty::Pooled, Some(node.depth - 1))?;
            if let Some(deeper) = deeper {
                value = static_value(&deeper.result, true) * node.value_mult;
            }
        }

        if value > max || (value == max && engine.rng().random::<f64>() <= TIE_ACCEPTANCE) {
            max = value;
            best = Some(idx);
        }
    }

    let Some(idx) = best else {
        warn!(candidates = ranked.len(), "no best move, returning random");
        return Ok(random_move(engine.rng(), &node.moves));
    };

    let picked = ranked.swap_remove(idx).mv;
    if node.depth == BASE_DEPTH {
        engine.log_choice(Difficulty::Pooled, node.position, max, &picked.mv);
    }
    Ok(Some(picked))
}

/// Scores each root move after the opponent's immediate reply, in
/// generation order.
fn rank_candidates<R: Rng>(
    engine: &mut SearchEngine<R>,
    node: &SearchNode<'_>,
) -> MoveGenResult<Vec<SearchCandidate>> {
    let mut ranked = Vec::with_capacity(node.moves.len());

    for mv in &node.moves {
        let following = if node.depth > 0 {
            engine.search(&mv.result, Difficulty::Pooled, Some(0))?
        } else {
            None
        };

        let mut candidate = SearchCandidate {
            mv: mv.clone(),
            value: 0.0,
            following,
        };
        candidate.value = static_value(candidate.result(), true) * node.value_mult;
        ranked.push(candidate);
    }

    Ok(ranked)
}

/// Candidates re-searched at this depth: the configured root pool at the
/// base depth, `1 + depth` below it.
fn pool_size(depth: u8, candidates: usize, root_pool: usize) -> usize {
    let wanted = if depth == BASE_DEPTH {
        root_pool
    } else {
        1 + usize::from(depth)
    };
    wanted.min(candidates)
}
