use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::{has_legal_move, is_check};
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

/// Counts leaf nodes (and leaf move categories) of the legal move tree.
pub fn perft<G: MoveGenerator>(
    generator: &G,
    position: &PositionRef,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return Ok(total);
    }

    for mv in generator.generate_legal_moves(position)? {
        perft_recurse(generator, &mv, depth, 1, &mut total)?;
    }

    Ok(total)
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    mv: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    if current_depth == search_depth {
        tally_leaf(mv, counts);
        return Ok(());
    }

    for child in generator.generate_legal_moves(&mv.result)? {
        perft_recurse(generator, &child, search_depth, current_depth + 1, counts)?;
    }
    Ok(())
}

fn tally_leaf(mv: &GeneratedMove, counts: &mut PerftCounts) {
    counts.nodes += 1;

    if mv.mv.kind.is_capture() {
        counts.captures += 1;
    }
    if mv.mv.kind == MoveKind::EnPassant {
        counts.en_passant += 1;
    }
    if mv.mv.is_castling() {
        counts.castles += 1;
    }
    if mv.mv.kind.promotion().is_some() {
        counts.promotions += 1;
    }

    let board = mv.result.board();
    if is_check(board) {
        counts.checks += 1;
        if !has_legal_move(board) {
            counts.checkmates += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{perft, PerftCounts};
    use crate::game_state::chess_types::Position;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const ROOK_ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    fn nodes(fen: &str, depth: u8) -> PerftCounts {
        let position = Position::from_fen(fen).expect("FEN should parse");
        perft(&LegalMoveGenerator, &position, depth).expect("perft should run")
    }

    #[test]
    fn starting_position_counts() {
        let start = crate::game_state::chess_rules::STARTING_POSITION_FEN;
        assert_eq!(nodes(start, 0).nodes, 1);
        assert_eq!(nodes(start, 1).nodes, 20);
        assert_eq!(nodes(start, 2).nodes, 400);

        let depth3 = nodes(start, 3);
        assert_eq!(depth3.nodes, 8_902);
        assert_eq!(depth3.captures, 34);
        assert_eq!(depth3.checks, 12);
        assert_eq!(depth3.checkmates, 0);
    }

    #[test]
    fn kiwipete_counts() {
        let depth1 = nodes(KIWIPETE, 1);
        assert_eq!(depth1.nodes, 48);
        assert_eq!(depth1.captures, 8);
        assert_eq!(depth1.castles, 2);

        let depth2 = nodes(KIWIPETE, 2);
        assert_eq!(depth2.nodes, 2_039);
        assert_eq!(depth2.captures, 351);
        assert_eq!(depth2.en_passant, 1);
        assert_eq!(depth2.castles, 91);
        assert_eq!(depth2.checks, 3);
    }

    #[test]
    fn rook_endgame_counts() {
        assert_eq!(nodes(ROOK_ENDGAME, 1).nodes, 14);
        assert_eq!(nodes(ROOK_ENDGAME, 2).nodes, 191);
        assert_eq!(nodes(ROOK_ENDGAME, 3).nodes, 2_812);
    }
}
