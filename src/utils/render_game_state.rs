//! Terminal-oriented Unicode board renderer.
//!
//! Stands in for the graphical board: draws the pieces, optionally from
//! Dark's side, and marks highlighted destinations of a selected piece.

use crate::game_state::chess_types::*;

const EMPTY: char = '·';
const AVAILABLE: char = '∘';
const BLOCKED: char = '×';

/// Render the board from Light's side with no highlights.
pub fn render_board(board: &Board) -> String {
    render_board_for(board, Color::Light, &[])
}

/// Render the board as seen by `side`. Empty destination squares among
/// `highlights` are marked, blocked ones differently from playable ones.
pub fn render_board_for(board: &Board, side: Color, highlights: &[Move]) -> String {
    let ranks: Vec<u8> = match side {
        Color::Light => (0..8).rev().collect(),
        Color::Dark => (0..8).collect(),
    };
    let files: Vec<u8> = match side {
        Color::Light => (0..8).collect(),
        Color::Dark => (0..8).rev().collect(),
    };
    let file_labels: String = files
        .iter()
        .map(|f| char::from(b'a' + f).to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = format!("  {file_labels}\n");

    for &rank in &ranks {
        let rank_label = char::from(b'1' + rank);
        out.push(rank_label);
        out.push(' ');

        for (i, &file) in files.iter().enumerate() {
            let sq = rank * 8 + file;
            out.push(square_char(board, sq, highlights));
            if i < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank_label);
        out.push('\n');
    }

    out.push_str("  ");
    out.push_str(&file_labels);
    out
}

fn square_char(board: &Board, sq: Square, highlights: &[Move]) -> char {
    if let Some((color, piece)) = board.piece_on(sq) {
        return piece_to_unicode(color, piece);
    }
    match highlights.iter().find(|m| m.to == sq) {
        Some(m) if m.kind == MoveKind::Blocked => BLOCKED,
        Some(_) => AVAILABLE,
        None => EMPTY,
    }
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::{render_board, render_board_for};
    use crate::game_state::chess_types::*;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::move_generation::move_generator::MoveGenerator;

    #[test]
    fn light_view_puts_rank_eight_on_top() {
        let board = Board::new_game().expect("start");
        let text = render_board(&board);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "  a b c d e f g h");
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
    }

    #[test]
    fn dark_view_is_rotated() {
        let board = Board::new_game().expect("start");
        let text = render_board_for(&board, Color::Dark, &[]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  h g f e d c b a");
        assert_eq!(lines[1], "1 ♖ ♘ ♗ ♔ ♕ ♗ ♘ ♖ 1");
    }

    #[test]
    fn highlights_mark_available_and_blocked_squares() {
        // The e2 bishop is pinned, so all its squares are blocked.
        let position = Position::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN");
        let moves = LegalMoveGenerator.piece_moves(&position, 12).expect("moves");
        let text = render_board_for(position.board(), Color::Light, &moves);
        assert!(text.contains('×'));
        assert!(!text.contains('∘'));

        let start = Position::new_game().expect("start");
        let moves = LegalMoveGenerator.piece_moves(&start, 12).expect("moves");
        let text = render_board_for(start.board(), Color::Light, &moves);
        assert_eq!(text.matches('∘').count(), 2);
    }
}
