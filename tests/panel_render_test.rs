//! Tests for drawing game frames onto the pixel panel.

use strictly_handheld::display::{CellRect, PanelRenderer, PixelPanel};
use strictly_tictactoe::{Board, Frame, Outcome, Phase, Player, Position, RenderSink};

fn render(board: &str, cursor: Position, to_move: Player) -> PixelPanel {
    let board: Board = board.parse().unwrap();
    let outcome = Outcome::evaluate(&board);
    let phase = if outcome.is_in_progress() {
        Phase::Playing
    } else {
        Phase::Ended
    };
    let frame = Frame {
        board: &board,
        cursor,
        to_move,
        outcome,
        phase,
    };

    let mut renderer = PanelRenderer::new();
    renderer.render(&frame);
    renderer.panel().clone()
}

/// Lit pixels in the status half of the panel.
fn status_area(panel: &PixelPanel) -> Vec<(i32, i32)> {
    (0..64)
        .flat_map(|y| (64..128).map(move |x| (x, y)))
        .filter(|&(x, y)| panel.pixel(x, y))
        .collect()
}

#[test]
fn test_every_cell_is_outlined() {
    let panel = render(".../.../...", Position::TopLeft, Player::X);
    for position in Position::ALL {
        let rect = CellRect::of(position);
        assert!(panel.pixel(rect.x, rect.y), "{position} corner");
        assert!(panel.pixel(rect.x + rect.w - 1, rect.y + rect.h - 1), "{position} corner");
    }
}

#[test]
fn test_selected_cell_has_double_outline() {
    let at_corner = render(".../.../...", Position::TopLeft, Player::X);
    assert!(at_corner.pixel(1, 1));
    assert!(!at_corner.pixel(22, 22));

    let at_center = render(".../.../...", Position::Center, Player::X);
    assert!(!at_center.pixel(1, 1));
    assert!(at_center.pixel(22, 22));
}

#[test]
fn test_marks_drawn_in_their_cells() {
    let empty = render(".../.../...", Position::TopLeft, Player::X);
    let marked = render(".../.X./...", Position::TopLeft, Player::O);

    let inside_center = |panel: &PixelPanel| {
        (23..40)
            .flat_map(|y| (23..40).map(move |x| (x, y)))
            .filter(|&(x, y)| panel.pixel(x, y))
            .count()
    };
    assert_eq!(inside_center(&empty), 0);
    assert!(inside_center(&marked) > 0);
}

#[test]
fn test_win_draws_strike_through_line() {
    // Between the X in the top-left cell and the cursor's inner outline.
    let in_progress = render("XX./OO./...", Position::TopLeft, Player::X);
    assert!(!in_progress.pixel(17, 10));

    let won = render("XXX/OO./...", Position::TopLeft, Player::O);
    assert!(won.pixel(17, 10));
    let (end_x, end_y) = CellRect::of(Position::TopRight).center();
    assert!(won.pixel(end_x, end_y));
}

#[test]
fn test_status_area_tracks_outcome() {
    let x_to_move = status_area(&render(".../.../...", Position::TopLeft, Player::X));
    let o_to_move = status_area(&render("X../.../...", Position::TopLeft, Player::O));
    let x_won = status_area(&render("XXX/OO./...", Position::TopLeft, Player::O));
    let drawn = status_area(&render("XOX/XOO/OXX", Position::TopLeft, Player::O));

    assert!(!x_to_move.is_empty());
    assert_ne!(x_to_move, o_to_move);
    assert_ne!(x_to_move, x_won);
    assert_ne!(x_won, drawn);
    assert_ne!(o_to_move, drawn);
}
