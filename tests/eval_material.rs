use cozy_chess::Board;
use movepick::search::eval::{material_eval, piece_value, BISHOP, KING, KNIGHT, PAWN, QUEEN, ROOK};

#[test]
fn eval_material_startpos_is_zero() {
    assert_eq!(material_eval(&Board::default()), 0);
}

#[test]
fn eval_material_known_advantage() {
    // White: Kh1, Ra1; Black: Ka8. White is a rook up.
    let b = Board::from_fen("k7/8/8/8/8/8/8/R6K w - - 0 1", false).expect("valid fen");
    assert_eq!(material_eval(&b), ROOK);
}

#[test]
fn eval_material_ignores_side_to_move() {
    let w = Board::from_fen("k7/8/8/8/8/8/3q4/7K w - - 0 1", false).unwrap();
    let b = Board::from_fen("k7/8/8/8/8/8/3q4/7K b - - 0 1", false).unwrap();
    assert_eq!(material_eval(&w), -QUEEN);
    assert_eq!(material_eval(&w), material_eval(&b));
}

#[test]
fn eval_material_is_symmetric_under_colour_flip() {
    let white_up = Board::from_fen("4k3/8/8/8/8/2N5/PP6/4K1B1 w - - 0 1", false).unwrap();
    let black_up = Board::from_fen("4k1b1/pp6/2n5/8/8/8/8/4K3 w - - 0 1", false).unwrap();
    assert_eq!(material_eval(&white_up), 2 * PAWN + KNIGHT + BISHOP);
    assert_eq!(material_eval(&black_up), -material_eval(&white_up));
}

#[test]
fn piece_weights() {
    use cozy_chess::Piece;
    assert_eq!(piece_value(Piece::Pawn), 10);
    assert_eq!(piece_value(Piece::Knight), 30);
    assert_eq!(piece_value(Piece::Bishop), 30);
    assert_eq!(piece_value(Piece::Rook), 50);
    assert_eq!(piece_value(Piece::Queen), 90);
    assert_eq!(piece_value(Piece::King), KING);
}
