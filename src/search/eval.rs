use cozy_chess::{Board, Color, Piece};

pub const PAWN: i32 = 10;
pub const KNIGHT: i32 = 30;
pub const BISHOP: i32 = 30;
pub const ROOK: i32 = 50;
pub const QUEEN: i32 = 90;
// Sentinel weight; mates are not scored specially.
pub const KING: i32 = 900;

pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN,
        Piece::Knight => KNIGHT,
        Piece::Bishop => BISHOP,
        Piece::Rook => ROOK,
        Piece::Queen => QUEEN,
        Piece::King => KING,
    }
}

fn count_piece(board: &Board, color: Color, piece: Piece) -> i32 {
    board.colored_pieces(color, piece).len() as i32
}

/// Material balance, positive when White (the maximizing side) is ahead.
/// Symmetric around zero and independent of the side to move.
pub fn material_eval(board: &Board) -> i32 {
    Piece::ALL
        .iter()
        .map(|&p| (count_piece(board, Color::White, p) - count_piece(board, Color::Black, p)) * piece_value(p))
        .sum()
}

