use cozy_chess::{Board, Color, Move, Piece, Square};

use crate::board::Position;

/// One plane per (piece type, colour).
pub const PLANES: usize = 12;
pub const BOARD_TENSOR_LEN: usize = PLANES * 64;
/// Every ordered (from, to) square pair with from != to.
pub const POLICY_SIZE: usize = 64 * 63;

/// 12x8x8 occupancy planes, flattened plane-major.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardTensor {
    data: Vec<f32>,
}

impl BoardTensor {
    pub fn zeros() -> Self { Self { data: vec![0.0; BOARD_TENSOR_LEN] } }

    pub const fn shape() -> [usize; 3] { [PLANES, 8, 8] }

    pub fn get(&self, plane: usize, row: usize, col: usize) -> f32 {
        self.data[plane * 64 + row * 8 + col]
    }

    fn set(&mut self, plane: usize, row: usize, col: usize) {
        self.data[plane * 64 + row * 8 + col] = 1.0;
    }

    pub fn as_slice(&self) -> &[f32] { &self.data }

    /// Number of occupied cells across all planes.
    pub fn count_ones(&self) -> usize { self.data.iter().filter(|&&v| v != 0.0).count() }
}

/// Plane order: white P N B R Q K, then black P N B R Q K.
pub fn plane_index(piece: Piece, color: Color) -> usize {
    let base = match piece {
        Piece::Pawn => 0,
        Piece::Knight => 1,
        Piece::Bishop => 2,
        Piece::Rook => 3,
        Piece::Queen => 4,
        Piece::King => 5,
    };
    base + if color == Color::Black { 6 } else { 0 }
}

/// Row 0 is rank 8 and column 0 is file a, so the planes print the way a
/// board is drawn from White's side.
pub fn tensor_coords(sq: Square) -> (usize, usize) {
    (7 - sq.rank() as usize, sq.file() as usize)
}

pub fn encode_position(board: &Board) -> BoardTensor {
    let mut t = BoardTensor::zeros();
    for sq in board.occupied() {
        if let Some((piece, color)) = board.piece_on(sq).zip(board.color_on(sq)) {
            let (row, col) = tensor_coords(sq);
            t.set(plane_index(piece, color), row, col);
        }
    }
    t
}

/// Position of (from, to) in the policy enumeration: from-major over
/// a1, b1, .., h8, with the from == to entry skipped.
pub fn move_index(from: Square, to: Square) -> Option<usize> {
    let (f, t) = (from as usize, to as usize);
    if f == t { return None; }
    Some(f * 63 + if t < f { t } else { t - 1 })
}

pub fn index_to_squares(idx: usize) -> Option<(Square, Square)> {
    if idx >= POLICY_SIZE { return None; }
    let f = idx / 63;
    let mut t = idx % 63;
    if t >= f { t += 1; }
    Some((Square::ALL[f], Square::ALL[t]))
}

/// Policy index of a legal move, castling looked up by the king's destination.
pub fn policy_index(pos: &Position, mv: Move) -> Option<usize> {
    let shown = pos.display_move(mv);
    move_index(shown.from, shown.to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_position() {
        let t = encode_position(&Board::default());
        assert_eq!(BoardTensor::shape(), [12, 8, 8]);
        assert_eq!(t.count_ones(), 32);
        // White pawns on rank 2 -> row 6; black pawns on rank 7 -> row 1.
        for file in 0..8 {
            assert_eq!(t.get(0, 6, file), 1.0);
            assert_eq!(t.get(6, 1, file), 1.0);
        }
        // White king e1, black queen d8.
        assert_eq!(t.get(5, 7, 4), 1.0);
        assert_eq!(t.get(10, 0, 3), 1.0);
    }

    #[test]
    fn test_move_index_enumeration() {
        assert_eq!(move_index(Square::A1, Square::B1), Some(0));
        assert_eq!(move_index(Square::A1, Square::H8), Some(62));
        assert_eq!(move_index(Square::B1, Square::A1), Some(63));
        assert_eq!(move_index(Square::H8, Square::G8), Some(POLICY_SIZE - 1));
        assert_eq!(move_index(Square::E2, Square::E2), None);
        for idx in [0, 63, 1000, POLICY_SIZE - 1] {
            let (f, t) = index_to_squares(idx).unwrap();
            assert_eq!(move_index(f, t), Some(idx));
        }
        assert_eq!(index_to_squares(POLICY_SIZE), None);
    }
}
