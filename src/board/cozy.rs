use std::fmt;

use cozy_chess::{Board as CozyBoard, Color, File, Move, Piece, Rank, Square};

use crate::error::{EngineError, Result};

/// Immutable position snapshot backed by `cozy_chess`.
///
/// Successors are produced with [`Position::apply`], which never touches
/// `self`. Castling is exposed in standard notation (`e1g1`) even though the
/// board library encodes it as the king capturing its own rook (`e1h1`).
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default() }
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        CozyBoard::from_fen(fen.trim(), false)
            .map(|b| Self { board: b })
            .map_err(|e| EngineError::InvalidFen { fen: fen.to_string(), reason: format!("{e:?}") })
    }

    pub fn from_board(board: CozyBoard) -> Self { Self { board } }

    pub fn to_fen(&self) -> String { format!("{}", self.board) }

    pub fn board(&self) -> &CozyBoard { &self.board }

    pub fn side_to_move(&self) -> Color { self.board.side_to_move() }

    /// White is the maximizing side for the material evaluator.
    pub fn maximizing(&self) -> bool { self.board.side_to_move() == Color::White }

    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|ml| { moves.extend(ml); false });
        moves
    }

    pub fn legal_moves_count(&self) -> usize {
        let mut ct = 0usize;
        self.board.generate_moves(|moves| { ct += moves.len(); false });
        ct
    }

    pub fn has_legal_moves(&self) -> bool {
        let mut any = false;
        self.board.generate_moves(|_| { any = true; true });
        any
    }

    pub fn is_legal(&self, mv: Move) -> bool { self.board.is_legal(mv) }

    /// Successor position after `mv`. `self` is left untouched.
    pub fn apply(&self, mv: Move) -> Result<Position> {
        let mut child = self.board.clone();
        child.try_play(mv).map_err(|_| self.illegal(mv))?;
        Ok(Position { board: child })
    }

    /// Successor for a move taken from [`Position::legal_moves`].
    pub(crate) fn play_legal(&self, mv: Move) -> Position {
        let mut child = self.board.clone();
        child.play(mv);
        Position { board: child }
    }

    pub fn is_check(&self) -> bool { !self.board.checkers().is_empty() }

    pub fn is_mate(&self) -> bool { self.is_check() && !self.has_legal_moves() }

    pub fn is_stalemate(&self) -> bool { !self.is_check() && !self.has_legal_moves() }

    /// Stalemate, fifty-move rule or bare material that cannot mate.
    pub fn is_draw(&self) -> bool {
        if self.is_stalemate() { return true; }
        if self.board.halfmove_clock() >= 100 && !self.is_mate() { return true; }
        self.is_insufficient_material()
    }

    pub fn is_game_over(&self) -> bool { !self.has_legal_moves() || self.is_draw() }

    fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !heavy.is_empty() { return false; }
        let minors = b.pieces(Piece::Knight) | b.pieces(Piece::Bishop);
        minors.len() <= 1
    }

    /// UCI text for a legal move, castling rendered as the king's two-square step.
    pub fn move_to_uci(&self, mv: Move) -> String {
        format!("{}", self.display_move(mv))
    }

    /// The (from, to, promotion) triple as the outside world sees it.
    pub fn display_move(&self, mv: Move) -> Move {
        if self.is_castle(mv) {
            let file = if (mv.to.file() as usize) > (mv.from.file() as usize) { File::G } else { File::C };
            return Move { from: mv.from, to: Square::new(file, mv.from.rank()), promotion: None };
        }
        mv
    }

    fn is_castle(&self, mv: Move) -> bool {
        self.board.piece_on(mv.from) == Some(Piece::King)
            && self.board.color_on(mv.to) == Some(self.board.side_to_move())
    }

    /// Resolve UCI text to a legal move. Matching is by (from, to); a missing
    /// promotion piece on a promoting pawn move defaults to a queen.
    pub fn parse_move(&self, text: &str) -> Result<Move> {
        let text = text.trim();
        let wanted: Move = text.parse().map_err(|_| EngineError::MalformedMove(text.to_string()))?;
        let mut found = None;
        self.board.generate_moves(|ml| {
            for m in ml {
                let shown = self.display_move(m);
                if shown.from != wanted.from || shown.to != wanted.to { continue; }
                let promo_ok = match wanted.promotion {
                    Some(p) => m.promotion == Some(p),
                    None => m.promotion.is_none() || m.promotion == Some(Piece::Queen),
                };
                if promo_ok { found = Some(m); break; }
            }
            found.is_some()
        });
        found.ok_or_else(|| EngineError::IllegalMove { mv: text.to_string(), fen: self.to_fen() })
    }

    /// Parse and play a move in place. On error the position is unchanged.
    pub fn make_move_uci(&mut self, mv_uci: &str) -> Result<Move> {
        let mv = self.parse_move(mv_uci)?;
        self.board.play(mv);
        Ok(mv)
    }

    pub fn set_from_start_and_moves(moves: &[String]) -> Result<Self> {
        Self::startpos().with_moves(moves)
    }

    pub fn with_moves(mut self, moves: &[String]) -> Result<Self> {
        for m in moves { self.make_move_uci(m)?; }
        Ok(self)
    }

    /// Rewrite a pawn move onto the opponent's back rank as a queen promotion.
    pub fn normalize_promotion(&self, mv: Move) -> Move {
        let stm = self.board.side_to_move();
        let last_rank = if stm == Color::White { Rank::Eighth } else { Rank::First };
        let is_own_pawn = self.board.piece_on(mv.from) == Some(Piece::Pawn)
            && self.board.color_on(mv.from) == Some(stm);
        if is_own_pawn && mv.to.rank() == last_rank {
            return Move { promotion: Some(Piece::Queen), ..mv };
        }
        mv
    }

    fn illegal(&self, mv: Move) -> EngineError {
        EngineError::IllegalMove { mv: self.move_to_uci(mv), fen: self.to_fen() }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}
