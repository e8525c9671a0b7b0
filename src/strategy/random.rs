use cozy_chess::Move;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::board::Position;
use crate::error::{EngineError, Result};
use crate::strategy::{make_rng, MoveGenerator};

/// Uniform choice among the legal moves. Under-promotions are as likely as any other move.
pub struct RandomStrategy {
    rng: SmallRng,
}

impl RandomStrategy {
    pub fn new(seed: Option<u64>) -> Self { Self { rng: make_rng(seed) } }
}

impl Default for RandomStrategy {
    fn default() -> Self { Self::new(None) }
}

impl MoveGenerator for RandomStrategy {
    fn generate_move(&mut self, position: &Position) -> Result<Move> {
        let moves = position.legal_moves();
        moves
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| EngineError::NoLegalMoves(position.to_fen()))
    }

    fn name(&self) -> &'static str { "random" }
}
