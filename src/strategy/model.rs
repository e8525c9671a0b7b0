use std::sync::Arc;

use cozy_chess::Move;
use log::{debug, warn};

use crate::board::Position;
use crate::encoder::{encode_position, policy_index, POLICY_SIZE};
use crate::error::{EngineError, Result};
use crate::network::Predictor;
use crate::strategy::MoveGenerator;

/// Plays the legal move the predictor rates highest.
pub struct ModelStrategy {
    predictor: Arc<dyn Predictor>,
}

impl ModelStrategy {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self { Self { predictor } }

    pub fn predict(&self, position: &Position) -> Result<Vec<f32>> {
        let input = encode_position(position.board());
        let probs = self.predictor.infer(&input).map_err(EngineError::Predictor)?;
        if probs.len() != POLICY_SIZE {
            warn!("predictor returned {} entries, expected {}; missing entries count as zero", probs.len(), POLICY_SIZE);
        }
        Ok(probs)
    }
}

/// Probability for each legal move, in move-generation order. Entries the
/// predictor did not supply, and NaN, count as zero.
pub fn legal_move_probabilities(position: &Position, probs: &[f32]) -> Vec<(Move, f32)> {
    position
        .legal_moves()
        .into_iter()
        .map(|mv| {
            let p = policy_index(position, mv).and_then(|i| probs.get(i).copied()).unwrap_or(0.0);
            (mv, if p.is_nan() { 0.0 } else { p })
        })
        .collect()
}

/// Highest probability wins; ties go to the earliest legal move.
pub fn best_by_probability(scored: &[(Move, f32)]) -> Option<Move> {
    let mut best: Option<(Move, f32)> = None;
    for &(mv, p) in scored {
        if best.map_or(true, |(_, bp)| p > bp) { best = Some((mv, p)); }
    }
    best.map(|(mv, _)| mv)
}

impl MoveGenerator for ModelStrategy {
    fn generate_move(&mut self, position: &Position) -> Result<Move> {
        if !position.has_legal_moves() {
            return Err(EngineError::NoLegalMoves(position.to_fen()));
        }
        let probs = self.predict(position)?;
        let scored = legal_move_probabilities(position, &probs);
        let mv = best_by_probability(&scored).ok_or_else(|| EngineError::NoLegalMoves(position.to_fen()))?;
        debug!("model picked {} out of {} legal moves", position.move_to_uci(mv), scored.len());
        Ok(position.normalize_promotion(mv))
    }

    fn name(&self) -> &'static str { "model" }
}
