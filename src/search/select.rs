use cozy_chess::Move;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{EngineError, Result};
use crate::search::tree::{SearchTree, ROOT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub value: i32,
}

/// Root moves paired with their propagated minimax values, in move-generation order.
pub fn root_candidates(tree: &SearchTree) -> Vec<ScoredMove> {
    tree.children(ROOT)
        .filter_map(|n| n.mv().map(|mv| ScoredMove { mv, value: n.value() }))
        .collect()
}

/// Shuffle, then stable-sort best first. Equal values end up in random order,
/// so the head of the list is a uniform pick among the top scorers.
pub fn order_candidates<R: Rng + ?Sized>(candidates: &mut [ScoredMove], maximizing: bool, rng: &mut R) {
    candidates.shuffle(rng);
    if maximizing {
        candidates.sort_by(|a, b| b.value.cmp(&a.value));
    } else {
        candidates.sort_by(|a, b| a.value.cmp(&b.value));
    }
}

/// Pick the root move to play and normalize a promoting pawn move to a queen.
pub fn select_move<R: Rng + ?Sized>(tree: &SearchTree, rng: &mut R) -> Result<Move> {
    let root = tree.root();
    let mut candidates = root_candidates(tree);
    order_candidates(&mut candidates, root.maximizing(), rng);
    let best = candidates
        .first()
        .ok_or_else(|| EngineError::NoLegalMoves(root.position().to_fen()))?;
    Ok(root.position().normalize_promotion(best.mv))
}
