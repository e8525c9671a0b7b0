use cozy_chess::Move;
use log::debug;
use rand::rngs::SmallRng;

use crate::board::Position;
use crate::error::{EngineError, Result};
use crate::search::{select_move, SearchStats, SearchTree};
use crate::strategy::{make_rng, MoveGenerator, DEFAULT_DEPTH};

/// Material minimax over a forward-pruned tree, random tie-break at the root.
pub struct MinimaxStrategy {
    depth: u32,
    rng: SmallRng,
    last_stats: Option<SearchStats>,
}

impl Default for MinimaxStrategy {
    fn default() -> Self { Self::new(DEFAULT_DEPTH, None) }
}

impl MinimaxStrategy {
    /// A depth of 0 is searched as 1: the root must be expanded to have a move to play.
    pub fn new(depth: u32, seed: Option<u64>) -> Self {
        Self { depth: depth.max(1), rng: make_rng(seed), last_stats: None }
    }

    pub fn depth(&self) -> u32 { self.depth }

    /// Counters from the most recent search.
    pub fn last_stats(&self) -> Option<SearchStats> { self.last_stats }

    pub fn search(&self, position: &Position, depth: u32) -> SearchTree {
        SearchTree::build(position, depth.max(1), position.maximizing())
    }

    pub fn generate_move_with_depth(&mut self, position: &Position, depth: u32) -> Result<Move> {
        if !position.has_legal_moves() {
            return Err(EngineError::NoLegalMoves(position.to_fen()));
        }
        let tree = self.search(position, depth);
        let mv = select_move(&tree, &mut self.rng)?;
        self.last_stats = Some(tree.stats());
        debug!(
            "minimax picked {} value={} line={:?}",
            position.move_to_uci(mv),
            tree.root().value(),
            tree.best_line().iter().map(|m| m.to_string()).collect::<Vec<_>>()
        );
        Ok(mv)
    }
}

impl MoveGenerator for MinimaxStrategy {
    fn generate_move(&mut self, position: &Position) -> Result<Move> {
        self.generate_move_with_depth(position, self.depth)
    }

    fn name(&self) -> &'static str { "minimax" }
}
