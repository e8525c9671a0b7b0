pub mod eval;
pub mod select;
pub mod tree;

pub use select::select_move;
pub use tree::{NodeId, SearchNode, SearchStats, SearchTree};
