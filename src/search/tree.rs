use std::time::{Duration, Instant};

use cozy_chess::Move;
use log::debug;

use crate::board::Position;
use crate::search::eval::material_eval;

/// Index of a node inside a [`SearchTree`].
pub type NodeId = usize;

pub const ROOT: NodeId = 0;

const PROGRESS_INTERVAL: u64 = 10_000;

/// One visited position. Children are indices into the owning tree's arena.
#[derive(Clone, Debug)]
pub struct SearchNode {
    position: Position,
    mv: Option<Move>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    maximizing: bool,
    static_eval: i32,
    value: i32,
}

impl SearchNode {
    pub fn position(&self) -> &Position { &self.position }
    /// Move that produced this node; `None` at the root.
    pub fn mv(&self) -> Option<Move> { self.mv }
    pub fn parent(&self) -> Option<NodeId> { self.parent }
    pub fn children(&self) -> &[NodeId] { &self.children }
    pub fn is_leaf(&self) -> bool { self.children.is_empty() }
    /// True when the side to move at this node maximizes the evaluation.
    pub fn maximizing(&self) -> bool { self.maximizing }
    pub fn static_eval(&self) -> i32 { self.static_eval }
    /// Propagated minimax value.
    pub fn value(&self) -> i32 { self.value }
}

#[derive(Default, Debug, Clone, Copy)]
pub struct SearchStats {
    pub nodes: u64,
    pub expanded: u64,
    /// Nodes with depth left whose expansion the forward-pruning test refused.
    pub pruned: u64,
    pub elapsed: Duration,
}

/// Depth-bounded game tree under a forward-pruning cut, with minimax values
/// cached on every node.
///
/// The cut is heuristic: a non-root node is expanded only when its static
/// material score did not get worse, from the point of view of its own side to
/// move, compared to its parent (`>=` for the maximizing side, `<=` for the
/// minimizing side). Deep refutations behind such a node are never seen.
#[derive(Clone, Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    stats: SearchStats,
}

impl SearchTree {
    pub fn build(position: &Position, depth: u32, maximizing: bool) -> Self {
        let start = Instant::now();
        let mut builder = TreeBuilder { nodes: Vec::with_capacity(1024), stats: SearchStats::default() };
        let root = builder.push(position.clone(), None, None, maximizing);
        builder.expand(root, depth);
        builder.propagate();
        builder.stats.elapsed = start.elapsed();
        let tree = SearchTree { nodes: builder.nodes, stats: builder.stats };
        debug!(
            "tree depth={} nodes={} expanded={} pruned={} root_value={} in {:?}",
            depth, tree.stats.nodes, tree.stats.expanded, tree.stats.pruned, tree.root().value, tree.stats.elapsed
        );
        tree
    }

    pub fn root(&self) -> &SearchNode { &self.nodes[ROOT] }

    pub fn node(&self, id: NodeId) -> &SearchNode { &self.nodes[id] }

    pub fn value(&self, id: NodeId) -> i32 { self.nodes[id].value }

    pub fn node_count(&self) -> usize { self.nodes.len() }

    pub fn stats(&self) -> SearchStats { self.stats }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &SearchNode> + '_ {
        self.nodes[id].children.iter().map(move |&c| &self.nodes[c])
    }

    /// Nodes in creation order (pre-order, root first).
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> + '_ {
        self.nodes.iter().enumerate()
    }

    /// Moves along the line where every node's value comes from its first
    /// child carrying the same value.
    pub fn best_line(&self) -> Vec<Move> {
        let mut line = Vec::new();
        let mut id = ROOT;
        while let Some(&next) = self.nodes[id].children.iter().find(|&&c| self.nodes[c].value == self.nodes[id].value) {
            if let Some(mv) = self.nodes[next].mv { line.push(mv); }
            id = next;
        }
        line
    }
}

struct TreeBuilder {
    nodes: Vec<SearchNode>,
    stats: SearchStats,
}

impl TreeBuilder {
    fn push(&mut self, position: Position, mv: Option<Move>, parent: Option<NodeId>, maximizing: bool) -> NodeId {
        let static_eval = material_eval(position.board());
        self.nodes.push(SearchNode { position, mv, parent, children: Vec::new(), maximizing, static_eval, value: static_eval });
        self.stats.nodes += 1;
        if self.stats.nodes % PROGRESS_INTERVAL == 0 {
            debug!("search progress: {} nodes", self.stats.nodes);
        }
        self.nodes.len() - 1
    }

    fn should_expand(&self, id: NodeId) -> bool {
        let node = &self.nodes[id];
        let Some(parent) = node.parent else { return true };
        let parent_eval = self.nodes[parent].static_eval;
        if node.maximizing { node.static_eval >= parent_eval } else { node.static_eval <= parent_eval }
    }

    fn expand(&mut self, id: NodeId, depth: u32) {
        if depth == 0 { return; }
        if !self.should_expand(id) {
            self.stats.pruned += 1;
            return;
        }
        // No legal moves: mate or stalemate, the node stays a leaf.
        let moves = self.nodes[id].position.legal_moves();
        if moves.is_empty() { return; }
        self.stats.expanded += 1;
        let child_maximizing = !self.nodes[id].maximizing;
        for mv in moves {
            let child_pos = self.nodes[id].position.play_legal(mv);
            let child = self.push(child_pos, Some(mv), Some(id), child_maximizing);
            self.nodes[id].children.push(child);
            self.expand(child, depth - 1);
        }
    }

    // Children always have larger indices than their parent, so one reverse
    // sweep sees every child value before the parent needs it.
    fn propagate(&mut self) {
        for id in (0..self.nodes.len()).rev() {
            let node = &self.nodes[id];
            if node.children.is_empty() { continue; }
            let values = node.children.iter().map(|&c| self.nodes[c].value);
            let best = if node.maximizing { values.max() } else { values.min() };
            if let Some(v) = best { self.nodes[id].value = v; }
        }
    }
}
