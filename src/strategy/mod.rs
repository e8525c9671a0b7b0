//! Interchangeable move generators behind one `generate_move` contract.

pub mod minimax;
pub mod model;
pub mod random;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use cozy_chess::Move;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::error::Result;
use crate::network::{LinearPolicy, Predictor};

pub use minimax::MinimaxStrategy;
pub use model::ModelStrategy;
pub use random::RandomStrategy;

pub const DEFAULT_DEPTH: u32 = 5;

/// Returns a move that is legal for the side to move, or fails when there is
/// none. The position is never modified.
pub trait MoveGenerator: Send {
    fn generate_move(&mut self, position: &Position) -> Result<Move>;

    fn name(&self) -> &'static str;
}

pub(crate) fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_entropy(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Random,
    Minimax,
    Model,
}

/// Per-strategy parameters, fixed for the life of a generator.
#[derive(Clone)]
pub enum StrategyConfig {
    Random,
    Minimax { depth: u32 },
    Model { predictor: Arc<dyn Predictor> },
}

impl fmt::Debug for StrategyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyConfig::Random => write!(f, "Random"),
            StrategyConfig::Minimax { depth } => write!(f, "Minimax {{ depth: {depth} }}"),
            StrategyConfig::Model { .. } => write!(f, "Model"),
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self { StrategyConfig::Minimax { depth: DEFAULT_DEPTH } }
}

impl StrategyConfig {
    /// Build a config from command-line style options. The model strategy
    /// needs a policy file, which is loaded once here and shared afterwards.
    pub fn from_kind(kind: StrategyKind, depth: u32, model: Option<&Path>) -> anyhow::Result<Self> {
        Ok(match kind {
            StrategyKind::Random => StrategyConfig::Random,
            StrategyKind::Minimax => StrategyConfig::Minimax { depth },
            StrategyKind::Model => {
                let Some(path) = model else { bail!("the model strategy needs a policy file (--model)") };
                let net = LinearPolicy::load(path).with_context(|| format!("load model {}", path.display()))?;
                StrategyConfig::Model { predictor: Arc::new(net) }
            }
        })
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            StrategyConfig::Random => StrategyKind::Random,
            StrategyConfig::Minimax { .. } => StrategyKind::Minimax,
            StrategyConfig::Model { .. } => StrategyKind::Model,
        }
    }
}

pub enum Strategy {
    Random(RandomStrategy),
    Minimax(MinimaxStrategy),
    Model(ModelStrategy),
}

impl Strategy {
    pub fn new(config: &StrategyConfig, seed: Option<u64>) -> Self {
        match config {
            StrategyConfig::Random => Strategy::Random(RandomStrategy::new(seed)),
            StrategyConfig::Minimax { depth } => Strategy::Minimax(MinimaxStrategy::new(*depth, seed)),
            StrategyConfig::Model { predictor } => Strategy::Model(ModelStrategy::new(predictor.clone())),
        }
    }
}

impl MoveGenerator for Strategy {
    fn generate_move(&mut self, position: &Position) -> Result<Move> {
        match self {
            Strategy::Random(s) => s.generate_move(position),
            Strategy::Minimax(s) => s.generate_move(position),
            Strategy::Model(s) => s.generate_move(position),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Strategy::Random(s) => s.name(),
            Strategy::Minimax(s) => s.name(),
            Strategy::Model(s) => s.name(),
        }
    }
}
