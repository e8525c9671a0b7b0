// Move selection for an automated chess player
pub mod arena;
pub mod board;
pub mod encoder;
pub mod error;
pub mod network;
pub mod search;
pub mod strategy;
pub mod uci;

pub use board::Position;
pub use error::{EngineError, Result};
pub use strategy::{MoveGenerator, Strategy, StrategyConfig, StrategyKind};
