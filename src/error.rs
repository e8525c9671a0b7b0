use thiserror::Error;

/// Errors surfaced by the engine and the board adapter.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("malformed move {0:?}: expected UCI notation such as e2e4 or e7e8q")]
    MalformedMove(String),

    #[error("illegal move {mv} in position {fen}")]
    IllegalMove { mv: String, fen: String },

    /// The engine was asked for a move in a position where none exists.
    #[error("no legal moves in position {0}")]
    NoLegalMoves(String),

    #[error("predictor failed: {0:#}")]
    Predictor(anyhow::Error),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
