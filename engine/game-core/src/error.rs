//! Errors a rules engine may raise.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("bag inconsistency: {0}")]
    BagMismatch(String),

    #[error("no candidate move has been set")]
    NoCandidate,

    #[error("unknown player: {0}")]
    UnknownPlayer(u8),
}
