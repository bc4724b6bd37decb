//! Error types for fxrack-core.

use crate::engine::NodeId;
use crate::stage::StageId;
use thiserror::Error;

/// Error type for fxrack-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown stage: {0}")]
    UnknownStage(StageId),

    #[error("Stage {0} has no realized topology")]
    UnrealizedStage(StageId),

    #[error("Non-finite value {value} for stage {stage}")]
    NonFiniteValue { stage: StageId, value: f32 },

    #[error("Unknown node: {0:?}")]
    UnknownNode(NodeId),

    #[error("Invalid source: {0}")]
    InvalidSource(String),

    #[error("Impulse response: {0}")]
    ImpulseResponse(String),

    #[error("WAV decode failed: {0}")]
    Wav(#[from] hound::Error),

    #[error("Config parse failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
