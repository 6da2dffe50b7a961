use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoxError {
    #[error("Invalid filter specification: {0}")]
    InvalidSpecification(String),

    #[error("Failed to decode {}: {reason}", path.display())]
    DecodeFailure { path: PathBuf, reason: String },

    #[error("Failed to encode {}: {reason}", path.display())]
    EncodeFailure { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ffmpeg not found: {0}")]
    CodecNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl VoxError {
    pub(crate) fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::DecodeFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn encode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::EncodeFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VoxError>;
