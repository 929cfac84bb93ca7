//! Rendering errors

use std::path::PathBuf;

use thiserror::Error;

/// Library result type
pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("frame index {index} out of range for {concept:?} ({len} frames)")]
    FrameOutOfRange {
        concept: String,
        index: usize,
        len: usize,
    },

    #[error("i/o error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode canvas")]
    Encode(#[from] serde_json::Error),

    #[error("unknown concept: {0}")]
    UnknownConcept(String),
}
