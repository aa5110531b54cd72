//! Error types for asset loading and world construction.
//!
//! The frame update itself never fails; everything here is raised while
//! reading manifests or assembling the world before the first step.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    /// Reading an asset or config file failed.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document did not match the expected shape.
    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("sprite '{0}' is not in the sprite sheet")]
    MissingSprite(String),

    #[error("dialogue graph '{0}' does not exist")]
    MissingDialogue(String),

    /// A node lists a connection to a node id the graph never defines.
    #[error("dialogue graph '{graph}': node '{node}' connects to unknown node '{target}'")]
    DialogueEdge {
        graph: String,
        node: String,
        target: String,
    },

    #[error("dialogue graph '{0}' has no nodes")]
    EmptyDialogue(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GameError {
    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse { path: path.into(), source }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
