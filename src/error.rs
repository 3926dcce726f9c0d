//! Error types.
//!
//! - [`SpriteError`] is returned by component constructors when the data
//!   handed to them cannot drive a valid entity. Per-frame updates never fail.
//! - [`LevelError`] wraps spawn failures with the descriptor that caused them,
//!   so a broken level aborts loading with a useful diagnostic instead of
//!   taking the whole process down.

use thiserror::Error;

use crate::components::waypoint::Direction;

/// Construction-time validation failure for a single entity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpriteError {
    /// The entity could never produce a valid frame or position
    /// (empty frame sequence, diagonal waypoint leg).
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Parameters are out of range (inverted bounds, negative speed,
    /// unknown item kind).
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Failure while turning a level or overworld description into a scene.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("entity #{index} ({kind}): {source}")]
    Entity {
        index: usize,
        kind: &'static str,
        #[source]
        source: SpriteError,
    },
    #[error("entity #{index} ({kind}): unknown image key '{key}'")]
    MissingImage {
        index: usize,
        kind: &'static str,
        key: String,
    },
    #[error("unknown image key '{0}'")]
    UnknownImage(String),
    #[error("overworld icon: {0}")]
    Icon(#[source] SpriteError),
    #[error("no level description for level {0}")]
    MissingLevel(u32),
    #[error("overworld has no node for level {0}")]
    MissingNode(u32),
    #[error("overworld path {path}: {source}")]
    Path {
        path: u32,
        #[source]
        source: SpriteError,
    },
    #[error("overworld node {level}: {direction:?} edge points at unknown path {path}")]
    MissingPath {
        level: u32,
        direction: Direction,
        path: u32,
    },
    #[error("overworld node {level}: {direction:?} edge on path {path} does not lead to another node")]
    DetachedPath {
        level: u32,
        direction: Direction,
        path: u32,
    },
    #[error("failed to parse description: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read description: {0}")]
    Io(#[from] std::io::Error),
}
