use std::fmt;

use thiserror::Error;

use crate::path::Path;

pub type TreeResult<T> = Result<T, TreeError>;

/// Kind of node a container or fragment holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Block,
    Inline,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Block => write!(f, "block"),
            NodeKind::Inline => write!(f, "inline"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Invalid path {path:?}: {reason}")]
    InvalidPath { path: Path, reason: String },

    #[error("Kind mismatch: expected {expected} nodes, found {found} nodes")]
    KindMismatch { expected: NodeKind, found: NodeKind },
}

impl TreeError {
    pub fn invalid_path(path: &[usize], reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_vec(),
            reason: reason.into(),
        }
    }

    pub fn kind_mismatch(expected: NodeKind, found: NodeKind) -> Self {
        Self::KindMismatch { expected, found }
    }
}
