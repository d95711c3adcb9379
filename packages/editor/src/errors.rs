//! Error types for the editor

use folio_model::TreeError;
use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Invalid selection: {0}")]
    InvalidSelectionState(String),

    #[error("Cannot apply edit: {0}")]
    StructuralPrecondition(String),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Conversion error: {0}")]
    Conversion(String),
}

impl EditorError {
    pub(crate) fn selection(reason: impl Into<String>) -> Self {
        EditorError::InvalidSelectionState(reason.into())
    }

    pub(crate) fn precondition(reason: impl Into<String>) -> Self {
        EditorError::StructuralPrecondition(reason.into())
    }
}
