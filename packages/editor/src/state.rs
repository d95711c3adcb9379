use folio_model::Block;
use serde::{Deserialize, Serialize};

use crate::selection::Selection;

/// Document root plus the current selection, if any.
///
/// Commands never modify a state in place: they return a new one, so a failed
/// command leaves the caller holding the previous state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    pub root: Block,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,
}

impl EditorState {
    pub fn new(root: Block, selection: Option<Selection>) -> Self {
        Self { root, selection }
    }

    pub fn with_caret(root: Block, node: Vec<usize>, offset: usize) -> Self {
        Self::new(root, Some(Selection::caret(node, offset)))
    }
}
