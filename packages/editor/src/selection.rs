//! # Selection
//!
//! A selection is a pair of positions, each a path to a selectable node plus
//! an offset inside it. Text leaves count characters. An inline element is a
//! single unit: offset 0 sits before it and 1 after it. Blocks use 0; as a
//! selection endpoint a block is taken whole.
//!
//! The anchor is where the selection started, the focus where it ends; the
//! focus may come first in document order.

use folio_model::{path, Path};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub anchor_node: Path,
    pub anchor_offset: usize,
    pub focus_node: Path,
    pub focus_offset: usize,
}

impl Selection {
    /// Collapsed selection at a single position
    pub fn caret(node: Path, offset: usize) -> Self {
        Self {
            anchor_node: node.clone(),
            anchor_offset: offset,
            focus_node: node,
            focus_offset: offset,
        }
    }

    pub fn range(anchor_node: Path, anchor_offset: usize, focus_node: Path, focus_offset: usize) -> Self {
        Self {
            anchor_node,
            anchor_offset,
            focus_node,
            focus_offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor_node == self.focus_node && self.anchor_offset == self.focus_offset
    }

    /// Same selection with the anchor first in document order
    pub fn normalize(&self) -> Selection {
        let order = path::compare(&self.anchor_node, &self.focus_node)
            .then(self.anchor_offset.cmp(&self.focus_offset));

        match order {
            Ordering::Greater => Selection::range(
                self.focus_node.clone(),
                self.focus_offset,
                self.anchor_node.clone(),
                self.anchor_offset,
            ),
            _ => self.clone(),
        }
    }
}
