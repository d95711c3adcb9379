//! # Annotations
//!
//! Any mutation that changes an array length along a path invalidates that
//! path. Composite edits therefore follow a tag / mutate / recover protocol:
//!
//! 1. **Tag** every node whose position must survive the edit
//! 2. **Mutate** with the structural primitives
//! 3. **Recover** the tagged nodes' current paths, then strip the tags
//!
//! Tags live in the nodes' own annotation sets, so they travel with a node
//! through splits (both halves keep them) and joins (the merged node keeps
//! the union).

use folio_model::mutations::replace;
use folio_model::traversal::find_forward_from;
use folio_model::visitor::map;
use folio_model::{node_at, Block, Node, NodeRef, Path, TreeError};

use crate::errors::EditorResult;
use crate::selection::Selection;

pub const SELECTION_ANCHOR: &str = "__selection_anchor__";
pub const SELECTION_FOCUS: &str = "__selection_focus__";
pub const LIFT: &str = "__lift__";

/// Marks nodes so their paths can be recovered after the tree changes shape
pub trait Annotator {
    /// Attaches `tag` to the node at `path`
    fn tag_node(&self, tag: &str, path: &[usize], root: &Block) -> EditorResult<Block>;

    /// Path of the first node carrying `tag`, in document order
    fn current_path_of(&self, tag: &str, root: &Block) -> Option<Path>;

    /// Removes `tag` from every node of the tree
    fn clear_tags(&self, tag: &str, root: &Block) -> Block;

    fn has_tag(&self, tag: &str, node: NodeRef<'_>) -> bool;
}

/// Stores tags in the annotation set of the tagged node
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeAnnotations;

impl Annotator for NodeAnnotations {
    fn tag_node(&self, tag: &str, path: &[usize], root: &Block) -> EditorResult<Block> {
        let node = node_at(path, root).ok_or_else(|| TreeError::invalid_path(path, "no node to tag"))?;
        Ok(replace(path, node.to_node().with_annotation(tag), root)?)
    }

    fn current_path_of(&self, tag: &str, root: &Block) -> Option<Path> {
        find_forward_from(|_, node| self.has_tag(tag, node), &[], root).map(|(path, _)| path)
    }

    fn clear_tags(&self, tag: &str, root: &Block) -> Block {
        match map(&|node: Node| node.without_annotation(tag), Node::Block(root.clone())) {
            Node::Block(block) => block,
            Node::Inline(_) => root.clone(),
        }
    }

    fn has_tag(&self, tag: &str, node: NodeRef<'_>) -> bool {
        node.annotations().contains(tag)
    }
}

/// Tags the anchor and focus nodes of `selection`
pub fn annotate_selection<A: Annotator>(annotator: &A, selection: &Selection, root: &Block) -> EditorResult<Block> {
    let root = annotator.tag_node(SELECTION_ANCHOR, &selection.anchor_node, root)?;
    annotator.tag_node(SELECTION_FOCUS, &selection.focus_node, &root)
}

/// Rebuilds a selection from the surviving selection tags
pub fn selection_from_annotations<A: Annotator>(
    annotator: &A,
    root: &Block,
    anchor_offset: usize,
    focus_offset: usize,
) -> Option<Selection> {
    let anchor = annotator.current_path_of(SELECTION_ANCHOR, root)?;
    let focus = annotator.current_path_of(SELECTION_FOCUS, root)?;
    Some(Selection::range(anchor, anchor_offset, focus, focus_offset))
}

pub fn clear_selection_annotations<A: Annotator>(annotator: &A, root: &Block) -> Block {
    let root = annotator.clear_tags(SELECTION_ANCHOR, root);
    annotator.clear_tags(SELECTION_FOCUS, &root)
}
