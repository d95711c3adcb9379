//! # Composite Commands
//!
//! Edits built from the structural primitives, each wrapped in the
//! tag / mutate / recover protocol of [`crate::annotations`].
//!
//! Every command takes the current [`EditorState`] by reference and returns a
//! new one. The first error aborts the whole command; since nothing was
//! written back, the caller simply keeps its previous state.

pub mod list;
pub mod paste;

use folio_model::mutations::{
    remove_in_range, remove_node_and_empty_parents, replace, replace_text, replace_with_fragment,
    split_block_at_path_and_offset,
};
use folio_model::traversal::{find_backward_from, find_forward_from, find_text_block_node_ancestor, last};
use folio_model::{is_selectable, node_at, path, Block, ChildContainer, Fragment, Inline, Node, NodeRef, Path};
use tracing::{debug, trace};

use crate::annotations::{
    annotate_selection, clear_selection_annotations, Annotator, SELECTION_ANCHOR, SELECTION_FOCUS,
};
use crate::editor::Editor;
use crate::errors::{EditorError, EditorResult};
use crate::selection::Selection;
use crate::state::EditorState;

pub(crate) fn require_selection(state: &EditorState) -> EditorResult<&Selection> {
    state
        .selection
        .as_ref()
        .ok_or_else(|| EditorError::selection("there is no selection"))
}

/// Position of a collapsed selection
pub(crate) fn caret(state: &EditorState) -> EditorResult<(Path, usize)> {
    let selection = require_selection(state)?;
    if !selection.is_collapsed() {
        return Err(EditorError::selection("expected a collapsed selection"));
    }
    Ok((selection.anchor_node.clone(), selection.anchor_offset))
}

pub(crate) fn recover<A: Annotator>(annotator: &A, tag: &str, root: &Block) -> EditorResult<Path> {
    annotator
        .current_path_of(tag, root)
        .ok_or_else(|| EditorError::selection(format!("no node carries the {} tag", tag)))
}

/// Offset just past the content of `node`: the character count of a text
/// leaf, 1 for an inline element, 0 for a block
pub(crate) fn end_offset(node: NodeRef<'_>) -> usize {
    match node {
        NodeRef::Inline(Inline::Text(leaf)) => leaf.char_len(),
        NodeRef::Inline(Inline::Element(_)) => 1,
        NodeRef::Block(_) => 0,
    }
}

/// First selectable node inside the block at `path`
pub(crate) fn start_of(path: &[usize], root: &Block) -> Option<Path> {
    let (found, _) = find_forward_from(|_, node| is_selectable(node), path, root)?;
    found.starts_with(path).then_some(found)
}

/// Last selectable node inside the block at `path` and the offset just past
/// its content
pub(crate) fn end_of(path: &[usize], root: &Block) -> Option<(Path, usize)> {
    let block = node_at(path, root)?.as_block()?;
    let (tail, _) = last(block);
    let (found, node) = find_backward_from(|_, node| is_selectable(node), &path::join(path, &tail), root)?;
    if !found.starts_with(path) {
        return None;
    }
    Some((found, end_offset(node)))
}

fn is_block_at(path: &[usize], root: &Block) -> bool {
    matches!(node_at(path, root), Some(NodeRef::Block(_)))
}

fn is_empty_leaf(inline: &Inline) -> bool {
    matches!(inline, Inline::Text(leaf) if leaf.text.is_empty())
}

/// `block` without the empty text leaves among its inlines, or `None` when
/// there is nothing to drop. One inline is always kept so the block can
/// still hold a caret.
fn compact_inlines(block: &Block) -> Option<Block> {
    let ChildContainer::InlineChildren(inlines) = &block.children else {
        return None;
    };
    let mut kept: Vec<Inline> = inlines.iter().filter(|inline| !is_empty_leaf(inline)).cloned().collect();
    if kept.is_empty() {
        kept.push(inlines.first().cloned().unwrap_or_else(|| Inline::text("")));
    }
    (kept.len() != inlines.len()).then(|| block.replace_children(ChildContainer::InlineChildren(kept)))
}

fn compact_at(path: &[usize], root: Block) -> EditorResult<Block> {
    let compacted = node_at(path, &root).and_then(NodeRef::as_block).and_then(compact_inlines);
    match compacted {
        Some(block) => Ok(replace(path, Node::Block(block), &root)?),
        None => Ok(root),
    }
}

/// Drops the empty text leaves splitting left in the caret's text block.
///
/// A caret on a dropped leaf moves to the end of the inline before it, or to
/// the start of the block when there is none.
pub(crate) fn settle_caret(caret_path: Path, offset: usize, root: Block) -> EditorResult<EditorState> {
    let settled = caret_path.split_last().and_then(|(&index, block_path)| {
        let block = node_at(block_path, &root)?.as_block()?;
        let ChildContainer::InlineChildren(inlines) = &block.children else {
            return None;
        };
        let compacted = compact_inlines(block)?;

        let kept_before = |end: usize| inlines[..end].iter().filter(|inline| !is_empty_leaf(inline)).count();
        let caret = match inlines.get(index) {
            Some(inline) if !is_empty_leaf(inline) => (kept_before(index), offset),
            _ => match inlines[..index.min(inlines.len())]
                .iter()
                .rposition(|inline| !is_empty_leaf(inline))
            {
                Some(previous) => (kept_before(previous), end_offset(NodeRef::Inline(&inlines[previous]))),
                None => (0, 0),
            },
        };
        Some((block_path.to_vec(), compacted, caret))
    });

    match settled {
        Some((block_path, compacted, (index, offset))) => {
            let root = replace(&block_path, Node::Block(compacted), &root)?;
            Ok(EditorState::with_caret(root, path::join(&block_path, &[index]), offset))
        }
        None => Ok(EditorState::with_caret(root, caret_path, offset)),
    }
}

/// Joins the block at `path` with its next sibling, which is removed.
///
/// `Ok(None)` when either block is missing or `join` declines.
pub(crate) fn join_with_next<J>(path: &[usize], root: &Block, join: J) -> EditorResult<Option<Block>>
where
    J: Fn(&Block, &Block) -> Option<Block>,
{
    let next = path::increment(path);
    let (Some(NodeRef::Block(first)), Some(NodeRef::Block(second))) = (node_at(path, root), node_at(&next, root))
    else {
        return Ok(None);
    };
    let Some(joined) = join(first, second) else {
        return Ok(None);
    };

    trace!(?path, "joining block with its next sibling");
    let root = replace_with_fragment(&next, Fragment::Blocks(Vec::new()), root)?;
    Ok(Some(replace(path, Node::Block(joined), &root)?))
}

/// Which half of a split boundary leaf keeps the tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keep {
    Head,
    Tail,
}

/// Splits the inline node carrying `tag` at `offset` into two siblings and
/// leaves the tag on one of them.
///
/// An inline element is atomic: offset 0 puts an empty text leaf in front of
/// it, any other offset puts one behind it. Callers drop these placeholders
/// with [`settle_caret`] once the edit is done.
pub(crate) fn split_boundary<A: Annotator>(
    annotator: &A,
    tag: &str,
    keep: Keep,
    offset: usize,
    root: &Block,
) -> EditorResult<Block> {
    let path = recover(annotator, tag, root)?;
    let (head, tail) = match node_at(&path, root) {
        Some(NodeRef::Inline(Inline::Text(leaf))) => {
            let (head, tail) = leaf.split_at(offset).ok_or_else(|| {
                EditorError::selection(format!("offset {} is past the end of the text at {:?}", offset, path))
            })?;
            (Inline::Text(head), Inline::Text(tail))
        }
        Some(NodeRef::Inline(element)) if offset == 0 => (Inline::text(""), element.clone()),
        Some(NodeRef::Inline(element)) => (element.clone(), Inline::text("")),
        _ => {
            return Err(EditorError::selection(format!(
                "selection endpoint {:?} is not an inline node",
                path
            )))
        }
    };

    let (head, tail) = (head.without_annotation(tag), tail.without_annotation(tag));
    let pair = match keep {
        Keep::Head => vec![head.with_annotation(tag), tail],
        Keep::Tail => vec![head, tail.with_annotation(tag)],
    };
    Ok(replace_with_fragment(&path, Fragment::Inlines(pair), root)?)
}

/// Splits `block` at the caret `relative` to it.
///
/// A caret after an inline element splits right behind the element. Empty
/// text leaves at the seam are dropped from both halves.
pub(crate) fn split_at_caret(relative: &[usize], offset: usize, block: &Block) -> EditorResult<(Block, Block)> {
    let after_element = offset > 0 && matches!(node_at(relative, block), Some(NodeRef::Inline(Inline::Element(_))));
    let split = match relative.split_last() {
        Some((&index, container)) if after_element => split_block_at_path_and_offset(container, index + 1, block),
        _ => split_block_at_path_and_offset(relative, offset, block),
    };
    let (before, after) = split
        .ok_or_else(|| EditorError::selection(format!("cannot split at offset {} of {:?}", offset, relative)))?;

    let container = path::parent(relative);
    let after_container = vec![0; container.len()];
    Ok((compact_at(&container, before)?, compact_at(&after_container, after)?))
}

/// Merges the text leaf at `path` with the text leaf right after it when
/// their marks match
fn merge_with_next_leaf(path: &[usize], root: &Block) -> EditorResult<Block> {
    let next = path::increment(path);
    let first = node_at(path, root).and_then(NodeRef::as_text);
    let second = node_at(&next, root).and_then(NodeRef::as_text);

    match (first, second) {
        (Some(left), Some(right)) if left.marks == right.marks => {
            let mut merged = left.with_text(format!("{}{}", left.text, right.text));
            merged.annotations.extend(right.annotations.iter().cloned());

            let root = replace_with_fragment(&next, Fragment::Inlines(Vec::new()), root)?;
            Ok(replace(path, Node::Inline(Inline::Text(merged)), &root)?)
        }
        _ => Ok(root.clone()),
    }
}

/// Deletes the selected content and collapses the selection to its start.
///
/// A collapsed selection is returned unchanged. Otherwise inline boundaries
/// are split at the selection offsets, everything between the two
/// boundaries is removed, and the text blocks holding the anchor and the
/// focus are joined. A block endpoint is removed whole, except an anchor
/// block whose offset places the selection after it.
pub fn remove_range<A: Annotator>(editor: &Editor<A>, state: &EditorState) -> EditorResult<EditorState> {
    let selection = require_selection(state)?.normalize();
    if selection.is_collapsed() {
        return Ok(state.clone());
    }
    debug!(?selection, "removing selected range");

    if selection.anchor_node == selection.focus_node {
        return remove_within_node(state, &selection);
    }

    let annotator = editor.annotator();
    let root = annotate_selection(annotator, &selection, &state.root)?;

    let (root, first_removed) = if is_block_at(&selection.anchor_node, &root) {
        let anchor = recover(annotator, SELECTION_ANCHOR, &root)?;
        let first = if selection.anchor_offset == 0 {
            anchor
        } else {
            path::increment(&anchor)
        };
        (root, first)
    } else {
        let root = split_boundary(annotator, SELECTION_ANCHOR, Keep::Head, selection.anchor_offset, &root)?;
        let anchor = recover(annotator, SELECTION_ANCHOR, &root)?;
        (root, path::increment(&anchor))
    };

    // the anchor split may have shifted the focus
    let focus = recover(annotator, SELECTION_FOCUS, &root)?;
    let (root, last_removed) = if is_block_at(&focus, &root) {
        (root, focus)
    } else {
        let root = split_boundary(annotator, SELECTION_FOCUS, Keep::Tail, selection.focus_offset, &root)?;
        let focus = recover(annotator, SELECTION_FOCUS, &root)?;
        // the focus always has the split-off head in front of it
        let last = path::decrement(&focus)
            .ok_or_else(|| EditorError::selection("selection focus has no preceding sibling"))?;
        (root, last)
    };

    let root = remove_in_range(&first_removed, &last_removed, &root);
    trace!(?first_removed, ?last_removed, "removed nodes between selection endpoints");

    let root = join_endpoint_blocks(annotator, &root)?;
    let (caret_path, offset) = removal_caret(annotator, &selection, &first_removed, &root)?;
    let root = clear_selection_annotations(annotator, &root);
    settle_caret(caret_path, offset, root)
}

fn remove_within_node(state: &EditorState, selection: &Selection) -> EditorResult<EditorState> {
    let path = &selection.anchor_node;
    let root = match node_at(path, &state.root) {
        Some(NodeRef::Inline(Inline::Text(leaf))) => {
            if selection.focus_offset > leaf.char_len() {
                return Err(EditorError::selection(format!(
                    "offset {} is past the end of the text at {:?}",
                    selection.focus_offset, path
                )));
            }
            let text: String = leaf
                .text
                .chars()
                .take(selection.anchor_offset)
                .chain(leaf.text.chars().skip(selection.focus_offset))
                .collect();
            replace_text(path, text, &state.root)?
        }
        Some(NodeRef::Inline(Inline::Element(_))) => {
            return settle_caret(path.clone(), 0, replace(path, Node::Inline(Inline::text("")), &state.root)?);
        }
        // blocks are only removed as part of a wider range
        _ => state.root.clone(),
    };
    settle_caret(path.clone(), selection.anchor_offset, root)
}

fn join_endpoint_blocks<A: Annotator>(annotator: &A, root: &Block) -> EditorResult<Block> {
    let (Some(anchor), Some(focus)) = (
        annotator.current_path_of(SELECTION_ANCHOR, root),
        annotator.current_path_of(SELECTION_FOCUS, root),
    ) else {
        return Ok(root.clone());
    };

    let (Some((anchor_block, first)), Some((focus_block, second))) = (
        find_text_block_node_ancestor(&anchor, root),
        find_text_block_node_ancestor(&focus, root),
    ) else {
        return Ok(root.clone());
    };

    if anchor_block == focus_block {
        return merge_with_next_leaf(&anchor, root);
    }

    match crate::join::join_blocks(first, second) {
        Some(joined) => {
            let root = replace(&anchor_block, Node::Block(joined), root)?;
            Ok(remove_node_and_empty_parents(&focus_block, &root))
        }
        None => Ok(root.clone()),
    }
}

/// Where the caret lands once a range is gone: the anchor if it survived,
/// then the start of what followed the focus, then the nearest selectable
/// node around the removed range
fn removal_caret<A: Annotator>(
    annotator: &A,
    selection: &Selection,
    first_removed: &[usize],
    root: &Block,
) -> EditorResult<(Path, usize)> {
    if let Some(anchor) = annotator.current_path_of(SELECTION_ANCHOR, root) {
        return Ok((anchor, selection.anchor_offset));
    }
    if let Some(focus) = annotator.current_path_of(SELECTION_FOCUS, root) {
        return Ok((focus, 0));
    }
    if let Some((found, _)) = find_forward_from(|_, node| is_selectable(node), first_removed, root) {
        return Ok((found, 0));
    }

    let (tail, _) = last(root);
    find_backward_from(|_, node| is_selectable(node), &tail, root)
        .map(|(found, node)| (found, end_offset(node)))
        .ok_or_else(|| EditorError::selection("nothing selectable is left after removing the range"))
}

/// Splits the block returned by `find_ancestor` for the caret, putting the
/// caret at the start of the second half.
///
/// A non-collapsed selection is deleted first.
pub fn split_block<A, F>(editor: &Editor<A>, state: &EditorState, find_ancestor: F) -> EditorResult<EditorState>
where
    A: Annotator,
    F: for<'a> Fn(&[usize], &'a Block) -> Option<(Path, &'a Block)>,
{
    let state = remove_range(editor, state)?;
    let (caret_path, offset) = caret(&state)?;

    let (ancestor_path, ancestor) = find_ancestor(&caret_path, &state.root)
        .ok_or_else(|| EditorError::precondition("no enclosing block to split"))?;
    if ancestor_path.is_empty() {
        return Err(EditorError::precondition("the root block cannot be split"));
    }

    let relative = &caret_path[ancestor_path.len()..];
    let (before, after) = split_at_caret(relative, offset, ancestor)?;
    debug!(?ancestor_path, offset, "splitting block");

    let root = replace_with_fragment(&ancestor_path, Fragment::Blocks(vec![before, after]), &state.root)?;

    // the split node opens the second half, at index 0 on every level
    let mut caret_path = path::increment(&ancestor_path);
    caret_path.extend(std::iter::repeat(0).take(relative.len()));
    Ok(EditorState::with_caret(root, caret_path, 0))
}

/// Splits the text block holding the caret in two
pub fn split_text_block<A: Annotator>(editor: &Editor<A>, state: &EditorState) -> EditorResult<EditorState> {
    split_block(editor, state, find_text_block_node_ancestor)
}
