//! # Paste
//!
//! Pasting always starts by deleting a non-collapsed selection. Inline
//! content is then spliced next to the caret; block content splits the
//! surrounding text block and is stitched back into it:
//!
//! ```text
//! "ab|cd" + [p "x", p "y"]
//!
//! split           p "ab"   p "x"   p "y"   p "cd"
//! join forward    p "abx"          p "y"   p "cd"
//! join backward   p "abx"          p "y|cd"
//! ```

use folio_model::mutations::{insert_before, replace_text, replace_with_fragment};
use folio_model::traversal::find_text_block_node_ancestor;
use folio_model::{is_text_block, node_at, path, Block, Fragment, Inline, NodeRef};
use tracing::debug;

use super::{
    caret, end_of, join_with_next, recover, remove_range, settle_caret, split_at_caret, split_boundary, Keep,
};
use crate::annotations::{clear_selection_annotations, Annotator, SELECTION_ANCHOR, SELECTION_FOCUS};
use crate::editor::Editor;
use crate::errors::{EditorError, EditorResult};
use crate::join::join_blocks;
use crate::state::EditorState;

/// Turns pasted HTML into document nodes
pub trait HtmlConverter {
    fn html_to_fragment(&self, html: &str) -> Result<Fragment, String>;
}

/// Pastes plain text. A single line goes into the caret's text leaf; several
/// lines become one text block each.
pub fn paste_text<A: Annotator>(editor: &Editor<A>, state: &EditorState, text: &str) -> EditorResult<EditorState> {
    if text.is_empty() {
        return Ok(state.clone());
    }

    let lines: Vec<&str> = text.split('\n').map(|line| line.trim_end_matches('\r')).collect();
    if let [line] = lines.as_slice() {
        return paste_line(editor, state, line);
    }

    let paragraph = &editor.config().paragraph;
    let blocks = lines
        .iter()
        .map(|line| Block::text_block(paragraph.clone(), *line))
        .collect();
    paste_block_fragment(editor, state, blocks)
}

fn paste_line<A: Annotator>(editor: &Editor<A>, state: &EditorState, line: &str) -> EditorResult<EditorState> {
    let state = remove_range(editor, state)?;
    let (caret_path, offset) = caret(&state)?;

    let Some(leaf) = node_at(&caret_path, &state.root).and_then(NodeRef::as_text) else {
        return paste_inline_fragment(editor, &state, vec![Inline::text(line)]);
    };

    let (head, tail) = leaf
        .split_at(offset)
        .ok_or_else(|| EditorError::selection(format!("offset {} is past the end of the text", offset)))?;
    let root = replace_text(&caret_path, format!("{}{}{}", head.text, line, tail.text), &state.root)?;
    Ok(EditorState::with_caret(root, caret_path, offset + line.chars().count()))
}

/// Splices inline nodes in at the caret; the caret ends up right after them.
///
/// Empty text leaves the splice leaves next to the pasted nodes are dropped.
pub fn paste_inline_fragment<A: Annotator>(
    editor: &Editor<A>,
    state: &EditorState,
    inlines: Vec<Inline>,
) -> EditorResult<EditorState> {
    let state = remove_range(editor, state)?;
    if inlines.is_empty() {
        return Ok(state);
    }
    let (caret_path, offset) = caret(&state)?;
    let annotator = editor.annotator();

    let root = annotator.tag_node(SELECTION_FOCUS, &caret_path, &state.root)?;
    let root = split_boundary(annotator, SELECTION_FOCUS, Keep::Tail, offset, &root)?;
    let tail = recover(annotator, SELECTION_FOCUS, &root)?;
    debug!(?tail, count = inlines.len(), "pasting inline fragment");
    let root = insert_before(&tail, Fragment::Inlines(inlines), &root)?;

    let caret_path = recover(annotator, SELECTION_FOCUS, &root)?;
    let root = clear_selection_annotations(annotator, &root);
    settle_caret(caret_path, 0, root)
}

/// Pastes blocks at the caret, splitting the text block around it.
///
/// The first pasted block joins the head of the split when both are text
/// blocks, and the tail joins the last pasted block likewise. The caret ends
/// up between the pasted content and the tail.
pub fn paste_block_fragment<A: Annotator>(
    editor: &Editor<A>,
    state: &EditorState,
    blocks: Vec<Block>,
) -> EditorResult<EditorState> {
    let state = remove_range(editor, state)?;
    if blocks.is_empty() {
        return Ok(state);
    }
    let (caret_path, offset) = caret(&state)?;
    let annotator = editor.annotator();

    let (block_path, text_block) = find_text_block_node_ancestor(&caret_path, &state.root)
        .ok_or_else(|| EditorError::precondition("blocks can only be pasted inside a text block"))?;
    let relative = &caret_path[block_path.len()..];
    let (before, after) = split_at_caret(relative, offset, text_block)?;
    let after = annotator.tag_node(SELECTION_FOCUS, &[0], &after)?;

    debug!(?block_path, count = blocks.len(), "pasting block fragment");
    let mut replacement = Vec::with_capacity(blocks.len() + 2);
    replacement.push(before);
    replacement.extend(blocks);
    replacement.push(after);
    let root = replace_with_fragment(&block_path, Fragment::Blocks(replacement), &state.root)?;

    let root = join_text_blocks(&block_path, &root)?.unwrap_or(root);

    let tail = recover(annotator, SELECTION_FOCUS, &root)?;
    let tail_block = path::parent(&tail);
    let joined = match path::decrement(&tail_block) {
        Some(previous) if is_text_block_at(&previous, &root) => match end_of(&previous, &root) {
            Some((end, end_offset)) => {
                let tagged = annotator.tag_node(SELECTION_ANCHOR, &end, &root)?;
                join_text_blocks(&previous, &tagged)?.map(|root| (root, end_offset))
            }
            None => None,
        },
        _ => None,
    };

    let (root, caret_offset) = match joined {
        Some(joined) => joined,
        None => (annotator.tag_node(SELECTION_ANCHOR, &tail, &root)?, 0),
    };
    let caret_path = recover(annotator, SELECTION_ANCHOR, &root)?;
    let root = clear_selection_annotations(annotator, &root);
    Ok(EditorState::with_caret(root, caret_path, caret_offset))
}

fn is_text_block_at(path: &[usize], root: &Block) -> bool {
    node_at(path, root).is_some_and(is_text_block)
}

/// Joins the block at `path` with its next sibling when both are text blocks
fn join_text_blocks(path: &[usize], root: &Block) -> EditorResult<Option<Block>> {
    if !(is_text_block_at(path, root) && is_text_block_at(&path::increment(path), root)) {
        return Ok(None);
    }
    join_with_next(path, root, join_blocks)
}

/// Converts `html` and pastes the result as inline or block content
pub fn paste_html<A, C>(editor: &Editor<A>, state: &EditorState, html: &str, converter: &C) -> EditorResult<EditorState>
where
    A: Annotator,
    C: HtmlConverter + ?Sized,
{
    match converter.html_to_fragment(html).map_err(EditorError::Conversion)? {
        Fragment::Blocks(blocks) => paste_block_fragment(editor, state, blocks),
        Fragment::Inlines(inlines) => paste_inline_fragment(editor, state, inlines),
    }
}
