//! # List Commands
//!
//! Splitting, lifting and joining list items. The element names making up a
//! list come from [`crate::config::ListDefinition`].
//!
//! ```text
//! bullet_list                        lift [0,1]          doc
//! ├─ list_item  "one"                ─────────▶          ├─ bullet_list
//! └─ list_item  "two"  ◀ caret                           │  └─ list_item "one"
//!                                                        └─ paragraph "two"
//! ```

use folio_model::traversal::{find_ancestor, find_closest_block_path};
use folio_model::visitor::concat_map;
use folio_model::{is_empty_text_block, node_at, path, Block, ChildContainer, Node, NodeRef, Path};
use tracing::debug;

use super::{caret, end_of, join_with_next, recover, require_selection, split_block, start_of};
use crate::annotations::{
    annotate_selection, clear_selection_annotations, selection_from_annotations, Annotator, LIFT,
    SELECTION_ANCHOR,
};
use crate::config::ListDefinition;
use crate::editor::Editor;
use crate::errors::{EditorError, EditorResult};
use crate::join::join_blocks_at_seam;
use crate::state::EditorState;

fn list_item_ancestor<'a>(
    definition: &ListDefinition,
    path: &[usize],
    root: &'a Block,
) -> Option<(Path, &'a Block)> {
    find_ancestor(|block| definition.is_item(block), path, root)
}

/// Moves the selected list items one level up.
///
/// Items of a top-level list become plain blocks; items of a nested list
/// become items of the enclosing list. The items lifted are those of the
/// nearest list around both selection endpoints, from the anchor's item to
/// the focus's item.
pub fn lift<A: Annotator>(editor: &Editor<A>, state: &EditorState) -> EditorResult<EditorState> {
    let selection = require_selection(state)?.normalize();
    let annotator = editor.annotator();
    let definition = &editor.config().list;

    let root = annotate_selection(annotator, &selection, &state.root)?;
    let anchor_block = find_closest_block_path(&selection.anchor_node, &root);
    let focus_block = find_closest_block_path(&selection.focus_node, &root);
    let common = path::common_ancestor(&anchor_block, &focus_block);

    let list_path = match node_at(&common, &root) {
        Some(NodeRef::Block(block)) if definition.is_list(block) => common,
        _ => find_ancestor(|block| definition.is_list(block), &common, &root)
            .map(|(path, _)| path)
            .ok_or_else(|| EditorError::precondition("the selection is not inside a list"))?,
    };

    let depth = list_path.len();
    let (Some(&first), Some(&last)) = (anchor_block.get(depth), focus_block.get(depth)) else {
        return Err(EditorError::precondition("the selection does not reach into a list item"));
    };
    debug!(?list_path, first, last, "lifting list items");

    let mut root = root;
    for index in first..=last {
        root = tag_for_lift(annotator, &path::join(&list_path, &[index]), &root)?;
    }

    // once to unwrap the list around the items, once to unwrap the items
    let pass = |node: Node| lift_pass(annotator, node);
    let root = concat_map(&pass, root);
    let root = concat_map(&pass, root);

    let selection = selection_from_annotations(annotator, &root, selection.anchor_offset, selection.focus_offset)
        .ok_or_else(|| EditorError::selection("selection lost while lifting"))?;
    let root = annotator.clear_tags(LIFT, &root);
    let root = clear_selection_annotations(annotator, &root);
    Ok(EditorState::new(root, Some(selection)))
}

/// Tags an item and each of its children
fn tag_for_lift<A: Annotator>(annotator: &A, item_path: &[usize], root: &Block) -> EditorResult<Block> {
    let count = node_at(item_path, root)
        .and_then(NodeRef::as_block)
        .map_or(0, |item| item.children.len());

    let mut root = annotator.tag_node(LIFT, item_path, root)?;
    for index in 0..count {
        root = annotator.tag_node(LIFT, &path::join(item_path, &[index]), &root)?;
    }
    Ok(root)
}

/// Replaces tagged children with themselves, hoisted out of `node`.
///
/// Untagged runs of children stay wrapped in copies of `node`, so a list
/// with a lifted item in the middle becomes list / item / list.
fn lift_pass<A: Annotator>(annotator: &A, node: Node) -> Vec<Node> {
    let block = match node {
        Node::Block(block) => block,
        inline => return vec![inline],
    };
    let ChildContainer::BlockChildren(children) = &block.children else {
        return vec![Node::Block(block)];
    };
    if !children.iter().any(|child| annotator.has_tag(LIFT, NodeRef::Block(child))) {
        return vec![Node::Block(block)];
    }

    let mut hoisted = Vec::new();
    let mut run = Vec::new();
    for child in children {
        if annotator.has_tag(LIFT, NodeRef::Block(child)) {
            if !run.is_empty() {
                let wrapper = block.replace_children(ChildContainer::BlockChildren(std::mem::take(&mut run)));
                hoisted.push(Node::Block(wrapper));
            }
            hoisted.push(Node::Block(child.clone()));
        } else {
            run.push(child.clone());
        }
    }
    if !run.is_empty() {
        hoisted.push(Node::Block(block.replace_children(ChildContainer::BlockChildren(run))));
    }
    hoisted
}

/// Lifts the item holding the caret when it starts with an empty text block,
/// the usual response to Enter on an empty list item
pub fn lift_empty<A: Annotator>(editor: &Editor<A>, state: &EditorState) -> EditorResult<EditorState> {
    let (caret_path, offset) = caret(state)?;
    if offset != 0 {
        return Err(EditorError::selection("the caret is not at offset 0"));
    }

    let (_, item) = list_item_ancestor(&editor.config().list, &caret_path, &state.root)
        .ok_or_else(|| EditorError::precondition("the caret is not inside a list item"))?;

    match item.children.get(0) {
        Some(first) if is_empty_text_block(first) => lift(editor, state),
        _ => Err(EditorError::precondition(
            "the list item does not start with an empty text block",
        )),
    }
}

/// Splits the list item holding the caret in two
pub fn split<A: Annotator>(editor: &Editor<A>, state: &EditorState) -> EditorResult<EditorState> {
    let definition = &editor.config().list;
    split_block(editor, state, |path, root| list_item_ancestor(definition, path, root))
}

/// Merges the item holding the caret into the previous item.
///
/// The caret must be at the very start of its item. The first item of a list
/// has nothing to join with and is lifted instead.
pub fn join_backward<A: Annotator>(editor: &Editor<A>, state: &EditorState) -> EditorResult<EditorState> {
    let (caret_path, offset) = caret(state)?;
    let annotator = editor.annotator();
    let definition = &editor.config().list;

    let (item_path, _) = list_item_ancestor(definition, &caret_path, &state.root)
        .ok_or_else(|| EditorError::precondition("the caret is not inside a list item"))?;
    if offset != 0 || start_of(&item_path, &state.root).as_ref() != Some(&caret_path) {
        return Err(EditorError::selection("the caret is not at the start of its list item"));
    }

    let previous_path = match path::decrement(&item_path) {
        Some(previous) if is_item_at(definition, &previous, &state.root) => previous,
        _ => {
            debug!(?item_path, "no previous list item, lifting instead");
            return lift(editor, state);
        }
    };

    // the caret lands where the previous item's content ends
    let (target, target_offset) = end_of(&previous_path, &state.root).unwrap_or((caret_path, 0));
    let root = annotator.tag_node(SELECTION_ANCHOR, &target, &state.root)?;
    let root = join_items(&previous_path, &root)?;

    let caret_path = recover(annotator, SELECTION_ANCHOR, &root)?;
    let root = clear_selection_annotations(annotator, &root);
    Ok(EditorState::with_caret(root, caret_path, target_offset))
}

/// Merges the next item into the item holding the caret.
///
/// The caret must be at the very end of its item, and a next item must exist.
pub fn join_forward<A: Annotator>(editor: &Editor<A>, state: &EditorState) -> EditorResult<EditorState> {
    let (caret_path, offset) = caret(state)?;
    let annotator = editor.annotator();
    let definition = &editor.config().list;

    let (item_path, _) = list_item_ancestor(definition, &caret_path, &state.root)
        .ok_or_else(|| EditorError::precondition("the caret is not inside a list item"))?;
    if end_of(&item_path, &state.root) != Some((caret_path.clone(), offset)) {
        return Err(EditorError::selection("the caret is not at the end of its list item"));
    }
    if !is_item_at(definition, &path::increment(&item_path), &state.root) {
        return Err(EditorError::precondition("there is no list item to join forward"));
    }

    let root = annotator.tag_node(SELECTION_ANCHOR, &caret_path, &state.root)?;
    let root = join_items(&item_path, &root)?;

    let caret_path = recover(annotator, SELECTION_ANCHOR, &root)?;
    let root = clear_selection_annotations(annotator, &root);
    Ok(EditorState::with_caret(root, caret_path, offset))
}

fn is_item_at(definition: &ListDefinition, path: &[usize], root: &Block) -> bool {
    matches!(node_at(path, root), Some(NodeRef::Block(block)) if definition.is_item(block))
}

/// Joins the item at `path` with the item after it
fn join_items(path: &[usize], root: &Block) -> EditorResult<Block> {
    join_with_next(path, root, join_blocks_at_seam)?
        .ok_or_else(|| EditorError::precondition("the list items cannot be joined"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Selection;

    fn item(text: &str) -> Block {
        Block::with_blocks("list_item", vec![Block::text_block("paragraph", text)])
    }

    fn list(items: Vec<Block>) -> Block {
        Block::with_blocks("bullet_list", items)
    }

    #[test]
    fn test_lift_pass_keeps_untagged_runs_wrapped() {
        let annotations = crate::annotations::NodeAnnotations;
        let mut tagged = item("b");
        tagged.element.annotations.insert(LIFT.to_string());

        let node = Node::Block(list(vec![item("a"), tagged.clone(), item("c")]));
        let result = lift_pass(&annotations, node);

        assert_eq!(
            result,
            vec![
                Node::Block(list(vec![item("a")])),
                Node::Block(tagged),
                Node::Block(list(vec![item("c")])),
            ]
        );
    }

    #[test]
    fn test_lift_single_item() {
        let root = Block::with_blocks("doc", vec![list(vec![item("a"), item("b")])]);
        let state = EditorState::with_caret(root, vec![0, 1, 0, 0], 1);
        let result = lift(&Editor::default(), &state).unwrap();

        let expected = Block::with_blocks(
            "doc",
            vec![list(vec![item("a")]), Block::text_block("paragraph", "b")],
        );
        assert_eq!(result.root, expected);
        assert_eq!(result.selection, Some(Selection::caret(vec![1, 0], 1)));
    }

    #[test]
    fn test_lift_outside_list_fails() {
        let root = Block::with_blocks("doc", vec![Block::text_block("paragraph", "a")]);
        let state = EditorState::with_caret(root, vec![0, 0], 0);
        let err = lift(&Editor::default(), &state).unwrap_err();
        assert!(matches!(err, EditorError::StructuralPrecondition(_)));
    }

    #[test]
    fn test_lift_empty_requires_empty_item() {
        let root = Block::with_blocks("doc", vec![list(vec![item("a")])]);
        let state = EditorState::with_caret(root, vec![0, 0, 0, 0], 0);
        let err = lift_empty(&Editor::default(), &state).unwrap_err();
        assert!(matches!(err, EditorError::StructuralPrecondition(_)));
    }

    #[test]
    fn test_join_forward_on_last_item_fails() {
        let root = Block::with_blocks("doc", vec![list(vec![item("a")])]);
        let state = EditorState::with_caret(root, vec![0, 0, 0, 0], 1);
        let err = join_forward(&Editor::default(), &state).unwrap_err();
        assert!(matches!(err, EditorError::StructuralPrecondition(_)));
    }

    #[test]
    fn test_join_forward_requires_caret_at_end() {
        let root = Block::with_blocks("doc", vec![list(vec![item("ab"), item("c")])]);
        let state = EditorState::with_caret(root, vec![0, 0, 0, 0], 1);
        let err = join_forward(&Editor::default(), &state).unwrap_err();
        assert!(matches!(err, EditorError::InvalidSelectionState(_)));
    }

    #[test]
    fn test_join_forward_before_trailing_image_fails() {
        use folio_model::{Element, Inline, SELECTABLE};

        let image = Inline::element(Element::new("image").with_annotation(SELECTABLE));
        let first = Block::with_blocks(
            "list_item",
            vec![Block::with_inlines("paragraph", vec![Inline::text("a"), image])],
        );
        let root = Block::with_blocks("doc", vec![list(vec![first, item("b")])]);

        let before_image = EditorState::with_caret(root.clone(), vec![0, 0, 0, 1], 0);
        let err = join_forward(&Editor::default(), &before_image).unwrap_err();
        assert!(matches!(err, EditorError::InvalidSelectionState(_)));

        let after_image = EditorState::with_caret(root, vec![0, 0, 0, 1], 1);
        let result = join_forward(&Editor::default(), &after_image).unwrap();
        assert_eq!(result.selection, Some(Selection::caret(vec![0, 0, 0, 1], 1)));
    }
}
