//! # Structural Mutations
//!
//! Primitive edits on a document tree.
//!
//! ## Design Principles
//!
//! 1. **Non-destructive**: every primitive takes a root and returns a new one
//! 2. **Validated**: `replace*` and `insert_*` report `InvalidPath` and
//!    `KindMismatch` instead of guessing
//! 3. **Best-effort cleanup**: `remove_in_range` and
//!    `remove_node_and_empty_parents` return the input unchanged when the
//!    paths do not resolve
//!
//! ## Path invalidation
//!
//! Any primitive that changes the length of a children array invalidates every
//! path that runs through that array past the edited index. Callers chaining
//! several primitives recover positions through annotations rather than
//! reusing stale paths.

use tracing::trace;

use crate::error::{NodeKind, TreeError, TreeResult};
use crate::node::{node_at, Block, ChildContainer, Fragment, Inline, Node, NodeRef};

/// Replaces the node at `path` with the fragment's nodes, in place, within the
/// same container.
pub fn replace_with_fragment(path: &[usize], fragment: Fragment, root: &Block) -> TreeResult<Block> {
    splice_at(path, path, fragment, root)
}

fn splice_at(full_path: &[usize], path: &[usize], fragment: Fragment, node: &Block) -> TreeResult<Block> {
    match path {
        [] => Err(TreeError::invalid_path(
            full_path,
            "the root cannot be replaced with a fragment",
        )),

        [index] => {
            let children = match (&node.children, fragment) {
                (ChildContainer::BlockChildren(blocks), Fragment::Blocks(replacement)) => {
                    ChildContainer::BlockChildren(splice_vec(full_path, blocks, *index, replacement)?)
                }
                (ChildContainer::InlineChildren(inlines), Fragment::Inlines(replacement)) => {
                    ChildContainer::InlineChildren(splice_vec(full_path, inlines, *index, replacement)?)
                }
                (ChildContainer::BlockChildren(_), Fragment::Inlines(_)) => {
                    return Err(TreeError::kind_mismatch(NodeKind::Block, NodeKind::Inline));
                }
                (ChildContainer::InlineChildren(_), Fragment::Blocks(_)) => {
                    return Err(TreeError::kind_mismatch(NodeKind::Inline, NodeKind::Block));
                }
                (ChildContainer::Leaf, _) => {
                    return Err(TreeError::invalid_path(full_path, "leaf blocks have no children"));
                }
            };
            Ok(node.replace_children(children))
        }

        [index, rest @ ..] => match &node.children {
            ChildContainer::BlockChildren(blocks) => {
                let child = blocks
                    .get(*index)
                    .ok_or_else(|| TreeError::invalid_path(full_path, "index out of range"))?;
                let replaced = splice_at(full_path, rest, fragment, child)?;

                let mut blocks = blocks.clone();
                blocks[*index] = replaced;
                Ok(node.replace_children(ChildContainer::BlockChildren(blocks)))
            }
            ChildContainer::InlineChildren(_) => Err(TreeError::invalid_path(
                full_path,
                "path continues past an inline node",
            )),
            ChildContainer::Leaf => Err(TreeError::invalid_path(
                full_path,
                "path continues past a leaf block",
            )),
        },
    }
}

fn splice_vec<T: Clone>(full_path: &[usize], items: &[T], index: usize, replacement: Vec<T>) -> TreeResult<Vec<T>> {
    if index >= items.len() {
        return Err(TreeError::invalid_path(full_path, "index out of range"));
    }
    let mut items = items.to_vec();
    items.splice(index..=index, replacement);
    Ok(items)
}

/// Replaces the node at `path`.
///
/// The empty path replaces the root, which must stay a block.
pub fn replace(path: &[usize], node: Node, root: &Block) -> TreeResult<Block> {
    match (path.is_empty(), node) {
        (true, Node::Block(block)) => Ok(block),
        (true, Node::Inline(_)) => Err(TreeError::kind_mismatch(NodeKind::Block, NodeKind::Inline)),
        (false, Node::Block(block)) => replace_with_fragment(path, Fragment::Blocks(vec![block]), root),
        (false, Node::Inline(inline)) => replace_with_fragment(path, Fragment::Inlines(vec![inline]), root),
    }
}

/// Inserts the fragment right after the node at `path`
pub fn insert_after(path: &[usize], fragment: Fragment, root: &Block) -> TreeResult<Block> {
    insert_beside(path, fragment, root, false)
}

/// Inserts the fragment right before the node at `path`
pub fn insert_before(path: &[usize], fragment: Fragment, root: &Block) -> TreeResult<Block> {
    insert_beside(path, fragment, root, true)
}

fn insert_beside(path: &[usize], fragment: Fragment, root: &Block, before: bool) -> TreeResult<Block> {
    let anchor = node_at(path, root).ok_or_else(|| TreeError::invalid_path(path, "no node at path"))?;

    let fragment = match (anchor, fragment) {
        (NodeRef::Block(block), Fragment::Blocks(mut blocks)) => {
            let at = if before { blocks.len() } else { 0 };
            blocks.insert(at, block.clone());
            Fragment::Blocks(blocks)
        }
        (NodeRef::Inline(inline), Fragment::Inlines(mut inlines)) => {
            let at = if before { inlines.len() } else { 0 };
            inlines.insert(at, inline.clone());
            Fragment::Inlines(inlines)
        }
        (anchor, fragment) => return Err(TreeError::kind_mismatch(anchor.kind(), fragment.kind())),
    };

    replace_with_fragment(path, fragment, root)
}

/// Replaces the text of the text leaf at `path`, keeping its marks
pub fn replace_text(path: &[usize], text: impl Into<String>, root: &Block) -> TreeResult<Block> {
    let leaf = node_at(path, root)
        .and_then(NodeRef::as_text)
        .ok_or_else(|| TreeError::invalid_path(path, "no text leaf at path"))?;
    let updated = Inline::Text(leaf.with_text(text));
    replace(path, Node::Inline(updated), root)
}

/// Removes every node between `start` and `end`, inclusive, at each depth.
///
/// Equal leading indices recurse one level down; differing ones keep the
/// children before `start` and after `end` and, when a boundary path goes
/// deeper, a trimmed copy of that boundary child. An empty `start` tail means
/// "from the first child", an empty `end` tail "through the last child".
/// Out-of-order or unresolvable bounds leave the tree unchanged.
pub fn remove_in_range(start: &[usize], end: &[usize], root: &Block) -> Block {
    let count = root.children.len();
    let Some(last_index) = count.checked_sub(1) else {
        return root.clone();
    };

    let (start_index, start_rest) = match start.split_first() {
        Some((&index, rest)) => (index, rest),
        None => (0, &[][..]),
    };
    let (end_index, end_rest) = match end.split_first() {
        Some((&index, rest)) => (index, rest),
        None => (last_index, &[][..]),
    };

    if start_index > end_index || start_index > last_index {
        return root.clone();
    }

    let children = match &root.children {
        ChildContainer::Leaf => return root.clone(),

        ChildContainer::BlockChildren(blocks) if start_index == end_index => {
            let mut blocks = blocks.clone();
            if start_rest.is_empty() && end_rest.is_empty() {
                blocks.remove(start_index);
            } else {
                blocks[start_index] = remove_in_range(start_rest, end_rest, &blocks[start_index]);
            }
            ChildContainer::BlockChildren(blocks)
        }

        ChildContainer::BlockChildren(blocks) => {
            let mut kept = blocks[..start_index].to_vec();
            if !start_rest.is_empty() {
                kept.push(remove_in_range(start_rest, &[], &blocks[start_index]));
            }
            if !end_rest.is_empty() {
                if let Some(boundary) = blocks.get(end_index) {
                    kept.push(remove_in_range(&[], end_rest, boundary));
                }
            }
            kept.extend_from_slice(blocks.get(end_index.saturating_add(1)..).unwrap_or_default());
            ChildContainer::BlockChildren(kept)
        }

        ChildContainer::InlineChildren(inlines) if start_index == end_index => {
            if !(start_rest.is_empty() && end_rest.is_empty()) {
                return root.clone();
            }
            let mut inlines = inlines.clone();
            inlines.remove(start_index);
            ChildContainer::InlineChildren(inlines)
        }

        ChildContainer::InlineChildren(inlines) => {
            let mut kept = inlines[..start_index].to_vec();
            kept.extend_from_slice(inlines.get(end_index.saturating_add(1)..).unwrap_or_default());
            ChildContainer::InlineChildren(kept)
        }
    };

    root.replace_children(children)
}

/// Removes the node at `path` and every ancestor left without children.
///
/// The root itself is never removed. An unresolvable path is a no-op.
pub fn remove_node_and_empty_parents(path: &[usize], root: &Block) -> Block {
    remove_and_prune(path, root).unwrap_or_else(|| root.clone())
}

fn remove_and_prune(path: &[usize], node: &Block) -> Option<Block> {
    let (&index, rest) = path.split_first()?;

    let children = match &node.children {
        ChildContainer::BlockChildren(blocks) => {
            let child = blocks.get(index)?;
            let mut blocks = blocks.clone();
            if rest.is_empty() {
                blocks.remove(index);
            } else {
                let pruned = remove_and_prune(rest, child)?;
                if pruned.children.is_empty() {
                    trace!(?path, "pruning emptied ancestor");
                    blocks.remove(index);
                } else {
                    blocks[index] = pruned;
                }
            }
            ChildContainer::BlockChildren(blocks)
        }
        ChildContainer::InlineChildren(inlines) if rest.is_empty() && index < inlines.len() => {
            let mut inlines = inlines.clone();
            inlines.remove(index);
            ChildContainer::InlineChildren(inlines)
        }
        ChildContainer::InlineChildren(_) | ChildContainer::Leaf => return None,
    };

    Some(node.replace_children(children))
}

/// Splits the tree at `offset` within the node at `path`, producing a
/// "before" and an "after" copy of the whole tree.
///
/// - a block addressed by `path` has its children split at `offset`
///   (a `Leaf` block is copied to both sides)
/// - a text leaf is split at the character `offset`; both sides keep the
///   addressed slot, holding the head and tail text respectively
/// - an inline element is atomic and goes entirely to the "after" side
///
/// Returns `None` when the path or offset does not resolve.
pub fn split_block_at_path_and_offset(path: &[usize], offset: usize, root: &Block) -> Option<(Block, Block)> {
    let Some((&index, rest)) = path.split_first() else {
        return split_children(offset, root);
    };

    match &root.children {
        ChildContainer::BlockChildren(blocks) => {
            let (before_child, after_child) = split_block_at_path_and_offset(rest, offset, blocks.get(index)?)?;

            let mut before = blocks[..index].to_vec();
            before.push(before_child);
            let mut after = vec![after_child];
            after.extend_from_slice(&blocks[index + 1..]);

            Some((
                root.replace_children(ChildContainer::BlockChildren(before)),
                root.replace_children(ChildContainer::BlockChildren(after)),
            ))
        }

        ChildContainer::InlineChildren(inlines) => {
            if !rest.is_empty() {
                return None;
            }
            let (before, after) = match inlines.get(index)? {
                Inline::Text(leaf) => {
                    let (head, tail) = leaf.split_at(offset)?;
                    let mut before = inlines[..index].to_vec();
                    before.push(Inline::Text(head));
                    let mut after = vec![Inline::Text(tail)];
                    after.extend_from_slice(&inlines[index + 1..]);
                    (before, after)
                }
                Inline::Element(_) => (inlines[..index].to_vec(), inlines[index..].to_vec()),
            };

            Some((
                root.replace_children(ChildContainer::InlineChildren(before)),
                root.replace_children(ChildContainer::InlineChildren(after)),
            ))
        }

        ChildContainer::Leaf => None,
    }
}

fn split_children(offset: usize, block: &Block) -> Option<(Block, Block)> {
    match &block.children {
        ChildContainer::BlockChildren(blocks) if offset <= blocks.len() => {
            let (before, after) = blocks.split_at(offset);
            Some((
                block.replace_children(ChildContainer::BlockChildren(before.to_vec())),
                block.replace_children(ChildContainer::BlockChildren(after.to_vec())),
            ))
        }
        ChildContainer::InlineChildren(inlines) if offset <= inlines.len() => {
            let (before, after) = inlines.split_at(offset);
            Some((
                block.replace_children(ChildContainer::InlineChildren(before.to_vec())),
                block.replace_children(ChildContainer::InlineChildren(after.to_vec())),
            ))
        }
        ChildContainer::Leaf => Some((block.clone(), block.clone())),
        _ => None,
    }
}
