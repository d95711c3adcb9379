//! # Traversal & Search
//!
//! Document-order iteration over a tree, addressed by paths.
//!
//! `next` and `previous` are the two step functions; everything else in this
//! module is built on them. Both treat inline nodes as childless terminals.
//!
//! ```text
//! doc                 pre-order (next):      []  [0] [0,0] [1] [1,0] [1,1]
//! ├─ p   [0]
//! │  └─ "a" [0,0]     reverse (previous):    [1,1] [1,0] [1] [0,0] [0] []
//! └─ p   [1]
//!    ├─ "b" [1,0]
//!    └─ "c" [1,1]
//! ```

use crate::node::{Block, ChildContainer, NodeRef};
use crate::path::Path;

/// Step function shared by the forward and backward searches
pub type Step = for<'a> fn(&[usize], &'a Block) -> Option<(Path, NodeRef<'a>)>;

/// Pre-order successor of `path`.
///
/// Descends into the addressed node first, then moves to its next sibling,
/// then to the next sibling of the nearest ancestor that has one.
pub fn next<'a>(path: &[usize], root: &'a Block) -> Option<(Path, NodeRef<'a>)> {
    let Some((&index, rest)) = path.split_first() else {
        return root.children.get(0).map(|node| (vec![0], node));
    };

    if let ChildContainer::BlockChildren(blocks) = &root.children {
        let child = blocks.get(index)?;
        if let Some((mut descendant, node)) = next(rest, child) {
            descendant.insert(0, index);
            return Some((descendant, node));
        }
    } else if !rest.is_empty() {
        return None;
    }

    let sibling = index.checked_add(1)?;
    root.children.get(sibling).map(|node| (vec![sibling], node))
}

/// Reverse pre-order predecessor of `path`.
///
/// A previous sibling yields its deepest, rightmost descendant; without one
/// the parent is returned. The root has no predecessor.
pub fn previous<'a>(path: &[usize], root: &'a Block) -> Option<(Path, NodeRef<'a>)> {
    let (&index, rest) = path.split_first()?;

    if rest.is_empty() {
        root.children.get(index)?;
        if index == 0 {
            return Some((Vec::new(), NodeRef::Block(root)));
        }
        return match root.children.get(index - 1)? {
            NodeRef::Block(sibling) => {
                let (mut tail, node) = last(sibling);
                tail.insert(0, index - 1);
                Some((tail, node))
            }
            inline => Some((vec![index - 1], inline)),
        };
    }

    let NodeRef::Block(child) = root.children.get(index)? else {
        return None;
    };
    let (mut ancestor, node) = previous(rest, child)?;
    ancestor.insert(0, index);
    Some((ancestor, node))
}

/// Deepest, rightmost descendant of `block`, relative to it
pub fn last(block: &Block) -> (Path, NodeRef<'_>) {
    let Some(index) = block.children.len().checked_sub(1) else {
        return (Vec::new(), NodeRef::Block(block));
    };
    match block.children.get(index) {
        Some(NodeRef::Block(child)) => {
            let (mut tail, node) = last(child);
            tail.insert(0, index);
            (tail, node)
        }
        Some(inline) => (vec![index], inline),
        None => (Vec::new(), NodeRef::Block(block)),
    }
}

/// Iterates positions in document order, starting at `path` itself
pub fn walk<'a>(step: Step, path: &[usize], root: &'a Block) -> impl Iterator<Item = (Path, NodeRef<'a>)> {
    let start = crate::node::node_at(path, root).map(|node| (path.to_vec(), node));
    std::iter::successors(start, move |(path, _)| step(path, root))
}

fn find_from<'a, F>(step: Step, mut pred: F, path: &[usize], root: &'a Block) -> Option<(Path, NodeRef<'a>)>
where
    F: FnMut(&[usize], NodeRef<'a>) -> bool,
{
    walk(step, path, root).find(|(path, node)| pred(path, *node))
}

/// First position at or after `path` satisfying `pred`
pub fn find_forward_from<'a, F>(pred: F, path: &[usize], root: &'a Block) -> Option<(Path, NodeRef<'a>)>
where
    F: FnMut(&[usize], NodeRef<'a>) -> bool,
{
    find_from(next, pred, path, root)
}

/// First position strictly after `path` satisfying `pred`
pub fn find_forward_from_exclusive<'a, F>(pred: F, path: &[usize], root: &'a Block) -> Option<(Path, NodeRef<'a>)>
where
    F: FnMut(&[usize], NodeRef<'a>) -> bool,
{
    let (start, _) = next(path, root)?;
    find_from(next, pred, &start, root)
}

/// First position at or before `path` satisfying `pred`
pub fn find_backward_from<'a, F>(pred: F, path: &[usize], root: &'a Block) -> Option<(Path, NodeRef<'a>)>
where
    F: FnMut(&[usize], NodeRef<'a>) -> bool,
{
    find_from(previous, pred, path, root)
}

/// First position strictly before `path` satisfying `pred`
pub fn find_backward_from_exclusive<'a, F>(pred: F, path: &[usize], root: &'a Block) -> Option<(Path, NodeRef<'a>)>
where
    F: FnMut(&[usize], NodeRef<'a>) -> bool,
{
    let (start, _) = previous(path, root)?;
    find_from(previous, pred, &start, root)
}

/// Nearest block enclosing `path` (the addressed node itself excluded) that
/// satisfies `pred`, with the path addressing it.
///
/// The empty path has no ancestors, so the root is never tested for it.
pub fn find_ancestor<'a, F>(pred: F, path: &[usize], root: &'a Block) -> Option<(Path, &'a Block)>
where
    F: Fn(&Block) -> bool,
{
    find_ancestor_inner(&pred, path, root)
}

fn find_ancestor_inner<'a, F>(pred: &F, path: &[usize], root: &'a Block) -> Option<(Path, &'a Block)>
where
    F: Fn(&Block) -> bool,
{
    let (&index, rest) = path.split_first()?;

    if let ChildContainer::BlockChildren(blocks) = &root.children {
        let child = blocks.get(index)?;
        if let Some((mut ancestor, block)) = find_ancestor_inner(pred, rest, child) {
            ancestor.insert(0, index);
            return Some((ancestor, block));
        }
    }

    pred(root).then(|| (Vec::new(), root))
}

/// Nearest enclosing block whose children are inline content
pub fn find_text_block_node_ancestor<'a>(path: &[usize], root: &'a Block) -> Option<(Path, &'a Block)> {
    find_ancestor(
        |block| matches!(block.children, ChildContainer::InlineChildren(_)),
        path,
        root,
    )
}

/// `path` itself when it addresses a block, otherwise the enclosing block
pub fn find_closest_block_path(path: &[usize], root: &Block) -> Path {
    match crate::node::node_at(path, root) {
        Some(NodeRef::Block(_)) => path.to_vec(),
        _ => crate::path::parent(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{is_selectable, Inline};

    fn doc() -> Block {
        Block::with_blocks(
            "doc",
            vec![
                Block::text_block("paragraph", "a"),
                Block::with_inlines("paragraph", vec![Inline::text("b"), Inline::text("c")]),
            ],
        )
    }

    #[test]
    fn test_next_visits_in_pre_order() {
        let root = doc();
        let order: Vec<Path> = walk(next, &[], &root).map(|(path, _)| path).collect();
        assert_eq!(
            order,
            vec![vec![], vec![0], vec![0, 0], vec![1], vec![1, 0], vec![1, 1]]
        );
    }

    #[test]
    fn test_previous_visits_in_reverse_pre_order() {
        let root = doc();
        let order: Vec<Path> = walk(previous, &[1, 1], &root).map(|(path, _)| path).collect();
        assert_eq!(
            order,
            vec![vec![1, 1], vec![1, 0], vec![1], vec![0, 0], vec![0], vec![]]
        );
    }

    #[test]
    fn test_next_on_empty_root() {
        let root = Block::with_blocks("doc", vec![]);
        assert!(next(&[], &root).is_none());
        assert!(previous(&[], &root).is_none());
    }

    #[test]
    fn test_next_past_last_index() {
        let paragraph = Block::text_block("paragraph", "a");
        assert!(next(&[usize::MAX], &paragraph).is_none());
        assert!(next(&[usize::MAX], &doc()).is_none());
    }

    #[test]
    fn test_last() {
        let root = doc();
        let (path, node) = last(&root);
        assert_eq!(path, vec![1, 1]);
        assert_eq!(node.as_text().unwrap().text, "c");
    }

    #[test]
    fn test_find_forward_includes_start() {
        let root = doc();
        let (path, _) = find_forward_from(|_, node| is_selectable(node), &[0, 0], &root).unwrap();
        assert_eq!(path, vec![0, 0]);

        let (path, _) = find_forward_from_exclusive(|_, node| is_selectable(node), &[0, 0], &root).unwrap();
        assert_eq!(path, vec![1, 0]);
    }

    #[test]
    fn test_find_backward_exclusive() {
        let root = doc();
        let (path, _) = find_backward_from_exclusive(|_, node| is_selectable(node), &[1, 0], &root).unwrap();
        assert_eq!(path, vec![0, 0]);
        assert!(find_backward_from_exclusive(|_, node| is_selectable(node), &[0, 0], &root).is_none());
    }

    #[test]
    fn test_find_ancestor_skips_addressed_node() {
        let root = doc();
        let (path, block) = find_text_block_node_ancestor(&[1, 1], &root).unwrap();
        assert_eq!(path, vec![1]);
        assert_eq!(block.element.name, "paragraph");

        // [1] is itself a text block, but only its ancestors are tested
        assert!(find_text_block_node_ancestor(&[1], &root).is_none());
        assert!(find_ancestor(|_| true, &[], &root).is_none());
    }

    #[test]
    fn test_find_closest_block_path() {
        let root = doc();
        assert_eq!(find_closest_block_path(&[1, 1], &root), vec![1]);
        assert_eq!(find_closest_block_path(&[1], &root), vec![1]);
    }
}
