//! Whole-tree combinators
//!
//! `map` and the folds are pre-order: a node is handed to the function before
//! its children. The `indexed_*` variants also pass each node's path.

use crate::node::{Block, ChildContainer, Inline, Node, NodeRef};
use crate::path::Path;

/// Applies `func` to `node`, then to the children of the result.
///
/// A child whose mapped result changes kind (a block turned into an inline or
/// the reverse) is left as it was, since its container cannot hold it.
pub fn map<F>(func: &F, node: Node) -> Node
where
    F: Fn(Node) -> Node,
{
    indexed_map(&|_: &[usize], node| func(node), node)
}

/// `map` with each node's path
pub fn indexed_map<F>(func: &F, node: Node) -> Node
where
    F: Fn(&[usize], Node) -> Node,
{
    let mut path = Vec::new();
    map_at(func, &mut path, node)
}

fn map_at<F>(func: &F, path: &mut Path, node: Node) -> Node
where
    F: Fn(&[usize], Node) -> Node,
{
    let block = match func(path, node) {
        Node::Block(block) => block,
        inline => return inline,
    };

    let children = match block.children {
        ChildContainer::BlockChildren(blocks) => ChildContainer::BlockChildren(
            blocks
                .into_iter()
                .enumerate()
                .map(|(index, child)| {
                    path.push(index);
                    let original = child.clone();
                    let mapped = match map_at(func, path, Node::Block(child)) {
                        Node::Block(mapped) => mapped,
                        Node::Inline(_) => original,
                    };
                    path.pop();
                    mapped
                })
                .collect(),
        ),
        ChildContainer::InlineChildren(inlines) => ChildContainer::InlineChildren(
            inlines
                .into_iter()
                .enumerate()
                .map(|(index, child)| {
                    path.push(index);
                    let original = child.clone();
                    let mapped = match func(path, Node::Inline(child)) {
                        Node::Inline(mapped) => mapped,
                        Node::Block(_) => original,
                    };
                    path.pop();
                    mapped
                })
                .collect(),
        ),
        ChildContainer::Leaf => ChildContainer::Leaf,
    };

    Node::Block(Block {
        element: block.element,
        children,
    })
}

/// Left fold in pre-order
pub fn foldl<'a, A, F>(mut func: F, acc: A, node: impl Into<NodeRef<'a>>) -> A
where
    F: FnMut(NodeRef<'a>, A) -> A,
{
    indexed_foldl(|_, node, acc| func(node, acc), acc, node)
}

/// Right fold: children (last to first) are folded before the node itself,
/// so nodes are combined in reverse pre-order
pub fn foldr<'a, A, F>(mut func: F, acc: A, node: impl Into<NodeRef<'a>>) -> A
where
    F: FnMut(NodeRef<'a>, A) -> A,
{
    indexed_foldr(|_, node, acc| func(node, acc), acc, node)
}

/// `foldl` with each node's path
pub fn indexed_foldl<'a, A, F>(mut func: F, acc: A, node: impl Into<NodeRef<'a>>) -> A
where
    F: FnMut(&[usize], NodeRef<'a>, A) -> A,
{
    let mut path = Vec::new();
    foldl_at(&mut func, &mut path, acc, node.into())
}

fn foldl_at<'a, A, F>(func: &mut F, path: &mut Path, acc: A, node: NodeRef<'a>) -> A
where
    F: FnMut(&[usize], NodeRef<'a>, A) -> A,
{
    let mut acc = func(path, node, acc);
    if let NodeRef::Block(block) = node {
        for index in 0..block.children.len() {
            if let Some(child) = block.children.get(index) {
                path.push(index);
                acc = foldl_at(func, path, acc, child);
                path.pop();
            }
        }
    }
    acc
}

/// `foldr` with each node's path
pub fn indexed_foldr<'a, A, F>(mut func: F, acc: A, node: impl Into<NodeRef<'a>>) -> A
where
    F: FnMut(&[usize], NodeRef<'a>, A) -> A,
{
    let mut path = Vec::new();
    foldr_at(&mut func, &mut path, acc, node.into())
}

fn foldr_at<'a, A, F>(func: &mut F, path: &mut Path, acc: A, node: NodeRef<'a>) -> A
where
    F: FnMut(&[usize], NodeRef<'a>, A) -> A,
{
    let mut acc = acc;
    if let NodeRef::Block(block) = node {
        for index in (0..block.children.len()).rev() {
            if let Some(child) = block.children.get(index) {
                path.push(index);
                acc = foldr_at(func, path, acc, child);
                path.pop();
            }
        }
    }
    func(path, node, acc)
}

/// Replaces every descendant of `root` with the nodes `func` returns for it.
///
/// Top-down: `func` sees a child before its own children are processed, and
/// the children of whatever it returns are processed next. The root itself is
/// never passed to `func`. Results of the wrong kind for their container are
/// dropped.
pub fn concat_map<F>(func: &F, root: Block) -> Block
where
    F: Fn(Node) -> Vec<Node>,
{
    let children = match root.children {
        ChildContainer::BlockChildren(blocks) => ChildContainer::BlockChildren(
            blocks
                .into_iter()
                .flat_map(|child| func(Node::Block(child)))
                .filter_map(|node| match node {
                    Node::Block(block) => Some(concat_map(func, block)),
                    Node::Inline(_) => None,
                })
                .collect(),
        ),
        ChildContainer::InlineChildren(inlines) => ChildContainer::InlineChildren(
            inlines
                .into_iter()
                .flat_map(|child| func(Node::Inline(child)))
                .filter_map(|node| match node {
                    Node::Inline(inline) => Some(inline),
                    Node::Block(_) => None,
                })
                .collect::<Vec<Inline>>(),
        ),
        ChildContainer::Leaf => ChildContainer::Leaf,
    };

    Block {
        element: root.element,
        children,
    }
}
