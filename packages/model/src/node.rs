use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::NodeKind;

/// Annotation that makes a non-text node a valid selection target
pub const SELECTABLE: &str = "__selectable__";

/// Element descriptor shared by blocks and inline elements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub annotations: BTreeSet<String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            annotations: BTreeSet::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.insert(annotation.into());
        self
    }
}

/// Inline formatting (bold, link, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Mark {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }
}

/// Structural node with ordered children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub element: Element,
    pub children: ChildContainer,
}

/// Children of a block. The variant is fixed per element type by the schema;
/// the engine only checks structural consistency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "nodes", rename_all = "snake_case")]
pub enum ChildContainer {
    BlockChildren(Vec<Block>),
    InlineChildren(Vec<Inline>),
    Leaf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLeaf {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub annotations: BTreeSet<String>,
}

/// Embedded non-text unit such as an image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineElement {
    pub element: Element,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

/// Terminal node inside an `InlineChildren` container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    Text(TextLeaf),
    Element(InlineElement),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "node", rename_all = "snake_case")]
pub enum Node {
    Block(Block),
    Inline(Inline),
}

/// Borrowed view of a node inside a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Block(&'a Block),
    Inline(&'a Inline),
}

/// Homogeneous payload for splicing operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "nodes", rename_all = "snake_case")]
pub enum Fragment {
    Blocks(Vec<Block>),
    Inlines(Vec<Inline>),
}

impl Block {
    pub fn new(element: Element, children: ChildContainer) -> Self {
        Self { element, children }
    }

    /// Block holding other blocks
    pub fn with_blocks(name: impl Into<String>, children: Vec<Block>) -> Self {
        Self::new(Element::new(name), ChildContainer::BlockChildren(children))
    }

    /// Block holding inline content
    pub fn with_inlines(name: impl Into<String>, children: Vec<Inline>) -> Self {
        Self::new(Element::new(name), ChildContainer::InlineChildren(children))
    }

    /// Text block with a single unmarked text leaf
    pub fn text_block(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_inlines(name, vec![Inline::text(text)])
    }

    /// Childless block (horizontal rule, embedded media, ...)
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::new(Element::new(name), ChildContainer::Leaf)
    }

    /// Same element, different children
    pub fn replace_children(&self, children: ChildContainer) -> Self {
        Self {
            element: self.element.clone(),
            children,
        }
    }
}

impl ChildContainer {
    pub fn len(&self) -> usize {
        match self {
            ChildContainer::BlockChildren(blocks) => blocks.len(),
            ChildContainer::InlineChildren(inlines) => inlines.len(),
            ChildContainer::Leaf => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Child at `index`, if any
    pub fn get(&self, index: usize) -> Option<NodeRef<'_>> {
        match self {
            ChildContainer::BlockChildren(blocks) => blocks.get(index).map(NodeRef::Block),
            ChildContainer::InlineChildren(inlines) => inlines.get(index).map(NodeRef::Inline),
            ChildContainer::Leaf => None,
        }
    }

    /// Kind of node this container accepts, `None` for `Leaf`
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            ChildContainer::BlockChildren(_) => Some(NodeKind::Block),
            ChildContainer::InlineChildren(_) => Some(NodeKind::Inline),
            ChildContainer::Leaf => None,
        }
    }
}

impl TextLeaf {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
            annotations: BTreeSet::new(),
        }
    }

    pub fn with_marks(mut self, marks: Vec<Mark>) -> Self {
        self.marks = marks;
        self
    }

    /// Length in characters; every text offset in the engine counts characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Splits at a character offset; both halves keep marks and annotations
    pub fn split_at(&self, offset: usize) -> Option<(TextLeaf, TextLeaf)> {
        let (head, tail) = split_at_char(&self.text, offset)?;
        Some((self.with_text(head), self.with_text(tail)))
    }

    pub fn with_text(&self, text: impl Into<String>) -> TextLeaf {
        TextLeaf {
            text: text.into(),
            marks: self.marks.clone(),
            annotations: self.annotations.clone(),
        }
    }
}

/// Splits a string at a character offset, `None` past the end
fn split_at_char(text: &str, offset: usize) -> Option<(&str, &str)> {
    if offset == 0 {
        return Some(("", text));
    }
    match text.char_indices().nth(offset) {
        Some((byte, _)) => Some(text.split_at(byte)),
        None if text.chars().count() == offset => Some((text, "")),
        None => None,
    }
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text(TextLeaf::new(text))
    }

    pub fn element(element: Element) -> Self {
        Inline::Element(InlineElement {
            element,
            marks: Vec::new(),
        })
    }

    pub fn annotations(&self) -> &BTreeSet<String> {
        match self {
            Inline::Text(leaf) => &leaf.annotations,
            Inline::Element(inline) => &inline.element.annotations,
        }
    }

    fn annotations_mut(&mut self) -> &mut BTreeSet<String> {
        match self {
            Inline::Text(leaf) => &mut leaf.annotations,
            Inline::Element(inline) => &mut inline.element.annotations,
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations_mut().insert(annotation.into());
        self
    }

    pub fn without_annotation(mut self, annotation: &str) -> Self {
        self.annotations_mut().remove(annotation);
        self
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Block(_) => NodeKind::Block,
            Node::Inline(_) => NodeKind::Inline,
        }
    }

    pub fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Node::Block(block) => NodeRef::Block(block),
            Node::Inline(inline) => NodeRef::Inline(inline),
        }
    }

    pub fn with_annotation(self, annotation: impl Into<String>) -> Self {
        match self {
            Node::Block(mut block) => {
                block.element.annotations.insert(annotation.into());
                Node::Block(block)
            }
            Node::Inline(inline) => Node::Inline(inline.with_annotation(annotation)),
        }
    }

    pub fn without_annotation(self, annotation: &str) -> Self {
        match self {
            Node::Block(mut block) => {
                block.element.annotations.remove(annotation);
                Node::Block(block)
            }
            Node::Inline(inline) => Node::Inline(inline.without_annotation(annotation)),
        }
    }
}

impl From<Block> for Node {
    fn from(block: Block) -> Self {
        Node::Block(block)
    }
}

impl From<Inline> for Node {
    fn from(inline: Inline) -> Self {
        Node::Inline(inline)
    }
}

impl<'a> NodeRef<'a> {
    pub fn kind(self) -> NodeKind {
        match self {
            NodeRef::Block(_) => NodeKind::Block,
            NodeRef::Inline(_) => NodeKind::Inline,
        }
    }

    pub fn annotations(self) -> &'a BTreeSet<String> {
        match self {
            NodeRef::Block(block) => &block.element.annotations,
            NodeRef::Inline(inline) => inline.annotations(),
        }
    }

    pub fn as_block(self) -> Option<&'a Block> {
        match self {
            NodeRef::Block(block) => Some(block),
            NodeRef::Inline(_) => None,
        }
    }

    pub fn as_text(self) -> Option<&'a TextLeaf> {
        match self {
            NodeRef::Inline(Inline::Text(leaf)) => Some(leaf),
            _ => None,
        }
    }

    pub fn to_node(self) -> Node {
        match self {
            NodeRef::Block(block) => Node::Block(block.clone()),
            NodeRef::Inline(inline) => Node::Inline(inline.clone()),
        }
    }
}

impl<'a> From<&'a Block> for NodeRef<'a> {
    fn from(block: &'a Block) -> Self {
        NodeRef::Block(block)
    }
}

impl Fragment {
    pub fn kind(&self) -> NodeKind {
        match self {
            Fragment::Blocks(_) => NodeKind::Block,
            Fragment::Inlines(_) => NodeKind::Inline,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Fragment::Blocks(blocks) => blocks.len(),
            Fragment::Inlines(inlines) => inlines.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves a path against `root`.
///
/// Returns `None` when an index is out of range or the path continues past an
/// inline node or a `Leaf` container.
pub fn node_at<'a>(path: &[usize], root: &'a Block) -> Option<NodeRef<'a>> {
    let Some((&index, rest)) = path.split_first() else {
        return Some(NodeRef::Block(root));
    };

    match (root.children.get(index)?, rest.is_empty()) {
        (node, true) => Some(node),
        (NodeRef::Block(child), false) => node_at(rest, child),
        (NodeRef::Inline(_), false) => None,
    }
}

/// Text leaves are always selectable; anything else needs the `SELECTABLE` annotation
pub fn is_selectable(node: NodeRef<'_>) -> bool {
    match node {
        NodeRef::Inline(Inline::Text(_)) => true,
        other => other.annotations().contains(SELECTABLE),
    }
}

/// Block whose container holds inline content
pub fn is_text_block(node: NodeRef<'_>) -> bool {
    matches!(
        node,
        NodeRef::Block(Block {
            children: ChildContainer::InlineChildren(_),
            ..
        })
    )
}

/// Text block with no content, or with a single empty text leaf
pub fn is_empty_text_block(node: NodeRef<'_>) -> bool {
    match node {
        NodeRef::Block(Block {
            children: ChildContainer::InlineChildren(inlines),
            ..
        }) => match inlines.as_slice() {
            [] => true,
            [Inline::Text(leaf)] => leaf.text.is_empty(),
            _ => false,
        },
        _ => false,
    }
}
