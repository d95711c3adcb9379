//! Merging adjacent blocks

use folio_model::{is_text_block, Block, ChildContainer, Inline, NodeRef};

/// Joins two blocks into one carrying `first`'s element and the children of
/// both.
///
/// Only blocks with the same kind of container join; `Leaf` blocks never do.
/// Where inline content meets, two text leaves with equal marks merge into a
/// single leaf holding both texts and the union of their annotations.
pub fn join_blocks(first: &Block, second: &Block) -> Option<Block> {
    let children = match (&first.children, &second.children) {
        (ChildContainer::BlockChildren(head), ChildContainer::BlockChildren(tail)) => {
            ChildContainer::BlockChildren(head.iter().chain(tail).cloned().collect())
        }
        (ChildContainer::InlineChildren(head), ChildContainer::InlineChildren(tail)) => {
            ChildContainer::InlineChildren(join_inlines(head, tail))
        }
        _ => return None,
    };
    Some(first.replace_children(children))
}

/// `join_blocks`, then joins the two children meeting at the seam when both
/// are text blocks
pub fn join_blocks_at_seam(first: &Block, second: &Block) -> Option<Block> {
    let joined = join_blocks(first, second)?;
    let ChildContainer::BlockChildren(children) = &joined.children else {
        return Some(joined);
    };

    let seam = first.children.len();
    let (Some(left), Some(right)) = (seam.checked_sub(1).and_then(|i| children.get(i)), children.get(seam)) else {
        return Some(joined);
    };
    if !(is_text_block(NodeRef::Block(left)) && is_text_block(NodeRef::Block(right))) {
        return Some(joined);
    }

    let merged = join_blocks(left, right)?;
    let mut children = children.clone();
    children.splice(seam - 1..=seam, [merged]);
    Some(joined.replace_children(ChildContainer::BlockChildren(children)))
}

fn join_inlines(head: &[Inline], tail: &[Inline]) -> Vec<Inline> {
    let mut joined = head.to_vec();
    let mut rest = tail.iter();

    if let (Some(Inline::Text(left)), Some(Inline::Text(right))) = (joined.last_mut(), tail.first()) {
        if left.marks == right.marks {
            left.text.push_str(&right.text);
            left.annotations.extend(right.annotations.iter().cloned());
            rest.next();
        }
    }

    joined.extend(rest.cloned());
    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_model::{Element, Mark, TextLeaf};

    #[test]
    fn test_join_text_blocks_merges_seam_leaves() {
        let first = Block::text_block("paragraph", "ab");
        let second = Block::text_block("heading", "cd");
        assert_eq!(join_blocks(&first, &second), Some(Block::text_block("paragraph", "abcd")));
    }

    #[test]
    fn test_join_keeps_differently_marked_leaves_apart() {
        let bold = Inline::Text(TextLeaf::new("cd").with_marks(vec![Mark::new("bold")]));
        let first = Block::text_block("paragraph", "ab");
        let second = Block::with_inlines("paragraph", vec![bold.clone()]);

        let joined = join_blocks(&first, &second).unwrap();
        assert_eq!(joined, Block::with_inlines("paragraph", vec![Inline::text("ab"), bold]));
    }

    #[test]
    fn test_join_unions_annotations() {
        let first = Block::with_inlines("paragraph", vec![Inline::text("a").with_annotation("x")]);
        let second = Block::with_inlines("paragraph", vec![Inline::text("b").with_annotation("y")]);

        let joined = join_blocks(&first, &second).unwrap();
        let expected = Inline::text("ab").with_annotation("x").with_annotation("y");
        assert_eq!(joined, Block::with_inlines("paragraph", vec![expected]));
    }

    #[test]
    fn test_join_rejects_mismatched_containers() {
        let text = Block::text_block("paragraph", "a");
        let list = Block::with_blocks("bullet_list", vec![]);
        let rule = Block::leaf("horizontal_rule");

        assert_eq!(join_blocks(&text, &list), None);
        assert_eq!(join_blocks(&rule, &rule), None);
    }

    #[test]
    fn test_join_at_seam_merges_text_children() {
        let first = Block::with_blocks("list_item", vec![Block::text_block("paragraph", "x")]);
        let second = Block::with_blocks(
            "list_item",
            vec![Block::text_block("paragraph", "y"), Block::leaf("horizontal_rule")],
        );

        let joined = join_blocks_at_seam(&first, &second).unwrap();
        assert_eq!(
            joined,
            Block::with_blocks(
                "list_item",
                vec![Block::text_block("paragraph", "xy"), Block::leaf("horizontal_rule")],
            )
        );
    }

    #[test]
    fn test_join_at_seam_leaves_non_text_seams() {
        let image = Block::new(Element::new("figure"), ChildContainer::Leaf);
        let first = Block::with_blocks("list_item", vec![image.clone()]);
        let second = Block::with_blocks("list_item", vec![Block::text_block("paragraph", "y")]);

        let joined = join_blocks_at_seam(&first, &second).unwrap();
        assert_eq!(
            joined,
            Block::with_blocks("list_item", vec![image, Block::text_block("paragraph", "y")])
        );
    }
}
