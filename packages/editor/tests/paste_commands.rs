//! Paste scenarios
//!
//! This tests:
//! - inline fragments spliced at the caret
//! - block fragments stitched into the surrounding text block
//! - pasting over a non-collapsed selection
//! - HTML paste through a converter

use folio_editor::{Editor, EditorError, EditorState, HtmlConverter, Selection};
use folio_model::{Block, Element, Fragment, Inline, SELECTABLE};

fn doc(paragraphs: &[&str]) -> Block {
    Block::with_blocks(
        "doc",
        paragraphs
            .iter()
            .map(|text| Block::text_block("paragraph", *text))
            .collect(),
    )
}

fn image() -> Inline {
    Inline::element(Element::new("image").with_annotation(SELECTABLE))
}

/// Treats `<hr>` as a rule block and anything else as a single text inline
struct TinyConverter;

impl HtmlConverter for TinyConverter {
    fn html_to_fragment(&self, html: &str) -> Result<Fragment, String> {
        match html {
            "<hr>" => Ok(Fragment::Blocks(vec![Block::leaf("horizontal_rule")])),
            "" => Err("empty markup".to_string()),
            text => Ok(Fragment::Inlines(vec![Inline::text(text)])),
        }
    }
}

#[test]
fn test_paste_inline_fragment_splits_leaf() {
    let state = EditorState::with_caret(doc(&["ab"]), vec![0, 0], 1);
    let result = Editor::default().paste_inlines(&state, vec![image()]).unwrap();

    let expected = Block::with_blocks(
        "doc",
        vec![Block::with_inlines(
            "paragraph",
            vec![Inline::text("a"), image(), Inline::text("b")],
        )],
    );
    assert_eq!(result.root, expected);
    assert_eq!(result.selection, Some(Selection::caret(vec![0, 2], 0)));
}

#[test]
fn test_paste_single_block_joins_both_sides() {
    let state = EditorState::with_caret(doc(&["ab"]), vec![0, 0], 1);
    let fragment = Fragment::Blocks(vec![Block::text_block("heading", "X")]);
    let result = Editor::default().paste_fragment(&state, fragment).unwrap();

    assert_eq!(result.root, doc(&["aXb"]));
    assert_eq!(result.selection, Some(Selection::caret(vec![0, 0], 2)));
}

#[test]
fn test_paste_non_text_block_stays_between_halves() {
    let state = EditorState::with_caret(doc(&["ab"]), vec![0, 0], 1);
    let result = Editor::default().paste_html(&state, "<hr>", &TinyConverter).unwrap();

    let expected = Block::with_blocks(
        "doc",
        vec![
            Block::text_block("paragraph", "a"),
            Block::leaf("horizontal_rule"),
            Block::text_block("paragraph", "b"),
        ],
    );
    assert_eq!(result.root, expected);
    assert_eq!(result.selection, Some(Selection::caret(vec![2, 0], 0)));
}

#[test]
fn test_paste_html_inline() {
    let state = EditorState::with_caret(doc(&["ab"]), vec![0, 0], 2);
    let result = Editor::default().paste_html(&state, "cd", &TinyConverter).unwrap();

    let expected = Block::with_blocks(
        "doc",
        vec![Block::with_inlines(
            "paragraph",
            vec![Inline::text("ab"), Inline::text("cd")],
        )],
    );
    assert_eq!(result.root, expected);
    assert_eq!(result.selection, Some(Selection::caret(vec![0, 1], 2)));
}

#[test]
fn test_paste_inline_before_image_leaves_no_empty_text() {
    let root = Block::with_blocks("doc", vec![Block::with_inlines("paragraph", vec![image()])]);
    let state = EditorState::with_caret(root, vec![0, 0], 0);
    let result = Editor::default().paste_inlines(&state, vec![Inline::text("x")]).unwrap();

    let expected = Block::with_blocks(
        "doc",
        vec![Block::with_inlines("paragraph", vec![Inline::text("x"), image()])],
    );
    assert_eq!(result.root, expected);
    assert_eq!(result.selection, Some(Selection::caret(vec![0, 1], 0)));
}

#[test]
fn test_paste_inline_after_image_lands_after_pasted_text() {
    let root = Block::with_blocks("doc", vec![Block::with_inlines("paragraph", vec![image()])]);
    let state = EditorState::with_caret(root, vec![0, 0], 1);
    let result = Editor::default().paste_inlines(&state, vec![Inline::text("xy")]).unwrap();

    let expected = Block::with_blocks(
        "doc",
        vec![Block::with_inlines("paragraph", vec![image(), Inline::text("xy")])],
    );
    assert_eq!(result.root, expected);
    assert_eq!(result.selection, Some(Selection::caret(vec![0, 1], 2)));
}

#[test]
fn test_paste_blocks_after_trailing_image() {
    let root = Block::with_blocks(
        "doc",
        vec![Block::with_inlines("paragraph", vec![Inline::text("a"), image()])],
    );
    let state = EditorState::with_caret(root, vec![0, 1], 1);
    let fragment = Fragment::Blocks(vec![Block::leaf("horizontal_rule")]);
    let result = Editor::default().paste_fragment(&state, fragment).unwrap();

    let expected = Block::with_blocks(
        "doc",
        vec![
            Block::with_inlines("paragraph", vec![Inline::text("a"), image()]),
            Block::leaf("horizontal_rule"),
            Block::text_block("paragraph", ""),
        ],
    );
    assert_eq!(result.root, expected);
    assert_eq!(result.selection, Some(Selection::caret(vec![2, 0], 0)));
}

#[test]
fn test_paste_html_conversion_failure_keeps_state() {
    let state = EditorState::with_caret(doc(&["ab"]), vec![0, 0], 1);
    let err = Editor::default().paste_html(&state, "", &TinyConverter).unwrap_err();
    assert_eq!(err, EditorError::Conversion("empty markup".to_string()));
}

#[test]
fn test_paste_text_over_selection() {
    let selection = Selection::range(vec![0, 0], 1, vec![1, 0], 2);
    let state = EditorState::new(doc(&["abc", "wxyz"]), Some(selection));
    let result = Editor::default().paste_text(&state, "-").unwrap();

    assert_eq!(result.root, doc(&["a-yz"]));
    assert_eq!(result.selection, Some(Selection::caret(vec![0, 0], 2)));
}

#[test]
fn test_paste_multiple_lines_at_end_of_text() {
    let state = EditorState::with_caret(doc(&["ab"]), vec![0, 0], 2);
    let result = Editor::default().paste_text(&state, "c\nd\ne").unwrap();

    assert_eq!(result.root, doc(&["abc", "d", "e"]));
    assert_eq!(result.selection, Some(Selection::caret(vec![2, 0], 1)));
}

#[test]
fn test_paste_blocks_needs_text_block() {
    let root = Block::with_blocks("doc", vec![Block::leaf("horizontal_rule")]);
    let state = EditorState::with_caret(root, vec![0], 0);
    let fragment = Fragment::Blocks(vec![Block::text_block("paragraph", "x")]);

    let err = Editor::default().paste_fragment(&state, fragment).unwrap_err();
    assert!(matches!(err, EditorError::StructuralPrecondition(_)));
}
