//! Integration tests for the editor crate
//!
//! States are loaded from and written back to JSON, the way the CLI drives
//! the editor.

use anyhow::Result;
use folio_editor::{Editor, EditorConfig, EditorState, Selection};
use folio_model::{node_at, Block, NodeRef};

const LIST_DOCUMENT: &str = r#"{
    "root": {
        "element": { "name": "doc" },
        "children": {
            "type": "block_children",
            "nodes": [
                {
                    "element": { "name": "bullet_list" },
                    "children": {
                        "type": "block_children",
                        "nodes": [
                            {
                                "element": { "name": "list_item" },
                                "children": {
                                    "type": "block_children",
                                    "nodes": [
                                        {
                                            "element": { "name": "paragraph" },
                                            "children": {
                                                "type": "inline_children",
                                                "nodes": [{ "type": "text", "text": "first item" }]
                                            }
                                        }
                                    ]
                                }
                            }
                        ]
                    }
                }
            ]
        }
    },
    "selection": { "anchorNode": [0, 0, 0, 0], "anchorOffset": 5, "focusNode": [0, 0, 0, 0], "focusOffset": 5 }
}"#;

fn text_at(path: &[usize], root: &Block) -> String {
    node_at(path, root)
        .and_then(NodeRef::as_text)
        .map(|leaf| leaf.text.clone())
        .unwrap_or_default()
}

#[test]
fn test_split_edit_then_lift_from_json() -> Result<()> {
    let state: EditorState = serde_json::from_str(LIST_DOCUMENT)?;
    let editor = Editor::new(EditorConfig::default());

    // Enter in the middle of the item, then Enter again on the new item
    let state = editor.split_list_item(&state)?;
    assert_eq!(state.selection, Some(Selection::caret(vec![0, 1, 0, 0], 0)));
    assert_eq!(text_at(&[0, 0, 0, 0], &state.root), "first");
    assert_eq!(text_at(&[0, 1, 0, 0], &state.root), " item");

    let state = editor.lift(&state)?;
    assert_eq!(state.selection, Some(Selection::caret(vec![1, 0], 0)));
    assert_eq!(text_at(&[1, 0], &state.root), " item");

    let json = serde_json::to_value(&state)?;
    assert_eq!(json["root"]["children"]["nodes"][1]["element"]["name"], "paragraph");
    assert_eq!(json["selection"]["anchorNode"], serde_json::json!([1, 0]));
    Ok(())
}

#[test]
fn test_results_carry_no_editor_tags() -> Result<()> {
    let state: EditorState = serde_json::from_str(LIST_DOCUMENT)?;
    let editor = Editor::default();

    let state = editor.split_list_item(&state)?;
    let state = editor.join_backward(&state)?;

    let json = serde_json::to_string(&state)?;
    assert!(!json.contains("__selection_anchor__"));
    assert!(!json.contains("__selection_focus__"));
    assert!(!json.contains("__lift__"));

    assert_eq!(text_at(&[0, 0, 0, 0], &state.root), "first item");
    assert_eq!(state.selection, Some(Selection::caret(vec![0, 0, 0, 0], 5)));
    Ok(())
}

#[test]
fn test_state_without_selection_round_trips() -> Result<()> {
    let state = EditorState::new(Block::with_blocks("doc", vec![]), None);
    let json = serde_json::to_string(&state)?;
    assert!(!json.contains("selection"));

    let back: EditorState = serde_json::from_str(&json)?;
    assert_eq!(back, state);
    Ok(())
}
