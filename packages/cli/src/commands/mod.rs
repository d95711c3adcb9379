pub mod edit;
pub mod show;

pub use edit::{edit, EditArgs, EditCommand};
pub use show::{show, ShowArgs};

use anyhow::{Context, Result};
use folio_editor::EditorState;
use std::fs;
use std::path::Path;

/// Read an editor state from a JSON file
pub fn load_state(path: &Path) -> Result<EditorState> {
    let content = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid document in {}", path.display()))
}
