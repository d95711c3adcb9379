use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use folio_editor::{Editor, EditorState};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use super::load_state;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Editor state file (JSON document plus selection)
    pub document: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite the input document with the result
    #[arg(short, long, conflicts_with = "output")]
    pub in_place: bool,
}

/// Edit commands the CLI can run against a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Lift,
    LiftEmpty,
    Split,
    JoinForward,
    JoinBackward,
    SplitParagraph,
    Delete,
    PasteText(String),
}

impl EditCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EditCommand::Lift => "lift",
            EditCommand::LiftEmpty => "lift-empty",
            EditCommand::Split => "split",
            EditCommand::JoinForward => "join-forward",
            EditCommand::JoinBackward => "join-backward",
            EditCommand::SplitParagraph => "split-paragraph",
            EditCommand::Delete => "delete",
            EditCommand::PasteText(_) => "paste-text",
        }
    }

    /// Run the command against `state`
    pub fn apply(&self, editor: &Editor, state: &EditorState) -> Result<EditorState> {
        let result = match self {
            EditCommand::Lift => editor.lift(state),
            EditCommand::LiftEmpty => editor.lift_empty(state),
            EditCommand::Split => editor.split_list_item(state),
            EditCommand::JoinForward => editor.join_forward(state),
            EditCommand::JoinBackward => editor.join_backward(state),
            EditCommand::SplitParagraph => editor.split_text_block(state),
            EditCommand::Delete => editor.remove_range(state),
            EditCommand::PasteText(text) => editor.paste_text(state, text),
        };
        result.with_context(|| format!("{} failed", self.name()))
    }
}

pub fn edit(command: EditCommand, args: EditArgs, config: &Config) -> Result<()> {
    let state = load_state(&args.document)?;
    let editor = Editor::new(config.editor.clone());

    debug!(command = command.name(), document = %args.document.display(), "running edit");
    let result = command.apply(&editor, &state)?;
    info!(command = command.name(), selection = ?result.selection, "edit applied");

    let json = if config.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };

    let target = if args.in_place {
        Some(args.document.clone())
    } else {
        args.output.clone()
    };

    match target {
        Some(path) => {
            fs::write(&path, format!("{}\n", json)).with_context(|| format!("Cannot write {}", path.display()))?;
            eprintln!(
                "{} {} → {}",
                "✓".green(),
                command.name().bright_white(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_editor::Selection;
    use folio_model::Block;

    fn paragraph_state(text: &str, offset: usize) -> EditorState {
        let root = Block::with_blocks("doc", vec![Block::text_block("paragraph", text)]);
        EditorState::with_caret(root, vec![0, 0], offset)
    }

    #[test]
    fn test_apply_split_paragraph() {
        let state = paragraph_state("ab", 1);
        let result = EditCommand::SplitParagraph.apply(&Editor::default(), &state).unwrap();
        assert_eq!(result.selection, Some(Selection::caret(vec![1, 0], 0)));
    }

    #[test]
    fn test_apply_reports_command_name() {
        let state = paragraph_state("ab", 1);
        let err = EditCommand::Lift.apply(&Editor::default(), &state).unwrap_err();
        assert!(err.to_string().contains("lift failed"));
    }

    #[test]
    fn test_apply_paste_text() {
        let state = paragraph_state("ab", 2);
        let result = EditCommand::PasteText("c".to_string())
            .apply(&Editor::default(), &state)
            .unwrap();
        assert_eq!(
            result.root,
            Block::with_blocks("doc", vec![Block::text_block("paragraph", "abc")])
        );
    }
}
