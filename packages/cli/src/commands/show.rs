use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_editor::{EditorState, Selection};
use folio_model::visitor::indexed_foldl;
use folio_model::{Inline, NodeRef};
use std::path::PathBuf;

use super::load_state;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Editor state file (JSON document plus selection)
    pub document: PathBuf,

    /// Print the outline without colors
    #[arg(long)]
    pub plain: bool,
}

pub fn show(args: ShowArgs) -> Result<()> {
    let state = load_state(&args.document)?;
    if args.plain {
        colored::control::set_override(false);
    }

    println!(
        "{} {}",
        "Document".bright_white().bold(),
        args.document.display().to_string().dimmed()
    );
    for line in outline(&state) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per node, indented by depth, with the selection endpoints marked
pub fn outline(state: &EditorState) -> Vec<String> {
    indexed_foldl(
        |path, node, mut lines: Vec<String>| {
            let indent = "  ".repeat(path.len());
            let location = format!("{:?}", path).dimmed();
            let marker = selection_marker(state.selection.as_ref(), path);
            lines.push(format!("{}{} {}{}", indent, describe(node), location, marker));
            lines
        },
        Vec::new(),
        &state.root,
    )
}

fn describe(node: NodeRef<'_>) -> String {
    match node {
        NodeRef::Block(block) => block.element.name.cyan().to_string(),
        NodeRef::Inline(Inline::Text(leaf)) => format!("{:?}", leaf.text).green().to_string(),
        NodeRef::Inline(Inline::Element(inline)) => format!("<{}>", inline.element.name).yellow().to_string(),
    }
}

fn selection_marker(selection: Option<&Selection>, path: &[usize]) -> String {
    let Some(selection) = selection else {
        return String::new();
    };

    let anchor = selection.anchor_node.as_slice() == path;
    let focus = selection.focus_node.as_slice() == path;
    let marker = match (anchor, focus) {
        (true, true) if selection.is_collapsed() => format!(" ◀ caret {}", selection.anchor_offset),
        (true, true) => format!(
            " ◀ anchor {} focus {}",
            selection.anchor_offset, selection.focus_offset
        ),
        (true, false) => format!(" ◀ anchor {}", selection.anchor_offset),
        (false, true) => format!(" ◀ focus {}", selection.focus_offset),
        (false, false) => return String::new(),
    };
    marker.magenta().bold().to_string()
}
