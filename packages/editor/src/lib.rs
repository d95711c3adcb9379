//! # Folio Editor
//!
//! Selection-aware editing commands on top of the `folio-model` tree.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: tree, traversal, primitives          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: composite commands                  │
//! │  - Tag nodes whose position must survive    │
//! │  - Run structural primitives                │
//! │  - Recover paths and rebuild the selection  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **States are values**: a command maps an `EditorState` to a new one or
//!    fails, leaving the input untouched
//! 2. **Paths are recomputed**: positions are carried across mutations by
//!    annotations, never by stale paths
//! 3. **Configurable schema**: list and paragraph element names come from
//!    `EditorConfig`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{Editor, EditorState};
//! use folio_model::Block;
//!
//! let root = Block::with_blocks("doc", vec![Block::text_block("paragraph", "ab")]);
//! let state = EditorState::with_caret(root, vec![0, 0], 1);
//!
//! let editor = Editor::default();
//! let state = editor.split_text_block(&state)?;
//! let state = editor.paste_text(&state, "inserted")?;
//! ```

pub mod annotations;
pub mod commands;
mod config;
mod editor;
mod errors;
pub mod join;
mod selection;
mod state;

pub use annotations::{Annotator, NodeAnnotations};
pub use commands::paste::HtmlConverter;
pub use config::{EditorConfig, ListDefinition};
pub use editor::Editor;
pub use errors::{EditorError, EditorResult};
pub use selection::Selection;
pub use state::EditorState;
