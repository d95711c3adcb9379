//! # Editor
//!
//! Bundles the configuration and the annotation service the commands run
//! with, and exposes every command as a method.

use folio_model::{Block, Fragment, Inline};

use crate::annotations::{Annotator, NodeAnnotations};
use crate::commands::{self, list, paste};
use crate::config::EditorConfig;
use crate::errors::EditorResult;
use crate::state::EditorState;

#[derive(Debug, Clone)]
pub struct Editor<A = NodeAnnotations> {
    config: EditorConfig,
    annotator: A,
}

impl Editor<NodeAnnotations> {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_annotator(config, NodeAnnotations)
    }
}

impl Default for Editor<NodeAnnotations> {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl<A: Annotator> Editor<A> {
    pub fn with_annotator(config: EditorConfig, annotator: A) -> Self {
        Self { config, annotator }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn annotator(&self) -> &A {
        &self.annotator
    }

    pub fn lift(&self, state: &EditorState) -> EditorResult<EditorState> {
        list::lift(self, state)
    }

    pub fn lift_empty(&self, state: &EditorState) -> EditorResult<EditorState> {
        list::lift_empty(self, state)
    }

    pub fn split_list_item(&self, state: &EditorState) -> EditorResult<EditorState> {
        list::split(self, state)
    }

    pub fn join_backward(&self, state: &EditorState) -> EditorResult<EditorState> {
        list::join_backward(self, state)
    }

    pub fn join_forward(&self, state: &EditorState) -> EditorResult<EditorState> {
        list::join_forward(self, state)
    }

    pub fn split_text_block(&self, state: &EditorState) -> EditorResult<EditorState> {
        commands::split_text_block(self, state)
    }

    /// Deletes the selected content
    pub fn remove_range(&self, state: &EditorState) -> EditorResult<EditorState> {
        commands::remove_range(self, state)
    }

    pub fn paste_text(&self, state: &EditorState, text: &str) -> EditorResult<EditorState> {
        paste::paste_text(self, state, text)
    }

    /// Pastes blocks or inlines depending on the fragment's kind
    pub fn paste_fragment(&self, state: &EditorState, fragment: Fragment) -> EditorResult<EditorState> {
        match fragment {
            Fragment::Blocks(blocks) => self.paste_blocks(state, blocks),
            Fragment::Inlines(inlines) => self.paste_inlines(state, inlines),
        }
    }

    pub fn paste_blocks(&self, state: &EditorState, blocks: Vec<Block>) -> EditorResult<EditorState> {
        paste::paste_block_fragment(self, state, blocks)
    }

    pub fn paste_inlines(&self, state: &EditorState, inlines: Vec<Inline>) -> EditorResult<EditorState> {
        paste::paste_inline_fragment(self, state, inlines)
    }

    pub fn paste_html<C>(&self, state: &EditorState, html: &str, converter: &C) -> EditorResult<EditorState>
    where
        C: paste::HtmlConverter + ?Sized,
    {
        paste::paste_html(self, state, html, converter)
    }
}
