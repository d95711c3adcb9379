//! # Folio Model
//!
//! Path-addressed document tree and its edit algebra.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ node / path: Block, Inline, Fragment, Path  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ traversal: next / previous / find_*         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ mutations: replace / remove / split         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ visitor: map / fold / concat_map            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Values, not references**: every mutation returns a new root `Block`
//! 2. **Paths are transient**: they are computed per query and never stored in
//!    a node, so any mutation that changes an array length along a path's
//!    prefix invalidates it
//! 3. **Closed kinds**: `Node`, `Inline`, `ChildContainer` and `Fragment` are
//!    matched exhaustively; kind disagreements surface as `KindMismatch`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_model::{mutations, node_at, Block};
//!
//! let root = Block::with_blocks("doc", vec![Block::text_block("paragraph", "ab")]);
//! let (before, after) = mutations::split_block_at_path_and_offset(&[0, 0], 1, &root).unwrap();
//! ```

mod error;
mod node;
pub mod path;
pub mod mutations;
pub mod traversal;
pub mod visitor;

pub use error::{NodeKind, TreeError, TreeResult};
pub use node::{
    is_empty_text_block, is_selectable, is_text_block, node_at, Block, ChildContainer, Element,
    Fragment, Inline, InlineElement, Mark, Node, NodeRef, TextLeaf, SELECTABLE,
};
pub use path::Path;
