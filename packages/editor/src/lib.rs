//! # Folio Editor
//!
//! Editable-document consistency engine for Folio manuscripts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: persisted Section/Part/Scene tree │
//! └─────────────────────────────────────────────┘
//!                     ↓ to_editable
//! ┌─────────────────────────────────────────────┐
//! │ editor: interactive editing session         │
//! │  - low-level tree operations                │
//! │  - structural normalizer (self-healing)     │
//! │  - identity enforcer (unique ids)           │
//! │  - fold guard + markup shortcuts            │
//! └─────────────────────────────────────────────┘
//!                     ↓ from_editable
//! ┌─────────────────────────────────────────────┐
//! │ document: updated section, unchanged nodes  │
//! │ reused with their cached word counts        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Malformed shapes are not errors**: every tree an edit can
//!    produce is repaired, not rejected; normalization runs to a
//!    fixed point after every mutation.
//! 2. **Ids are the only stable key**: the caret, the save-path diff,
//!    and the fold commands all address nodes by id, never by path.
//! 3. **Reuse over recompute**: saving matches nodes by id and clones
//!    unchanged persisted nodes, so word counts are only recomputed
//!    where an edit actually landed.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::Editor;
//!
//! let mut editor = Editor::open(&section)?;
//! editor.set_caret("block-17", 0)?;
//! editor.insert_text("It was a pleasure to burn.")?;
//! editor.insert_break()?;
//! let updated = editor.save(&section);
//! ```

mod bridge;
mod editor;
mod errors;
mod identity;
mod node;
mod normalize;
mod shortcuts;
mod tree;

pub use bridge::{from_editable, to_editable};
pub use editor::{Editor, Point};
pub use errors::EditorError;
pub use identity::enforce_ids;
pub use node::{Element, ElementKind, Node, Text};
pub use normalize::{find_repair, normalize, Repair};
pub use shortcuts::{backspace_strips_style, break_action, trigger_kind, BreakAction, TRIGGERS};
pub use tree::{char_len, split_at_chars, EditableTree, Path};

// Re-export the model types editor consumers need.
pub use folio_document::{Block, BlockKind, IdGenerator, Part, Scene, Section, WordCount};
