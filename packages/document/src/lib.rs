//! # Folio Document Model
//!
//! Persisted manuscript model for Folio.
//!
//! A manuscript section is a three-level tree:
//!
//! ```text
//! Section
//!   └── Part        (top-level division)
//!         └── Scene (mid-level division)
//!               └── Block (typed paragraph)
//! ```
//!
//! Every node carries a stable string `id` — the only key shared with
//! the editable representation — and a cached [`WordCount`] so that
//! unchanged subtrees never have to be recounted.
//!
//! This crate is deliberately dumb: plain serde-derived data plus the
//! word counter, the id generator, and the id lookup that the editing
//! engine (`folio-editor`) builds its reuse decisions on.

pub mod id_generator;
pub mod lookup;
pub mod model;
pub mod words;

pub use id_generator::IdGenerator;
pub use lookup::{LookupEntry, SectionLookup};
pub use model::{Block, BlockKind, Part, Scene, Section};
pub use words::{word_count, WordCount};
