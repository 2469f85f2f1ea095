//! Error types for the editing engine.
//!
//! Malformed tree shapes are not errors here; they are transient
//! states the normalizer repairs. Only two conditions surface.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// Normalization failed to reach a fixed point within its repair
    /// budget. Internal-consistency fault; must never happen.
    #[error("normalization did not converge: {repairs} repairs exceeded budget {budget}")]
    NormalizeDiverged { repairs: usize, budget: usize },

    /// The caret references a block id that is no longer in the tree.
    #[error("block not found: {0}")]
    BlockNotFound(String),
}
