//! # Markup Shortcut Translator
//!
//! Markdown-like typing shortcuts. The decision logic is pure; the
//! editor applies the resulting action before (or instead of) the
//! underlying primitive.
//!
//! - `"** "` at the start of a block → part header
//! - `"## "` → scene header
//! - `">> "` → synopsis
//! - `"// "` → comment
//! - `"!! "` → missing placeholder
//!
//! A line break on an empty synopsis/comment/missing block turns it
//! back into a paragraph; a break on a kind with a successor style
//! splits and styles the second half; backspace at the start of any
//! styled block strips it to a paragraph.

use crate::node::ElementKind;

/// Typed trigger sequences, matched against the text from the start
/// of the block to the caret plus the text about to be inserted.
pub const TRIGGERS: &[(&str, ElementKind)] = &[
    ("** ", ElementKind::HPart),
    ("## ", ElementKind::HScene),
    (">> ", ElementKind::Synopsis),
    ("// ", ElementKind::Comment),
    ("!! ", ElementKind::Missing),
];

/// The block kind a typed prefix converts to, if it is a trigger.
pub fn trigger_kind(typed: &str) -> Option<ElementKind> {
    TRIGGERS
        .iter()
        .find(|(seq, _)| *seq == typed)
        .map(|&(_, kind)| kind)
}

/// What a line break does to a block of the given kind and content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BreakAction {
    /// Empty reset-kind block: retype to paragraph, no split.
    ResetToParagraph,
    /// Split; the second half takes the given kind.
    SplitInto(ElementKind),
    /// Default split; the second half inherits the kind.
    Split,
}

pub fn break_action(kind: ElementKind, block_is_empty: bool) -> BreakAction {
    if block_is_empty && kind.resets_on_empty_break() {
        return BreakAction::ResetToParagraph;
    }
    match kind.break_successor() {
        Some(successor) => BreakAction::SplitInto(successor),
        None => BreakAction::Split,
    }
}

/// Whether backspace at the start of a block strips its style
/// instead of merging with the previous block.
pub fn backspace_strips_style(kind: ElementKind) -> bool {
    kind.is_stylable()
}
