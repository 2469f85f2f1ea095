//! Persisted manuscript tree: sections, parts, scenes, blocks.
//!
//! These are the serialization units and the source of truth between
//! editing sessions. Header nodes do not exist here — they are
//! synthesized by the editing bridge when a section is opened.

use crate::words::{word_count, WordCount};
use serde::{Deserialize, Serialize};

/// Kind of a paragraph-family block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Plain paragraph.
    P,
    /// Author comment, excluded from the manuscript word count.
    Comment,
    /// Placeholder for content still to be written.
    Missing,
    /// Scene synopsis.
    Synopsis,
    /// Legacy line-break block from old documents. Normalized to `P`
    /// when the section is opened for editing.
    Br,
}

impl BlockKind {
    /// Legacy kinds collapse to their modern equivalent.
    pub fn modernized(self) -> BlockKind {
        match self {
            BlockKind::Br => BlockKind::P,
            other => other,
        }
    }
}

/// A typed paragraph block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub text: String,
    pub words: WordCount,
}

impl Block {
    /// Build a block, computing its word-count cache.
    pub fn new(id: impl Into<String>, kind: BlockKind, text: impl Into<String>) -> Self {
        let text = text.into();
        let words = Self::count(kind, &text);
        Self {
            id: id.into(),
            kind,
            text,
            words,
        }
    }

    /// Count the block's text into the bucket its kind belongs to.
    pub fn count(kind: BlockKind, text: &str) -> WordCount {
        let n = word_count(text);
        match kind {
            BlockKind::Comment => WordCount {
                comments: n,
                ..WordCount::ZERO
            },
            BlockKind::Missing => WordCount {
                missing: n,
                ..WordCount::ZERO
            },
            _ => WordCount {
                text: n,
                ..WordCount::ZERO
            },
        }
    }
}

/// Mid-level manuscript division.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub folded: bool,
    pub blocks: Vec<Block>,
    pub words: WordCount,
}

impl Scene {
    pub fn new(id: impl Into<String>, name: impl Into<String>, blocks: Vec<Block>) -> Self {
        let words = blocks.iter().map(|b| b.words).sum();
        Self {
            id: id.into(),
            name: name.into(),
            folded: false,
            blocks,
            words,
        }
    }
}

/// Top-level manuscript division.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub folded: bool,
    pub scenes: Vec<Scene>,
    pub words: WordCount,
}

impl Part {
    pub fn new(id: impl Into<String>, name: impl Into<String>, scenes: Vec<Scene>) -> Self {
        let words = scenes.iter().map(|s| s.words).sum();
        Self {
            id: id.into(),
            name: name.into(),
            folded: false,
            scenes,
            words,
        }
    }
}

/// A manuscript section: the unit of opening, editing, and saving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub parts: Vec<Part>,
    pub words: WordCount,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>, parts: Vec<Part>) -> Self {
        let words = parts.iter().map(|p| p.words).sum();
        Self {
            id: id.into(),
            title: title.into(),
            parts,
            words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_section() -> Section {
        Section::new(
            "sec-1",
            "Draft",
            vec![Part::new(
                "part-1",
                "Part One",
                vec![Scene::new(
                    "scene-1",
                    "Opening",
                    vec![
                        Block::new("b-1", BlockKind::P, "It was a dark and stormy night."),
                        Block::new("b-2", BlockKind::Comment, "tighten this"),
                        Block::new("b-3", BlockKind::Missing, "duel on the roof"),
                    ],
                )],
            )],
        )
    }

    #[test]
    fn test_word_count_buckets_by_kind() {
        let section = sample_section();
        assert_eq!(section.words.text, 8);
        assert_eq!(section.words.comments, 2);
        assert_eq!(section.words.missing, 4);
        assert_eq!(section.parts[0].words, section.words);
        assert_eq!(section.parts[0].scenes[0].words, section.words);
    }

    #[test]
    fn test_br_modernizes_to_paragraph() {
        assert_eq!(BlockKind::Br.modernized(), BlockKind::P);
        assert_eq!(BlockKind::Synopsis.modernized(), BlockKind::Synopsis);
    }

    #[test]
    fn test_serde_round_trip() {
        let section = sample_section();
        let json = serde_json::to_string(&section).unwrap();
        let back: Section = serde_json::from_str(&json).unwrap();
        assert_eq!(section, back);
    }

    #[test]
    fn test_block_kind_serializes_as_lowercase_type() {
        let block = Block::new("b-1", BlockKind::Synopsis, "she finds the letter");
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "synopsis");
    }
}
