//! Id-keyed lookup over a persisted section.
//!
//! The editing bridge matches every editable node against its
//! persisted counterpart by id; this prebuilt map makes each probe
//! O(1) instead of a tree search per node.

use crate::model::{Block, Part, Scene, Section};
use std::collections::HashMap;

/// A persisted node reachable by id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookupEntry<'a> {
    Part(&'a Part),
    Scene(&'a Scene),
    Block(&'a Block),
}

/// Map from node id to persisted node for one section.
#[derive(Debug)]
pub struct SectionLookup<'a> {
    entries: HashMap<&'a str, LookupEntry<'a>>,
}

impl<'a> SectionLookup<'a> {
    /// Build the lookup by walking the section in document order.
    ///
    /// Duplicate ids keep the first occurrence; the editing engine
    /// guarantees uniqueness on its side before saving.
    pub fn build(section: &'a Section) -> Self {
        let mut entries = HashMap::new();
        for part in &section.parts {
            entries.entry(part.id.as_str()).or_insert(LookupEntry::Part(part));
            for scene in &part.scenes {
                entries
                    .entry(scene.id.as_str())
                    .or_insert(LookupEntry::Scene(scene));
                for block in &scene.blocks {
                    entries
                        .entry(block.id.as_str())
                        .or_insert(LookupEntry::Block(block));
                }
            }
        }
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<LookupEntry<'a>> {
        self.entries.get(id).copied()
    }

    pub fn part(&self, id: &str) -> Option<&'a Part> {
        match self.get(id) {
            Some(LookupEntry::Part(p)) => Some(p),
            _ => None,
        }
    }

    pub fn scene(&self, id: &str) -> Option<&'a Scene> {
        match self.get(id) {
            Some(LookupEntry::Scene(s)) => Some(s),
            _ => None,
        }
    }

    pub fn block(&self, id: &str) -> Option<&'a Block> {
        match self.get(id) {
            Some(LookupEntry::Block(b)) => Some(b),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockKind;

    #[test]
    fn test_lookup_finds_every_level() {
        let section = Section::new(
            "sec-1",
            "Draft",
            vec![Part::new(
                "part-1",
                "One",
                vec![Scene::new(
                    "scene-1",
                    "Opening",
                    vec![Block::new("b-1", BlockKind::P, "hello there")],
                )],
            )],
        );

        let lookup = SectionLookup::build(&section);
        assert_eq!(lookup.len(), 3);
        assert_eq!(lookup.part("part-1").unwrap().name, "One");
        assert_eq!(lookup.scene("scene-1").unwrap().name, "Opening");
        assert_eq!(lookup.block("b-1").unwrap().text, "hello there");

        // Kind-mismatched probes miss.
        assert!(lookup.block("part-1").is_none());
        assert!(lookup.get("nope").is_none());
    }
}
