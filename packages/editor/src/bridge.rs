//! # Edit/Document Bridge
//!
//! Converters between the persisted section and the editable tree.
//!
//! Opening injects a synthetic header as every container's first
//! child and modernizes legacy `br` blocks. Saving strips the headers
//! back out and matches every editable node against its persisted
//! counterpart by id: nodes whose content, name, fold state, and
//! child identity are unchanged are reused — cloned from the previous
//! section with their cached word counts intact — and only genuinely
//! edited nodes are rebuilt and recounted. A session with no
//! effective changes returns the previous section itself, so no-op
//! edits never dirty upstream save/undo state.

use crate::node::{Element, ElementKind, Node};
use crate::tree::EditableTree;
use folio_document::{Block, BlockKind, IdGenerator, Part, Scene, Section, SectionLookup};

fn element_kind(kind: BlockKind) -> ElementKind {
    match kind.modernized() {
        BlockKind::Comment => ElementKind::Comment,
        BlockKind::Missing => ElementKind::Missing,
        BlockKind::Synopsis => ElementKind::Synopsis,
        BlockKind::P | BlockKind::Br => ElementKind::P,
    }
}

fn block_kind(kind: ElementKind) -> Option<BlockKind> {
    match kind {
        ElementKind::P => Some(BlockKind::P),
        ElementKind::Comment => Some(BlockKind::Comment),
        ElementKind::Missing => Some(BlockKind::Missing),
        ElementKind::Synopsis => Some(BlockKind::Synopsis),
        _ => None,
    }
}

fn element_text(e: &Element) -> String {
    e.children.iter().map(Node::text_content).collect()
}

/// Build the editable tree for a section: headers injected, legacy
/// block kinds modernized. Header ids come from the session generator.
pub fn to_editable(section: &Section, ids: &mut IdGenerator) -> EditableTree {
    let parts = section
        .parts
        .iter()
        .map(|part| {
            let mut children: Vec<Node> =
                vec![Element::header(ElementKind::HPart, ids.new_id(), &part.name).into()];
            children.extend(part.scenes.iter().map(|scene| {
                let mut blocks: Vec<Node> =
                    vec![Element::header(ElementKind::HScene, ids.new_id(), &scene.name).into()];
                blocks.extend(scene.blocks.iter().map(|block| {
                    Node::Element(Element::block(
                        element_kind(block.kind),
                        block.id.clone(),
                        &block.text,
                    ))
                }));
                let mut e = Element::container(ElementKind::Scene, scene.id.clone(), &scene.name);
                e.folded = scene.folded;
                e.children = blocks;
                Node::Element(e)
            }));
            let mut e = Element::container(ElementKind::Part, part.id.clone(), &part.name);
            e.folded = part.folded;
            e.children = children;
            Node::Element(e)
        })
        .collect();
    EditableTree::new(parts)
}

/// Commit an editable tree back onto its previous persisted section.
pub fn from_editable(tree: &EditableTree, previous: &Section) -> Section {
    let lookup = SectionLookup::build(previous);

    let mut parts = Vec::new();
    let mut all_reused = true;
    for node in &tree.children {
        let Some(e) = node.as_element() else { continue };
        if e.kind != ElementKind::Part {
            continue;
        }
        let (part, reused) = convert_part(e, &lookup);
        all_reused &= reused;
        parts.push(part);
    }

    let unchanged = all_reused
        && parts.len() == previous.parts.len()
        && parts.iter().zip(&previous.parts).all(|(a, b)| a.id == b.id);
    if unchanged {
        return previous.clone();
    }
    Section::new(previous.id.clone(), previous.title.clone(), parts)
}

fn convert_part(e: &Element, lookup: &SectionLookup) -> (Part, bool) {
    let mut scenes = Vec::new();
    let mut all_reused = true;
    for child in &e.children {
        let Some(c) = child.as_element() else { continue };
        if c.kind != ElementKind::Scene {
            continue; // skips the synthetic header
        }
        let (scene, reused) = convert_scene(c, lookup);
        all_reused &= reused;
        scenes.push(scene);
    }

    if all_reused {
        if let Some(prev) = lookup.part(&e.id) {
            let same_shape = prev.name == e.name
                && prev.folded == e.folded
                && prev.scenes.len() == scenes.len()
                && prev.scenes.iter().zip(&scenes).all(|(a, b)| a.id == b.id);
            if same_shape {
                return (prev.clone(), true);
            }
        }
    }

    let mut part = Part::new(e.id.clone(), e.name.clone(), scenes);
    part.folded = e.folded;
    (part, false)
}

fn convert_scene(e: &Element, lookup: &SectionLookup) -> (Scene, bool) {
    let mut blocks = Vec::new();
    let mut all_reused = true;
    for child in &e.children {
        let Some(c) = child.as_element() else { continue };
        let Some(kind) = block_kind(c.kind) else {
            continue; // skips the synthetic header
        };
        let (block, reused) = convert_block(c, kind, lookup);
        all_reused &= reused;
        blocks.push(block);
    }

    if all_reused {
        if let Some(prev) = lookup.scene(&e.id) {
            let same_shape = prev.name == e.name
                && prev.folded == e.folded
                && prev.blocks.len() == blocks.len()
                && prev.blocks.iter().zip(&blocks).all(|(a, b)| a.id == b.id);
            if same_shape {
                return (prev.clone(), true);
            }
        }
    }

    let mut scene = Scene::new(e.id.clone(), e.name.clone(), blocks);
    scene.folded = e.folded;
    (scene, false)
}

fn convert_block(e: &Element, kind: BlockKind, lookup: &SectionLookup) -> (Block, bool) {
    let text = element_text(e);
    if let Some(prev) = lookup.block(&e.id) {
        if prev.kind == kind && prev.text == text {
            return (prev.clone(), true);
        }
    }
    (Block::new(e.id.clone(), kind, text), false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_section() -> Section {
        Section::new(
            "sec-1",
            "Draft",
            vec![Part::new(
                "p1",
                "One",
                vec![
                    Scene::new(
                        "s1",
                        "Opening",
                        vec![
                            Block::new("b1", BlockKind::P, "hello world"),
                            Block::new("b2", BlockKind::Comment, "fix me"),
                        ],
                    ),
                    Scene::new("s2", "Later", vec![Block::new("b3", BlockKind::P, "tail")]),
                ],
            )],
        )
    }

    #[test]
    fn test_to_editable_injects_headers() {
        let section = sample_section();
        let tree = to_editable(&section, &mut IdGenerator::from_seed("e"));

        let part = tree.element(&[0]).unwrap();
        assert_eq!(part.kind, ElementKind::Part);
        assert_eq!(part.id, "p1");
        assert_eq!(part.children[0].kind(), Some(ElementKind::HPart));
        assert_eq!(tree.block_text(&[0, 0]).unwrap(), "One");

        let scene = tree.element(&[0, 1]).unwrap();
        assert_eq!(scene.children[0].kind(), Some(ElementKind::HScene));
        assert_eq!(tree.block_text(&[0, 1, 0]).unwrap(), "Opening");
        assert_eq!(tree.element(&[0, 1, 2]).unwrap().kind, ElementKind::Comment);
    }

    #[test]
    fn test_legacy_br_becomes_paragraph() {
        let section = Section::new(
            "sec-1",
            "Draft",
            vec![Part::new(
                "p1",
                "One",
                vec![Scene::new("s1", "", vec![Block::new("b1", BlockKind::Br, "")])],
            )],
        );
        let tree = to_editable(&section, &mut IdGenerator::from_seed("e"));
        assert_eq!(tree.element(&[0, 1, 1]).unwrap().kind, ElementKind::P);
    }

    #[test]
    fn test_round_trip_returns_previous_section() {
        let section = sample_section();
        let tree = to_editable(&section, &mut IdGenerator::from_seed("e"));
        let saved = from_editable(&tree, &section);
        assert_eq!(saved, section);
    }

    #[test]
    fn test_rebuild_recomputes_words() {
        let section = sample_section();
        let mut tree = to_editable(&section, &mut IdGenerator::from_seed("e"));
        tree.set_block_text(&[0, 1, 1], "a much longer paragraph than before");

        let saved = from_editable(&tree, &section);
        assert_ne!(saved, section);
        assert_eq!(saved.parts[0].scenes[0].blocks[0].words.text, 6);
        assert_eq!(saved.words.text, 1 + 6); // "tail" + edited paragraph
        assert_eq!(saved.words.comments, 2);
    }
}
