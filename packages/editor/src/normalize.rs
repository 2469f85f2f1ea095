//! # Structural Normalizer
//!
//! After every edit the tree is swept bottom-up for grammar
//! violations; the first violation found is repaired with a single
//! structural operation and the sweep restarts, until a sweep finds
//! nothing. Each repair either strictly reduces structural badness
//! (wrong depth, missing header, stray leaf) or hands the node to a
//! sibling merge that consumes it, so the loop reaches a fixed point;
//! a repair budget proportional to tree size turns any violation of
//! that argument into a hard fault instead of a hang.
//!
//! The rules, bottom-up:
//! - a text run directly under the root or a container wraps into a
//!   paragraph; adjacent text runs merge
//! - a header under the wrong parent wraps into a fresh container
//!   named after its text; a header past index 0 is split out into
//!   its own container; a header in place syncs the container name
//! - a block outside a scene wraps into a fresh scene; an empty block
//!   gets an empty text run
//! - a part below depth 1 lifts; a scene above depth 2 wraps into a
//!   part, below it lifts
//! - an empty container is deleted; a container whose first child is
//!   not its header merges into a matching previous sibling (both
//!   unfold first) or, with no such sibling, has the header
//!   synthesized from its name
//!
//! The identity pass (`identity.rs`) runs once after the structural
//! fixed point.

use crate::errors::EditorError;
use crate::identity::enforce_ids;
use crate::node::{Element, ElementKind, Node};
use crate::tree::{EditableTree, Path};
use folio_document::IdGenerator;

/// One structural repair, named by what it does to the node at `path`.
#[derive(Debug, Clone, PartialEq)]
pub enum Repair {
    WrapTextInParagraph { path: Path },
    MergeTextRuns { path: Path },
    WrapHeaderInContainer { path: Path, container: ElementKind, name: String },
    SplitHeaderOut { path: Path, container: ElementKind, name: String },
    SyncContainerName { path: Path, name: String },
    WrapBlockInScene { path: Path },
    FillEmptyBlock { path: Path },
    LiftMisnested { path: Path },
    WrapSceneInPart { path: Path, name: String },
    RemoveEmptyContainer { path: Path },
    MergeWithPrevContainer { path: Path },
    SynthesizeHeader { path: Path, header: ElementKind, name: String },
}

/// Run the normalizer to its fixed point, then enforce id uniqueness.
/// Returns the number of repairs applied.
pub fn normalize(tree: &mut EditableTree, ids: &mut IdGenerator) -> Result<usize, EditorError> {
    let budget = repair_budget(tree);
    let mut repairs = 0;

    while let Some(repair) = find_repair(tree) {
        if repairs >= budget {
            tracing::error!(?repair, repairs, budget, "normalization exceeded its repair budget");
            return Err(EditorError::NormalizeDiverged { repairs, budget });
        }
        tracing::debug!(?repair, "applying structural repair");
        apply_repair(tree, &repair, ids);
        repairs += 1;
    }

    enforce_ids(tree, ids);
    Ok(repairs)
}

/// Upper bound on repairs for a tree of this size. Every node needs a
/// bounded chain of wrap/lift/merge steps to reach its place.
fn repair_budget(tree: &EditableTree) -> usize {
    8 * tree.element_count() + 64
}

/// Bottom-up scan for the first grammar violation.
pub fn find_repair(tree: &EditableTree) -> Option<Repair> {
    scan(&tree.children, None, &mut Vec::new())
}

fn scan(nodes: &[Node], parent: Option<&Element>, prefix: &mut Path) -> Option<Repair> {
    for (index, node) in nodes.iter().enumerate() {
        // Children first: leaves are repaired before their ancestors.
        if let Node::Element(e) = node {
            prefix.push(index);
            let found = scan(&e.children, Some(e), prefix);
            prefix.pop();
            if found.is_some() {
                return found;
            }
        }

        let mut path = prefix.clone();
        path.push(index);

        match node {
            Node::Text(_) => {
                let under_structure = parent.map_or(true, |p| p.kind.is_container());
                if under_structure {
                    return Some(Repair::WrapTextInParagraph { path });
                }
                if index > 0 && nodes[index - 1].is_text() {
                    return Some(Repair::MergeTextRuns { path });
                }
            }
            Node::Element(e) if e.kind.is_header() => {
                let container = e.kind.container_kind().expect("headers have containers");
                let text = node.text_content();
                if parent.map(|p| p.kind) != Some(container) {
                    return Some(Repair::WrapHeaderInContainer { path, container, name: text });
                }
                if index != 0 {
                    return Some(Repair::SplitHeaderOut { path, container, name: text });
                }
                if e.children.is_empty() {
                    return Some(Repair::FillEmptyBlock { path });
                }
                let parent = parent.expect("checked above");
                if parent.name != text {
                    return Some(Repair::SyncContainerName {
                        path: prefix.clone(),
                        name: text,
                    });
                }
            }
            Node::Element(e) if e.kind.is_block() => {
                if parent.map(|p| p.kind) != Some(ElementKind::Scene) {
                    return Some(Repair::WrapBlockInScene { path });
                }
                if e.children.is_empty() {
                    return Some(Repair::FillEmptyBlock { path });
                }
            }
            Node::Element(e) if e.kind == ElementKind::Part => {
                if path.len() > 1 {
                    return Some(Repair::LiftMisnested { path });
                }
                if let Some(repair) = check_container(e, nodes, index, path) {
                    return Some(repair);
                }
            }
            Node::Element(e) => {
                debug_assert_eq!(e.kind, ElementKind::Scene);
                if path.len() < 2 {
                    return Some(Repair::WrapSceneInPart { path, name: e.name.clone() });
                }
                if path.len() > 2 {
                    return Some(Repair::LiftMisnested { path });
                }
                if let Some(repair) = check_container(e, nodes, index, path) {
                    return Some(repair);
                }
            }
        }
    }
    None
}

/// Shared header-mismatch repair for parts and scenes.
fn check_container(e: &Element, siblings: &[Node], index: usize, path: Path) -> Option<Repair> {
    if e.children.is_empty() {
        return Some(Repair::RemoveEmptyContainer { path });
    }
    let header = e.kind.header_kind().expect("containers have headers");
    if e.children[0].kind() == Some(header) {
        return None;
    }
    let mergeable_prev = index > 0 && siblings[index - 1].kind() == Some(e.kind);
    if mergeable_prev {
        Some(Repair::MergeWithPrevContainer { path })
    } else {
        Some(Repair::SynthesizeHeader {
            path,
            header,
            name: e.name.clone(),
        })
    }
}

fn apply_repair(tree: &mut EditableTree, repair: &Repair, ids: &mut IdGenerator) {
    match repair {
        Repair::WrapTextInParagraph { path } => {
            tree.wrap(path, Element::new(ElementKind::P, ids.new_id()));
        }
        Repair::MergeTextRuns { path } => {
            tree.merge_into_prev(path);
        }
        Repair::WrapHeaderInContainer { path, container, name } => {
            tree.wrap(path, Element::container(*container, ids.new_id(), name.clone()));
        }
        Repair::SplitHeaderOut { path, container, name } => {
            // Wrap just this header in its own container and lift it
            // out; trailing blocks merge into it on later passes.
            if tree.wrap(path, Element::container(*container, ids.new_id(), name.clone())) {
                tree.lift(path);
            }
        }
        Repair::SyncContainerName { path, name } => {
            tree.set_name(path, name.clone());
        }
        Repair::WrapBlockInScene { path } => {
            tree.wrap(path, Element::container(ElementKind::Scene, ids.new_id(), ""));
        }
        Repair::FillEmptyBlock { path } => {
            tree.set_block_text(path, "");
        }
        Repair::LiftMisnested { path } => {
            tree.lift(path);
        }
        Repair::WrapSceneInPart { path, name } => {
            tree.wrap(path, Element::container(ElementKind::Part, ids.new_id(), name.clone()));
        }
        Repair::RemoveEmptyContainer { path } => {
            tree.remove(path);
        }
        Repair::MergeWithPrevContainer { path } => {
            // Fold state does not survive a merge: reveal both halves.
            let mut prev = path.clone();
            if let Some(last) = prev.last_mut() {
                *last -= 1;
            }
            tree.set_folded(&prev, false);
            tree.set_folded(path, false);
            tree.merge_into_prev(path);
        }
        Repair::SynthesizeHeader { path, header, name } => {
            let mut at = path.clone();
            at.push(0);
            tree.insert(&at, Element::header(*header, ids.new_id(), name.clone()).into());
        }
    }
}
