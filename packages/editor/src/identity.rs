//! # Identity Enforcer
//!
//! Every element must carry a non-empty id, unique within its tree:
//! ids are the key the save path diffs on, and the caret addresses
//! its block by id. Splits and pastes can duplicate ids, and
//! container splits create id-less tails; this pass walks the tree in
//! document order and reassigns every missing or already-seen id.
//! Clashes are always repaired, never surfaced.

use crate::node::Node;
use crate::tree::EditableTree;
use folio_document::IdGenerator;
use std::collections::HashSet;

/// Assign fresh ids to elements with missing or duplicate ids.
/// Returns the number of reassignments.
pub fn enforce_ids(tree: &mut EditableTree, ids: &mut IdGenerator) -> usize {
    let mut seen = HashSet::new();
    let mut fixed = 0;
    walk(&mut tree.children, &mut seen, ids, &mut fixed);
    fixed
}

fn walk(
    nodes: &mut [Node],
    seen: &mut HashSet<String>,
    ids: &mut IdGenerator,
    fixed: &mut usize,
) {
    for node in nodes {
        if let Node::Element(e) = node {
            if e.id.is_empty() || !seen.insert(e.id.clone()) {
                let id = ids.new_id();
                tracing::warn!(old = %e.id, new = %id, "reassigning missing or duplicate node id");
                seen.insert(id.clone());
                e.id = id;
                *fixed += 1;
            }
            walk(&mut e.children, seen, ids, fixed);
        }
    }
}
