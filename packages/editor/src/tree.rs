//! The editable tree and its low-level structural operations.
//!
//! Operations are addressed by index paths (`[part, scene, block]`)
//! or by node id. They perform exactly one structural edit each and
//! never repair the grammar themselves; the normalizer composes them
//! into self-healing sequences. Out-of-range paths are no-ops that
//! return `false`/`None`.

use crate::node::{Element, ElementKind, Node, Text};
use serde::{Deserialize, Serialize};

/// Index path from the root to a node.
pub type Path = Vec<usize>;

/// Split a string at a character offset (clamped to the end).
pub fn split_at_chars(s: &str, chars: usize) -> (&str, &str) {
    match s.char_indices().nth(chars) {
        Some((byte, _)) => s.split_at(byte),
        None => (s, ""),
    }
}

/// Character length of a string.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn node_at<'a>(nodes: &'a [Node], path: &[usize]) -> Option<&'a Node> {
    let (&i, rest) = path.split_first()?;
    let node = nodes.get(i)?;
    if rest.is_empty() {
        Some(node)
    } else {
        match node {
            Node::Element(e) => node_at(&e.children, rest),
            Node::Text(_) => None,
        }
    }
}

fn node_at_mut<'a>(nodes: &'a mut [Node], path: &[usize]) -> Option<&'a mut Node> {
    let (&i, rest) = path.split_first()?;
    let node = nodes.get_mut(i)?;
    if rest.is_empty() {
        Some(node)
    } else {
        match node {
            Node::Element(e) => node_at_mut(&mut e.children, rest),
            Node::Text(_) => None,
        }
    }
}

/// The tree held by an interactive editing session. The root's
/// children are the section's parts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditableTree {
    pub children: Vec<Node>,
}

impl EditableTree {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn node(&self, path: &[usize]) -> Option<&Node> {
        node_at(&self.children, path)
    }

    pub fn node_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        node_at_mut(&mut self.children, path)
    }

    pub fn element(&self, path: &[usize]) -> Option<&Element> {
        self.node(path)?.as_element()
    }

    pub fn element_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        self.node_mut(path)?.as_element_mut()
    }

    /// The child vector a path's last index points into. The empty
    /// path addresses the root's children.
    pub fn siblings_mut(&mut self, parent: &[usize]) -> Option<&mut Vec<Node>> {
        if parent.is_empty() {
            return Some(&mut self.children);
        }
        match node_at_mut(&mut self.children, parent)? {
            Node::Element(e) => Some(&mut e.children),
            Node::Text(_) => None,
        }
    }

    pub fn siblings(&self, parent: &[usize]) -> Option<&Vec<Node>> {
        if parent.is_empty() {
            return Some(&self.children);
        }
        match node_at(&self.children, parent)? {
            Node::Element(e) => Some(&e.children),
            Node::Text(_) => None,
        }
    }

    /// Insert a node so that it ends up at `path` (index clamped).
    pub fn insert(&mut self, path: &[usize], node: Node) -> bool {
        let Some((&index, parent)) = path.split_last() else {
            return false;
        };
        let Some(siblings) = self.siblings_mut(parent) else {
            return false;
        };
        let index = index.min(siblings.len());
        siblings.insert(index, node);
        true
    }

    /// Remove and return the node at `path`.
    pub fn remove(&mut self, path: &[usize]) -> Option<Node> {
        let (&index, parent) = path.split_last()?;
        let siblings = self.siblings_mut(parent)?;
        if index < siblings.len() {
            Some(siblings.remove(index))
        } else {
            None
        }
    }

    /// Replace the node at `path` with `wrapper`, moving the node
    /// inside it as its last child.
    pub fn wrap(&mut self, path: &[usize], mut wrapper: Element) -> bool {
        let Some((&index, parent)) = path.split_last() else {
            return false;
        };
        let Some(siblings) = self.siblings_mut(parent) else {
            return false;
        };
        if index >= siblings.len() {
            return false;
        }
        let node = siblings.remove(index);
        wrapper.children.push(node);
        siblings.insert(index, Node::Element(wrapper));
        true
    }

    /// Replace the element at `path` with its own children.
    pub fn unwrap(&mut self, path: &[usize]) -> bool {
        let Some((&index, parent)) = path.split_last() else {
            return false;
        };
        if self.element(path).is_none() {
            return false;
        }
        let Some(siblings) = self.siblings_mut(parent) else {
            return false;
        };
        let Node::Element(e) = siblings.remove(index) else {
            return false;
        };
        siblings.splice(index..index, e.children);
        true
    }

    /// Move the node at `path` up one level. A node in the middle of
    /// its parent splits the parent in two; the tail container is
    /// created without an id and picks one up from the identity pass.
    pub fn lift(&mut self, path: &[usize]) -> bool {
        if path.len() < 2 {
            return false;
        }
        let index = path[path.len() - 1];
        let parent_path = &path[..path.len() - 1];
        let parent_index = parent_path[parent_path.len() - 1];
        let grandparent = &parent_path[..parent_path.len() - 1];

        let Some(parent) = self.element(parent_path) else {
            return false;
        };
        if index >= parent.children.len() {
            return false;
        }
        let (parent_kind, parent_name, parent_folded, sibling_count) =
            (parent.kind, parent.name.clone(), parent.folded, parent.children.len());

        if sibling_count == 1 {
            // Parent collapses away entirely.
            let Some(parent_siblings) = self.siblings_mut(grandparent) else {
                return false;
            };
            let Node::Element(mut parent) = parent_siblings.remove(parent_index) else {
                return false;
            };
            let node = parent.children.remove(0);
            parent_siblings.insert(parent_index, node);
            return true;
        }

        if index == 0 || index == sibling_count - 1 {
            let Some(parent_children) = self.siblings_mut(parent_path) else {
                return false;
            };
            let node = parent_children.remove(index);
            let at = if index == 0 { parent_index } else { parent_index + 1 };
            let Some(parent_siblings) = self.siblings_mut(grandparent) else {
                return false;
            };
            parent_siblings.insert(at, node);
            return true;
        }

        // Middle child: split the parent around it.
        let (node, tail) = {
            let Some(parent_children) = self.siblings_mut(parent_path) else {
                return false;
            };
            let tail = parent_children.split_off(index + 1);
            let node = parent_children.remove(index);
            (node, tail)
        };
        let tail_container = Element {
            id: String::new(),
            kind: parent_kind,
            name: parent_name,
            folded: parent_folded,
            children: tail,
        };
        let Some(parent_siblings) = self.siblings_mut(grandparent) else {
            return false;
        };
        parent_siblings.insert(parent_index + 1, node);
        parent_siblings.insert(parent_index + 2, Node::Element(tail_container));
        true
    }

    /// Merge the node at `path` into its previous sibling: elements
    /// splice their children in, text runs concatenate.
    pub fn merge_into_prev(&mut self, path: &[usize]) -> bool {
        let Some((&index, parent)) = path.split_last() else {
            return false;
        };
        if index == 0 {
            return false;
        }
        let Some(siblings) = self.siblings_mut(parent) else {
            return false;
        };
        if index >= siblings.len() {
            return false;
        }
        let current = siblings.remove(index);
        match (&mut siblings[index - 1], current) {
            (Node::Element(prev), Node::Element(cur)) => {
                prev.children.extend(cur.children);
                true
            }
            (Node::Text(prev), Node::Text(cur)) => {
                prev.text.push_str(&cur.text);
                true
            }
            (_, current) => {
                siblings.insert(index, current);
                false
            }
        }
    }

    /// Split the text-bearing element at `path` at a character offset.
    /// The second half becomes a new sibling of kind `second_kind`
    /// (or the same kind) carrying `second_id`.
    pub fn split_block(
        &mut self,
        path: &[usize],
        offset: usize,
        second_kind: Option<ElementKind>,
        second_id: String,
    ) -> bool {
        let Some(element) = self.element(path) else {
            return false;
        };
        let kind = element.kind;
        let text = Node::Element(element.clone()).text_content();
        let (head, tail) = split_at_chars(&text, offset);
        let (head, tail) = (head.to_string(), tail.to_string());

        let Some(element) = self.element_mut(path) else {
            return false;
        };
        element.children = vec![Node::Text(Text::new(head))];

        let second = Element::block(second_kind.unwrap_or(kind), second_id, tail);
        let mut sibling_path = path.to_vec();
        *sibling_path.last_mut().expect("non-empty path") += 1;
        self.insert(&sibling_path, Node::Element(second))
    }

    pub fn set_kind(&mut self, path: &[usize], kind: ElementKind) -> bool {
        match self.element_mut(path) {
            Some(e) => {
                e.kind = kind;
                true
            }
            None => false,
        }
    }

    pub fn set_name(&mut self, path: &[usize], name: impl Into<String>) -> bool {
        match self.element_mut(path) {
            Some(e) => {
                e.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn set_folded(&mut self, path: &[usize], folded: bool) -> bool {
        match self.element_mut(path) {
            Some(e) => {
                e.folded = folded;
                true
            }
            None => false,
        }
    }

    /// Concatenated text of the element at `path`.
    pub fn block_text(&self, path: &[usize]) -> Option<String> {
        self.node(path).map(Node::text_content)
    }

    /// Replace the element's children with a single text run.
    pub fn set_block_text(&mut self, path: &[usize], text: impl Into<String>) -> bool {
        match self.element_mut(path) {
            Some(e) => {
                e.children = vec![Node::Text(Text::new(text))];
                true
            }
            None => false,
        }
    }

    /// Depth-first search for an element by id.
    pub fn find_path_by_id(&self, id: &str) -> Option<Path> {
        fn search(nodes: &[Node], id: &str, prefix: &mut Path) -> Option<Path> {
            for (i, node) in nodes.iter().enumerate() {
                if let Node::Element(e) = node {
                    prefix.push(i);
                    if e.id == id {
                        return Some(prefix.clone());
                    }
                    if let Some(found) = search(&e.children, id, prefix) {
                        return Some(found);
                    }
                    prefix.pop();
                }
            }
            None
        }
        search(&self.children, id, &mut Vec::new())
    }

    /// Number of elements (non-text nodes) in the tree.
    pub fn element_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|n| match n {
                    Node::Element(e) => 1 + count(&e.children),
                    Node::Text(_) => 0,
                })
                .sum()
        }
        count(&self.children)
    }

    /// Paths of every scene in document order.
    pub fn scene_paths(&self) -> Vec<Path> {
        let mut out = Vec::new();
        fn walk(nodes: &[Node], prefix: &mut Path, out: &mut Vec<Path>) {
            for (i, node) in nodes.iter().enumerate() {
                if let Node::Element(e) = node {
                    prefix.push(i);
                    if e.kind == ElementKind::Scene {
                        out.push(prefix.clone());
                    }
                    walk(&e.children, prefix, out);
                    prefix.pop();
                }
            }
        }
        walk(&self.children, &mut Vec::new(), &mut out);
        out
    }
}
