//! Editable tree nodes.
//!
//! The editable representation mirrors the persisted model plus one
//! synthetic header element injected as every container's first child.
//! Arbitrary local edits may transiently produce any malformed shape;
//! the normalizer (see `normalize.rs`) is what maps every shape back
//! into the grammar:
//!
//! ```text
//! root
//!   └── part      [hpart, scene...]
//!         └── scene    [hscene, block...]
//!               └── block    [text...]
//! ```

use serde::{Deserialize, Serialize};

/// Kind tag of an editable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Part,
    Scene,
    /// Part header (synthetic, holds the part name as text).
    HPart,
    /// Scene header (synthetic, holds the scene name as text).
    HScene,
    P,
    Comment,
    Missing,
    Synopsis,
}

impl ElementKind {
    pub fn is_container(self) -> bool {
        matches!(self, ElementKind::Part | ElementKind::Scene)
    }

    pub fn is_header(self) -> bool {
        matches!(self, ElementKind::HPart | ElementKind::HScene)
    }

    /// Paragraph-family kinds: the blocks a scene holds after its header.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            ElementKind::P | ElementKind::Comment | ElementKind::Missing | ElementKind::Synopsis
        )
    }

    /// The header kind a container must start with.
    pub fn header_kind(self) -> Option<ElementKind> {
        match self {
            ElementKind::Part => Some(ElementKind::HPart),
            ElementKind::Scene => Some(ElementKind::HScene),
            _ => None,
        }
    }

    /// The container kind a header belongs to.
    pub fn container_kind(self) -> Option<ElementKind> {
        match self {
            ElementKind::HPart => Some(ElementKind::Part),
            ElementKind::HScene => Some(ElementKind::Scene),
            _ => None,
        }
    }

    /// Kind given to the second half when a block of this kind is
    /// split by a line break. `None` means the split inherits.
    pub fn break_successor(self) -> Option<ElementKind> {
        match self {
            ElementKind::HPart => Some(ElementKind::HScene),
            ElementKind::HScene => Some(ElementKind::P),
            ElementKind::Synopsis => Some(ElementKind::P),
            ElementKind::Missing => Some(ElementKind::P),
            _ => None,
        }
    }

    /// Kinds that turn back into a plain paragraph when a line break
    /// is pressed on an empty block.
    pub fn resets_on_empty_break(self) -> bool {
        matches!(
            self,
            ElementKind::Synopsis | ElementKind::Comment | ElementKind::Missing
        )
    }

    /// Kinds that backspace-at-start strips back to a plain paragraph
    /// instead of merging with the previous block.
    pub fn is_stylable(self) -> bool {
        matches!(
            self,
            ElementKind::Missing
                | ElementKind::Comment
                | ElementKind::Synopsis
                | ElementKind::HPart
                | ElementKind::HScene
        )
    }
}

/// A text run leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A structural element: container, header, or block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Display name; meaningful on containers only, kept in sync with
    /// the header child's text by the normalizer.
    #[serde(default)]
    pub name: String,
    /// Fold state; meaningful on containers only.
    #[serde(default)]
    pub folded: bool,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(kind: ElementKind, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: String::new(),
            folded: false,
            children: Vec::new(),
        }
    }

    pub fn container(kind: ElementKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new(kind, id)
        }
    }

    /// A header element carrying its container's name as text.
    pub fn header(kind: ElementKind, id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            children: vec![Node::Text(Text::new(text))],
            ..Self::new(kind, id)
        }
    }

    /// A paragraph-family block with one text run.
    pub fn block(kind: ElementKind, id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            children: vec![Node::Text(Text::new(text))],
            ..Self::new(kind, id)
        }
    }
}

/// An editable tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(Text),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub fn kind(&self) -> Option<ElementKind> {
        self.as_element().map(|e| e.kind)
    }

    /// Concatenated text of every descendant text run.
    pub fn text_content(&self) -> String {
        fn collect(node: &Node, out: &mut String) {
            match node {
                Node::Text(t) => out.push_str(&t.text),
                Node::Element(e) => {
                    for child in &e.children {
                        collect(child, out);
                    }
                }
            }
        }
        let mut out = String::new();
        collect(self, &mut out);
        out
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl From<Text> for Node {
    fn from(t: Text) -> Self {
        Node::Text(t)
    }
}
