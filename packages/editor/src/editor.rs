//! # Editing surface
//!
//! [`Editor`] owns the editable tree, the caret, and the session's id
//! generator, and funnels every mutation through one path: guard,
//! translate, primitive, normalize. The four content primitives
//! (insert-text, insert-break, delete-backward, delete-forward) are
//! what a host UI binds keystrokes to.
//!
//! The caret addresses its block by id rather than by path, so it
//! survives the wrap/lift/merge repairs normalization performs
//! underneath it.

use crate::bridge::{from_editable, to_editable};
use crate::errors::EditorError;
use crate::node::{ElementKind, Node};
use crate::normalize::normalize;
use crate::shortcuts::{backspace_strips_style, break_action, trigger_kind, BreakAction};
use crate::tree::{char_len, split_at_chars, EditableTree, Path};
use folio_document::{IdGenerator, Section};

/// Caret position: a block id plus a character offset into its text.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub block: String,
    pub offset: usize,
}

impl Point {
    pub fn new(block: impl Into<String>, offset: usize) -> Self {
        Self {
            block: block.into(),
            offset,
        }
    }
}

/// An interactive editing session over one manuscript section.
#[derive(Debug)]
pub struct Editor {
    tree: EditableTree,
    caret: Option<Point>,
    ids: IdGenerator,
}

impl Editor {
    /// Wrap an existing tree, normalizing it into a valid shape.
    pub fn new(tree: EditableTree, ids: IdGenerator) -> Result<Self, EditorError> {
        let mut editor = Self {
            tree,
            caret: None,
            ids,
        };
        editor.normalize()?;
        Ok(editor)
    }

    /// Open a persisted section for editing.
    pub fn open(section: &Section) -> Result<Self, EditorError> {
        // Session ids get their own seed so they never collide with
        // ids minted when the section was first created.
        let mut ids = IdGenerator::new(&format!("{}#edit", section.id));
        let tree = to_editable(section, &mut ids);
        Self::new(tree, ids)
    }

    /// Commit the session back onto its previous persisted state.
    pub fn save(&self, previous: &Section) -> Section {
        from_editable(&self.tree, previous)
    }

    pub fn tree(&self) -> &EditableTree {
        &self.tree
    }

    pub fn caret(&self) -> Option<&Point> {
        self.caret.as_ref()
    }

    /// Place the caret in a block. Fails if the id is not in the tree.
    pub fn set_caret(&mut self, block: impl Into<String>, offset: usize) -> Result<(), EditorError> {
        let block = block.into();
        if self.tree.find_path_by_id(&block).is_none() {
            return Err(EditorError::BlockNotFound(block));
        }
        self.caret = Some(Point::new(block, offset));
        Ok(())
    }

    /// Run the normalizer to its fixed point and drop a stale caret.
    pub fn normalize(&mut self) -> Result<(), EditorError> {
        normalize(&mut self.tree, &mut self.ids)?;
        if let Some(caret) = &self.caret {
            if self.tree.find_path_by_id(&caret.block).is_none() {
                self.caret = None;
            }
        }
        Ok(())
    }

    /// Caret as (path, block text, clamped offset).
    fn resolve_caret(&self) -> Result<Option<(Path, String, usize)>, EditorError> {
        let Some(caret) = &self.caret else {
            return Ok(None);
        };
        let Some(path) = self.tree.find_path_by_id(&caret.block) else {
            return Err(EditorError::BlockNotFound(caret.block.clone()));
        };
        let text = self.tree.block_text(&path).unwrap_or_default();
        let offset = caret.offset.min(char_len(&text));
        Ok(Some((path, text, offset)))
    }

    /// Fold-Protection Guard: unfold the caret's nearest folded
    /// ancestor container before an edit touches hidden content.
    /// Returns whether an unfold happened.
    fn unfold_guard(&mut self, path: &[usize]) -> bool {
        for len in (1..path.len()).rev() {
            let prefix = &path[..len];
            let folded_container = self
                .tree
                .element(prefix)
                .map(|e| e.kind.is_container() && e.folded)
                .unwrap_or(false);
            if folded_container {
                self.tree.set_folded(prefix, false);
                return true;
            }
        }
        false
    }

    /// Insert text at the caret, translating typed block shortcuts.
    pub fn insert_text(&mut self, input: &str) -> Result<(), EditorError> {
        let Some((path, text, offset)) = self.resolve_caret()? else {
            return Ok(());
        };
        self.unfold_guard(&path);

        let (before, after) = split_at_chars(&text, offset);
        let typed = format!("{before}{input}");
        if let Some(kind) = trigger_kind(&typed) {
            // The trigger text is consumed, not inserted.
            let rest = after.to_string();
            self.tree.set_block_text(&path, rest);
            self.tree.set_kind(&path, kind);
            if let Some(caret) = &mut self.caret {
                caret.offset = 0;
            }
        } else {
            let mut updated = String::with_capacity(text.len() + input.len());
            updated.push_str(before);
            updated.push_str(input);
            updated.push_str(after);
            self.tree.set_block_text(&path, updated);
            if let Some(caret) = &mut self.caret {
                caret.offset = offset + char_len(input);
            }
        }
        self.normalize()
    }

    /// Insert a line break at the caret.
    pub fn insert_break(&mut self) -> Result<(), EditorError> {
        let Some((path, text, offset)) = self.resolve_caret()? else {
            return Ok(());
        };
        if self.unfold_guard(&path) {
            // Unfolding already changed the visible shape; the break
            // is consumed by it.
            return self.normalize();
        }

        let Some(kind) = self.tree.element(&path).map(|e| e.kind) else {
            return Ok(());
        };
        match break_action(kind, text.is_empty()) {
            BreakAction::ResetToParagraph => {
                self.tree.set_kind(&path, ElementKind::P);
            }
            BreakAction::SplitInto(successor) => {
                let id = self.ids.new_id();
                self.tree.split_block(&path, offset, Some(successor), id.clone());
                self.caret = Some(Point::new(id, 0));
            }
            BreakAction::Split => {
                let id = self.ids.new_id();
                self.tree.split_block(&path, offset, None, id.clone());
                self.caret = Some(Point::new(id, 0));
            }
        }
        self.normalize()
    }

    /// Delete one character before the caret, or strip the block's
    /// style, or merge it into the previous block.
    pub fn delete_backward(&mut self) -> Result<(), EditorError> {
        let Some((path, text, offset)) = self.resolve_caret()? else {
            return Ok(());
        };
        self.unfold_guard(&path);

        if offset > 0 {
            let (before, rest) = split_at_chars(&text, offset - 1);
            let mut updated = String::from(before);
            updated.extend(rest.chars().skip(1));
            self.tree.set_block_text(&path, updated);
            if let Some(caret) = &mut self.caret {
                caret.offset = offset - 1;
            }
            return self.normalize();
        }

        let kind = self.tree.element(&path).map(|e| e.kind);
        if kind.map_or(false, backspace_strips_style) {
            // One keystroke strips special formatting.
            self.tree.set_kind(&path, ElementKind::P);
            return self.normalize();
        }

        // Merge into the previous sibling block. Merging into the
        // scene header would rewrite the scene name, so that is a
        // no-op.
        let index = *path.last().unwrap_or(&0);
        if index > 0 {
            let mut prev_path = path.clone();
            prev_path[path.len() - 1] = index - 1;
            let prev = self.tree.element(&prev_path).map(|e| (e.id.clone(), e.kind));
            if let Some((prev_id, prev_kind)) = prev {
                if prev_kind.is_block() {
                    let prev_text = self.tree.block_text(&prev_path).unwrap_or_default();
                    let junction = char_len(&prev_text);
                    self.tree.set_block_text(&prev_path, prev_text + &text);
                    self.tree.remove(&path);
                    self.caret = Some(Point::new(prev_id, junction));
                }
            }
        }
        self.normalize()
    }

    /// Delete one character after the caret, or merge the next block in.
    pub fn delete_forward(&mut self) -> Result<(), EditorError> {
        let Some((path, text, offset)) = self.resolve_caret()? else {
            return Ok(());
        };
        self.unfold_guard(&path);

        if offset < char_len(&text) {
            let (before, rest) = split_at_chars(&text, offset);
            let mut updated = String::from(before);
            updated.extend(rest.chars().skip(1));
            self.tree.set_block_text(&path, updated);
            return self.normalize();
        }

        let mut next_path = path.clone();
        if let Some(last) = next_path.last_mut() {
            *last += 1;
        }
        let next = self.tree.element(&next_path).map(|e| e.kind);
        if next.map_or(false, ElementKind::is_block) {
            let next_text = self.tree.block_text(&next_path).unwrap_or_default();
            self.tree.set_block_text(&path, text + &next_text);
            self.tree.remove(&next_path);
        }
        self.normalize()
    }

    /// Toggle the fold state of the caret's nearest container.
    pub fn toggle_fold(&mut self) -> Result<(), EditorError> {
        let Some((path, _, _)) = self.resolve_caret()? else {
            return Ok(());
        };
        for len in (1..path.len()).rev() {
            let prefix = &path[..len];
            if let Some(e) = self.tree.element(prefix) {
                if e.kind.is_container() {
                    let folded = e.folded;
                    self.tree.set_folded(prefix, !folded);
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    pub fn fold_all(&mut self) {
        set_folds(&mut self.tree.children, true);
    }

    pub fn unfold_all(&mut self) {
        set_folds(&mut self.tree.children, false);
    }

    pub fn move_to_previous_scene(&mut self) -> Result<(), EditorError> {
        self.move_scene(-1)
    }

    pub fn move_to_next_scene(&mut self) -> Result<(), EditorError> {
        self.move_scene(1)
    }

    fn move_scene(&mut self, direction: isize) -> Result<(), EditorError> {
        let Some((path, _, _)) = self.resolve_caret()? else {
            return Ok(());
        };
        let scenes = self.tree.scene_paths();
        let Some(current) = scenes.iter().position(|s| path.starts_with(s)) else {
            return Ok(());
        };
        let target = current as isize + direction;
        if target < 0 || target as usize >= scenes.len() {
            return Ok(());
        }
        let scene_path = &scenes[target as usize];
        let Some(scene) = self.tree.element(scene_path) else {
            return Ok(());
        };
        // First block after the header, falling back to the header.
        let landing = scene
            .children
            .iter()
            .find(|n| n.kind().map_or(false, ElementKind::is_block))
            .or_else(|| scene.children.first())
            .and_then(Node::as_element)
            .map(|e| e.id.clone());
        if let Some(block) = landing {
            self.caret = Some(Point::new(block, 0));
        }
        Ok(())
    }
}

fn set_folds(nodes: &mut [Node], folded: bool) {
    for node in nodes {
        if let Node::Element(e) = node {
            if e.kind.is_container() {
                e.folded = folded;
            }
            set_folds(&mut e.children, folded);
        }
    }
}
