//! End-to-end keystroke sessions against the public editor API.
//!
//! Each test opens a persisted section, replays a sequence of edits
//! the way a host UI would deliver them, and checks the resulting
//! shape. `assert_consistent` verifies the tree is already at the
//! normalizer's fixed point after every sequence.

use anyhow::Result;
use folio_editor::{
    normalize, Block, BlockKind, Editor, ElementKind, IdGenerator, Part, Scene, Section,
};

fn section() -> Section {
    Section::new(
        "sec-1",
        "Draft",
        vec![Part::new(
            "p1",
            "One",
            vec![Scene::new(
                "s1",
                "Opening",
                vec![
                    Block::new("b1", BlockKind::P, "hello world"),
                    Block::new("b2", BlockKind::P, ""),
                ],
            )],
        )],
    )
}

/// A consistent tree is one more normalize pass away from itself.
fn assert_consistent(ed: &Editor) {
    let mut copy = ed.tree().clone();
    let repairs = normalize(&mut copy, &mut IdGenerator::from_seed("check")).unwrap();
    assert_eq!(repairs, 0, "editor left the tree off its fixed point");
    assert_eq!(&copy, ed.tree());
}

fn type_str(ed: &mut Editor, s: &str) -> Result<()> {
    for ch in s.chars() {
        ed.insert_text(&ch.to_string())?;
    }
    Ok(())
}

#[test]
fn test_part_shortcut_on_empty_paragraph() -> Result<()> {
    // "** " on an empty paragraph turns it into a part header, which
    // climbs out into a brand-new part after the current one.
    let mut ed = Editor::open(&section())?;
    ed.set_caret("b2", 0)?;
    type_str(&mut ed, "** ")?;

    assert_consistent(&ed);
    assert_eq!(ed.tree().children.len(), 2);
    let path = ed.tree().find_path_by_id("b2").unwrap();
    assert_eq!(path, vec![1, 0]);
    assert_eq!(ed.tree().element(&path).unwrap().kind, ElementKind::HPart);

    // Typing the title keeps the new part's name in sync.
    type_str(&mut ed, "Two")?;
    assert_consistent(&ed);
    assert_eq!(ed.tree().element(&[1]).unwrap().name, "Two");
    assert_eq!(ed.tree().block_text(&[1, 0]).unwrap(), "Two");
    Ok(())
}

#[test]
fn test_scene_shortcut_starts_a_new_scene() -> Result<()> {
    let mut ed = Editor::open(&section())?;
    ed.set_caret("b2", 0)?;
    type_str(&mut ed, "## Two")?;

    assert_consistent(&ed);
    let part = ed.tree().element(&[0]).unwrap();
    assert_eq!(part.children.len(), 3); // hpart + two scenes
    assert_eq!(ed.tree().element(&[0, 2]).unwrap().name, "Two");
    // The first scene kept its original paragraph.
    assert_eq!(ed.tree().block_text(&[0, 1, 1]).unwrap(), "hello world");
    Ok(())
}

#[test]
fn test_break_at_end_of_scene_header() -> Result<()> {
    let mut ed = Editor::open(&section())?;
    let header_id = ed.tree().element(&[0, 1, 0]).unwrap().id.clone();
    ed.set_caret(header_id, 7)?;
    ed.insert_break()?;

    assert_consistent(&ed);
    // A scene-header break yields a plain paragraph, never a second
    // header.
    assert_eq!(ed.tree().block_text(&[0, 1, 0]).unwrap(), "Opening");
    let new_block = ed.tree().element(&[0, 1, 1]).unwrap();
    assert_eq!(new_block.kind, ElementKind::P);
    assert_eq!(ed.tree().block_text(&[0, 1, 1]).unwrap(), "");
    assert_eq!(ed.caret().unwrap().block, new_block.id);
    assert_eq!(ed.caret().unwrap().offset, 0);
    Ok(())
}

#[test]
fn test_break_inside_scene_header_splits_the_name() -> Result<()> {
    let mut ed = Editor::open(&section())?;
    let header_id = ed.tree().element(&[0, 1, 0]).unwrap().id.clone();
    ed.set_caret(header_id, 4)?;
    ed.insert_break()?;

    assert_consistent(&ed);
    assert_eq!(ed.tree().element(&[0, 1]).unwrap().name, "Open");
    assert_eq!(ed.tree().block_text(&[0, 1, 1]).unwrap(), "ing");
    assert_eq!(ed.tree().element(&[0, 1, 1]).unwrap().kind, ElementKind::P);
    Ok(())
}

#[test]
fn test_break_on_part_header_opens_a_scene() -> Result<()> {
    // A part-header break continues into a scene header, which the
    // normalizer wraps into a fresh scene before the existing one.
    let mut ed = Editor::open(&section())?;
    let header_id = ed.tree().element(&[0, 0]).unwrap().id.clone();
    ed.set_caret(header_id, 3)?;
    ed.insert_break()?;

    assert_consistent(&ed);
    let part = ed.tree().element(&[0]).unwrap();
    assert_eq!(part.name, "One");
    assert_eq!(part.children.len(), 3);
    let fresh = ed.tree().element(&[0, 1]).unwrap();
    assert_eq!(fresh.kind, ElementKind::Scene);
    assert_eq!(fresh.name, "");
    assert_eq!(ed.tree().element(&[0, 2]).unwrap().name, "Opening");
    Ok(())
}

#[test]
fn test_empty_synopsis_break_resets() -> Result<()> {
    let mut ed = Editor::open(&section())?;
    ed.set_caret("b2", 0)?;
    type_str(&mut ed, ">> ")?;
    assert_eq!(
        ed.tree().element(&[0, 1, 2]).unwrap().kind,
        ElementKind::Synopsis
    );

    ed.insert_break()?;
    assert_consistent(&ed);
    let scene = ed.tree().element(&[0, 1]).unwrap();
    assert_eq!(scene.children.len(), 3, "reset never splits");
    assert_eq!(ed.tree().element(&[0, 1, 2]).unwrap().kind, ElementKind::P);
    Ok(())
}

#[test]
fn test_mixed_session_stays_consistent() -> Result<()> {
    let mut ed = Editor::open(&section())?;

    ed.set_caret("b1", 11)?;
    ed.insert_break()?;
    type_str(&mut ed, "!! the duel")?;
    ed.insert_break()?;
    type_str(&mut ed, "// tighten this")?;
    ed.insert_break()?;
    type_str(&mut ed, "## Aftermath")?;
    ed.insert_break()?;
    type_str(&mut ed, "She waited.")?;
    ed.toggle_fold()?;
    ed.delete_backward()?; // unfold guard fires first

    assert_consistent(&ed);
    let part = ed.tree().element(&[0]).unwrap();
    assert_eq!(part.children.len(), 3);
    assert_eq!(ed.tree().element(&[0, 2]).unwrap().name, "Aftermath");
    assert!(!ed.tree().element(&[0, 2]).unwrap().folded);

    // The whole session survives a save/reopen round trip.
    let before = section();
    let saved = ed.save(&before);
    assert_ne!(saved, before);
    let reopened = Editor::open(&saved)?;
    let resaved = reopened.save(&saved);
    assert_eq!(resaved, saved);
    Ok(())
}

#[test]
fn test_backspace_on_scene_header_rejoins_scenes() -> Result<()> {
    let mut ed = Editor::open(&section())?;
    ed.set_caret("b2", 0)?;
    type_str(&mut ed, "## Two")?;
    // b2 is now the second scene's header; backspace at its start
    // strips the style, and the headerless scene folds back into the
    // previous one.
    ed.set_caret("b2", 0)?;
    ed.delete_backward()?;

    assert_consistent(&ed);
    let path = ed.tree().find_path_by_id("b2").unwrap();
    let block = ed.tree().element(&path).unwrap();
    assert_eq!(block.kind, ElementKind::P);
    assert_eq!(ed.tree().block_text(&path).unwrap(), "Two");
    assert_eq!(ed.tree().element(&[0]).unwrap().children.len(), 2);
    Ok(())
}

#[test]
fn test_trigger_only_fires_at_block_start() -> Result<()> {
    let mut ed = Editor::open(&section())?;
    ed.set_caret("b1", 11)?;
    type_str(&mut ed, "## ")?;

    assert_consistent(&ed);
    let block = ed.tree().element(&[0, 1, 1]).unwrap();
    assert_eq!(block.kind, ElementKind::P);
    assert_eq!(ed.tree().block_text(&[0, 1, 1]).unwrap(), "hello world## ");
    Ok(())
}
