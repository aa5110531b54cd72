/// Dialogue graph traversal and the typewriter reveal.
use proptest::prelude::*;

use grame::dialogue::{DialogueGraph, DialogueLibrary, DialogueNode, DialogueOption, Interaction};
use grame::error::GameError;

fn yes_no() -> DialogueGraph {
    let root = DialogueNode::new("Coming?")
        .with_options(vec![DialogueOption::new("Yes", "B"), DialogueOption::new("No", "C")]);
    let mut g = DialogueGraph::new("A", root, vec!["B".into()]);
    g.add_node("B", DialogueNode::new("Then follow me.").ending(), vec!["A".into()]);
    g.add_node("C", DialogueNode::new("Suit yourself."), vec![]);
    g
}

#[test]
fn unwired_option_does_not_advance() {
    let mut g = yes_no();
    g.select_option(1);
    assert_eq!(g.selected_option(), 1);
    g.advance_rune();
    g.advance_phrase();
    assert_eq!(g.current_key(), "A");
    assert_eq!(g.selected_option(), 1);
    assert_eq!(g.dialogue(), "C");
}

#[test]
fn wired_option_advances_and_resets_cursor() {
    let mut g = yes_no();
    g.advance_rune();
    g.advance_phrase();
    assert_eq!(g.current_key(), "B");
    assert_eq!(g.dialogue(), "");
    assert!(g.is_exhausted());
    // Default successor back to the root, whose cursor was reset on exit.
    g.advance_phrase();
    assert_eq!(g.current_key(), "A");
    assert_eq!(g.selected_option(), 0);
}

#[test]
fn option_cursor_is_clamped() {
    let mut g = yes_no();
    g.select_option(-1);
    assert_eq!(g.selected_option(), 0);
    g.select_option(1);
    g.select_option(1);
    g.select_option(1);
    assert_eq!(g.selected_option(), 1);
}

#[test]
fn node_without_edges_stays_put() {
    let mut g = DialogueGraph::new("only", DialogueNode::new("..."), vec![]);
    g.advance_phrase();
    assert_eq!(g.current_key(), "only");
}

#[test]
fn library_reads_shipped_dialogue() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/dialogue/dialogue.json");
    let lib = DialogueLibrary::load(path).unwrap();
    let elder = lib.get("elder").unwrap();
    assert_eq!(elder.root_key(), "greeting");
    assert_eq!(elder.current_key(), "greeting");
    assert!(!elder.is_exhausted());
}

#[test]
fn library_rejects_dangling_edges() {
    let json = r#"{"sage": [{"id": "a", "phrase": "Hm.", "connections": ["nowhere"]}]}"#;
    let err = DialogueLibrary::from_json(json, "dialogue.json").unwrap_err();
    assert!(matches!(err, GameError::DialogueEdge { .. }), "got {err:?}");
}

#[test]
fn library_rejects_empty_graphs() {
    let err = DialogueLibrary::from_json(r#"{"mute": []}"#, "dialogue.json").unwrap_err();
    assert!(matches!(err, GameError::EmptyDialogue(ref name) if name == "mute"));
}

proptest! {
    /// The reveal only grows and stops at the end of the phrase.
    #[test]
    fn reveal_is_monotonic_and_bounded(phrase in "\\PC{0,40}", steps in 0usize..80) {
        let mut g = DialogueGraph::new("a", DialogueNode::new(phrase.clone()), vec![]);
        let len = phrase.chars().count();
        let mut last = 0;
        for _ in 0..steps {
            g.advance_rune();
            let shown = g.dialogue().chars().count();
            prop_assert!(shown >= last);
            prop_assert!(shown <= len);
            last = shown;
        }
        prop_assert_eq!(last, steps.min(len));
        prop_assert!(phrase.starts_with(g.dialogue()));
    }
}
