use super::*;
use crate::element::{ElementKind, SceneElement};

fn snapshot_with(names: &[&str]) -> Snapshot {
    Snapshot {
        elements: names
            .iter()
            .map(|n| SceneElement::new(ElementKind::Model, *n, "ref"))
            .collect(),
        tracks: Vec::new(),
    }
}

fn names(snapshot: &Snapshot) -> Vec<String> {
    snapshot.elements.iter().map(|e| e.name.clone()).collect()
}

// =============================================================
// Commit / undo / redo
// =============================================================

#[test]
fn empty_history_has_nothing_to_step() {
    let mut history = History::new();
    assert!(history.undo().is_none());
    assert!(history.redo().is_none());
    assert!(history.current().is_none());
}

#[test]
fn undo_walks_back_redo_walks_forward() {
    let mut history = History::new();
    history.commit(snapshot_with(&[]));
    history.commit(snapshot_with(&["A"]));
    history.commit(snapshot_with(&["A", "B"]));

    assert_eq!(names(history.undo().unwrap()), vec!["A"]);
    assert_eq!(names(history.undo().unwrap()), Vec::<String>::new());
    assert_eq!(names(history.redo().unwrap()), vec!["A"]);
    assert_eq!(names(history.redo().unwrap()), vec!["A", "B"]);
}

#[test]
fn undo_redo_at_bounds_are_no_ops() {
    let mut history = History::new();
    history.commit(snapshot_with(&[]));
    history.commit(snapshot_with(&["A"]));

    // Redo at the newest snapshot: no-op.
    assert!(history.redo().is_none());

    // Undo down to the oldest, then once more: no-op.
    assert!(history.undo().is_some());
    assert!(history.undo().is_none());
    assert_eq!(names(history.current().unwrap()), Vec::<String>::new());
}

#[test]
fn commit_truncates_redo_branch() {
    let mut history = History::new();
    history.commit(snapshot_with(&[]));
    history.commit(snapshot_with(&["A"]));
    history.commit(snapshot_with(&["A", "B"]));
    history.undo();
    history.undo();

    history.commit(snapshot_with(&["C"]));
    assert_eq!(history.len(), 2);
    assert!(history.redo().is_none());
    assert_eq!(names(history.current().unwrap()), vec!["C"]);
}

#[test]
fn can_undo_redo_flags() {
    let mut history = History::new();
    assert!(!history.can_undo());
    assert!(!history.can_redo());

    history.commit(snapshot_with(&[]));
    history.commit(snapshot_with(&["A"]));
    assert!(history.can_undo());
    assert!(!history.can_redo());

    history.undo();
    assert!(!history.can_undo());
    assert!(history.can_redo());
}

// =============================================================
// Bounded depth
// =============================================================

#[test]
fn bounded_history_drops_oldest() {
    let mut history = History::with_capacity(3);
    for i in 0..5 {
        let name = format!("s{i}");
        history.commit(snapshot_with(&[name.as_str()]));
    }
    assert_eq!(history.len(), 3);
    // Walk to the bottom: oldest surviving snapshot is s2.
    while history.can_undo() {
        history.undo();
    }
    assert_eq!(names(history.current().unwrap()), vec!["s2"]);
}

#[test]
fn capacity_zero_keeps_one() {
    let mut history = History::with_capacity(0);
    history.commit(snapshot_with(&["A"]));
    history.commit(snapshot_with(&["B"]));
    assert_eq!(history.len(), 1);
    assert_eq!(names(history.current().unwrap()), vec!["B"]);
}

// =============================================================
// Value semantics
// =============================================================

#[test]
fn stored_snapshot_unaffected_by_later_edits_to_source() {
    let mut history = History::new();
    let mut snapshot = snapshot_with(&["A"]);
    history.commit(snapshot.clone());

    // Mutating the caller's copy must not change the stored one.
    snapshot.elements[0].name = "mutated".into();
    assert_eq!(names(history.current().unwrap()), vec!["A"]);
}

#[test]
fn snapshot_serde_round_trip() {
    let snapshot = snapshot_with(&["A", "B"]);
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}
