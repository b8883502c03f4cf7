mod common;

use std::rc::Rc;

use common::{FakeResolver, touch};
use sheetdiff::core::{DiffSession, SessionSeed, Side};
use tempfile::TempDir;

fn session_with(default_sheet: &str) -> (TempDir, DiffSession) {
    let tmp = TempDir::new().unwrap();
    let src = touch(tmp.path(), "src.xlsx");
    let dst = touch(tmp.path(), "dst.xlsx");
    let resolver = FakeResolver::default()
        .with(&src, &["a", "b", "c"])
        .with(&dst, &["c", "b"]);
    let session = DiffSession::with_seed(
        Rc::new(resolver),
        SessionSeed {
            source: src,
            dest: dst,
            default_sheet_name: default_sheet.to_string(),
        },
    );
    (tmp, session)
}

#[test]
fn no_preference_selects_first_sheet() {
    let (_tmp, session) = session_with("");
    assert_eq!(session.selected_index(Side::Source), Some(0));
    assert_eq!(session.selected_index(Side::Dest), Some(0));
}

#[test]
fn preferred_sheet_is_selected_on_each_side() {
    let (_tmp, session) = session_with("b");
    assert_eq!(session.selected_index(Side::Source), Some(1));
    assert_eq!(session.selected_index(Side::Dest), Some(1));
    assert_eq!(session.sheets(Side::Source).selected_name(), Some("b"));
}

#[test]
fn absent_preference_falls_back_to_first_sheet() {
    let (_tmp, session) = session_with("z");
    assert_eq!(session.selected_index(Side::Source), Some(0));
    assert_eq!(session.selected_index(Side::Dest), Some(0));
}

#[test]
fn changing_preference_reselects_both_sides() {
    let (_tmp, mut session) = session_with("");

    session.set_default_sheet_name("c");
    assert_eq!(session.selected_index(Side::Source), Some(2));
    assert_eq!(session.selected_index(Side::Dest), Some(0));

    session.set_default_sheet_name("");
    assert_eq!(session.selected_index(Side::Source), Some(0));
    assert_eq!(session.selected_index(Side::Dest), Some(0));
}

#[test]
fn preference_does_not_affect_readiness() {
    let (_tmp, mut session) = session_with("");
    assert!(session.is_ready());
    session.set_default_sheet_name("does-not-exist");
    assert!(session.is_ready());
}

#[test]
fn manual_selection_is_bounds_checked_and_reset_by_reconcile() {
    let (_tmp, mut session) = session_with("");

    assert!(session.select_sheet(Side::Source, 2));
    assert_eq!(session.selected_index(Side::Source), Some(2));

    assert!(!session.select_sheet(Side::Dest, 2));
    assert_eq!(session.selected_index(Side::Dest), Some(0));

    session.refresh();
    assert_eq!(session.selected_index(Side::Source), Some(0));
}
