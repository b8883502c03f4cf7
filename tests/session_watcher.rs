mod common;

use std::{
    collections::BTreeSet,
    rc::Rc,
    thread,
    time::{Duration, Instant},
};

use common::{FakeResolver, names, touch};
use pretty_assertions::assert_eq;
use sheetdiff::core::{DiffSession, SessionWatcher, Side, normalize_path};
use tempfile::TempDir;

/// Polls `pump` until it reports a refresh or `timeout` passes.
fn pump_until_refreshed(
    watcher: &SessionWatcher,
    session: &mut DiffSession,
    timeout: Duration,
) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if watcher.pump(session) {
            return true;
        }
        thread::sleep(Duration::from_millis(25));
    }
    false
}

#[test]
fn creating_the_missing_workbook_makes_the_session_ready() {
    let tmp = TempDir::new().unwrap();
    let late = tmp.path().join("late.xlsx");
    let dst = touch(tmp.path(), "dst.xlsx");
    let resolver = FakeResolver::default()
        .with(&late, &["late"])
        .with(&dst, &["late", "other"]);

    let mut session = DiffSession::new(Rc::new(resolver));
    session.set_paths(&late, &dst);
    assert!(!session.is_ready());

    let mut watcher = SessionWatcher::new().unwrap();
    watcher.track(&session).unwrap();

    touch(tmp.path(), "late.xlsx");

    assert!(
        pump_until_refreshed(&watcher, &mut session, Duration::from_secs(5)),
        "no refresh after the source workbook appeared"
    );
    assert!(session.is_ready());
    assert_eq!(session.sheet_names(Side::Source), names(&["late"]).as_slice());
    assert_eq!(session.selected_index(Side::Source), Some(0));
}

#[test]
fn retracking_moves_the_watch_to_the_new_directory() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let old_src = touch(first.path(), "src.xlsx");
    let new_src = touch(second.path(), "src.xlsx");
    let resolver = FakeResolver::default()
        .with(&old_src, &["Old"])
        .with(&new_src, &["New"]);

    let mut session = DiffSession::new(Rc::new(resolver));
    session.set_source_path(&old_src);

    let mut watcher = SessionWatcher::new().unwrap();
    watcher.track(&session).unwrap();
    assert_eq!(
        watcher.watched_dirs(),
        &BTreeSet::from([normalize_path(first.path())])
    );

    session.set_source_path(&new_src);
    watcher.track(&session).unwrap();
    assert_eq!(
        watcher.watched_dirs(),
        &BTreeSet::from([normalize_path(second.path())])
    );
    assert_eq!(watcher.watched_files(), &[normalize_path(&new_src)]);

    // Anything still queued from the first directory no longer matches.
    touch(first.path(), "src.xlsx");
    thread::sleep(Duration::from_millis(200));
    assert!(!watcher.pump(&mut session));

    touch(second.path(), "src.xlsx");
    assert!(pump_until_refreshed(
        &watcher,
        &mut session,
        Duration::from_secs(5)
    ));
    assert_eq!(session.sheet_names(Side::Source), names(&["New"]).as_slice());
}
