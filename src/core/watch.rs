use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    sync::mpsc,
};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use crate::core::{DiffSession, Side};

/* ============================== Path matching ============================== */

/// Canonical form of `p`, also for files that no longer exist.
#[must_use]
pub fn normalize_path(p: &Path) -> PathBuf {
    if p.as_os_str().is_empty() {
        return PathBuf::new();
    }
    if let Ok(c) = dunce::canonicalize(p) {
        return c;
    }
    // Deleted files: resolve the parent and reattach the name.
    if let Some(parent) = p.parent()
        && let Ok(parent_canon) = dunce::canonicalize(parent)
        && let Some(file_name) = p.file_name()
    {
        return parent_canon.join(file_name);
    }
    p.to_path_buf()
}

/// True if a change at `event_path` concerns one of the `watched` workbooks.
#[must_use]
pub fn is_event_path_relevant(watched: &[PathBuf], event_path: &Path) -> bool {
    if watched.is_empty() {
        return false;
    }
    let event_path = normalize_path(event_path);
    watched
        .iter()
        .filter(|w| !w.as_os_str().is_empty())
        .any(|w| normalize_path(w) == event_path)
}

/// Empties `rx` without blocking; true if `matches` held for any drained item.
///
/// Every pending item is consumed even after the first match.
pub fn drain_matching<T>(rx: &mpsc::Receiver<T>, mut matches: impl FnMut(T) -> bool) -> bool {
    let mut hit = false;
    while let Ok(item) = rx.try_recv() {
        hit |= matches(item);
    }
    hit
}

/* ================================= Watcher ================================= */

/// Watches the directories holding the session's two workbooks.
pub struct SessionWatcher {
    watcher: RecommendedWatcher,
    rx: mpsc::Receiver<notify::Result<notify::Event>>,
    dirs: BTreeSet<PathBuf>,
    files: Vec<PathBuf>,
}

impl SessionWatcher {
    pub fn new() -> notify::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let watcher = notify::recommended_watcher(tx)?;
        Ok(Self {
            watcher,
            rx,
            dirs: BTreeSet::new(),
            files: Vec::new(),
        })
    }

    /// Re-targets the watcher at the session's current paths.
    ///
    /// Paths whose directory does not exist are skipped.
    pub fn track(&mut self, session: &DiffSession) -> notify::Result<()> {
        let files: Vec<PathBuf> = [Side::Source, Side::Dest]
            .into_iter()
            .map(|side| session.path(side))
            .filter(|p| !p.as_os_str().is_empty())
            .map(normalize_path)
            .collect();

        let dirs: BTreeSet<PathBuf> = files
            .iter()
            .filter_map(|f| f.parent())
            .filter(|d| d.is_dir())
            .map(Path::to_path_buf)
            .collect();

        for stale in self.dirs.difference(&dirs) {
            // Already gone directories cannot be unwatched; nothing to clean up.
            let _ = self.watcher.unwatch(stale);
        }
        for fresh in dirs.difference(&self.dirs) {
            self.watcher.watch(fresh, RecursiveMode::NonRecursive)?;
        }

        tracing::debug!(dirs = dirs.len(), files = files.len(), "watching workbooks");
        self.dirs = dirs;
        self.files = files;
        Ok(())
    }

    #[must_use]
    pub fn watched_dirs(&self) -> &BTreeSet<PathBuf> {
        &self.dirs
    }

    #[must_use]
    pub fn watched_files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Drains pending events; true if any touched a tracked workbook.
    #[must_use]
    pub fn drain_relevant(&self) -> bool {
        drain_matching(&self.rx, |ev_res| match ev_res {
            Ok(ev) => ev
                .paths
                .iter()
                .any(|p| is_event_path_relevant(&self.files, p)),
            Err(e) => {
                tracing::warn!(error = %e, "watch error");
                false
            }
        })
    }

    /// Refreshes `session` if a tracked workbook changed since the last poll.
    pub fn pump(&self, session: &mut DiffSession) -> bool {
        if !self.drain_relevant() {
            return false;
        }
        session.refresh();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_watch_list_is_never_relevant() {
        assert!(!is_event_path_relevant(&[], Path::new("/tmp/a.xlsx")));
        assert!(!is_event_path_relevant(
            &[PathBuf::new()],
            Path::new("/tmp/a.xlsx")
        ));
    }

    #[test]
    fn drain_matching_consumes_everything() {
        let (tx, rx) = mpsc::channel::<u32>();
        for n in [1, 4, 3] {
            tx.send(n).unwrap();
        }

        let mut seen = Vec::new();
        let hit = drain_matching(&rx, |n| {
            seen.push(n);
            n % 2 == 0
        });

        assert!(hit);
        assert_eq!(seen, vec![1, 4, 3], "items after the match are drained too");
        assert!(!drain_matching(&rx, |_| true), "nothing left to drain");

        tx.send(5).unwrap();
        assert!(!drain_matching(&rx, |n| n == 0));
        assert!(!drain_matching(&rx, |_| true));
    }

    #[test]
    fn drain_matching_on_closed_channel() {
        let (tx, rx) = mpsc::channel::<u32>();
        drop(tx);
        assert!(!drain_matching(&rx, |_| true));
    }

    #[test]
    fn normalize_empty_stays_empty() {
        assert_eq!(normalize_path(Path::new("")), PathBuf::new());
    }
}
