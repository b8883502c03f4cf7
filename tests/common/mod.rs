#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use sheetdiff::core::{DiffSession, SessionField, SheetNameResolver};

/// Resolver backed by a path -> sheets table; unknown paths fail like a corrupt workbook.
#[derive(Default)]
pub struct FakeResolver {
    sheets: HashMap<PathBuf, Vec<String>>,
    pub calls: RefCell<Vec<PathBuf>>,
}

impl FakeResolver {
    pub fn with(mut self, path: &Path, names: &[&str]) -> Self {
        self.sheets.insert(
            path.to_path_buf(),
            names.iter().map(|s| (*s).to_string()).collect(),
        );
        self
    }
}

impl SheetNameResolver for FakeResolver {
    fn sheet_names(&self, path: &Path) -> anyhow::Result<Vec<String>> {
        self.calls.borrow_mut().push(path.to_path_buf());
        self.sheets
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("not a workbook: {}", path.display()))
    }
}

pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let p = dir.join(name);
    fs::write(&p, b"stub").unwrap();
    p
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

/// Records every notification the session emits.
pub fn record(session: &mut DiffSession) -> Rc<RefCell<Vec<SessionField>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    session.subscribe(move |field, _| sink.borrow_mut().push(field));
    log
}
