use std::{cell::RefCell, path::PathBuf, rc::Rc};

use crate::core::Side;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathPair {
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Shared handle to the source/dest pair of the session currently driving the UI.
///
/// Sessions attached with [`crate::core::DiffSession::attach_context`] publish every
/// path assignment here; any collaborator holding a clone can read it back.
#[derive(Debug, Clone, Default)]
pub struct ActivePaths {
    inner: Rc<RefCell<PathPair>>,
}

impl ActivePaths {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, side: Side) -> PathBuf {
        let pair = self.inner.borrow();
        match side {
            Side::Source => pair.source.clone(),
            Side::Dest => pair.dest.clone(),
        }
    }

    pub fn set(&self, side: Side, path: PathBuf) {
        let mut pair = self.inner.borrow_mut();
        match side {
            Side::Source => pair.source = path,
            Side::Dest => pair.dest = path,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> PathPair {
        self.inner.borrow().clone()
    }

    /// True when both handles point at the same registry.
    #[must_use]
    pub fn same_registry(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
