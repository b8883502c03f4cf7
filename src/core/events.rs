use std::path::Path;

use crate::core::{DiffSession, Side};

/// Every observable field of a [`DiffSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionField {
    SourcePath,
    DestPath,
    DefaultSheetName,
    SourceSheetNames,
    DestSheetNames,
    SelectedSourceIndex,
    SelectedDestIndex,
    Ready,
    Summary,
    ShowLocationGridLine,
}

impl SessionField {
    #[must_use]
    pub const fn path(side: Side) -> Self {
        match side {
            Side::Source => Self::SourcePath,
            Side::Dest => Self::DestPath,
        }
    }

    #[must_use]
    pub const fn sheet_names(side: Side) -> Self {
        match side {
            Side::Source => Self::SourceSheetNames,
            Side::Dest => Self::DestSheetNames,
        }
    }

    #[must_use]
    pub const fn selected_index(side: Side) -> Self {
        match side {
            Side::Source => Self::SelectedSourceIndex,
            Side::Dest => Self::SelectedDestIndex,
        }
    }

    /// The path a linked child copies from `parent` when this field changes.
    ///
    /// Only the two path fields are mirrored; everything else yields `None`.
    #[must_use]
    pub fn mirrored_path(self, parent: &DiffSession) -> Option<(Side, &Path)> {
        match self {
            Self::SourcePath => Some((Side::Source, parent.source_path())),
            Self::DestPath => Some((Side::Dest, parent.dest_path())),
            _ => None,
        }
    }
}

/* ============================ Listener registry ============================ */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener = Box<dyn FnMut(SessionField, &DiffSession)>;

/// Ordered set of change listeners owned by a session.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub fn add(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Dispatch borrows the entries out of the session so each listener can be
    // handed `&DiffSession` while being called mutably.
    pub(crate) fn take(&mut self) -> Vec<(ListenerId, Listener)> {
        std::mem::take(&mut self.entries)
    }

    pub(crate) fn restore(&mut self, entries: Vec<(ListenerId, Listener)>) {
        debug_assert!(self.entries.is_empty());
        self.entries = entries;
    }
}
