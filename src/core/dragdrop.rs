use std::path::PathBuf;

use crate::core::{DiffSession, Side};

/// A drop gesture on one of the two workbook slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropEvent {
    pub paths: Vec<PathBuf>,
    /// 0 = source slot, 1 = destination slot.
    pub target_slot_hint: i32,
    pub file_drop_present: bool,
}

impl DropEvent {
    #[must_use]
    pub fn files(paths: Vec<PathBuf>, target_slot_hint: i32) -> Self {
        Self {
            paths,
            target_slot_hint,
            file_drop_present: true,
        }
    }
}

/// What a drop does to the session paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAssignment {
    Ignore,
    Single { side: Side, path: PathBuf },
    Pair { source: PathBuf, dest: PathBuf },
}

/// Decides which slot(s) the dropped files go to.
///
/// With two or more files the second listed becomes the source and the first
/// the destination, whatever slot received the drop. A single file goes to the
/// hinted slot.
#[must_use]
pub fn assign_drop(paths: &[PathBuf], target_slot_hint: i32) -> DropAssignment {
    match paths {
        [] => DropAssignment::Ignore,
        [first, second, ..] => DropAssignment::Pair {
            source: second.clone(),
            dest: first.clone(),
        },
        [only] => match Side::from_slot_hint(target_slot_hint) {
            Some(side) => DropAssignment::Single {
                side,
                path: only.clone(),
            },
            None => DropAssignment::Ignore,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    Copy,
    None,
}

/// Hover feedback for a drag in progress. The hover is always consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragFeedback {
    pub effect: DropEffect,
    pub handled: bool,
}

#[must_use]
pub const fn drag_over(file_drop_present: bool) -> DragFeedback {
    DragFeedback {
        effect: if file_drop_present {
            DropEffect::Copy
        } else {
            DropEffect::None
        },
        handled: true,
    }
}

impl DiffSession {
    /// Applies a drop; returns what was assigned.
    pub fn handle_drop(&mut self, event: &DropEvent) -> DropAssignment {
        if !event.file_drop_present {
            tracing::debug!("ignoring drop without file payload");
            return DropAssignment::Ignore;
        }
        let assignment = assign_drop(&event.paths, event.target_slot_hint);
        match &assignment {
            DropAssignment::Ignore => {
                tracing::debug!(
                    count = event.paths.len(),
                    hint = event.target_slot_hint,
                    "drop ignored"
                );
            }
            DropAssignment::Single { side, path } => self.set_path(*side, path.clone()),
            DropAssignment::Pair { source, dest } => self.set_paths(source.clone(), dest.clone()),
        }
        assignment
    }
}
