use std::{cell::RefCell, rc::Rc};

use crate::core::{DiffSession, ListenerId, SessionSeed, SheetNameResolver};

pub type SharedSession = Rc<RefCell<DiffSession>>;

#[must_use]
pub fn shared(session: DiffSession) -> SharedSession {
    Rc::new(RefCell::new(session))
}

/// Makes `child` follow the parent's source and destination paths.
///
/// Holds the child weakly; once it is dropped the listener does nothing.
pub fn link_to_parent(parent: &SharedSession, child: &SharedSession) -> ListenerId {
    let child = Rc::downgrade(child);
    parent.borrow_mut().subscribe(move |field, parent| {
        let Some((side, path)) = field.mirrored_path(parent) else {
            return;
        };
        let Some(child) = child.upgrade() else {
            return;
        };
        match child.try_borrow_mut() {
            Ok(mut child) => child.set_path(side, path.to_path_buf()),
            Err(_) => {
                tracing::warn!(?side, path = %path.display(), "linked session busy, skipping mirror");
            }
        }
    })
}

impl DiffSession {
    /// Creates a session that mirrors `parent`'s paths from now on.
    #[must_use]
    pub fn linked(
        parent: &SharedSession,
        resolver: Rc<dyn SheetNameResolver>,
        seed: SessionSeed,
    ) -> (SharedSession, ListenerId) {
        let child = shared(Self::with_seed(resolver, seed));
        let id = link_to_parent(parent, &child);
        (child, id)
    }
}
