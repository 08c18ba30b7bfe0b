//! Internal disposal bag holding weak handles to owned instances.

use std::rc::{Rc, Weak};

use crate::traits::Dispose;

/// Non-owning handle to an instance with the release capability.
pub(crate) trait WeakRelease {
    /// Releases the target if it is still alive. Returns `false` when the
    /// target was already dropped.
    fn release(&self) -> bool;

    /// Whether the target has not been dropped yet.
    fn is_alive(&self) -> bool;
}

impl<S: ?Sized + Dispose> WeakRelease for Weak<S> {
    fn release(&self) -> bool {
        match self.upgrade() {
            Some(instance) => {
                instance.dispose();
                true
            }
            None => false,
        }
    }

    fn is_alive(&self) -> bool {
        self.strong_count() > 0
    }
}

pub(crate) type ReleaseHandle = Rc<dyn WeakRelease>;

/// Smallest length at which `push` drops handles to dead targets.
const MIN_PRUNE_LEN: usize = 32;

/// Weak disposal handles in the order they were recorded.
///
/// Handles never keep their target alive, but each one pins its target's
/// allocation, so handles to dropped targets are pruned whenever the bag
/// doubles past the live count. Release runs in LIFO order.
pub(crate) struct DisposeBag {
    handles: Vec<ReleaseHandle>,
    prune_at: usize,
}

impl Default for DisposeBag {
    fn default() -> Self {
        Self {
            handles: Vec::new(),
            prune_at: MIN_PRUNE_LEN,
        }
    }
}

impl DisposeBag {
    pub(crate) fn push(&mut self, handle: ReleaseHandle) {
        if self.handles.len() >= self.prune_at {
            self.handles.retain(|handle| handle.is_alive());
            self.prune_at = (self.handles.len() * 2).max(MIN_PRUNE_LEN);
        }
        self.handles.push(handle);
    }

    /// Removes the most recently recorded handle.
    pub(crate) fn pop(&mut self) -> Option<ReleaseHandle> {
        self.handles.pop()
    }

    pub(crate) fn len(&self) -> usize {
        self.handles.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
