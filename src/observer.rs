//! Diagnostic observers for resolution events.
//!
//! Observers are called around every resolution that goes through a
//! container's resolver methods. With no observer registered the container
//! skips the timing and notification work entirely.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::DiError;
use crate::key::ServiceKey;

/// Hooks for observing resolution.
///
/// # Examples
///
/// ```
/// use funq::{Container, DiError, DiObserver, Resolver, ServiceKey};
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Counting {
///     resolved: Cell<usize>,
/// }
///
/// impl DiObserver for Counting {
///     fn resolving(&self, _key: &ServiceKey) {}
///
///     fn resolved(&self, _key: &ServiceKey, _duration: Duration) {
///         self.resolved.set(self.resolved.get() + 1);
///     }
///
///     fn resolution_failed(&self, _key: &ServiceKey, _error: &DiError) {}
/// }
///
/// let counting = Rc::new(Counting::default());
/// let container = Container::new();
/// container.add_observer(counting.clone());
/// container.register::<u8, _>(|_| Ok(Rc::new(1)));
/// container.configure().unwrap();
///
/// container.resolve::<u8>().unwrap();
/// assert_eq!(counting.resolved.get(), 1);
/// ```
pub trait DiObserver {
    /// Called before the container looks up `key`.
    fn resolving(&self, key: &ServiceKey);

    /// Called after `key` resolved, with the time spent including any
    /// nested resolutions.
    fn resolved(&self, key: &ServiceKey, duration: Duration);

    /// Called when resolving `key` failed.
    fn resolution_failed(&self, key: &ServiceKey, error: &DiError);
}

/// Observers attached to one container.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: RefCell<Vec<Rc<dyn DiObserver>>>,
}

impl Observers {
    pub(crate) fn add(&self, observer: Rc<dyn DiObserver>) {
        self.observers.borrow_mut().push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.borrow().is_empty()
    }

    /// Copy of the list, so hooks may add observers while being notified.
    fn snapshot(&self) -> Vec<Rc<dyn DiObserver>> {
        self.observers.borrow().clone()
    }

    pub(crate) fn resolving(&self, key: &ServiceKey) {
        for observer in self.snapshot() {
            observer.resolving(key);
        }
    }

    pub(crate) fn resolved(&self, key: &ServiceKey, duration: Duration) {
        for observer in self.snapshot() {
            observer.resolved(key, duration);
        }
    }

    pub(crate) fn resolution_failed(&self, key: &ServiceKey, error: &DiError) {
        for observer in self.snapshot() {
            observer.resolution_failed(key, error);
        }
    }
}

/// Observer that reports resolution events through `tracing`.
///
/// ```
/// use funq::{Container, LoggingObserver};
/// use std::rc::Rc;
///
/// let container = Container::new();
/// container.add_observer(Rc::new(LoggingObserver::new()));
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    pub fn new() -> Self {
        Self::with_prefix("funq")
    }

    /// Observer whose events carry `prefix` in their `source` field.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for LoggingObserver {
    fn resolving(&self, key: &ServiceKey) {
        debug!(source = %self.prefix, key = %key, "resolving");
    }

    fn resolved(&self, key: &ServiceKey, duration: Duration) {
        debug!(source = %self.prefix, key = %key, ?duration, "resolved");
    }

    fn resolution_failed(&self, key: &ServiceKey, error: &DiError) {
        if error.is_not_found() {
            debug!(source = %self.prefix, key = %key, %error, "resolution failed");
        } else {
            warn!(source = %self.prefix, key = %key, %error, "resolution failed");
        }
    }
}
