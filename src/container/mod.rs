//! The container: configuration, hierarchical resolution and disposal.
//!
//! A [`Container`] keeps three pieces of state: registrations waiting for
//! [`configure`](Container::configure), the active entry map keyed by
//! [`ServiceKey`], and the weak disposal handles of the instances it owns.
//! Children borrow their parent, so a parent always outlives its children.

mod entry;
mod register;

use std::any::Any;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use tracing::{debug, trace};

use crate::config::{ContainerOptions, DuplicatePolicy};
use crate::descriptors::ServiceDescriptor;
use crate::error::{DiError, DiResult};
use crate::internal::DisposeBag;
use crate::key::ServiceKey;
use crate::lifetime::{Owner, ReuseScope};
use crate::observer::{DiObserver, Observers};
use crate::registration::{AnyRc, PendingRegistration, ServiceInstance};
use crate::traits::{Dispose, ResolverCore};

pub(crate) use entry::ServiceEntry;

#[cfg(feature = "ahash")]
type EntryMap = HashMap<ServiceKey, Rc<ServiceEntry>, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
type EntryMap = HashMap<ServiceKey, Rc<ServiceEntry>>;

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl ContainerId {
    fn next() -> Self {
        ContainerId(NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Inversion-of-control container.
///
/// Register factories, call [`configure`](Self::configure), then resolve
/// through the [`Resolver`](crate::Resolver) methods. Child containers see
/// every registration of their ancestors and may shadow them with their own.
///
/// A container is single-threaded: it is neither `Send` nor `Sync`, and
/// factories receive the resolving container by reference.
///
/// # Examples
///
/// ```rust
/// use funq::{Container, Resolver, ReuseScope};
/// use std::rc::Rc;
///
/// struct Settings {
///     url: String,
/// }
///
/// struct Repository {
///     settings: Rc<Settings>,
/// }
///
/// let root = Container::new();
/// root.register::<Settings, _>(|_| Ok(Rc::new(Settings { url: "sqlite::memory:".into() })))
///     .reused_within(ReuseScope::Hierarchy);
/// root.register::<Repository, _>(|c| Ok(Rc::new(Repository { settings: c.resolve()? })));
/// root.configure().unwrap();
///
/// let request = root.create_child_container();
/// let repository = request.resolve::<Repository>().unwrap();
/// assert_eq!(repository.settings.url, "sqlite::memory:");
/// assert!(Rc::ptr_eq(&repository.settings, &root.resolve::<Settings>().unwrap()));
/// ```
pub struct Container<'p> {
    id: ContainerId,
    parent: Option<&'p Container<'p>>,
    options: ContainerOptions,
    observers: Observers,
    pending: RefCell<Vec<PendingRegistration>>,
    entries: RefCell<EntryMap>,
    disposables: RefCell<DisposeBag>,
}

impl Container<'static> {
    /// Creates a root container with default options.
    pub fn new() -> Self {
        Self::with_options(ContainerOptions::default())
    }

    /// Creates a root container with the given options.
    pub fn with_options(options: ContainerOptions) -> Self {
        let container = Self::build(None, options, Observers::default());
        debug!(container = %container.id, "created root container");
        container
    }
}

impl Default for Container<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p> Container<'p> {
    fn build(parent: Option<&'p Container<'p>>, options: ContainerOptions, observers: Observers) -> Self {
        Self {
            id: ContainerId::next(),
            parent,
            options,
            observers,
            pending: RefCell::new(Vec::new()),
            entries: RefCell::new(EntryMap::default()),
            disposables: RefCell::new(DisposeBag::default()),
        }
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn parent(&self) -> Option<&'p Container<'p>> {
        self.parent
    }

    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    /// Creates an empty child. The child starts with no pending
    /// registrations, no entries of its own and no disposal handles, and
    /// inherits this container's options and observers.
    pub fn create_child_container(&self) -> Container<'_> {
        let child = Container::build(Some(self), self.options.clone(), self.observers.clone());
        debug!(container = %child.id, parent = %self.id, "created child container");
        child
    }

    /// Runs `f` against a fresh child and disposes the child afterwards.
    ///
    /// ```rust
    /// use funq::{Container, Dispose, Resolver};
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// struct Unit {
    ///     closed: Cell<bool>,
    /// }
    ///
    /// impl Dispose for Unit {
    ///     fn dispose(&self) {
    ///         self.closed.set(true);
    ///     }
    /// }
    ///
    /// let root = Container::new();
    /// root.register_disposable::<Unit, _>(|_| Ok(Rc::new(Unit { closed: Cell::new(false) })));
    /// root.configure().unwrap();
    ///
    /// let unit = root.with_child(|request| request.resolve::<Unit>()).unwrap();
    /// assert!(unit.closed.get());
    /// ```
    pub fn with_child<R>(&self, f: impl FnOnce(&Container<'_>) -> R) -> R {
        let child = self.create_child_container();
        let result = f(&child);
        child.dispose();
        result
    }

    /// Activates pending registrations here and in every ancestor.
    ///
    /// The first pending registration for a key wins; later ones for the same
    /// key are discarded, and a pending registration replaces an active entry
    /// with the same key. Under [`DuplicatePolicy::Reject`] any collision
    /// fails instead and leaves this container untouched. Calling `configure`
    /// with nothing pending changes nothing.
    pub fn configure(&self) -> DiResult<()> {
        self.configure_pending()?;
        match self.parent {
            Some(parent) => parent.configure(),
            None => Ok(()),
        }
    }

    fn configure_pending(&self) -> DiResult<()> {
        if self.options.duplicate_registrations == DuplicatePolicy::Reject {
            self.reject_duplicates()?;
        }

        let mut activated = 0usize;
        // Newest first, so the oldest registration for a key is written last.
        while let Some(pending) = self.pending.borrow_mut().pop() {
            let registration = pending.borrow();
            let key = registration.service_key();
            let entry = ServiceEntry::from_registration(&registration, self.id);
            trace!(
                container = %self.id,
                key = %key,
                scope = ?entry.reuse_scope(),
                owner = ?entry.owner(),
                "activated registration"
            );
            self.entries.borrow_mut().insert(key, Rc::new(entry));
            activated += 1;
        }

        if activated > 0 {
            debug!(container = %self.id, activated, "configured container");
        }
        Ok(())
    }

    fn reject_duplicates(&self) -> DiResult<()> {
        let pending = self.pending.borrow();
        let entries = self.entries.borrow();
        let mut seen = HashSet::with_capacity(pending.len());
        for registration in pending.iter() {
            let key = registration.borrow().service_key();
            let active = entries.get(&key).is_some_and(|entry| !entry.is_inherited());
            if active || !seen.insert(key.clone()) {
                return Err(DiError::DuplicateRegistration(key.to_string()));
            }
        }
        Ok(())
    }

    /// Nearest entry for `key` on the chain from here to the root, with the
    /// container holding it.
    fn find_in_chain(&self, key: &ServiceKey) -> Option<(&Container<'_>, Rc<ServiceEntry>)> {
        let mut current: &Container<'_> = self;
        loop {
            if let Some(entry) = current.entries.borrow().get(key) {
                return Some((current, entry.clone()));
            }
            current = current.parent?;
        }
    }

    /// Entry that governs resolution of `key` from this container, plus the
    /// container whose cache and disposal list it uses.
    ///
    /// A `Container`-scoped entry found in an ancestor is copied into this
    /// container with an empty cache, so each container builds its own.
    fn service_entry(&self, key: &ServiceKey) -> Option<(&Container<'_>, Rc<ServiceEntry>)> {
        let (holder, entry) = self.find_in_chain(key)?;
        if entry.reuse_scope() == ReuseScope::Container && entry.owning_container() != self.id {
            let local = Rc::new(entry.clone_for(self.id));
            self.entries.borrow_mut().insert(key.clone(), local.clone());
            trace!(container = %self.id, from = %holder.id, key = %key, "copied container-scoped entry");
            return Some((self, local));
        }
        Some((holder, entry))
    }

    /// Resolves `key`, or returns `Ok(None)` when no container on the chain
    /// has an entry for it. Errors from the factory, including misses of its
    /// own dependencies, are returned as `Err`.
    fn resolve_instance(&self, key: &ServiceKey, args: Box<dyn Any>) -> DiResult<Option<ServiceInstance>> {
        let Some((holder, entry)) = self.service_entry(key) else {
            trace!(container = %self.id, key = %key, "no entry on the container chain");
            return Ok(None);
        };

        if entry.reuse_scope() == ReuseScope::Hierarchy && entry.owning_container() != self.id {
            trace!(container = %self.id, owner = %holder.id, key = %key, "resolving through hierarchy owner");
            return holder.get_or_create(key, &entry, args).map(Some);
        }
        self.get_or_create(key, &entry, args).map(Some)
    }

    /// [`resolve_instance`](Self::resolve_instance) wrapped in the observer
    /// hooks. A lookup miss is reported to observers as `NotFound`.
    fn observed_lookup(&self, key: &ServiceKey, args: Box<dyn Any>) -> DiResult<Option<AnyRc>> {
        if !self.observers.has_observers() {
            return self.resolve_instance(key, args).map(|found| found.map(|instance| instance.value));
        }

        self.observers.resolving(key);
        let start = Instant::now();
        let result = self.resolve_instance(key, args);
        match &result {
            Ok(Some(_)) => self.observers.resolved(key, start.elapsed()),
            Ok(None) => self.observers.resolution_failed(key, &DiError::NotFound(key.type_name())),
            Err(error) => self.observers.resolution_failed(key, error),
        }
        result.map(|found| found.map(|instance| instance.value))
    }

    /// Returns the cached instance or runs the factory with this container
    /// as the resolver.
    fn get_or_create(&self, key: &ServiceKey, entry: &ServiceEntry, args: Box<dyn Any>) -> DiResult<ServiceInstance> {
        let reusable = entry.reuse_scope() != ReuseScope::NoReuse;
        if reusable {
            if let Some(instance) = entry.instance() {
                trace!(container = %self.id, key = %key, "reused cached instance");
                return Ok(instance);
            }
        }

        let factory = entry.factory().clone();
        let instance = factory(self, args)?;

        if reusable {
            entry.set_instance(instance.clone());
        }
        if entry.owner() == Owner::Container {
            if let Some(handle) = &instance.release {
                self.disposables.borrow_mut().push(handle.clone());
            }
        }
        trace!(container = %self.id, key = %key, "created instance");
        Ok(instance)
    }

    /// Disposes every live instance this container owns, most recent first.
    ///
    /// Instances that have already been dropped are skipped. Parents and
    /// children are not affected, and calling this again is a no-op.
    pub fn dispose(&self) {
        let mut released = 0usize;
        let mut skipped = 0usize;
        loop {
            // The borrow ends before `release`, which may re-enter the container.
            let next = self.disposables.borrow_mut().pop();
            let Some(handle) = next else { break };
            if handle.release() {
                released += 1;
            } else {
                skipped += 1;
            }
        }
        if released + skipped > 0 {
            debug!(container = %self.id, released, skipped, "disposed container");
        }
    }

    /// Adds an observer. Children created afterwards inherit it.
    pub fn add_observer(&self, observer: Rc<dyn DiObserver>) {
        self.observers.add(observer);
    }

    /// Whether `key` is active here or in an ancestor. Pending registrations
    /// do not count.
    pub fn is_registered(&self, key: &ServiceKey) -> bool {
        self.find_in_chain(key).is_some()
    }

    /// Number of registrations waiting for `configure` in this container.
    pub fn pending_registrations(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Snapshot of this container's own active entries, ordered by key.
    pub fn service_descriptors(&self) -> Vec<ServiceDescriptor> {
        let mut descriptors: Vec<_> = self
            .entries
            .borrow()
            .iter()
            .map(|(key, entry)| ServiceDescriptor::from_entry(key, entry))
            .collect();
        descriptors.sort_by(|a, b| a.key().to_string().cmp(&b.key().to_string()));
        descriptors
    }

    /// Number of disposal handles currently held.
    pub fn owned_instances(&self) -> usize {
        self.disposables.borrow().len()
    }
}

impl ResolverCore for Container<'_> {
    fn resolve_any(&self, key: &ServiceKey, args: Box<dyn Any>) -> DiResult<AnyRc> {
        self.observed_lookup(key, args)?
            .ok_or(DiError::NotFound(key.type_name()))
    }

    fn try_resolve_any(&self, key: &ServiceKey, args: Box<dyn Any>) -> DiResult<Option<AnyRc>> {
        self.observed_lookup(key, args)
    }
}

impl Dispose for Container<'_> {
    fn dispose(&self) {
        Container::dispose(self);
    }
}

impl Drop for Container<'_> {
    fn drop(&mut self) {
        if self.options.dispose_on_drop {
            self.dispose();
        } else if !self.disposables.borrow().is_empty() {
            debug!(container = %self.id, "container dropped without disposing owned instances");
        }
    }
}

impl fmt::Debug for Container<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.id)
            .field("parent", &self.parent.map(|parent| parent.id))
            .field("pending", &self.pending.borrow().len())
            .field("entries", &self.entries.borrow().len())
            .field("owned_instances", &self.disposables.borrow().len())
            .finish()
    }
}
