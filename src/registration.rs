//! Pending registrations and the registration builder.
//!
//! `register*` calls append a [`Registration`] to the container's pending
//! list and hand back a [`RegistrationBuilder`]. The builder narrows as it is
//! used: a name first, then a reuse scope, then an owner, each at most once.
//!
//! ```rust
//! use funq::{Container, Owner, ReuseScope};
//! use std::rc::Rc;
//!
//! let container = Container::new();
//! container
//!     .register::<String, _>(|_| Ok(Rc::new("primary".to_string())))
//!     .named("primary")
//!     .reused_within(ReuseScope::Hierarchy)
//!     .owned_by(Owner::External);
//! ```
//!
//! Calling the options out of order does not compile:
//!
//! ```compile_fail
//! use funq::{Container, ReuseScope};
//! use std::rc::Rc;
//!
//! let container = Container::new();
//! container
//!     .register::<String, _>(|_| Ok(Rc::new(String::new())))
//!     .reused_within(ReuseScope::Container)
//!     .named("too-late");
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::container::Container;
use crate::error::DiResult;
use crate::internal::ReleaseHandle;
use crate::key::ServiceKey;
use crate::lifetime::{Owner, ReuseScope};
use crate::traits::Dispose;

/// Type-erased shared instance. Holds an `Rc<S>` for the requested type `S`.
pub type AnyRc = Rc<dyn Any>;

/// Type-erased construction recipe.
///
/// Receives the resolving container and the boxed argument tuple.
pub(crate) type ErasedFactory = Rc<dyn Fn(&Container<'_>, Box<dyn Any>) -> DiResult<ServiceInstance>>;

/// Boxes a factory closure; the bound lets closures infer their signature.
pub(crate) fn erase_factory<F>(factory: F) -> ErasedFactory
where
    F: Fn(&Container<'_>, Box<dyn Any>) -> DiResult<ServiceInstance> + 'static,
{
    Rc::new(factory)
}

/// An instance produced by a factory, plus its release handle when the
/// registration carries the release capability.
#[derive(Clone)]
pub(crate) struct ServiceInstance {
    pub(crate) value: AnyRc,
    pub(crate) release: Option<ReleaseHandle>,
}

impl ServiceInstance {
    pub(crate) fn new<S: ?Sized + 'static>(instance: Rc<S>) -> Self {
        Self {
            value: Rc::new(instance),
            release: None,
        }
    }

    pub(crate) fn releasable<S: ?Sized + Dispose + 'static>(instance: Rc<S>) -> Self {
        let handle: ReleaseHandle = Rc::new(Rc::downgrade(&instance));
        Self {
            value: Rc::new(instance),
            release: Some(handle),
        }
    }
}

/// A registration waiting for `configure`.
pub(crate) struct Registration {
    /// Key without the name; the name is applied by the builder.
    pub(crate) key: ServiceKey,
    pub(crate) factory: ErasedFactory,
    pub(crate) name: Option<String>,
    pub(crate) reuse_scope: ReuseScope,
    pub(crate) owner: Owner,
}

impl Registration {
    pub(crate) fn new(key: ServiceKey, factory: ErasedFactory) -> Self {
        Self {
            key,
            factory,
            name: None,
            reuse_scope: ReuseScope::NoReuse,
            owner: Owner::Container,
        }
    }

    /// Full key under which this registration is installed.
    pub(crate) fn service_key(&self) -> ServiceKey {
        self.key.clone().with_name(self.name.clone())
    }
}

/// Pending registration shared between the container and its builder.
pub(crate) type PendingRegistration = Rc<RefCell<Registration>>;

/// Handle returned by the `register*` entry points.
///
/// Offers [`named`](Self::named), [`reused_within`](Self::reused_within) and
/// [`owned_by`](Self::owned_by). Changes made after the container has been
/// configured have no effect.
pub struct RegistrationBuilder {
    registration: PendingRegistration,
}

impl RegistrationBuilder {
    pub(crate) fn new(registration: PendingRegistration) -> Self {
        Self { registration }
    }

    /// Registers under `name`; the name becomes part of the service key.
    pub fn named(self, name: impl Into<String>) -> NamedRegistration {
        self.registration.borrow_mut().name = Some(name.into());
        NamedRegistration {
            registration: self.registration,
        }
    }

    /// Sets the reuse scope (default [`ReuseScope::NoReuse`]).
    pub fn reused_within(self, scope: ReuseScope) -> ScopedRegistration {
        set_scope(&self.registration, scope);
        ScopedRegistration {
            registration: self.registration,
        }
    }

    /// Sets the owner (default [`Owner::Container`]).
    pub fn owned_by(self, owner: Owner) {
        set_owner(&self.registration, owner);
    }
}

/// Registration that already has a name.
pub struct NamedRegistration {
    registration: PendingRegistration,
}

impl NamedRegistration {
    pub fn reused_within(self, scope: ReuseScope) -> ScopedRegistration {
        set_scope(&self.registration, scope);
        ScopedRegistration {
            registration: self.registration,
        }
    }

    pub fn owned_by(self, owner: Owner) {
        set_owner(&self.registration, owner);
    }
}

/// Registration that already has a reuse scope.
pub struct ScopedRegistration {
    registration: PendingRegistration,
}

impl ScopedRegistration {
    pub fn owned_by(self, owner: Owner) {
        set_owner(&self.registration, owner);
    }
}

fn set_scope(registration: &PendingRegistration, scope: ReuseScope) {
    registration.borrow_mut().reuse_scope = scope;
}

fn set_owner(registration: &PendingRegistration, owner: Owner) {
    registration.borrow_mut().owner = owner;
}
