//! Registration entry points.

use std::any::Any;
use std::rc::Rc;

use tracing::trace;

use super::Container;
use crate::args::ServiceArgs;
use crate::error::{DiError, DiResult};
use crate::key::ServiceKey;
use crate::registration::{erase_factory, ErasedFactory, Registration, RegistrationBuilder, ServiceInstance};
use crate::traits::Dispose;

impl Container<'_> {
    /// Registers a factory for `S`.
    ///
    /// `S` may be unsized, so a trait object can be registered and resolved
    /// as `dyn Trait`. The registration stays pending until
    /// [`configure`](Self::configure).
    ///
    /// ```rust
    /// use funq::{Container, Resolver};
    /// use std::rc::Rc;
    ///
    /// trait Clock {
    ///     fn now(&self) -> u64;
    /// }
    ///
    /// struct Fixed;
    ///
    /// impl Clock for Fixed {
    ///     fn now(&self) -> u64 {
    ///         42
    ///     }
    /// }
    ///
    /// let container = Container::new();
    /// container.register::<dyn Clock, _>(|_| Ok(Rc::new(Fixed) as Rc<dyn Clock>));
    /// container.configure().unwrap();
    /// assert_eq!(container.resolve::<dyn Clock>().unwrap().now(), 42);
    /// ```
    pub fn register<S, F>(&self, factory: F) -> RegistrationBuilder
    where
        S: ?Sized + 'static,
        F: Fn(&Container<'_>) -> DiResult<Rc<S>> + 'static,
    {
        self.push_registration(
            ServiceKey::of::<S>(),
            erase_factory(move |container, _| factory(container).map(ServiceInstance::new)),
        )
    }

    /// Registers a factory for `S` that takes the argument tuple `A` in
    /// addition to the resolving container.
    ///
    /// The argument types become part of the key, so this registration is
    /// only found by [`resolve_with`](crate::Resolver::resolve_with) with a
    /// matching tuple.
    pub fn register_with<S, A, F>(&self, factory: F) -> RegistrationBuilder
    where
        S: ?Sized + 'static,
        A: ServiceArgs,
        F: Fn(&Container<'_>, A) -> DiResult<Rc<S>> + 'static,
    {
        self.push_registration(
            ServiceKey::with_args::<S, A>(),
            erase_factory(move |container, args| {
                let args = unbox_args::<A>(args)?;
                factory(container, args).map(ServiceInstance::new)
            }),
        )
    }

    /// Registers `T` built from its `Default` value.
    pub fn register_self<T: Default + 'static>(&self) -> RegistrationBuilder {
        self.register::<T, _>(|_| Ok(Rc::new(T::default())))
    }

    /// Like [`register`](Self::register), and instances produced for a
    /// container-owned entry are disposed with the container.
    pub fn register_disposable<S, F>(&self, factory: F) -> RegistrationBuilder
    where
        S: ?Sized + Dispose + 'static,
        F: Fn(&Container<'_>) -> DiResult<Rc<S>> + 'static,
    {
        self.push_registration(
            ServiceKey::of::<S>(),
            erase_factory(move |container, _| factory(container).map(ServiceInstance::releasable)),
        )
    }

    /// Like [`register_with`](Self::register_with), with disposal.
    pub fn register_disposable_with<S, A, F>(&self, factory: F) -> RegistrationBuilder
    where
        S: ?Sized + Dispose + 'static,
        A: ServiceArgs,
        F: Fn(&Container<'_>, A) -> DiResult<Rc<S>> + 'static,
    {
        self.push_registration(
            ServiceKey::with_args::<S, A>(),
            erase_factory(move |container, args| {
                let args = unbox_args::<A>(args)?;
                factory(container, args).map(ServiceInstance::releasable)
            }),
        )
    }

    /// Like [`register_self`](Self::register_self), with disposal.
    pub fn register_self_disposable<T: Default + Dispose + 'static>(&self) -> RegistrationBuilder {
        self.register_disposable::<T, _>(|_| Ok(Rc::new(T::default())))
    }

    fn push_registration(&self, key: ServiceKey, factory: ErasedFactory) -> RegistrationBuilder {
        trace!(container = %self.id, key = %key, "queued registration");
        let registration = Rc::new(std::cell::RefCell::new(Registration::new(key, factory)));
        self.pending.borrow_mut().push(registration.clone());
        RegistrationBuilder::new(registration)
    }
}

fn unbox_args<A: ServiceArgs>(args: Box<dyn Any>) -> DiResult<A> {
    args.downcast::<A>()
        .map(|args| *args)
        .map_err(|_| DiError::TypeMismatch(std::any::type_name::<A>()))
}
