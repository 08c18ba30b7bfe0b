//! Resolver traits for service resolution.

use std::any::Any;
use std::rc::Rc;

use crate::args::ServiceArgs;
use crate::error::{DiError, DiResult};
use crate::key::ServiceKey;
use crate::registration::AnyRc;

/// Core resolver trait for object-safe service resolution.
///
/// Most users should use the [`Resolver`] trait instead, which provides typed
/// generic methods built on top of this trait.
pub trait ResolverCore {
    /// Resolves the instance for `key`, passing the boxed argument tuple to
    /// the factory if one has to run.
    ///
    /// The returned value holds an `Rc<S>` where `S` is the key's requested
    /// type.
    fn resolve_any(&self, key: &ServiceKey, args: Box<dyn Any>) -> DiResult<AnyRc>;

    /// Like [`resolve_any`](Self::resolve_any), but returns `Ok(None)` when
    /// `key` itself has no entry. Failures raised while building the
    /// instance, including `NotFound` for a dependency, stay errors.
    fn try_resolve_any(&self, key: &ServiceKey, args: Box<dyn Any>) -> DiResult<Option<AnyRc>>;
}

/// Typed resolution interface.
///
/// Every method builds a [`ServiceKey`] from the requested type, the argument
/// tuple type and the optional name, then resolves it through
/// [`ResolverCore::resolve_any`].
///
/// # Examples
///
/// ```
/// use funq::{Container, Resolver};
/// use std::rc::Rc;
///
/// trait Greeter {
///     fn greet(&self) -> String;
/// }
///
/// struct Polite {
///     name: String,
/// }
///
/// impl Greeter for Polite {
///     fn greet(&self) -> String {
///         format!("Good morning, {}", self.name)
///     }
/// }
///
/// let container = Container::new();
/// container.register_with::<dyn Greeter, _, _>(|_, (name,): (String,)| {
///     let greeter: Rc<dyn Greeter> = Rc::new(Polite { name });
///     Ok(greeter)
/// });
/// container.configure().unwrap();
///
/// let greeter = container.resolve_with::<dyn Greeter, _>(("Ada".to_string(),)).unwrap();
/// assert_eq!(greeter.greet(), "Good morning, Ada");
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves `S` registered without arguments or name.
    fn resolve<S: ?Sized + 'static>(&self) -> DiResult<Rc<S>> {
        self.resolve_keyed::<S, ()>(ServiceKey::of::<S>(), ())
    }

    /// Resolves `S` registered with the argument tuple type `A`.
    fn resolve_with<S: ?Sized + 'static, A: ServiceArgs>(&self, args: A) -> DiResult<Rc<S>> {
        self.resolve_keyed::<S, A>(ServiceKey::with_args::<S, A>(), args)
    }

    /// Resolves `S` registered under `name`.
    fn resolve_named<S: ?Sized + 'static>(&self, name: &str) -> DiResult<Rc<S>> {
        self.resolve_keyed::<S, ()>(ServiceKey::of::<S>().named(name), ())
    }

    /// Resolves `S` registered under `name` with the argument tuple type `A`.
    fn resolve_named_with<S: ?Sized + 'static, A: ServiceArgs>(
        &self,
        name: &str,
        args: A,
    ) -> DiResult<Rc<S>> {
        self.resolve_keyed::<S, A>(ServiceKey::with_args::<S, A>().named(name), args)
    }

    /// Like [`resolve`](Self::resolve), but a missing registration yields `Ok(None)`.
    fn try_resolve<S: ?Sized + 'static>(&self) -> DiResult<Option<Rc<S>>> {
        self.try_resolve_keyed::<S, ()>(ServiceKey::of::<S>(), ())
    }

    /// Like [`resolve_with`](Self::resolve_with), but a missing registration yields `Ok(None)`.
    fn try_resolve_with<S: ?Sized + 'static, A: ServiceArgs>(
        &self,
        args: A,
    ) -> DiResult<Option<Rc<S>>> {
        self.try_resolve_keyed::<S, A>(ServiceKey::with_args::<S, A>(), args)
    }

    /// Like [`resolve_named`](Self::resolve_named), but a missing registration yields `Ok(None)`.
    fn try_resolve_named<S: ?Sized + 'static>(&self, name: &str) -> DiResult<Option<Rc<S>>> {
        self.try_resolve_keyed::<S, ()>(ServiceKey::of::<S>().named(name), ())
    }

    /// Like [`resolve_named_with`](Self::resolve_named_with), but a missing
    /// registration yields `Ok(None)`.
    fn try_resolve_named_with<S: ?Sized + 'static, A: ServiceArgs>(
        &self,
        name: &str,
        args: A,
    ) -> DiResult<Option<Rc<S>>> {
        self.try_resolve_keyed::<S, A>(ServiceKey::with_args::<S, A>().named(name), args)
    }

    #[doc(hidden)]
    fn resolve_keyed<S: ?Sized + 'static, A: ServiceArgs>(
        &self,
        key: ServiceKey,
        args: A,
    ) -> DiResult<Rc<S>> {
        let any = self.resolve_any(&key, Box::new(args))?;
        any.downcast_ref::<Rc<S>>()
            .cloned()
            .ok_or(DiError::TypeMismatch(std::any::type_name::<S>()))
    }

    #[doc(hidden)]
    fn try_resolve_keyed<S: ?Sized + 'static, A: ServiceArgs>(
        &self,
        key: ServiceKey,
        args: A,
    ) -> DiResult<Option<Rc<S>>> {
        match self.try_resolve_any(&key, Box::new(args))? {
            Some(any) => any
                .downcast_ref::<Rc<S>>()
                .cloned()
                .map(Some)
                .ok_or(DiError::TypeMismatch(std::any::type_name::<S>())),
            None => Ok(None),
        }
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}
