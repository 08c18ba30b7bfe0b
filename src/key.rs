//! Service key types for the container.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::args::ServiceArgs;

#[cfg(feature = "smallvec")]
/// Ordered argument-type list of a key.
pub type ArgTypes = smallvec::SmallVec<[ArgType; 4]>;
#[cfg(not(feature = "smallvec"))]
/// Ordered argument-type list of a key.
pub type ArgTypes = Vec<ArgType>;

/// Type of one extra factory argument.
///
/// Only the `TypeId` takes part in equality and hashing; the name is kept
/// for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct ArgType {
    id: TypeId,
    name: &'static str,
}

impl ArgType {
    /// Argument type descriptor for `T`.
    #[inline]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ArgType {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ArgType {}

impl Hash for ArgType {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Identity of a service inside a container.
///
/// A key is the triple (requested type, ordered extra argument types,
/// optional name). Two keys are equal iff all three parts are equal, and the
/// hash is derived from the same three parts.
///
/// # Examples
///
/// ```rust
/// use funq::ServiceKey;
///
/// let plain = ServiceKey::of::<String>();
/// let with_args = ServiceKey::with_args::<String, (u32, bool)>();
/// let named = ServiceKey::of::<String>().named("greeting");
///
/// assert_ne!(plain, with_args);
/// assert_ne!(plain, named);
/// assert_eq!(named, ServiceKey::of::<String>().named("greeting"));
/// assert_eq!(with_args.to_string(), "alloc::string::String(u32, bool)");
/// ```
#[derive(Debug, Clone)]
pub struct ServiceKey {
    service_type: TypeId,
    type_name: &'static str,
    arg_types: ArgTypes,
    name: Option<String>,
}

impl ServiceKey {
    /// Key for `S` with no extra arguments and no name.
    pub fn of<S: ?Sized + 'static>() -> Self {
        Self::with_args::<S, ()>()
    }

    /// Key for `S` built from the argument tuple `A`.
    pub fn with_args<S: ?Sized + 'static, A: ServiceArgs>() -> Self {
        Self {
            service_type: TypeId::of::<S>(),
            type_name: std::any::type_name::<S>(),
            arg_types: A::arg_types(),
            name: None,
        }
    }

    /// Same key with the given name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub(crate) fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn service_type(&self) -> TypeId {
        self.service_type
    }

    /// Human-readable name of the requested type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn arg_types(&self) -> &[ArgType] {
        &self.arg_types
    }

    /// Service name for named registrations, `None` otherwise.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl PartialEq for ServiceKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.service_type == other.service_type
            && self.arg_types == other.arg_types
            && self.name == other.name
    }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.service_type.hash(state);
        self.arg_types.len().hash(state);
        for arg in self.arg_types.iter() {
            arg.hash(state);
        }
        self.name.hash(state);
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)?;
        if !self.arg_types.is_empty() {
            f.write_str("(")?;
            for (i, arg) in self.arg_types.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(arg.name)?;
            }
            f.write_str(")")?;
        }
        if let Some(name) = &self.name {
            write!(f, " named {:?}", name)?;
        }
        Ok(())
    }
}
