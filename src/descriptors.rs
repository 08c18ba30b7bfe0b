//! Service descriptors for introspection and diagnostics.

use crate::container::{ContainerId, ServiceEntry};
use crate::key::ServiceKey;
use crate::lifetime::{Owner, ReuseScope};

/// Snapshot of one active entry in a container.
///
/// Obtained from [`Container::service_descriptors`](crate::Container::service_descriptors).
/// Only the container's own entry map is described; entries that live in an
/// ancestor show up in that ancestor's descriptors.
///
/// # Examples
///
/// ```rust
/// use funq::{Container, Owner, Resolver, ReuseScope};
/// use std::rc::Rc;
///
/// let container = Container::new();
/// container.register::<u32, _>(|_| Ok(Rc::new(5432)))
///     .named("database_port")
///     .reused_within(ReuseScope::Container);
/// container.register::<String, _>(|_| Ok(Rc::new("localhost".to_string())))
///     .owned_by(Owner::External);
/// container.configure().unwrap();
/// container.resolve_named::<u32>("database_port").unwrap();
///
/// let descriptors = container.service_descriptors();
/// assert_eq!(descriptors.len(), 2);
///
/// let port = descriptors.iter().find(|d| d.is_named()).unwrap();
/// assert_eq!(port.service_name(), Some("database_port"));
/// assert_eq!(port.type_name(), "u32");
/// assert_eq!(port.reuse_scope, ReuseScope::Container);
/// assert!(port.has_instance);
///
/// let host = descriptors.iter().find(|d| !d.is_named()).unwrap();
/// assert_eq!(host.owner, Owner::External);
/// assert!(!host.has_instance);
/// ```
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    key: ServiceKey,
    /// Reuse scope of the entry.
    pub reuse_scope: ReuseScope,
    /// Disposal owner of the entry.
    pub owner: Owner,
    /// Container whose cache and disposal list the entry uses.
    pub owning_container: ContainerId,
    /// Whether a reusable instance is cached.
    pub has_instance: bool,
    /// Whether the entry was copied from an ancestor during resolution
    /// rather than activated by `configure`.
    pub inherited: bool,
}

impl ServiceDescriptor {
    pub(crate) fn from_entry(key: &ServiceKey, entry: &ServiceEntry) -> Self {
        Self {
            key: key.clone(),
            reuse_scope: entry.reuse_scope(),
            owner: entry.owner(),
            owning_container: entry.owning_container(),
            has_instance: entry.has_instance(),
            inherited: entry.is_inherited(),
        }
    }

    pub fn key(&self) -> &ServiceKey {
        &self.key
    }

    /// Service name for named registrations, `None` otherwise.
    pub fn service_name(&self) -> Option<&str> {
        self.key.name()
    }

    pub fn type_name(&self) -> &'static str {
        self.key.type_name()
    }

    pub fn is_named(&self) -> bool {
        self.service_name().is_some()
    }

    /// Whether the factory takes extra arguments.
    pub fn takes_args(&self) -> bool {
        !self.key.arg_types().is_empty()
    }
}
