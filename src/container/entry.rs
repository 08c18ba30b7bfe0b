//! Active service entries.

use std::cell::RefCell;

use crate::container::ContainerId;
use crate::lifetime::{Owner, ReuseScope};
use crate::registration::{ErasedFactory, Registration, ServiceInstance};

/// Active record for one service key inside one container's entry map.
///
/// Holds the factory, the reuse and ownership policies, the id of the
/// container that owns the cache slot, and the cached instance once a
/// reusable instance has been produced.
pub(crate) struct ServiceEntry {
    factory: ErasedFactory,
    reuse_scope: ReuseScope,
    owner: Owner,
    owning_container: ContainerId,
    inherited: bool,
    instance: RefCell<Option<ServiceInstance>>,
}

impl ServiceEntry {
    pub(crate) fn from_registration(registration: &Registration, owning_container: ContainerId) -> Self {
        Self {
            factory: registration.factory.clone(),
            reuse_scope: registration.reuse_scope,
            owner: registration.owner,
            owning_container,
            inherited: false,
            instance: RefCell::new(None),
        }
    }

    /// Fresh entry with the same factory and policies and an empty cache,
    /// owned by `owning_container`.
    pub(crate) fn clone_for(&self, owning_container: ContainerId) -> Self {
        Self {
            factory: self.factory.clone(),
            reuse_scope: self.reuse_scope,
            owner: self.owner,
            owning_container,
            inherited: true,
            instance: RefCell::new(None),
        }
    }

    pub(crate) fn factory(&self) -> &ErasedFactory {
        &self.factory
    }

    pub(crate) fn reuse_scope(&self) -> ReuseScope {
        self.reuse_scope
    }

    pub(crate) fn owner(&self) -> Owner {
        self.owner
    }

    pub(crate) fn owning_container(&self) -> ContainerId {
        self.owning_container
    }

    /// Installed by resolution from an ancestor's entry rather than by
    /// `configure`.
    pub(crate) fn is_inherited(&self) -> bool {
        self.inherited
    }

    pub(crate) fn instance(&self) -> Option<ServiceInstance> {
        self.instance.borrow().clone()
    }

    pub(crate) fn set_instance(&self, instance: ServiceInstance) {
        *self.instance.borrow_mut() = Some(instance);
    }

    pub(crate) fn has_instance(&self) -> bool {
        self.instance.borrow().is_some()
    }
}
