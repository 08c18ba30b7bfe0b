//! # funq
//!
//! A small inversion-of-control container with hierarchical scopes.
//!
//! ## Features
//!
//! - **Typed keys**: services are identified by requested type, factory
//!   argument types and an optional name
//! - **Trait objects**: register and resolve `dyn Trait` directly
//! - **Container hierarchies**: children see their ancestors' registrations
//!   and may shadow them
//! - **Reuse scopes**: no reuse, one instance per container, or one instance
//!   shared by a whole hierarchy
//! - **Disposal**: container-owned instances are disposed with their container,
//!   without the container keeping them alive
//!
//! ## Quick Start
//!
//! ```rust
//! use funq::{Container, Resolver, ReuseScope};
//! use std::rc::Rc;
//!
//! struct Database {
//!     connection_string: String,
//! }
//!
//! struct UserService {
//!     db: Rc<Database>,
//!     user: String,
//! }
//!
//! let container = Container::new();
//! container
//!     .register::<Database, _>(|_| {
//!         Ok(Rc::new(Database { connection_string: "postgres://localhost".to_string() }))
//!     })
//!     .reused_within(ReuseScope::Hierarchy);
//! container.register_with::<UserService, _, _>(|c, (user,): (String,)| {
//!     Ok(Rc::new(UserService { db: c.resolve()?, user }))
//! });
//! container.configure().unwrap();
//!
//! let service = container.resolve_with::<UserService, _>(("ada".to_string(),)).unwrap();
//! assert_eq!(service.db.connection_string, "postgres://localhost");
//! assert_eq!(service.user, "ada");
//! ```
//!
//! ## Reuse Scopes
//!
//! - **NoReuse**: a new instance on every resolution (the default)
//! - **Container**: one instance per container that resolves it
//! - **Hierarchy**: one instance per hierarchy, cached in the container that
//!   holds the registration
//!
//! ```rust
//! use funq::{Container, Resolver, ReuseScope};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! struct RequestId(u32);
//!
//! let root = Container::new();
//! let counter = Rc::new(Cell::new(0));
//! let next = counter.clone();
//! root.register::<RequestId, _>(move |_| {
//!     next.set(next.get() + 1);
//!     Ok(Rc::new(RequestId(next.get())))
//! })
//! .reused_within(ReuseScope::Container);
//! root.configure().unwrap();
//!
//! let first = root.create_child_container();
//! let second = root.create_child_container();
//! assert_eq!(first.resolve::<RequestId>().unwrap().0, 1);
//! assert_eq!(first.resolve::<RequestId>().unwrap().0, 1);
//! assert_eq!(second.resolve::<RequestId>().unwrap().0, 2);
//! ```
//!
//! ## Threading
//!
//! Containers and the instances they hand out are `Rc`-based and confined to
//! one thread. Factories run synchronously on the resolving thread and may
//! resolve further services from the container they receive.

pub mod args;
pub mod config;
pub mod container;
pub mod descriptors;
pub mod error;
pub mod key;
pub mod lifetime;
pub mod observer;
pub mod traits;

mod internal;
mod registration;

pub use args::ServiceArgs;
pub use config::{ContainerOptions, DuplicatePolicy};
pub use container::{Container, ContainerId};
pub use descriptors::ServiceDescriptor;
pub use error::{DiError, DiResult};
pub use key::{ArgType, ArgTypes, ServiceKey};
pub use lifetime::{Owner, ReuseScope};
pub use observer::{DiObserver, LoggingObserver};
pub use registration::{AnyRc, NamedRegistration, RegistrationBuilder, ScopedRegistration};
pub use traits::{Dispose, Resolver, ResolverCore};
