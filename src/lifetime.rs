//! Reuse and ownership policies.

/// How widely a produced instance is reused.
///
/// # Examples
///
/// ```rust
/// use funq::{Container, ReuseScope, Resolver};
/// use std::rc::Rc;
///
/// struct Session;
///
/// let root = Container::new();
/// root.register::<Session, _>(|_| Ok(Rc::new(Session)))
///     .reused_within(ReuseScope::Container);
/// root.configure().unwrap();
///
/// let child = root.create_child_container();
///
/// // Container: same instance within one container...
/// let a = root.resolve::<Session>().unwrap();
/// let b = root.resolve::<Session>().unwrap();
/// assert!(Rc::ptr_eq(&a, &b));
///
/// // ...but a separate one for the child.
/// let c = child.resolve::<Session>().unwrap();
/// assert!(!Rc::ptr_eq(&a, &c));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub enum ReuseScope {
    /// New instance on every resolution.
    #[default]
    NoReuse,
    /// One instance per container that performs the lookup.
    ///
    /// A registration inherited from an ancestor is cloned into the
    /// resolving container with an empty cache, so every container gets its
    /// own instance.
    Container,
    /// One instance shared by the owning container and its whole subtree.
    ///
    /// The instance is created and cached by the container whose entry map
    /// holds the registration, and that container also takes over the
    /// disposal obligation.
    Hierarchy,
}

/// Who is responsible for releasing a produced instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub enum Owner {
    /// The resolving container tracks the instance and releases it on disposal.
    #[default]
    Container,
    /// The caller releases it; the container never tracks it.
    External,
}
