//! Release capability for scoped resources.

/// Trait for synchronous resource release.
///
/// Instances registered through one of the `register_*disposable*` entry
/// points expose this capability. When such an instance is produced for a
/// container-owned registration, the resolving container keeps a weak handle
/// to it and calls `dispose` when the container itself is disposed.
///
/// # Examples
///
/// ```
/// use funq::{Container, Dispose, Resolver};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// struct Connection {
///     closed: Cell<bool>,
/// }
///
/// impl Dispose for Connection {
///     fn dispose(&self) {
///         self.closed.set(true);
///     }
/// }
///
/// let connection = {
///     let container = Container::new();
///     container.register_disposable::<Connection, _>(|_| {
///         Ok(Rc::new(Connection { closed: Cell::new(false) }))
///     });
///     container.configure().unwrap();
///     container.resolve::<Connection>().unwrap()
/// }; // container dropped here
///
/// assert!(connection.closed.get());
/// ```
pub trait Dispose {
    /// Release the resources held by this instance.
    fn dispose(&self);
}
