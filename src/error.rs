//! Error types for the container.

use thiserror::Error;

/// Container errors.
///
/// The `try_resolve*` family returns `Ok(None)` when the requested key has no
/// entry. Every error, including a [`DiError::NotFound`] raised for one of the
/// factory's own dependencies, propagates unchanged.
///
/// # Examples
///
/// ```rust
/// use funq::{Container, DiError, Resolver};
///
/// struct Unregistered;
///
/// let container = Container::new();
/// container.configure().unwrap();
///
/// match container.resolve::<Unregistered>() {
///     Err(DiError::NotFound(type_name)) => assert!(type_name.ends_with("Unregistered")),
///     _ => unreachable!(),
/// }
/// assert!(container.try_resolve::<Unregistered>().unwrap().is_none());
/// ```
#[derive(Debug, Error)]
pub enum DiError {
    /// No entry matches the requested key anywhere in the container chain.
    #[error("Service not found: {0}")]
    NotFound(&'static str),
    /// A cached or produced instance could not be downcast to the requested type.
    #[error("Type mismatch for: {0}")]
    TypeMismatch(&'static str),
    /// Two registrations share one key while duplicates are rejected.
    #[error("Duplicate registration: {0}")]
    DuplicateRegistration(String),
    /// A configuration value could not be parsed.
    #[error("Invalid value {value:?} for option {key}")]
    InvalidOption { key: &'static str, value: String },
    /// Failure raised by a user factory.
    #[error(transparent)]
    Factory(Box<dyn std::error::Error + 'static>),
}

impl DiError {
    /// Wraps an arbitrary error raised inside a factory.
    pub fn factory<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + 'static>>,
    {
        DiError::Factory(error.into())
    }

    /// Whether no entry was found for the requested key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DiError::NotFound(_))
    }
}

/// Result type for container operations.
pub type DiResult<T> = Result<T, DiError>;
