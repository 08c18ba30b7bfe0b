//! Extra factory arguments.
//!
//! Factories may take positional arguments beyond the resolving container.
//! They are passed as a tuple, and the tuple's element types become the
//! argument-type part of the [`ServiceKey`](crate::ServiceKey).

use crate::key::{ArgType, ArgTypes};

/// Tuple of extra arguments passed from `resolve_with` to a factory.
///
/// Implemented for `()` and for tuples of up to six `'static` elements.
///
/// ```rust
/// use funq::{ArgType, ServiceArgs};
///
/// let types = <(String, bool)>::arg_types();
/// assert_eq!(types.len(), 2);
/// assert_eq!(types[0], ArgType::of::<String>());
/// assert_eq!(types[1], ArgType::of::<bool>());
/// ```
pub trait ServiceArgs: 'static {
    /// Ordered argument types of this tuple.
    fn arg_types() -> ArgTypes;
}

impl ServiceArgs for () {
    #[inline]
    fn arg_types() -> ArgTypes {
        ArgTypes::new()
    }
}

macro_rules! impl_service_args {
    ($($ty:ident),+) => {
        impl<$($ty: 'static),+> ServiceArgs for ($($ty,)+) {
            fn arg_types() -> ArgTypes {
                let mut types = ArgTypes::new();
                $(types.push(ArgType::of::<$ty>());)+
                types
            }
        }
    };
}

impl_service_args!(A1);
impl_service_args!(A1, A2);
impl_service_args!(A1, A2, A3);
impl_service_args!(A1, A2, A3, A4);
impl_service_args!(A1, A2, A3, A4, A5);
impl_service_args!(A1, A2, A3, A4, A5, A6);
