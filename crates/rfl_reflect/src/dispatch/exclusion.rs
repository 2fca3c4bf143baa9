use core::any::Any;

use crate::info::Attributes;

/// A type-level set of attribute markers.
///
/// Fields carrying any of the markers are left out of the dispatch table
/// built for the set. Implemented for `()` and tuples of up to four markers.
///
/// # Examples
///
/// ```
/// use rfl_reflect::dispatch::Exclusion;
/// use rfl_reflect::info::{Attributes, Ignore, SkipFlat};
///
/// let attrs = Attributes::new().with_attribute(SkipFlat);
///
/// assert!(!<()>::excludes(&attrs));
/// assert!(!<(Ignore,)>::excludes(&attrs));
/// assert!(<(Ignore, SkipFlat)>::excludes(&attrs));
/// ```
pub trait Exclusion: 'static {
    fn excludes(attributes: &Attributes) -> bool;
}

impl Exclusion for () {
    #[inline]
    fn excludes(_: &Attributes) -> bool {
        false
    }
}

macro_rules! impl_exclusion {
    ($($marker:ident),+) => {
        impl<$($marker: Any),+> Exclusion for ($($marker,)+) {
            #[inline]
            fn excludes(attributes: &Attributes) -> bool {
                $(attributes.contains::<$marker>())||+
            }
        }
    };
}

impl_exclusion!(M0);
impl_exclusion!(M0, M1);
impl_exclusion!(M0, M1, M2);
impl_exclusion!(M0, M1, M2, M3);
