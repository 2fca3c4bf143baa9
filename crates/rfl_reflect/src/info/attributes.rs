use core::any::{Any, TypeId};
use core::fmt;

use rfl_utils::TypeIdMap;

// -----------------------------------------------------------------------------
// Markers

/// Marks a field whose presence [`RequiredTracker`] reports on.
///
/// [`RequiredTracker`]: crate::load::RequiredTracker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Required;

/// Hides a field from every codec: it is neither encoded nor decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ignore;

/// Hides a field from flat text loading only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SkipFlat;

// -----------------------------------------------------------------------------
// Attributes

/// A set of field attributes keyed by their type.
///
/// There is at most one attribute per type; later insertions overwrite.
/// Besides the markers ([`Required`], [`Ignore`], [`SkipFlat`]) any
/// `Send + Sync` value can be attached, typically through `@expr` in
/// `#[record(...)]`.
///
/// # Examples
///
/// ```
/// use rfl_reflect::info::{Attributes, Required};
///
/// struct Decimals(u8);
///
/// let attrs = Attributes::new()
///     .with_attribute(Required)
///     .with_attribute(Decimals(4));
///
/// assert!(attrs.contains::<Required>());
/// assert_eq!(attrs.get::<Decimals>().map(|d| d.0), Some(4));
/// assert_eq!(attrs.len(), 2);
/// ```
#[derive(Default)]
pub struct Attributes {
    attributes: TypeIdMap<Box<dyn Any + Send + Sync>>,
}

impl Attributes {
    pub(crate) const EMPTY: &'static Self = &Self::new();

    /// Creates an empty set.
    #[inline]
    pub const fn new() -> Self {
        Self {
            attributes: TypeIdMap::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            attributes: TypeIdMap::with_capacity(capacity),
        }
    }

    /// Adds `value`, replacing an earlier attribute of the same type.
    #[inline]
    pub fn with_attribute<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.insert(value);
        self
    }

    #[inline]
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.attributes.insert(TypeId::of::<T>(), Box::new(value));
    }

    #[inline]
    pub fn contains<T: Any>(&self) -> bool {
        self.contains_by_id(TypeId::of::<T>())
    }

    #[inline]
    pub fn contains_by_id(&self, id: TypeId) -> bool {
        self.attributes.contains(&id)
    }

    #[inline]
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.attributes
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl fmt::Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.attributes.iter().map(|(id, _)| id)).finish()
    }
}
