//! Static storage for registries.
//!
//! A record's [`Record::registry`](crate::Record::registry) keeps its
//! registry in a `static` inside the function:
//!
//! - [`NonGenericRegistryCell`] for plain records: one [`OnceLock`].
//! - [`GenericRegistryCell`] for generic records. The `static` inside a
//!   generic function is shared by every instantiation, so the cell keeps a
//!   [`TypeIdMap`] of leaked registries behind an [`RwLock`].

use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use rfl_utils::TypeIdMap;

use crate::info::Registry;

// -----------------------------------------------------------------------------
// NonGenericRegistryCell

/// Registry storage for a non-generic record.
///
/// # Examples
///
/// ```
/// use rfl_reflect::info::{NonGenericRegistryCell, Registry};
///
/// struct Point { x: i32, y: i32 }
///
/// fn registry() -> &'static Registry<Point> {
///     static CELL: NonGenericRegistryCell<Point> = NonGenericRegistryCell::new();
///     CELL.get_or_init(|| {
///         Registry::builder()
///             .field("x", |p: &Point| &p.x, |p| &mut p.x)
///             .field("y", |p: &Point| &p.y, |p| &mut p.y)
///             .build()
///     })
/// }
///
/// assert_eq!(registry().len(), 2);
/// assert!(core::ptr::eq(registry(), registry()));
/// ```
pub struct NonGenericRegistryCell<R>(OnceLock<Registry<R>>);

impl<R: 'static> NonGenericRegistryCell<R> {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored registry, building it with `f` on first access.
    #[inline]
    pub fn get_or_init(&'static self, f: impl FnOnce() -> Registry<R>) -> &'static Registry<R> {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericRegistryCell

/// Registry storage for a generic record.
///
/// # Examples
///
/// ```
/// use rfl_reflect::{Codec, info::{GenericRegistryCell, Registry}};
///
/// struct Wrapper<T> { inner: T }
///
/// fn registry<T: Codec>() -> &'static Registry<Wrapper<T>> {
///     static CELL: GenericRegistryCell = GenericRegistryCell::new();
///     CELL.get_or_insert::<Wrapper<T>>(|| {
///         Registry::builder()
///             .field("inner", |w: &Wrapper<T>| &w.inner, |w| &mut w.inner)
///             .build()
///     })
/// }
///
/// let a = registry::<u8>().field("inner").unwrap();
/// let b = registry::<String>().field("inner").unwrap();
/// assert!(a.type_is::<u8>());
/// assert!(b.type_is::<String>());
/// ```
pub struct GenericRegistryCell(RwLock<TypeIdMap<&'static (dyn Any + Send + Sync)>>);

impl GenericRegistryCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the registry of `R`, building it with `f` on first access.
    #[inline(always)]
    pub fn get_or_insert<R: 'static>(&'static self, f: impl FnOnce() -> Registry<R>) -> &'static Registry<R> {
        let entry = match self.get_by_type_id(TypeId::of::<R>()) {
            Some(entry) => entry,
            None => self.insert_by_type_id(TypeId::of::<R>(), Box::new(f())),
        };
        entry
            .downcast_ref()
            .expect("`GenericRegistryCell` entries are keyed by their own type")
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static (dyn Any + Send + Sync)> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn insert_by_type_id(
        &self,
        type_id: TypeId,
        value: Box<dyn Any + Send + Sync>,
    ) -> &'static (dyn Any + Send + Sync) {
        // Another thread may have won the race; its registry is kept.
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || &*Box::leak(value))
    }
}
