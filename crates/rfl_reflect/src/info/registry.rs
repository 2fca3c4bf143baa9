use core::any::TypeId;
use core::ops::ControlFlow;
use std::sync::{Arc, PoisonError, RwLock};

use rfl_utils::TypeIdMap;
use rfl_utils::hash::{FixedHashState, HashSet};

use crate::dispatch::{DispatchTable, Exclusion};
use crate::info::field_info::Direct;
use crate::info::{Attributes, FieldInfo};
use crate::{Codec, Reflect};

// -----------------------------------------------------------------------------
// Registry

/// The ordered field descriptors of the record `R`.
///
/// Fields inherited from a base record come first, followed by the record's
/// own fields in declaration order. Ordinals run contiguously from 0.
///
/// A registry is immutable once built. The dispatch tables used for name
/// lookup are built on first use, once per [`Exclusion`] set, and cached.
///
/// # Examples
///
/// ```
/// use rfl_reflect::{Record, info::{Ignore, Required}};
///
/// #[derive(Record, Default)]
/// struct Base {
///     #[record(required)]
///     id: u32,
/// }
///
/// #[derive(Record, Default)]
/// struct Sensor {
///     #[record(base)]
///     base: Base,
///     label: String,
///     #[record(ignore)]
///     cache: Vec<u8>,
/// }
///
/// let registry = Sensor::registry();
/// let names: Vec<_> = registry.iter().map(|f| f.name()).collect();
/// assert_eq!(names, ["id", "label", "cache"]);
/// assert_eq!(registry.required_count(), 1);
///
/// assert!(registry.find::<()>("cache").is_some());
/// assert!(registry.find::<(Ignore,)>("cache").is_none());
/// assert_eq!(registry.find::<(Ignore,)>("id").unwrap().ordinal(), 0);
/// assert!(registry.field("id").unwrap().has_attribute::<Required>());
/// ```
pub struct Registry<R> {
    fields: Box<[FieldInfo<R>]>,
    required: usize,
    tables: RwLock<TypeIdMap<&'static DispatchTable>>,
}

impl<R: 'static> Registry<R> {
    /// Starts declaring the fields of `R`.
    #[inline]
    pub fn builder() -> RegistryBuilder<R> {
        RegistryBuilder { fields: Vec::new() }
    }

    /// Number of fields, inherited ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields carrying [`Required`](crate::info::Required).
    #[inline]
    pub fn required_count(&self) -> usize {
        self.required
    }

    /// All fields, in ordinal order.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo<R>] {
        &self.fields
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, FieldInfo<R>> {
        self.fields.iter()
    }

    #[inline]
    pub fn field_at(&self, ordinal: usize) -> Option<&FieldInfo<R>> {
        self.fields.get(ordinal)
    }

    /// Finds a field by its exact, declared name.
    ///
    /// Unlike [`find`](Self::find) this does no normalization and does not
    /// skip any field.
    pub fn field(&self, name: &str) -> Option<&FieldInfo<R>> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Resolves `query` through the dispatch table of the exclusion set `X`.
    ///
    /// `-` and `_` are interchangeable in `query`. Fields carrying a marker of
    /// `X` are never found.
    pub fn find<X: Exclusion>(&self, query: &str) -> Option<&FieldInfo<R>> {
        self.dispatch_table::<X>()
            .lookup(query)
            .and_then(|ordinal| self.fields.get(ordinal))
    }

    /// Returns the dispatch table of the exclusion set `X`, building it on
    /// first use.
    pub fn dispatch_table<X: Exclusion>(&self) -> &'static DispatchTable {
        let type_id = TypeId::of::<X>();

        let cached = self
            .tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();

        match cached {
            Some(table) => table,
            None => self.insert_table(type_id, X::excludes),
        }
    }

    #[inline(never)]
    fn insert_table(
        &self,
        type_id: TypeId,
        excludes: fn(&Attributes) -> bool,
    ) -> &'static DispatchTable {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        *tables.get_or_insert(type_id, || {
            log::trace!(
                "building dispatch table for {}",
                core::any::type_name::<R>()
            );
            let table = DispatchTable::new(
                self.fields
                    .iter()
                    .filter(|field| !excludes(field.attributes()))
                    .map(|field| (field.name(), field.ordinal())),
            );
            &*Box::leak(Box::new(table))
        })
    }

    /// Calls `op` with every field of `record` in ordinal order, stopping at
    /// the first [`ControlFlow::Break`].
    ///
    /// # Examples
    ///
    /// ```
    /// use core::ops::ControlFlow;
    /// use rfl_reflect::{Record, Shape};
    ///
    /// #[derive(Record, Default)]
    /// struct Pair { a: u8, b: String, c: u8 }
    ///
    /// let pair = Pair::default();
    /// let first_text = Pair::registry().for_each_value(&pair, |field, value| {
    ///     if value.reflect_shape() == Shape::Text {
    ///         ControlFlow::Break(field.name())
    ///     } else {
    ///         ControlFlow::Continue(())
    ///     }
    /// });
    /// assert_eq!(first_text, ControlFlow::Break("b"));
    /// ```
    pub fn for_each_value<'r, B>(
        &self,
        record: &'r R,
        mut op: impl FnMut(&FieldInfo<R>, &'r dyn Reflect) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        for field in self.fields.iter() {
            op(field, field.get(record))?;
        }
        ControlFlow::Continue(())
    }

    /// Mutable counterpart of [`for_each_value`](Self::for_each_value).
    pub fn for_each_value_mut<B>(
        &self,
        record: &mut R,
        mut op: impl FnMut(&FieldInfo<R>, &mut dyn Reflect) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        for field in self.fields.iter() {
            op(field, field.get_mut(record))?;
        }
        ControlFlow::Continue(())
    }
}

impl<R> core::fmt::Debug for Registry<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.fields.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// RegistryBuilder

/// Declares the fields of a [`Registry`].
///
/// `#[derive(Record)]` emits one of these; records can also be declared by
/// hand, see [`NonGenericRegistryCell`](crate::info::NonGenericRegistryCell).
pub struct RegistryBuilder<R> {
    fields: Vec<FieldInfo<R>>,
}

impl<R: 'static> RegistryBuilder<R> {
    /// Appends every field of `base`, reached through `project`.
    ///
    /// Call this before declaring own fields so base fields come first.
    pub fn inherit<B: 'static>(
        mut self,
        base: &'static Registry<B>,
        project: fn(&R) -> &B,
        project_mut: fn(&mut R) -> &mut B,
    ) -> Self {
        for field in base.iter() {
            let ordinal = self.fields.len();
            self.fields
                .push(FieldInfo::inherited(field, ordinal, project, project_mut));
        }
        self
    }

    /// Appends a field without attributes.
    #[inline]
    pub fn field<T: Codec>(
        self,
        name: &'static str,
        get: fn(&R) -> &T,
        get_mut: fn(&mut R) -> &mut T,
    ) -> Self {
        self.field_with(name, get, get_mut, Attributes::new())
    }

    /// Appends a field with `attributes`.
    pub fn field_with<T: Codec>(
        mut self,
        name: &'static str,
        get: fn(&R) -> &T,
        get_mut: fn(&mut R) -> &mut T,
        attributes: Attributes,
    ) -> Self {
        let attributes = (!attributes.is_empty()).then(|| Arc::new(attributes));
        let ordinal = self.fields.len();
        self.fields.push(FieldInfo::new::<T>(
            name,
            ordinal,
            attributes,
            Arc::new(Direct { get, get_mut }),
        ));
        self
    }

    /// Finishes the registry.
    ///
    /// # Panics
    ///
    /// Panics if two fields share a name or a name contains a NUL byte.
    pub fn build(self) -> Registry<R> {
        let mut seen = HashSet::with_capacity_and_hasher(self.fields.len(), FixedHashState);
        for field in &self.fields {
            let name = field.name();
            assert!(!name.contains('\0'), "field name {name:?} contains a NUL byte");
            assert!(
                seen.insert(name),
                "duplicate field name `{name}` in {}",
                core::any::type_name::<R>(),
            );
        }

        let required = self.fields.iter().filter(|field| field.is_required()).count();

        Registry {
            fields: self.fields.into_boxed_slice(),
            required,
            tables: RwLock::new(TypeIdMap::new()),
        }
    }
}
