use core::any::{Any, TypeId, type_name};
use core::fmt;
use std::sync::Arc;

use crate::info::{Attributes, Ignore, Required, SkipFlat};
use crate::{Codec, DecodeError, Reflect, Shape, Tree};

// -----------------------------------------------------------------------------
// FieldAccess

/// Projects a record instance onto one of its fields.
pub trait FieldAccess<R>: Send + Sync + 'static {
    fn get<'a>(&self, record: &'a R) -> &'a dyn Reflect;

    fn get_mut<'a>(&self, record: &'a mut R) -> &'a mut dyn Reflect;
}

/// A field declared directly on `R`.
pub(crate) struct Direct<R, T> {
    pub get: fn(&R) -> &T,
    pub get_mut: fn(&mut R) -> &mut T,
}

impl<R: 'static, T: Codec> FieldAccess<R> for Direct<R, T> {
    #[inline]
    fn get<'a>(&self, record: &'a R) -> &'a dyn Reflect {
        (self.get)(record)
    }

    #[inline]
    fn get_mut<'a>(&self, record: &'a mut R) -> &'a mut dyn Reflect {
        (self.get_mut)(record)
    }
}

/// A field of the base record `B` embedded in `R`.
pub(crate) struct Inherited<R, B> {
    pub project: fn(&R) -> &B,
    pub project_mut: fn(&mut R) -> &mut B,
    pub inner: Arc<dyn FieldAccess<B>>,
}

impl<R: 'static, B: 'static> FieldAccess<R> for Inherited<R, B> {
    #[inline]
    fn get<'a>(&self, record: &'a R) -> &'a dyn Reflect {
        self.inner.get((self.project)(record))
    }

    #[inline]
    fn get_mut<'a>(&self, record: &'a mut R) -> &'a mut dyn Reflect {
        self.inner.get_mut((self.project_mut)(record))
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// Descriptor of one field of the record `R`.
///
/// Descriptors are built once per record type by
/// [`RegistryBuilder`](crate::info::RegistryBuilder) and shared by every
/// instance.
///
/// # Examples
///
/// ```
/// use rfl_reflect::{Record, Shape, info::Required};
///
/// #[derive(Record, Default)]
/// struct Foo {
///     #[record(required)]
///     field_a: f32,
/// }
///
/// let field = Foo::registry().field_at(0).unwrap();
/// assert_eq!(field.name(), "field_a");
/// assert_eq!(field.shape(), Shape::Scalar);
/// assert!(field.type_is::<f32>());
/// assert!(field.has_attribute::<Required>());
///
/// let mut foo = Foo::default();
/// field.get_mut(&mut foo).reflect_parse_text("2.5").unwrap();
/// assert_eq!(foo.field_a, 2.5);
/// ```
pub struct FieldInfo<R> {
    name: &'static str,
    ordinal: usize,
    shape: Shape,
    type_id: TypeId,
    type_name: &'static str,
    // `None` when there are no attributes, which is the common case.
    attributes: Option<Arc<Attributes>>,
    access: Arc<dyn FieldAccess<R>>,
}

impl<R: 'static> FieldInfo<R> {
    pub(crate) fn new<T: Codec>(
        name: &'static str,
        ordinal: usize,
        attributes: Option<Arc<Attributes>>,
        access: Arc<dyn FieldAccess<R>>,
    ) -> Self {
        Self {
            name,
            ordinal,
            shape: T::SHAPE,
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            attributes,
            access,
        }
    }

    /// Re-targets a field of the base record `B` at `R`.
    pub(crate) fn inherited<B: 'static>(
        base: &FieldInfo<B>,
        ordinal: usize,
        project: fn(&R) -> &B,
        project_mut: fn(&mut R) -> &mut B,
    ) -> Self {
        Self {
            name: base.name,
            ordinal,
            shape: base.shape,
            type_id: base.type_id,
            type_name: base.type_name,
            attributes: base.attributes.clone(),
            access: Arc::new(Inherited {
                project,
                project_mut,
                inner: base.access.clone(),
            }),
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Position in the registry; base fields come first.
    #[inline]
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }

    #[inline]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn attributes(&self) -> &Attributes {
        match &self.attributes {
            Some(attributes) => attributes,
            None => Attributes::EMPTY,
        }
    }

    #[inline]
    pub fn has_attribute<T: Any>(&self) -> bool {
        self.attributes().contains::<T>()
    }

    #[inline]
    pub fn get_attribute<T: Any>(&self) -> Option<&T> {
        self.attributes().get::<T>()
    }

    #[inline]
    pub fn is_required(&self) -> bool {
        self.has_attribute::<Required>()
    }

    #[inline]
    pub fn is_ignored(&self) -> bool {
        self.has_attribute::<Ignore>()
    }

    #[inline]
    pub fn is_flat_loadable(&self) -> bool {
        !self.is_ignored() && !self.has_attribute::<SkipFlat>()
    }

    /// Borrows this field of `record`.
    #[inline]
    pub fn get<'a>(&self, record: &'a R) -> &'a dyn Reflect {
        self.access.get(record)
    }

    /// Mutably borrows this field of `record`.
    #[inline]
    pub fn get_mut<'a>(&self, record: &'a mut R) -> &'a mut dyn Reflect {
        self.access.get_mut(record)
    }

    #[inline]
    pub fn encode(&self, record: &R) -> Tree {
        self.get(record).reflect_encode()
    }

    /// Decodes `tree` into this field of `record`, naming the field in the
    /// error.
    pub fn decode(&self, record: &mut R, tree: &Tree) -> Result<(), DecodeError> {
        self.get_mut(record)
            .reflect_decode(tree)
            .map_err(|err| err.in_field(self.name))
    }
}

impl<R> Clone for FieldInfo<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            ordinal: self.ordinal,
            shape: self.shape,
            type_id: self.type_id,
            type_name: self.type_name,
            attributes: self.attributes.clone(),
            access: self.access.clone(),
        }
    }
}

impl<R> fmt::Debug for FieldInfo<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("ordinal", &self.ordinal)
            .field("shape", &self.shape)
            .field("type_name", &self.type_name)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}
