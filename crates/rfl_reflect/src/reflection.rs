use core::any::{Any, type_name};

use crate::load::TreeLoader;
use crate::{Codec, DecodeError, Shape, Tree};

/// Object-safe view of a [`Codec`] value.
///
/// Field accessors hand out `&dyn Reflect` / `&mut dyn Reflect`, so loaders
/// can encode and decode a field without knowing its concrete type.
/// Implemented for every `Codec` type; there is no reason to implement it by
/// hand.
///
/// # Examples
///
/// ```
/// use rfl_reflect::{Reflect, Shape};
/// use serde_json::json;
///
/// let mut value: Vec<u8> = vec![1];
/// let dynamic: &mut dyn Reflect = &mut value;
///
/// assert_eq!(dynamic.reflect_shape(), Shape::Sequence);
/// dynamic.reflect_decode(&json!([4, 5])).unwrap();
/// assert_eq!(dynamic.downcast_ref::<Vec<u8>>(), Some(&vec![4, 5]));
/// ```
pub trait Reflect: Any {
    /// See [`Codec::SHAPE`].
    fn reflect_shape(&self) -> Shape;

    /// Returns [`core::any::type_name`] of the concrete type.
    fn reflect_type_name(&self) -> &'static str;

    /// See [`Codec::encode`].
    fn reflect_encode(&self) -> Tree;

    /// See [`Codec::decode`].
    fn reflect_decode(&mut self, tree: &Tree) -> Result<(), DecodeError>;

    /// See [`Codec::decode_with`].
    fn reflect_decode_with(&mut self, tree: &Tree, loader: &TreeLoader) -> Result<(), DecodeError>;

    /// See [`Codec::parse_text`].
    fn reflect_parse_text(&mut self, text: &str) -> Result<(), DecodeError>;

    /// See [`Codec::assign_path`].
    fn reflect_assign_path(&mut self, path: &str, text: &str) -> Result<(), DecodeError>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Codec> Reflect for T {
    #[inline]
    fn reflect_shape(&self) -> Shape {
        T::SHAPE
    }

    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        type_name::<T>()
    }

    #[inline]
    fn reflect_encode(&self) -> Tree {
        self.encode()
    }

    #[inline]
    fn reflect_decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
        self.decode(tree)
    }

    #[inline]
    fn reflect_decode_with(&mut self, tree: &Tree, loader: &TreeLoader) -> Result<(), DecodeError> {
        self.decode_with(tree, loader)
    }

    #[inline]
    fn reflect_parse_text(&mut self, text: &str) -> Result<(), DecodeError> {
        self.parse_text(text)
    }

    #[inline]
    fn reflect_assign_path(&mut self, path: &str, text: &str) -> Result<(), DecodeError> {
        self.assign_path(path, text)
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}

impl core::fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}({})", self.reflect_type_name(), self.reflect_encode())
    }
}
