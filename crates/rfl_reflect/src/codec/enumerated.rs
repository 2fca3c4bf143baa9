//! Fieldless enums encoded through their integer representation.

use core::any::type_name;
use core::fmt::Display;

use crate::{Codec, DecodeError, Tree};

/// A fieldless enum with an integer representation.
///
/// Usually derived with `#[derive(Enumerated)]`, which also implements
/// [`Codec`] with [`Shape::Enum`](crate::Shape::Enum). The representation is
/// the enum's `#[repr]` type, `isize` when there is none.
///
/// # Examples
///
/// ```
/// use rfl_reflect::{Codec, DecodeError, Enumerated};
/// use serde_json::json;
///
/// #[derive(Enumerated, Debug, PartialEq, Default)]
/// #[repr(u8)]
/// enum FanMode {
///     #[default]
///     Auto = 1,
///     On = 2,
/// }
///
/// assert_eq!(FanMode::On.to_repr(), 2u8);
/// assert_eq!(FanMode::On.encode(), json!(2));
///
/// let mut mode = FanMode::Auto;
/// mode.parse_text("2").unwrap();
/// assert_eq!(mode, FanMode::On);
///
/// let err = mode.decode(&json!(3)).unwrap_err();
/// assert!(matches!(err, DecodeError::UnknownDiscriminant { .. }));
/// assert_eq!(mode, FanMode::On);
/// ```
pub trait Enumerated: Sized + 'static {
    type Repr: Codec + Copy + Default + Display;

    /// Returns the discriminant of `self`.
    fn to_repr(&self) -> Self::Repr;

    /// Returns the variant with discriminant `repr`.
    fn from_repr(repr: Self::Repr) -> Option<Self>;
}

fn lookup<E: Enumerated>(repr: E::Repr) -> Result<E, DecodeError> {
    E::from_repr(repr).ok_or_else(|| DecodeError::UnknownDiscriminant {
        type_name: type_name::<E>(),
        value: repr.to_string(),
    })
}

/// Encodes `value` as its discriminant.
#[inline]
pub fn encode<E: Enumerated>(value: &E) -> Tree {
    value.to_repr().encode()
}

/// Decodes a discriminant into `target`; an unknown discriminant leaves
/// `target` unchanged.
pub fn decode<E: Enumerated>(target: &mut E, tree: &Tree) -> Result<(), DecodeError> {
    let mut repr = E::Repr::default();
    repr.decode(tree)?;
    *target = lookup(repr)?;
    Ok(())
}

/// Parses a discriminant from flat text into `target`.
pub fn parse_text<E: Enumerated>(target: &mut E, text: &str) -> Result<(), DecodeError> {
    let mut repr = E::Repr::default();
    repr.parse_text(text)?;
    *target = lookup(repr)?;
    Ok(())
}
