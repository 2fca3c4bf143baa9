//! The type-directed codec.
//!
//! Every supported type implements [`Codec`]. The implementation is picked
//! statically by the value's type; the tree form follows the type's [`Shape`]:
//!
//! | Shape | Types | Tree |
//! |-------|-------|------|
//! | `Scalar` | integers, floats, `bool` | number / boolean |
//! | `Enum` | `#[derive(Enumerated)]` | integer representation |
//! | `Text` | `String`, `PathBuf`, `char`, addresses, ... | string |
//! | `Record` | `#[derive(Record)]` | object keyed by field name |
//! | `Optional` | `Option<T>` | `null` or the inner form |
//! | `Sum` | `#[derive(SumType)]`, `Result` | `[index, payload]` |
//! | `FixedSequence` | `[T; N]` | array of exactly `N` |
//! | `Sequence` / `Set` | `Vec`, `VecDeque`, `LinkedList`, sets | array |
//! | `Map` | `BTreeMap`, `HashMap` | `[[key, value], ...]` |
//! | `Tuple` | tuples up to 12 | array |
//! | `Time` | `SystemTime`, `Duration`, `chrono` types | signed microseconds |
//!
//! `Box<T>` has the shape of `T`.

use core::any::type_name;

use crate::load::TreeLoader;
use crate::{DecodeError, Shape, Tree};

// -----------------------------------------------------------------------------
// Modules

mod array;
mod boxed;
mod list;
mod map;
mod option;
mod scalar;
mod text;
mod time;
mod tuple;

pub mod enumerated;
pub mod sum;

// -----------------------------------------------------------------------------
// Exports

pub use enumerated::Enumerated;
pub use sum::SumType;

// -----------------------------------------------------------------------------
// Codec

/// Encoding to and decoding from [`Tree`] values, plus the flat text form.
///
/// # Examples
///
/// ```
/// use rfl_reflect::Codec;
/// use serde_json::json;
///
/// let mut pair = (0u8, String::new());
/// pair.decode(&json!([7, "seven"])).unwrap();
///
/// assert_eq!(pair, (7, "seven".to_owned()));
/// assert_eq!(pair.encode(), json!([7, "seven"]));
/// assert!(pair.decode(&json!([7])).is_err());
/// ```
pub trait Codec: 'static {
    const SHAPE: Shape;

    /// Encodes `self`. Encoding cannot fail.
    fn encode(&self) -> Tree;

    /// Overwrites `self` from `tree`.
    ///
    /// On failure `self` may be partially updated.
    fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError>;

    /// Like [`decode`](Self::decode), with the settings of `loader` applied
    /// to every record reached from `self`.
    ///
    /// Records, `Box`, `Option`, arrays, sequences, sets, maps and tuples
    /// pass `loader` on. Sum payloads decode with the default settings.
    fn decode_with(&mut self, tree: &Tree, loader: &TreeLoader) -> Result<(), DecodeError> {
        let _ = loader;
        self.decode(tree)
    }

    /// Loads `self` from one flat text value.
    ///
    /// Sequences and sets append one element instead of replacing their
    /// content. Shapes without a text form return
    /// [`DecodeError::TextUnsupported`].
    fn parse_text(&mut self, text: &str) -> Result<(), DecodeError> {
        let _ = text;
        Err(text_unsupported::<Self>())
    }

    /// Loads the member at the dotted `path` from `text`.
    ///
    /// Only records can be navigated into; everything else returns
    /// [`DecodeError::TextUnsupported`].
    fn assign_path(&mut self, path: &str, text: &str) -> Result<(), DecodeError> {
        let _ = (path, text);
        Err(text_unsupported::<Self>())
    }
}

#[inline]
pub(crate) fn text_unsupported<T: ?Sized>() -> DecodeError {
    DecodeError::TextUnsupported {
        type_name: type_name::<T>(),
    }
}

#[inline]
pub(crate) fn parse_error<T: ?Sized>(text: &str) -> DecodeError {
    DecodeError::Parse {
        type_name: type_name::<T>(),
        text: text.to_owned(),
    }
}

/// Borrows the elements of an array tree, or fails with a shape mismatch.
pub(crate) fn expect_array(tree: &Tree, expected: Shape) -> Result<&[Tree], DecodeError> {
    match tree {
        Tree::Array(items) => Ok(items),
        other => Err(DecodeError::shape_mismatch(expected, other)),
    }
}

/// Like [`expect_array`] but also checks the element count.
pub(crate) fn expect_exact(tree: &Tree, expected: Shape, len: usize) -> Result<&[Tree], DecodeError> {
    let items = expect_array(tree, expected)?;
    if items.len() != len {
        return Err(DecodeError::LengthMismatch {
            expected: len,
            found: items.len(),
        });
    }
    Ok(items)
}

/// Decodes a fresh `T` starting from its default value.
#[inline]
pub(crate) fn decode_new<T: Codec + Default>(tree: &Tree) -> Result<T, DecodeError> {
    let mut value = T::default();
    value.decode(tree)?;
    Ok(value)
}

/// Decodes a fresh `T` with the settings of `loader`.
#[inline]
pub(crate) fn decode_new_with<T: Codec + Default>(
    tree: &Tree,
    loader: &TreeLoader,
) -> Result<T, DecodeError> {
    let mut value = T::default();
    value.decode_with(tree, loader)?;
    Ok(value)
}

/// Parses a fresh `T` starting from its default value.
#[inline]
pub(crate) fn parse_new<T: Codec + Default>(text: &str) -> Result<T, DecodeError> {
    let mut value = T::default();
    value.parse_text(text)?;
    Ok(value)
}
