//! Tagged alternatives encoded as `[index, payload]`.

use crate::codec::{Codec, decode_new, expect_array};
use crate::{DecodeError, Shape, Tree};

/// A type holding exactly one of a fixed list of alternatives.
///
/// Derived with `#[derive(SumType)]` for enums whose variants are units or
/// carry exactly one value; the derive also implements [`Codec`] with
/// [`Shape::Sum`]. Alternatives are numbered in declaration order and unit
/// alternatives carry a `null` payload.
///
/// # Examples
///
/// ```
/// use rfl_reflect::{Codec, SumType};
/// use serde_json::json;
///
/// #[derive(SumType, Debug, PartialEq)]
/// enum Reading {
///     Offline,
///     Celsius(f64),
///     Label(String),
/// }
///
/// let label = Reading::Label("hot".to_owned());
/// assert_eq!(label.index(), 2);
/// assert_eq!(label.encode(), json!([2, "hot"]));
///
/// let mut r = Reading::Offline;
/// r.decode(&json!([1, 20.5])).unwrap();
/// assert_eq!(r, Reading::Celsius(20.5));
///
/// assert!(r.decode(&json!([5, null])).is_err());
/// assert!(r.decode(&json!(["x", null])).is_err());
/// ```
pub trait SumType: Sized + 'static {
    /// Number of alternatives.
    const ALTERNATIVES: usize;

    /// Index of the active alternative, below [`Self::ALTERNATIVES`].
    fn index(&self) -> usize;

    /// Encodes the active alternative's value.
    fn encode_payload(&self) -> Tree;

    /// Builds alternative `index` from its encoded payload.
    ///
    /// `index` has already been checked against [`Self::ALTERNATIVES`].
    fn decode_alternative(index: usize, payload: &Tree) -> Result<Self, DecodeError>;
}

/// Encodes `value` as `[index, payload]`.
pub fn encode<S: SumType>(value: &S) -> Tree {
    Tree::Array(vec![Tree::from(value.index()), value.encode_payload()])
}

/// Decodes `[index, payload]` into `target`.
///
/// The index must be a non-negative integer below the alternative count;
/// the payload is decoded into a fresh alternative.
pub fn decode<S: SumType>(target: &mut S, tree: &Tree) -> Result<(), DecodeError> {
    let (index, payload) = match expect_array(tree, Shape::Sum)? {
        [index, payload] => (index, payload),
        items => {
            return Err(DecodeError::LengthMismatch {
                expected: 2,
                found: items.len(),
            });
        }
    };

    let index = index.as_u64().ok_or(DecodeError::InvalidIndex)?;
    let count = S::ALTERNATIVES;
    let slot = usize::try_from(index)
        .ok()
        .filter(|slot| *slot < count)
        .ok_or(DecodeError::IndexOutOfRange { index, count })?;

    *target = S::decode_alternative(slot, payload)?;
    Ok(())
}

// -----------------------------------------------------------------------------
// Result

impl<T, E> SumType for Result<T, E>
where
    T: Codec + Default,
    E: Codec + Default,
{
    const ALTERNATIVES: usize = 2;

    fn index(&self) -> usize {
        match self {
            Ok(_) => 0,
            Err(_) => 1,
        }
    }

    fn encode_payload(&self) -> Tree {
        match self {
            Ok(value) => value.encode(),
            Err(error) => error.encode(),
        }
    }

    fn decode_alternative(index: usize, payload: &Tree) -> Result<Self, DecodeError> {
        match index {
            0 => decode_new(payload).map(Ok),
            1 => decode_new(payload).map(Err),
            _ => Err(DecodeError::IndexOutOfRange {
                index: index as u64,
                count: Self::ALTERNATIVES,
            }),
        }
    }
}

impl<T, E> Codec for Result<T, E>
where
    T: Codec + Default,
    E: Codec + Default,
{
    const SHAPE: Shape = Shape::Sum;

    #[inline]
    fn encode(&self) -> Tree {
        encode(self)
    }

    #[inline]
    fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
        decode(self, tree)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Codec, DecodeError};

    #[test]
    fn result_alternatives() {
        let ok: Result<u8, String> = Ok(3);
        let err: Result<u8, String> = Err("bad".into());
        assert_eq!(ok.encode(), json!([0, 3]));
        assert_eq!(err.encode(), json!([1, "bad"]));

        let mut value: Result<u8, String> = Ok(0);
        value.decode(&json!([1, "worse"])).unwrap();
        assert_eq!(value, Err("worse".to_owned()));
    }

    #[test]
    fn index_validation() {
        let mut value: Result<u8, String> = Ok(0);
        assert_eq!(
            value.decode(&json!([2, 0])),
            Err(DecodeError::IndexOutOfRange { index: 2, count: 2 })
        );
        assert_eq!(value.decode(&json!([-1, 0])), Err(DecodeError::InvalidIndex));
        assert_eq!(value.decode(&json!([0.5, 0])), Err(DecodeError::InvalidIndex));
        assert!(matches!(
            value.decode(&json!([0])),
            Err(DecodeError::LengthMismatch { expected: 2, found: 1 })
        ));
        assert!(matches!(value.decode(&json!({})), Err(DecodeError::ShapeMismatch { .. })));
        assert_eq!(value, Ok(0));
    }

    #[test]
    fn payload_failure_keeps_target() {
        let mut value: Result<u8, String> = Ok(9);
        assert!(value.decode(&json!([0, "nine"])).is_err());
        assert_eq!(value, Ok(9));
    }
}
