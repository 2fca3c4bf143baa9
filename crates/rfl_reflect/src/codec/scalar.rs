use core::any::type_name;
use core::num::IntErrorKind;

use serde_json::Number;

use crate::codec::{Codec, parse_error};
use crate::{DecodeError, Shape, Tree};

// -----------------------------------------------------------------------------
// Integers

fn integer_from_number<T>(number: &Number) -> Result<T, DecodeError>
where
    T: TryFrom<i64> + TryFrom<u64>,
{
    let out_of_range = || DecodeError::OutOfRange {
        type_name: type_name::<T>(),
    };

    if let Some(value) = number.as_i64() {
        T::try_from(value).map_err(|_| out_of_range())
    } else if let Some(value) = number.as_u64() {
        T::try_from(value).map_err(|_| out_of_range())
    } else {
        // Floats, including integral ones such as `1.0`.
        Err(parse_error::<T>(&number.to_string()))
    }
}

fn integer_from_tree<T>(tree: &Tree) -> Result<T, DecodeError>
where
    T: TryFrom<i64> + TryFrom<u64>,
{
    match tree {
        Tree::Number(number) => integer_from_number(number),
        other => Err(DecodeError::shape_mismatch(Shape::Scalar, other)),
    }
}

fn integer_from_text<T>(text: &str) -> Result<T, DecodeError>
where
    T: core::str::FromStr<Err = core::num::ParseIntError>,
{
    text.parse().map_err(|err: core::num::ParseIntError| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => DecodeError::OutOfRange {
            type_name: type_name::<T>(),
        },
        _ => parse_error::<T>(text),
    })
}

macro_rules! impl_codec_for_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl Codec for $ty {
            const SHAPE: Shape = Shape::Scalar;

            #[inline]
            fn encode(&self) -> Tree {
                Tree::from(*self)
            }

            fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
                *self = integer_from_tree(tree)?;
                Ok(())
            }

            fn parse_text(&mut self, text: &str) -> Result<(), DecodeError> {
                *self = integer_from_text(text)?;
                Ok(())
            }
        }
    )*};
}

impl_codec_for_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// -----------------------------------------------------------------------------
// Floats

// Non-finite values encode as `null` and `null` decodes back to NaN.
macro_rules! impl_codec_for_float {
    ($($ty:ty),* $(,)?) => {$(
        impl Codec for $ty {
            const SHAPE: Shape = Shape::Scalar;

            #[inline]
            fn encode(&self) -> Tree {
                Tree::from(*self)
            }

            fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
                match tree {
                    Tree::Number(number) => match number.as_f64() {
                        Some(value) => *self = value as $ty,
                        None => return Err(parse_error::<$ty>(&number.to_string())),
                    },
                    Tree::Null => *self = <$ty>::NAN,
                    other => return Err(DecodeError::shape_mismatch(Shape::Scalar, other)),
                }
                Ok(())
            }

            fn parse_text(&mut self, text: &str) -> Result<(), DecodeError> {
                *self = text.parse().map_err(|_| parse_error::<$ty>(text))?;
                Ok(())
            }
        }
    )*};
}

impl_codec_for_float!(f32, f64);

// -----------------------------------------------------------------------------
// bool

impl Codec for bool {
    const SHAPE: Shape = Shape::Scalar;

    #[inline]
    fn encode(&self) -> Tree {
        Tree::Bool(*self)
    }

    fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
        match tree {
            Tree::Bool(value) => {
                *self = *value;
                Ok(())
            }
            other => Err(DecodeError::shape_mismatch(Shape::Scalar, other)),
        }
    }

    /// Flat input spells booleans as the integers `0` and `1`.
    fn parse_text(&mut self, text: &str) -> Result<(), DecodeError> {
        *self = match integer_from_text::<u64>(text) {
            Ok(0) => false,
            Ok(1) => true,
            Ok(_) | Err(DecodeError::OutOfRange { .. }) => {
                return Err(DecodeError::OutOfRange {
                    type_name: type_name::<bool>(),
                });
            }
            Err(_) => return Err(parse_error::<bool>(text)),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Codec, DecodeError};

    #[test]
    fn integers_require_integral_in_range() {
        let mut v = 0u8;
        v.decode(&json!(200)).unwrap();
        assert_eq!(v, 200);

        assert!(matches!(v.decode(&json!(256)), Err(DecodeError::OutOfRange { .. })));
        assert!(matches!(v.decode(&json!(-1)), Err(DecodeError::OutOfRange { .. })));
        assert!(matches!(v.decode(&json!(1.5)), Err(DecodeError::Parse { .. })));
        assert!(matches!(v.decode(&json!("1")), Err(DecodeError::ShapeMismatch { .. })));
        assert_eq!(v, 200);

        let mut big = 0u64;
        big.decode(&json!(u64::MAX)).unwrap();
        assert_eq!(big, u64::MAX);
    }

    #[test]
    fn integer_text() {
        let mut v = 0i16;
        v.parse_text("-42").unwrap();
        assert_eq!(v, -42);

        assert!(matches!(v.parse_text("40000"), Err(DecodeError::OutOfRange { .. })));
        assert!(matches!(v.parse_text("12abc"), Err(DecodeError::Parse { .. })));
        assert!(matches!(v.parse_text(""), Err(DecodeError::Parse { .. })));

        let mut u = 0u32;
        assert!(matches!(u.parse_text("-1"), Err(DecodeError::Parse { .. })));
    }

    #[test]
    fn floats() {
        let mut v = 0.0f64;
        v.decode(&json!(3)).unwrap();
        assert_eq!(v, 3.0);

        v.parse_text("1.25").unwrap();
        assert_eq!(v, 1.25);
        assert!(v.parse_text("1.25x").is_err());

        assert_eq!(f64::NAN.encode(), json!(null));
        v.decode(&json!(null)).unwrap();
        assert!(v.is_nan());
    }

    #[test]
    fn bool_text_is_integral() {
        let mut b = false;
        b.parse_text("1").unwrap();
        assert!(b);
        b.parse_text("0").unwrap();
        assert!(!b);

        assert!(matches!(b.parse_text("2"), Err(DecodeError::OutOfRange { .. })));
        assert!(matches!(b.parse_text("true"), Err(DecodeError::Parse { .. })));

        b.decode(&json!(true)).unwrap();
        assert!(b);
        assert!(b.decode(&json!(1)).is_err());
    }
}
