use std::borrow::Cow;
use std::path::PathBuf;

use crate::codec::{Codec, parse_error};
use crate::{DecodeError, Shape, Tree};

#[inline]
fn expect_str(tree: &Tree) -> Result<&str, DecodeError> {
    match tree {
        Tree::String(text) => Ok(text),
        other => Err(DecodeError::shape_mismatch(Shape::Text, other)),
    }
}

// -----------------------------------------------------------------------------
// Owned strings

impl Codec for String {
    const SHAPE: Shape = Shape::Text;

    #[inline]
    fn encode(&self) -> Tree {
        Tree::String(self.clone())
    }

    fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
        self.parse_text(expect_str(tree)?)
    }

    fn parse_text(&mut self, text: &str) -> Result<(), DecodeError> {
        self.clear();
        self.push_str(text);
        Ok(())
    }
}

impl Codec for Box<str> {
    const SHAPE: Shape = Shape::Text;

    #[inline]
    fn encode(&self) -> Tree {
        Tree::from(&**self)
    }

    fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
        self.parse_text(expect_str(tree)?)
    }

    fn parse_text(&mut self, text: &str) -> Result<(), DecodeError> {
        *self = text.into();
        Ok(())
    }
}

impl Codec for Cow<'static, str> {
    const SHAPE: Shape = Shape::Text;

    #[inline]
    fn encode(&self) -> Tree {
        Tree::from(&**self)
    }

    fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
        self.parse_text(expect_str(tree)?)
    }

    fn parse_text(&mut self, text: &str) -> Result<(), DecodeError> {
        *self = Cow::Owned(text.to_owned());
        Ok(())
    }
}

impl Codec for PathBuf {
    const SHAPE: Shape = Shape::Text;

    /// Non UTF-8 paths are encoded lossily.
    #[inline]
    fn encode(&self) -> Tree {
        Tree::from(self.to_string_lossy())
    }

    fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
        self.parse_text(expect_str(tree)?)
    }

    fn parse_text(&mut self, text: &str) -> Result<(), DecodeError> {
        *self = PathBuf::from(text);
        Ok(())
    }
}

impl Codec for char {
    const SHAPE: Shape = Shape::Text;

    #[inline]
    fn encode(&self) -> Tree {
        Tree::String(self.to_string())
    }

    fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
        self.parse_text(expect_str(tree)?)
    }

    fn parse_text(&mut self, text: &str) -> Result<(), DecodeError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                *self = c;
                Ok(())
            }
            _ => Err(parse_error::<char>(text)),
        }
    }
}

// -----------------------------------------------------------------------------
// Display + FromStr

/// Implements [`Codec`](crate::Codec) with [`Shape::Text`](crate::Shape::Text)
/// for types that round-trip through [`Display`](core::fmt::Display) and
/// [`FromStr`](core::str::FromStr).
///
/// # Examples
///
/// ```
/// use core::{fmt, str::FromStr};
/// use rfl_reflect::{Codec, impl_text_codec};
/// use serde_json::json;
///
/// #[derive(Debug, PartialEq)]
/// struct Hex(u32);
///
/// impl fmt::Display for Hex {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{:x}", self.0)
///     }
/// }
///
/// impl FromStr for Hex {
///     type Err = core::num::ParseIntError;
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         u32::from_str_radix(s, 16).map(Hex)
///     }
/// }
///
/// impl_text_codec!(Hex);
///
/// let mut h = Hex(0);
/// h.decode(&json!("ff")).unwrap();
/// assert_eq!(h, Hex(255));
/// assert_eq!(h.encode(), json!("ff"));
/// assert!(h.parse_text("zz").is_err());
/// ```
#[macro_export]
macro_rules! impl_text_codec {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::Codec for $ty {
            const SHAPE: $crate::Shape = $crate::Shape::Text;

            fn encode(&self) -> $crate::Tree {
                $crate::Tree::String(::std::string::ToString::to_string(self))
            }

            fn decode(&mut self, tree: &$crate::Tree) -> ::core::result::Result<(), $crate::DecodeError> {
                match tree {
                    $crate::Tree::String(text) => $crate::Codec::parse_text(self, text),
                    other => ::core::result::Result::Err($crate::DecodeError::ShapeMismatch {
                        expected: $crate::Shape::Text,
                        found: $crate::TreeKind::of(other),
                    }),
                }
            }

            fn parse_text(&mut self, text: &str) -> ::core::result::Result<(), $crate::DecodeError> {
                match <$ty as ::core::str::FromStr>::from_str(text) {
                    ::core::result::Result::Ok(value) => {
                        *self = value;
                        ::core::result::Result::Ok(())
                    }
                    ::core::result::Result::Err(_) => ::core::result::Result::Err($crate::DecodeError::Parse {
                        type_name: ::core::any::type_name::<$ty>(),
                        text: ::std::borrow::ToOwned::to_owned(text),
                    }),
                }
            }
        }
    )*};
}

impl_text_codec!(
    std::net::IpAddr,
    std::net::Ipv4Addr,
    std::net::Ipv6Addr,
    std::net::SocketAddr,
);

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::net::{IpAddr, Ipv4Addr};
    use std::path::PathBuf;

    use serde_json::json;

    use crate::{Codec, DecodeError, Shape, TreeKind};

    #[test]
    fn strings_take_text_verbatim() {
        let mut s = String::from("old");
        s.parse_text(" a.b=c ").unwrap();
        assert_eq!(s, " a.b=c ");

        let mut cow: Cow<'static, str> = Cow::Borrowed("x");
        cow.decode(&json!("y")).unwrap();
        assert_eq!(cow, "y");

        let mut path = PathBuf::new();
        path.decode(&json!("/etc/hosts")).unwrap();
        assert_eq!(path.encode(), json!("/etc/hosts"));
    }

    #[test]
    fn non_string_tree_is_a_shape_mismatch() {
        let mut s = String::new();
        assert_eq!(
            s.decode(&json!(3)),
            Err(DecodeError::ShapeMismatch {
                expected: Shape::Text,
                found: TreeKind::Number,
            })
        );
    }

    #[test]
    fn char_needs_exactly_one() {
        let mut c = ' ';
        c.parse_text("é").unwrap();
        assert_eq!(c, 'é');
        assert!(c.parse_text("").is_err());
        assert!(c.parse_text("ab").is_err());
    }

    #[test]
    fn addresses() {
        let mut ip = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
        ip.decode(&json!("10.0.0.1")).unwrap();
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(ip.encode(), json!("10.0.0.1"));
        assert!(matches!(ip.parse_text("10.0.0"), Err(DecodeError::Parse { .. })));
    }
}
