use crate::codec::parse_error;
use crate::info::{FieldInfo, NonGenericRegistryCell, Registry};
use crate::load::{FlatLoader, TreeLoader};
use crate::{Codec, DecodeError, Shape, Tree};

// -----------------------------------------------------------------------------
// Record

/// A type with a field registry.
///
/// Derive it with `#[derive(Record)]`, which also implements [`Codec`] with
/// [`Shape::Record`]. Field options go in `#[record(...)]`:
///
/// - `required`: attach [`Required`](crate::info::Required)
/// - `ignore`: attach [`Ignore`](crate::info::Ignore)
/// - `skip_flat`: attach [`SkipFlat`](crate::info::SkipFlat)
/// - `rename = "name"`: use `name` instead of the field identifier
/// - `base`: inherit the fields of this (record-typed) field
/// - `@expr`: attach any `Send + Sync` value
///
/// # Examples
///
/// ```
/// use rfl_reflect::{Codec, Record, count, enumerate};
/// use serde_json::json;
///
/// struct Decimals(u8);
///
/// #[derive(Record)]
/// struct Foo {
///     foo: i32,
///     #[record(rename = "bar", @Decimals(1))]
///     bar_value: f64,
/// }
///
/// impl Default for Foo {
///     fn default() -> Self {
///         Self { foo: 42, bar_value: 1.1 }
///     }
/// }
///
/// assert_eq!(count::<Foo>(), 2);
/// assert_eq!(enumerate::<Foo>()[1].name(), "bar");
/// assert_eq!(enumerate::<Foo>()[1].get_attribute::<Decimals>().unwrap().0, 1);
///
/// let mut foo = Foo::default();
/// foo.decode(&json!({})).unwrap();
/// assert_eq!((foo.foo, foo.bar_value), (42, 1.1));
///
/// foo.decode(&json!({ "foo": 1 })).unwrap();
/// assert_eq!((foo.foo, foo.bar_value), (1, 1.1));
/// ```
pub trait Record: Codec + Sized {
    /// Returns the registry of `Self`, built on first call.
    fn registry() -> &'static Registry<Self>;
}

/// Returns the fields of `R`: inherited fields first, then own fields in
/// declaration order.
#[inline]
pub fn enumerate<R: Record>() -> &'static [FieldInfo<R>] {
    R::registry().fields()
}

/// Returns the number of fields of `R`, inherited ones included.
#[inline]
pub fn count<R: Record>() -> usize {
    R::registry().len()
}

// -----------------------------------------------------------------------------
// Record codec

/// Encodes every non-ignored field of `record` into an object, in registry
/// order.
pub fn encode_record<R: Record>(record: &R) -> Tree {
    let mut object = serde_json::Map::new();
    for field in R::registry().iter().filter(|field| !field.is_ignored()) {
        object.insert(field.name().to_owned(), field.encode(record));
    }
    Tree::Object(object)
}

/// Decodes an object into `record` with the default [`TreeLoader`].
#[inline]
pub fn decode_record<R: Record>(record: &mut R, tree: &Tree) -> Result<(), DecodeError> {
    TreeLoader::new().load(record, tree)
}

/// Decodes an object into `record` with the settings of `loader`.
#[inline]
pub fn decode_record_with<R: Record>(
    record: &mut R,
    tree: &Tree,
    loader: &TreeLoader,
) -> Result<(), DecodeError> {
    loader.load(record, tree)
}

/// Loads the combined form `member.value` into `record`.
///
/// The text is split at its first `.`: the head names a member, the rest is
/// that member's value (and may itself be `member.value` for a nested
/// record).
pub fn parse_record_text<R: Record>(record: &mut R, text: &str) -> Result<(), DecodeError> {
    match text.split_once('.') {
        Some((member, value)) => FlatLoader::assign(record, member, value),
        None => Err(parse_error::<R>(text)),
    }
}

/// Loads `text` into the member of `record` at the dotted `path`.
#[inline]
pub fn assign_record_path<R: Record>(record: &mut R, path: &str, text: &str) -> Result<(), DecodeError> {
    FlatLoader::assign(record, path, text)
}

// -----------------------------------------------------------------------------
// Empty

/// A record with no fields.
///
/// Encodes as `{}` and accepts any object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Empty;

impl Codec for Empty {
    const SHAPE: Shape = Shape::Record;

    #[inline]
    fn encode(&self) -> Tree {
        encode_record(self)
    }

    #[inline]
    fn decode(&mut self, tree: &Tree) -> Result<(), DecodeError> {
        decode_record(self, tree)
    }

    #[inline]
    fn decode_with(&mut self, tree: &Tree, loader: &TreeLoader) -> Result<(), DecodeError> {
        decode_record_with(self, tree, loader)
    }

    #[inline]
    fn parse_text(&mut self, text: &str) -> Result<(), DecodeError> {
        parse_record_text(self, text)
    }

    #[inline]
    fn assign_path(&mut self, path: &str, text: &str) -> Result<(), DecodeError> {
        assign_record_path(self, path, text)
    }
}

impl Record for Empty {
    fn registry() -> &'static Registry<Self> {
        static CELL: NonGenericRegistryCell<Empty> = NonGenericRegistryCell::new();
        CELL.get_or_init(|| Registry::builder().build())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Codec, DecodeError, Empty, count, enumerate};

    #[test]
    fn empty_record() {
        assert_eq!(count::<Empty>(), 0);
        assert!(enumerate::<Empty>().is_empty());
        assert_eq!(Empty.encode(), json!({}));

        let mut empty = Empty;
        empty.decode(&json!({ "anything": [1, 2] })).unwrap();
        assert!(matches!(empty.decode(&json!(null)), Err(DecodeError::ShapeMismatch { .. })));
        assert!(matches!(empty.parse_text("x.1"), Err(DecodeError::UnknownField { .. })));
        assert!(matches!(empty.parse_text("x"), Err(DecodeError::Parse { .. })));
    }
}
