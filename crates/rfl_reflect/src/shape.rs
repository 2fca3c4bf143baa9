use core::fmt;

// -----------------------------------------------------------------------------
// Tree

/// The tree interchange value.
///
/// Objects keep insertion order, so encoded records list their fields in
/// registry order.
pub type Tree = serde_json::Value;

// -----------------------------------------------------------------------------
// Shape

/// The static shape of a codec-capable type.
///
/// Each [`Codec`](crate::Codec) implementation declares one; the shape decides
/// the tree form and whether a field can be navigated into from flat input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Numbers and booleans.
    Scalar,
    /// Fieldless enums encoded as their integer representation.
    Enum,
    /// String-like values.
    Text,
    /// Types with a field registry, encoded as objects.
    Record,
    /// `Option<T>`.
    Optional,
    /// Tagged alternatives encoded as `[index, payload]`.
    Sum,
    /// Arrays with a length fixed by the type.
    FixedSequence,
    /// Growable sequences.
    Sequence,
    /// Sets.
    Set,
    /// Maps encoded as `[[key, value], ...]`.
    Map,
    /// Heterogeneous tuples.
    Tuple,
    /// Time points and durations in microseconds.
    Time,
}

impl Shape {
    /// Returns the lowercase name used in messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Enum => "enum",
            Self::Text => "text",
            Self::Record => "record",
            Self::Optional => "optional",
            Self::Sum => "sum",
            Self::FixedSequence => "fixed sequence",
            Self::Sequence => "sequence",
            Self::Set => "set",
            Self::Map => "map",
            Self::Tuple => "tuple",
            Self::Time => "time",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// -----------------------------------------------------------------------------
// TreeKind

/// The variant of a [`Tree`] value, for error reporting.
///
/// # Examples
///
/// ```
/// use rfl_reflect::TreeKind;
/// use serde_json::json;
///
/// assert_eq!(TreeKind::of(&json!([1, 2])), TreeKind::Array);
/// assert_eq!(TreeKind::of(&json!(null)).to_string(), "null");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl TreeKind {
    pub const fn of(tree: &Tree) -> Self {
        match tree {
            Tree::Null => Self::Null,
            Tree::Bool(_) => Self::Bool,
            Tree::Number(_) => Self::Number,
            Tree::String(_) => Self::String,
            Tree::Array(_) => Self::Array,
            Tree::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        })
    }
}
