use thiserror::Error;

use crate::{Shape, TreeKind};

/// An error raised while decoding a tree or loading flat text into a value.
///
/// Decoding never rolls back: when a record fails part-way, fields decoded
/// before the failure keep their new values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("expected {expected}, found {found}")]
    ShapeMismatch { expected: Shape, found: TreeKind },
    #[error("expected {expected} elements, found {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("alternative {index} is out of range, there are {count}")]
    IndexOutOfRange { index: u64, count: usize },
    #[error("alternative index is not a non-negative integer")]
    InvalidIndex,
    #[error("map entry is not a `[key, value]` pair")]
    MalformedEntry,
    #[error("no field named `{name}`")]
    UnknownField { name: String },
    #[error("`{field}` is a record, a member name is missing")]
    MissingSegment { field: &'static str },
    #[error("`{field}` is not a record")]
    NotARecord { field: &'static str },
    #[error("invalid {type_name}: `{text}`")]
    Parse { type_name: &'static str, text: String },
    #[error("value out of range for {type_name}")]
    OutOfRange { type_name: &'static str },
    #[error("{value} is not a discriminant of {type_name}")]
    UnknownDiscriminant { type_name: &'static str, value: String },
    #[error("{type_name} cannot be loaded from text")]
    TextUnsupported { type_name: &'static str },
    #[error("missing required fields: {}", .fields.join(", "))]
    MissingRequired { fields: Vec<&'static str> },
    #[error("{field}: {source}")]
    Field {
        field: &'static str,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Wraps `self` as raised inside the field `field`.
    #[inline]
    pub fn in_field(self, field: &'static str) -> Self {
        Self::Field {
            field,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping [`DecodeError::Field`] layers.
    pub fn root(&self) -> &Self {
        let mut this = self;
        while let Self::Field { source, .. } = this {
            this = &**source;
        }
        this
    }

    /// Returns the dotted field path the error was raised at, if any.
    ///
    /// ```
    /// use rfl_reflect::DecodeError;
    ///
    /// let err = DecodeError::InvalidIndex.in_field("mode").in_field("setpoint");
    /// assert_eq!(err.field_path().as_deref(), Some("setpoint.mode"));
    /// assert_eq!(err.to_string(), "setpoint: mode: alternative index is not a non-negative integer");
    /// ```
    pub fn field_path(&self) -> Option<String> {
        let mut path: Option<String> = None;
        let mut this = self;
        while let Self::Field { field, source } = this {
            match &mut path {
                Some(path) => {
                    path.push('.');
                    path.push_str(field);
                }
                None => path = Some((*field).to_owned()),
            }
            this = &**source;
        }
        path
    }

    pub(crate) fn shape_mismatch(expected: Shape, found: &crate::Tree) -> Self {
        Self::ShapeMismatch {
            expected,
            found: TreeKind::of(found),
        }
    }
}

