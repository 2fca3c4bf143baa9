use crate::load::TreeLoader;
use crate::{DecodeError, Reflect, Shape, Tree};

/// A value that can be loaded into one field.
///
/// Errors raised by the field's own codec are wrapped in
/// [`DecodeError::Field`] with `name`.
pub trait FieldInput {
    fn apply_to(self, name: &'static str, target: &mut dyn Reflect) -> Result<(), DecodeError>;
}

impl FieldInput for &Tree {
    #[inline]
    fn apply_to(self, name: &'static str, target: &mut dyn Reflect) -> Result<(), DecodeError> {
        target.reflect_decode(self).map_err(|err| err.in_field(name))
    }
}

/// A tree decoded with the settings of a [`TreeLoader`], which carry over
/// into nested records.
#[derive(Debug, Clone, Copy)]
pub struct TreeInput<'a> {
    pub tree: &'a Tree,
    pub loader: &'a TreeLoader,
}

impl FieldInput for TreeInput<'_> {
    #[inline]
    fn apply_to(self, name: &'static str, target: &mut dyn Reflect) -> Result<(), DecodeError> {
        target
            .reflect_decode_with(self.tree, self.loader)
            .map_err(|err| err.in_field(name))
    }
}

/// Flat text for one field, with the rest of a dotted path if the field is a
/// nested record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextInput<'a> {
    /// Path below the field, e.g. `fan_mode` for `setpoint.fan_mode`.
    pub path: Option<&'a str>,
    pub text: &'a str,
}

impl<'a> TextInput<'a> {
    #[inline]
    pub const fn new(text: &'a str) -> Self {
        Self { path: None, text }
    }

    #[inline]
    pub const fn at(path: &'a str, text: &'a str) -> Self {
        Self {
            path: Some(path),
            text,
        }
    }
}

impl FieldInput for TextInput<'_> {
    fn apply_to(self, name: &'static str, target: &mut dyn Reflect) -> Result<(), DecodeError> {
        let is_record = target.reflect_shape() == Shape::Record;
        let result = match self.path {
            Some(path) if is_record => target.reflect_assign_path(path, self.text),
            Some(_) => return Err(DecodeError::NotARecord { field: name }),
            // A record consumes one `member.` segment of the value itself.
            None if is_record && !self.text.contains('.') => {
                return Err(DecodeError::MissingSegment { field: name });
            }
            None => target.reflect_parse_text(self.text),
        };
        result.map_err(|err| err.in_field(name))
    }
}
